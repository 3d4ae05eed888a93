//! Utility functions and structures.

use crate::{EnsemblError, Result};

use std::fs::{self, File};
use std::path::Path;
use std::io::{BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;
use tracing_subscriber::EnvFilter;

//-----------------------------------------------------------------------------

// Utilities for working with files.

const SIZE_UNITS: [(f64, &str); 6] = [
    (1.0, "B"),
    (1024.0, "KiB"),
    (1024.0 * 1024.0, "MiB"),
    (1024.0 * 1024.0 * 1024.0, "GiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0, "PiB"),
];

/// Returns a human-readable representation of the given number of bytes.
pub fn human_readable_size(bytes: usize) -> String {
    let mut unit = 0;
    let value = bytes as f64;
    while unit + 1 < SIZE_UNITS.len() && value >= SIZE_UNITS[unit + 1].0 {
        unit += 1;
    }
    format!("{:.3} {}", value / SIZE_UNITS[unit].0, SIZE_UNITS[unit].1)
}

/// Returns a human-readable size of the file.
pub fn file_size<P: AsRef<Path>>(filename: P) -> Option<String> {
    let metadata = fs::metadata(filename).ok()?;
    Some(human_readable_size(metadata.len() as usize))
}

/// Returns `true` if the file exists.
pub fn file_exists<P: AsRef<Path>>(filename: P) -> bool {
    fs::metadata(filename).is_ok()
}

/// Returns `true` if the file appears to be gzip-compressed.
pub fn is_gzipped<P: AsRef<Path>>(filename: P) -> bool {
    let file = match File::open(filename) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut reader = BufReader::new(file);
    let mut magic = [0; 2];
    let len = reader.read(&mut magic).ok();
    len == Some(2) && magic == [0x1F, 0x8B]
}

/// Returns a buffered reader for the file, which may be gzip-compressed.
pub fn open_file<P: AsRef<Path>>(filename: P) -> Result<Box<dyn BufRead>> {
    let file = File::open(&filename)?;
    let inner = BufReader::new(file);
    if is_gzipped(&filename) {
        let inner = MultiGzDecoder::new(inner);
        Ok(Box::new(BufReader::new(inner)))
    } else {
        Ok(Box::new(inner))
    }
}

/// Reads a tab-separated table from the file, which may be gzip-compressed.
///
/// Empty lines and lines starting with `#` are skipped.
/// Fields are trimmed, and empty fields are dropped.
pub fn read_table<P: AsRef<Path>>(filename: P) -> Result<Vec<Vec<String>>> {
    let reader = open_file(&filename)?;
    let mut result = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|x| EnsemblError::Parse(
            format!("{} line {}: {}", filename.as_ref().display(), line_num + 1, x)
        ))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<String> = line.split('\t')
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(String::from)
            .collect();
        result.push(fields);
    }
    Ok(result)
}

//-----------------------------------------------------------------------------

/// Installs a stderr logger for the binaries.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` if `verbose` is set and `info` if not.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
