use std::path::PathBuf;
use std::time::Instant;
use std::{env, fs, process};

use ensembl_base::{DatabaseConnection, DatabaseName, schema, utils};
use getopts::Options;
use tracing::{info, warn};

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    // Parse arguments.
    let config = Config::new();
    utils::init_logging(config.verbose);

    // Check if the database already exists.
    if utils::file_exists(&config.db_file) {
        if config.overwrite {
            warn!("Overwriting database {}", config.db_file.display());
            fs::remove_file(&config.db_file).map_err(|x| x.to_string())?;
        } else {
            return Err(format!("Database {} already exists", config.db_file.display()));
        }
    }

    // Create the database.
    let connection = DatabaseConnection::create(&config.db_file).map_err(|x| x.to_string())?;
    let sql = connection.connection();
    schema::create_schema(sql, config.name.group).map_err(|x| x.to_string())?;
    schema::insert_meta(sql, None, "schema_version", &config.name.release.to_string()).map_err(|x| x.to_string())?;
    schema::insert_meta(sql, None, "schema_type", config.name.group.as_str()).map_err(|x| x.to_string())?;
    for (index, species) in config.species.iter().enumerate() {
        let species_id = index as u32 + 1;
        schema::insert_meta(sql, Some(species_id), "species.production_name", species).map_err(|x| x.to_string())?;
        if index == 0 {
            for alias in config.aliases.iter() {
                schema::insert_meta(sql, Some(species_id), "species.alias", alias).map_err(|x| x.to_string())?;
            }
        }
    }
    drop(connection);

    // Statistics.
    info!(
        "Created {} database {} for {} species ({})",
        config.name.group, config.db_file.display(), config.species.len(),
        utils::file_size(&config.db_file).unwrap_or(String::from("unknown size"))
    );

    let end_time = Instant::now();
    let seconds = end_time.duration_since(start_time).as_secs_f64();
    info!("Used {:.3} seconds", seconds);

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    pub name: DatabaseName,
    pub db_file: PathBuf,
    pub species: Vec<String>,
    pub aliases: Vec<String>,
    pub overwrite: bool,
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("d", "directory", "create the database in this directory (default: .)", "DIR");
        opts.optmulti("s", "species", "production name of a species in a collection database (may repeat)", "NAME");
        opts.optmulti("a", "alias", "alias for the first species (may repeat)", "ALIAS");
        opts.optflag("", "overwrite", "overwrite the database file if it exists");
        opts.optflag("v", "verbose", "print debug information");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        let header = format!("Usage: {} [options] database_name", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        let db_name = if let Some(s) = matches.free.first() {
            s.clone()
        } else {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        };
        let name = match DatabaseName::parse(&db_name) {
            Some(name) => name,
            None => {
                eprintln!("Invalid Ensembl database name: {}", db_name);
                process::exit(1);
            }
        };

        let mut db_file = PathBuf::from(matches.opt_str("d").unwrap_or(String::from(".")));
        db_file.push(format!("{}.db", db_name));

        // Collection databases list their species explicitly, while other databases are named after the species.
        let mut species = matches.opt_strs("s");
        if name.collection {
            if species.is_empty() {
                eprintln!("Collection database {} requires at least one species", db_name);
                process::exit(1);
            }
        } else if species.is_empty() && !name.group.is_multi_species() {
            species.push(name.species.clone());
        }

        Config {
            name,
            db_file,
            species,
            aliases: matches.opt_strs("a"),
            overwrite: matches.opt_present("overwrite"),
            verbose: matches.opt_present("v"),
        }
    }
}

//-----------------------------------------------------------------------------
