use std::time::Instant;
use std::{env, process};

use ensembl_base::{Registry, RegistryParams, utils};
use getopts::Options;
use tracing::info;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    // Parse arguments.
    let config = Config::new();
    utils::init_logging(config.verbose);

    // Build the registry.
    let mut registry = Registry::new();
    if let Some(filename) = config.aliases.as_ref() {
        let count = registry.load_aliases(filename).map_err(|x| x.to_string())?;
        info!("Loaded {} aliases from {}", count, filename);
    }
    if let Some(filename) = config.identifiers.as_ref() {
        let count = registry.load_identifiers(filename).map_err(|x| x.to_string())?;
        info!("Loaded {} identifier expressions from {}", count, filename);
    }
    registry.load_directory(&config.directory, &config.params).map_err(|x| x.to_string())?;
    registry.trace();

    // Lookups or a listing of all databases.
    if config.lookups.is_empty() && config.stable_ids.is_empty() {
        println!("species\tgroup\tdatabase\tspecies_id\tschema_version");
        for dba in registry.get_all_database_adaptors(None, None) {
            let database = dba.database_connection().database_name().unwrap_or(String::from("-"));
            let version = match dba.schema_version().map_err(|x| x.to_string())? {
                Some(version) => version.to_string(),
                None => String::from("-"),
            };
            println!("{}\t{}\t{}\t{}\t{}", dba.species(), dba.group(), database, dba.species_identifier(), version);
        }
    }
    for alias in config.lookups.iter() {
        match registry.get_species(alias) {
            Some(species) => {
                let groups: Vec<String> = registry.get_all_database_adaptors(None, Some(alias.as_str()))
                    .iter().map(|x| x.group().to_string()).collect();
                println!("{}\t{}\t{}", alias, species, groups.join(","));
            },
            None => println!("{}\t-\t-", alias),
        }
    }
    for stable_id in config.stable_ids.iter() {
        match registry.get_species_and_group(stable_id) {
            Some((species, group)) => {
                let found = registry.get_database_adaptor(group, species).is_some();
                println!("{}\t{}\t{}\t{}", stable_id, species, group, if found { "loaded" } else { "missing" });
            },
            None => println!("{}\t-\t-\t-", stable_id),
        }
    }

    let end_time = Instant::now();
    let seconds = end_time.duration_since(start_time).as_secs_f64();
    info!("Used {:.3} seconds", seconds);

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    pub directory: String,
    pub params: RegistryParams,
    pub aliases: Option<String>,
    pub identifiers: Option<String>,
    pub lookups: Vec<String>,
    pub stable_ids: Vec<String>,
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("a", "aliases", "load species aliases from a tab-separated file", "FILE");
        opts.optopt("i", "identifiers", "load stable identifier expressions from a tab-separated file", "FILE");
        opts.optopt("r", "release", "only load databases from this release (default: latest)", "INT");
        opts.optflag("", "no-meta-aliases", "do not load species aliases from core databases");
        opts.optmulti("s", "species", "look up a species alias (may repeat)", "ALIAS");
        opts.optmulti("I", "stable-id", "look up the species and group of a stable identifier (may repeat)", "ID");
        opts.optflag("v", "verbose", "print debug information");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        let header = format!("Usage: {} [options] directory", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        let mut params = RegistryParams::default();
        if let Some(s) = matches.opt_str("r") {
            match s.parse::<u32>() {
                Ok(release) => params.release = Some(release),
                Err(f) => {
                    eprintln!("--release: {}", f);
                    process::exit(1);
                }
            }
        }
        params.meta_aliases = !matches.opt_present("no-meta-aliases");

        let directory = if let Some(s) = matches.free.first() {
            s.clone()
        } else {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        };

        Config {
            directory,
            params,
            aliases: matches.opt_str("a"),
            identifiers: matches.opt_str("i"),
            lookups: matches.opt_strs("s"),
            stable_ids: matches.opt_strs("I"),
            verbose: matches.opt_present("v"),
        }
    }
}

//-----------------------------------------------------------------------------
