//! Registry of database adaptors and entity adaptors by species and database group.
//!
//! The registry maps species aliases to species names, stable identifiers to species and groups,
//! and (species, group) pairs to [`DatabaseAdaptor`]s.
//! Entity adaptors are constructed on first request and cached in the registry, so each database adaptor has at most one adaptor of each type.
//! Which entity adaptors are available depends on the database group.
//!
//! Databases are usually registered by scanning a directory of SQLite files named after the Ensembl conventions.
//! See [`Registry::load_directory`] and [`DatabaseName`].

use crate::{AssemblyAdaptor, DatabaseAdaptor, DatabaseConnection, DatabaseGroup, DatabaseName, Result};
use crate::{EnsemblError, utils};
use crate::qc::{DasFeatureAdaptor, SequenceAdaptor, SubmissionAdaptor, VariationAdaptor};
use crate::variation::{AlleleAdaptor, GenotypeAdaptor, GenotypeCodeAdaptor, PopulationAdaptor};

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use regex::Regex;
use tracing::{debug, info, warn};


//-----------------------------------------------------------------------------

/// Parameters for loading databases into a [`Registry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryParams {
    /// Only load databases from this software release.
    ///
    /// If not set, the highest release of each (species, group) pair is loaded.
    pub release: Option<u32>,
    /// Open the databases in read-only mode.
    pub read_only: bool,
    /// Add the `species.alias` values from core-style databases as aliases.
    pub meta_aliases: bool,
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self {
            release: None,
            read_only: true,
            meta_aliases: true,
        }
    }
}

//-----------------------------------------------------------------------------

// Returns the cached adaptor, creating it first if necessary.
fn cached<T, F: FnOnce() -> T>(cell: &OnceCell<Rc<T>>, create: F) -> Rc<T> {
    Rc::clone(cell.get_or_init(|| Rc::new(create())))
}

#[derive(Debug)]
struct CoreStyleEntry {
    database_adaptor: Rc<DatabaseAdaptor>,
    reference_adaptor: Option<Rc<DatabaseAdaptor>>,
    assembly: OnceCell<Rc<AssemblyAdaptor>>,
}

#[derive(Debug)]
struct VariationEntry {
    database_adaptor: Rc<DatabaseAdaptor>,
    populations: OnceCell<Rc<PopulationAdaptor>>,
    alleles: OnceCell<Rc<AlleleAdaptor>>,
    genotype_codes: OnceCell<Rc<GenotypeCodeAdaptor>>,
    genotypes: OnceCell<Rc<GenotypeAdaptor>>,
}

#[derive(Debug)]
struct QualityCheckEntry {
    database_adaptor: Rc<DatabaseAdaptor>,
    sequences: OnceCell<Rc<SequenceAdaptor>>,
    das_features: OnceCell<Rc<DasFeatureAdaptor>>,
    variations: OnceCell<Rc<VariationAdaptor>>,
    submissions: OnceCell<Rc<SubmissionAdaptor>>,
}

// Registry entry for one (species, group) pair.
#[derive(Debug)]
enum GroupEntry {
    CoreStyle(CoreStyleEntry),
    Variation(VariationEntry),
    QualityCheck(QualityCheckEntry),
    // Groups without entity adaptors in this crate.
    Generic(Rc<DatabaseAdaptor>),
}

impl GroupEntry {
    fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        let group = database_adaptor.group();
        if group.is_core_style() {
            GroupEntry::CoreStyle(CoreStyleEntry {
                database_adaptor,
                reference_adaptor: None,
                assembly: OnceCell::new(),
            })
        } else if group == DatabaseGroup::Variation {
            GroupEntry::Variation(VariationEntry {
                database_adaptor,
                populations: OnceCell::new(),
                alleles: OnceCell::new(),
                genotype_codes: OnceCell::new(),
                genotypes: OnceCell::new(),
            })
        } else if group == DatabaseGroup::QualityCheck {
            GroupEntry::QualityCheck(QualityCheckEntry {
                database_adaptor,
                sequences: OnceCell::new(),
                das_features: OnceCell::new(),
                variations: OnceCell::new(),
                submissions: OnceCell::new(),
            })
        } else {
            GroupEntry::Generic(database_adaptor)
        }
    }

    fn database_adaptor(&self) -> &Rc<DatabaseAdaptor> {
        match self {
            GroupEntry::CoreStyle(entry) => &entry.database_adaptor,
            GroupEntry::Variation(entry) => &entry.database_adaptor,
            GroupEntry::QualityCheck(entry) => &entry.database_adaptor,
            GroupEntry::Generic(database_adaptor) => database_adaptor,
        }
    }

    fn core_style(&self, adaptor: &str) -> Option<&CoreStyleEntry> {
        match self {
            GroupEntry::CoreStyle(entry) => Some(entry),
            _ => {
                unsupported(adaptor, self.database_adaptor());
                None
            },
        }
    }

    fn variation(&self, adaptor: &str) -> Option<&VariationEntry> {
        match self {
            GroupEntry::Variation(entry) => Some(entry),
            _ => {
                unsupported(adaptor, self.database_adaptor());
                None
            },
        }
    }

    fn quality_check(&self, adaptor: &str) -> Option<&QualityCheckEntry> {
        match self {
            GroupEntry::QualityCheck(entry) => Some(entry),
            _ => {
                unsupported(adaptor, self.database_adaptor());
                None
            },
        }
    }
}

fn unsupported(adaptor: &str, database_adaptor: &DatabaseAdaptor) {
    warn!(
        "Database group {} does not support {} adaptors (species {})",
        database_adaptor.group(), adaptor, database_adaptor.species()
    );
}

// An expression matching stable identifiers of a species and a group.
#[derive(Debug)]
struct IdentifierExpression {
    expression: Regex,
    species: String,
    group: DatabaseGroup,
}

//-----------------------------------------------------------------------------

/// A registry of database adaptors and entity adaptors.
///
/// # Examples
///
/// ```
/// use ensembl_base::{DatabaseAdaptor, DatabaseConnection, DatabaseGroup, Registry, schema};
/// use std::rc::Rc;
///
/// let connection = DatabaseConnection::in_memory().unwrap();
/// schema::create_schema(connection.connection(), DatabaseGroup::Variation).unwrap();
/// let dba = DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::Variation, false, 1);
///
/// let mut registry = Registry::new();
/// let dba = registry.add_database_adaptor(dba).unwrap();
/// assert!(registry.add_alias("homo_sapiens", "Human"));
/// assert_eq!(registry.get_species("human"), Some("homo_sapiens"));
///
/// // The same adaptor is returned for every request.
/// let alleles = registry.allele_adaptor(&dba).unwrap();
/// assert!(Rc::ptr_eq(&alleles, &registry.allele_adaptor(&dba).unwrap()));
///
/// // Variation databases do not have assembly adaptors.
/// assert!(registry.assembly_adaptor(&dba).is_none());
///
/// // Clearing the registry releases the adaptors.
/// drop(alleles);
/// registry.clear();
/// assert_eq!(Rc::strong_count(&dba), 1);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    // Lowercase alias -> species name.
    aliases: HashMap<String, String>,
    // Species -> group -> entry.
    entries: BTreeMap<String, BTreeMap<DatabaseGroup, GroupEntry>>,
    identifiers: Vec<IdentifierExpression>,
}

/// Aliases and stable identifiers.
impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias for the species.
    ///
    /// Aliases are case-insensitive.
    /// Returns `false` if the alias already refers to another species.
    pub fn add_alias(&mut self, species: &str, alias: &str) -> bool {
        let key = alias.to_lowercase();
        match self.aliases.get(&key) {
            Some(existing) if existing != species => {
                warn!("Alias {} already refers to species {}, not {}", alias, existing, species);
                false
            },
            Some(_) => true,
            None => {
                self.aliases.insert(key, species.to_string());
                true
            },
        }
    }

    /// Removes the alias and returns `true` if it existed.
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.aliases.remove(&alias.to_lowercase()).is_some()
    }

    /// Returns the species name for the alias, or [`None`] if the alias is unknown.
    pub fn get_species(&self, alias: &str) -> Option<&str> {
        self.aliases.get(&alias.to_lowercase()).map(String::as_str)
    }

    /// Returns all aliases of the species in sorted order.
    pub fn aliases_for(&self, species: &str) -> Vec<&str> {
        let mut result: Vec<&str> = self.aliases.iter()
            .filter(|(_, value)| value.as_str() == species)
            .map(|(key, _)| key.as_str())
            .collect();
        result.sort_unstable();
        result
    }

    /// Loads aliases from a tab-separated file.
    ///
    /// Each line contains a species name followed by its aliases.
    /// The species name also becomes an alias of itself.
    /// Returns the number of aliases that were added or already present.
    pub fn load_aliases<P: AsRef<Path>>(&mut self, filename: P) -> Result<usize> {
        let mut added = 0;
        for fields in utils::read_table(&filename)? {
            let species = &fields[0];
            for alias in fields.iter() {
                if self.add_alias(species, alias) {
                    added += 1;
                }
            }
        }
        debug!("Loaded {} aliases from {}", added, filename.as_ref().display());
        Ok(added)
    }

    /// Adds a regular expression matching the stable identifiers of the species and the group.
    ///
    /// The species may be an alias.
    /// Passes through errors from compiling the expression.
    pub fn add_identifier(&mut self, expression: &str, species: &str, group: DatabaseGroup) -> Result<()> {
        let expression = Regex::new(expression)?;
        self.identifiers.push(IdentifierExpression {
            expression,
            species: species.to_string(),
            group,
        });
        Ok(())
    }

    /// Loads identifier expressions from a tab-separated file.
    ///
    /// Each line contains an expression, a species, and a group.
    /// Returns the number of expressions.
    pub fn load_identifiers<P: AsRef<Path>>(&mut self, filename: P) -> Result<usize> {
        let mut added = 0;
        for fields in utils::read_table(&filename)? {
            if fields.len() != 3 {
                return Err(EnsemblError::Parse(format!(
                    "Expected expression, species, and group in {}: {}",
                    filename.as_ref().display(), fields.join(" ")
                )));
            }
            let group: DatabaseGroup = fields[2].parse()?;
            self.add_identifier(&fields[0], &fields[1], group)?;
            added += 1;
        }
        debug!("Loaded {} identifier expressions from {}", added, filename.as_ref().display());
        Ok(added)
    }

    /// Returns the species and the group for a stable identifier, or [`None`] if no expression matches.
    ///
    /// Expressions are tried in the order they were added.
    pub fn get_species_and_group(&self, identifier: &str) -> Option<(&str, DatabaseGroup)> {
        let matching = self.identifiers.iter().find(|x| x.expression.is_match(identifier));
        match matching {
            Some(matching) => {
                let species = self.get_species(&matching.species).unwrap_or(&matching.species);
                Some((species, matching.group))
            },
            None => {
                debug!("No identifier expression matches {}", identifier);
                None
            },
        }
    }
}

//-----------------------------------------------------------------------------

/// Database adaptors.
impl Registry {
    /// Adds a database adaptor and returns the shared adaptor.
    ///
    /// The species name becomes an alias of itself.
    /// Returns [`None`] if there is already an adaptor for the same species and group.
    pub fn add_database_adaptor(&mut self, database_adaptor: DatabaseAdaptor) -> Option<Rc<DatabaseAdaptor>> {
        let species = database_adaptor.species().to_string();
        let group = database_adaptor.group();
        let groups = self.entries.entry(species.clone()).or_default();
        if groups.contains_key(&group) {
            debug!("Species {} already has a {} database adaptor", species, group);
            return None;
        }
        let database_adaptor = Rc::new(database_adaptor);
        groups.insert(group, GroupEntry::new(Rc::clone(&database_adaptor)));
        self.add_alias(&species, &species);
        Some(database_adaptor)
    }

    /// Returns the database adaptor for the species alias and the group.
    pub fn get_database_adaptor(&self, group: DatabaseGroup, alias: &str) -> Option<Rc<DatabaseAdaptor>> {
        let species = self.get_species(alias)?;
        let entry = self.entries.get(species)?.get(&group)?;
        Some(Rc::clone(entry.database_adaptor()))
    }

    /// Returns all database adaptors, optionally restricted to a group and a species alias.
    ///
    /// The adaptors are sorted by species and group.
    pub fn get_all_database_adaptors(&self, group: Option<DatabaseGroup>, alias: Option<&str>) -> Vec<Rc<DatabaseAdaptor>> {
        let species = match alias {
            Some(alias) => match self.get_species(alias) {
                Some(species) => Some(species),
                None => return Vec::new(),
            },
            None => None,
        };
        let mut result = Vec::new();
        for (name, groups) in self.entries.iter() {
            if species.is_some_and(|x| x != name.as_str()) {
                continue;
            }
            for (entry_group, entry) in groups.iter() {
                if group.map_or(true, |x| x == *entry_group) {
                    result.push(Rc::clone(entry.database_adaptor()));
                }
            }
        }
        result
    }

    /// Removes the database adaptor for the species alias and the group, along with its entity adaptors.
    ///
    /// Returns `false` if there was no such adaptor.
    pub fn remove_database_adaptor(&mut self, group: DatabaseGroup, alias: &str) -> bool {
        let species = match self.get_species(alias) {
            Some(species) => species.to_string(),
            None => return false,
        };
        let groups = match self.entries.get_mut(&species) {
            Some(groups) => groups,
            None => return false,
        };
        let removed = groups.remove(&group).is_some();
        if groups.is_empty() {
            self.entries.remove(&species);
        }
        removed
    }

    /// Returns the names of all species with database adaptors in sorted order.
    pub fn all_species(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered database adaptors.
    pub fn len(&self) -> usize {
        self.entries.values().map(|groups| groups.len()).sum()
    }

    /// Returns `true` if there are no registered database adaptors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Returns the entry for the database adaptor.
    // The registered adaptor must match the given one, not just its species and group.
    fn entry(&self, database_adaptor: &DatabaseAdaptor) -> Option<&GroupEntry> {
        let entry = self.entries.get(database_adaptor.species()).and_then(|x| x.get(&database_adaptor.group()));
        match entry {
            Some(entry) if entry.database_adaptor().matches(database_adaptor) => Some(entry),
            Some(_) => {
                debug!(
                    "The registered {} database adaptor for species {} is for another database",
                    database_adaptor.group(), database_adaptor.species()
                );
                None
            },
            None => {
                debug!(
                    "No {} database adaptor for species {} in the registry",
                    database_adaptor.group(), database_adaptor.species()
                );
                None
            },
        }
    }

    /// Sets the reference adaptor for a core-style database adaptor.
    ///
    /// The reference database provides the sequences and the assembly for databases such as `otherfeatures`.
    /// Returns `false` if the adaptor is not in the registry or is not core-style.
    /// An adaptor for another database with the same species and group is not in the registry.
    pub fn add_reference_adaptor(&mut self, database_adaptor: &DatabaseAdaptor, reference: Rc<DatabaseAdaptor>) -> bool {
        if self.entry(database_adaptor).is_none() {
            return false;
        }
        let entry = self.entries.get_mut(database_adaptor.species()).and_then(|x| x.get_mut(&database_adaptor.group()));
        match entry {
            Some(GroupEntry::CoreStyle(entry)) => {
                entry.reference_adaptor = Some(reference);
                true
            },
            Some(entry) => {
                unsupported("reference", entry.database_adaptor());
                false
            },
            None => false,
        }
    }

    /// Returns the reference adaptor for a core-style database adaptor.
    ///
    /// If no reference has been set, the database is its own reference.
    /// Returns [`None`] if the adaptor is not in the registry or is not core-style.
    pub fn get_reference_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<DatabaseAdaptor>> {
        let entry = self.entry(database_adaptor)?.core_style("reference")?;
        let reference = entry.reference_adaptor.as_ref().unwrap_or(&entry.database_adaptor);
        Some(Rc::clone(reference))
    }
}

//-----------------------------------------------------------------------------

/// Entity adaptors.
///
/// Each method returns [`None`] unless the database adaptor [matches](DatabaseAdaptor::matches) the registered adaptor for its species and group.
impl Registry {
    /// Returns the assembly adaptor for a core-style database.
    pub fn assembly_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<AssemblyAdaptor>> {
        let entry = self.entry(database_adaptor)?.core_style("assembly")?;
        Some(cached(&entry.assembly, || AssemblyAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the population adaptor for a variation database.
    pub fn population_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<PopulationAdaptor>> {
        let entry = self.entry(database_adaptor)?.variation("population")?;
        Some(cached(&entry.populations, || PopulationAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the allele adaptor for a variation database.
    pub fn allele_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<AlleleAdaptor>> {
        let entry = self.entry(database_adaptor)?.variation("allele")?;
        Some(cached(&entry.alleles, || AlleleAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the genotype code adaptor for a variation database.
    pub fn genotype_code_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<GenotypeCodeAdaptor>> {
        let entry = self.entry(database_adaptor)?.variation("genotype code")?;
        Some(cached(&entry.genotype_codes, || GenotypeCodeAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the population genotype adaptor for a variation database.
    pub fn genotype_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<GenotypeAdaptor>> {
        let entry = self.entry(database_adaptor)?.variation("genotype")?;
        Some(cached(&entry.genotypes, || GenotypeAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the sequence adaptor for a quality-check database.
    pub fn sequence_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<SequenceAdaptor>> {
        let entry = self.entry(database_adaptor)?.quality_check("sequence")?;
        Some(cached(&entry.sequences, || SequenceAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the DAS feature adaptor for a quality-check database.
    pub fn das_feature_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<DasFeatureAdaptor>> {
        let entry = self.entry(database_adaptor)?.quality_check("DAS feature")?;
        Some(cached(&entry.das_features, || DasFeatureAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the variation adaptor for a quality-check database.
    pub fn variation_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<VariationAdaptor>> {
        let entry = self.entry(database_adaptor)?.quality_check("quality-check variation")?;
        Some(cached(&entry.variations, || VariationAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }

    /// Returns the submission adaptor for a quality-check database.
    pub fn submission_adaptor(&self, database_adaptor: &DatabaseAdaptor) -> Option<Rc<SubmissionAdaptor>> {
        let entry = self.entry(database_adaptor)?.quality_check("submission")?;
        Some(cached(&entry.submissions, || SubmissionAdaptor::new(Rc::clone(&entry.database_adaptor))))
    }
}

//-----------------------------------------------------------------------------

/// Loading and clearing.
impl Registry {
    /// File extensions of SQLite databases.
    pub const DATABASE_EXTENSIONS: [&'static str; 3] = ["db", "sqlite", "sqlite3"];

    /// Registers all databases in the directory.
    ///
    /// Files with a known extension and a stem that parses as a [`DatabaseName`] are opened.
    /// If there are multiple databases for the same species and group, the highest release wins.
    /// Collection databases register one adaptor for each `species.production_name` in table `meta`.
    ///
    /// Databases that cannot be opened or read are logged and skipped.
    ///
    /// Returns the number of database adaptors that were added.
    /// Passes through errors from reading the directory.
    pub fn load_directory<P: AsRef<Path>>(&mut self, directory: P, params: &RegistryParams) -> Result<usize> {
        let directory = directory.as_ref();
        let mut candidates: Vec<(DatabaseName, PathBuf)> = Vec::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let extension = path.extension().and_then(|x| x.to_str()).unwrap_or_default();
            if !Self::DATABASE_EXTENSIONS.contains(&extension) {
                continue;
            }
            let stem = path.file_stem().and_then(|x| x.to_str()).unwrap_or_default();
            match DatabaseName::parse(stem) {
                Some(name) => {
                    if params.release.map_or(true, |x| x == name.release) {
                        candidates.push((name, path));
                    } else {
                        debug!("Skipping {} from release {}", path.display(), name.release);
                    }
                },
                None => debug!("Skipping {}: not an Ensembl database name", path.display()),
            }
        }
        candidates.sort_by(|a, b| b.0.release.cmp(&a.0.release).then_with(|| a.1.cmp(&b.1)));

        let mut added = 0;
        for (name, path) in candidates {
            let connection = match DatabaseConnection::open(&path, params.read_only) {
                Ok(connection) => Rc::new(connection),
                Err(err) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    continue;
                },
            };
            if !connection.is_available() {
                warn!("Skipping {}: not a readable SQLite database", path.display());
                continue;
            }
            if name.collection {
                let species = match connection.production_names() {
                    Ok(species) => species,
                    Err(err) => {
                        warn!("Skipping collection database {}: {}", path.display(), err);
                        continue;
                    },
                };
                if species.is_empty() {
                    warn!("Collection database {} does not list any species", path.display());
                }
                for (species_id, species_name) in species {
                    let dba = DatabaseAdaptor::new(Rc::clone(&connection), &species_name, name.group, true, species_id);
                    if self.register_loaded(dba, params) {
                        added += 1;
                    }
                }
            } else {
                let dba = DatabaseAdaptor::new(connection, &name.species, name.group, false, 1);
                if self.register_loaded(dba, params) {
                    added += 1;
                }
            }
        }

        info!("Registered {} database adaptors from {}", added, directory.display());
        Ok(added)
    }

    // Adds a loaded database adaptor and its meta aliases.
    fn register_loaded(&mut self, database_adaptor: DatabaseAdaptor, params: &RegistryParams) -> bool {
        let database_adaptor = match self.add_database_adaptor(database_adaptor) {
            Some(database_adaptor) => database_adaptor,
            None => return false,
        };
        if params.meta_aliases && database_adaptor.group().is_core_style() {
            match database_adaptor.species_aliases() {
                Ok(aliases) => {
                    for alias in aliases.iter() {
                        self.add_alias(database_adaptor.species(), alias);
                    }
                },
                Err(err) => warn!("Cannot read aliases for species {}: {}", database_adaptor.species(), err),
            }
        }
        true
    }

    /// Removes all adaptors, aliases, and identifier expressions.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.aliases.clear();
        self.identifiers.clear();
    }

    /// Logs the contents of the registry at debug level.
    pub fn trace(&self) {
        debug!(
            "Registry: {} species, {} database adaptors, {} aliases, {} identifier expressions",
            self.entries.len(), self.len(), self.aliases.len(), self.identifiers.len()
        );
        for (species, groups) in self.entries.iter() {
            for (group, entry) in groups.iter() {
                let dba = entry.database_adaptor();
                debug!(
                    "  {} {}: {} (species id {}{})",
                    species, group,
                    dba.database_connection().filename().unwrap_or("in-memory"),
                    dba.species_identifier(),
                    if dba.is_multi_species() { ", multi-species" } else { "" }
                );
            }
            debug!("  {} aliases: {}", species, self.aliases_for(species).join(", "));
        }
        for identifier in self.identifiers.iter() {
            debug!("  {} -> {} {}", identifier.expression, identifier.species, identifier.group);
        }
    }
}

//-----------------------------------------------------------------------------
