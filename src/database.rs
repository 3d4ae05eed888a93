//! Database connections and database adaptors.
//!
//! A [`DatabaseConnection`] wraps one SQLite database file.
//! A [`DatabaseAdaptor`] binds a connection to a species and a [`DatabaseGroup`].
//! Several adaptors may share a connection through [`Rc`] when a collection database stores multiple species.
//! Database files are named after the Ensembl conventions, which are parsed by [`DatabaseName`].

use crate::{EnsemblError, Result};
use crate::utils;

use std::path::Path;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use rusqlite::{Connection, OpenFlags, OptionalExtension};

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

text_enum! {
    /// Ensembl database groups.
    ///
    /// The text form of each group is the token used in database names.
    pub enum DatabaseGroup {
        /// Core genome annotation.
        Core => "core",
        /// Manually curated annotation.
        Vega => "vega",
        OtherFeatures => "otherfeatures",
        CopyDna => "cdna",
        /// Genetic variation.
        Variation => "variation",
        FunctionalGenomics => "funcgen",
        ComparativeGenomics => "compara",
        Ontology => "ontology",
        /// Quality checks of sequence alignments.
        QualityCheck => "qc",
        Pipeline => "pipeline",
        Hive => "hive",
        CoreExpressionEst => "coreexpressionest",
        CoreExpressionGnf => "coreexpressiongnf",
        Ancestral => "ancestral",
        Website => "website",
        Production => "production",
    }
}

impl DatabaseGroup {
    /// Returns `true` if the group uses the core schema.
    pub fn is_core_style(&self) -> bool {
        matches!(
            self,
            DatabaseGroup::Core | DatabaseGroup::Vega | DatabaseGroup::OtherFeatures |
            DatabaseGroup::CopyDna | DatabaseGroup::CoreExpressionEst | DatabaseGroup::CoreExpressionGnf
        )
    }

    /// Returns `true` if one database of this group covers all species.
    pub fn is_multi_species(&self) -> bool {
        matches!(
            self,
            DatabaseGroup::ComparativeGenomics | DatabaseGroup::Ontology | DatabaseGroup::Ancestral |
            DatabaseGroup::Website | DatabaseGroup::Production
        )
    }
}

//-----------------------------------------------------------------------------

/// A connection to a SQLite database storing one Ensembl database.
///
/// Opening a connection does not check the schema.
/// Use [`crate::schema::create_schema`] to initialize a new database.
#[derive(Debug)]
pub struct DatabaseConnection {
    connection: Connection,
    read_only: bool,
}

impl DatabaseConnection {
    /// Opens a connection to an existing database file.
    ///
    /// # Errors
    ///
    /// Returns [`EnsemblError::NotFound`] if the file does not exist.
    /// Passes through any database errors.
    pub fn open<P: AsRef<Path>>(filename: P, read_only: bool) -> Result<Self> {
        if !utils::file_exists(&filename) {
            return Err(EnsemblError::NotFound(format!("Database {}", filename.as_ref().display())));
        }
        let flags = if read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };
        let connection = Connection::open_with_flags(filename, flags)?;
        Ok(DatabaseConnection { connection, read_only })
    }

    /// Creates a new database file and opens a read-write connection to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists.
    /// Passes through any database errors.
    pub fn create<P: AsRef<Path>>(filename: P) -> Result<Self> {
        if utils::file_exists(&filename) {
            return Err(EnsemblError::InvalidInput(
                format!("Database {} already exists", filename.as_ref().display())
            ));
        }
        let connection = Connection::open(filename)?;
        Ok(DatabaseConnection { connection, read_only: false })
    }

    /// Opens a connection to a new in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(DatabaseConnection { connection, read_only: false })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns the filename of the database, or [`None`] for in-memory databases.
    pub fn filename(&self) -> Option<&str> {
        self.connection.path().filter(|x| !x.is_empty())
    }

    /// Returns the database name, which is the stem of the filename.
    pub fn database_name(&self) -> Option<String> {
        let filename = self.filename()?;
        let stem = Path::new(filename).file_stem()?;
        Some(stem.to_string_lossy().into_owned())
    }

    /// Returns `true` if the connection was opened in read-only mode.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns `true` if the schema of the database can be read.
    pub fn is_available(&self) -> bool {
        let result: rusqlite::Result<i64> = self.connection.query_row("SELECT COUNT(*) FROM sqlite_master", (), |row| row.get(0));
        result.is_ok()
    }

    /// Returns `true` if both connections refer to the same database.
    ///
    /// In-memory databases only match themselves.
    pub fn matches(&self, other: &DatabaseConnection) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.filename(), other.filename()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Returns `(species_id, production name)` pairs from the `meta` table, ordered by species.
    ///
    /// Collection databases store several species, each with its own identifier.
    pub fn production_names(&self) -> Result<Vec<(u32, String)>> {
        let mut statement = self.connection.prepare_cached(
            "SELECT species_id, meta_value FROM meta
            WHERE meta_key = 'species.production_name'
            ORDER BY species_id, meta_id"
        )?;
        let mut result = Vec::new();
        let mut rows = statement.query(())?;
        while let Some(row) = rows.next()? {
            let species_id: u32 = row.get(0)?;
            let name: String = row.get(1)?;
            result.push((species_id, name));
        }
        Ok(result)
    }
}

//-----------------------------------------------------------------------------

/// A parsed Ensembl database name.
///
/// Three forms are recognized:
///
/// * `<species>_<group>_<release>_<assembly>`, where the species name has two or three parts.
/// * `<collection>_collection_<group>_<release>_<assembly>` for collection databases.
/// * `ensembl_<group>_<release>` for groups that cover all species.
///
/// # Examples
///
/// ```
/// use ensembl_base::{DatabaseGroup, DatabaseName};
///
/// let name = DatabaseName::parse("homo_sapiens_variation_70_37").unwrap();
/// assert_eq!(name.species, "homo_sapiens");
/// assert_eq!(name.group, DatabaseGroup::Variation);
/// assert_eq!(name.release, 70);
/// assert_eq!(name.assembly.as_deref(), Some("37"));
/// assert!(!name.collection);
///
/// let name = DatabaseName::parse("ensembl_compara_70").unwrap();
/// assert_eq!(name.species, DatabaseName::MULTI_SPECIES);
/// assert!(DatabaseName::parse("homo_sapiens_unknown_70_37").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseName {
    /// Species name, collection name, or a placeholder for multi-species groups.
    pub species: String,
    pub group: DatabaseGroup,
    /// Software release.
    pub release: u32,
    /// Assembly part of the name, if present.
    pub assembly: Option<String>,
    /// Is this a collection database?
    pub collection: bool,
}

impl DatabaseName {
    /// Species name used for databases that cover all species.
    pub const MULTI_SPECIES: &'static str = "multi";

    /// Species name used for the ancestral sequence database.
    pub const ANCESTRAL_SPECIES: &'static str = "ancestral_sequences";

    fn multi_species_expression() -> &'static Regex {
        static EXPRESSION: OnceLock<Regex> = OnceLock::new();
        EXPRESSION.get_or_init(|| {
            Regex::new(r"^ensembl_([a-z]+)_([0-9]+)$").unwrap()
        })
    }

    fn collection_expression() -> &'static Regex {
        static EXPRESSION: OnceLock<Regex> = OnceLock::new();
        EXPRESSION.get_or_init(|| {
            Regex::new(r"^([a-z0-9]+)_collection_([a-z]+)_([0-9]+)_([0-9]+[a-z]*)$").unwrap()
        })
    }

    fn species_expression() -> &'static Regex {
        static EXPRESSION: OnceLock<Regex> = OnceLock::new();
        EXPRESSION.get_or_init(|| {
            Regex::new(r"^([a-z]+_[a-z0-9]+(?:_[a-z0-9]+)?)_([a-z]+)_([0-9]+)_([0-9]+[a-z]*)$").unwrap()
        })
    }

    /// Parses a database name.
    ///
    /// Returns [`None`] if the name does not follow the conventions or the group is unknown.
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(captures) = Self::multi_species_expression().captures(name) {
            let group: DatabaseGroup = captures[1].parse().ok()?;
            if !group.is_multi_species() {
                return None;
            }
            let species = if group == DatabaseGroup::Ancestral { Self::ANCESTRAL_SPECIES } else { Self::MULTI_SPECIES };
            return Some(DatabaseName {
                species: species.to_string(),
                group,
                release: captures[2].parse().ok()?,
                assembly: None,
                collection: false,
            });
        }

        let (captures, collection) = if let Some(captures) = Self::collection_expression().captures(name) {
            (captures, true)
        } else {
            (Self::species_expression().captures(name)?, false)
        };
        let group: DatabaseGroup = captures[2].parse().ok()?;
        if group.is_multi_species() {
            return None;
        }
        Some(DatabaseName {
            species: captures[1].to_string(),
            group,
            release: captures[3].parse().ok()?,
            assembly: Some(captures[4].to_string()),
            collection,
        })
    }
}

//-----------------------------------------------------------------------------

/// A database adaptor binds a database connection to a species and a database group.
///
/// In a collection database, the adaptor is for one of the species, identified by the `species_id` used in the tables.
/// Entity adaptors such as [`crate::AssemblyAdaptor`] share the database adaptor through [`Rc`].
///
/// # Examples
///
/// ```
/// use ensembl_base::{DatabaseAdaptor, DatabaseConnection, DatabaseGroup, schema};
/// use std::rc::Rc;
///
/// let connection = DatabaseConnection::in_memory().unwrap();
/// schema::create_schema(connection.connection(), DatabaseGroup::Core).unwrap();
/// schema::insert_meta(connection.connection(), None, "schema_version", "70").unwrap();
/// schema::insert_meta(connection.connection(), Some(1), "species.alias", "human").unwrap();
///
/// let dba = DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::Core, false, 1);
/// assert_eq!(dba.schema_version().unwrap(), Some(70));
/// assert_eq!(dba.species_aliases().unwrap(), vec![String::from("human")]);
/// ```
#[derive(Debug)]
pub struct DatabaseAdaptor {
    connection: Rc<DatabaseConnection>,
    species: String,
    group: DatabaseGroup,
    multi_species: bool,
    species_identifier: u32,
}

impl DatabaseAdaptor {
    // Key for the schema version in the meta table.
    const KEY_SCHEMA_VERSION: &'static str = "schema_version";

    // Key for species aliases in the meta table.
    const KEY_SPECIES_ALIAS: &'static str = "species.alias";

    /// Creates a new database adaptor.
    ///
    /// Species identifier `0` is not valid in Ensembl databases and is replaced with `1`.
    pub fn new(connection: Rc<DatabaseConnection>, species: &str, group: DatabaseGroup, multi_species: bool, species_identifier: u32) -> Self {
        let species_identifier = if species_identifier == 0 { 1 } else { species_identifier };
        DatabaseAdaptor {
            connection,
            species: species.to_string(),
            group,
            multi_species,
            species_identifier,
        }
    }

    /// Returns the SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.connection.connection()
    }

    /// Returns the shared database connection.
    pub fn database_connection(&self) -> &Rc<DatabaseConnection> {
        &self.connection
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn group(&self) -> DatabaseGroup {
        self.group
    }

    /// Returns `true` if the database stores multiple species.
    pub fn is_multi_species(&self) -> bool {
        self.multi_species
    }

    /// Returns the `species_id` of this species in the database.
    pub fn species_identifier(&self) -> u32 {
        self.species_identifier
    }

    /// Returns `true` if the adaptors are for the same species and group in the same database.
    pub fn matches(&self, other: &DatabaseAdaptor) -> bool {
        self.connection.matches(&other.connection) &&
            self.species == other.species &&
            self.group == other.group &&
            self.multi_species == other.multi_species &&
            self.species_identifier == other.species_identifier
    }

    /// Returns all values for the meta key that apply to this species, in insertion order.
    ///
    /// Values without a species identifier apply to all species.
    pub fn meta_values(&self, key: &str) -> Result<Vec<String>> {
        let mut statement = self.connection().prepare_cached(
            "SELECT meta_value FROM meta
            WHERE meta_key = ?1 AND (species_id = ?2 OR species_id IS NULL)
            ORDER BY meta_id"
        )?;
        let mut result = Vec::new();
        let mut rows = statement.query((key, self.species_identifier))?;
        while let Some(row) = rows.next()? {
            result.push(row.get(0)?);
        }
        Ok(result)
    }

    /// Returns the first value for the meta key, or [`None`] if there is no such key.
    pub fn meta_value(&self, key: &str) -> Result<Option<String>> {
        let mut statement = self.connection().prepare_cached(
            "SELECT meta_value FROM meta
            WHERE meta_key = ?1 AND (species_id = ?2 OR species_id IS NULL)
            ORDER BY meta_id
            LIMIT 1"
        )?;
        let value = statement.query_row((key, self.species_identifier), |row| row.get(0)).optional()?;
        Ok(value)
    }

    /// Returns the schema version stored in the meta table.
    pub fn schema_version(&self) -> Result<Option<u32>> {
        match self.meta_value(Self::KEY_SCHEMA_VERSION)? {
            Some(value) => {
                let version = value.parse::<u32>().map_err(|x| EnsemblError::Parse(
                    format!("Invalid schema version {}: {}", value, x)
                ))?;
                Ok(Some(version))
            },
            None => Ok(None),
        }
    }

    /// Returns the species aliases stored in the meta table.
    pub fn species_aliases(&self) -> Result<Vec<String>> {
        self.meta_values(Self::KEY_SPECIES_ALIAS)
    }
}

//-----------------------------------------------------------------------------
