use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{check_not_stored, row_identifier, stored_identifier};

use std::rc::Rc;

use rusqlite::{params, Row};
use tracing::debug;

//-----------------------------------------------------------------------------

/// A query or target sequence in a quality-check database.
///
/// # Examples
///
/// ```
/// use ensembl_base::qc::Sequence;
///
/// let mut sequence = Sequence::new(1, "BC012345", "BC012345", Some(2), 2180);
/// assert_eq!(sequence.accession_version(), "BC012345.2");
/// assert!(!sequence.has_cds());
/// sequence.cds_start = 101;
/// sequence.cds_end = 1600;
/// sequence.cds_strand = 1;
/// assert!(sequence.has_cds());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    /// Identifier assigned when the sequence is stored.
    pub identifier: Option<u32>,
    /// Identifier of the sequence database (e.g. a release of RefSeq or UniProt).
    pub database_identifier: u32,
    pub name: String,
    pub accession: String,
    pub version: Option<u32>,
    /// Sequence type, such as `mRNA` or `protein`.
    pub kind: Option<String>,
    pub length: u32,
    /// Start of the coding sequence, or `0` if there is none.
    pub cds_start: u32,
    pub cds_end: u32,
    pub cds_strand: i8,
    pub polya_length: u32,
    pub description: Option<String>,
}

impl Sequence {
    /// Creates a new sequence without CDS or poly-A information.
    pub fn new(database_identifier: u32, name: &str, accession: &str, version: Option<u32>, length: u32) -> Self {
        Sequence {
            identifier: None,
            database_identifier,
            name: name.to_string(),
            accession: accession.to_string(),
            version,
            kind: None,
            length,
            cds_start: 0,
            cds_end: 0,
            cds_strand: 0,
            polya_length: 0,
            description: None,
        }
    }

    /// Returns the accession with the version appended as `accession.version`.
    pub fn accession_version(&self) -> String {
        match self.version {
            Some(version) => format!("{}.{}", self.accession, version),
            None => self.accession.clone(),
        }
    }

    /// Returns `true` if the sequence has a coding region.
    pub fn has_cds(&self) -> bool {
        self.cds_start > 0 && self.cds_start <= self.cds_end
    }
}

//-----------------------------------------------------------------------------

/// Adaptor for table `sequence`.
#[derive(Debug)]
pub struct SequenceAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl SequenceAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        SequenceAdaptor { database_adaptor }
    }

    /// Returns the sequence with the accession in the sequence database.
    ///
    /// If no version is given, returns the highest version.
    /// Returns [`None`] if there is no such sequence.
    pub fn fetch_by_accession(&self, database_id: u32, accession: &str, version: Option<u32>) -> Result<Option<Sequence>> {
        let sequences = self.fetch_all_by_constraint(
            Some("sequence.sequence_db_id = ?1 AND sequence.accession = ?2 AND (?3 IS NULL OR sequence.version = ?3)"),
            (database_id, accession, version)
        )?;
        Ok(sequences.into_iter().max_by_key(|x| x.version))
    }

    /// Returns the sequence with the name in the sequence database, or [`None`] if there is no such sequence.
    pub fn fetch_by_name(&self, database_id: u32, name: &str) -> Result<Option<Sequence>> {
        let mut sequences = self.fetch_all_by_constraint(
            Some("sequence.sequence_db_id = ?1 AND sequence.name = ?2"),
            (database_id, name)
        )?;
        if sequences.is_empty() {
            Ok(None)
        } else {
            Ok(Some(sequences.swap_remove(0)))
        }
    }

    /// Returns all sequences in the sequence database.
    pub fn fetch_all_by_database(&self, database_id: u32) -> Result<Vec<Sequence>> {
        self.fetch_all_by_constraint(Some("sequence.sequence_db_id = ?1"), (database_id,))
    }

    /// Stores the sequence and assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence has already been stored.
    /// Passes through any database errors.
    pub fn store(&self, sequence: &mut Sequence) -> Result<()> {
        check_not_stored(sequence.identifier, "sequence")?;
        let mut insert = self.database_adaptor.connection().prepare_cached(
            "INSERT INTO sequence(
                sequence_db_id, name, accession, version, type, length,
                cds_start, cds_end, cds_strand, polya_length, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        )?;
        insert.execute(params![
            sequence.database_identifier, sequence.name, sequence.accession, sequence.version,
            sequence.kind, sequence.length,
            sequence.cds_start, sequence.cds_end, sequence.cds_strand,
            sequence.polya_length, sequence.description,
        ])?;
        let identifier = row_identifier(self.database_adaptor.connection().last_insert_rowid())?;
        debug!("Stored sequence {} as {}", sequence.accession_version(), identifier);
        sequence.identifier = Some(identifier);
        Ok(())
    }

    /// Updates the stored sequence.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn update(&self, sequence: &Sequence) -> Result<bool> {
        let identifier = stored_identifier(sequence.identifier, "sequence")?;
        let mut update = self.database_adaptor.connection().prepare_cached(
            "UPDATE sequence SET
                sequence_db_id = ?1, name = ?2, accession = ?3, version = ?4, type = ?5, length = ?6,
                cds_start = ?7, cds_end = ?8, cds_strand = ?9, polya_length = ?10, description = ?11
            WHERE sequence_id = ?12"
        )?;
        let updated = update.execute(params![
            sequence.database_identifier, sequence.name, sequence.accession, sequence.version,
            sequence.kind, sequence.length,
            sequence.cds_start, sequence.cds_end, sequence.cds_strand,
            sequence.polya_length, sequence.description,
            identifier,
        ])?;
        Ok(updated > 0)
    }

    /// Deletes the stored sequence and clears the identifier.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn delete(&self, sequence: &mut Sequence) -> Result<bool> {
        let identifier = stored_identifier(sequence.identifier, "sequence")?;
        let mut delete = self.database_adaptor.connection().prepare_cached(
            "DELETE FROM sequence WHERE sequence_id = ?1"
        )?;
        let deleted = delete.execute((identifier,))?;
        sequence.identifier = None;
        Ok(deleted > 0)
    }
}

impl BaseAdaptor for SequenceAdaptor {
    type Object = Sequence;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["sequence"],
        columns: &[
            "sequence.sequence_id", "sequence.sequence_db_id", "sequence.name",
            "sequence.accession", "sequence.version", "sequence.type", "sequence.length",
            "sequence.cds_start", "sequence.cds_end", "sequence.cds_strand",
            "sequence.polya_length", "sequence.description",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY sequence.sequence_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("sequence.sequence_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Sequence> {
        Ok(Sequence {
            identifier: Some(row.get(0)?),
            database_identifier: row.get(1)?,
            name: row.get(2)?,
            accession: row.get(3)?,
            version: row.get(4)?,
            kind: row.get(5)?,
            length: row.get(6)?,
            cds_start: row.get(7)?,
            cds_end: row.get(8)?,
            cds_strand: row.get(9)?,
            polya_length: row.get(10)?,
            description: row.get(11)?,
        })
    }
}

//-----------------------------------------------------------------------------
