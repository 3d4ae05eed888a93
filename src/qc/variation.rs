use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{check_not_stored, row_identifier, stored_identifier};

use std::rc::Rc;

use rusqlite::{params, Row};

//-----------------------------------------------------------------------------

text_enum! {
    /// Class of a difference between query and target.
    pub enum VariationClass {
        None => "none",
        Simple => "simple",
        Splice => "splice",
        Exon => "exon",
    }
}

text_enum! {
    /// Type of a difference between query and target.
    pub enum VariationType {
        None => "none",
        Single => "single",
        Multi => "multi",
        Match => "match",
        Gap => "gap",
        Frameshift => "frameshift",
        /// Splice site at the 5' end of an intron.
        FivePrimeSpliceSite => "5'ss",
        /// Splice site at the 3' end of an intron.
        ThreePrimeSpliceSite => "3'ss",
        Split => "split",
    }
}

text_enum! {
    /// State of the query at the difference.
    pub enum VariationState {
        None => "none",
        Match => "match",
        Gap => "gap",
        Frameshift => "frameshift",
        FivePrimeSpliceSite => "5'ss",
        ThreePrimeSpliceSite => "3'ss",
        Split => "split",
    }
}

//-----------------------------------------------------------------------------

/// A difference between a query sequence and a target sequence within an alignment.
///
/// Sequences are referenced by their identifiers in table `sequence` and by the identifiers of their sequence databases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variation {
    /// Identifier assigned when the variation is stored.
    pub identifier: Option<u32>,
    pub analysis_identifier: u32,
    pub alignment_identifier: u32,
    pub query_database_identifier: u32,
    pub query_sequence_identifier: u32,
    pub query_start: u32,
    pub query_end: u32,
    /// Query bases at the difference.
    pub query_string: String,
    pub target_database_identifier: u32,
    pub target_sequence_identifier: u32,
    pub target_start: u32,
    pub target_end: u32,
    /// Target bases at the difference.
    pub target_string: String,
    pub class: VariationClass,
    pub kind: VariationType,
    pub state: VariationState,
}

//-----------------------------------------------------------------------------

/// Adaptor for table `variation` in quality-check databases.
#[derive(Debug)]
pub struct VariationAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl VariationAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        VariationAdaptor { database_adaptor }
    }

    /// Returns the variations within the alignment.
    pub fn fetch_all_by_alignment(&self, alignment_id: u32) -> Result<Vec<Variation>> {
        self.fetch_all_by_constraint(Some("variation.alignment_id = ?1"), (alignment_id,))
    }

    /// Returns the variations on the query sequence, optionally restricted to an analysis.
    pub fn fetch_all_by_query(&self, sequence_id: u32, analysis_id: Option<u32>) -> Result<Vec<Variation>> {
        self.fetch_all_by_constraint(
            Some("variation.query_id = ?1 AND (?2 IS NULL OR variation.analysis_id = ?2)"),
            (sequence_id, analysis_id)
        )
    }

    /// Returns the variations on the target sequence, optionally restricted to an analysis.
    pub fn fetch_all_by_target(&self, sequence_id: u32, analysis_id: Option<u32>) -> Result<Vec<Variation>> {
        self.fetch_all_by_constraint(
            Some("variation.target_id = ?1 AND (?2 IS NULL OR variation.analysis_id = ?2)"),
            (sequence_id, analysis_id)
        )
    }

    /// Stores the variation and assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the variation has already been stored.
    /// Passes through any database errors.
    pub fn store(&self, variation: &mut Variation) -> Result<()> {
        check_not_stored(variation.identifier, "variation")?;
        let mut insert = self.database_adaptor.connection().prepare_cached(
            "INSERT INTO variation(
                analysis_id, alignment_id,
                query_db_id, query_id, query_start, query_end, query_seq,
                target_db_id, target_id, target_start, target_end, target_seq,
                class, type, state)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        )?;
        insert.execute(params![
            variation.analysis_identifier, variation.alignment_identifier,
            variation.query_database_identifier, variation.query_sequence_identifier,
            variation.query_start, variation.query_end, variation.query_string,
            variation.target_database_identifier, variation.target_sequence_identifier,
            variation.target_start, variation.target_end, variation.target_string,
            variation.class, variation.kind, variation.state,
        ])?;
        variation.identifier = Some(row_identifier(self.database_adaptor.connection().last_insert_rowid())?);
        Ok(())
    }

    /// Updates the stored variation.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn update(&self, variation: &Variation) -> Result<bool> {
        let identifier = stored_identifier(variation.identifier, "variation")?;
        let mut update = self.database_adaptor.connection().prepare_cached(
            "UPDATE variation SET
                analysis_id = ?1, alignment_id = ?2,
                query_db_id = ?3, query_id = ?4, query_start = ?5, query_end = ?6, query_seq = ?7,
                target_db_id = ?8, target_id = ?9, target_start = ?10, target_end = ?11, target_seq = ?12,
                class = ?13, type = ?14, state = ?15
            WHERE variation_id = ?16"
        )?;
        let updated = update.execute(params![
            variation.analysis_identifier, variation.alignment_identifier,
            variation.query_database_identifier, variation.query_sequence_identifier,
            variation.query_start, variation.query_end, variation.query_string,
            variation.target_database_identifier, variation.target_sequence_identifier,
            variation.target_start, variation.target_end, variation.target_string,
            variation.class, variation.kind, variation.state,
            identifier,
        ])?;
        Ok(updated > 0)
    }

    /// Deletes the stored variation and clears the identifier.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn delete(&self, variation: &mut Variation) -> Result<bool> {
        let identifier = stored_identifier(variation.identifier, "variation")?;
        let mut delete = self.database_adaptor.connection().prepare_cached(
            "DELETE FROM variation WHERE variation_id = ?1"
        )?;
        let deleted = delete.execute((identifier,))?;
        variation.identifier = None;
        Ok(deleted > 0)
    }
}

impl BaseAdaptor for VariationAdaptor {
    type Object = Variation;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["variation"],
        columns: &[
            "variation.variation_id", "variation.analysis_id", "variation.alignment_id",
            "variation.query_db_id", "variation.query_id",
            "variation.query_start", "variation.query_end", "variation.query_seq",
            "variation.target_db_id", "variation.target_id",
            "variation.target_start", "variation.target_end", "variation.target_seq",
            "variation.class", "variation.type", "variation.state",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY variation.variation_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("variation.variation_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Variation> {
        Ok(Variation {
            identifier: Some(row.get(0)?),
            analysis_identifier: row.get(1)?,
            alignment_identifier: row.get(2)?,
            query_database_identifier: row.get(3)?,
            query_sequence_identifier: row.get(4)?,
            query_start: row.get(5)?,
            query_end: row.get(6)?,
            query_string: row.get(7)?,
            target_database_identifier: row.get(8)?,
            target_sequence_identifier: row.get(9)?,
            target_start: row.get(10)?,
            target_end: row.get(11)?,
            target_string: row.get(12)?,
            class: row.get(13)?,
            kind: row.get(14)?,
            state: row.get(15)?,
        })
    }
}

//-----------------------------------------------------------------------------
