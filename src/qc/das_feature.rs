use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{check_not_stored, row_identifier, stored_identifier};

use std::rc::Rc;

use rusqlite::{params, Row};

//-----------------------------------------------------------------------------

text_enum! {
    /// Result category of a DAS feature.
    pub enum DasFeatureCategory {
        Unknown => "unknown",
        ExonPerfect => "exon:perfect",
        ExonPartial => "exon:partial",
        ExonMissing => "exon:missing",
        ExonFrameshift => "exon:frameshift",
        TranscriptPerfect => "transcript:perfect",
        Transcript => "transcript",
        TranscriptPartial => "transcript:partial",
        TranscriptMissing => "transcript:missing",
        TranslationPerfect => "translation:perfect",
        TranslationPartial => "translation:partial",
        TranslationMissing => "translation:missing",
    }
}

text_enum! {
    /// Type of the feature.
    pub enum DasFeatureType {
        Exon => "exon",
        Transcript => "transcript",
        Translation => "translation",
    }
}

//-----------------------------------------------------------------------------

/// A DAS feature: an interval of an object sequence aligned to an interval of a segment sequence.
///
/// Sequences are referenced by their identifiers in table `sequence`.
/// The analysis and the alignment are referenced by identifier only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DasFeature {
    /// Identifier assigned when the feature is stored.
    pub identifier: Option<u32>,
    pub analysis_identifier: u32,
    pub alignment_identifier: u32,
    pub object_sequence_identifier: u32,
    pub object_start: u32,
    pub object_end: u32,
    pub segment_sequence_identifier: u32,
    pub segment_start: u32,
    pub segment_end: u32,
    pub segment_strand: i8,
    pub phase: u32,
    pub category: DasFeatureCategory,
    pub kind: DasFeatureType,
}

impl DasFeature {
    /// Returns `true` if the segment interval overlaps with the given interval.
    pub fn overlaps_segment(&self, start: u32, end: u32) -> bool {
        self.segment_start <= end && start <= self.segment_end
    }
}

//-----------------------------------------------------------------------------

/// Adaptor for table `das_feature`.
#[derive(Debug)]
pub struct DasFeatureAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl DasFeatureAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        DasFeatureAdaptor { database_adaptor }
    }

    /// Returns the features on the segment sequence, optionally restricted to an analysis.
    pub fn fetch_all_by_segment(&self, sequence_id: u32, analysis_id: Option<u32>) -> Result<Vec<DasFeature>> {
        self.fetch_all_by_constraint(
            Some("das_feature.segment_sequence_id = ?1 AND (?2 IS NULL OR das_feature.analysis_id = ?2)"),
            (sequence_id, analysis_id)
        )
    }

    /// Returns the features of the object sequence, optionally restricted to an analysis.
    pub fn fetch_all_by_object(&self, sequence_id: u32, analysis_id: Option<u32>) -> Result<Vec<DasFeature>> {
        self.fetch_all_by_constraint(
            Some("das_feature.object_sequence_id = ?1 AND (?2 IS NULL OR das_feature.analysis_id = ?2)"),
            (sequence_id, analysis_id)
        )
    }

    /// Returns the features overlapping with the interval of the segment sequence.
    pub fn fetch_all_by_location(&self, sequence_id: u32, start: u32, end: u32) -> Result<Vec<DasFeature>> {
        self.fetch_all_by_constraint(
            Some("das_feature.segment_sequence_id = ?1 AND das_feature.segment_start <= ?3 AND das_feature.segment_end >= ?2"),
            (sequence_id, start, end)
        )
    }

    /// Stores the feature and assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature has already been stored.
    /// Passes through any database errors.
    pub fn store(&self, feature: &mut DasFeature) -> Result<()> {
        check_not_stored(feature.identifier, "DAS feature")?;
        let mut insert = self.database_adaptor.connection().prepare_cached(
            "INSERT INTO das_feature(
                analysis_id, alignment_id,
                object_sequence_id, object_start, object_end,
                segment_sequence_id, segment_start, segment_end, segment_strand,
                phase, category, type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        )?;
        insert.execute(params![
            feature.analysis_identifier, feature.alignment_identifier,
            feature.object_sequence_identifier, feature.object_start, feature.object_end,
            feature.segment_sequence_identifier, feature.segment_start, feature.segment_end, feature.segment_strand,
            feature.phase, feature.category, feature.kind,
        ])?;
        feature.identifier = Some(row_identifier(self.database_adaptor.connection().last_insert_rowid())?);
        Ok(())
    }

    /// Updates the stored feature.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn update(&self, feature: &DasFeature) -> Result<bool> {
        let identifier = stored_identifier(feature.identifier, "DAS feature")?;
        let mut update = self.database_adaptor.connection().prepare_cached(
            "UPDATE das_feature SET
                analysis_id = ?1, alignment_id = ?2,
                object_sequence_id = ?3, object_start = ?4, object_end = ?5,
                segment_sequence_id = ?6, segment_start = ?7, segment_end = ?8, segment_strand = ?9,
                phase = ?10, category = ?11, type = ?12
            WHERE das_feature_id = ?13"
        )?;
        let updated = update.execute(params![
            feature.analysis_identifier, feature.alignment_identifier,
            feature.object_sequence_identifier, feature.object_start, feature.object_end,
            feature.segment_sequence_identifier, feature.segment_start, feature.segment_end, feature.segment_strand,
            feature.phase, feature.category, feature.kind,
            identifier,
        ])?;
        Ok(updated > 0)
    }

    /// Deletes the stored feature and clears the identifier.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn delete(&self, feature: &mut DasFeature) -> Result<bool> {
        let identifier = stored_identifier(feature.identifier, "DAS feature")?;
        let mut delete = self.database_adaptor.connection().prepare_cached(
            "DELETE FROM das_feature WHERE das_feature_id = ?1"
        )?;
        let deleted = delete.execute((identifier,))?;
        feature.identifier = None;
        Ok(deleted > 0)
    }
}

impl BaseAdaptor for DasFeatureAdaptor {
    type Object = DasFeature;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["das_feature"],
        columns: &[
            "das_feature.das_feature_id", "das_feature.analysis_id", "das_feature.alignment_id",
            "das_feature.object_sequence_id", "das_feature.object_start", "das_feature.object_end",
            "das_feature.segment_sequence_id", "das_feature.segment_start", "das_feature.segment_end",
            "das_feature.segment_strand", "das_feature.phase",
            "das_feature.category", "das_feature.type",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY das_feature.segment_sequence_id, das_feature.segment_start, das_feature.das_feature_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("das_feature.das_feature_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<DasFeature> {
        Ok(DasFeature {
            identifier: Some(row.get(0)?),
            analysis_identifier: row.get(1)?,
            alignment_identifier: row.get(2)?,
            object_sequence_identifier: row.get(3)?,
            object_start: row.get(4)?,
            object_end: row.get(5)?,
            segment_sequence_identifier: row.get(6)?,
            segment_start: row.get(7)?,
            segment_end: row.get(8)?,
            segment_strand: row.get(9)?,
            phase: row.get(10)?,
            category: row.get(11)?,
            kind: row.get(12)?,
        })
    }
}

//-----------------------------------------------------------------------------
