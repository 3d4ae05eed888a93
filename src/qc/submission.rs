use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{check_not_stored, row_identifier, stored_identifier};

use std::rc::Rc;

use rusqlite::{params, Row};

//-----------------------------------------------------------------------------

/// A record of a query sequence submitted to an analysis against a target sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Identifier assigned when the submission is stored.
    pub identifier: Option<u32>,
    pub analysis_identifier: u32,
    pub query_database_identifier: u32,
    pub query_sequence_identifier: u32,
    pub target_database_identifier: u32,
    pub target_sequence_identifier: u32,
    pub target_start: u32,
    pub target_end: u32,
    pub target_strand: i8,
    /// Identifier of the analysis job in the pipeline.
    pub analysis_job_identifier: u32,
}

//-----------------------------------------------------------------------------

/// Adaptor for table `submission`.
#[derive(Debug)]
pub struct SubmissionAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl SubmissionAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        SubmissionAdaptor { database_adaptor }
    }

    /// Returns the submission of the query sequence against the target sequence in the analysis.
    ///
    /// If there are multiple such submissions, returns the first one.
    /// Returns [`None`] if there is no such submission.
    pub fn fetch_by_all(&self, analysis_id: u32, query_sequence_id: u32, target_sequence_id: u32) -> Result<Option<Submission>> {
        let mut submissions = self.fetch_all_by_constraint(
            Some("submission.analysis_id = ?1 AND submission.query_id = ?2 AND submission.target_id = ?3"),
            (analysis_id, query_sequence_id, target_sequence_id)
        )?;
        if submissions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(submissions.swap_remove(0)))
        }
    }

    /// Returns all submissions of the query sequence.
    pub fn fetch_all_by_query(&self, sequence_id: u32) -> Result<Vec<Submission>> {
        self.fetch_all_by_constraint(Some("submission.query_id = ?1"), (sequence_id,))
    }

    /// Returns all submissions against the target sequence.
    pub fn fetch_all_by_target(&self, sequence_id: u32) -> Result<Vec<Submission>> {
        self.fetch_all_by_constraint(Some("submission.target_id = ?1"), (sequence_id,))
    }

    /// Stores the submission and assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission has already been stored.
    /// Passes through any database errors.
    pub fn store(&self, submission: &mut Submission) -> Result<()> {
        check_not_stored(submission.identifier, "submission")?;
        let mut insert = self.database_adaptor.connection().prepare_cached(
            "INSERT INTO submission(
                analysis_id, query_db_id, query_id,
                target_db_id, target_id, target_start, target_end, target_strand,
                analysis_job_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        )?;
        insert.execute(params![
            submission.analysis_identifier,
            submission.query_database_identifier, submission.query_sequence_identifier,
            submission.target_database_identifier, submission.target_sequence_identifier,
            submission.target_start, submission.target_end, submission.target_strand,
            submission.analysis_job_identifier,
        ])?;
        submission.identifier = Some(row_identifier(self.database_adaptor.connection().last_insert_rowid())?);
        Ok(())
    }

    /// Updates the stored submission.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn update(&self, submission: &Submission) -> Result<bool> {
        let identifier = stored_identifier(submission.identifier, "submission")?;
        let mut update = self.database_adaptor.connection().prepare_cached(
            "UPDATE submission SET
                analysis_id = ?1, query_db_id = ?2, query_id = ?3,
                target_db_id = ?4, target_id = ?5, target_start = ?6, target_end = ?7, target_strand = ?8,
                analysis_job_id = ?9
            WHERE submission_id = ?10"
        )?;
        let updated = update.execute(params![
            submission.analysis_identifier,
            submission.query_database_identifier, submission.query_sequence_identifier,
            submission.target_database_identifier, submission.target_sequence_identifier,
            submission.target_start, submission.target_end, submission.target_strand,
            submission.analysis_job_identifier,
            identifier,
        ])?;
        Ok(updated > 0)
    }

    /// Deletes the stored submission and clears the identifier.
    ///
    /// Returns `false` if there was no row with the identifier.
    pub fn delete(&self, submission: &mut Submission) -> Result<bool> {
        let identifier = stored_identifier(submission.identifier, "submission")?;
        let mut delete = self.database_adaptor.connection().prepare_cached(
            "DELETE FROM submission WHERE submission_id = ?1"
        )?;
        let deleted = delete.execute((identifier,))?;
        submission.identifier = None;
        Ok(deleted > 0)
    }
}

impl BaseAdaptor for SubmissionAdaptor {
    type Object = Submission;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["submission"],
        columns: &[
            "submission.submission_id", "submission.analysis_id",
            "submission.query_db_id", "submission.query_id",
            "submission.target_db_id", "submission.target_id",
            "submission.target_start", "submission.target_end", "submission.target_strand",
            "submission.analysis_job_id",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY submission.submission_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("submission.submission_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Submission> {
        Ok(Submission {
            identifier: Some(row.get(0)?),
            analysis_identifier: row.get(1)?,
            query_database_identifier: row.get(2)?,
            query_sequence_identifier: row.get(3)?,
            target_database_identifier: row.get(4)?,
            target_sequence_identifier: row.get(5)?,
            target_start: row.get(6)?,
            target_end: row.get(7)?,
            target_strand: row.get(8)?,
            analysis_job_identifier: row.get(9)?,
        })
    }
}

//-----------------------------------------------------------------------------
