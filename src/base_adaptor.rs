//! Generic SQL statement building and fetching for entity adaptors.
//!
//! Each entity adaptor describes its `SELECT` statement with a [`SelectStatement`] and implements [`BaseAdaptor`].
//! The trait then provides the common fetch and count operations.

use crate::{DatabaseAdaptor, EnsemblError, Result};

use std::collections::HashSet;
use std::fmt::Write;

use rusqlite::{Params, Row, Rows};
use tracing::debug;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Description of the `SELECT` statement used by an entity adaptor.
///
/// The statement has the form
///
/// `SELECT <columns> FROM <tables> [LEFT JOIN <table> ON <condition> ...] [WHERE <default condition> AND <constraint>] [<final condition>]`.
///
/// Tables are listed with their aliases (e.g. `"allele a"`).
/// If there are left joins and multiple tables, the tables are enclosed in parentheses.
///
/// # Examples
///
/// ```
/// use ensembl_base::SelectStatement;
///
/// let statement = SelectStatement {
///     tables: &["allele", "allele_code"],
///     columns: &["allele.allele_id", "allele_code.allele"],
///     left_join: &[],
///     default_condition: Some("allele.allele_code_id = allele_code.allele_code_id"),
///     final_condition: None,
/// };
/// assert_eq!(
///     statement.build(Some("allele.variation_id = ?1")),
///     "SELECT allele.allele_id, allele_code.allele FROM allele, allele_code \
///     WHERE allele.allele_code_id = allele_code.allele_code_id AND allele.variation_id = ?1"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectStatement {
    /// Tables with optional aliases.
    pub tables: &'static [&'static str],
    /// Selected columns in the order expected by the row mapping.
    pub columns: &'static [&'static str],
    /// `(table, condition)` pairs for left joins.
    pub left_join: &'static [(&'static str, &'static str)],
    /// Condition that always applies, such as join conditions.
    pub default_condition: Option<&'static str>,
    /// Clause appended after the `WHERE` clause, such as `ORDER BY`.
    pub final_condition: Option<&'static str>,
}

impl SelectStatement {
    // Appends the FROM, JOIN, and WHERE clauses.
    fn append_body(&self, sql: &mut String, constraint: Option<&str>) {
        sql.push_str(" FROM ");
        if self.left_join.is_empty() || self.tables.len() == 1 {
            sql.push_str(&self.tables.join(", "));
        } else {
            let _ = write!(sql, "({})", self.tables.join(", "));
            for (table, condition) in self.left_join.iter() {
                let _ = write!(sql, " LEFT JOIN {} ON {}", table, condition);
            }
        }

        let mut conditions: Vec<&str> = Vec::new();
        if let Some(condition) = self.default_condition {
            conditions.push(condition);
        }
        if let Some(condition) = constraint {
            conditions.push(condition);
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
    }

    /// Builds a `SELECT` statement with an optional additional constraint.
    pub fn build(&self, constraint: Option<&str>) -> String {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.columns.join(", "));
        self.append_body(&mut sql, constraint);
        if let Some(condition) = self.final_condition {
            sql.push(' ');
            sql.push_str(condition);
        }
        sql
    }

    /// Builds a statement counting the distinct primary keys, or all rows if there is no primary key.
    ///
    /// The final condition is not used, as it usually orders the rows.
    pub fn build_count(&self, primary_key: Option<&str>, constraint: Option<&str>) -> String {
        let mut sql = match primary_key {
            Some(key) => format!("SELECT COUNT(DISTINCT {})", key),
            None => String::from("SELECT COUNT(*)"),
        };
        self.append_body(&mut sql, constraint);
        sql
    }
}

/// Returns a comma-separated list of identifiers for an `IN (...)` clause.
pub fn identifier_list(identifiers: &[u32]) -> String {
    let mut result = String::with_capacity(identifiers.len() * 8);
    for (i, identifier) in identifiers.iter().enumerate() {
        if i > 0 {
            result.push_str(", ");
        }
        let _ = write!(result, "{}", identifier);
    }
    result
}

//-----------------------------------------------------------------------------

/// Common operations of entity adaptors.
///
/// An implementation provides the statement, the primary key, and the mapping from a row to an object.
/// Implementations may also override [`BaseAdaptor::collect_rows`] when one object spans multiple rows,
/// and [`BaseAdaptor::post_process`] when objects refer to objects from other tables.
pub trait BaseAdaptor {
    /// Type of the objects returned by the adaptor.
    type Object;

    /// Description of the `SELECT` statement.
    const STATEMENT: SelectStatement;

    /// Qualified primary key column, such as `allele.allele_id`.
    ///
    /// Tables without a primary key use [`None`], which disables the identifier-based operations.
    const PRIMARY_KEY: Option<&'static str>;

    /// Maximum number of identifiers in a single `IN (...)` clause.
    const MAXIMUM_IDENTIFIERS: usize = 300;

    /// Returns the database adaptor.
    fn database_adaptor(&self) -> &DatabaseAdaptor;

    /// Converts a row with the columns of [`BaseAdaptor::STATEMENT`] into an object.
    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Self::Object>;

    /// Converts all rows into objects.
    fn collect_rows(&self, rows: &mut Rows) -> Result<Vec<Self::Object>> {
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(self.row_to_object(row)?);
        }
        Ok(result)
    }

    /// Completes the objects after all rows have been read.
    fn post_process(&self, _objects: &mut [Self::Object]) -> Result<()> {
        Ok(())
    }

    /// Returns all objects matching the constraint.
    ///
    /// The constraint is a SQL condition that may refer to the parameters as `?1`, `?2`, and so on.
    /// Passes through any database errors.
    fn fetch_all_by_constraint<P: Params>(&self, constraint: Option<&str>, params: P) -> Result<Vec<Self::Object>> {
        let mut objects = self.collect_by_constraint(constraint, params)?;
        self.post_process(&mut objects)?;
        Ok(objects)
    }

    /// Returns all objects matching the constraint without calling [`BaseAdaptor::post_process`].
    ///
    /// Fetches spanning multiple statements collect the objects with this and post-process them together.
    fn collect_by_constraint<P: Params>(&self, constraint: Option<&str>, params: P) -> Result<Vec<Self::Object>> {
        let sql = Self::STATEMENT.build(constraint);
        debug!("Fetching: {}", sql);
        let connection = self.database_adaptor().connection();
        let mut statement = connection.prepare_cached(&sql)?;
        let mut rows = statement.query(params)?;
        self.collect_rows(&mut rows)
    }

    /// Returns all objects.
    fn fetch_all(&self) -> Result<Vec<Self::Object>> {
        self.fetch_all_by_constraint(None, ())
    }

    /// Returns the object with the given identifier, or [`None`] if there is no such object.
    ///
    /// # Errors
    ///
    /// Returns an error if the adaptor has no primary key.
    /// Passes through any database errors.
    fn fetch_by_identifier(&self, identifier: u32) -> Result<Option<Self::Object>> {
        let key = primary_key::<Self>()?;
        let constraint = format!("{} = ?1", key);
        let mut objects = self.fetch_all_by_constraint(Some(constraint.as_str()), (identifier,))?;
        if objects.len() > 1 {
            debug!("Found {} objects with identifier {} for {}", objects.len(), identifier, key);
        }
        if objects.is_empty() {
            Ok(None)
        } else {
            Ok(Some(objects.swap_remove(0)))
        }
    }

    /// Returns the objects with the given identifiers.
    ///
    /// Duplicate identifiers are ignored, and missing identifiers are skipped.
    /// The identifiers are fetched in batches of at most [`BaseAdaptor::MAXIMUM_IDENTIFIERS`].
    /// Within each batch, the objects are in the order chosen by the statement.
    /// [`BaseAdaptor::post_process`] runs once over the objects from all batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the adaptor has no primary key.
    /// Passes through any database errors.
    fn fetch_all_by_identifiers(&self, identifiers: &[u32]) -> Result<Vec<Self::Object>> {
        let key = primary_key::<Self>()?;
        let mut seen: HashSet<u32> = HashSet::with_capacity(identifiers.len());
        let unique: Vec<u32> = identifiers.iter().copied().filter(|x| seen.insert(*x)).collect();

        let mut result = Vec::with_capacity(unique.len());
        for batch in unique.chunks(Self::MAXIMUM_IDENTIFIERS) {
            let constraint = format!("{} IN ({})", key, identifier_list(batch));
            let mut objects = self.collect_by_constraint(Some(constraint.as_str()), ())?;
            result.append(&mut objects);
        }
        self.post_process(&mut result)?;
        Ok(result)
    }

    /// Returns the number of objects matching the constraint.
    fn count_by_constraint<P: Params>(&self, constraint: Option<&str>, params: P) -> Result<usize> {
        let sql = Self::STATEMENT.build_count(Self::PRIMARY_KEY, constraint);
        let connection = self.database_adaptor().connection();
        let mut statement = connection.prepare_cached(&sql)?;
        let count = statement.query_row(params, |row| row.get::<_, usize>(0))?;
        Ok(count)
    }

    /// Returns the total number of objects.
    fn count_all(&self) -> Result<usize> {
        self.count_by_constraint(None, ())
    }

    /// Returns the identifiers of all objects in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the adaptor has no primary key.
    /// Passes through any database errors.
    fn retrieve_all_identifiers(&self) -> Result<Vec<u32>> {
        let key = primary_key::<Self>()?;
        let table = Self::STATEMENT.tables.first().copied().unwrap_or_default();
        let table = table.split_whitespace().next().unwrap_or_default();
        let sql = format!("SELECT DISTINCT {} FROM {} ORDER BY {}", key, table, key);
        let connection = self.database_adaptor().connection();
        let mut statement = connection.prepare_cached(&sql)?;
        let mut result = Vec::new();
        let mut rows = statement.query(())?;
        while let Some(row) = rows.next()? {
            result.push(row.get(0)?);
        }
        Ok(result)
    }
}

// Returns the primary key or an error if the adaptor does not have one.
fn primary_key<A: BaseAdaptor + ?Sized>() -> Result<&'static str> {
    A::PRIMARY_KEY.ok_or_else(|| EnsemblError::InvalidInput(
        format!("Table {} has no primary key", A::STATEMENT.tables.first().copied().unwrap_or_default())
    ))
}

//-----------------------------------------------------------------------------
