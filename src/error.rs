//! Error type shared by the database layer.

use thiserror::Error;

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, EnsemblError>;

/// Errors from the database layer.
#[derive(Error, Debug)]
pub enum EnsemblError {
    /// Passed through from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An identifier expression could not be compiled.
    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    /// A column or a file contained a value that cannot be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The arguments of an operation are inconsistent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
