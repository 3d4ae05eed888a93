//! Objects and adaptors for quality-check databases.
//!
//! A quality-check database compares query sequences (e.g. cDNAs or proteins) against target sequences (e.g. genome assemblies or transcripts).
//! The sequences are stored in table `sequence`.
//! The results are stored as DAS features ([`DasFeature`]), differences between query and target ([`Variation`]),
//! and records of sequences submitted to analyses ([`Submission`]).
//!
//! Unlike the core and variation adaptors, the quality-check adaptors can also store, update, and delete objects.
//! An object that has not been stored has no identifier.
//! Storing an object assigns the identifier, and deleting it clears the identifier.

use crate::{EnsemblError, Result};

mod das_feature;
mod sequence;
mod submission;
mod variation;

pub use das_feature::{DasFeature, DasFeatureAdaptor, DasFeatureCategory, DasFeatureType};
pub use sequence::{Sequence, SequenceAdaptor};
pub use submission::{Submission, SubmissionAdaptor};
pub use variation::{Variation, VariationAdaptor, VariationClass, VariationState, VariationType};


//-----------------------------------------------------------------------------

// Returns the identifier of a stored object, or an error for an object that has not been stored.
fn stored_identifier(identifier: Option<u32>, what: &str) -> Result<u32> {
    identifier.ok_or_else(|| EnsemblError::InvalidInput(format!("The {} has not been stored", what)))
}

// Returns an error if the object has already been stored.
fn check_not_stored(identifier: Option<u32>, what: &str) -> Result<()> {
    match identifier {
        Some(identifier) => Err(EnsemblError::InvalidInput(format!("The {} has already been stored with identifier {}", what, identifier))),
        None => Ok(()),
    }
}

// Converts a row id assigned by SQLite into an identifier.
fn row_identifier(row_id: i64) -> Result<u32> {
    u32::try_from(row_id).map_err(|_| EnsemblError::InvalidInput(format!("Row id {} is out of range", row_id)))
}

//-----------------------------------------------------------------------------
