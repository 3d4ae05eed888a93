//! # Ensembl-base: Ensembl database adaptors over SQLite.
//!
//! This crate gives typed access to a subset of the Ensembl database schemas stored as SQLite files.
//! Each Ensembl database (e.g. `homo_sapiens_variation_70_37`) is a single SQLite file.
//! Rows are converted into domain objects by entity adaptors, and a [`Registry`] keeps track of the databases and the adaptors.
//!
//! ### Basic concepts
//!
//! A [`DatabaseConnection`] is a connection to one database file.
//! A [`DatabaseAdaptor`] binds a connection to a species and a [`DatabaseGroup`] (e.g. core, variation, or quality check).
//! Collection databases store multiple species, and each species gets its own database adaptor sharing the same connection.
//!
//! Entity adaptors build their `SELECT` statements from a [`SelectStatement`] and implement [`BaseAdaptor`] for the common fetch and count operations.
//! The entity adaptors are:
//!
//! * [`AssemblyAdaptor`] for assembly relationships in core-style databases.
//! * [`variation::PopulationAdaptor`], [`variation::AlleleAdaptor`], [`variation::GenotypeCodeAdaptor`], and [`variation::GenotypeAdaptor`] for variation databases.
//! * [`qc::SequenceAdaptor`], [`qc::DasFeatureAdaptor`], [`qc::VariationAdaptor`], and [`qc::SubmissionAdaptor`] for quality-check databases.
//!
//! Objects fetched from the database are plain values.
//! Objects that refer to shared objects (such as alleles referring to populations) hold them in [`std::rc::Rc`].
//!
//! ### Registry
//!
//! The [`Registry`] maps species aliases to species, stable identifiers to species and groups, and (species, group) pairs to database adaptors.
//! It creates each entity adaptor on first request and returns the same adaptor afterwards.
//! Databases can be registered one by one or by scanning a directory with [`Registry::load_directory`].
//!
//! See [`schema`] for creating new databases.

#[macro_use]
mod macros;

pub mod assembly;
pub mod base_adaptor;
pub mod database;
pub mod error;
pub mod qc;
pub mod registry;
pub mod schema;
pub mod utils;
pub mod variation;

#[cfg(test)]
pub(crate) mod internal;

pub use assembly::{Assembly, AssemblyAdaptor};
pub use base_adaptor::{BaseAdaptor, SelectStatement};
pub use database::{DatabaseAdaptor, DatabaseConnection, DatabaseGroup, DatabaseName};
pub use error::{EnsemblError, Result};
pub use registry::{Registry, RegistryParams};
