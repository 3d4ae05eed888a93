//! Objects and adaptors for variation databases.
//!
//! Alleles and genotypes are observed in populations.
//! Objects fetched together share one [`std::rc::Rc`] per population, so a population row is read and stored once per fetch.
//!
//! Allele strings are stored once in table `allele_code`.
//! A genotype code is an ordered list of allele codes, one per haplotype, stored as multiple rows in table `genotype_code`.
//! Population genotypes refer to genotype codes.

mod allele;
mod genotype;
mod population;

pub use allele::{Allele, AlleleAdaptor};
pub use genotype::{Genotype, GenotypeAdaptor, GenotypeCode, GenotypeCodeAdaptor};
pub use population::{Population, PopulationAdaptor};
