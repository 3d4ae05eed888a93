use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{Population, PopulationAdaptor};

use std::rc::Rc;

use rusqlite::Row;

//-----------------------------------------------------------------------------

/// An allele of a variation, optionally observed in a population.
///
/// # Examples
///
/// ```
/// use ensembl_base::variation::{Allele, Population};
/// use std::rc::Rc;
///
/// let population = Rc::new(Population {
///     identifier: 7,
///     name: String::from("1000GENOMES:phase_1_CEU"),
///     size: Some(85),
///     description: None,
///     frequencies_from_genotypes: true,
///     display_group: None,
/// });
/// let mut allele = Allele::new(1, 42, Some(1234), "A", Some(Rc::clone(&population)), Some(0.25), Some(20));
/// assert_eq!(allele.subsnp_name().as_deref(), Some("ss1234"));
/// assert_eq!(allele.population_identifier(), Some(7));
/// assert_eq!(Rc::strong_count(&population), 2);
///
/// allele.set_population(None);
/// assert_eq!(allele.population_identifier(), None);
/// assert_eq!(Rc::strong_count(&population), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Allele {
    identifier: u32,
    variation_identifier: u32,
    subsnp_identifier: Option<u32>,
    allele: String,
    population_identifier: Option<u32>,
    population: Option<Rc<Population>>,
    frequency: Option<f64>,
    count: Option<u32>,
}

impl Allele {
    /// Creates a new allele.
    pub fn new(
        identifier: u32, variation_identifier: u32, subsnp_identifier: Option<u32>,
        allele: &str, population: Option<Rc<Population>>,
        frequency: Option<f64>, count: Option<u32>
    ) -> Self {
        Allele {
            identifier,
            variation_identifier,
            subsnp_identifier,
            allele: allele.to_string(),
            population_identifier: population.as_ref().map(|x| x.identifier),
            population,
            frequency,
            count,
        }
    }

    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    pub fn variation_identifier(&self) -> u32 {
        self.variation_identifier
    }

    pub fn subsnp_identifier(&self) -> Option<u32> {
        self.subsnp_identifier
    }

    /// Returns the subSNP name `ss<identifier>`.
    pub fn subsnp_name(&self) -> Option<String> {
        self.subsnp_identifier.map(|x| format!("ss{}", x))
    }

    /// Returns the allele string.
    pub fn allele(&self) -> &str {
        &self.allele
    }

    pub fn set_allele(&mut self, allele: &str) {
        self.allele = allele.to_string();
    }

    /// Returns the population identifier stored in the database.
    ///
    /// This is available even if the population itself could not be fetched.
    pub fn population_identifier(&self) -> Option<u32> {
        self.population_identifier
    }

    pub fn population(&self) -> Option<&Rc<Population>> {
        self.population.as_ref()
    }

    pub fn set_population(&mut self, population: Option<Rc<Population>>) {
        self.population_identifier = population.as_ref().map(|x| x.identifier);
        self.population = population;
    }

    /// Returns the allele frequency in the population.
    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: Option<f64>) {
        self.frequency = frequency;
    }

    /// Returns the number of observations in the population.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn set_count(&mut self, count: Option<u32>) {
        self.count = count;
    }
}

//-----------------------------------------------------------------------------

/// Adaptor for table `allele`.
///
/// Populations are fetched after the alleles, and alleles from the same population share the population object.
#[derive(Debug)]
pub struct AlleleAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
    populations: PopulationAdaptor,
}

impl AlleleAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        let populations = PopulationAdaptor::new(Rc::clone(&database_adaptor));
        AlleleAdaptor { database_adaptor, populations }
    }

    /// Returns the alleles of the variation, optionally restricted to a population.
    pub fn fetch_all_by_variation(&self, variation_id: u32, population: Option<&Population>) -> Result<Vec<Allele>> {
        match population {
            Some(population) => self.fetch_all_by_constraint(
                Some("allele.variation_id = ?1 AND allele.population_id = ?2"),
                (variation_id, population.identifier)
            ),
            None => self.fetch_all_by_constraint(Some("allele.variation_id = ?1"), (variation_id,)),
        }
    }

    /// Returns the alleles submitted with the given subSNP identifier.
    pub fn fetch_all_by_subsnp(&self, subsnp_id: u32) -> Result<Vec<Allele>> {
        self.fetch_all_by_constraint(Some("allele.subsnp_id = ?1"), (subsnp_id,))
    }
}

impl BaseAdaptor for AlleleAdaptor {
    type Object = Allele;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["allele", "allele_code"],
        columns: &[
            "allele.allele_id", "allele.variation_id", "allele.subsnp_id",
            "allele_code.allele", "allele.population_id",
            "allele.frequency", "allele.count",
        ],
        left_join: &[],
        default_condition: Some("allele.allele_code_id = allele_code.allele_code_id"),
        final_condition: Some("ORDER BY allele.allele_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("allele.allele_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Allele> {
        Ok(Allele {
            identifier: row.get(0)?,
            variation_identifier: row.get(1)?,
            subsnp_identifier: row.get(2)?,
            allele: row.get(3)?,
            population_identifier: row.get(4)?,
            population: None,
            frequency: row.get(5)?,
            count: row.get(6)?,
        })
    }

    fn post_process(&self, objects: &mut [Allele]) -> Result<()> {
        let populations = self.populations.fetch_shared(objects.iter().filter_map(|x| x.population_identifier))?;
        for allele in objects.iter_mut() {
            if let Some(identifier) = allele.population_identifier {
                allele.population = populations.get(&identifier).cloned();
            }
        }
        Ok(())
    }
}

//-----------------------------------------------------------------------------
