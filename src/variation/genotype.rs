use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};
use super::{Population, PopulationAdaptor};

use std::collections::HashMap;
use std::rc::Rc;

use rusqlite::{Row, Rows};
use tracing::warn;

//-----------------------------------------------------------------------------

/// A genotype code: an ordered list of alleles, one for each haplotype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenotypeCode {
    pub identifier: u32,
    /// Alleles in haplotype order.
    pub alleles: Vec<String>,
    /// Is the genotype phased, if known?
    pub phased: Option<bool>,
}

//-----------------------------------------------------------------------------

/// Adaptor for table `genotype_code`.
///
/// Each genotype code spans one row per haplotype.
/// The rows are merged into a single [`GenotypeCode`], and counts refer to distinct genotype codes.
/// A haplotype whose allele code is missing is logged and left out of the alleles.
#[derive(Debug)]
pub struct GenotypeCodeAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl GenotypeCodeAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        GenotypeCodeAdaptor { database_adaptor }
    }

    /// Returns the genotype code with exactly the given alleles in haplotype order, or [`None`] if there is no such code.
    pub fn fetch_by_alleles(&self, alleles: &[&str]) -> Result<Option<GenotypeCode>> {
        if alleles.is_empty() {
            return Ok(None);
        }
        let constraint = "genotype_code.genotype_code_id IN (
            SELECT genotype_code_id FROM genotype_code
            GROUP BY genotype_code_id HAVING COUNT(*) = ?1)";
        let candidates = self.fetch_all_by_constraint(Some(constraint), (alleles.len(),))?;
        Ok(candidates.into_iter().find(|code| code.alleles.iter().map(String::as_str).eq(alleles.iter().copied())))
    }
}

impl BaseAdaptor for GenotypeCodeAdaptor {
    type Object = GenotypeCode;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["genotype_code"],
        columns: &[
            "genotype_code.genotype_code_id", "allele_code.allele", "genotype_code.phased",
            "genotype_code.haplotype_id", "genotype_code.allele_code_id",
        ],
        left_join: &[("allele_code", "genotype_code.allele_code_id = allele_code.allele_code_id")],
        default_condition: None,
        final_condition: Some("ORDER BY genotype_code.genotype_code_id, genotype_code.haplotype_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("genotype_code.genotype_code_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    // Returns a code with at most one allele; `collect_rows` merges them.
    fn row_to_object(&self, row: &Row) -> rusqlite::Result<GenotypeCode> {
        Ok(GenotypeCode {
            identifier: row.get(0)?,
            alleles: row.get::<_, Option<String>>(1)?.into_iter().collect(),
            phased: row.get(2)?,
        })
    }

    fn collect_rows(&self, rows: &mut Rows) -> Result<Vec<GenotypeCode>> {
        let mut result: Vec<GenotypeCode> = Vec::new();
        while let Some(row) = rows.next()? {
            let code = self.row_to_object(row)?;
            if code.alleles.is_empty() {
                let haplotype: u32 = row.get(3)?;
                let allele_code: u32 = row.get(4)?;
                warn!(
                    "Haplotype {} of genotype code {} refers to missing allele code {}",
                    haplotype, code.identifier, allele_code
                );
            }
            match result.last_mut() {
                Some(last) if last.identifier == code.identifier => {
                    last.alleles.extend(code.alleles);
                    if last.phased.is_none() {
                        last.phased = code.phased;
                    }
                },
                _ => result.push(code),
            }
        }
        Ok(result)
    }
}

//-----------------------------------------------------------------------------

/// A genotype of a variation observed in a population.
///
/// # Examples
///
/// ```
/// use ensembl_base::variation::Genotype;
///
/// let genotype = Genotype::new(1, 42, None, vec![String::from("T"), String::from("C")], None, Some(0.5), Some(10));
/// assert_eq!(genotype.allele(1), Some("C"));
/// assert!(!genotype.is_homozygous());
/// assert_eq!(genotype.genotype_string(false), "C/T");
/// assert_eq!(genotype.genotype_string(true), "T|C");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Genotype {
    identifier: u32,
    variation_identifier: u32,
    subsnp_identifier: Option<u32>,
    genotype_code_identifier: Option<u32>,
    alleles: Vec<String>,
    population_identifier: Option<u32>,
    population: Option<Rc<Population>>,
    frequency: Option<f64>,
    count: Option<u32>,
}

impl Genotype {
    /// Creates a new genotype that is not linked to a genotype code.
    pub fn new(
        identifier: u32, variation_identifier: u32, subsnp_identifier: Option<u32>,
        alleles: Vec<String>, population: Option<Rc<Population>>,
        frequency: Option<f64>, count: Option<u32>
    ) -> Self {
        Genotype {
            identifier,
            variation_identifier,
            subsnp_identifier,
            genotype_code_identifier: None,
            alleles,
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

    /// Returns the genotype code the alleles came from.
    pub fn genotype_code_identifier(&self) -> Option<u32> {
        self.genotype_code_identifier
    }

    /// Returns the alleles in haplotype order.
    pub fn alleles(&self) -> &[String] {
        &self.alleles
    }

    /// Returns the allele for the given haplotype, or [`None`] if there is no such haplotype.
    pub fn allele(&self, haplotype: usize) -> Option<&str> {
        self.alleles.get(haplotype).map(String::as_str)
    }

    pub fn population_identifier(&self) -> Option<u32> {
        self.population_identifier
    }

    pub fn population(&self) -> Option<&Rc<Population>> {
        self.population.as_ref()
    }

    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Returns `true` if all alleles are identical.
    ///
    /// A genotype without alleles is not homozygous.
    pub fn is_homozygous(&self) -> bool {
        match self.alleles.first() {
            Some(first) => self.alleles.iter().all(|x| x == first),
            None => false,
        }
    }

    /// Returns the genotype as a string.
    ///
    /// Phased genotypes list the alleles in haplotype order separated by `|`.
    /// Unphased genotypes list the alleles in sorted order separated by `/`.
    pub fn genotype_string(&self, phased: bool) -> String {
        if phased {
            self.alleles.join("|")
        } else {
            let mut alleles: Vec<&str> = self.alleles.iter().map(String::as_str).collect();
            alleles.sort_unstable();
            alleles.join("/")
        }
    }
}

//-----------------------------------------------------------------------------

/// Adaptor for table `population_genotype`.
///
/// Alleles are resolved through the genotype codes after fetching the genotypes.
#[derive(Debug)]
pub struct GenotypeAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
    genotype_codes: GenotypeCodeAdaptor,
    populations: PopulationAdaptor,
}

impl GenotypeAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        let genotype_codes = GenotypeCodeAdaptor::new(Rc::clone(&database_adaptor));
        let populations = PopulationAdaptor::new(Rc::clone(&database_adaptor));
        GenotypeAdaptor { database_adaptor, genotype_codes, populations }
    }

    /// Returns the genotypes of the variation, optionally restricted to a population.
    pub fn fetch_all_by_variation(&self, variation_id: u32, population: Option<&Population>) -> Result<Vec<Genotype>> {
        match population {
            Some(population) => self.fetch_all_by_constraint(
                Some("population_genotype.variation_id = ?1 AND population_genotype.population_id = ?2"),
                (variation_id, population.identifier)
            ),
            None => self.fetch_all_by_constraint(Some("population_genotype.variation_id = ?1"), (variation_id,)),
        }
    }

    /// Returns all genotypes observed in the population.
    pub fn fetch_all_by_population(&self, population: &Population) -> Result<Vec<Genotype>> {
        self.fetch_all_by_constraint(Some("population_genotype.population_id = ?1"), (population.identifier,))
    }
}

impl BaseAdaptor for GenotypeAdaptor {
    type Object = Genotype;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["population_genotype"],
        columns: &[
            "population_genotype.population_genotype_id", "population_genotype.variation_id",
            "population_genotype.subsnp_id", "population_genotype.genotype_code_id",
            "population_genotype.frequency", "population_genotype.population_id",
            "population_genotype.count",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY population_genotype.population_genotype_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("population_genotype.population_genotype_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Genotype> {
        Ok(Genotype {
            identifier: row.get(0)?,
            variation_identifier: row.get(1)?,
            subsnp_identifier: row.get(2)?,
            genotype_code_identifier: Some(row.get(3)?),
            alleles: Vec::new(),
            frequency: row.get(4)?,
            population_identifier: row.get(5)?,
            population: None,
            count: row.get(6)?,
        })
    }

    fn post_process(&self, objects: &mut [Genotype]) -> Result<()> {
        let code_ids: Vec<u32> = objects.iter().filter_map(|x| x.genotype_code_identifier).collect();
        let codes: HashMap<u32, GenotypeCode> = self.genotype_codes.fetch_all_by_identifiers(&code_ids)?
            .into_iter().map(|x| (x.identifier, x)).collect();
        let populations = self.populations.fetch_shared(objects.iter().filter_map(|x| x.population_identifier))?;

        for genotype in objects.iter_mut() {
            if let Some(code_id) = genotype.genotype_code_identifier {
                match codes.get(&code_id) {
                    Some(code) => genotype.alleles = code.alleles.clone(),
                    None => warn!("Genotype {} refers to missing genotype code {}", genotype.identifier, code_id),
                }
            }
            if let Some(population_id) = genotype.population_identifier {
                genotype.population = populations.get(&population_id).cloned();
            }
        }
        Ok(())
    }
}

//-----------------------------------------------------------------------------
