use crate::{BaseAdaptor, DatabaseAdaptor, Result, SelectStatement};

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use rusqlite::Row;

//-----------------------------------------------------------------------------

/// A population in table `population`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Population {
    pub identifier: u32,
    pub name: String,
    /// Number of individuals, if known.
    pub size: Option<u32>,
    pub description: Option<String>,
    /// Were the allele frequencies calculated from genotypes?
    pub frequencies_from_genotypes: bool,
    /// Display group on the web site.
    pub display_group: Option<String>,
}

//-----------------------------------------------------------------------------

/// Adaptor for table `population`.
#[derive(Debug)]
pub struct PopulationAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl PopulationAdaptor {
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        PopulationAdaptor { database_adaptor }
    }

    /// Returns the population with the given name, or [`None`] if there is no such population.
    pub fn fetch_by_name(&self, name: &str) -> Result<Option<Population>> {
        let mut populations = self.fetch_all_by_constraint(Some("population.name = ?1"), (name,))?;
        if populations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(populations.swap_remove(0)))
        }
    }

    /// Returns the populations with names matching the SQL `LIKE` pattern.
    pub fn fetch_all_by_name_search(&self, pattern: &str) -> Result<Vec<Population>> {
        self.fetch_all_by_constraint(Some("population.name LIKE ?1"), (pattern,))
    }

    /// Returns shared population objects for the given identifiers.
    ///
    /// Missing populations are not included in the result.
    pub(crate) fn fetch_shared<I: IntoIterator<Item = u32>>(&self, identifiers: I) -> Result<HashMap<u32, Rc<Population>>> {
        let identifiers: Vec<u32> = identifiers.into_iter().collect::<BTreeSet<u32>>().into_iter().collect();
        if identifiers.is_empty() {
            return Ok(HashMap::new());
        }
        let populations = self.fetch_all_by_identifiers(&identifiers)?;
        Ok(populations.into_iter().map(|x| (x.identifier, Rc::new(x))).collect())
    }
}

impl BaseAdaptor for PopulationAdaptor {
    type Object = Population;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["population"],
        columns: &[
            "population.population_id", "population.name", "population.size",
            "population.description", "population.freqs_from_gts", "population.display",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY population.population_id"),
    };

    const PRIMARY_KEY: Option<&'static str> = Some("population.population_id");

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Population> {
        Ok(Population {
            identifier: row.get(0)?,
            name: row.get(1)?,
            size: row.get(2)?,
            description: row.get(3)?,
            frequencies_from_genotypes: row.get(4)?,
            display_group: row.get(5)?,
        })
    }
}

//-----------------------------------------------------------------------------
