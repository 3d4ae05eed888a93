use super::*;

use crate::{AssemblyAdaptor, DatabaseGroup, internal};
use crate::variation::{GenotypeCodeAdaptor, PopulationAdaptor};

use std::collections::BTreeSet;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

//-----------------------------------------------------------------------------

const JOINED: SelectStatement = SelectStatement {
    tables: &["allele a", "allele_code ac"],
    columns: &["a.allele_id", "ac.allele", "p.name"],
    left_join: &[("population p", "a.population_id = p.population_id")],
    default_condition: Some("a.allele_code_id = ac.allele_code_id"),
    final_condition: Some("ORDER BY a.allele_id"),
};

#[test]
fn build_statements() {
    assert_eq!(
        JOINED.build(None),
        "SELECT a.allele_id, ac.allele, p.name FROM (allele a, allele_code ac) \
        LEFT JOIN population p ON a.population_id = p.population_id \
        WHERE a.allele_code_id = ac.allele_code_id ORDER BY a.allele_id"
    );
    assert_eq!(
        JOINED.build(Some("a.variation_id = ?1")),
        "SELECT a.allele_id, ac.allele, p.name FROM (allele a, allele_code ac) \
        LEFT JOIN population p ON a.population_id = p.population_id \
        WHERE a.allele_code_id = ac.allele_code_id AND a.variation_id = ?1 ORDER BY a.allele_id"
    );

    let plain = SelectStatement {
        tables: &["assembly"],
        columns: &["assembly.asm_start"],
        left_join: &[],
        default_condition: None,
        final_condition: None,
    };
    assert_eq!(plain.build(None), "SELECT assembly.asm_start FROM assembly");
    assert_eq!(plain.build(Some("assembly.ori = 1")), "SELECT assembly.asm_start FROM assembly WHERE assembly.ori = 1");

    let single = SelectStatement {
        tables: &["genotype_code"],
        columns: &["genotype_code.genotype_code_id", "allele_code.allele"],
        left_join: &[("allele_code", "genotype_code.allele_code_id = allele_code.allele_code_id")],
        default_condition: None,
        final_condition: None,
    };
    assert_eq!(
        single.build(Some("genotype_code.genotype_code_id = ?1")),
        "SELECT genotype_code.genotype_code_id, allele_code.allele FROM genotype_code \
        LEFT JOIN allele_code ON genotype_code.allele_code_id = allele_code.allele_code_id \
        WHERE genotype_code.genotype_code_id = ?1"
    );
}

#[test]
fn build_count_statements() {
    assert_eq!(
        JOINED.build_count(Some("a.allele_id"), Some("a.variation_id = ?1")),
        "SELECT COUNT(DISTINCT a.allele_id) FROM (allele a, allele_code ac) \
        LEFT JOIN population p ON a.population_id = p.population_id \
        WHERE a.allele_code_id = ac.allele_code_id AND a.variation_id = ?1"
    );
    assert_eq!(
        AssemblyAdaptor::STATEMENT.build_count(None, None),
        "SELECT COUNT(*) FROM assembly"
    );
}

#[test]
fn identifier_lists() {
    assert_eq!(identifier_list(&[]), "");
    assert_eq!(identifier_list(&[42]), "42");
    assert_eq!(identifier_list(&[1, 2, 3]), "1, 2, 3");
}

//-----------------------------------------------------------------------------

// Creates a variation database with the given number of populations.
fn many_populations(count: u32) -> PopulationAdaptor {
    let connection = internal::create_database(DatabaseGroup::Variation);
    {
        let mut insert = connection.connection().prepare("INSERT INTO population(population_id, name, size) VALUES (?1, ?2, ?3)").unwrap();
        for id in 1..=count {
            let result = insert.execute((id, format!("population_{}", id), id % 100));
            assert!(result.is_ok(), "Failed to insert population {}: {}", id, result.unwrap_err());
        }
    }
    let dba = DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::Variation, false, 1);
    PopulationAdaptor::new(Rc::new(dba))
}

#[test]
fn fetch_by_identifiers_in_batches() {
    let count = 2 * PopulationAdaptor::MAXIMUM_IDENTIFIERS as u32 + 50;
    let adaptor = many_populations(count);

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut identifiers: Vec<u32> = Vec::new();
    for _ in 0..1000 {
        // Some identifiers are out of range, and many are duplicates.
        identifiers.push(rng.gen_range(1..=count + 100));
    }
    let expected: BTreeSet<u32> = identifiers.iter().copied().filter(|id| *id <= count).collect();

    let populations = adaptor.fetch_all_by_identifiers(&identifiers);
    assert!(populations.is_ok(), "Failed to fetch populations: {}", populations.unwrap_err());
    let populations = populations.unwrap();
    assert_eq!(populations.len(), expected.len(), "Wrong number of populations");
    let found: BTreeSet<u32> = populations.iter().map(|x| x.identifier).collect();
    assert_eq!(found, expected, "Wrong populations");
    for population in populations.iter() {
        assert_eq!(population.name, format!("population_{}", population.identifier), "Wrong name for population {}", population.identifier);
    }

    let empty = adaptor.fetch_all_by_identifiers(&[]);
    assert!(empty.is_ok(), "Failed to fetch no populations: {}", empty.unwrap_err());
    assert!(empty.unwrap().is_empty(), "Found populations without identifiers");
}

#[test]
fn fetch_and_count() {
    let adaptor = many_populations(120);
    assert_eq!(adaptor.count_all().unwrap(), 120);
    assert_eq!(adaptor.count_by_constraint(Some("population.size = ?1"), (20,)).unwrap(), 2);
    assert_eq!(adaptor.fetch_all().unwrap().len(), 120);

    let identifiers = adaptor.retrieve_all_identifiers();
    assert!(identifiers.is_ok(), "Failed to retrieve identifiers: {}", identifiers.unwrap_err());
    assert_eq!(identifiers.unwrap(), (1..=120).collect::<Vec<u32>>(), "Wrong identifiers");

    let population = adaptor.fetch_by_identifier(17);
    assert!(population.is_ok(), "Failed to fetch population 17: {}", population.unwrap_err());
    assert_eq!(population.unwrap().map(|x| x.name), Some(String::from("population_17")));
    assert_eq!(adaptor.fetch_by_identifier(121).unwrap(), None, "Found a missing population");
}

#[test]
fn multi_row_objects() {
    let adaptor = GenotypeCodeAdaptor::new(internal::variation_database());
    // Seven rows but four genotype codes.
    assert_eq!(adaptor.count_all().unwrap(), 4, "Counted rows instead of genotype codes");
    assert_eq!(adaptor.fetch_all().unwrap().len(), 4);
    assert_eq!(adaptor.retrieve_all_identifiers().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn no_primary_key() {
    let adaptor = AssemblyAdaptor::new(internal::core_database());
    assert!(matches!(adaptor.fetch_by_identifier(1), Err(EnsemblError::InvalidInput(_))), "Fetched by identifier without a primary key");
    assert!(adaptor.fetch_all_by_identifiers(&[1, 2]).is_err(), "Fetched by identifiers without a primary key");
    assert!(adaptor.retrieve_all_identifiers().is_err(), "Retrieved identifiers without a primary key");
    assert_eq!(adaptor.count_all().unwrap(), 3, "Wrong number of assembly rows");
}

#[test]
fn invalid_constraint() {
    let adaptor = many_populations(3);
    let result = adaptor.fetch_all_by_constraint(Some("population.no_such_column = ?1"), (1,));
    assert!(matches!(result, Err(EnsemblError::Database(_))), "Invalid constraint did not fail");
}

//-----------------------------------------------------------------------------
