use crate::{DatabaseAdaptor, DatabaseConnection, DatabaseGroup, schema};

use std::path::Path;
use std::rc::Rc;

//-----------------------------------------------------------------------------

// Creating databases.

pub(crate) fn create_database(group: DatabaseGroup) -> DatabaseConnection {
    let connection = DatabaseConnection::in_memory();
    assert!(connection.is_ok(), "Failed to create an in-memory database: {}", connection.unwrap_err());
    let connection = connection.unwrap();
    let result = schema::create_schema(connection.connection(), group);
    assert!(result.is_ok(), "Failed to create the {} schema: {}", group, result.unwrap_err());
    connection
}

pub(crate) fn create_database_file(filename: &Path, group: DatabaseGroup) -> DatabaseConnection {
    let connection = DatabaseConnection::create(filename);
    assert!(connection.is_ok(), "Failed to create database {}: {}", filename.display(), connection.unwrap_err());
    let connection = connection.unwrap();
    let result = schema::create_schema(connection.connection(), group);
    assert!(result.is_ok(), "Failed to create the {} schema: {}", group, result.unwrap_err());
    connection
}

pub(crate) fn execute_all(connection: &DatabaseConnection, statements: &[&str]) {
    for statement in statements {
        let result = connection.connection().execute(statement, ());
        assert!(result.is_ok(), "Failed to execute {}: {}", statement, result.unwrap_err());
    }
}

pub(crate) fn insert_meta(connection: &DatabaseConnection, species_id: Option<u32>, key: &str, value: &str) {
    let result = schema::insert_meta(connection.connection(), species_id, key, value);
    assert!(result.is_ok(), "Failed to insert meta key {}: {}", key, result.unwrap_err());
}

//-----------------------------------------------------------------------------

// Core databases.

// Two species share the tables. Chromosome 1 of species 1 consists of contigs 2 and 3,
// with contig 3 in reverse orientation. Chromosome 1 of species 2 consists of contig 5.
const CORE_ROWS: [&str; 13] = [
    "INSERT INTO coord_system(coord_system_id, species_id, name, version, rank) VALUES (1, 1, 'chromosome', 'GRCh37', 1)",
    "INSERT INTO coord_system(coord_system_id, species_id, name, version, rank) VALUES (2, 1, 'contig', NULL, 2)",
    "INSERT INTO coord_system(coord_system_id, species_id, name, version, rank) VALUES (3, 2, 'chromosome', 'GRCm38', 1)",
    "INSERT INTO coord_system(coord_system_id, species_id, name, version, rank) VALUES (4, 2, 'contig', NULL, 2)",
    "INSERT INTO seq_region(seq_region_id, name, coord_system_id, length) VALUES (1, '1', 1, 1000)",
    "INSERT INTO seq_region(seq_region_id, name, coord_system_id, length) VALUES (2, 'AC000001', 2, 300)",
    "INSERT INTO seq_region(seq_region_id, name, coord_system_id, length) VALUES (3, 'AC000002', 2, 300)",
    "INSERT INTO seq_region(seq_region_id, name, coord_system_id, length) VALUES (4, '1', 3, 500)",
    "INSERT INTO seq_region(seq_region_id, name, coord_system_id, length) VALUES (5, 'AC000003', 4, 300)",
    "INSERT INTO assembly VALUES (1, 2, 1, 300, 1, 300, 1)",
    "INSERT INTO assembly VALUES (1, 3, 401, 700, 1, 300, -1)",
    "INSERT INTO assembly VALUES (4, 5, 101, 400, 1, 300, 1)",
    "INSERT INTO meta(species_id, meta_key, meta_value) VALUES (NULL, 'schema_version', '70')",
];

pub(crate) const CORE_SPECIES: [&str; 2] = ["homo_sapiens", "mus_musculus"];

// Fills a core database with two species.
pub(crate) fn fill_core_database(connection: &DatabaseConnection) {
    execute_all(connection, &CORE_ROWS);
    insert_meta(connection, Some(1), "species.production_name", CORE_SPECIES[0]);
    insert_meta(connection, Some(1), "species.alias", "human");
    insert_meta(connection, Some(1), "species.alias", "Homo sapiens");
    insert_meta(connection, Some(2), "species.production_name", CORE_SPECIES[1]);
    insert_meta(connection, Some(2), "species.alias", "mouse");
}

pub(crate) fn core_connection() -> Rc<DatabaseConnection> {
    let connection = create_database(DatabaseGroup::Core);
    fill_core_database(&connection);
    Rc::new(connection)
}

// Adaptor for the first species in a multi-species core database.
pub(crate) fn core_database() -> Rc<DatabaseAdaptor> {
    Rc::new(DatabaseAdaptor::new(core_connection(), CORE_SPECIES[0], DatabaseGroup::Core, true, 1))
}

//-----------------------------------------------------------------------------

// Variation databases.

// Variation 10 has alleles and genotypes in populations 1 and 2.
// Variation 11 has an allele without a population and a genotype with a missing genotype code.
const VARIATION_ROWS: [&str; 27] = [
    "INSERT INTO population VALUES (1, 'CEU', 85, 'Utah residents with European ancestry', 1, '1000 Genomes')",
    "INSERT INTO population VALUES (2, 'YRI', 88, NULL, 0, NULL)",
    "INSERT INTO population VALUES (3, 'CHB', NULL, NULL, 0, NULL)",
    "INSERT INTO allele_code VALUES (1, 'A')",
    "INSERT INTO allele_code VALUES (2, 'G')",
    "INSERT INTO allele_code VALUES (3, 'C')",
    "INSERT INTO allele_code VALUES (4, 'T')",
    "INSERT INTO allele VALUES (1, 10, 100, 1, 1, 0.75, 30)",
    "INSERT INTO allele VALUES (2, 10, 100, 2, 1, 0.25, 10)",
    "INSERT INTO allele VALUES (3, 10, 101, 1, 2, 0.5, 44)",
    "INSERT INTO allele VALUES (4, 10, 101, 2, 2, 0.5, 44)",
    "INSERT INTO allele VALUES (5, 11, NULL, 3, NULL, NULL, NULL)",
    "INSERT INTO allele VALUES (6, 11, 102, 4, 1, 1.0, 40)",
    // 1 = A/A, 2 = A/G, 3 = G|A, 4 = C.
    "INSERT INTO genotype_code VALUES (1, 1, 1, NULL)",
    "INSERT INTO genotype_code VALUES (1, 1, 2, NULL)",
    "INSERT INTO genotype_code VALUES (2, 1, 1, NULL)",
    "INSERT INTO genotype_code VALUES (2, 2, 2, NULL)",
    "INSERT INTO genotype_code VALUES (3, 2, 1, 1)",
    "INSERT INTO genotype_code VALUES (3, 1, 2, 1)",
    "INSERT INTO genotype_code VALUES (4, 3, 1, NULL)",
    "INSERT INTO population_genotype VALUES (1, 10, 100, 1, 0.5, 1, 20)",
    "INSERT INTO population_genotype VALUES (2, 10, 100, 2, 0.5, 1, 20)",
    "INSERT INTO population_genotype VALUES (3, 10, 101, 3, 1.0, 2, 44)",
    "INSERT INTO population_genotype VALUES (4, 11, NULL, 9, NULL, NULL, NULL)",
    "INSERT INTO population_genotype VALUES (5, 11, 102, 4, 1.0, 1, 40)",
    "INSERT INTO meta(species_id, meta_key, meta_value) VALUES (NULL, 'schema_version', '70')",
    "INSERT INTO meta(species_id, meta_key, meta_value) VALUES (1, 'species.production_name', 'homo_sapiens')",
];

pub(crate) fn fill_variation_database(connection: &DatabaseConnection) {
    execute_all(connection, &VARIATION_ROWS);
}

pub(crate) fn variation_database() -> Rc<DatabaseAdaptor> {
    let connection = create_database(DatabaseGroup::Variation);
    fill_variation_database(&connection);
    Rc::new(DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::Variation, false, 1))
}

//-----------------------------------------------------------------------------

// Quality-check databases.

// Sequence database 1 has two versions of a transcript, and sequence database 2 has a chromosome.
const QUALITY_CHECK_ROWS: [&str; 3] = [
    "INSERT INTO sequence(sequence_id, sequence_db_id, name, accession, version, type, length, cds_start, cds_end, cds_strand, polya_length, description)
    VALUES (1, 1, 'NM_000014.4', 'NM_000014', 4, 'mRNA', 4610, 71, 4495, 1, 22, 'alpha-2-macroglobulin')",
    "INSERT INTO sequence(sequence_id, sequence_db_id, name, accession, version, type, length, cds_start, cds_end, cds_strand, polya_length, description)
    VALUES (2, 1, 'NM_000014.5', 'NM_000014', 5, 'mRNA', 4638, 71, 4495, 1, 22, 'alpha-2-macroglobulin')",
    "INSERT INTO sequence(sequence_id, sequence_db_id, name, accession, version, type, length)
    VALUES (3, 2, '12', '12', NULL, 'dna', 133851895)",
];

pub(crate) fn fill_quality_check_database(connection: &DatabaseConnection) {
    execute_all(connection, &QUALITY_CHECK_ROWS);
}

pub(crate) fn quality_check_database() -> Rc<DatabaseAdaptor> {
    let connection = create_database(DatabaseGroup::QualityCheck);
    fill_quality_check_database(&connection);
    Rc::new(DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::QualityCheck, false, 1))
}

//-----------------------------------------------------------------------------
