//! SQLite rendition of the Ensembl schema.
//!
//! Only the tables used by the adaptors in this crate are created.
//! Column names follow the Ensembl schema, while the types are SQLite types.

use crate::{DatabaseGroup, Result};

use rusqlite::Connection;
use tracing::debug;

//-----------------------------------------------------------------------------

const META_TABLE: &str =
    "CREATE TABLE meta (
        meta_id INTEGER PRIMARY KEY,
        species_id INTEGER DEFAULT 1,
        meta_key TEXT NOT NULL,
        meta_value TEXT NOT NULL
    ) STRICT";

const CORE_TABLES: [&str; 4] = [
    "CREATE TABLE coord_system (
        coord_system_id INTEGER PRIMARY KEY,
        species_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        version TEXT,
        rank INTEGER NOT NULL,
        attrib TEXT
    ) STRICT",
    "CREATE TABLE seq_region (
        seq_region_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        coord_system_id INTEGER NOT NULL,
        length INTEGER NOT NULL
    ) STRICT",
    "CREATE TABLE assembly (
        asm_seq_region_id INTEGER NOT NULL,
        cmp_seq_region_id INTEGER NOT NULL,
        asm_start INTEGER NOT NULL,
        asm_end INTEGER NOT NULL CHECK (asm_start <= asm_end),
        cmp_start INTEGER NOT NULL,
        cmp_end INTEGER NOT NULL CHECK (cmp_start <= cmp_end),
        ori INTEGER NOT NULL,
        UNIQUE (asm_seq_region_id, cmp_seq_region_id, asm_start, asm_end, cmp_start, cmp_end, ori)
    ) STRICT",
    "CREATE INDEX assembly_component ON assembly(cmp_seq_region_id)",
];

const VARIATION_TABLES: [&str; 7] = [
    "CREATE TABLE population (
        population_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        size INTEGER,
        description TEXT,
        freqs_from_gts INTEGER NOT NULL DEFAULT 0,
        display TEXT
    ) STRICT",
    "CREATE TABLE allele_code (
        allele_code_id INTEGER PRIMARY KEY,
        allele TEXT NOT NULL UNIQUE
    ) STRICT",
    "CREATE TABLE allele (
        allele_id INTEGER PRIMARY KEY,
        variation_id INTEGER NOT NULL,
        subsnp_id INTEGER,
        allele_code_id INTEGER NOT NULL,
        population_id INTEGER,
        frequency REAL,
        count INTEGER
    ) STRICT",
    "CREATE INDEX allele_variation ON allele(variation_id)",
    "CREATE TABLE genotype_code (
        genotype_code_id INTEGER NOT NULL,
        allele_code_id INTEGER NOT NULL,
        haplotype_id INTEGER NOT NULL,
        phased INTEGER,
        PRIMARY KEY (genotype_code_id, haplotype_id)
    ) STRICT",
    "CREATE TABLE population_genotype (
        population_genotype_id INTEGER PRIMARY KEY,
        variation_id INTEGER NOT NULL,
        subsnp_id INTEGER,
        genotype_code_id INTEGER NOT NULL,
        frequency REAL,
        population_id INTEGER,
        count INTEGER
    ) STRICT",
    "CREATE INDEX population_genotype_variation ON population_genotype(variation_id)",
];

const QUALITY_CHECK_TABLES: [&str; 4] = [
    "CREATE TABLE sequence (
        sequence_id INTEGER PRIMARY KEY,
        sequence_db_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        accession TEXT NOT NULL,
        version INTEGER,
        type TEXT,
        length INTEGER NOT NULL DEFAULT 0,
        cds_start INTEGER NOT NULL DEFAULT 0,
        cds_end INTEGER NOT NULL DEFAULT 0,
        cds_strand INTEGER NOT NULL DEFAULT 0,
        polya_length INTEGER NOT NULL DEFAULT 0,
        description TEXT
    ) STRICT",
    "CREATE TABLE das_feature (
        das_feature_id INTEGER PRIMARY KEY,
        analysis_id INTEGER NOT NULL,
        alignment_id INTEGER NOT NULL,
        object_sequence_id INTEGER NOT NULL,
        object_start INTEGER NOT NULL,
        object_end INTEGER NOT NULL,
        segment_sequence_id INTEGER NOT NULL,
        segment_start INTEGER NOT NULL,
        segment_end INTEGER NOT NULL,
        segment_strand INTEGER NOT NULL,
        phase INTEGER NOT NULL DEFAULT 0,
        category TEXT NOT NULL,
        type TEXT NOT NULL
    ) STRICT",
    "CREATE TABLE variation (
        variation_id INTEGER PRIMARY KEY,
        analysis_id INTEGER NOT NULL,
        alignment_id INTEGER NOT NULL,
        query_db_id INTEGER NOT NULL,
        query_id INTEGER NOT NULL,
        query_start INTEGER NOT NULL,
        query_end INTEGER NOT NULL,
        query_seq TEXT NOT NULL,
        target_db_id INTEGER NOT NULL,
        target_id INTEGER NOT NULL,
        target_start INTEGER NOT NULL,
        target_end INTEGER NOT NULL,
        target_seq TEXT NOT NULL,
        class TEXT NOT NULL,
        type TEXT NOT NULL,
        state TEXT NOT NULL
    ) STRICT",
    "CREATE TABLE submission (
        submission_id INTEGER PRIMARY KEY,
        analysis_id INTEGER NOT NULL,
        query_db_id INTEGER NOT NULL,
        query_id INTEGER NOT NULL,
        target_db_id INTEGER NOT NULL,
        target_id INTEGER NOT NULL,
        target_start INTEGER NOT NULL,
        target_end INTEGER NOT NULL,
        target_strand INTEGER NOT NULL,
        analysis_job_id INTEGER NOT NULL
    ) STRICT",
];

//-----------------------------------------------------------------------------

/// Creates the tables for a database of the given group.
///
/// Every group gets the `meta` table.
/// Core-style groups also get the assembly tables, variation databases the allele and genotype tables, and quality-check databases the sequence and result tables.
/// Other groups only have the `meta` table.
///
/// Passes through any database errors, including errors from already existing tables.
pub fn create_schema(connection: &Connection, group: DatabaseGroup) -> Result<()> {
    debug!("Creating {} schema", group);
    connection.execute(META_TABLE, ())?;
    let tables: &[&str] = if group.is_core_style() {
        &CORE_TABLES
    } else if group == DatabaseGroup::Variation {
        &VARIATION_TABLES
    } else if group == DatabaseGroup::QualityCheck {
        &QUALITY_CHECK_TABLES
    } else {
        &[]
    };
    for statement in tables {
        connection.execute(statement, ())?;
    }
    Ok(())
}

/// Inserts a key-value pair into the `meta` table.
///
/// Pairs without a species identifier apply to all species in the database.
pub fn insert_meta(connection: &Connection, species_id: Option<u32>, key: &str, value: &str) -> Result<()> {
    let mut insert = connection.prepare_cached(
        "INSERT INTO meta(species_id, meta_key, meta_value) VALUES (?1, ?2, ?3)"
    )?;
    insert.execute((species_id, key, value))?;
    Ok(())
}

//-----------------------------------------------------------------------------
