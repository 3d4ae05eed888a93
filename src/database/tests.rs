use super::*;

use crate::internal;

//-----------------------------------------------------------------------------

#[test]
fn group_names() {
    for group in DatabaseGroup::ALL.iter() {
        let parsed = group.as_str().parse::<DatabaseGroup>();
        assert!(parsed.is_ok(), "Failed to parse group {}: {}", group, parsed.unwrap_err());
        assert_eq!(parsed.unwrap(), *group, "Wrong group for {}", group);
    }
    assert!("Core".parse::<DatabaseGroup>().is_err(), "Group names are case-sensitive");
    assert!("".parse::<DatabaseGroup>().is_err(), "Parsed an empty group name");

    assert!(DatabaseGroup::OtherFeatures.is_core_style());
    assert!(!DatabaseGroup::Variation.is_core_style());
    assert!(DatabaseGroup::ComparativeGenomics.is_multi_species());
    assert!(!DatabaseGroup::QualityCheck.is_multi_species());
}

//-----------------------------------------------------------------------------

fn check_name(name: &str, species: &str, group: DatabaseGroup, release: u32, assembly: Option<&str>, collection: bool) {
    let parsed = DatabaseName::parse(name);
    assert!(parsed.is_some(), "Failed to parse {}", name);
    let parsed = parsed.unwrap();
    assert_eq!(parsed.species, species, "Wrong species for {}", name);
    assert_eq!(parsed.group, group, "Wrong group for {}", name);
    assert_eq!(parsed.release, release, "Wrong release for {}", name);
    assert_eq!(parsed.assembly.as_deref(), assembly, "Wrong assembly for {}", name);
    assert_eq!(parsed.collection, collection, "Wrong collection flag for {}", name);
}

#[test]
fn database_names() {
    check_name("homo_sapiens_core_70_37", "homo_sapiens", DatabaseGroup::Core, 70, Some("37"), false);
    check_name("canis_familiaris_otherfeatures_68_31", "canis_familiaris", DatabaseGroup::OtherFeatures, 68, Some("31"), false);
    check_name("mus_musculus_qc_70_38", "mus_musculus", DatabaseGroup::QualityCheck, 70, Some("38"), false);
    check_name("gorilla_gorilla_gorilla_variation_70_3a", "gorilla_gorilla_gorilla", DatabaseGroup::Variation, 70, Some("3a"), false);
    check_name("protists_collection_core_70_1", "protists", DatabaseGroup::Core, 70, Some("1"), true);
    check_name("ensembl_compara_70", DatabaseName::MULTI_SPECIES, DatabaseGroup::ComparativeGenomics, 70, None, false);
    check_name("ensembl_ancestral_70", DatabaseName::ANCESTRAL_SPECIES, DatabaseGroup::Ancestral, 70, None, false);
}

#[test]
fn invalid_database_names() {
    let names = [
        "", "homo_sapiens", "homo_sapiens_core", "homo_sapiens_core_70",
        "homo_sapiens_unknown_70_37", "homo_sapiens_compara_70_37",
        "ensembl_core_70", "ensembl_compara", "HOMO_SAPIENS_CORE_70_37",
    ];
    for name in names {
        assert!(DatabaseName::parse(name).is_none(), "Parsed invalid name {}", name);
    }
}

//-----------------------------------------------------------------------------

#[test]
fn connection_files() {
    let dir = tempfile::tempdir().unwrap();
    let filename = dir.path().join("homo_sapiens_core_70_37.db");

    let missing = DatabaseConnection::open(&filename, true);
    assert!(matches!(missing, Err(EnsemblError::NotFound(_))), "Opened a missing database");

    let created = internal::create_database_file(&filename, DatabaseGroup::Core);
    assert!(!created.is_read_only());
    assert!(created.is_available(), "Created database is not available");
    assert_eq!(created.database_name().as_deref(), Some("homo_sapiens_core_70_37"));
    internal::fill_core_database(&created);
    drop(created);

    let again = DatabaseConnection::create(&filename);
    assert!(again.is_err(), "Created a database over an existing file");

    let first = DatabaseConnection::open(&filename, true);
    assert!(first.is_ok(), "Failed to open the database: {}", first.unwrap_err());
    let first = first.unwrap();
    assert!(first.is_read_only());
    let second = DatabaseConnection::open(&filename, true).unwrap();
    assert!(first.matches(&second), "Connections to the same file do not match");

    let names = first.production_names();
    assert!(names.is_ok(), "Failed to read production names: {}", names.unwrap_err());
    let expected = vec![(1, String::from(internal::CORE_SPECIES[0])), (2, String::from(internal::CORE_SPECIES[1]))];
    assert_eq!(names.unwrap(), expected, "Wrong production names");

    let write = first.connection().execute("DELETE FROM meta", ());
    assert!(write.is_err(), "Modified a read-only database");
}

#[test]
fn in_memory_connections() {
    let first = internal::create_database(DatabaseGroup::Core);
    let second = internal::create_database(DatabaseGroup::Core);
    assert!(first.filename().is_none(), "In-memory database has a filename");
    assert!(first.database_name().is_none(), "In-memory database has a name");
    assert!(first.matches(&first), "Connection does not match itself");
    assert!(!first.matches(&second), "Different in-memory databases match");
}

//-----------------------------------------------------------------------------

#[test]
fn adaptor_meta_values() {
    let connection = internal::core_connection();
    let human = DatabaseAdaptor::new(Rc::clone(&connection), internal::CORE_SPECIES[0], DatabaseGroup::Core, true, 1);
    let mouse = DatabaseAdaptor::new(Rc::clone(&connection), internal::CORE_SPECIES[1], DatabaseGroup::Core, true, 2);
    assert_eq!(Rc::strong_count(&connection), 3, "Adaptors do not share the connection");

    assert_eq!(human.schema_version().unwrap(), Some(70));
    assert_eq!(mouse.schema_version().unwrap(), Some(70), "Shared meta values do not apply to all species");
    assert_eq!(human.species_aliases().unwrap(), vec![String::from("human"), String::from("Homo sapiens")]);
    assert_eq!(mouse.species_aliases().unwrap(), vec![String::from("mouse")]);
    assert_eq!(human.meta_value("species.production_name").unwrap().as_deref(), Some(internal::CORE_SPECIES[0]));
    assert_eq!(human.meta_value("missing.key").unwrap(), None);

    assert!(!human.matches(&mouse), "Adaptors for different species match");
    let other = DatabaseAdaptor::new(Rc::clone(&connection), internal::CORE_SPECIES[0], DatabaseGroup::Core, true, 1);
    assert!(human.matches(&other), "Identical adaptors do not match");
}

#[test]
fn adaptor_species_identifier() {
    let connection = Rc::new(internal::create_database(DatabaseGroup::Variation));
    let dba = DatabaseAdaptor::new(connection, "homo_sapiens", DatabaseGroup::Variation, false, 0);
    assert_eq!(dba.species_identifier(), 1, "Species identifier 0 was not replaced");
    assert_eq!(dba.schema_version().unwrap(), None);
}

#[test]
fn invalid_schema_version() {
    let connection = internal::create_database(DatabaseGroup::Core);
    internal::insert_meta(&connection, None, "schema_version", "seventy");
    let dba = DatabaseAdaptor::new(Rc::new(connection), "homo_sapiens", DatabaseGroup::Core, false, 1);
    assert!(matches!(dba.schema_version(), Err(EnsemblError::Parse(_))), "Parsed an invalid schema version");
}

//-----------------------------------------------------------------------------
