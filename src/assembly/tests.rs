use super::*;

use crate::{DatabaseGroup, internal};

//-----------------------------------------------------------------------------

fn create_assembly(values: (u32, u32, u32, u32, u32, u32, i8)) -> Assembly {
    let assembly = Assembly::new(values.0, values.1, values.2, values.3, values.4, values.5, values.6);
    assert!(assembly.is_ok(), "Failed to create assembly {:?}: {}", values, assembly.unwrap_err());
    assembly.unwrap()
}

#[test]
fn invalid_assemblies() {
    assert!(Assembly::new(1, 200, 101, 2, 1, 100, 1).is_err(), "Created an assembly with an empty interval");
    assert!(Assembly::new(1, 101, 200, 2, 1, 99, 1).is_err(), "Created an assembly with different lengths");
    assert!(Assembly::new(1, 101, 200, 2, 1, 100, 0).is_err(), "Created an assembly without orientation");
}

#[test]
fn forward_mapping() {
    let assembly = create_assembly((1, 1001, 1100, 7, 51, 150, 1));
    assert_eq!(assembly.assembled_length(), 100);
    assert_eq!(assembly.component_length(), 100);
    for offset in 0..100 {
        assert_eq!(assembly.map_assembled_to_component(1001 + offset), Some(51 + offset), "Wrong component position for offset {}", offset);
        assert_eq!(assembly.map_component_to_assembled(51 + offset), Some(1001 + offset), "Wrong assembled position for offset {}", offset);
    }
    assert_eq!(assembly.map_assembled_to_component(1000), None);
    assert_eq!(assembly.map_component_to_assembled(151), None);
}

#[test]
fn reverse_mapping() {
    let assembly = create_assembly((1, 401, 700, 3, 1, 300, -1));
    assert_eq!(assembly.map_assembled_to_component(401), Some(300));
    assert_eq!(assembly.map_assembled_to_component(700), Some(1));
    for position in 401..=700 {
        let component = assembly.map_assembled_to_component(position);
        assert!(component.is_some(), "No component position for {}", position);
        assert_eq!(assembly.map_component_to_assembled(component.unwrap()), Some(position), "Mapping is not reversible at {}", position);
    }
}

#[test]
fn overlaps() {
    let assembly = create_assembly((1, 401, 700, 3, 1, 300, -1));
    assert!(assembly.overlaps_assembled(1, 401));
    assert!(assembly.overlaps_assembled(700, 800));
    assert!(assembly.overlaps_assembled(500, 600));
    assert!(!assembly.overlaps_assembled(1, 400));
    assert!(!assembly.overlaps_assembled(701, 1000));
}

//-----------------------------------------------------------------------------

fn check_assemblies(result: Result<Vec<Assembly>>, expected: &[Assembly], test_case: &str) {
    assert!(result.is_ok(), "Failed to fetch assemblies ({}): {}", test_case, result.unwrap_err());
    assert_eq!(result.unwrap(), expected, "Wrong assemblies ({})", test_case);
}

#[test]
fn fetch_by_region() {
    let adaptor = AssemblyAdaptor::new(internal::core_database());
    let first = create_assembly((1, 1, 300, 2, 1, 300, 1));
    let second = create_assembly((1, 401, 700, 3, 1, 300, -1));

    check_assemblies(adaptor.fetch_all_by_assembled(1, None), &[first.clone(), second.clone()], "chromosome");
    check_assemblies(adaptor.fetch_all_by_assembled(1, Some(250..=450)), &[first.clone(), second.clone()], "both contigs");
    check_assemblies(adaptor.fetch_all_by_assembled(1, Some(301..=400)), &[], "gap");
    check_assemblies(adaptor.fetch_all_by_assembled(1, Some(700..=800)), &[second.clone()], "end");
    check_assemblies(adaptor.fetch_all_by_assembled(2, None), &[], "contig");
    check_assemblies(adaptor.fetch_all_by_component(3), &[second], "component");
    check_assemblies(adaptor.fetch_all_by_component(1), &[], "not a component");
}

#[test]
fn fetch_by_name() {
    let connection = internal::core_connection();
    let human = AssemblyAdaptor::new(Rc::new(DatabaseAdaptor::new(
        Rc::clone(&connection), internal::CORE_SPECIES[0], DatabaseGroup::Core, true, 1
    )));
    let mouse = AssemblyAdaptor::new(Rc::new(DatabaseAdaptor::new(
        Rc::clone(&connection), internal::CORE_SPECIES[1], DatabaseGroup::Core, true, 2
    )));

    let human_chr1 = [
        create_assembly((1, 1, 300, 2, 1, 300, 1)),
        create_assembly((1, 401, 700, 3, 1, 300, -1)),
    ];
    let mouse_chr1 = [create_assembly((4, 101, 400, 5, 1, 300, 1))];

    check_assemblies(human.fetch_all_by_assembled_name("chromosome", None, "1"), &human_chr1, "human, any version");
    check_assemblies(human.fetch_all_by_assembled_name("chromosome", Some("GRCh37"), "1"), &human_chr1, "human, GRCh37");
    check_assemblies(human.fetch_all_by_assembled_name("chromosome", Some("GRCh38"), "1"), &[], "human, GRCh38");
    check_assemblies(human.fetch_all_by_assembled_name("chromosome", None, "2"), &[], "human, chromosome 2");
    check_assemblies(mouse.fetch_all_by_assembled_name("chromosome", None, "1"), &mouse_chr1, "mouse");
    check_assemblies(mouse.fetch_all_by_assembled_name("contig", None, "AC000003"), &[], "mouse contig");
}

//-----------------------------------------------------------------------------
