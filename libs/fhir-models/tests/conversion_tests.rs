use std::fs;
use std::path::PathBuf;
use strata_models::{
    json_to_xml, resource_from_json_str, resource_from_xml_str, xml_to_json, AuditEvent,
    CodeSystem, ConceptPropertyValue, Options, Resource,
};

/// Helper to get test data directory
fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

/// Discover all test cases that have both a JSON and an XML rendition
fn discover_test_cases() -> Vec<String> {
    let data_dir = test_data_dir();
    let mut cases: Vec<String> = fs::read_dir(&data_dir)
        .map(|entries| {
            entries
                .flatten()
                .filter_map(|entry| {
                    let name = entry.file_name().to_str()?.to_string();
                    let stem = name.strip_suffix(".json")?.to_string();
                    data_dir
                        .join(format!("{stem}.xml"))
                        .exists()
                        .then_some(stem)
                })
                .collect()
        })
        .unwrap_or_default();
    cases.sort();
    cases
}

/// Load both renditions, without the trailing newline of the files
fn load_test_files(base_name: &str) -> (String, String) {
    let read = |ext: &str| {
        let path = test_data_dir().join(format!("{base_name}.{ext}"));
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
            .trim_end()
            .to_string()
    };
    (read("json"), read("xml"))
}

#[test]
fn test_data_files_exist() {
    let cases = discover_test_cases();
    assert!(
        cases.len() >= 2,
        "expected paired fixtures in {}, found {:?}",
        test_data_dir().display(),
        cases
    );
}

#[test]
fn json_reencodes_byte_identical() {
    for case in discover_test_cases() {
        let (json, _) = load_test_files(&case);
        let resource = resource_from_json_str(&json)
            .unwrap_or_else(|e| panic!("{case}: failed to decode JSON: {e}"));
        let output = resource.to_json_string_pretty().unwrap();
        assert_eq!(output, json, "{case}: JSON re-encode differs");
    }
}

#[test]
fn xml_reencodes_byte_identical() {
    for case in discover_test_cases() {
        let (_, xml) = load_test_files(&case);
        let resource = resource_from_xml_str(&xml)
            .unwrap_or_else(|e| panic!("{case}: failed to decode XML: {e}"));
        let output = resource.to_xml_string().unwrap();
        assert_eq!(output, xml, "{case}: XML re-encode differs");
    }
}

#[test]
fn json_to_xml_matches_fixture() {
    for case in discover_test_cases() {
        let (json, xml) = load_test_files(&case);
        let output = json_to_xml(&json, &Options::default())
            .unwrap_or_else(|e| panic!("{case}: conversion failed: {e}"));
        assert_eq!(output, xml, "{case}: JSON -> XML differs");
    }
}

#[test]
fn xml_to_json_matches_fixture() {
    for case in discover_test_cases() {
        let (json, xml) = load_test_files(&case);
        let output = xml_to_json(&xml, &Options::default())
            .unwrap_or_else(|e| panic!("{case}: conversion failed: {e}"));
        assert_eq!(output, json, "{case}: XML -> JSON differs");
    }
}

#[test]
fn both_renditions_decode_to_the_same_model() {
    for case in discover_test_cases() {
        let (json, xml) = load_test_files(&case);
        let from_json = resource_from_json_str(&json).unwrap();
        let from_xml = resource_from_xml_str(&xml).unwrap();
        assert_eq!(from_json, from_xml, "{case}: models differ");
    }
}

#[test]
fn code_system_fixture_content() {
    let (json, _) = load_test_files("codesystem-choices");
    let cs: CodeSystem = strata_models::from_json_str(&json).unwrap();

    let profiles = &cs.meta.as_ref().unwrap().profile;
    assert_eq!(profiles.len(), 3);
    assert!(profiles[0].extension.is_empty());
    assert!(profiles[1].extension.is_empty());
    assert_eq!(
        profiles[2].extension[0].url(),
        Some("http://example.org/fhir/StructureDefinition/note")
    );

    assert_eq!(cs.contained.len(), 1);
    assert_eq!(cs.contained[0].resource_type(), "Communication");
    assert_eq!(cs.contained[0].id(), Some("note"));

    let concept = cs.find_concept("alpha").unwrap();
    let values: Vec<_> = concept
        .property
        .iter()
        .map(|p| p.value.clone().unwrap())
        .collect();
    assert!(matches!(values[0], ConceptPropertyValue::Code(ref c) if c.as_str() == Some("root")));
    assert!(matches!(values[1], ConceptPropertyValue::Coding(_)));
    assert!(matches!(values[2], ConceptPropertyValue::String(_)));
    assert!(matches!(values[3], ConceptPropertyValue::Integer(ref i) if i.value() == Some(&1)));
    assert!(matches!(values[4], ConceptPropertyValue::Boolean(ref b) if b.value() == Some(&false)));
    assert!(matches!(values[5], ConceptPropertyValue::DateTime(_)));
    match &values[6] {
        ConceptPropertyValue::Decimal(d) => assert_eq!(d.value().unwrap().to_string(), "1.50"),
        other => panic!("expected a decimal, got {other:?}"),
    }
}

#[test]
fn audit_event_fixture_content() {
    let (_, xml) = load_test_files("auditevent-login");
    let event: AuditEvent = strata_models::from_xml_str(&xml).unwrap();

    assert!(event.is_success());
    let agent = &event.agent[0];
    assert_eq!(agent.requestor.id.as_deref(), Some("req"));
    assert_eq!(agent.requestor.value(), Some(&true));
    assert_eq!(event.entity[0].detail.len(), 2);

    let resource = Resource::from(event);
    assert_eq!(resource.id(), Some("login"));
}
