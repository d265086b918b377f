use serde_json::json;
use strata_models::{
    from_json_str, from_json_str_with, from_json_value, from_xml_str, resource_from_json_str,
    resource_from_json_value, resource_from_json_value_with, resource_from_xml_str,
    resource_from_xml_str_with, to_json_string, to_json_value, to_xml_string, to_xml_string_with,
    Attachment, CodeSystem, CodeSystemConcept, CodeSystemConceptProperty, Coding, Communication,
    CommunicationPayload, CommunicationPayloadContent, ConceptPropertyValue, Error, Extension,
    ExtensionValue, FhirCode, FhirDecimal, FhirMarkdown, FhirString, FhirUri, Narrative, Options,
    Reference, Resource,
};

fn note(text: &str) -> Extension {
    Extension::new(
        "http://example.org/fhir/StructureDefinition/note",
        ExtensionValue::String(FhirString::from(text)),
    )
}

// ============================================================================
// Primitive metadata
// ============================================================================

#[test]
fn primitive_with_extension_and_no_value() {
    let mut communication = Communication::new("completed");
    communication.status = FhirCode::extension_only(vec![note("withheld")]);

    let value = to_json_value(&communication).unwrap();
    assert!(value.get("status").is_none());
    assert_eq!(
        value["_status"]["extension"][0]["valueString"],
        json!("withheld")
    );

    let back: Communication = from_json_value(&value).unwrap();
    assert_eq!(back, communication);

    let xml = to_xml_string(&communication).unwrap();
    assert!(xml.contains("<status>"));
    assert!(!xml.contains("<status value="));
    let back: Communication = from_xml_str(&xml).unwrap();
    assert_eq!(back, communication);
}

#[test]
fn primitive_list_metadata_is_aligned() {
    let mut communication = Communication::new("completed");
    communication.instantiates_uri = vec![
        "http://example.org/a".into(),
        FhirString::from("http://example.org/b").with_id("b"),
        "http://example.org/c".into(),
    ];

    let value = to_json_value(&communication).unwrap();
    assert_eq!(value["_instantiatesUri"], json!([null, { "id": "b" }]));

    let back: Communication = from_json_value(&value).unwrap();
    assert_eq!(back.instantiates_uri, communication.instantiates_uri);
}

#[test]
fn metadata_array_longer_than_values_adds_elements() {
    let input = json!({
        "resourceType": "Communication",
        "status": "completed",
        "instantiatesUri": ["http://example.org/a"],
        "_instantiatesUri": [null, { "id": "second" }]
    });
    let communication: Communication = from_json_value(&input).unwrap();
    assert_eq!(communication.instantiates_uri.len(), 2);
    assert_eq!(communication.instantiates_uri[1].value, None);
    assert_eq!(communication.instantiates_uri[1].id.as_deref(), Some("second"));

    let value = to_json_value(&communication).unwrap();
    assert_eq!(value["instantiatesUri"], json!(["http://example.org/a", null]));
}

#[test]
fn extension_only_list_keeps_a_values_array() {
    let mut communication = Communication::new("completed");
    communication.instantiates_uri = vec![
        FhirUri::extension_only(vec![note("first")]),
        FhirUri::extension_only(vec![note("second")]),
    ];

    let value = to_json_value(&communication).unwrap();
    assert_eq!(value["instantiatesUri"], json!([null, null]));
    assert_eq!(value["_instantiatesUri"].as_array().map(Vec::len), Some(2));

    let back: Communication = from_json_value(&value).unwrap();
    assert_eq!(back, communication);
}

#[test]
fn multi_line_text_survives_xml() {
    let mut code_system = CodeSystem::new("http://example.org/cs", "active", "complete");
    code_system.description = Some(FhirMarkdown::from("line one\nline two\r\n\tindented"));

    let xml = to_xml_string(&code_system).unwrap();
    assert!(xml.contains(r#"<description value="line one&#xA;line two&#xD;&#xA;&#x9;indented"/>"#));
    let back: CodeSystem = from_xml_str(&xml).unwrap();
    assert_eq!(back, code_system);
}

#[test]
fn decimal_precision_survives_both_formats() {
    let mut code_system = CodeSystem::new("http://example.org/cs", "active", "complete");
    let mut concept = CodeSystemConcept::new("w", "Weight");
    concept.property.push(CodeSystemConceptProperty::new(
        "weight",
        ConceptPropertyValue::Decimal(FhirDecimal::new("3.1400".parse().unwrap())),
    ));
    code_system.concept.push(concept);

    let json = to_json_string(&code_system).unwrap();
    assert!(json.contains(r#""valueDecimal":3.1400"#));
    let xml = to_xml_string(&code_system).unwrap();
    assert!(xml.contains(r#"<valueDecimal value="3.1400"/>"#));

    let from_json: CodeSystem = from_json_str(&json).unwrap();
    let from_xml: CodeSystem = from_xml_str(&xml).unwrap();
    assert_eq!(from_json, code_system);
    assert_eq!(from_xml, code_system);
}

#[test]
fn decimal_that_would_be_rounded_is_rejected() {
    let input = r#"{"resourceType":"CodeSystem","status":"active","content":"complete",
        "concept":[{"code":"w","property":[{"code":"weight","valueDecimal":0.12345678901234567890123456789012}]}]}"#;
    let err = from_json_str::<CodeSystem>(input).unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { expected: "decimal", .. }));

    let xml = r#"<CodeSystem xmlns="http://hl7.org/fhir"><concept><code value="w"/><property><code value="weight"/><valueDecimal value="0.12345678901234567890123456789012"/></property></concept></CodeSystem>"#;
    let err = from_xml_str::<CodeSystem>(xml).unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { expected: "decimal", .. }));
}

#[test]
fn wrong_json_type_for_primitive_is_an_error() {
    let input = r#"{"resourceType":"CodeSystem","status":"active","content":"complete","count":"many"}"#;
    let err = from_json_str::<CodeSystem>(input).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "count"));
}

// ============================================================================
// Choice fields
// ============================================================================

#[test]
fn payload_choice_round_trips() {
    let mut communication = Communication::new("completed");
    communication.payload = vec![
        CommunicationPayload::new(CommunicationPayloadContent::String("hello".into())),
        CommunicationPayload::new(CommunicationPayloadContent::Attachment(Attachment {
            content_type: Some("text/plain".into()),
            title: Some("note.txt".into()),
            ..Attachment::default()
        })),
        CommunicationPayload::new(CommunicationPayloadContent::Reference(Reference::new(
            "DocumentReference/1",
        ))),
    ];

    let value = to_json_value(&communication).unwrap();
    assert_eq!(value["payload"][0]["contentString"], json!("hello"));
    assert_eq!(value["payload"][1]["contentAttachment"]["title"], json!("note.txt"));
    assert_eq!(
        value["payload"][2]["contentReference"]["reference"],
        json!("DocumentReference/1")
    );

    let back: Communication = from_json_value(&value).unwrap();
    assert_eq!(back, communication);

    let xml = to_xml_string(&communication).unwrap();
    assert!(xml.contains(r#"<contentString value="hello"/>"#));
    let back: Communication = from_xml_str(&xml).unwrap();
    assert_eq!(back, communication);
}

#[test]
fn choice_primitive_keeps_its_metadata() {
    let input = json!({
        "resourceType": "Communication",
        "status": "completed",
        "payload": [{
            "contentString": "hi",
            "_contentString": { "id": "p1" }
        }]
    });
    let communication: Communication = from_json_value(&input).unwrap();
    let Some(CommunicationPayloadContent::String(content)) = &communication.payload[0].content
    else {
        panic!("expected a string payload");
    };
    assert_eq!(content.id.as_deref(), Some("p1"));
    assert_eq!(to_json_value(&communication).unwrap(), input);
}

#[test]
fn two_choice_alternatives_are_rejected() {
    let input = json!({
        "resourceType": "CodeSystem",
        "status": "active",
        "content": "complete",
        "concept": [{
            "code": "a",
            "property": [{ "code": "p", "valueCode": "x", "valueString": "y" }]
        }]
    });
    let err = from_json_value::<CodeSystem>(&input).unwrap_err();
    assert!(matches!(err, Error::MultipleValues { ref field } if field == "value"));
}

// ============================================================================
// Resource envelope and registry
// ============================================================================

#[test]
fn polymorphic_decode_dispatches_on_resource_type() {
    let resource = resource_from_json_str(
        r#"{"resourceType":"Communication","id":"c1","status":"in-progress"}"#,
    )
    .unwrap();
    assert_eq!(resource.resource_type(), "Communication");
    assert_eq!(resource.id(), Some("c1"));
    assert!(matches!(resource, Resource::Communication(_)));
}

#[test]
fn missing_resource_type_is_an_error() {
    let err = resource_from_json_value(&json!({ "id": "x" })).unwrap_err();
    assert!(matches!(err, Error::MissingResourceType));
}

#[test]
fn typed_decode_rejects_other_resource_types() {
    let err = from_json_str::<CodeSystem>(r#"{"resourceType":"Communication","status":"done"}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedResourceType { ref expected, ref found }
            if expected == "CodeSystem" && found == "Communication"
    ));
}

#[test]
fn unknown_contained_discriminator_is_an_error() {
    let input = json!({
        "resourceType": "Communication",
        "status": "completed",
        "contained": [{ "resourceType": "Patient", "id": "p" }]
    });
    let err = resource_from_json_value(&input).unwrap_err();
    assert!(matches!(err, Error::UnknownResourceType(ref name) if name == "Patient"));

    let xml = r#"<Communication xmlns="http://hl7.org/fhir"><contained><Patient/></contained><status value="completed"/></Communication>"#;
    let err = resource_from_xml_str(xml).unwrap_err();
    assert!(matches!(err, Error::UnknownResourceType(ref name) if name == "Patient"));
}

#[test]
fn contained_resources_nest() {
    let mut inner = Communication::new("completed");
    inner.id = Some("inner".into());
    let mut outer = Communication::new("in-progress");
    outer.contained.push(inner.clone().into());
    outer.payload.push(CommunicationPayload::new(
        CommunicationPayloadContent::Reference(Reference::contained("inner")),
    ));

    let value = to_json_value(&outer).unwrap();
    assert_eq!(value["contained"][0]["resourceType"], json!("Communication"));
    assert_eq!(value["payload"][0]["contentReference"]["reference"], json!("#inner"));

    let xml = to_xml_string(&outer).unwrap();
    assert!(xml.contains("<contained>\n    <Communication>"));
    let back = resource_from_xml_str(&xml).unwrap();
    assert_eq!(back.contained(), &[Resource::from(inner)]);
}

// ============================================================================
// Unknown fields and XML structure errors
// ============================================================================

#[test]
fn unknown_fields_are_ignored_unless_strict() {
    let input = r#"{"resourceType":"Communication","status":"completed","colour":"blue"}"#;
    let communication: Communication = from_json_str(input).unwrap();
    assert_eq!(communication, Communication::new("completed"));

    let err = from_json_str_with::<Communication>(input, &Options::strict()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownField { ref type_name, ref field }
            if type_name == "Communication" && field == "colour"
    ));

    let xml = r#"<Communication xmlns="http://hl7.org/fhir"><colour value="blue"/></Communication>"#;
    assert!(resource_from_xml_str(xml).is_ok());
    assert!(resource_from_xml_str_with(xml, &Options::strict()).is_err());
}

#[test]
fn shadow_key_on_complex_field_is_unknown() {
    let input = json!({
        "resourceType": "Communication",
        "status": "completed",
        "_subject": { "id": "x" }
    });
    assert!(resource_from_json_value(&input).is_ok());
    let err = resource_from_json_value_with(&input, &Options::strict()).unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "_subject"));
}

#[test]
fn xml_unexpected_attribute() {
    let xml = r#"<CodeSystem xmlns="http://hl7.org/fhir"><status value="active" lang="en"/></CodeSystem>"#;
    let err = resource_from_xml_str(xml).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedAttribute { ref element, ref attribute }
            if element == "status" && attribute == "lang"
    ));
}

#[test]
fn xml_wrong_namespace() {
    let xml = r#"<CodeSystem xmlns="http://hl7.org/fhir/r5"><status value="active"/></CodeSystem>"#;
    let err = resource_from_xml_str(xml).unwrap_err();
    assert!(matches!(err, Error::Namespace { ref element, .. } if element == "CodeSystem"));

    let xml = r#"<CodeSystem><status value="active"/></CodeSystem>"#;
    let err = resource_from_xml_str(xml).unwrap_err();
    assert!(matches!(err, Error::Namespace { found: None, .. }));
}

#[test]
fn narrative_div_from_json_must_be_xhtml() {
    let mut code_system = CodeSystem::new("http://example.org/cs", "active", "complete");
    code_system.text = Some(Narrative::new("generated", "<div>plain</div>"));
    let json = to_json_string(&code_system).unwrap();
    let decoded: CodeSystem = from_json_str(&json).unwrap();
    let err = to_xml_string(&decoded).unwrap_err();
    assert!(matches!(err, Error::Namespace { ref element, found: None, .. } if element == "div"));

    code_system.text = Some(Narrative::new(
        "generated",
        r#"<div xmlns="http://www.w3.org/1999/xhtml">plain</div>"#,
    ));
    let xml = to_xml_string(&code_system).unwrap();
    let back: CodeSystem = from_xml_str(&xml).unwrap();
    assert_eq!(back, code_system);
}

#[test]
fn xml_extension_url_is_an_attribute() {
    let mut communication = Communication::new("completed");
    communication.extension.push(note("hello"));
    let xml = to_xml_string_with(&communication, &Options::default().with_pretty(false)).unwrap();
    assert!(xml.contains(
        r#"<extension url="http://example.org/fhir/StructureDefinition/note"><valueString value="hello"/></extension>"#
    ));
}

// ============================================================================
// Datatypes and serde integration
// ============================================================================

#[test]
fn datatype_encodes_standalone() {
    let coding = Coding::new("http://loinc.org", "1234-5").with_display("Test");
    let value = to_json_value(&coding).unwrap();
    assert_eq!(
        value,
        json!({ "system": "http://loinc.org", "code": "1234-5", "display": "Test" })
    );

    let xml = to_xml_string_with(&coding, &Options::default().with_pretty(false)).unwrap();
    assert_eq!(
        xml,
        r#"<Coding xmlns="http://hl7.org/fhir"><system value="http://loinc.org"/><code value="1234-5"/><display value="Test"/></Coding>"#
    );
    let back: Coding = from_xml_str(&xml).unwrap();
    assert_eq!(back, coding);
}

#[test]
fn serde_and_display_use_fhir_json() {
    let code_system = CodeSystem::new("http://example.org/cs", "draft", "not-present");
    let text = code_system.to_string();
    assert!(text.starts_with("{\n  \"resourceType\": \"CodeSystem\""));

    let value = serde_json::to_value(&code_system).unwrap();
    assert_eq!(value["url"], json!("http://example.org/cs"));

    let resources: Vec<Resource> = serde_json::from_value(json!([
        value,
        { "resourceType": "Communication", "status": "completed" }
    ]))
    .unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0], Resource::from(code_system));
}
