//! A miniature model crate built on the public macros and traits

use serde_json::json;
use strata_codec::{
    choice_type, impl_node_value, json, xml, ChoiceType, ComplexNode, Element, Error, FhirType,
    FieldDescriptor, Options, PrimitiveType, Result, TypeDescriptor, TypeKind, TypeRegistry,
};

type Str = Element<String, Ext>;
type Flag = Element<bool, Ext>;

static EXT: TypeDescriptor = TypeDescriptor {
    name: "Extension",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::primitive("url", PrimitiveType::Uri)
            .required()
            .xml_attribute(),
        FieldDescriptor::choice("value", &EXT_VALUE_TYPES),
    ],
};

choice_type! {
    enum ExtValue: EXT_VALUE_TYPES {
        String(Str) = ChoiceType::Primitive(PrimitiveType::String),
        Boolean(Flag) = ChoiceType::Primitive(PrimitiveType::Boolean),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Ext {
    id: Option<String>,
    url: Str,
    value: Option<ExtValue>,
}

impl FhirType for Ext {
    fn descriptor() -> &'static TypeDescriptor {
        &EXT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&EXT).with_id(self.id.clone());
        node.put("url", &self.url);
        node.put_choice("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            url: node.take("url")?,
            value: node.take_choice("value")?,
        })
    }
}

impl_node_value!(Ext);

static NOTE: TypeDescriptor = TypeDescriptor {
    name: "Note",
    kind: TypeKind::Resource,
    fields: &[
        FieldDescriptor::primitive("id", PrimitiveType::Id),
        FieldDescriptor::complex("extension", &EXT).repeating(),
        FieldDescriptor::primitive("line", PrimitiveType::String).repeating(),
        FieldDescriptor::primitive("urgent", PrimitiveType::Boolean),
    ],
};

#[derive(Debug, Clone, Default, PartialEq)]
struct Note {
    id: Option<Str>,
    extension: Vec<Ext>,
    line: Vec<Str>,
    urgent: Option<Flag>,
}

impl FhirType for Note {
    fn descriptor() -> &'static TypeDescriptor {
        &NOTE
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&NOTE);
        node.put("id", &self.id);
        node.put("extension", &self.extension);
        node.put("line", &self.line);
        node.put("urgent", &self.urgent);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.take("id")?,
            extension: node.take("extension")?,
            line: node.take("line")?,
            urgent: node.take("urgent")?,
        })
    }
}

fn registry() -> TypeRegistry {
    TypeRegistry::new(&EXT).register(&NOTE)
}

fn sample() -> Note {
    Note {
        id: Some("n1".into()),
        extension: vec![Ext {
            url: "http://example.org/source".into(),
            value: Some(ExtValue::String("phone".into())),
            ..Ext::default()
        }],
        line: vec![
            "first".into(),
            Str::default().with_extension(Ext {
                url: "http://example.org/redacted".into(),
                value: Some(ExtValue::Boolean(true.into())),
                ..Ext::default()
            }),
            "third".into(),
        ],
        urgent: Some(Flag::new(false).with_id("u")),
    }
}

#[test]
fn typed_record_round_trips_through_json() {
    let note = sample();
    let value = json::encode(&note.to_complex()).unwrap();
    assert_eq!(
        value,
        json!({
            "resourceType": "Note",
            "id": "n1",
            "extension": [{ "url": "http://example.org/source", "valueString": "phone" }],
            "line": ["first", null, "third"],
            "_line": [null, { "extension": [{ "url": "http://example.org/redacted", "valueBoolean": true }] }],
            "urgent": false,
            "_urgent": { "id": "u" }
        })
    );

    let node = json::decode_as(&value, &NOTE, &registry(), &Options::default()).unwrap();
    assert_eq!(Note::from_complex(node).unwrap(), note);
}

#[test]
fn typed_record_round_trips_through_xml() {
    let note = sample();
    let text = xml::encode_string(&note.to_complex(), true).unwrap();
    let node = xml::decode_as(&text, &NOTE, &registry(), &Options::default()).unwrap();
    let back = Note::from_complex(node).unwrap();
    assert_eq!(back, note);
    assert_eq!(xml::encode_string(&back.to_complex(), true).unwrap(), text);
}

#[test]
fn empty_values_are_omitted() {
    let note = Note {
        line: vec![Str::default(), "kept".into()],
        urgent: Some(Flag::default()),
        ..Note::default()
    };
    let value = json::encode(&note.to_complex()).unwrap();
    assert_eq!(value, json!({ "resourceType": "Note", "line": ["kept"] }));
}

#[test]
fn choice_with_unlisted_suffix_is_unknown() {
    let value = json!({
        "resourceType": "Note",
        "extension": [{ "url": "http://example.org/x", "valueInteger": 3 }]
    });
    let node = json::decode(&value, &registry(), &Options::default()).unwrap();
    let note = Note::from_complex(node).unwrap();
    assert_eq!(note.extension[0].value, None);

    let err = json::decode(&value, &registry(), &Options::strict()).unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "valueInteger"));
}

#[test]
fn primitive_value_type_is_checked() {
    let value = json!({ "resourceType": "Note", "urgent": "yes" });
    let err = json::decode(&value, &registry(), &Options::default()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "urgent"));

    let text = r#"<Note xmlns="http://hl7.org/fhir"><urgent value="yes"/></Note>"#;
    let err = xml::decode(text, &registry(), &Options::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { ref field, .. } if field == "urgent"));
}
