//! FHIR JSON codec
//!
//! Mapping rules:
//! - Resources carry a `resourceType` discriminator as their first key.
//! - Primitive values sit under the field name; their element id and
//!   extensions sit under `_field`.
//! - Repeated primitives use two parallel arrays. The `_field` array holds
//!   `null` where an element has no metadata, and trailing `null`s are trimmed.
//! - Choice fields are written as `field` + type suffix (`valueQuantity`).
//!
//! Output key order follows the descriptor tables, not the input.

use crate::descriptor::{ChoiceType, FieldDescriptor, FieldKind, TypeDescriptor};
use crate::error::{Error, Result};
use crate::node::{ComplexNode, Field, Node, PrimitiveNode};
use crate::options::Options;
use crate::registry::TypeRegistry;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Encode a complex node (resource or element) as a JSON value.
pub fn encode(node: &ComplexNode) -> Result<Value> {
    encode_complex(node).map(Value::Object)
}

/// Encode a complex node as JSON text.
pub fn encode_string(node: &ComplexNode, pretty: bool) -> Result<String> {
    let value = encode(node)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

/// Decode a resource of any registered type.
pub fn decode(value: &Value, registry: &TypeRegistry, options: &Options) -> Result<ComplexNode> {
    Decoder { registry, options }.resource(value, None)
}

/// Decode a resource, requiring the discriminator to match `descriptor`.
pub fn decode_as(
    value: &Value,
    descriptor: &'static TypeDescriptor,
    registry: &TypeRegistry,
    options: &Options,
) -> Result<ComplexNode> {
    Decoder { registry, options }.resource(value, Some(descriptor))
}

/// Decode a standalone complex element (e.g. a `Coding` object).
pub fn decode_element(
    value: &Value,
    descriptor: &'static TypeDescriptor,
    registry: &TypeRegistry,
    options: &Options,
) -> Result<ComplexNode> {
    let map = value.as_object().ok_or(Error::ExpectedObject)?;
    Decoder { registry, options }.complex(map, descriptor)
}

fn encode_complex(node: &ComplexNode) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    if node.ty.is_resource() {
        map.insert(
            "resourceType".to_string(),
            Value::String(node.ty.name.to_string()),
        );
    } else if let Some(id) = &node.id {
        map.insert("id".to_string(), Value::String(id.clone()));
    }

    for descriptor in node.ty.fields {
        let Some(field) = node.fields.get(descriptor.name) else {
            continue;
        };
        match field {
            Field::Single(value) => write_node(&mut map, descriptor.name, value)?,
            Field::List(values) => write_list(&mut map, descriptor.name, values)?,
            Field::Choice(ty, value) => {
                let key = format!("{}{}", descriptor.name, ty.suffix());
                write_node(&mut map, &key, value)?;
            }
        }
    }
    Ok(map)
}

fn write_node(map: &mut Map<String, Value>, key: &str, node: &Node) -> Result<()> {
    match node {
        Node::Primitive(primitive) => {
            if let Some(value) = &primitive.value {
                map.insert(key.to_string(), value.to_json()?);
            }
            if primitive.has_metadata() {
                map.insert(format!("_{key}"), encode_metadata(primitive)?);
            }
        }
        Node::Complex(complex) => {
            map.insert(key.to_string(), Value::Object(encode_complex(complex)?));
        }
    }
    Ok(())
}

fn write_list(map: &mut Map<String, Value>, key: &str, nodes: &[Node]) -> Result<()> {
    let mut values = Vec::with_capacity(nodes.len());
    let mut metadata = Vec::with_capacity(nodes.len());
    let mut primitive = false;

    for node in nodes {
        match node {
            Node::Primitive(p) => {
                primitive = true;
                values.push(match &p.value {
                    Some(value) => value.to_json()?,
                    None => Value::Null,
                });
                metadata.push(if p.has_metadata() {
                    encode_metadata(p)?
                } else {
                    Value::Null
                });
            }
            Node::Complex(complex) => values.push(Value::Object(encode_complex(complex)?)),
        }
    }

    if !primitive {
        map.insert(key.to_string(), Value::Array(values));
        return Ok(());
    }

    while metadata.last().is_some_and(Value::is_null) {
        metadata.pop();
    }
    // The values array always spans the metadata array, even when every
    // entry is null.
    if !metadata.is_empty() || values.iter().any(|v| !v.is_null()) {
        map.insert(key.to_string(), Value::Array(values));
    }
    if !metadata.is_empty() {
        map.insert(format!("_{key}"), Value::Array(metadata));
    }
    Ok(())
}

fn encode_metadata(primitive: &PrimitiveNode) -> Result<Value> {
    let mut map = Map::new();
    if let Some(id) = &primitive.id {
        map.insert("id".to_string(), Value::String(id.clone()));
    }
    if !primitive.extension.is_empty() {
        let extensions = primitive
            .extension
            .iter()
            .map(|ext| encode_complex(ext).map(Value::Object))
            .collect::<Result<Vec<_>>>()?;
        map.insert("extension".to_string(), Value::Array(extensions));
    }
    Ok(Value::Object(map))
}

/// Main and shadow values collected for one field before decoding
struct Slot<'v> {
    descriptor: &'static FieldDescriptor,
    choice: Option<ChoiceType>,
    value: Option<&'v Value>,
    metadata: Option<&'v Value>,
}

struct Decoder<'a> {
    registry: &'a TypeRegistry,
    options: &'a Options,
}

impl Decoder<'_> {
    fn resource(
        &self,
        value: &Value,
        expected: Option<&'static TypeDescriptor>,
    ) -> Result<ComplexNode> {
        let map = value.as_object().ok_or(Error::ExpectedObject)?;
        let resource_type = map
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or(Error::MissingResourceType)?;

        let descriptor = match expected {
            Some(descriptor) if descriptor.name != resource_type => {
                return Err(Error::UnexpectedResourceType {
                    expected: descriptor.name.to_string(),
                    found: resource_type.to_string(),
                });
            }
            Some(descriptor) => descriptor,
            None => self.registry.resource(resource_type)?,
        };

        debug!(format = "json", resource_type, "Decoding resource");
        self.complex(map, descriptor)
    }

    fn complex(
        &self,
        map: &Map<String, Value>,
        ty: &'static TypeDescriptor,
    ) -> Result<ComplexNode> {
        let mut node = ComplexNode::new(ty);
        let mut slots: BTreeMap<&'static str, Slot<'_>> = BTreeMap::new();

        for (key, value) in map {
            if ty.is_resource() {
                if key == "resourceType" {
                    continue;
                }
            } else if key == "id" {
                let id = value
                    .as_str()
                    .ok_or_else(|| Error::type_mismatch("id", "string"))?;
                node.id = Some(id.to_string());
                continue;
            }

            let (name, shadow) = match key.strip_prefix('_') {
                Some(name) => (name, true),
                None => (key.as_str(), false),
            };
            let Some((descriptor, choice)) = ty.resolve(name) else {
                self.options.unknown_field(ty.name, key)?;
                continue;
            };
            let kind = choice.map_or(descriptor.kind, |c| c.kind());
            if shadow && !matches!(kind, FieldKind::Primitive(_)) {
                self.options.unknown_field(ty.name, key)?;
                continue;
            }

            let slot = slots.entry(descriptor.name).or_insert(Slot {
                descriptor,
                choice,
                value: None,
                metadata: None,
            });
            if let (Some(seen), Some(found)) = (slot.choice, choice) {
                if !seen.same_as(&found) {
                    return Err(Error::MultipleValues {
                        field: descriptor.name.to_string(),
                    });
                }
            }
            if shadow {
                slot.metadata = Some(value);
            } else {
                slot.value = Some(value);
            }
        }

        for (name, slot) in slots {
            if let Some(field) = self.field(slot)? {
                node.insert(name, field);
            }
        }
        Ok(node)
    }

    fn field(&self, slot: Slot<'_>) -> Result<Option<Field>> {
        let name = slot.descriptor.name;
        let value = slot.value.filter(|v| !v.is_null());
        let metadata = slot.metadata.filter(|v| !v.is_null());

        if let Some(choice) = slot.choice {
            let node = self.single(name, choice.kind(), value, metadata)?;
            return Ok(node.map(|node| Field::Choice(choice, node)));
        }

        if !slot.descriptor.repeating {
            let node = self.single(name, slot.descriptor.kind, value, metadata)?;
            return Ok(node.map(Field::Single));
        }

        let nodes = match slot.descriptor.kind {
            FieldKind::Primitive(ty) => {
                let values = array(name, value)?;
                let metadata = array(name, metadata)?;
                let count = values.len().max(metadata.len());
                let mut nodes = Vec::with_capacity(count);
                for index in 0..count {
                    let value = values.get(index).filter(|v| !v.is_null());
                    let metadata = metadata.get(index).filter(|v| !v.is_null());
                    nodes.push(Node::Primitive(self.primitive(name, ty, value, metadata)?));
                }
                nodes
            }
            kind => array(name, value)?
                .iter()
                .map(|item| self.complex_node(name, kind, item))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok((!nodes.is_empty()).then_some(Field::List(nodes)))
    }

    fn single(
        &self,
        name: &str,
        kind: FieldKind,
        value: Option<&Value>,
        metadata: Option<&Value>,
    ) -> Result<Option<Node>> {
        match kind {
            FieldKind::Primitive(ty) => {
                if value.is_none() && metadata.is_none() {
                    return Ok(None);
                }
                Ok(Some(Node::Primitive(
                    self.primitive(name, ty, value, metadata)?,
                )))
            }
            kind => value
                .map(|value| self.complex_node(name, kind, value))
                .transpose(),
        }
    }

    fn complex_node(&self, name: &str, kind: FieldKind, value: &Value) -> Result<Node> {
        let node = match kind {
            FieldKind::Complex(descriptor) => {
                let map = value
                    .as_object()
                    .ok_or_else(|| Error::type_mismatch(name, "object"))?;
                self.complex(map, descriptor)?
            }
            FieldKind::Resource => self.resource(value, None)?,
            FieldKind::Primitive(_) | FieldKind::Choice(_) => {
                return Err(Error::shape(name, "complex element"))
            }
        };
        Ok(Node::Complex(node))
    }

    fn primitive(
        &self,
        name: &str,
        ty: crate::primitive::PrimitiveType,
        value: Option<&Value>,
        metadata: Option<&Value>,
    ) -> Result<PrimitiveNode> {
        let mut node = PrimitiveNode {
            value: value.map(|v| ty.value_from_json(name, v)).transpose()?,
            ..PrimitiveNode::default()
        };

        if let Some(metadata) = metadata {
            let shadow = format!("_{name}");
            let map = metadata
                .as_object()
                .ok_or_else(|| Error::type_mismatch(&shadow, "object"))?;
            for (key, value) in map {
                match key.as_str() {
                    "id" => {
                        let id = value
                            .as_str()
                            .ok_or_else(|| Error::type_mismatch(&shadow, "string id"))?;
                        node.id = Some(id.to_string());
                    }
                    "extension" => {
                        let extension = self.registry.extension();
                        node.extension = array(&shadow, Some(value))?
                            .iter()
                            .map(|item| {
                                let map = item
                                    .as_object()
                                    .ok_or_else(|| Error::type_mismatch("extension", "object"))?;
                                self.complex(map, extension)
                            })
                            .collect::<Result<Vec<_>>>()?;
                    }
                    _ => self.options.unknown_field(&shadow, key)?,
                }
            }
        }
        Ok(node)
    }
}

fn array<'v>(name: &str, value: Option<&'v Value>) -> Result<&'v [Value]> {
    match value {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(Error::type_mismatch(name, "array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeKind;
    use crate::primitive::{PrimitiveType, PrimitiveValue};
    use serde_json::json;

    static EXTENSION: TypeDescriptor = TypeDescriptor {
        name: "Extension",
        kind: TypeKind::ComplexType,
        fields: &[
            FieldDescriptor::primitive("url", PrimitiveType::Uri)
                .required()
                .xml_attribute(),
            FieldDescriptor::choice("value", &EXTENSION_VALUE),
        ],
    };

    static EXTENSION_VALUE: [ChoiceType; 2] = [
        ChoiceType::Primitive(PrimitiveType::String),
        ChoiceType::Primitive(PrimitiveType::Boolean),
    ];

    static BASIC: TypeDescriptor = TypeDescriptor {
        name: "Basic",
        kind: TypeKind::Resource,
        fields: &[
            FieldDescriptor::primitive("id", PrimitiveType::Id),
            FieldDescriptor::resource("contained").repeating(),
            FieldDescriptor::complex("extension", &EXTENSION).repeating(),
            FieldDescriptor::primitive("active", PrimitiveType::Boolean),
            FieldDescriptor::primitive("given", PrimitiveType::String).repeating(),
            FieldDescriptor::primitive("amount", PrimitiveType::Decimal),
        ],
    };

    fn registry() -> TypeRegistry {
        TypeRegistry::new(&EXTENSION).register(&BASIC)
    }

    fn decode_lenient(value: &Value) -> Result<ComplexNode> {
        decode(value, &registry(), &Options::default())
    }

    #[test]
    fn shadow_key_without_value_decodes_to_extension_only_primitive() {
        let input = json!({
            "resourceType": "Basic",
            "_active": {
                "extension": [{ "url": "http://example.org/reason", "valueString": "unknown" }]
            }
        });
        let node = decode_lenient(&input).unwrap();
        let Some(Field::Single(Node::Primitive(active))) = node.get("active") else {
            panic!("active should be a single primitive");
        };
        assert!(active.value.is_none());
        assert_eq!(active.extension.len(), 1);
        assert_eq!(encode(&node).unwrap(), input);
    }

    #[test]
    fn parallel_arrays_pair_by_position_and_trim_trailing_nulls() {
        let input = json!({
            "resourceType": "Basic",
            "given": ["a", "b", "c", "d"],
            "_given": [null, null, { "id": "third" }, null]
        });
        let node = decode_lenient(&input).unwrap();
        let Some(Field::List(items)) = node.get("given") else {
            panic!("given should be a list");
        };
        assert_eq!(items.len(), 4);
        let Node::Primitive(third) = &items[2] else {
            panic!("expected primitive");
        };
        assert_eq!(third.id.as_deref(), Some("third"));

        let output = encode(&node).unwrap();
        assert_eq!(output["_given"], json!([null, null, { "id": "third" }]));
    }

    #[test]
    fn longer_metadata_array_pads_values() {
        let input = json!({
            "resourceType": "Basic",
            "given": ["a"],
            "_given": [null, { "id": "second" }]
        });
        let node = decode_lenient(&input).unwrap();
        let Some(Field::List(items)) = node.get("given") else {
            panic!("given should be a list");
        };
        assert_eq!(items.len(), 2);
        let Node::Primitive(second) = &items[1] else {
            panic!("expected primitive");
        };
        assert!(second.value.is_none());
        assert_eq!(encode(&node).unwrap()["given"], json!(["a", null]));
    }

    #[test]
    fn metadata_only_list_keeps_a_null_values_array() {
        let input = json!({
            "resourceType": "Basic",
            "_given": [{ "id": "first" }, { "id": "second" }]
        });
        let node = decode_lenient(&input).unwrap();
        let output = encode(&node).unwrap();
        assert_eq!(output["given"], json!([null, null]));
        assert_eq!(
            output["_given"],
            json!([{ "id": "first" }, { "id": "second" }])
        );
    }

    #[test]
    fn two_choice_alternatives_conflict() {
        let input = json!({
            "resourceType": "Basic",
            "extension": [{
                "url": "http://example.org/x",
                "valueString": "a",
                "valueBoolean": true
            }]
        });
        let err = decode_lenient(&input).unwrap_err();
        assert!(matches!(err, Error::MultipleValues { ref field } if field == "value"));
    }

    #[test]
    fn value_and_shadow_of_the_same_alternative_merge() {
        let input = json!({
            "resourceType": "Basic",
            "extension": [{
                "url": "http://example.org/x",
                "valueString": "a",
                "_valueString": { "id": "v1" }
            }]
        });
        assert_eq!(encode(&decode_lenient(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn decimal_lexical_form_is_preserved() {
        let input: Value =
            serde_json::from_str(r#"{"resourceType":"Basic","amount":1.50}"#).unwrap();
        let node = decode_lenient(&input).unwrap();
        assert_eq!(
            encode_string(&node, false).unwrap(),
            r#"{"resourceType":"Basic","amount":1.50}"#
        );
    }

    #[test]
    fn unknown_contained_discriminator() {
        let input = json!({
            "resourceType": "Basic",
            "contained": [{ "resourceType": "Patient", "id": "p1" }]
        });
        let err = decode_lenient(&input).unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(ref name) if name == "Patient"));
    }

    #[test]
    fn unknown_fields_follow_options() {
        let input = json!({ "resourceType": "Basic", "colour": "blue" });
        assert!(decode_lenient(&input).unwrap().fields.is_empty());

        let err = decode(&input, &registry(), &Options::strict()).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "colour"));
    }

    #[test]
    fn envelope_errors() {
        assert!(matches!(
            decode_lenient(&json!([])).unwrap_err(),
            Error::ExpectedObject
        ));
        assert!(matches!(
            decode_lenient(&json!({ "id": "x" })).unwrap_err(),
            Error::MissingResourceType
        ));
        let err = decode_as(
            &json!({ "resourceType": "Other" }),
            &BASIC,
            &registry(),
            &Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResourceType { .. }));
    }

    #[test]
    fn output_follows_descriptor_order() {
        let mut node = ComplexNode::new(&BASIC);
        node.insert(
            "active",
            Field::Single(Node::Primitive(PrimitiveNode::new(PrimitiveValue::Boolean(
                false,
            )))),
        );
        node.insert(
            "id",
            Field::Single(Node::Primitive(PrimitiveNode::new(PrimitiveValue::String(
                "b1".to_string(),
            )))),
        );
        assert_eq!(
            encode_string(&node, false).unwrap(),
            r#"{"resourceType":"Basic","id":"b1","active":false}"#
        );
    }
}
