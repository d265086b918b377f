//! FHIR resources
//!
//! Each resource owns its contained resources. [`Resource`] is the
//! polymorphic form used for `contained` and for decoding input whose type is
//! not known in advance.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use strata_codec::{ComplexNode, Error, FhirType, Node, NodeValue, Options, Result};
use tracing::warn;

/// Base fields shared by every domain resource, followed by `$field`s
macro_rules! domain_resource_fields {
    ($($field:expr),* $(,)?) => {
        &[
            strata_codec::FieldDescriptor::primitive("id", strata_codec::PrimitiveType::Id),
            strata_codec::FieldDescriptor::complex("meta", &$crate::datatypes::META),
            strata_codec::FieldDescriptor::primitive(
                "implicitRules",
                strata_codec::PrimitiveType::Uri,
            ),
            strata_codec::FieldDescriptor::primitive("language", strata_codec::PrimitiveType::Code),
            strata_codec::FieldDescriptor::complex("text", &$crate::datatypes::NARRATIVE),
            strata_codec::FieldDescriptor::resource("contained").repeating(),
            strata_codec::FieldDescriptor::complex("extension", &$crate::datatypes::EXTENSION)
                .repeating(),
            strata_codec::FieldDescriptor::complex(
                "modifierExtension",
                &$crate::datatypes::EXTENSION,
            )
            .repeating(),
            $($field,)*
        ]
    };
}

/// Base fields of a backbone element, followed by `$field`s
macro_rules! backbone_fields {
    ($($field:expr),* $(,)?) => {
        &[
            strata_codec::FieldDescriptor::complex("extension", &$crate::datatypes::EXTENSION)
                .repeating(),
            strata_codec::FieldDescriptor::complex(
                "modifierExtension",
                &$crate::datatypes::EXTENSION,
            )
            .repeating(),
            $($field,)*
        ]
    };
}

pub mod audit_event;
pub mod code_system;
pub mod communication;

pub use audit_event::*;
pub use code_system::*;
pub use communication::*;

const DISPLAY_FALLBACK: &str = "<unrenderable FHIR resource>";

/// Any resource this crate models
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    AuditEvent(Box<AuditEvent>),
    CodeSystem(Box<CodeSystem>),
    Communication(Box<Communication>),
}

impl Resource {
    /// The `resourceType` discriminator
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::AuditEvent(_) => AUDIT_EVENT.name,
            Resource::CodeSystem(_) => CODE_SYSTEM.name,
            Resource::Communication(_) => COMMUNICATION.name,
        }
    }

    /// Logical id, if set
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Resource::AuditEvent(r) => r.id.as_ref(),
            Resource::CodeSystem(r) => r.id.as_ref(),
            Resource::Communication(r) => r.id.as_ref(),
        };
        id.and_then(|id| id.as_str())
    }

    pub fn contained(&self) -> &[Resource] {
        match self {
            Resource::AuditEvent(r) => &r.contained,
            Resource::CodeSystem(r) => &r.contained,
            Resource::Communication(r) => &r.contained,
        }
    }

    pub fn to_complex(&self) -> ComplexNode {
        match self {
            Resource::AuditEvent(r) => r.to_complex(),
            Resource::CodeSystem(r) => r.to_complex(),
            Resource::Communication(r) => r.to_complex(),
        }
    }

    /// Convert a decoded resource node, dispatching on its type
    pub fn from_complex(node: ComplexNode) -> Result<Self> {
        match node.type_name() {
            "AuditEvent" => AuditEvent::from_complex(node).map(Self::from),
            "CodeSystem" => CodeSystem::from_complex(node).map(Self::from),
            "Communication" => Communication::from_complex(node).map(Self::from),
            other => Err(Error::UnknownResourceType(other.to_string())),
        }
    }

    pub fn to_json_value(&self) -> Result<Value> {
        strata_codec::json::encode(&self.to_complex())
    }

    pub fn to_json_string(&self) -> Result<String> {
        strata_codec::json::encode_string(&self.to_complex(), false)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        strata_codec::json::encode_string(&self.to_complex(), true)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with(&Options::default())
    }

    pub fn to_xml_string_with(&self, options: &Options) -> Result<String> {
        strata_codec::xml::encode_string(&self.to_complex(), options.pretty)
    }
}

impl NodeValue for Resource {
    fn to_node(&self) -> Node {
        Node::Complex(self.to_complex())
    }

    fn from_node(node: Node, field: &str) -> Result<Self> {
        match node {
            Node::Complex(complex) => Self::from_complex(complex),
            Node::Primitive(_) => Err(Error::shape(field, "resource")),
        }
    }

    // A resource always carries its discriminator.
    fn is_empty(&self) -> bool {
        false
    }
}

fn render(resource_type: &str, json: Result<String>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match json {
        Ok(text) => f.write_str(&text),
        Err(error) => {
            warn!(resource_type, %error, "Failed to render resource as JSON");
            f.write_str(DISPLAY_FALLBACK)
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.resource_type(), self.to_json_string_pretty(), f)
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        crate::resource_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}

/// `Display`, serde and `From<T> for Resource` for a concrete resource type
macro_rules! impl_resource {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Resource {
                fn from(resource: $ty) -> Self {
                    Resource::$ty(Box::new(resource))
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    render(stringify!($ty), crate::to_json_string_pretty(self), f)
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(
                    &self,
                    serializer: S,
                ) -> std::result::Result<S::Ok, S::Error> {
                    crate::to_json_value(self)
                        .map_err(serde::ser::Error::custom)?
                        .serialize(serializer)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(
                    deserializer: D,
                ) -> std::result::Result<Self, D::Error> {
                    let value = Value::deserialize(deserializer)?;
                    crate::from_json_value(&value).map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

impl_resource!(AuditEvent, CodeSystem, Communication);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_matches_descriptor() {
        let resource = Resource::from(CodeSystem::new(
            "http://example.org/cs",
            "active",
            "complete",
        ));
        assert_eq!(resource.resource_type(), "CodeSystem");
        assert_eq!(resource.id(), None);
        assert_eq!(resource.to_complex().type_name(), "CodeSystem");
    }

    #[test]
    fn from_complex_rejects_unknown_node_types() {
        let err = Resource::from_complex(ComplexNode::new(&crate::datatypes::CODING)).unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(ref name) if name == "Coding"));
    }

    #[test]
    fn display_renders_pretty_json() {
        let communication = Communication::new("completed");
        let text = communication.to_string();
        assert!(text.starts_with("{\n"));
        assert!(text.contains(r#""resourceType": "Communication""#));
        assert!(text.contains(r#""status": "completed""#));
    }

    #[test]
    fn serde_delegates_to_the_codec() {
        let event = AuditEvent::new(
            crate::datatypes::Coding::new("http://dicom.nema.org/resources/ontology/DCM", "110110"),
            "2024-01-01T00:00:00Z",
            AuditEventSource {
                observer: crate::datatypes::Reference::new("Device/1"),
                ..AuditEventSource::default()
            },
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["resourceType"], "AuditEvent");
        assert_eq!(value["source"]["observer"]["reference"], "Device/1");

        let back: AuditEvent = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, event);

        let polymorphic: Resource = serde_json::from_value(value).unwrap();
        assert_eq!(polymorphic, Resource::from(event));
    }
}
