//! Descriptor-driven FHIR JSON and XML codec
//!
//! Every complex type and resource is described by a static
//! [`TypeDescriptor`]. The codecs translate between the two FHIR wire formats
//! and a format-neutral node tree ([`ComplexNode`]), and model crates convert
//! that tree to and from typed records through [`FhirType`], [`NodeValue`],
//! [`FieldValue`] and [`ChoiceValue`].
//!
//! # Module Organization
//!
//! - `descriptor`: static field descriptor tables
//! - `node`: the node tree
//! - `primitive`: primitive types and values
//! - `element`: the typed primitive element [`Element`]
//! - `convert`: typed ↔ node conversion traits and macros
//! - `registry`: resource discriminator lookup for inline resources
//! - `json`, `xml`: the wire-format codecs
//!
//! # Example
//!
//! ```rust
//! use strata_codec::{
//!     json, FieldDescriptor, Options, PrimitiveType, TypeDescriptor, TypeKind, TypeRegistry,
//! };
//! use serde_json::json;
//!
//! static EXTENSION: TypeDescriptor = TypeDescriptor {
//!     name: "Extension",
//!     kind: TypeKind::ComplexType,
//!     fields: &[FieldDescriptor::primitive("url", PrimitiveType::Uri).xml_attribute()],
//! };
//!
//! static BASIC: TypeDescriptor = TypeDescriptor {
//!     name: "Basic",
//!     kind: TypeKind::Resource,
//!     fields: &[
//!         FieldDescriptor::primitive("id", PrimitiveType::Id),
//!         FieldDescriptor::primitive("created", PrimitiveType::Date),
//!     ],
//! };
//!
//! let registry = TypeRegistry::new(&EXTENSION).register(&BASIC);
//! let input = json!({
//!     "resourceType": "Basic",
//!     "id": "b1",
//!     "_created": { "extension": [{ "url": "http://example.org/unknown" }] }
//! });
//!
//! let node = json::decode(&input, &registry, &Options::default()).unwrap();
//! let xml = strata_codec::xml::encode_string(&node, false).unwrap();
//! assert!(xml.contains(r#"<created><extension url="http://example.org/unknown"/></created>"#));
//! assert_eq!(json::encode(&node).unwrap(), input);
//! ```

pub mod convert;
pub mod descriptor;
pub mod element;
pub mod error;
pub mod json;
pub mod node;
pub mod options;
pub mod primitive;
pub mod registry;
pub mod xml;

pub use convert::{complex_from_node, ChoiceValue, FhirType, FieldValue, NodeValue};
pub use descriptor::{ChoiceType, FieldDescriptor, FieldKind, TypeDescriptor, TypeKind};
pub use element::Element;
pub use error::{Error, Result};
pub use node::{ComplexNode, Field, Node, PrimitiveNode};
pub use options::{Options, UnknownFields};
pub use primitive::{PrimitiveData, PrimitiveType, PrimitiveValue};
pub use registry::TypeRegistry;
