//! FHIR data models
//!
//! Strongly-typed Rust structures for FHIR R4 datatypes and resources, each
//! backed by a static descriptor table so the `strata-codec` JSON and XML
//! codecs can round-trip them, primitive ids and extensions included.
//!
//! # Module Organization
//!
//! - `primitives`: `Element` aliases for the FHIR primitive types
//! - `datatypes`: complex datatypes (Coding, Quantity, Extension, ...)
//! - `resources`: AuditEvent, CodeSystem, Communication and [`Resource`]
//! - `format`: typed JSON/XML entry points
//!
//! # Example
//!
//! ```rust
//! use strata_models::{from_json_str, to_xml_string, CodeSystem};
//!
//! let input = r#"{
//!     "resourceType": "CodeSystem",
//!     "id": "example",
//!     "status": "active",
//!     "content": "complete",
//!     "concept": [{ "code": "chol-mmol", "display": "SChol (mmol/L)" }]
//! }"#;
//!
//! let cs: CodeSystem = from_json_str(input).unwrap();
//! assert_eq!(cs.status.as_str(), Some("active"));
//! assert!(cs.find_concept("chol-mmol").is_some());
//!
//! let xml = to_xml_string(&cs).unwrap();
//! assert!(xml.contains(r#"<CodeSystem xmlns="http://hl7.org/fhir">"#));
//! ```

pub mod datatypes;
pub mod format;
pub mod primitives;
pub mod registry;
pub mod resources;

pub use datatypes::*;
pub use format::*;
pub use primitives::*;
pub use registry::registry;
pub use resources::*;

pub use strata_codec::{Element, Error, FhirType, Options, Result, UnknownFields};
