//! FHIR XML codec
//!
//! Mapping rules:
//! - The root element is named after the resource type and declares the
//!   `http://hl7.org/fhir` namespace. Every element is checked against it on
//!   decode.
//! - Primitive values are carried in a `value` attribute, element ids in an
//!   `id` attribute, and primitive extensions as `<extension>` children.
//! - Repeated fields are repeated elements.
//! - Inline resources are wrapped: `<contained><Basic>..</Basic></contained>`.
//! - The narrative `div` is XHTML in its own namespace and is copied verbatim.
//!
//! Besides `id` and `value`, only attributes declared in the descriptor
//! tables (such as `Extension.url`) are accepted.

mod de;
mod ser;

pub use de::{decode, decode_as, decode_element};
pub use ser::{encode_element_string, encode_string};

pub const FHIR_NS: &str = "http://hl7.org/fhir";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
