//! FHIR complex datatypes
//!
//! Each type comes with its descriptor table (`CODING`, `QUANTITY`, ...) and
//! its typed ↔ node conversion.

pub mod extension;
pub mod general;
pub mod metadata;
pub mod special;

pub use extension::*;
pub use general::*;
pub use metadata::*;
pub use special::*;
