//! FHIR primitive element aliases
//!
//! Every primitive is an [`Element`] carrying an optional value plus the
//! element id and extensions from the `_field` shadow key.

use crate::datatypes::Extension;
use rust_decimal::Decimal;
use strata_codec::Element;

pub type FhirBoolean = Element<bool, Extension>;
pub type FhirInteger = Element<i32, Extension>;
pub type FhirUnsignedInt = Element<u32, Extension>;
pub type FhirPositiveInt = Element<u32, Extension>;
/// Decimal with its lexical scale (`1.50` stays `1.50`)
pub type FhirDecimal = Element<Decimal, Extension>;

pub type FhirString = Element<String, Extension>;
pub type FhirCode = Element<String, Extension>;
pub type FhirId = Element<String, Extension>;
pub type FhirMarkdown = Element<String, Extension>;
pub type FhirUri = Element<String, Extension>;
pub type FhirUrl = Element<String, Extension>;
pub type FhirCanonical = Element<String, Extension>;
pub type FhirOid = Element<String, Extension>;
pub type FhirUuid = Element<String, Extension>;
pub type FhirBase64Binary = Element<String, Extension>;

// Date and time types keep their lexical form; no calendar validation.
pub type FhirDate = Element<String, Extension>;
pub type FhirDateTime = Element<String, Extension>;
pub type FhirInstant = Element<String, Extension>;
pub type FhirTime = Element<String, Extension>;

/// Narrative XHTML, serialized including the enclosing `div`
pub type FhirXhtml = Element<String, Extension>;
