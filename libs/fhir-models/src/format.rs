//! Typed JSON and XML entry points
//!
//! The `_with` variants take decode/encode [`Options`]; the others use
//! `Options::default()` (unknown fields ignored, indented XML). Decoding
//! resolves contained resources through [`registry()`](crate::registry).

use crate::registry::registry;
use crate::resources::Resource;
use serde_json::Value;
use strata_codec::{json, xml, FhirType, Options, Result};

/// Encode a datatype or resource as a JSON value.
pub fn to_json_value<T: FhirType>(value: &T) -> Result<Value> {
    json::encode(&value.to_complex())
}

/// Encode as compact JSON text.
pub fn to_json_string<T: FhirType>(value: &T) -> Result<String> {
    json::encode_string(&value.to_complex(), false)
}

/// Encode as pretty-printed JSON text.
pub fn to_json_string_pretty<T: FhirType>(value: &T) -> Result<String> {
    json::encode_string(&value.to_complex(), true)
}

pub fn from_json_value<T: FhirType>(value: &Value) -> Result<T> {
    from_json_value_with(value, &Options::default())
}

/// Decode a datatype or resource from a JSON value. Resources must carry the
/// matching `resourceType`.
pub fn from_json_value_with<T: FhirType>(value: &Value, options: &Options) -> Result<T> {
    let descriptor = T::descriptor();
    let node = if descriptor.is_resource() {
        json::decode_as(value, descriptor, registry(), options)?
    } else {
        json::decode_element(value, descriptor, registry(), options)?
    };
    T::from_complex(node)
}

pub fn from_json_str<T: FhirType>(input: &str) -> Result<T> {
    from_json_str_with(input, &Options::default())
}

pub fn from_json_str_with<T: FhirType>(input: &str, options: &Options) -> Result<T> {
    let value: Value = serde_json::from_str(input)?;
    from_json_value_with(&value, options)
}

pub fn from_json_slice<T: FhirType>(input: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(input)?;
    from_json_value(&value)
}

/// Encode as an XML document (indented).
pub fn to_xml_string<T: FhirType>(value: &T) -> Result<String> {
    to_xml_string_with(value, &Options::default())
}

/// Encode as XML. Datatypes are written as a standalone element named after
/// the type, without an XML declaration.
pub fn to_xml_string_with<T: FhirType>(value: &T, options: &Options) -> Result<String> {
    let node = value.to_complex();
    if node.ty.is_resource() {
        xml::encode_string(&node, options.pretty)
    } else {
        xml::encode_element_string(node.ty.name, &node, options.pretty)
    }
}

pub fn from_xml_str<T: FhirType>(input: &str) -> Result<T> {
    from_xml_str_with(input, &Options::default())
}

pub fn from_xml_str_with<T: FhirType>(input: &str, options: &Options) -> Result<T> {
    let descriptor = T::descriptor();
    let node = if descriptor.is_resource() {
        xml::decode_as(input, descriptor, registry(), options)?
    } else {
        xml::decode_element(input, descriptor, registry(), options)?
    };
    T::from_complex(node)
}

/// Decode a resource of any registered type.
pub fn resource_from_json_value(value: &Value) -> Result<Resource> {
    resource_from_json_value_with(value, &Options::default())
}

pub fn resource_from_json_value_with(value: &Value, options: &Options) -> Result<Resource> {
    Resource::from_complex(json::decode(value, registry(), options)?)
}

pub fn resource_from_json_str(input: &str) -> Result<Resource> {
    resource_from_json_str_with(input, &Options::default())
}

pub fn resource_from_json_str_with(input: &str, options: &Options) -> Result<Resource> {
    let value: Value = serde_json::from_str(input)?;
    resource_from_json_value_with(&value, options)
}

pub fn resource_from_xml_str(input: &str) -> Result<Resource> {
    resource_from_xml_str_with(input, &Options::default())
}

pub fn resource_from_xml_str_with(input: &str, options: &Options) -> Result<Resource> {
    Resource::from_complex(xml::decode(input, registry(), options)?)
}

/// Convert a JSON resource to XML through the typed model.
///
/// Unlike a purely syntactic mapping this knows every field's type, so
/// primitives carrying only extensions and decimal precision survive.
pub fn json_to_xml(input: &str, options: &Options) -> Result<String> {
    resource_from_json_str_with(input, options)?.to_xml_string_with(options)
}

/// Convert an XML resource to JSON through the typed model.
pub fn xml_to_json(input: &str, options: &Options) -> Result<String> {
    let resource = resource_from_xml_str_with(input, options)?;
    if options.pretty {
        resource.to_json_string_pretty()
    } else {
        resource.to_json_string()
    }
}
