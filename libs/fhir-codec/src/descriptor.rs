//! Static field descriptor tables
//!
//! Each FHIR type the codec can handle is described once by a
//! [`TypeDescriptor`]: its name, its kind, and the ordered list of fields with
//! their wire names, kinds and cardinality. The JSON and XML codecs are driven
//! entirely by these tables.
//!
//! Descriptors are `static` items. Complex fields point at the descriptor of
//! the nested type, so recursive structures (`Identifier.assigner` →
//! `Reference.identifier` → `Identifier`) are plain static references.

use crate::primitive::PrimitiveType;
use std::fmt;

/// Kind of FHIR type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// FHIR Resource (e.g., AuditEvent, CodeSystem)
    Resource,
    /// Complex datatype (e.g., Coding, Quantity)
    ComplexType,
    /// Backbone element (nested complex element within a resource)
    BackboneElement,
}

/// Descriptor of a complex type or resource
pub struct TypeDescriptor {
    /// Type name; for resources this is the `resourceType` discriminator
    pub name: &'static str,
    pub kind: TypeKind,
    /// Fields in wire order
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    pub fn is_resource(&self) -> bool {
        self.kind == TypeKind::Resource
    }

    /// Get a field by its wire name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve a wire key (JSON property or XML element name) to the field it
    /// belongs to. For choice fields the selected alternative is returned too:
    /// `valueQuantity` resolves to `value` with the `Quantity` alternative.
    pub fn resolve(&self, key: &str) -> Option<(&'static FieldDescriptor, Option<ChoiceType>)> {
        for field in self.fields {
            match field.kind {
                FieldKind::Choice(types) => {
                    if let Some(suffix) = key.strip_prefix(field.name) {
                        if let Some(ty) = types.iter().find(|t| t.suffix() == suffix) {
                            return Some((field, Some(*ty)));
                        }
                    }
                }
                _ if field.name == key => return Some((field, None)),
                _ => {}
            }
        }
        None
    }

    /// Fields written as XML attributes rather than child elements
    pub fn attribute_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.xml_attribute)
    }
}

// Descriptors reference each other cyclically, so Debug stops at the name.
impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A field within a type
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Wire name (JSON key, XML element name). For choice fields the name
    /// without the `[x]` suffix.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Minimum cardinality
    pub min: u32,
    /// Whether the field may occur more than once
    pub repeating: bool,
    /// Written as an XML attribute (e.g. `Extension.url`)
    pub xml_attribute: bool,
}

impl FieldDescriptor {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            min: 0,
            repeating: false,
            xml_attribute: false,
        }
    }

    pub const fn primitive(name: &'static str, ty: PrimitiveType) -> Self {
        Self::new(name, FieldKind::Primitive(ty))
    }

    pub const fn complex(name: &'static str, ty: &'static TypeDescriptor) -> Self {
        Self::new(name, FieldKind::Complex(ty))
    }

    pub const fn choice(name: &'static str, types: &'static [ChoiceType]) -> Self {
        Self::new(name, FieldKind::Choice(types))
    }

    pub const fn resource(name: &'static str) -> Self {
        Self::new(name, FieldKind::Resource)
    }

    /// Mark the field as 1..
    pub const fn required(self) -> Self {
        Self { min: 1, ..self }
    }

    /// Mark the field as ..*
    pub const fn repeating(self) -> Self {
        Self {
            repeating: true,
            ..self
        }
    }

    pub const fn xml_attribute(self) -> Self {
        Self {
            xml_attribute: true,
            ..self
        }
    }
}

/// What a field holds
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Primitive(PrimitiveType),
    Complex(&'static TypeDescriptor),
    /// One of several alternative types (`value[x]`)
    Choice(&'static [ChoiceType]),
    /// Inline resource, resolved through the registry by its discriminator
    Resource,
}

/// One alternative of a choice field
#[derive(Debug, Clone, Copy)]
pub enum ChoiceType {
    Primitive(PrimitiveType),
    Complex(&'static TypeDescriptor),
}

impl ChoiceType {
    /// Wire-key suffix of this alternative (`String`, `Quantity`, ...)
    pub fn suffix(&self) -> &'static str {
        match self {
            ChoiceType::Primitive(ty) => ty.suffix(),
            ChoiceType::Complex(desc) => desc.name,
        }
    }

    /// The field kind a value of this alternative is encoded as
    pub fn kind(&self) -> FieldKind {
        match self {
            ChoiceType::Primitive(ty) => FieldKind::Primitive(*ty),
            ChoiceType::Complex(desc) => FieldKind::Complex(*desc),
        }
    }

    pub fn same_as(&self, other: &ChoiceType) -> bool {
        self.suffix() == other.suffix()
    }
}

impl PartialEq for ChoiceType {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static QUANTITY: TypeDescriptor = TypeDescriptor {
        name: "Quantity",
        kind: TypeKind::ComplexType,
        fields: &[
            FieldDescriptor::primitive("value", PrimitiveType::Decimal),
            FieldDescriptor::primitive("unit", PrimitiveType::String),
        ],
    };

    static VALUE_TYPES: [ChoiceType; 3] = [
        ChoiceType::Primitive(PrimitiveType::String),
        ChoiceType::Primitive(PrimitiveType::DateTime),
        ChoiceType::Complex(&QUANTITY),
    ];

    static OBSERVATION: TypeDescriptor = TypeDescriptor {
        name: "Observation",
        kind: TypeKind::Resource,
        fields: &[
            FieldDescriptor::primitive("status", PrimitiveType::Code).required(),
            FieldDescriptor::primitive("valueSet", PrimitiveType::Canonical),
            FieldDescriptor::choice("value", &VALUE_TYPES),
            FieldDescriptor::complex("component", &QUANTITY).repeating(),
        ],
    };

    #[test]
    fn resolves_plain_fields() {
        let (field, choice) = OBSERVATION.resolve("status").unwrap();
        assert_eq!(field.name, "status");
        assert_eq!(field.min, 1);
        assert!(choice.is_none());
    }

    #[test]
    fn resolves_choice_alternatives_by_suffix() {
        let (field, choice) = OBSERVATION.resolve("valueQuantity").unwrap();
        assert_eq!(field.name, "value");
        assert_eq!(choice.unwrap().suffix(), "Quantity");

        let (_, choice) = OBSERVATION.resolve("valueDateTime").unwrap();
        assert_eq!(choice.unwrap().suffix(), "DateTime");
    }

    #[test]
    fn plain_field_sharing_a_choice_prefix_is_not_a_choice() {
        let (field, choice) = OBSERVATION.resolve("valueSet").unwrap();
        assert_eq!(field.name, "valueSet");
        assert!(choice.is_none());
    }

    #[test]
    fn unknown_keys_do_not_resolve() {
        assert!(OBSERVATION.resolve("valueBoolean").is_none());
        assert!(OBSERVATION.resolve("value").is_none());
        assert!(OBSERVATION.resolve("subject").is_none());
    }
}
