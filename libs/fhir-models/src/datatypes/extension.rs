//! FHIR Extension datatype

use super::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static EXTENSION: TypeDescriptor = TypeDescriptor {
    name: "Extension",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("url", PrimitiveType::Uri)
            .required()
            .xml_attribute(),
        FieldDescriptor::choice("value", &EXTENSION_VALUE_TYPES),
    ],
};

choice_type! {
    /// Extension.value[x]
    pub enum ExtensionValue: EXTENSION_VALUE_TYPES {
        Base64Binary(FhirBase64Binary) = ChoiceType::Primitive(PrimitiveType::Base64Binary),
        Boolean(FhirBoolean) = ChoiceType::Primitive(PrimitiveType::Boolean),
        Canonical(FhirCanonical) = ChoiceType::Primitive(PrimitiveType::Canonical),
        Code(FhirCode) = ChoiceType::Primitive(PrimitiveType::Code),
        Date(FhirDate) = ChoiceType::Primitive(PrimitiveType::Date),
        DateTime(FhirDateTime) = ChoiceType::Primitive(PrimitiveType::DateTime),
        Decimal(FhirDecimal) = ChoiceType::Primitive(PrimitiveType::Decimal),
        Id(FhirId) = ChoiceType::Primitive(PrimitiveType::Id),
        Instant(FhirInstant) = ChoiceType::Primitive(PrimitiveType::Instant),
        Integer(FhirInteger) = ChoiceType::Primitive(PrimitiveType::Integer),
        Markdown(FhirMarkdown) = ChoiceType::Primitive(PrimitiveType::Markdown),
        Oid(FhirOid) = ChoiceType::Primitive(PrimitiveType::Oid),
        PositiveInt(FhirPositiveInt) = ChoiceType::Primitive(PrimitiveType::PositiveInt),
        String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
        Time(FhirTime) = ChoiceType::Primitive(PrimitiveType::Time),
        UnsignedInt(FhirUnsignedInt) = ChoiceType::Primitive(PrimitiveType::UnsignedInt),
        Uri(FhirUri) = ChoiceType::Primitive(PrimitiveType::Uri),
        Url(FhirUrl) = ChoiceType::Primitive(PrimitiveType::Url),
        Uuid(FhirUuid) = ChoiceType::Primitive(PrimitiveType::Uuid),
        Annotation(Annotation) = ChoiceType::Complex(&ANNOTATION),
        Attachment(Attachment) = ChoiceType::Complex(&ATTACHMENT),
        CodeableConcept(CodeableConcept) = ChoiceType::Complex(&CODEABLE_CONCEPT),
        Coding(Coding) = ChoiceType::Complex(&CODING),
        ContactDetail(ContactDetail) = ChoiceType::Complex(&CONTACT_DETAIL),
        ContactPoint(ContactPoint) = ChoiceType::Complex(&CONTACT_POINT),
        Identifier(Identifier) = ChoiceType::Complex(&IDENTIFIER),
        Meta(Meta) = ChoiceType::Complex(&META),
        Period(Period) = ChoiceType::Complex(&PERIOD),
        Quantity(Quantity) = ChoiceType::Complex(&QUANTITY),
        Range(Range) = ChoiceType::Complex(&RANGE),
        Ratio(Ratio) = ChoiceType::Complex(&RATIO),
        Reference(Reference) = ChoiceType::Complex(&REFERENCE),
        UsageContext(UsageContext) = ChoiceType::Complex(&USAGE_CONTEXT),
    }
}

/// Optional extension element
///
/// The `url` is written as an attribute in XML, so only its value survives
/// an XML round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    pub id: Option<String>,
    /// Nested extensions (complex extensions)
    pub extension: Vec<Extension>,
    /// Identifies the meaning of the extension
    pub url: FhirUri,
    /// Value of extension
    pub value: Option<ExtensionValue>,
}

impl Extension {
    pub fn new(url: impl Into<String>, value: ExtensionValue) -> Self {
        Self {
            url: FhirUri::new(url.into()),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Extension with nested extensions instead of a value
    pub fn complex(url: impl Into<String>, extension: Vec<Extension>) -> Self {
        Self {
            url: FhirUri::new(url.into()),
            extension,
            ..Self::default()
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_str()
    }
}

impl FhirType for Extension {
    fn descriptor() -> &'static TypeDescriptor {
        &EXTENSION
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&EXTENSION).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("url", &self.url);
        node.put_choice("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            url: node.take("url")?,
            value: node.take_choice("value")?,
        })
    }
}

impl_node_value!(Extension);
