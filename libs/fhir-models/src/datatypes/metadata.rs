//! Metadata datatypes used by canonical resources

use super::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static CONTACT_DETAIL: TypeDescriptor = TypeDescriptor {
    name: "ContactDetail",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("name", PrimitiveType::String),
        FieldDescriptor::complex("telecom", &CONTACT_POINT).repeating(),
    ],
};

/// Contact information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetail {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Name of an individual to contact
    pub name: Option<FhirString>,
    /// Contact details for individual or organization
    pub telecom: Vec<ContactPoint>,
}

impl FhirType for ContactDetail {
    fn descriptor() -> &'static TypeDescriptor {
        &CONTACT_DETAIL
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CONTACT_DETAIL).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("name", &self.name);
        node.put("telecom", &self.telecom);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            name: node.take("name")?,
            telecom: node.take("telecom")?,
        })
    }
}

pub static USAGE_CONTEXT: TypeDescriptor = TypeDescriptor {
    name: "UsageContext",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::complex("code", &CODING).required(),
        FieldDescriptor::choice("value", &USAGE_CONTEXT_VALUE_TYPES).required(),
    ],
};

choice_type! {
    /// UsageContext.value[x]
    pub enum UsageContextValue: USAGE_CONTEXT_VALUE_TYPES {
        CodeableConcept(CodeableConcept) = ChoiceType::Complex(&CODEABLE_CONCEPT),
        Quantity(Quantity) = ChoiceType::Complex(&QUANTITY),
        Range(Range) = ChoiceType::Complex(&RANGE),
        Reference(Reference) = ChoiceType::Complex(&REFERENCE),
    }
}

/// Describes the context of use for a conformance or knowledge resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageContext {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Type of context being specified
    pub code: Coding,
    /// Value that defines the context
    pub value: Option<UsageContextValue>,
}

impl FhirType for UsageContext {
    fn descriptor() -> &'static TypeDescriptor {
        &USAGE_CONTEXT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&USAGE_CONTEXT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("code", &self.code);
        node.put_choice("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            code: node.take("code")?,
            value: node.take_choice("value")?,
        })
    }
}

impl_node_value!(ContactDetail, UsageContext);
