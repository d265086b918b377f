//! Special-purpose datatypes: Narrative and Meta

use super::*;
use crate::primitives::*;
use strata_codec::{
    impl_node_value, ComplexNode, FhirType, FieldDescriptor, PrimitiveType, Result,
    TypeDescriptor, TypeKind,
};

pub static NARRATIVE: TypeDescriptor = TypeDescriptor {
    name: "Narrative",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("status", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("div", PrimitiveType::Xhtml).required(),
    ],
};

/// Human-readable summary of the resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Narrative {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// generated | extensions | additional | empty
    pub status: FhirCode,
    /// Limited xhtml content, including the enclosing `div`
    pub div: FhirXhtml,
}

impl Narrative {
    pub fn new(status: impl Into<String>, div: impl Into<String>) -> Self {
        Self {
            status: FhirCode::new(status.into()),
            div: FhirXhtml::new(div.into()),
            ..Self::default()
        }
    }
}

impl FhirType for Narrative {
    fn descriptor() -> &'static TypeDescriptor {
        &NARRATIVE
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&NARRATIVE).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("status", &self.status);
        node.put("div", &self.div);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            status: node.take("status")?,
            div: node.take("div")?,
        })
    }
}

pub static META: TypeDescriptor = TypeDescriptor {
    name: "Meta",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("versionId", PrimitiveType::Id),
        FieldDescriptor::primitive("lastUpdated", PrimitiveType::Instant),
        FieldDescriptor::primitive("source", PrimitiveType::Uri),
        FieldDescriptor::primitive("profile", PrimitiveType::Canonical).repeating(),
        FieldDescriptor::complex("security", &CODING).repeating(),
        FieldDescriptor::complex("tag", &CODING).repeating(),
    ],
};

/// Metadata about a resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Version specific identifier
    pub version_id: Option<FhirId>,
    /// When the resource version last changed
    pub last_updated: Option<FhirInstant>,
    /// Identifies where the resource comes from
    pub source: Option<FhirUri>,
    /// Profiles this resource claims to conform to
    pub profile: Vec<FhirCanonical>,
    /// Security Labels applied to this resource
    pub security: Vec<Coding>,
    /// Tags applied to this resource
    pub tag: Vec<Coding>,
}

impl FhirType for Meta {
    fn descriptor() -> &'static TypeDescriptor {
        &META
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&META).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("versionId", &self.version_id);
        node.put("lastUpdated", &self.last_updated);
        node.put("source", &self.source);
        node.put("profile", &self.profile);
        node.put("security", &self.security);
        node.put("tag", &self.tag);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            version_id: node.take("versionId")?,
            last_updated: node.take("lastUpdated")?,
            source: node.take("source")?,
            profile: node.take("profile")?,
            security: node.take("security")?,
            tag: node.take("tag")?,
        })
    }
}

impl_node_value!(Narrative, Meta);
