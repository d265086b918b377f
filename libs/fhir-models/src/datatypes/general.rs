//! General-purpose FHIR datatypes

use super::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static CODING: TypeDescriptor = TypeDescriptor {
    name: "Coding",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("system", PrimitiveType::Uri),
        FieldDescriptor::primitive("version", PrimitiveType::String),
        FieldDescriptor::primitive("code", PrimitiveType::Code),
        FieldDescriptor::primitive("display", PrimitiveType::String),
        FieldDescriptor::primitive("userSelected", PrimitiveType::Boolean),
    ],
};

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coding {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Identity of the terminology system
    pub system: Option<FhirUri>,
    /// Version of the system - if relevant
    pub version: Option<FhirString>,
    /// Symbol in syntax defined by the system
    pub code: Option<FhirCode>,
    /// Representation defined by the system
    pub display: Option<FhirString>,
    /// If this coding was chosen directly by the user
    pub user_selected: Option<FhirBoolean>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(FhirUri::new(system.into())),
            code: Some(FhirCode::new(code.into())),
            ..Self::default()
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(FhirString::new(display.into()));
        self
    }
}

impl FhirType for Coding {
    fn descriptor() -> &'static TypeDescriptor {
        &CODING
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODING).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("system", &self.system);
        node.put("version", &self.version);
        node.put("code", &self.code);
        node.put("display", &self.display);
        node.put("userSelected", &self.user_selected);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            system: node.take("system")?,
            version: node.take("version")?,
            code: node.take("code")?,
            display: node.take("display")?,
            user_selected: node.take("userSelected")?,
        })
    }
}

pub static CODEABLE_CONCEPT: TypeDescriptor = TypeDescriptor {
    name: "CodeableConcept",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::complex("coding", &CODING).repeating(),
        FieldDescriptor::primitive("text", PrimitiveType::String),
    ],
};

/// Concept - reference to a terminology or just text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeableConcept {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Code defined by a terminology system
    pub coding: Vec<Coding>,
    /// Plain text representation of the concept
    pub text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            ..Self::default()
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(FhirString::new(text.into())),
            ..Self::default()
        }
    }
}

impl FhirType for CodeableConcept {
    fn descriptor() -> &'static TypeDescriptor {
        &CODEABLE_CONCEPT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODEABLE_CONCEPT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("coding", &self.coding);
        node.put("text", &self.text);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            coding: node.take("coding")?,
            text: node.take("text")?,
        })
    }
}

pub static QUANTITY: TypeDescriptor = TypeDescriptor {
    name: "Quantity",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("value", PrimitiveType::Decimal),
        FieldDescriptor::primitive("comparator", PrimitiveType::Code),
        FieldDescriptor::primitive("unit", PrimitiveType::String),
        FieldDescriptor::primitive("system", PrimitiveType::Uri),
        FieldDescriptor::primitive("code", PrimitiveType::Code),
    ],
};

/// A measured or measurable amount
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantity {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Numerical value (with implicit precision)
    pub value: Option<FhirDecimal>,
    /// < | <= | >= | > - how to understand the value
    pub comparator: Option<FhirCode>,
    /// Unit representation
    pub unit: Option<FhirString>,
    /// System that defines coded unit form
    pub system: Option<FhirUri>,
    /// Coded form of the unit
    pub code: Option<FhirCode>,
}

impl FhirType for Quantity {
    fn descriptor() -> &'static TypeDescriptor {
        &QUANTITY
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&QUANTITY).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("value", &self.value);
        node.put("comparator", &self.comparator);
        node.put("unit", &self.unit);
        node.put("system", &self.system);
        node.put("code", &self.code);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            value: node.take("value")?,
            comparator: node.take("comparator")?,
            unit: node.take("unit")?,
            system: node.take("system")?,
            code: node.take("code")?,
        })
    }
}

pub static PERIOD: TypeDescriptor = TypeDescriptor {
    name: "Period",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("start", PrimitiveType::DateTime),
        FieldDescriptor::primitive("end", PrimitiveType::DateTime),
    ],
};

/// Time range defined by start and end date/time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Period {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub start: Option<FhirDateTime>,
    pub end: Option<FhirDateTime>,
}

impl FhirType for Period {
    fn descriptor() -> &'static TypeDescriptor {
        &PERIOD
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&PERIOD).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("start", &self.start);
        node.put("end", &self.end);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            start: node.take("start")?,
            end: node.take("end")?,
        })
    }
}

pub static RANGE: TypeDescriptor = TypeDescriptor {
    name: "Range",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::complex("low", &QUANTITY),
        FieldDescriptor::complex("high", &QUANTITY),
    ],
};

/// Set of values bounded by low and high
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub low: Option<Quantity>,
    pub high: Option<Quantity>,
}

impl FhirType for Range {
    fn descriptor() -> &'static TypeDescriptor {
        &RANGE
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&RANGE).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("low", &self.low);
        node.put("high", &self.high);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            low: node.take("low")?,
            high: node.take("high")?,
        })
    }
}

pub static RATIO: TypeDescriptor = TypeDescriptor {
    name: "Ratio",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::complex("numerator", &QUANTITY),
        FieldDescriptor::complex("denominator", &QUANTITY),
    ],
};

/// A ratio of two Quantity values - a numerator and a denominator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ratio {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub numerator: Option<Quantity>,
    pub denominator: Option<Quantity>,
}

impl FhirType for Ratio {
    fn descriptor() -> &'static TypeDescriptor {
        &RATIO
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&RATIO).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("numerator", &self.numerator);
        node.put("denominator", &self.denominator);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            numerator: node.take("numerator")?,
            denominator: node.take("denominator")?,
        })
    }
}

pub static IDENTIFIER: TypeDescriptor = TypeDescriptor {
    name: "Identifier",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("use", PrimitiveType::Code),
        FieldDescriptor::complex("type", &CODEABLE_CONCEPT),
        FieldDescriptor::primitive("system", PrimitiveType::Uri),
        FieldDescriptor::primitive("value", PrimitiveType::String),
        FieldDescriptor::complex("period", &PERIOD),
        FieldDescriptor::complex("assigner", &REFERENCE),
    ],
};

/// An identifier intended for computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identifier {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// usual | official | temp | secondary | old (If known)
    pub use_: Option<FhirCode>,
    /// Description of identifier
    pub type_: Option<CodeableConcept>,
    /// The namespace for the identifier value
    pub system: Option<FhirUri>,
    /// The value that is unique
    pub value: Option<FhirString>,
    /// Time period when id is/was valid for use
    pub period: Option<Period>,
    /// Organization that issued id (may be just text)
    pub assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: Some(FhirUri::new(system.into())),
            value: Some(FhirString::new(value.into())),
            ..Self::default()
        }
    }
}

impl FhirType for Identifier {
    fn descriptor() -> &'static TypeDescriptor {
        &IDENTIFIER
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&IDENTIFIER).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("use", &self.use_);
        node.put("type", &self.type_);
        node.put("system", &self.system);
        node.put("value", &self.value);
        node.put("period", &self.period);
        node.put("assigner", &self.assigner);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            use_: node.take("use")?,
            type_: node.take("type")?,
            system: node.take("system")?,
            value: node.take("value")?,
            period: node.take("period")?,
            assigner: node.take("assigner")?,
        })
    }
}

pub static REFERENCE: TypeDescriptor = TypeDescriptor {
    name: "Reference",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("reference", PrimitiveType::String),
        FieldDescriptor::primitive("type", PrimitiveType::Uri),
        FieldDescriptor::complex("identifier", &IDENTIFIER),
        FieldDescriptor::primitive("display", PrimitiveType::String),
    ],
};

/// A reference from one resource to another
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Literal reference, Relative, internal or absolute URL
    pub reference: Option<FhirString>,
    /// Type the reference refers to (e.g. "Patient")
    pub type_: Option<FhirUri>,
    /// Logical reference, when literal reference is not known
    pub identifier: Option<Identifier>,
    /// Text alternative for the resource
    pub display: Option<FhirString>,
}

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(FhirString::new(reference.into())),
            ..Self::default()
        }
    }

    /// Local reference to a contained resource (`#id`)
    pub fn contained(id: &str) -> Self {
        Self::new(format!("#{id}"))
    }
}

impl FhirType for Reference {
    fn descriptor() -> &'static TypeDescriptor {
        &REFERENCE
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&REFERENCE).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("reference", &self.reference);
        node.put("type", &self.type_);
        node.put("identifier", &self.identifier);
        node.put("display", &self.display);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            reference: node.take("reference")?,
            type_: node.take("type")?,
            identifier: node.take("identifier")?,
            display: node.take("display")?,
        })
    }
}

pub static ATTACHMENT: TypeDescriptor = TypeDescriptor {
    name: "Attachment",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("contentType", PrimitiveType::Code),
        FieldDescriptor::primitive("language", PrimitiveType::Code),
        FieldDescriptor::primitive("data", PrimitiveType::Base64Binary),
        FieldDescriptor::primitive("url", PrimitiveType::Url),
        FieldDescriptor::primitive("size", PrimitiveType::UnsignedInt),
        FieldDescriptor::primitive("hash", PrimitiveType::Base64Binary),
        FieldDescriptor::primitive("title", PrimitiveType::String),
        FieldDescriptor::primitive("creation", PrimitiveType::DateTime),
    ],
};

/// Content in a format defined elsewhere
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachment {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Mime type of the content, with charset etc.
    pub content_type: Option<FhirCode>,
    /// Human language of the content (BCP-47)
    pub language: Option<FhirCode>,
    /// Data inline, base64ed
    pub data: Option<FhirBase64Binary>,
    /// Uri where the data can be found
    pub url: Option<FhirUrl>,
    /// Number of bytes of content (if url provided)
    pub size: Option<FhirUnsignedInt>,
    /// Hash of the data (sha-1, base64ed)
    pub hash: Option<FhirBase64Binary>,
    /// Label to display in place of the data
    pub title: Option<FhirString>,
    /// Date attachment was first created
    pub creation: Option<FhirDateTime>,
}

impl FhirType for Attachment {
    fn descriptor() -> &'static TypeDescriptor {
        &ATTACHMENT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&ATTACHMENT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("contentType", &self.content_type);
        node.put("language", &self.language);
        node.put("data", &self.data);
        node.put("url", &self.url);
        node.put("size", &self.size);
        node.put("hash", &self.hash);
        node.put("title", &self.title);
        node.put("creation", &self.creation);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            content_type: node.take("contentType")?,
            language: node.take("language")?,
            data: node.take("data")?,
            url: node.take("url")?,
            size: node.take("size")?,
            hash: node.take("hash")?,
            title: node.take("title")?,
            creation: node.take("creation")?,
        })
    }
}

pub static ANNOTATION: TypeDescriptor = TypeDescriptor {
    name: "Annotation",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::choice("author", &ANNOTATION_AUTHOR_TYPES),
        FieldDescriptor::primitive("time", PrimitiveType::DateTime),
        FieldDescriptor::primitive("text", PrimitiveType::Markdown).required(),
    ],
};

choice_type! {
    /// Annotation.author[x]
    pub enum AnnotationAuthor: ANNOTATION_AUTHOR_TYPES {
        Reference(Reference) = ChoiceType::Complex(&REFERENCE),
        String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
    }
}

/// Text node with attribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// Individual responsible for the annotation
    pub author: Option<AnnotationAuthor>,
    /// When the annotation was made
    pub time: Option<FhirDateTime>,
    /// The annotation - text content (as markdown)
    pub text: FhirMarkdown,
}

impl FhirType for Annotation {
    fn descriptor() -> &'static TypeDescriptor {
        &ANNOTATION
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&ANNOTATION).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put_choice("author", &self.author);
        node.put("time", &self.time);
        node.put("text", &self.text);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            author: node.take_choice("author")?,
            time: node.take("time")?,
            text: node.take("text")?,
        })
    }
}

pub static CONTACT_POINT: TypeDescriptor = TypeDescriptor {
    name: "ContactPoint",
    kind: TypeKind::ComplexType,
    fields: &[
        FieldDescriptor::complex("extension", &EXTENSION).repeating(),
        FieldDescriptor::primitive("system", PrimitiveType::Code),
        FieldDescriptor::primitive("value", PrimitiveType::String),
        FieldDescriptor::primitive("use", PrimitiveType::Code),
        FieldDescriptor::primitive("rank", PrimitiveType::PositiveInt),
        FieldDescriptor::complex("period", &PERIOD),
    ],
};

/// Details of a Technology mediated contact point (phone, fax, email, etc.)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPoint {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    /// phone | fax | email | pager | url | sms | other
    pub system: Option<FhirCode>,
    /// The actual contact point details
    pub value: Option<FhirString>,
    /// home | work | temp | old | mobile - purpose of this contact point
    pub use_: Option<FhirCode>,
    /// Specify preferred order of use (1 = highest)
    pub rank: Option<FhirPositiveInt>,
    /// Time period when the contact point was/is in use
    pub period: Option<Period>,
}

impl FhirType for ContactPoint {
    fn descriptor() -> &'static TypeDescriptor {
        &CONTACT_POINT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CONTACT_POINT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("system", &self.system);
        node.put("value", &self.value);
        node.put("use", &self.use_);
        node.put("rank", &self.rank);
        node.put("period", &self.period);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            system: node.take("system")?,
            value: node.take("value")?,
            use_: node.take("use")?,
            rank: node.take("rank")?,
            period: node.take("period")?,
        })
    }
}

impl_node_value!(
    Coding,
    CodeableConcept,
    Quantity,
    Period,
    Range,
    Ratio,
    Identifier,
    Reference,
    Attachment,
    Annotation,
    ContactPoint,
);
