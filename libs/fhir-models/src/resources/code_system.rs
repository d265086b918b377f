//! FHIR CodeSystem resource
//!
//! Declares the existence of and describes a code system or code system
//! supplement. Concepts are stored as data only; no terminology operations.

use super::Resource;
use crate::datatypes::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static CODE_SYSTEM: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem",
    kind: TypeKind::Resource,
    fields: domain_resource_fields![
        FieldDescriptor::primitive("url", PrimitiveType::Uri),
        FieldDescriptor::complex("identifier", &IDENTIFIER).repeating(),
        FieldDescriptor::primitive("version", PrimitiveType::String),
        FieldDescriptor::primitive("name", PrimitiveType::String),
        FieldDescriptor::primitive("title", PrimitiveType::String),
        FieldDescriptor::primitive("status", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("experimental", PrimitiveType::Boolean),
        FieldDescriptor::primitive("date", PrimitiveType::DateTime),
        FieldDescriptor::primitive("publisher", PrimitiveType::String),
        FieldDescriptor::complex("contact", &CONTACT_DETAIL).repeating(),
        FieldDescriptor::primitive("description", PrimitiveType::Markdown),
        FieldDescriptor::complex("useContext", &USAGE_CONTEXT).repeating(),
        FieldDescriptor::complex("jurisdiction", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::primitive("purpose", PrimitiveType::Markdown),
        FieldDescriptor::primitive("copyright", PrimitiveType::Markdown),
        FieldDescriptor::primitive("caseSensitive", PrimitiveType::Boolean),
        FieldDescriptor::primitive("valueSet", PrimitiveType::Canonical),
        FieldDescriptor::primitive("hierarchyMeaning", PrimitiveType::Code),
        FieldDescriptor::primitive("compositional", PrimitiveType::Boolean),
        FieldDescriptor::primitive("versionNeeded", PrimitiveType::Boolean),
        FieldDescriptor::primitive("content", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("supplements", PrimitiveType::Canonical),
        FieldDescriptor::primitive("count", PrimitiveType::UnsignedInt),
        FieldDescriptor::complex("filter", &CODE_SYSTEM_FILTER).repeating(),
        FieldDescriptor::complex("property", &CODE_SYSTEM_PROPERTY).repeating(),
        FieldDescriptor::complex("concept", &CODE_SYSTEM_CONCEPT).repeating(),
    ],
};

/// FHIR CodeSystem resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystem {
    /// Logical id of this artifact
    pub id: Option<FhirId>,
    /// Metadata about the resource
    pub meta: Option<Meta>,
    /// A set of rules under which this content was created
    pub implicit_rules: Option<FhirUri>,
    /// Language of the resource content
    pub language: Option<FhirCode>,
    /// Text summary of the resource, for human interpretation
    pub text: Option<Narrative>,
    /// Contained, inline Resources
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,

    /// Canonical identifier for this code system
    pub url: Option<FhirUri>,
    /// Additional identifier for the code system
    pub identifier: Vec<Identifier>,
    /// Business version of the code system
    pub version: Option<FhirString>,
    /// Name for this code system (computer friendly)
    pub name: Option<FhirString>,
    /// Name for this code system (human friendly)
    pub title: Option<FhirString>,
    /// draft | active | retired | unknown
    pub status: FhirCode,
    /// For testing purposes, not real usage
    pub experimental: Option<FhirBoolean>,
    /// Date last changed
    pub date: Option<FhirDateTime>,
    /// Name of the publisher
    pub publisher: Option<FhirString>,
    /// Contact details for the publisher
    pub contact: Vec<ContactDetail>,
    /// Natural language description of the code system
    pub description: Option<FhirMarkdown>,
    /// The context that the content is intended to support
    pub use_context: Vec<UsageContext>,
    /// Intended jurisdiction for code system (if applicable)
    pub jurisdiction: Vec<CodeableConcept>,
    /// Why this code system is defined
    pub purpose: Option<FhirMarkdown>,
    /// Use and/or publishing restrictions
    pub copyright: Option<FhirMarkdown>,
    /// If code comparison is case sensitive
    pub case_sensitive: Option<FhirBoolean>,
    /// Canonical reference to the value set with entire code system
    pub value_set: Option<FhirCanonical>,
    /// grouped-by | is-a | part-of | classified-with
    pub hierarchy_meaning: Option<FhirCode>,
    /// If code system defines a compositional grammar
    pub compositional: Option<FhirBoolean>,
    /// If definitions are not stable
    pub version_needed: Option<FhirBoolean>,
    /// not-present | example | fragment | complete | supplement
    pub content: FhirCode,
    /// Canonical URL of Code System this adds designations and properties to
    pub supplements: Option<FhirCanonical>,
    /// Total concepts in the code system
    pub count: Option<FhirUnsignedInt>,
    /// Filter that can be used in a value set
    pub filter: Vec<CodeSystemFilter>,
    /// Additional information supplied about each concept
    pub property: Vec<CodeSystemProperty>,
    /// Concepts in the code system
    pub concept: Vec<CodeSystemConcept>,
}

impl CodeSystem {
    /// Create a CodeSystem with minimal required fields
    pub fn new(url: impl Into<String>, status: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: Some(FhirUri::new(url.into())),
            status: FhirCode::new(status.into()),
            content: FhirCode::new(content.into()),
            ..Self::default()
        }
    }

    /// Find a concept by code, searching nested concepts depth-first
    pub fn find_concept(&self, code: &str) -> Option<&CodeSystemConcept> {
        fn search<'a>(concepts: &'a [CodeSystemConcept], code: &str) -> Option<&'a CodeSystemConcept> {
            concepts.iter().find_map(|concept| {
                if concept.code.as_str() == Some(code) {
                    Some(concept)
                } else {
                    search(&concept.concept, code)
                }
            })
        }
        search(&self.concept, code)
    }
}

impl FhirType for CodeSystem {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM);
        node.put("id", &self.id);
        node.put("meta", &self.meta);
        node.put("implicitRules", &self.implicit_rules);
        node.put("language", &self.language);
        node.put("text", &self.text);
        node.put("contained", &self.contained);
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("url", &self.url);
        node.put("identifier", &self.identifier);
        node.put("version", &self.version);
        node.put("name", &self.name);
        node.put("title", &self.title);
        node.put("status", &self.status);
        node.put("experimental", &self.experimental);
        node.put("date", &self.date);
        node.put("publisher", &self.publisher);
        node.put("contact", &self.contact);
        node.put("description", &self.description);
        node.put("useContext", &self.use_context);
        node.put("jurisdiction", &self.jurisdiction);
        node.put("purpose", &self.purpose);
        node.put("copyright", &self.copyright);
        node.put("caseSensitive", &self.case_sensitive);
        node.put("valueSet", &self.value_set);
        node.put("hierarchyMeaning", &self.hierarchy_meaning);
        node.put("compositional", &self.compositional);
        node.put("versionNeeded", &self.version_needed);
        node.put("content", &self.content);
        node.put("supplements", &self.supplements);
        node.put("count", &self.count);
        node.put("filter", &self.filter);
        node.put("property", &self.property);
        node.put("concept", &self.concept);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.take("id")?,
            meta: node.take("meta")?,
            implicit_rules: node.take("implicitRules")?,
            language: node.take("language")?,
            text: node.take("text")?,
            contained: node.take("contained")?,
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            url: node.take("url")?,
            identifier: node.take("identifier")?,
            version: node.take("version")?,
            name: node.take("name")?,
            title: node.take("title")?,
            status: node.take("status")?,
            experimental: node.take("experimental")?,
            date: node.take("date")?,
            publisher: node.take("publisher")?,
            contact: node.take("contact")?,
            description: node.take("description")?,
            use_context: node.take("useContext")?,
            jurisdiction: node.take("jurisdiction")?,
            purpose: node.take("purpose")?,
            copyright: node.take("copyright")?,
            case_sensitive: node.take("caseSensitive")?,
            value_set: node.take("valueSet")?,
            hierarchy_meaning: node.take("hierarchyMeaning")?,
            compositional: node.take("compositional")?,
            version_needed: node.take("versionNeeded")?,
            content: node.take("content")?,
            supplements: node.take("supplements")?,
            count: node.take("count")?,
            filter: node.take("filter")?,
            property: node.take("property")?,
            concept: node.take("concept")?,
        })
    }
}

pub static CODE_SYSTEM_FILTER: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem.filter",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("code", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("description", PrimitiveType::String),
        FieldDescriptor::primitive("operator", PrimitiveType::Code)
            .required()
            .repeating(),
        FieldDescriptor::primitive("value", PrimitiveType::String).required(),
    ],
};

/// Filter that can be used in a value set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystemFilter {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Code that identifies the filter
    pub code: FhirCode,
    /// How or why the filter is used
    pub description: Option<FhirString>,
    /// = | is-a | descendent-of | is-not-a | regex | in | not-in | generalizes | exists
    pub operator: Vec<FhirCode>,
    /// What to use for the value
    pub value: FhirString,
}

impl FhirType for CodeSystemFilter {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM_FILTER
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM_FILTER).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("code", &self.code);
        node.put("description", &self.description);
        node.put("operator", &self.operator);
        node.put("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            code: node.take("code")?,
            description: node.take("description")?,
            operator: node.take("operator")?,
            value: node.take("value")?,
        })
    }
}

pub static CODE_SYSTEM_PROPERTY: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem.property",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("code", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("uri", PrimitiveType::Uri),
        FieldDescriptor::primitive("description", PrimitiveType::String),
        FieldDescriptor::primitive("type", PrimitiveType::Code).required(),
    ],
};

/// Additional information supplied about each concept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystemProperty {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Identifies the property on the concepts, and when referred to in operations
    pub code: FhirCode,
    /// Formal identifier for the property
    pub uri: Option<FhirUri>,
    /// Why the property is defined, and/or what it conveys
    pub description: Option<FhirString>,
    /// code | Coding | string | integer | boolean | dateTime | decimal
    pub type_: FhirCode,
}

impl FhirType for CodeSystemProperty {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM_PROPERTY
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM_PROPERTY).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("code", &self.code);
        node.put("uri", &self.uri);
        node.put("description", &self.description);
        node.put("type", &self.type_);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            code: node.take("code")?,
            uri: node.take("uri")?,
            description: node.take("description")?,
            type_: node.take("type")?,
        })
    }
}

pub static CODE_SYSTEM_CONCEPT: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem.concept",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("code", PrimitiveType::Code).required(),
        FieldDescriptor::primitive("display", PrimitiveType::String),
        FieldDescriptor::primitive("definition", PrimitiveType::String),
        FieldDescriptor::complex("designation", &CODE_SYSTEM_CONCEPT_DESIGNATION).repeating(),
        FieldDescriptor::complex("property", &CODE_SYSTEM_CONCEPT_PROPERTY).repeating(),
        FieldDescriptor::complex("concept", &CODE_SYSTEM_CONCEPT).repeating(),
    ],
};

/// Concepts in the code system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystemConcept {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Code that identifies concept
    pub code: FhirCode,
    /// Text to display to the user
    pub display: Option<FhirString>,
    /// Formal definition
    pub definition: Option<FhirString>,
    /// Additional representations for the concept
    pub designation: Vec<CodeSystemConceptDesignation>,
    /// Property value for the concept
    pub property: Vec<CodeSystemConceptProperty>,
    /// Child Concepts (is-a/contains/categorizes)
    pub concept: Vec<CodeSystemConcept>,
}

impl CodeSystemConcept {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: FhirCode::new(code.into()),
            display: Some(FhirString::new(display.into())),
            ..Self::default()
        }
    }
}

impl FhirType for CodeSystemConcept {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM_CONCEPT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM_CONCEPT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("code", &self.code);
        node.put("display", &self.display);
        node.put("definition", &self.definition);
        node.put("designation", &self.designation);
        node.put("property", &self.property);
        node.put("concept", &self.concept);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            code: node.take("code")?,
            display: node.take("display")?,
            definition: node.take("definition")?,
            designation: node.take("designation")?,
            property: node.take("property")?,
            concept: node.take("concept")?,
        })
    }
}

pub static CODE_SYSTEM_CONCEPT_DESIGNATION: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem.concept.designation",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("language", PrimitiveType::Code),
        FieldDescriptor::complex("use", &CODING),
        FieldDescriptor::primitive("value", PrimitiveType::String).required(),
    ],
};

/// Additional representations for the concept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystemConceptDesignation {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Human language of the designation
    pub language: Option<FhirCode>,
    /// Details how this designation would be used
    pub use_: Option<Coding>,
    /// The text value for this designation
    pub value: FhirString,
}

impl FhirType for CodeSystemConceptDesignation {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM_CONCEPT_DESIGNATION
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM_CONCEPT_DESIGNATION).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("language", &self.language);
        node.put("use", &self.use_);
        node.put("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            language: node.take("language")?,
            use_: node.take("use")?,
            value: node.take("value")?,
        })
    }
}

pub static CODE_SYSTEM_CONCEPT_PROPERTY: TypeDescriptor = TypeDescriptor {
    name: "CodeSystem.concept.property",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("code", PrimitiveType::Code).required(),
        FieldDescriptor::choice("value", &CONCEPT_PROPERTY_VALUE_TYPES).required(),
    ],
};

choice_type! {
    /// CodeSystem.concept.property.value[x]
    pub enum ConceptPropertyValue: CONCEPT_PROPERTY_VALUE_TYPES {
        Code(FhirCode) = ChoiceType::Primitive(PrimitiveType::Code),
        Coding(Coding) = ChoiceType::Complex(&CODING),
        String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
        Integer(FhirInteger) = ChoiceType::Primitive(PrimitiveType::Integer),
        Boolean(FhirBoolean) = ChoiceType::Primitive(PrimitiveType::Boolean),
        DateTime(FhirDateTime) = ChoiceType::Primitive(PrimitiveType::DateTime),
        Decimal(FhirDecimal) = ChoiceType::Primitive(PrimitiveType::Decimal),
    }
}

/// Property value for the concept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSystemConceptProperty {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Reference to CodeSystem.property.code
    pub code: FhirCode,
    /// Value of the property for this concept
    pub value: Option<ConceptPropertyValue>,
}

impl CodeSystemConceptProperty {
    pub fn new(code: impl Into<String>, value: ConceptPropertyValue) -> Self {
        Self {
            code: FhirCode::new(code.into()),
            value: Some(value),
            ..Self::default()
        }
    }
}

impl FhirType for CodeSystemConceptProperty {
    fn descriptor() -> &'static TypeDescriptor {
        &CODE_SYSTEM_CONCEPT_PROPERTY
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&CODE_SYSTEM_CONCEPT_PROPERTY).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("code", &self.code);
        node.put_choice("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            code: node.take("code")?,
            value: node.take_choice("value")?,
        })
    }
}

impl_node_value!(
    CodeSystemFilter,
    CodeSystemProperty,
    CodeSystemConcept,
    CodeSystemConceptDesignation,
    CodeSystemConceptProperty,
);
