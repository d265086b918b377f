//! FHIR Communication resource
//!
//! A record of information transmitted from a sender to a receiver.

use super::Resource;
use crate::datatypes::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static COMMUNICATION: TypeDescriptor = TypeDescriptor {
    name: "Communication",
    kind: TypeKind::Resource,
    fields: domain_resource_fields![
        FieldDescriptor::complex("identifier", &IDENTIFIER).repeating(),
        FieldDescriptor::primitive("instantiatesCanonical", PrimitiveType::Canonical).repeating(),
        FieldDescriptor::primitive("instantiatesUri", PrimitiveType::Uri).repeating(),
        FieldDescriptor::complex("basedOn", &REFERENCE).repeating(),
        FieldDescriptor::complex("partOf", &REFERENCE).repeating(),
        FieldDescriptor::complex("inResponseTo", &REFERENCE).repeating(),
        FieldDescriptor::primitive("status", PrimitiveType::Code).required(),
        FieldDescriptor::complex("statusReason", &CODEABLE_CONCEPT),
        FieldDescriptor::complex("category", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::primitive("priority", PrimitiveType::Code),
        FieldDescriptor::complex("medium", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::complex("subject", &REFERENCE),
        FieldDescriptor::complex("topic", &CODEABLE_CONCEPT),
        FieldDescriptor::complex("about", &REFERENCE).repeating(),
        FieldDescriptor::complex("encounter", &REFERENCE),
        FieldDescriptor::primitive("sent", PrimitiveType::DateTime),
        FieldDescriptor::primitive("received", PrimitiveType::DateTime),
        FieldDescriptor::complex("recipient", &REFERENCE).repeating(),
        FieldDescriptor::complex("sender", &REFERENCE),
        FieldDescriptor::complex("reasonCode", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::complex("reasonReference", &REFERENCE).repeating(),
        FieldDescriptor::complex("payload", &COMMUNICATION_PAYLOAD).repeating(),
        FieldDescriptor::complex("note", &ANNOTATION).repeating(),
    ],
};

/// FHIR Communication resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Communication {
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

    /// Unique identifier
    pub identifier: Vec<Identifier>,
    /// Instantiates FHIR protocol or definition
    pub instantiates_canonical: Vec<FhirCanonical>,
    /// Instantiates external protocol or definition
    pub instantiates_uri: Vec<FhirUri>,
    /// Request fulfilled by this communication
    pub based_on: Vec<Reference>,
    /// Part of this action
    pub part_of: Vec<Reference>,
    /// Reply to
    pub in_response_to: Vec<Reference>,
    /// preparation | in-progress | not-done | on-hold | stopped | completed | entered-in-error | unknown
    pub status: FhirCode,
    /// Reason for current status
    pub status_reason: Option<CodeableConcept>,
    /// Message category
    pub category: Vec<CodeableConcept>,
    /// routine | urgent | asap | stat
    pub priority: Option<FhirCode>,
    /// A channel of communication
    pub medium: Vec<CodeableConcept>,
    /// Focus of message
    pub subject: Option<Reference>,
    /// Description of the purpose/content
    pub topic: Option<CodeableConcept>,
    /// Resources that pertain to this communication
    pub about: Vec<Reference>,
    /// Encounter created as part of
    pub encounter: Option<Reference>,
    /// When sent
    pub sent: Option<FhirDateTime>,
    /// When received
    pub received: Option<FhirDateTime>,
    /// Message recipient
    pub recipient: Vec<Reference>,
    /// Message sender
    pub sender: Option<Reference>,
    /// Indication for message
    pub reason_code: Vec<CodeableConcept>,
    /// Why was communication done?
    pub reason_reference: Vec<Reference>,
    /// Message payload
    pub payload: Vec<CommunicationPayload>,
    /// Comments made about the communication
    pub note: Vec<Annotation>,
}

impl Communication {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: FhirCode::new(status.into()),
            ..Self::default()
        }
    }
}

impl FhirType for Communication {
    fn descriptor() -> &'static TypeDescriptor {
        &COMMUNICATION
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&COMMUNICATION);
        node.put("id", &self.id);
        node.put("meta", &self.meta);
        node.put("implicitRules", &self.implicit_rules);
        node.put("language", &self.language);
        node.put("text", &self.text);
        node.put("contained", &self.contained);
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("identifier", &self.identifier);
        node.put("instantiatesCanonical", &self.instantiates_canonical);
        node.put("instantiatesUri", &self.instantiates_uri);
        node.put("basedOn", &self.based_on);
        node.put("partOf", &self.part_of);
        node.put("inResponseTo", &self.in_response_to);
        node.put("status", &self.status);
        node.put("statusReason", &self.status_reason);
        node.put("category", &self.category);
        node.put("priority", &self.priority);
        node.put("medium", &self.medium);
        node.put("subject", &self.subject);
        node.put("topic", &self.topic);
        node.put("about", &self.about);
        node.put("encounter", &self.encounter);
        node.put("sent", &self.sent);
        node.put("received", &self.received);
        node.put("recipient", &self.recipient);
        node.put("sender", &self.sender);
        node.put("reasonCode", &self.reason_code);
        node.put("reasonReference", &self.reason_reference);
        node.put("payload", &self.payload);
        node.put("note", &self.note);
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
            identifier: node.take("identifier")?,
            instantiates_canonical: node.take("instantiatesCanonical")?,
            instantiates_uri: node.take("instantiatesUri")?,
            based_on: node.take("basedOn")?,
            part_of: node.take("partOf")?,
            in_response_to: node.take("inResponseTo")?,
            status: node.take("status")?,
            status_reason: node.take("statusReason")?,
            category: node.take("category")?,
            priority: node.take("priority")?,
            medium: node.take("medium")?,
            subject: node.take("subject")?,
            topic: node.take("topic")?,
            about: node.take("about")?,
            encounter: node.take("encounter")?,
            sent: node.take("sent")?,
            received: node.take("received")?,
            recipient: node.take("recipient")?,
            sender: node.take("sender")?,
            reason_code: node.take("reasonCode")?,
            reason_reference: node.take("reasonReference")?,
            payload: node.take("payload")?,
            note: node.take("note")?,
        })
    }
}

pub static COMMUNICATION_PAYLOAD: TypeDescriptor = TypeDescriptor {
    name: "Communication.payload",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::choice("content", &COMMUNICATION_PAYLOAD_CONTENT_TYPES).required(),
    ],
};

choice_type! {
    /// Communication.payload.content[x]
    pub enum CommunicationPayloadContent: COMMUNICATION_PAYLOAD_CONTENT_TYPES {
        String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
        Attachment(Attachment) = ChoiceType::Complex(&ATTACHMENT),
        Reference(Reference) = ChoiceType::Complex(&REFERENCE),
    }
}

/// Message payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationPayload {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Message part content
    pub content: Option<CommunicationPayloadContent>,
}

impl CommunicationPayload {
    pub fn new(content: CommunicationPayloadContent) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

impl FhirType for CommunicationPayload {
    fn descriptor() -> &'static TypeDescriptor {
        &COMMUNICATION_PAYLOAD
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&COMMUNICATION_PAYLOAD).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put_choice("content", &self.content);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            content: node.take_choice("content")?,
        })
    }
}

impl_node_value!(CommunicationPayload);
