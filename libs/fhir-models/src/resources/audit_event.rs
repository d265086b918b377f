//! FHIR AuditEvent resource
//!
//! A record of an event made for purposes of maintaining a security log.

use super::Resource;
use crate::datatypes::*;
use crate::primitives::*;
use strata_codec::{
    choice_type, impl_node_value, ChoiceType, ComplexNode, FhirType, FieldDescriptor,
    PrimitiveType, Result, TypeDescriptor, TypeKind,
};

pub static AUDIT_EVENT: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent",
    kind: TypeKind::Resource,
    fields: domain_resource_fields![
        FieldDescriptor::complex("type", &CODING).required(),
        FieldDescriptor::complex("subtype", &CODING).repeating(),
        FieldDescriptor::primitive("action", PrimitiveType::Code),
        FieldDescriptor::complex("period", &PERIOD),
        FieldDescriptor::primitive("recorded", PrimitiveType::Instant).required(),
        FieldDescriptor::primitive("outcome", PrimitiveType::Code),
        FieldDescriptor::primitive("outcomeDesc", PrimitiveType::String),
        FieldDescriptor::complex("purposeOfEvent", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::complex("agent", &AUDIT_EVENT_AGENT)
            .required()
            .repeating(),
        FieldDescriptor::complex("source", &AUDIT_EVENT_SOURCE).required(),
        FieldDescriptor::complex("entity", &AUDIT_EVENT_ENTITY).repeating(),
    ],
};

/// FHIR AuditEvent resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEvent {
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

    /// Type/identifier of event
    pub type_: Coding,
    /// More specific type/id for the event
    pub subtype: Vec<Coding>,
    /// Type of action performed during the event (C | R | U | D | E)
    pub action: Option<FhirCode>,
    /// When the activity occurred
    pub period: Option<Period>,
    /// Time when the event was recorded
    pub recorded: FhirInstant,
    /// Whether the event succeeded or failed (0 | 4 | 8 | 12)
    pub outcome: Option<FhirCode>,
    /// Description of the event outcome
    pub outcome_desc: Option<FhirString>,
    /// The purposeOfUse of the event
    pub purpose_of_event: Vec<CodeableConcept>,
    /// Actor involved in the event
    pub agent: Vec<AuditEventAgent>,
    /// Audit Event Reporter
    pub source: AuditEventSource,
    /// Data or objects used
    pub entity: Vec<AuditEventEntity>,
}

impl AuditEvent {
    /// Create an AuditEvent with its required fields
    pub fn new(type_: Coding, recorded: impl Into<String>, source: AuditEventSource) -> Self {
        Self {
            type_,
            recorded: FhirInstant::new(recorded.into()),
            source,
            ..Self::default()
        }
    }

    /// Whether the outcome code reports success
    pub fn is_success(&self) -> bool {
        self.outcome.as_ref().and_then(|o| o.as_str()) == Some("0")
    }
}

impl FhirType for AuditEvent {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT);
        node.put("id", &self.id);
        node.put("meta", &self.meta);
        node.put("implicitRules", &self.implicit_rules);
        node.put("language", &self.language);
        node.put("text", &self.text);
        node.put("contained", &self.contained);
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("type", &self.type_);
        node.put("subtype", &self.subtype);
        node.put("action", &self.action);
        node.put("period", &self.period);
        node.put("recorded", &self.recorded);
        node.put("outcome", &self.outcome);
        node.put("outcomeDesc", &self.outcome_desc);
        node.put("purposeOfEvent", &self.purpose_of_event);
        node.put("agent", &self.agent);
        node.put("source", &self.source);
        node.put("entity", &self.entity);
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
            type_: node.take("type")?,
            subtype: node.take("subtype")?,
            action: node.take("action")?,
            period: node.take("period")?,
            recorded: node.take("recorded")?,
            outcome: node.take("outcome")?,
            outcome_desc: node.take("outcomeDesc")?,
            purpose_of_event: node.take("purposeOfEvent")?,
            agent: node.take("agent")?,
            source: node.take("source")?,
            entity: node.take("entity")?,
        })
    }
}

pub static AUDIT_EVENT_AGENT: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent.agent",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::complex("type", &CODEABLE_CONCEPT),
        FieldDescriptor::complex("role", &CODEABLE_CONCEPT).repeating(),
        FieldDescriptor::complex("who", &REFERENCE),
        FieldDescriptor::primitive("altId", PrimitiveType::String),
        FieldDescriptor::primitive("name", PrimitiveType::String),
        FieldDescriptor::primitive("requestor", PrimitiveType::Boolean).required(),
        FieldDescriptor::complex("location", &REFERENCE),
        FieldDescriptor::primitive("policy", PrimitiveType::Uri).repeating(),
        FieldDescriptor::complex("media", &CODING),
        FieldDescriptor::complex("network", &AUDIT_EVENT_AGENT_NETWORK),
        FieldDescriptor::complex("purposeOfUse", &CODEABLE_CONCEPT).repeating(),
    ],
};

/// Actor involved in the event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEventAgent {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// How agent participated
    pub type_: Option<CodeableConcept>,
    /// Agent role in the event
    pub role: Vec<CodeableConcept>,
    /// Identifier of who
    pub who: Option<Reference>,
    /// Alternative User identity
    pub alt_id: Option<FhirString>,
    /// Human friendly name for the agent
    pub name: Option<FhirString>,
    /// Whether user is initiator
    pub requestor: FhirBoolean,
    /// Where
    pub location: Option<Reference>,
    /// Policy that authorized event
    pub policy: Vec<FhirUri>,
    /// Type of media
    pub media: Option<Coding>,
    /// Logical network location for application activity
    pub network: Option<AuditEventAgentNetwork>,
    /// Reason given for this user
    pub purpose_of_use: Vec<CodeableConcept>,
}

impl FhirType for AuditEventAgent {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT_AGENT
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT_AGENT).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("type", &self.type_);
        node.put("role", &self.role);
        node.put("who", &self.who);
        node.put("altId", &self.alt_id);
        node.put("name", &self.name);
        node.put("requestor", &self.requestor);
        node.put("location", &self.location);
        node.put("policy", &self.policy);
        node.put("media", &self.media);
        node.put("network", &self.network);
        node.put("purposeOfUse", &self.purpose_of_use);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            type_: node.take("type")?,
            role: node.take("role")?,
            who: node.take("who")?,
            alt_id: node.take("altId")?,
            name: node.take("name")?,
            requestor: node.take("requestor")?,
            location: node.take("location")?,
            policy: node.take("policy")?,
            media: node.take("media")?,
            network: node.take("network")?,
            purpose_of_use: node.take("purposeOfUse")?,
        })
    }
}

pub static AUDIT_EVENT_AGENT_NETWORK: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent.agent.network",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("address", PrimitiveType::String),
        FieldDescriptor::primitive("type", PrimitiveType::Code),
    ],
};

/// Logical network location for application activity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEventAgentNetwork {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Identifier for the network access point of the user device
    pub address: Option<FhirString>,
    /// The type of network access point
    pub type_: Option<FhirCode>,
}

impl FhirType for AuditEventAgentNetwork {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT_AGENT_NETWORK
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT_AGENT_NETWORK).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("address", &self.address);
        node.put("type", &self.type_);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            address: node.take("address")?,
            type_: node.take("type")?,
        })
    }
}

pub static AUDIT_EVENT_SOURCE: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent.source",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("site", PrimitiveType::String),
        FieldDescriptor::complex("observer", &REFERENCE).required(),
        FieldDescriptor::complex("type", &CODING).repeating(),
    ],
};

/// Audit Event Reporter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEventSource {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Logical source location within the enterprise
    pub site: Option<FhirString>,
    /// The identity of source detecting the event
    pub observer: Reference,
    /// The type of source where event originated
    pub type_: Vec<Coding>,
}

impl FhirType for AuditEventSource {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT_SOURCE
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT_SOURCE).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("site", &self.site);
        node.put("observer", &self.observer);
        node.put("type", &self.type_);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            site: node.take("site")?,
            observer: node.take("observer")?,
            type_: node.take("type")?,
        })
    }
}

pub static AUDIT_EVENT_ENTITY: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent.entity",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::complex("what", &REFERENCE),
        FieldDescriptor::complex("type", &CODING),
        FieldDescriptor::complex("role", &CODING),
        FieldDescriptor::complex("lifecycle", &CODING),
        FieldDescriptor::complex("securityLabel", &CODING).repeating(),
        FieldDescriptor::primitive("name", PrimitiveType::String),
        FieldDescriptor::primitive("description", PrimitiveType::String),
        FieldDescriptor::primitive("query", PrimitiveType::Base64Binary),
        FieldDescriptor::complex("detail", &AUDIT_EVENT_ENTITY_DETAIL).repeating(),
    ],
};

/// Data or objects used
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEventEntity {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Specific instance of resource
    pub what: Option<Reference>,
    /// Type of entity involved
    pub type_: Option<Coding>,
    /// What role the entity played
    pub role: Option<Coding>,
    /// Life-cycle stage for the entity
    pub lifecycle: Option<Coding>,
    /// Security labels on the entity
    pub security_label: Vec<Coding>,
    /// Descriptor for entity
    pub name: Option<FhirString>,
    /// Descriptive text
    pub description: Option<FhirString>,
    /// Query parameters
    pub query: Option<FhirBase64Binary>,
    /// Additional Information about the entity
    pub detail: Vec<AuditEventEntityDetail>,
}

impl FhirType for AuditEventEntity {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT_ENTITY
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT_ENTITY).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("what", &self.what);
        node.put("type", &self.type_);
        node.put("role", &self.role);
        node.put("lifecycle", &self.lifecycle);
        node.put("securityLabel", &self.security_label);
        node.put("name", &self.name);
        node.put("description", &self.description);
        node.put("query", &self.query);
        node.put("detail", &self.detail);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            what: node.take("what")?,
            type_: node.take("type")?,
            role: node.take("role")?,
            lifecycle: node.take("lifecycle")?,
            security_label: node.take("securityLabel")?,
            name: node.take("name")?,
            description: node.take("description")?,
            query: node.take("query")?,
            detail: node.take("detail")?,
        })
    }
}

pub static AUDIT_EVENT_ENTITY_DETAIL: TypeDescriptor = TypeDescriptor {
    name: "AuditEvent.entity.detail",
    kind: TypeKind::BackboneElement,
    fields: backbone_fields![
        FieldDescriptor::primitive("type", PrimitiveType::String).required(),
        FieldDescriptor::choice("value", &AUDIT_EVENT_ENTITY_DETAIL_VALUE_TYPES).required(),
    ],
};

choice_type! {
    /// AuditEvent.entity.detail.value[x]
    pub enum AuditEventEntityDetailValue: AUDIT_EVENT_ENTITY_DETAIL_VALUE_TYPES {
        String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
        Base64Binary(FhirBase64Binary) = ChoiceType::Primitive(PrimitiveType::Base64Binary),
    }
}

/// Additional Information about the entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEventEntityDetail {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    /// Name of the property
    pub type_: FhirString,
    /// Property value
    pub value: Option<AuditEventEntityDetailValue>,
}

impl FhirType for AuditEventEntityDetail {
    fn descriptor() -> &'static TypeDescriptor {
        &AUDIT_EVENT_ENTITY_DETAIL
    }

    fn to_complex(&self) -> ComplexNode {
        let mut node = ComplexNode::new(&AUDIT_EVENT_ENTITY_DETAIL).with_id(self.id.clone());
        node.put("extension", &self.extension);
        node.put("modifierExtension", &self.modifier_extension);
        node.put("type", &self.type_);
        node.put_choice("value", &self.value);
        node
    }

    fn from_complex(mut node: ComplexNode) -> Result<Self> {
        Ok(Self {
            id: node.id.take(),
            extension: node.take("extension")?,
            modifier_extension: node.take("modifierExtension")?,
            type_: node.take("type")?,
            value: node.take_choice("value")?,
        })
    }
}

impl_node_value!(
    AuditEventAgent,
    AuditEventAgentNetwork,
    AuditEventSource,
    AuditEventEntity,
    AuditEventEntityDetail,
);
