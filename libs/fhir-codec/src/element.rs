//! Typed primitive element

use crate::convert::{FhirType, FieldValue, NodeValue};
use crate::error::{Error, Result};
use crate::node::{Field, Node, PrimitiveNode};
use crate::primitive::PrimitiveData;

/// A FHIR primitive: an optional value plus the element id and extensions
/// that travel in the `_field` shadow key in JSON.
///
/// `E` is the extension type of the model crate. An element with no value
/// but with an id or extensions is valid and is kept as is.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<V, E> {
    pub id: Option<String>,
    pub extension: Vec<E>,
    pub value: Option<V>,
}

impl<V, E> Default for Element<V, E> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<V, E> Element<V, E> {
    pub fn new(value: V) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Element carrying only extensions, no value
    pub fn extension_only(extension: Vec<E>) -> Self {
        Self {
            extension,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: E) -> Self {
        self.extension.push(extension);
        self
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty() && self.value.is_none()
    }
}

impl<E> Element<String, E> {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<V, E> From<V> for Element<V, E> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<E> From<&str> for Element<String, E> {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl<V: PrimitiveData, E: FhirType> NodeValue for Element<V, E> {
    fn to_node(&self) -> Node {
        Node::Primitive(PrimitiveNode {
            id: self.id.clone(),
            extension: self.extension.iter().map(FhirType::to_complex).collect(),
            value: self.value.as_ref().map(PrimitiveData::to_primitive),
        })
    }

    fn from_node(node: Node, field: &str) -> Result<Self> {
        let Node::Primitive(primitive) = node else {
            return Err(Error::shape(field, "primitive"));
        };
        let value = match primitive.value {
            Some(value) => Some(
                V::from_primitive(value)
                    .ok_or_else(|| Error::type_mismatch(field, std::any::type_name::<V>()))?,
            ),
            None => None,
        };
        let extension = primitive
            .extension
            .into_iter()
            .map(E::from_complex)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: primitive.id,
            extension,
            value,
        })
    }

    fn is_empty(&self) -> bool {
        Element::is_empty(self)
    }
}

/// Required primitives: an absent field decodes to the empty element.
impl<V: PrimitiveData, E: FhirType> FieldValue for Element<V, E> {
    fn to_field(&self) -> Option<Field> {
        (!self.is_empty()).then(|| Field::Single(self.to_node()))
    }

    fn from_field(field: Option<Field>, name: &str) -> Result<Self> {
        match field {
            None => Ok(Self::default()),
            Some(Field::Single(node)) => Self::from_node(node, name),
            Some(_) => Err(Error::shape(name, "single value")),
        }
    }
}
