//! Format-neutral node tree
//!
//! Both wire formats are encoded from and decoded into this tree. A
//! [`ComplexNode`] is tied to its [`TypeDescriptor`], which the codecs use to
//! order fields and to tell primitives, complex values, choice alternatives
//! and inline resources apart.

use crate::convert::{ChoiceValue, FieldValue};
use crate::descriptor::{ChoiceType, TypeDescriptor};
use crate::error::Result;
use crate::primitive::PrimitiveValue;
use std::collections::BTreeMap;

/// A single occurrence of a field value
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Primitive(PrimitiveNode),
    /// Complex element, backbone element, or inline resource
    Complex(ComplexNode),
}

impl Node {
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Primitive(primitive) => primitive.is_empty(),
            Node::Complex(complex) => !complex.ty.is_resource() && complex.is_empty(),
        }
    }
}

/// A primitive: the value slot plus the metadata slot (`_field` in JSON)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveNode {
    pub id: Option<String>,
    /// Extension nodes
    pub extension: Vec<ComplexNode>,
    pub value: Option<PrimitiveValue>,
}

impl PrimitiveNode {
    pub fn new(value: PrimitiveValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// True when the primitive carries an id or extensions
    pub fn has_metadata(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && !self.has_metadata()
    }
}

/// Value of one field in a complex node
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Single(Node),
    List(Vec<Node>),
    /// The populated alternative of a choice field
    Choice(ChoiceType, Node),
}

/// A complex element or resource
#[derive(Debug, Clone)]
pub struct ComplexNode {
    pub ty: &'static TypeDescriptor,
    /// Element id; written as `id` in JSON and as an attribute in XML.
    /// Resources keep their logical id in `fields` instead.
    pub id: Option<String>,
    pub fields: BTreeMap<&'static str, Field>,
}

impl PartialEq for ComplexNode {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ty, other.ty) && self.id == other.id && self.fields == other.fields
    }
}

impl ComplexNode {
    pub fn new(ty: &'static TypeDescriptor) -> Self {
        Self {
            ty,
            id: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: &'static str, field: Field) {
        self.fields.insert(name, field);
    }

    /// Store a typed field value; absent and empty values are skipped.
    pub fn put<V: FieldValue>(&mut self, name: &'static str, value: &V) {
        if let Some(field) = value.to_field() {
            self.fields.insert(name, field);
        }
    }

    /// Store the populated alternative of a choice field.
    pub fn put_choice<C: ChoiceValue>(&mut self, name: &'static str, value: &Option<C>) {
        if let Some(choice) = value {
            let (ty, node) = choice.to_choice();
            if !node.is_empty() {
                self.fields.insert(name, Field::Choice(ty, node));
            }
        }
    }

    /// Remove a field and convert it to its typed form.
    pub fn take<V: FieldValue>(&mut self, name: &str) -> Result<V> {
        V::from_field(self.fields.remove(name), name)
    }

    /// Remove a choice field and convert it to its typed form.
    pub fn take_choice<C: ChoiceValue>(&mut self, name: &str) -> Result<Option<C>> {
        match self.fields.remove(name) {
            None => Ok(None),
            Some(Field::Choice(ty, node)) => C::from_choice(ty, node, name).map(Some),
            Some(_) => Err(crate::Error::shape(name, "choice value")),
        }
    }
}
