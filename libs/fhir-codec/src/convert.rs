//! Conversion between typed records and the node tree
//!
//! Model crates implement [`FhirType`] for each complex type and resource,
//! then invoke [`impl_node_value!`](crate::impl_node_value) so the type can be
//! used as a field, and [`choice_type!`](crate::choice_type) for each choice
//! field. `Option<T>`, `Vec<T>` and `Box<T>` wrappers work through the
//! generic impls here.

use crate::descriptor::{ChoiceType, TypeDescriptor};
use crate::error::{Error, Result};
use crate::node::{ComplexNode, Field, Node};

/// A complex type or resource with a descriptor table
pub trait FhirType: Sized {
    fn descriptor() -> &'static TypeDescriptor;

    fn to_complex(&self) -> ComplexNode;

    fn from_complex(node: ComplexNode) -> Result<Self>;
}

/// A value that occupies a single occurrence of a field
pub trait NodeValue: Sized {
    fn to_node(&self) -> Node;

    fn from_node(node: Node, field: &str) -> Result<Self>;

    /// Empty values are omitted on encode
    fn is_empty(&self) -> bool;
}

/// The whole content of a field: absent, single, or repeated
pub trait FieldValue: Sized {
    /// `None` when the field is absent
    fn to_field(&self) -> Option<Field>;

    fn from_field(field: Option<Field>, name: &str) -> Result<Self>;
}

/// A choice field enum (`value[x]`)
pub trait ChoiceValue: Sized {
    /// The populated alternative and its node
    fn to_choice(&self) -> (ChoiceType, Node);

    fn from_choice(ty: ChoiceType, node: Node, field: &str) -> Result<Self>;
}

impl<T: NodeValue> FieldValue for Option<T> {
    fn to_field(&self) -> Option<Field> {
        self.as_ref()
            .filter(|value| !value.is_empty())
            .map(|value| Field::Single(value.to_node()))
    }

    fn from_field(field: Option<Field>, name: &str) -> Result<Self> {
        match field {
            None => Ok(None),
            Some(Field::Single(node)) => T::from_node(node, name).map(Some),
            Some(Field::List(_)) => Err(Error::UnexpectedRepeat {
                field: name.to_string(),
            }),
            Some(Field::Choice(..)) => Err(Error::shape(name, "single value")),
        }
    }
}

impl<T: NodeValue> FieldValue for Vec<T> {
    fn to_field(&self) -> Option<Field> {
        let nodes: Vec<Node> = self
            .iter()
            .filter(|value| !value.is_empty())
            .map(NodeValue::to_node)
            .collect();
        (!nodes.is_empty()).then_some(Field::List(nodes))
    }

    fn from_field(field: Option<Field>, name: &str) -> Result<Self> {
        match field {
            None => Ok(Vec::new()),
            Some(Field::List(nodes)) => nodes
                .into_iter()
                .map(|node| T::from_node(node, name))
                .collect(),
            Some(Field::Single(node)) => Ok(vec![T::from_node(node, name)?]),
            Some(Field::Choice(..)) => Err(Error::shape(name, "list")),
        }
    }
}

impl<T: NodeValue> NodeValue for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }

    fn from_node(node: Node, field: &str) -> Result<Self> {
        T::from_node(node, field).map(Box::new)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Decode a complex node into `T`, checking the node is complex.
pub fn complex_from_node<T: FhirType>(node: Node, field: &str) -> Result<T> {
    match node {
        Node::Complex(complex) => T::from_complex(complex),
        Node::Primitive(_) => Err(Error::shape(field, "complex element")),
    }
}

/// Implement [`NodeValue`] and [`FieldValue`] for complex types that already
/// implement [`FhirType`]. The bare-type [`FieldValue`] impl covers required
/// fields: an absent field decodes to `Default`.
#[macro_export]
macro_rules! impl_node_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::NodeValue for $ty {
                fn to_node(&self) -> $crate::Node {
                    $crate::Node::Complex($crate::FhirType::to_complex(self))
                }

                fn from_node(node: $crate::Node, field: &str) -> $crate::Result<Self> {
                    $crate::complex_from_node(node, field)
                }

                fn is_empty(&self) -> bool {
                    $crate::FhirType::to_complex(self).is_empty()
                }
            }

            impl $crate::FieldValue for $ty {
                fn to_field(&self) -> Option<$crate::Field> {
                    let node = $crate::FhirType::to_complex(self);
                    (!node.is_empty()).then(|| $crate::Field::Single($crate::Node::Complex(node)))
                }

                fn from_field(field: Option<$crate::Field>, name: &str) -> $crate::Result<Self> {
                    match field {
                        None => Ok(<$ty>::default()),
                        Some($crate::Field::Single(node)) => {
                            <$ty as $crate::NodeValue>::from_node(node, name)
                        }
                        Some(_) => Err($crate::Error::shape(name, "single value")),
                    }
                }
            }
        )+
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + $crate::__count!($($tail)*) };
}

/// Declare a choice field enum together with the static list of its
/// alternatives, used as `FieldDescriptor::choice(name, &LIST)`.
///
/// ```ignore
/// choice_type! {
///     /// Annotation.author[x]
///     pub enum AnnotationAuthor: ANNOTATION_AUTHOR_TYPES {
///         Reference(Reference) = ChoiceType::Complex(&REFERENCE),
///         String(FhirString) = ChoiceType::Primitive(PrimitiveType::String),
///     }
/// }
/// ```
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $types:ident {
            $($variant:ident($ty:ty) = $choice:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant($ty),)+
        }

        $vis static $types: [$crate::ChoiceType; $crate::__count!($($variant)+)] = [$($choice,)+];

        impl $crate::ChoiceValue for $name {
            fn to_choice(&self) -> ($crate::ChoiceType, $crate::Node) {
                match self {
                    $($name::$variant(value) => ($choice, $crate::NodeValue::to_node(value)),)+
                }
            }

            fn from_choice(
                ty: $crate::ChoiceType,
                node: $crate::Node,
                field: &str,
            ) -> $crate::Result<Self> {
                $(
                    if ty.same_as(&$choice) {
                        return <$ty as $crate::NodeValue>::from_node(node, field).map($name::$variant);
                    }
                )+
                Err($crate::Error::type_mismatch(field, stringify!($name)))
            }
        }
    };
}
