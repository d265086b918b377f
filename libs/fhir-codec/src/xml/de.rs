use super::{FHIR_NS, XHTML_NS};
use crate::descriptor::{ChoiceType, FieldKind, TypeDescriptor};
use crate::error::{Error, Result};
use crate::node::{ComplexNode, Field, Node, PrimitiveNode};
use crate::options::Options;
use crate::primitive::{PrimitiveType, PrimitiveValue};
use crate::registry::TypeRegistry;
use roxmltree::Document;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

type XmlNode<'a, 'input> = roxmltree::Node<'a, 'input>;

/// Decode a resource document of any registered type.
pub fn decode(input: &str, registry: &TypeRegistry, options: &Options) -> Result<ComplexNode> {
    let doc = Document::parse(input)?;
    Decoder::new(input, registry, options).resource(doc.root_element(), None)
}

/// Decode a resource document, requiring the root element to match
/// `descriptor`.
pub fn decode_as(
    input: &str,
    descriptor: &'static TypeDescriptor,
    registry: &TypeRegistry,
    options: &Options,
) -> Result<ComplexNode> {
    let doc = Document::parse(input)?;
    Decoder::new(input, registry, options).resource(doc.root_element(), Some(descriptor))
}

/// Decode a standalone complex element. The root element name is not checked.
pub fn decode_element(
    input: &str,
    descriptor: &'static TypeDescriptor,
    registry: &TypeRegistry,
    options: &Options,
) -> Result<ComplexNode> {
    let doc = Document::parse(input)?;
    let root = doc.root_element();
    expect_namespace(root, FHIR_NS)?;
    Decoder::new(input, registry, options).complex(root, descriptor)
}

pub(super) fn expect_namespace(element: XmlNode<'_, '_>, expected: &'static str) -> Result<()> {
    let found = element.tag_name().namespace();
    if found == Some(expected) {
        return Ok(());
    }
    Err(Error::Namespace {
        element: element.tag_name().name().to_string(),
        found: found.map(str::to_string),
        expected,
    })
}

fn unexpected_attribute(element: XmlNode<'_, '_>, attribute: &str) -> Error {
    Error::UnexpectedAttribute {
        element: element.tag_name().name().to_string(),
        attribute: attribute.to_string(),
    }
}

fn element_children<'a, 'input>(
    element: XmlNode<'a, 'input>,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    element.children().filter(|child| child.is_element())
}

/// Field content gathered from child elements
enum Collected {
    Single(Node),
    List(Vec<Node>),
    Choice(ChoiceType, Node),
}

struct Decoder<'a> {
    source: &'a str,
    registry: &'a TypeRegistry,
    options: &'a Options,
}

impl<'a> Decoder<'a> {
    fn new(source: &'a str, registry: &'a TypeRegistry, options: &'a Options) -> Self {
        Self {
            source,
            registry,
            options,
        }
    }

    fn resource(
        &self,
        element: XmlNode<'_, '_>,
        expected: Option<&'static TypeDescriptor>,
    ) -> Result<ComplexNode> {
        expect_namespace(element, FHIR_NS)?;
        let resource_type = element.tag_name().name();
        let descriptor = match expected {
            Some(descriptor) if descriptor.name != resource_type => {
                return Err(Error::UnexpectedResourceType {
                    expected: descriptor.name.to_string(),
                    found: resource_type.to_string(),
                });
            }
            Some(descriptor) => descriptor,
            None => self.registry.resource(resource_type)?,
        };

        debug!(format = "xml", resource_type, "Decoding resource");
        self.complex(element, descriptor)
    }

    fn complex(
        &self,
        element: XmlNode<'_, '_>,
        ty: &'static TypeDescriptor,
    ) -> Result<ComplexNode> {
        let mut node = ComplexNode::new(ty);

        for attribute in element.attributes() {
            let name = attribute.name();
            if attribute.namespace().is_some() {
                return Err(unexpected_attribute(element, name));
            }
            if name == "id" && !ty.is_resource() {
                node.id = Some(attribute.value().to_string());
                continue;
            }
            let Some(descriptor) = ty.attribute_fields().find(|f| f.name == name) else {
                return Err(unexpected_attribute(element, name));
            };
            let FieldKind::Primitive(primitive) = descriptor.kind else {
                return Err(Error::shape(name, "primitive"));
            };
            let value = primitive.value_from_lexical(name, attribute.value())?;
            node.insert(
                descriptor.name,
                Field::Single(Node::Primitive(PrimitiveNode::new(value))),
            );
        }

        let mut collected: BTreeMap<&'static str, Collected> = BTreeMap::new();
        for child in element_children(element) {
            let name = child.tag_name().name();
            let resolved = ty.resolve(name).filter(|(f, _)| !f.xml_attribute);
            let Some((descriptor, choice)) = resolved else {
                expect_namespace(child, FHIR_NS)?;
                self.options.unknown_field(ty.name, name)?;
                continue;
            };

            let kind = choice.map_or(descriptor.kind, |c| c.kind());
            let value = self.child(child, descriptor.name, kind)?;

            match collected.entry(descriptor.name) {
                Entry::Vacant(slot) => {
                    slot.insert(match choice {
                        Some(choice) => Collected::Choice(choice, value),
                        None if descriptor.repeating => Collected::List(vec![value]),
                        None => Collected::Single(value),
                    });
                }
                Entry::Occupied(mut slot) => match (slot.get_mut(), choice) {
                    (Collected::List(values), _) => values.push(value),
                    (Collected::Choice(seen, _), Some(found)) if !seen.same_as(&found) => {
                        return Err(Error::MultipleValues {
                            field: descriptor.name.to_string(),
                        });
                    }
                    _ => {
                        return Err(Error::UnexpectedRepeat {
                            field: descriptor.name.to_string(),
                        });
                    }
                },
            }
        }

        for (name, value) in collected {
            let field = match value {
                Collected::Single(node) => Field::Single(node),
                Collected::List(nodes) => Field::List(nodes),
                Collected::Choice(choice, node) => Field::Choice(choice, node),
            };
            node.insert(name, field);
        }
        Ok(node)
    }

    fn child(&self, element: XmlNode<'_, '_>, field: &str, kind: FieldKind) -> Result<Node> {
        match kind {
            FieldKind::Primitive(PrimitiveType::Xhtml) => {
                expect_namespace(element, XHTML_NS)?;
                let xhtml = &self.source[element.range()];
                Ok(Node::Primitive(PrimitiveNode::new(PrimitiveValue::String(
                    xhtml.to_string(),
                ))))
            }
            FieldKind::Primitive(primitive) => {
                expect_namespace(element, FHIR_NS)?;
                self.primitive(element, field, primitive).map(Node::Primitive)
            }
            FieldKind::Complex(descriptor) => {
                expect_namespace(element, FHIR_NS)?;
                self.complex(element, descriptor).map(Node::Complex)
            }
            FieldKind::Resource => {
                expect_namespace(element, FHIR_NS)?;
                if let Some(attribute) = element.attributes().next() {
                    return Err(unexpected_attribute(element, attribute.name()));
                }
                let mut children = element_children(element);
                let (Some(inner), None) = (children.next(), children.next()) else {
                    return Err(Error::shape(field, "single inline resource"));
                };
                self.resource(inner, None).map(Node::Complex)
            }
            FieldKind::Choice(_) => Err(Error::shape(field, "choice alternative")),
        }
    }

    fn primitive(
        &self,
        element: XmlNode<'_, '_>,
        field: &str,
        ty: PrimitiveType,
    ) -> Result<PrimitiveNode> {
        let mut node = PrimitiveNode::default();
        for attribute in element.attributes() {
            match (attribute.namespace(), attribute.name()) {
                (None, "id") => node.id = Some(attribute.value().to_string()),
                (None, "value") => {
                    node.value = Some(ty.value_from_lexical(field, attribute.value())?);
                }
                (_, name) => return Err(unexpected_attribute(element, name)),
            }
        }

        let extension = self.registry.extension();
        for child in element_children(element) {
            expect_namespace(child, FHIR_NS)?;
            let name = child.tag_name().name();
            if name == "extension" {
                node.extension.push(self.complex(child, extension)?);
            } else {
                self.options.unknown_field(ty.code(), name)?;
            }
        }
        Ok(node)
    }
}
