use super::de::expect_namespace;
use super::{FHIR_NS, XHTML_NS};
use crate::descriptor::{FieldKind, TypeDescriptor};
use crate::error::{Error, Result};
use crate::node::{ComplexNode, Field, Node, PrimitiveNode};
use crate::primitive::PrimitiveType;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Encode a resource node as an XML document.
pub fn encode_string(node: &ComplexNode, pretty: bool) -> Result<String> {
    let mut writer = new_writer(pretty);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_resource(&mut writer, node, true)?;
    finish(writer)
}

/// Encode a standalone complex element under the given element name.
pub fn encode_element_string(name: &str, node: &ComplexNode, pretty: bool) -> Result<String> {
    let mut writer = new_writer(pretty);
    write_complex(&mut writer, name, node, true)?;
    finish(writer)
}

fn new_writer(pretty: bool) -> XmlWriter {
    if pretty {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
    } else {
        Writer::new(Cursor::new(Vec::new()))
    }
}

fn finish(writer: XmlWriter) -> Result<String> {
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escape_attribute(value).into_owned().into_bytes()),
    }
}

// Attribute values are whitespace-normalized on read, so line breaks and
// tabs must go out as character references to survive.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    Cow::Owned(
        escaped
            .replace('\n', "&#xA;")
            .replace('\r', "&#xD;")
            .replace('\t', "&#x9;"),
    )
}

fn write_resource(writer: &mut XmlWriter, node: &ComplexNode, root: bool) -> Result<()> {
    write_complex(writer, node.ty.name, node, root)
}

fn write_complex(
    writer: &mut XmlWriter,
    name: &str,
    node: &ComplexNode,
    declare_namespace: bool,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    if declare_namespace {
        start.push_attribute(("xmlns", FHIR_NS));
    }
    if !node.ty.is_resource() {
        if let Some(id) = &node.id {
            start.push_attribute(attribute("id", id));
        }
    }
    for descriptor in node.ty.attribute_fields() {
        if let Some(Field::Single(Node::Primitive(PrimitiveNode {
            value: Some(value),
            ..
        }))) = node.get(descriptor.name)
        {
            start.push_attribute(attribute(descriptor.name, &value.to_lexical()));
        }
    }

    if !has_child_elements(node.ty, node) {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for descriptor in node.ty.fields.iter().filter(|f| !f.xml_attribute) {
        let Some(field) = node.get(descriptor.name) else {
            continue;
        };
        match field {
            Field::Single(value) => write_node(writer, descriptor.name, descriptor.kind, value)?,
            Field::List(values) => {
                for value in values {
                    write_node(writer, descriptor.name, descriptor.kind, value)?;
                }
            }
            Field::Choice(ty, value) => {
                let name = format!("{}{}", descriptor.name, ty.suffix());
                write_node(writer, &name, ty.kind(), value)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn has_child_elements(ty: &TypeDescriptor, node: &ComplexNode) -> bool {
    ty.fields
        .iter()
        .any(|f| !f.xml_attribute && node.get(f.name).is_some())
}

fn write_node(writer: &mut XmlWriter, name: &str, kind: FieldKind, node: &Node) -> Result<()> {
    match node {
        Node::Primitive(primitive) => {
            if matches!(kind, FieldKind::Primitive(PrimitiveType::Xhtml)) {
                write_xhtml(writer, primitive)
            } else {
                write_primitive(writer, name, primitive)
            }
        }
        Node::Complex(complex) if complex.ty.is_resource() => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            write_resource(writer, complex, false)?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
        Node::Complex(complex) => write_complex(writer, name, complex, false),
    }
}

fn write_primitive(writer: &mut XmlWriter, name: &str, primitive: &PrimitiveNode) -> Result<()> {
    let mut start = BytesStart::new(name);
    if let Some(id) = &primitive.id {
        start.push_attribute(attribute("id", id));
    }
    if let Some(value) = &primitive.value {
        start.push_attribute(attribute("value", &value.to_lexical()));
    }

    if primitive.extension.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for extension in &primitive.extension {
        write_complex(writer, "extension", extension, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

// The div is already serialized XHTML carrying its own namespace. It is
// written raw so the writer's indentation state is left untouched.
fn write_xhtml(writer: &mut XmlWriter, primitive: &PrimitiveNode) -> Result<()> {
    if let Some(value) = &primitive.value {
        let xhtml = value.to_lexical();
        check_xhtml(&xhtml)?;
        writer.write_indent()?;
        writer.get_mut().write_all(xhtml.as_bytes())?;
    }
    Ok(())
}

// A div that came in through JSON has not been parsed yet. It has to be a
// well-formed XHTML `div` or the written document would not read back.
fn check_xhtml(xhtml: &str) -> Result<()> {
    let document = roxmltree::Document::parse(xhtml)?;
    let root = document.root_element();
    if root.tag_name().name() != "div" {
        return Err(Error::shape("div", "an XHTML div element"));
    }
    expect_namespace(root, XHTML_NS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_whitespace_is_escaped() {
        assert_eq!(escape_attribute("plain"), "plain");
        assert_eq!(
            escape_attribute("a & b\nc\td\r"),
            "a &amp; b&#xA;c&#x9;d&#xD;"
        );
    }

    #[test]
    fn xhtml_must_be_a_namespaced_div() {
        assert!(check_xhtml(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>ok</p></div>"#).is_ok());
        assert!(matches!(
            check_xhtml("<div>plain</div>"),
            Err(Error::Namespace { .. })
        ));
        assert!(matches!(
            check_xhtml(r#"<p xmlns="http://www.w3.org/1999/xhtml">x</p>"#),
            Err(Error::Shape { .. })
        ));
        assert!(matches!(check_xhtml("<div>unclosed"), Err(Error::Xml(_))));
    }
}
