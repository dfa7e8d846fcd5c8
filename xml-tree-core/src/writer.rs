use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while serializing an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// quick-xml failed to emit an event.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Serialize an element tree (no XML declaration), indented by two spaces.
pub fn write(node: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_node(&mut writer, node)?;
    Ok(writer.into_inner())
}

/// Serialize a full document: `<?xml version="1.0" encoding="utf-8"?>`, the tree,
/// and a trailing newline.
pub fn write_document(root: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(quick_xml::Error::from)?;
    write_node(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
    Ok(())
}
