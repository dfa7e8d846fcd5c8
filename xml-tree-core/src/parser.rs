use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while reading XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Tag, attribute, or CDATA bytes were not valid UTF-8.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// A text entity could not be decoded.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Structural issue in the document.
    #[error("malformed XML: {0}")]
    Malformed(&'static str),
}

/// Parse XML bytes into an [`XmlNode`] tree.
///
/// Declarations, comments, and processing instructions are dropped.
/// Whitespace-only text is ignored so indented output reads back unchanged.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut open: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => open.push(start_node(&e, &reader)?),
            Event::Empty(e) => {
                let node = start_node(&e, &reader)?;
                attach(&mut open, &mut root, node)?;
            }
            Event::End(_) => {
                let node = open
                    .pop()
                    .ok_or(ParseError::Malformed("closing tag without open tag"))?;
                attach(&mut open, &mut root, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                append_text(&mut open, text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                append_text(&mut open, text);
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return Err(ParseError::Malformed("unclosed element at end of document"));
    }
    root.ok_or(ParseError::Malformed("no root element found"))
}

fn attach(
    open: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ParseError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Malformed("multiple top-level elements found"));
    }
    *root = Some(node);
    Ok(())
}

fn append_text(open: &mut [XmlNode], text: String) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(current) = open.last_mut() {
        match &mut current.text {
            Some(existing) => existing.push_str(&text),
            None => current.text = Some(text),
        }
    }
}

fn start_node(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::new(qname_to_string(e.name())?);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
