use std::collections::BTreeMap;

/// An owned XML element.
///
/// Attributes are kept in a [`BTreeMap`] so serialization order is stable across
/// runs. Only element children are modelled; mixed content collapses into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Optional text content.
    pub text: Option<String>,
}

impl XmlNode {
    /// Create a new element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create an element that only carries text, e.g. `<action>allow</action>`.
    pub fn text_element(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag).with_text(text)
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append `child` and return a mutable reference to it for further nesting.
    pub fn push_child(&mut self, child: XmlNode) -> &mut XmlNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Get or create the first child with the given tag.
    pub fn ensure_child_mut(&mut self, tag: &str) -> &mut XmlNode {
        if let Some(idx) = self.children.iter().position(|c| c.tag == tag) {
            return &mut self.children[idx];
        }
        self.push_child(XmlNode::new(tag))
    }

    /// Return the first child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Return all children with the provided tag.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }

    /// Return the first `tag` child whose `name` attribute equals `name`.
    ///
    /// PAN-OS style documents key repeated elements as `<entry name="...">`.
    pub fn get_named(&self, tag: &str, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| {
            child.tag == tag && child.attributes.get("name").map(String::as_str) == Some(name)
        })
    }

    /// Walk a nested child path and return terminal node text if found.
    pub fn get_text<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        let mut current = self;
        for segment in path {
            current = current.get_child(segment)?;
        }
        current.text.as_deref()
    }

    /// Text of every child with the given tag, in order.
    pub fn child_texts(&self, tag: &str) -> Vec<&str> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .filter_map(|child| child.text.as_deref())
            .collect()
    }
}
