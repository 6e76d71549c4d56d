//! Format-neutral content model searched by path queries.
//!
//! Every loader (HTML, XML, SVG, image metadata, PDF-derived HTML) lowers its
//! document into this tree, so the query engine never sees a concrete format.

use serde::{Deserialize, Serialize};

/// A node in the content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentNode {
    /// An element with a name, attributes and children.
    Element(Element),
    /// A run of character data.
    Text(String),
}

impl ContentNode {
    /// Borrow the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ContentNode::Element(element) => Some(element),
            ContentNode::Text(_) => None,
        }
    }

    /// Borrow the text, if this node is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Element(_) => None,
            ContentNode::Text(text) => Some(text),
        }
    }
}

impl From<Element> for ContentNode {
    fn from(element: Element) -> Self {
        ContentNode::Element(element)
    }
}

/// An element in the content model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element name, including any namespace prefix.
    pub name: String,
    /// Attributes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(ContentNode::Element(child));
        self
    }

    /// Add a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ContentNode::Text(text.into()));
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Name without a namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Iterate over child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(ContentNode::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn string_value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                ContentNode::Element(element) => element.collect_text(out),
                ContentNode::Text(text) => out.push_str(text),
            }
        }
    }
}

/// Strip a `prefix:` from a qualified name.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_value_concatenates_descendants() {
        let element = Element::new("p")
            .with_text("Hello ")
            .with_child(Element::new("b").with_text("bold"))
            .with_text(" world");
        assert_eq!(element.string_value(), "Hello bold world");
    }

    #[test]
    fn test_attribute_lookup() {
        let element = Element::new("svg:rect").with_attribute("width", "10");
        assert_eq!(element.attribute("width"), Some("10"));
        assert_eq!(element.attribute("height"), None);
        assert_eq!(element.local_name(), "rect");
    }

    #[test]
    fn test_normalize_space() {
        assert_eq!(normalize_space("  a \n\t b  "), "a b");
        assert_eq!(normalize_space("   "), "");
    }
}
