//! HTML element tree
//!
//! A [`Node`] is either an element (non-empty `tag`) or a text run (empty
//! `tag`, literal `content`). Every node owns its children outright, so the
//! tree has no shared or back references and is always walked top-down.

use std::fmt;

use indexmap::IndexMap;

/// Elements that never have children or a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// One HTML element or text run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Element name, empty for a text run
    pub tag: String,

    /// Attributes in insertion order (the order is visible in the output)
    pub attributes: IndexMap<String, String>,

    /// Owned child nodes in document order
    pub children: Vec<Node>,

    /// Literal text, used by text runs
    pub content: String,
}

impl Node {
    /// Create an element node
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Create a text run
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Default::default()
        }
    }

    /// Check if this is a text run
    pub fn is_text(&self) -> bool {
        self.tag.is_empty()
    }

    /// Check if this is a void element
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// True when the node has neither children nor content
    pub fn is_blank(&self) -> bool {
        self.children.is_empty() && self.content.is_empty()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, keeping its original position if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Builder-style [`Node::set_attr`]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child and return its index
    pub fn add_child(&mut self, child: Node) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Builder-style [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Text of the direct text-run children, joined by single spaces
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter(|child| child.is_text())
            .map(|child| child.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Walk an index path down from this node.
    ///
    /// Returns `None` if any index is out of range.
    pub fn descendant(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Walk an index path down from this node, stopping at the deepest
    /// node that exists.
    ///
    /// Debug builds panic on an out-of-range index.
    pub fn descendant_mut(&mut self, path: &[usize]) -> &mut Node {
        let mut node = self;
        for &index in path {
            debug_assert!(
                index < node.children.len(),
                "path {:?} out of range at index {}",
                path,
                index
            );
            if index >= node.children.len() {
                break;
            }
            node = &mut node.children[index];
        }
        node
    }
}

/// Compact projection: `tag:attr="val"{child child content}`.
///
/// Text runs print their content only. Children are separated by one space.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_text() {
            return f.write_str(&self.content);
        }

        f.write_str(&self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, ":{}=\"{}\"", name, value)?;
        }

        f.write_str("{")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", child)?;
        }
        if !self.content.is_empty() {
            if !self.children.is_empty() {
                f.write_str(" ")?;
            }
            f.write_str(&self.content)?;
        }
        f.write_str("}")
    }
}
