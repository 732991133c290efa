//! HTML serialization
//!
//! Writes a [`Node`] tree as indented HTML with closing tags. Text runs are
//! already HTML (the inline pipeline produced them) and are written as-is,
//! except inside `pre` where they are literal and get escaped.

use crate::node::Node;
use crate::options::{HtmlOptions, VoidStyle};

/// Serialize a node and its subtree to HTML
pub fn serialize(node: &Node, options: &HtmlOptions) -> String {
    let mut output = String::with_capacity(4096);
    serialize_node(node, options, 0, &mut output);

    let len = output.trim_end_matches('\n').len();
    output.truncate(len);
    output
}

fn serialize_node(node: &Node, options: &HtmlOptions, depth: usize, out: &mut String) {
    push_indent(options, depth, out);

    if node.is_text() {
        out.push_str(&node.content);
        out.push('\n');
        return;
    }

    // Leaves, text-only elements and preformatted blocks stay on one line
    if node.tag == "pre" || node.children.iter().all(Node::is_text) {
        serialize_inline(node, options, node.tag == "pre", out);
        out.push('\n');
        return;
    }

    open_tag(node, options, out);
    out.push('\n');
    for child in &node.children {
        serialize_node(child, options, depth + 1, out);
    }
    if !node.content.is_empty() {
        push_indent(options, depth + 1, out);
        out.push_str(&node.content);
        out.push('\n');
    }
    push_indent(options, depth, out);
    close_tag(node, out);
    out.push('\n');
}

fn serialize_inline(node: &Node, options: &HtmlOptions, in_pre: bool, out: &mut String) {
    if node.is_text() {
        if in_pre {
            out.push_str(&escape_text(&node.content));
        } else {
            out.push_str(&node.content);
        }
        return;
    }

    open_tag(node, options, out);
    if node.is_void() {
        return;
    }

    let separator = if in_pre { '\n' } else { ' ' };
    for (i, child) in node.children.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        serialize_inline(child, options, in_pre, out);
    }
    if !node.content.is_empty() {
        if !node.children.is_empty() {
            out.push(separator);
        }
        if in_pre {
            out.push_str(&escape_text(&node.content));
        } else {
            out.push_str(&node.content);
        }
    }
    close_tag(node, out);
}

fn open_tag(node: &Node, options: &HtmlOptions, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    if node.is_void() && options.void_style == VoidStyle::SelfClosing {
        out.push('/');
    }
    out.push('>');
}

fn close_tag(node: &Node, out: &mut String) {
    if node.is_void() {
        return;
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn push_indent(options: &HtmlOptions, depth: usize, out: &mut String) {
    for _ in 0..depth * options.indent_width {
        out.push(' ');
    }
}

/// Escape an HTML attribute value
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape literal text for element content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
