//! md2html-core - HTML element tree and serialization
//!
//! This crate provides the node tree that the `md2html` block builder grows
//! line by line, plus two ways of writing it out.
//!
//! # Architecture
//!
//! ```text
//! markdown lines ──Build──▶ ┌───────────┐ ──Display──▶ r{p{aa} ul{li{1}}}
//!                           │ Node tree │
//!                           └───────────┘ ──serialize──▶ <body>…</body>
//! ```
//!
//! The compact `Display` form is a deterministic projection of the tree and
//! is what tests compare against. [`serialize`] writes indented HTML.
//!
//! # Example
//!
//! ```rust
//! use md2html_core::{serialize, HtmlOptions, Node};
//!
//! let tree = Node::element("body")
//!     .with_child(Node::element("h1").with_attr("id", "hello").with_child(Node::text("Hello")));
//!
//! assert_eq!(tree.to_string(), "body{h1:id=\"hello\"{Hello}}");
//! assert_eq!(
//!     serialize(&tree, &HtmlOptions::default()),
//!     "<body>\n  <h1 id=\"hello\">Hello</h1>\n</body>"
//! );
//! ```

mod node;
mod options;
mod serialize;

pub use node::{Node, VOID_ELEMENTS};
pub use options::{HtmlOptions, VoidStyle};
pub use serialize::{escape_attr, escape_text, serialize};
