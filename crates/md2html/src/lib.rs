//! # md2html
//!
//! Convert a line-oriented markdown dialect to an HTML element tree.
//!
//! ## Design
//!
//! The document is fed one line at a time to a [`HtmlTree`]. Block structure
//! (headings, paragraphs, blockquotes, fenced code, nested lists, pipe tables)
//! is decided per line by a small state machine; the text of each line goes
//! through the [`InlinePipeline`] before it lands in the tree.
//!
//! - **Escapes first**: backslash escapes become placeholders before any
//!   inline rule runs, so `\*` never turns into emphasis.
//! - **Always a valid tree**: a malformed table row is reported as an error
//!   but kept as text; the tree can be serialized after any line.
//!
//! ## Example (line by line)
//!
//! ```rust
//! use md2html::HtmlTree;
//!
//! let mut tree = HtmlTree::new("r");
//! for line in ["aa", "# hdr1", "bb"] {
//!     tree.build(line).unwrap();
//! }
//! assert_eq!(tree.to_string(), "r{p{aa} h1:id=\"hdr1\"{hdr1} p{bb}}");
//! ```
//!
//! ## Example (whole document)
//!
//! ```rust
//! use md2html::Md2Html;
//!
//! let service = Md2Html::new();
//! let result = service.convert("Hello **World**");
//! assert_eq!(result.html, "<body>\n  <p>Hello <strong>World</strong></p>\n</body>");
//! assert!(result.diagnostics.is_empty());
//! ```

pub mod block;
pub mod escape;
pub mod inline;
pub mod scan;
mod service;
pub mod utilities;

pub use block::HtmlTree;
pub use escape::{decode, encode, EscapeMode, MARKUP};
pub use inline::{
    builtin_rules, images, inline_code_spans, links, strong_em_del, InlinePipeline, InlineRule,
};
pub use md2html_core::{serialize, HtmlOptions, Node, VoidStyle};
pub use scan::{count_leading, only_runes};
pub use service::{Conversion, Diagnostic, Md2Html, Options};

/// Error type for md2html operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Md2HtmlError {
    #[error("Empty table header: {0}")]
    EmptyTableHeader(String),

    #[error("Alignment row has {found} columns, header has {expected}")]
    AlignmentMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Md2HtmlError>;
