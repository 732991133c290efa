//! Md2Html - the main entry point for markdown to HTML conversion.

use md2html_core::HtmlOptions;
use tracing::{debug, warn};

use crate::block::HtmlTree;
use crate::inline::{InlinePipeline, InlineRule};
use crate::utilities::DEFAULT_TABLE_STYLE;
use crate::Md2HtmlError;

/// Options for building the tree
#[derive(Debug, Clone)]
pub struct Options {
    /// Tag of the root element
    pub root_tag: String,

    /// Columns a tab advances to when measuring list indentation
    pub tab_width: usize,

    /// Give headings an `id` derived from their text
    pub heading_ids: bool,

    /// `style` attribute of `table` elements
    pub table_style: Option<String>,

    /// HTML serializer options
    pub html: HtmlOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_tag: "body".to_string(),
            tab_width: 4,
            heading_ids: true,
            table_style: Some(DEFAULT_TABLE_STYLE.to_string()),
            html: HtmlOptions::default(),
        }
    }
}

/// A line the builder could not interpret as intended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    pub error: Md2HtmlError,
}

/// Result of converting a whole document
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Serialized HTML
    pub html: String,
    /// One entry per line that produced an error, in document order
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// True if every line was converted without a diagnostic
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The main service for converting markdown documents to HTML
#[derive(Debug, Clone, Default)]
pub struct Md2Html {
    options: Options,
    inline: InlinePipeline,
}

impl Md2Html {
    /// Create a new Md2Html with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Md2Html with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            inline: InlinePipeline::new(),
        }
    }

    /// Add a custom inline rule, run after the built-in ones
    pub fn add_inline_rule(&mut self, key: &str, rule: InlineRule) -> &mut Self {
        self.inline.add(key, rule);
        self
    }

    /// Remove a custom inline rule
    pub fn remove_inline_rule(&mut self, key: &str) -> &mut Self {
        self.inline.remove(key);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// An empty tree configured like this service
    pub fn tree(&self) -> HtmlTree {
        HtmlTree::with_pipeline(self.options.clone(), self.inline.clone())
    }

    /// Convert a whole document
    pub fn convert(&self, source: &str) -> Conversion {
        self.convert_lines(source.lines())
    }

    /// Convert a document given line by line, without terminators
    pub fn convert_lines<'a, I>(&self, lines: I) -> Conversion
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tree = self.tree();
        let mut diagnostics = Vec::new();
        let mut count = 0;

        for (index, line) in lines.into_iter().enumerate() {
            count += 1;
            if let Err(error) = tree.build(line) {
                warn!(line = index + 1, %error, "line kept as text");
                diagnostics.push(Diagnostic {
                    line: index + 1,
                    error,
                });
            }
        }

        debug!(
            lines = count,
            diagnostics = diagnostics.len(),
            "converted document"
        );
        Conversion {
            html: tree.to_html(),
            diagnostics,
        }
    }
}
