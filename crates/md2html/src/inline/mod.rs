//! Inline transform pipeline.
//!
//! Rendering one line of text is a fixed sequence:
//!
//! 1. escape-encode backslash escapes of [`MARKUP`] characters,
//! 2. run the built-in transforms (code spans, images, links, styling),
//! 3. run custom transforms in insertion order,
//! 4. decode every placeholder back to its bare character.
//!
//! Steps 1 and 4 are a pre/post filter around the transforms; no transform
//! deals with backslashes itself.

mod rule;
mod transforms;

pub use rule::{InlineRule, TransformFn};
pub use transforms::{builtin_rules, images, inline_code_spans, links, strong_em_del};

use indexmap::IndexMap;

use crate::escape::{decode, encode, EscapeMode, MARKUP};

/// Ordered set of inline rules
#[derive(Debug, Clone)]
pub struct InlinePipeline {
    /// Built-in rules (always applied first)
    builtin: Vec<InlineRule>,
    /// Custom rules added by the user, applied in insertion order
    custom: IndexMap<String, InlineRule>,
}

impl InlinePipeline {
    /// Create a pipeline with the built-in rules
    pub fn new() -> Self {
        Self {
            builtin: builtin_rules(),
            custom: IndexMap::new(),
        }
    }

    /// Add a custom rule, replacing any rule with the same key
    pub fn add(&mut self, key: &str, rule: InlineRule) -> &mut Self {
        self.custom.insert(key.to_string(), rule);
        self
    }

    /// Remove a custom rule
    pub fn remove(&mut self, key: &str) -> Option<InlineRule> {
        self.custom.shift_remove(key)
    }

    /// Names of all rules in application order
    pub fn rule_names(&self) -> Vec<&str> {
        self.builtin
            .iter()
            .chain(self.custom.values())
            .map(InlineRule::name)
            .collect()
    }

    /// Render one line of source text to HTML.
    ///
    /// A literal `U+XXXX` in the source that names a [`MARKUP`] character
    /// comes out as that character (`U+002A` becomes `*`).
    pub fn render(&self, text: &str) -> String {
        let encoded = encode(text, MARKUP, EscapeMode::Escaped);
        decode(&self.apply(&encoded), MARKUP, EscapeMode::Literal)
    }

    /// Run every rule over already-encoded text, without decoding
    pub fn apply(&self, encoded: &str) -> String {
        self.builtin
            .iter()
            .chain(self.custom.values())
            .fold(encoded.to_string(), |text, rule| rule.apply(&text))
    }
}

impl Default for InlinePipeline {
    fn default() -> Self {
        Self::new()
    }
}
