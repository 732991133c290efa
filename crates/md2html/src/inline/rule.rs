//! A single named text-to-text rewriter.

use std::fmt;
use std::sync::Arc;

/// Type alias for transform functions
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// An inline rule rewrites one kind of span markup into HTML
#[derive(Clone)]
pub struct InlineRule {
    name: String,
    transform: TransformFn,
}

impl InlineRule {
    /// Create a new rule
    pub fn new<F>(name: &str, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            transform: Arc::new(transform),
        }
    }

    /// Name used in logs and for lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply this rule's transform
    pub fn apply(&self, text: &str) -> String {
        (self.transform)(text)
    }
}

impl fmt::Debug for InlineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineRule").field("name", &self.name).finish()
    }
}
