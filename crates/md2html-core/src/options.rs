//! Configuration options for HTML serialization

/// How void elements (`hr`, `img`, ...) are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoidStyle {
    /// XHTML-compatible `<hr/>`
    #[default]
    SelfClosing,
    /// Plain HTML `<hr>`
    Html,
}

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Spaces per nesting level
    pub indent_width: usize,

    /// Void element style
    pub void_style: VoidStyle,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            void_style: VoidStyle::SelfClosing,
        }
    }
}
