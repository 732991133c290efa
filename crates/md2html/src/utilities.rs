//! Utility functions and constants shared by the builder and the pipeline.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Fence delimiter for literal code blocks
pub const FENCE: &str = "```";

/// Fragment appended for a blank line inside a list
pub const LOOSE_ITEM_MARKER: &str = "<p></p>";

/// Default `style` of a `table` element
pub const DEFAULT_TABLE_STYLE: &str = "width: 100%";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove HTML tags, keeping the text between them
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    TAG.replace_all(html, "")
}

/// Turn heading text into an `id` value.
///
/// Letters and digits are kept (lowercased), runs of whitespace, `-` and `_`
/// collapse to one `-`, everything else is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in strip_tags(text).chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Drop an ATX closing sequence (`## Title ##` -> `## Title`)
pub fn strip_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() {
        return without;
    }
    if without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("hdr1"), "hdr1");
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  a -- b__c  "), "a-b-c");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("<strong>Bold</strong> move"), "bold-move");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("a <code>b</code> c"), "a b c");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_strip_closing_hashes() {
        assert_eq!(strip_closing_hashes("Title ##"), "Title");
        assert_eq!(strip_closing_hashes("Title"), "Title");
        assert_eq!(strip_closing_hashes("C#"), "C#");
        assert_eq!(strip_closing_hashes("###"), "");
    }
}
