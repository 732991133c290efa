//! List marker recognition.

use crate::scan::indent_width;

/// Marker family of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*`, `-` or `+`
    Bullet,
    /// `N.`
    Ordered,
}

impl ListKind {
    /// Element name of a list of this kind
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// A line that starts a list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker<'a> {
    /// Column of the marker
    pub indent: usize,
    pub kind: ListKind,
    /// Item text after the marker, trimmed
    pub text: &'a str,
}

impl<'a> ListMarker<'a> {
    /// Recognize `* item`, `- item`, `+ item` or `12. item` at any indentation.
    ///
    /// The marker must be followed by whitespace, so `**bold**` and `-1` are
    /// not items.
    pub fn parse(line: &'a str, tab_width: usize) -> Option<Self> {
        let body = line.trim_start();

        let (kind, rest) = match body.strip_prefix(|c: char| matches!(c, '*' | '-' | '+')) {
            Some(rest) => (ListKind::Bullet, rest),
            None => {
                let digits = body.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 || digits > 9 {
                    return None;
                }
                (ListKind::Ordered, body[digits..].strip_prefix('.')?)
            }
        };

        if !rest.starts_with(char::is_whitespace) {
            return None;
        }

        Some(Self {
            indent: indent_width(line, tab_width),
            kind,
            text: rest.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets() {
        for line in ["* 1", "- 1", "+ 1"] {
            let marker = ListMarker::parse(line, 4).unwrap();
            assert_eq!(marker.kind, ListKind::Bullet);
            assert_eq!(marker.indent, 0);
            assert_eq!(marker.text, "1");
        }
    }

    #[test]
    fn test_ordered() {
        let marker = ListMarker::parse("   2. 2.1", 4).unwrap();
        assert_eq!(marker.kind, ListKind::Ordered);
        assert_eq!(marker.indent, 3);
        assert_eq!(marker.text, "2.1");
    }

    #[test]
    fn test_nested_indent() {
        assert_eq!(ListMarker::parse("    - 2.2.1", 4).unwrap().indent, 4);
        assert_eq!(ListMarker::parse("\t- x", 4).unwrap().indent, 4);
    }

    #[test]
    fn test_not_markers() {
        assert!(ListMarker::parse("**bold**", 4).is_none());
        assert!(ListMarker::parse("-1", 4).is_none());
        assert!(ListMarker::parse("1.5 apples", 4).is_none());
        assert!(ListMarker::parse("2024", 4).is_none());
        assert!(ListMarker::parse("plain text", 4).is_none());
        assert!(ListMarker::parse("", 4).is_none());
        assert!(ListMarker::parse("*", 4).is_none());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ListKind::Bullet.tag(), "ul");
        assert_eq!(ListKind::Ordered.tag(), "ol");
    }
}
