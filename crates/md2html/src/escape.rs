//! Backslash-escape codec.
//!
//! Escaped punctuation is swapped for a `U+XXXX` placeholder before the
//! inline transforms run and restored afterwards, so a `\*` in the source
//! can never be read as live markup by any pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Characters the inline pipeline protects
pub const MARKUP: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!', '|', '~',
];

static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(.)").unwrap());
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"U\+([0-9A-F]{4})").unwrap());

/// What happens to the backslash of an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// The backslash is part of the escape: [`encode`] drops it and
    /// [`decode`] writes it back.
    #[default]
    Escaped,
    /// The backslash is ordinary text: [`encode`] leaves it in front of the
    /// placeholder and [`decode`] emits the bare character.
    Literal,
}

/// Placeholder for a single character, e.g. `U+002A` for `*`
pub fn placeholder(c: char) -> String {
    format!("U+{:04X}", c as u32)
}

/// Replace `\c` with the placeholder of `c` for every `c` in `targets`.
///
/// A backslash followed by anything else is left alone. `\\` is consumed as
/// a pair, so the character after it stays live unless `\` is a target.
pub fn encode(text: &str, targets: &[char], mode: EscapeMode) -> String {
    ESCAPE
        .replace_all(text, |caps: &Captures| match caps[1].chars().next() {
            Some(c) if targets.contains(&c) => match mode {
                EscapeMode::Escaped => placeholder(c),
                EscapeMode::Literal => format!("\\{}", placeholder(c)),
            },
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Replace placeholders whose character is in `targets` with that character.
///
/// Placeholders for other characters are left as they are.
pub fn decode(text: &str, targets: &[char], mode: EscapeMode) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let decoded = u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .filter(|c| targets.contains(c));
            match (decoded, mode) {
                (Some(c), EscapeMode::Escaped) => format!("\\{}", c),
                (Some(c), EscapeMode::Literal) => c.to_string(),
                (None, _) => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace every occurrence of a target character with its placeholder.
///
/// Transforms call this on the literal parts of their output (code bodies,
/// URLs) so later passes leave them alone; [`decode`] restores them.
pub fn shield(text: &str, targets: &[char]) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if targets.contains(&c) {
            result.push_str(&placeholder(c));
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_escaped() {
        assert_eq!(encode("a \\* b", &['*'], EscapeMode::Escaped), "a U+002A b");
        assert_eq!(encode("\\* b", &['*'], EscapeMode::Escaped), "U+002A b");
        assert_eq!(encode("a \\*", &['*'], EscapeMode::Escaped), "a U+002A");
        assert_eq!(encode("a \\_ b", &['*'], EscapeMode::Escaped), "a \\_ b");
    }

    #[test]
    fn test_encode_literal() {
        assert_eq!(encode("a \\* b", &['*'], EscapeMode::Literal), "a \\U+002A b");
        assert_eq!(encode("\\* b", &['*'], EscapeMode::Literal), "\\U+002A b");
        assert_eq!(encode("a \\*", &['*'], EscapeMode::Literal), "a \\U+002A");
        assert_eq!(encode("a \\_ b", &['*'], EscapeMode::Literal), "a \\_ b");
    }

    #[test]
    fn test_decode_literal() {
        assert_eq!(decode("a U+002A b", &['*'], EscapeMode::Literal), "a * b");
        assert_eq!(decode("U+002A b", &['*'], EscapeMode::Literal), "* b");
        assert_eq!(decode("a U+002A", &['*'], EscapeMode::Literal), "a *");
        assert_eq!(decode("a U+002B b", &['*'], EscapeMode::Literal), "a U+002B b");
    }

    #[test]
    fn test_decode_escaped() {
        assert_eq!(decode("a U+002A b", &['*'], EscapeMode::Escaped), "a \\* b");
        assert_eq!(decode("U+002A b", &['*'], EscapeMode::Escaped), "\\* b");
        assert_eq!(decode("a U+002A", &['*'], EscapeMode::Escaped), "a \\*");
        assert_eq!(decode("a U+002B b", &['*'], EscapeMode::Escaped), "a U+002B b");
    }

    #[test]
    fn test_adjacent_escapes() {
        assert_eq!(
            encode("\\*\\*x\\*", &['*'], EscapeMode::Escaped),
            "U+002AU+002AxU+002A"
        );
        assert_eq!(decode("U+002AU+002A", &['*'], EscapeMode::Literal), "**");
    }

    #[test]
    fn test_escaped_backslash_leaves_next_char_live() {
        assert_eq!(encode("\\\\*", &['*'], EscapeMode::Escaped), "\\\\*");
        assert_eq!(encode("\\\\*", &['*', '\\'], EscapeMode::Escaped), "U+005C*");
    }

    #[test]
    fn test_lowercase_hex_is_not_a_placeholder() {
        assert_eq!(decode("U+002a", &['*'], EscapeMode::Literal), "U+002a");
    }

    #[test]
    fn test_shield() {
        assert_eq!(shield("a_b*c", &['_', '*']), "aU+005FbU+002Ac");
        assert_eq!(shield("plain", MARKUP), "plain");
        assert_eq!(
            decode(&shield("x_y", MARKUP), MARKUP, EscapeMode::Literal),
            "x_y"
        );
    }

    /// Text built from plain characters, bare delimiters and escaped delimiters
    fn escapable_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("a".to_string()),
                Just("b ".to_string()),
                Just("*".to_string()),
                Just("_".to_string()),
                Just("\\*".to_string()),
                Just("\\_".to_string()),
            ],
            0..32,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_round_trip_escaped(text in escapable_text()) {
            let encoded = encode(&text, &['*', '_'], EscapeMode::Escaped);
            prop_assert_eq!(decode(&encoded, &['*', '_'], EscapeMode::Escaped), text);
        }

        #[test]
        fn prop_round_trip_literal(text in escapable_text()) {
            let encoded = encode(&text, &['*', '_'], EscapeMode::Literal);
            prop_assert_eq!(decode(&encoded, &['*', '_'], EscapeMode::Literal), text);
        }

        #[test]
        fn prop_encoded_text_has_no_escaped_targets(text in escapable_text()) {
            let encoded = encode(&text, &['*', '_'], EscapeMode::Escaped);
            prop_assert!(!encoded.contains("\\*"));
            prop_assert!(!encoded.contains("\\_"));
        }
    }
}
