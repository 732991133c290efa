//! Leading-rune scanners used by the block builder.

/// True if `s` is at least three characters long and made only of `r`.
///
/// Recognizes setext underlines (`===`, `---`) and thematic breaks.
pub fn only_runes(s: &str, r: char) -> bool {
    s.chars().count() >= 3 && s.chars().all(|c| c == r)
}

/// Length of the run of `r` at the very start of `s`, if it is between 1
/// and `max`; 0 otherwise.
///
/// Leading whitespace is not skipped: `" ##"` yields 0.
pub fn count_leading(s: &str, r: char, max: usize) -> usize {
    let run = s.chars().take_while(|&c| c == r).count();
    if (1..=max).contains(&run) {
        run
    } else {
        0
    }
}

/// Column width of the leading whitespace of `line`.
///
/// A tab advances to the next multiple of `tab_width`.
pub fn indent_width(line: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += tab_width - width % tab_width,
            _ => break,
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_only_runes() {
        assert!(!only_runes("", '='));
        assert!(!only_runes("==", '='));
        assert!(only_runes("===", '='));
        assert!(only_runes("=======", '='));
        assert!(!only_runes("=======x", '='));
        assert!(!only_runes("====x==", '='));
    }

    #[test]
    fn test_count_leading() {
        assert_eq!(count_leading("", '#', 6), 0);
        assert_eq!(count_leading("x", '#', 6), 0);
        assert_eq!(count_leading("#x", '#', 6), 1);
        assert_eq!(count_leading("######x", '#', 6), 6);
        assert_eq!(count_leading("#######x", '#', 6), 0);
        assert_eq!(count_leading(" #####", '#', 6), 0);
        assert_eq!(count_leading("###", '#', 6), 3);
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("x", 4), 0);
        assert_eq!(indent_width("  * a", 4), 2);
        assert_eq!(indent_width("\t- a", 4), 4);
        assert_eq!(indent_width("  \t- a", 4), 4);
        assert_eq!(indent_width("     ", 4), 5);
    }

    proptest! {
        #[test]
        fn prop_count_leading_matches_run(k in 0usize..10, max in 0usize..8, tail in "[a-z ]{0,8}") {
            let s = format!("{}{}", "#".repeat(k), tail);
            let expected = if (1..=max).contains(&k) { k } else { 0 };
            prop_assert_eq!(count_leading(&s, '#', max), expected);
        }

        #[test]
        fn prop_count_leading_empty_is_zero(r in any::<char>(), max in 0usize..16) {
            prop_assert_eq!(count_leading("", r, max), 0);
        }

        #[test]
        fn prop_only_runes_rejects_short(s in "[=]{0,2}") {
            prop_assert!(!only_runes(&s, '='));
        }

        #[test]
        fn prop_only_runes_rejects_foreign_char(prefix in "[=]{0,5}", c in "[^=]", suffix in "[=]{0,5}") {
            let s = format!("{}{}{}", prefix, c, suffix);
            prop_assert!(!only_runes(&s, '='));
        }
    }
}
