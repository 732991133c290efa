//! Built-in inline transforms.
//!
//! Each transform is a pure function over one line of already escape-encoded
//! text. Literal parts of the HTML they produce are shielded, so the output
//! is in encoded form until the pipeline decodes it.

use md2html_core::{escape_attr, escape_text};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::InlineRule;
use crate::escape::{shield, MARKUP};

static STRONG_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static STRONG_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.*?)__").unwrap());
static DEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.*?)~~").unwrap());
static EM_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^*])\*(.*?)\*").unwrap());
static EM_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^_])_(.*?)_").unwrap());
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// Create the built-in rules in the order the pipeline applies them
pub fn builtin_rules() -> Vec<InlineRule> {
    vec![
        InlineRule::new("code", inline_code_spans),
        InlineRule::new("image", images),
        InlineRule::new("link", links),
        InlineRule::new("strong_em_del", strong_em_del),
    ]
}

/// `**x**`/`__x__` to strong, `~~x~~` to del, then `*x*`/`_x_` to em.
///
/// Pairs are matched left to right, non-greedy, within one delimiter family.
/// An emphasis opener must follow some other character, so a leading `**pp`
/// stays literal while `xx**pp` becomes `xx<em></em>pp`.
pub fn strong_em_del(text: &str) -> String {
    let text = STRONG_STAR.replace_all(text, "<strong>${1}</strong>");
    let text = STRONG_UNDERSCORE.replace_all(&text, "<strong>${1}</strong>");
    let text = DEL.replace_all(&text, "<del>${1}</del>");
    let text = EM_STAR.replace_all(&text, "${1}<em>${2}</em>");
    let text = EM_UNDERSCORE.replace_all(&text, "${1}<em>${2}</em>");
    text.into_owned()
}

/// `` `x` `` to `<code>x</code>`, delimiters paired left to right
pub fn inline_code_spans(text: &str) -> String {
    CODE_SPAN
        .replace_all(text, |caps: &Captures| {
            format!("<code>{}</code>", shield(&escape_text(&caps[1]), MARKUP))
        })
        .into_owned()
}

/// `[text](target)` to `<a href="target">text</a>`
pub fn links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(
            "<a href=\"{}\">{}</a>",
            shield(&escape_attr(&caps[2]), MARKUP),
            &caps[1]
        )
    })
    .into_owned()
}

/// `![alt](target)` to `<img src="target" alt="alt"/>`
pub fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures| {
            format!(
                "<img src=\"{}\" alt=\"{}\"/>",
                shield(&escape_attr(&caps[2]), MARKUP),
                shield(&escape_attr(&caps[1]), MARKUP)
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_styling() {
        let cases = [
            ("", ""),
            ("**bb**", "<strong>bb</strong>"),
            ("xx**bb**", "xx<strong>bb</strong>"),
            ("**bb**yy", "<strong>bb</strong>yy"),
            ("xx**bb**yy", "xx<strong>bb</strong>yy"),
            ("**pp", "**pp"),
            ("xx**pp", "xx<em></em>pp"),
            ("**ppyy", "**ppyy"),
            ("xx__ppyy", "xx<em></em>ppyy"),
            (
                "**bb**xx**bb**__bb__**bb**yy",
                "<strong>bb</strong>xx<strong>bb</strong><strong>bb</strong><strong>bb</strong>yy",
            ),
            ("**bb***bb****", "<strong>bb</strong>*bb<strong></strong>"),
            ("~~bb~~", "<del>bb</del>"),
            ("xx~~bb~~", "xx<del>bb</del>"),
            ("~~bb~~yy", "<del>bb</del>yy"),
        ];
        for (input, expected) in cases {
            assert_eq!(strong_em_del(input), expected, "strong_em_del({:?})", input);
        }
    }

    #[test]
    fn test_emphasis_after_text() {
        assert_eq!(strong_em_del("a *b* c"), "a <em>b</em> c");
        assert_eq!(strong_em_del("a _b_ c"), "a <em>b</em> c");
    }

    #[test]
    fn test_images() {
        assert_eq!(
            images("aa ![im](lnk) bb"),
            "aa <img src=\"lnk\" alt=\"im\"/> bb"
        );
        assert_eq!(
            images("![i1](l1)![i2](l2)"),
            "<img src=\"l1\" alt=\"i1\"/><img src=\"l2\" alt=\"i2\"/>"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(links("aa [txt](link) bb"), "aa <a href=\"link\">txt</a> bb");
        assert_eq!(
            links("[t1](l1)[t2](l2)"),
            "<a href=\"l1\">t1</a><a href=\"l2\">t2</a>"
        );
    }

    #[test]
    fn test_link_target_is_shielded() {
        assert_eq!(
            links("[a](x_y)"),
            "<a href=\"xU+005Fy\">a</a>"
        );
    }

    #[test]
    fn test_inline_code_spans() {
        assert_eq!(inline_code_spans("aa `code` bb"), "aa <code>code</code> bb");
        assert_eq!(
            inline_code_spans("`a` and `b`"),
            "<code>a</code> and <code>b</code>"
        );
        assert_eq!(inline_code_spans("`a<b`"), "<code>a&lt;b</code>");
        assert_eq!(inline_code_spans("odd ` tick"), "odd ` tick");
    }

    proptest! {
        #[test]
        fn prop_identity_on_plain_text(text in "[a-zA-Z0-9 ,;:?'\"]{0,64}") {
            prop_assert_eq!(strong_em_del(&text), text.clone());
            prop_assert_eq!(images(&text), text.clone());
            prop_assert_eq!(links(&text), text.clone());
            prop_assert_eq!(inline_code_spans(&text), text);
        }
    }
}
