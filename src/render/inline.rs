//! Inline spans: bold, italic, code, links.
//!
//! Rules run in a fixed order, each as a global substitution over the whole
//! input. Bold must run before italic so `**x**` is never eaten as two
//! italics.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").expect("valid code regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));

/// Apply every inline rule to `text`.
///
/// Unmatched delimiters are left as literal characters.
pub fn format_inline(text: &str) -> String {
    if !text.contains(['*', '`', '[']) {
        return text.to_string();
    }
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    let text = CODE.replace_all(&text, "<code>$1</code>");
    LINK.replace_all(&text, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned()
}
