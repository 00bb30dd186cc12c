//! Paragraph wrapping, the final stage.

use std::sync::LazyLock;

use regex::Regex;

/// Tags produced by earlier stages; a segment holding any of them is left alone.
static FORMATTED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:h[1-6]|ul|ol|li|hr|table|strong|em|code|a)\b").expect("valid tag regex")
});

/// Split on blank lines and wrap plain segments in `<p>`.
///
/// Single newlines inside a wrapped segment become `<br>`. Segments are
/// joined with no separator.
pub fn wrap_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(|segment| segment.trim_matches('\n'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if FORMATTED_TAG.is_match(segment) {
                segment.to_string()
            } else {
                format!("<p>{}</p>", segment.replace('\n', "<br>"))
            }
        })
        .collect()
}
