//! Line-level blocks: headings, rules, and lists.

use std::sync::LazyLock;

use regex::Regex;

use super::ListMode;
use super::inline::format_inline;
use super::table::Line;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(\S.*?)[ \t]*$").expect("valid heading regex")
});
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("valid rule regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (.*)$").expect("valid list item regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\. (.*)$").expect("valid ordered item regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block<'a> {
    Html(String),
    Heading(usize, &'a str),
    Rule,
    Item(ListKind, Option<u64>, &'a str),
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> Block<'_> {
    if line.trim().is_empty() {
        return Block::Blank;
    }
    if let Some(caps) = HEADING.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Block::Heading(level, text);
    }
    if RULE.is_match(line) {
        return Block::Rule;
    }
    if let Some(text) = UNORDERED_ITEM.captures(line).and_then(|c| c.get(1)) {
        return Block::Item(ListKind::Unordered, None, text.as_str());
    }
    if let Some(caps) = ORDERED_ITEM.captures(line) {
        let number = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Block::Item(ListKind::Ordered, number, text);
    }
    Block::Text(line)
}

/// An open list being collected.
struct OpenList {
    kind: ListKind,
    /// First number of an ordered list, kept only when it is not 1
    start: Option<u64>,
    items: Vec<String>,
}

impl OpenList {
    fn close(self) -> String {
        let tag = self.kind.tag();
        let items: String = self
            .items
            .iter()
            .map(|item| format!("<li>{item}</li>"))
            .collect();
        match self.start {
            Some(start) => format!(r#"<{tag} start="{start}">{items}</{tag}>"#),
            None => format!("<{tag}>{items}</{tag}>"),
        }
    }
}

fn push_item(
    list: &mut Option<OpenList>,
    out: &mut Vec<String>,
    kind: ListKind,
    number: Option<u64>,
    item: String,
) {
    if let Some(open) = list.as_mut().filter(|open| open.kind == kind) {
        open.items.push(item);
        return;
    }
    if let Some(open) = list.take() {
        out.push(open.close());
    }
    *list = Some(OpenList {
        kind,
        start: number.filter(|&n| n != 1),
        items: vec![item],
    });
}

/// Format block structure and inline spans, one output line per block.
///
/// Lists collapse into a single line each. Blank lines are kept as empty
/// strings so paragraph splitting still sees them.
pub fn format_blocks(lines: &[Line<'_>], list_mode: ListMode) -> Vec<String> {
    let blocks: Vec<Block<'_>> = lines
        .iter()
        .map(|line| match line {
            Line::Html(html) => Block::Html(html.clone()),
            Line::Text(text) => classify(text),
        })
        .collect();

    let following = match list_mode {
        ListMode::Merged => following_item_kinds(&blocks),
        ListMode::Contiguous => Vec::new(),
    };

    let mut out = Vec::with_capacity(blocks.len());
    let mut list: Option<OpenList> = None;

    for (i, block) in blocks.iter().enumerate() {
        let rendered = match block {
            Block::Item(kind, number, text) => {
                push_item(&mut list, &mut out, *kind, *number, format_inline(text));
                continue;
            }
            Block::Blank
                if list
                    .as_ref()
                    .is_some_and(|open| following.get(i) == Some(&Some(open.kind))) =>
            {
                tracing::trace!("merging list across blank line {i}");
                continue;
            }
            Block::Html(html) => html.clone(),
            Block::Heading(level, text) => format!("<h{level}>{}</h{level}>", format_inline(text)),
            Block::Rule => "<hr>".to_string(),
            Block::Blank => String::new(),
            Block::Text(text) => format_inline(text),
        };
        if let Some(open) = list.take() {
            out.push(open.close());
        }
        out.push(rendered);
    }

    if let Some(open) = list.take() {
        out.push(open.close());
    }
    out
}

/// For each position, the list kind of the first non-blank block at or after
/// it, if that block is a list item. Built in one backward pass.
fn following_item_kinds(blocks: &[Block<'_>]) -> Vec<Option<ListKind>> {
    let mut kinds = vec![None; blocks.len()];
    let mut next = None;
    for (i, block) in blocks.iter().enumerate().rev() {
        match block {
            Block::Blank => {}
            Block::Item(kind, ..) => next = Some(*kind),
            _ => next = None,
        }
        kinds[i] = next;
    }
    kinds
}
