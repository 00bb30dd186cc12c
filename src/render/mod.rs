//! Markdown to HTML rendering.
//!
//! The pipeline runs in a fixed order over one complete document:
//! 1. Tables are extracted first so cell pipes never reach the line rules
//! 2. Headings, rules, and lists are tagged line by line
//! 3. Inline spans (bold, italic, code, links) are substituted
//! 4. Remaining plain runs are wrapped in paragraphs
//!
//! Structured (non-text) documents skip all of this and are pretty-printed.
//!
//! Rendering never fails. Malformed markdown degrades to literal text.

mod block;
mod inline;
mod paragraph;
mod table;

use serde_json::Value;

use crate::document::{Document, normalize_newlines};

pub use block::ListKind;
pub use inline::format_inline;
pub use table::{Alignment, TableBlock};

/// How list items separated by blank lines are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Only directly adjacent items share a list
    #[default]
    Contiguous,
    /// Same-kind runs separated only by blank lines are merged into one list
    Merged,
}

/// Options for a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub list_mode: ListMode,
}

impl RenderOptions {
    #[must_use]
    pub const fn with_list_mode(mut self, list_mode: ListMode) -> Self {
        self.list_mode = list_mode;
        self
    }
}

impl Document {
    /// Render with default options.
    pub fn to_html(&self) -> String {
        render(self)
    }

    pub fn to_html_with(&self, options: &RenderOptions) -> String {
        render_with(self, options)
    }
}

/// Render a document with default options.
pub fn render(document: &Document) -> String {
    render_with(document, &RenderOptions::default())
}

/// Render a document, picking the markdown or structured path.
pub fn render_with(document: &Document, options: &RenderOptions) -> String {
    match document {
        Document::Text(source) => render_markdown_with(source, options),
        Document::Structured(value) => render_structured(value),
    }
}

/// Render markdown text with default options.
pub fn render_markdown(source: &str) -> String {
    render_markdown_with(source, &RenderOptions::default())
}

/// Render markdown text.
pub fn render_markdown_with(source: &str, options: &RenderOptions) -> String {
    let source = normalize_newlines(source);
    let lines: Vec<&str> = source.lines().collect();

    let extracted = table::extract_tables(&lines);
    let tables = extracted
        .iter()
        .filter(|line| matches!(line, table::Line::Html(_)))
        .count();

    let blocks = block::format_blocks(&extracted, options.list_mode);
    let html = paragraph::wrap_paragraphs(&blocks.join("\n"));

    tracing::debug!(
        input_lines = lines.len(),
        tables,
        output_bytes = html.len(),
        "rendered markdown"
    );
    html
}

/// Pretty-print a structured value with two-space indentation.
pub fn render_structured(value: &Value) -> String {
    tracing::debug!("rendering structured value");
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
