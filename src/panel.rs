//! Answer panel assembly.
//!
//! Wraps rendered content with the mode indicator and the citation list the
//! way the browser panel shows them. Only text generated here is escaped;
//! the rendered markdown is passed through as-is.

use std::fmt::Write;

use crate::document::{AgentReply, Document, Mode, Source};
use crate::render::{RenderOptions, render_structured, render_with};

/// A reply ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    document: Document,
    mode: Mode,
    sources: Vec<Source>,
    options: RenderOptions,
}

impl Panel {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            mode: Mode::Unknown,
            sources: Vec::new(),
            options: RenderOptions::default(),
        }
    }

    /// Build a panel from a decoded agent reply.
    pub fn from_reply(reply: &AgentReply) -> Self {
        Self::new(reply.document())
            .with_mode(reply.mode())
            .with_sources(reply.sources.clone())
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Render only the content, without indicator or sources.
    pub fn content_html(&self) -> String {
        match &self.document {
            Document::Text(_) => render_with(&self.document, &self.options),
            Document::Structured(value) => {
                format!("<pre>{}</pre>", escape_html(&render_structured(value)))
            }
        }
    }

    /// Render the full panel.
    pub fn to_html(&self) -> String {
        let mut out = format!(
            r#"<div class="mode-indicator">Mode: {}</div>"#,
            escape_html(self.mode.label())
        );
        out.push('\n');
        let _ = write!(
            out,
            r#"<div class="markdown-content">{}</div>"#,
            self.content_html()
        );
        if !self.sources.is_empty() {
            out.push('\n');
            out.push_str(&sources_html(&self.sources));
        }
        out
    }
}

fn sources_html(sources: &[Source]) -> String {
    let mut out = String::from(r#"<div class="sources"><h4>Sources</h4><ol>"#);
    for source in sources {
        let _ = write!(
            out,
            r#"<li><a href="{}" target="_blank">{}</a></li>"#,
            escape_html(source.url()),
            escape_html(source.title())
        );
    }
    out.push_str("</ol></div>");
    out
}

/// Error box shown in place of a panel when no reply could be obtained.
pub fn error_html(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, escape_html(message))
}

/// Escape text for safe inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
