// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderOptions)
    clippy::module_name_repetitions
)]

//! # Panelmark
//!
//! Renders agent answers written in a small markdown dialect as HTML for a
//! browser answer panel.
//!
//! The dialect covers:
//! - Headings, horizontal rules, ordered and unordered lists
//! - Pipe tables with per-column alignment
//! - Bold, italic, inline code, and links
//! - Blank-line separated paragraphs
//!
//! Anything that is not text (a JSON object, array, number) is shown as its
//! pretty-printed structure instead.
//!
//! ```
//! use panelmark::document::Document;
//!
//! let html = Document::text("## Results\n\nAll checks passed.").to_html();
//! assert_eq!(html, "<h2>Results</h2><p>All checks passed.</p>");
//! ```
//!
//! ## Modules
//!
//! - [`document`]: Renderer inputs and agent reply decoding
//! - [`render`]: The markdown to HTML pipeline
//! - [`panel`]: Mode indicator, content, and citation assembly
//! - [`config`]: Saved command-line defaults
//! - [`watcher`]: Input file watching
//! - [`perf`]: Timing instrumentation

pub mod config;
pub mod document;
pub mod panel;
pub mod perf;
pub mod render;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{AgentReply, Document, Mode, Source};
    pub use crate::panel::Panel;
    pub use crate::render::{ListMode, RenderOptions, render, render_markdown};
}
