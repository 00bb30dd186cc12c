//! Renderer inputs.
//!
//! This module handles:
//! - The text/structured `Document` split that picks the render path
//! - Decoding agent replies (`response`, `agent_type`, `sources`)
//! - Deciding how raw CLI input should be interpreted

mod parser;
mod types;

pub use parser::{
    Input, InputFormat, PayloadError, PayloadResult, parse_input, parse_reply,
};
pub use types::{AgentReply, Document, Mode, Source};

/// Normalize line endings so the line-oriented stages only see `\n`.
pub fn normalize_newlines(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}
