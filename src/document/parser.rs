//! Decoding raw input into documents and agent replies.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use super::types::{AgentReply, Document};

/// Errors that can occur while decoding a JSON payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is missing the `response` field")]
    MissingResponse,

    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Result type for payload decoding
pub type PayloadResult<T> = Result<T, PayloadError>;

/// How raw input should be interpreted.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Detect agent payloads, otherwise treat as markdown
    #[default]
    Auto,
    /// Always markdown text
    Markdown,
    /// Always JSON: a reply object or a bare value
    Json,
}

/// Decoded input: either a full agent reply or a bare document.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Reply(AgentReply),
    Document(Document),
}

impl Input {
    pub fn into_reply(self) -> AgentReply {
        match self {
            Self::Reply(reply) => reply,
            Self::Document(document) => AgentReply {
                response: match document {
                    Document::Text(text) => Value::String(text),
                    Document::Structured(value) => value,
                },
                agent_type: None,
                sources: Vec::new(),
            },
        }
    }

    pub fn document(&self) -> Document {
        match self {
            Self::Reply(reply) => reply.document(),
            Self::Document(document) => document.clone(),
        }
    }
}

/// Decode an agent reply from JSON text.
///
/// # Errors
/// Returns an error if the text is not JSON, is not an object, or lacks `response`.
pub fn parse_reply(text: &str) -> PayloadResult<AgentReply> {
    let value: Value = serde_json::from_str(text)?;
    reply_from_value(value)
}

fn reply_from_value(value: Value) -> PayloadResult<AgentReply> {
    let Value::Object(map) = &value else {
        return Err(PayloadError::NotAnObject(json_kind(&value)));
    };
    if !map.contains_key("response") {
        return Err(PayloadError::MissingResponse);
    }
    Ok(serde_json::from_value(value)?)
}

/// Interpret raw input according to `format`.
///
/// `path` is only used as a hint in `Auto` mode (`.json` files are payloads).
///
/// # Errors
/// Returns an error in `Json` mode when the text is not valid JSON, and in
/// `Auto` mode when a `.json` file does not hold valid JSON.
pub fn parse_input(text: &str, format: InputFormat, path: Option<&Path>) -> PayloadResult<Input> {
    match format {
        InputFormat::Markdown => Ok(Input::Document(Document::text(text))),
        InputFormat::Json => parse_json_input(text),
        InputFormat::Auto => {
            if path.is_some_and(has_json_extension) {
                return parse_json_input(text);
            }
            if text.trim_start().starts_with('{') {
                match parse_reply(text) {
                    Ok(reply) => return Ok(Input::Reply(reply)),
                    Err(err) => {
                        tracing::debug!("input looks like JSON but is not a reply: {err}");
                    }
                }
            }
            Ok(Input::Document(Document::text(text)))
        }
    }
}

fn parse_json_input(text: &str) -> PayloadResult<Input> {
    let value: Value = serde_json::from_str(text)?;
    match &value {
        Value::Object(map) if map.contains_key("response") => {
            reply_from_value(value).map(Input::Reply)
        }
        _ => Ok(Input::Document(Document::from_value(value))),
    }
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
