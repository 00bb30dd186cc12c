//! Core document types.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// A single input to the renderer.
///
/// Text goes through the markdown pipeline; anything else is shown as its
/// pretty-printed structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Markdown source text
    Text(String),
    /// Any non-string JSON value (object, array, number, bool, null)
    Structured(Value),
}

impl Document {
    /// Create a text document.
    pub fn text(source: impl Into<String>) -> Self {
        Self::Text(source.into())
    }

    /// Wrap a JSON value, unwrapping strings into text documents.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }

    /// Returns true if this document takes the markdown path.
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// The markdown source, if this is a text document.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Document {
    fn from(source: &str) -> Self {
        Self::Text(source.to_string())
    }
}

impl From<String> for Document {
    fn from(source: String) -> Self {
        Self::Text(source)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Which agent produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Fast,
    Deep,
    #[default]
    Unknown,
}

impl Mode {
    /// Parse an `agent_type` value. Unrecognized values map to `Unknown`.
    pub fn from_agent_type(agent_type: Option<&str>) -> Self {
        match agent_type.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("fast") => Self::Fast,
            Some("deep") => Self::Deep,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label for the mode indicator.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Deep => "Deep",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A citation attached to a reply.
///
/// Accepts either a bare URL string or an object with `url` and optional `title`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Url(String),
    Titled {
        url: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl Source {
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Titled { url, .. } => url,
        }
    }

    /// Text shown for the citation, falling back to the URL.
    pub fn title(&self) -> &str {
        match self {
            Self::Titled {
                title: Some(title), ..
            } if !title.trim().is_empty() => title.as_str(),
            _ => self.url(),
        }
    }
}

/// JSON reply returned by the agent backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentReply {
    /// The answer body; normally markdown text
    pub response: Value,
    /// `fast`, `deep`, or whatever the router decided
    #[serde(default)]
    pub agent_type: Option<String>,
    /// Citations to list under the answer
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl AgentReply {
    /// The reply body as a renderer input.
    pub fn document(&self) -> Document {
        Document::from_value(self.response.clone())
    }

    pub fn mode(&self) -> Mode {
        Mode::from_agent_type(self.agent_type.as_deref())
    }
}
