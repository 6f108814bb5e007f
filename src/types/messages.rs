//! Message types exchanged with the research server
//!
//! Server payloads are read defensively: every field is presence-checked
//! through JSON pointers and nothing beyond that is validated.

use crate::errors::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Literal that marks the end of a stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Prefix of a server-sent-event data line
pub const DATA_PREFIX: &str = "data:";

/// Request body posted to both endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRequest<'a> {
    pub query: &'a str,
}

/// Classified non-streaming response body
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `choices[0].message.content`
    Content(String),

    /// `error.message`
    ServerError(String),

    /// Any other shape, printed as-is
    Raw(Value),
}

impl Reply {
    /// Classify a parsed body. Content wins over an error message.
    pub fn from_body(body: Value) -> Self {
        if let Some(content) = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
        {
            return Reply::Content(content.to_string());
        }

        if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
            return Reply::ServerError(message.to_string());
        }

        Reply::Raw(body)
    }

    /// Write the reply: answers and raw bodies to `out`, server errors to `err`.
    pub fn render<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> Result<()> {
        match self {
            Reply::Content(content) => {
                writeln!(out, "{}", content)?;
                out.flush()?;
            }
            Reply::ServerError(message) => {
                writeln!(err, "Error from server: {}", message)?;
            }
            Reply::Raw(body) => {
                writeln!(out, "{}", serde_json::to_string_pretty(body)?)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

/// One meaningful event decoded from a streaming line
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// `choices[0].delta.content` fragment
    Delta(String),

    /// Top-level `error` field
    Error(Value),

    /// `[DONE]` sentinel
    Done,
}

impl StreamEvent {
    /// Decode one line of the streaming body.
    ///
    /// Returns `None` for lines that carry nothing to act on: non-`data:`
    /// lines, empty payloads, unparseable JSON and payloads with neither a
    /// delta nor an error.
    pub fn from_line(line: &str) -> Option<Self> {
        let payload = line.strip_prefix(DATA_PREFIX)?.trim();

        if payload.is_empty() {
            return None;
        }

        if payload == DONE_SENTINEL {
            return Some(StreamEvent::Done);
        }

        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed stream payload");
                return None;
            }
        };

        if let Some(fragment) = value
            .pointer("/choices/0/delta/content")
            .and_then(Value::as_str)
        {
            return Some(StreamEvent::Delta(fragment.to_string()));
        }

        match value.get("error") {
            Some(Value::Null) | None => None,
            Some(error) => Some(StreamEvent::Error(error.clone())),
        }
    }

    /// Write the event. Fragments go to `out` unseparated; `Done` is a no-op.
    pub fn render<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> Result<()> {
        match self {
            StreamEvent::Delta(fragment) => {
                out.write_all(fragment.as_bytes())?;
                out.flush()?;
            }
            StreamEvent::Error(error) => {
                let text = match error {
                    Value::String(message) => message.clone(),
                    other => other.to_string(),
                };
                writeln!(err, "\nError from stream: {}", text)?;
            }
            StreamEvent::Done => {}
        }
        Ok(())
    }
}
