//! Deep research query client
//!
//! One client, two modes:
//! - Non-streaming: POST, await the full JSON body, print one field
//! - Streaming: POST, print `data:` delta fragments as chunks arrive
//!
//! Both send `{"query": ...}` with `Content-Type: application/json`.

use crate::errors::{ClientError, Result};
use crate::streaming::parser::SseLineParser;
use crate::types::{Query, Reply, ResearchRequest, RunReport, StreamEvent};
use futures_util::StreamExt;
use reqwest::{Client, Response};
use serde_json::Value;
use std::io::Write;
use std::time::Instant;

/// Default endpoint of the non-streaming server
pub const DEFAULT_NON_STREAMING_URL: &str = "http://localhost:8081/deep_research";

/// Default endpoint of the streaming server
pub const DEFAULT_STREAMING_URL: &str = "http://localhost:8080/deep_research";

/// How the response is consumed and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    NonStreaming,
    Streaming,
}

impl Mode {
    /// Endpoint used when nothing overrides it
    pub fn default_url(&self) -> &'static str {
        match self {
            Mode::NonStreaming => DEFAULT_NON_STREAMING_URL,
            Mode::Streaming => DEFAULT_STREAMING_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::NonStreaming => "non_streaming",
            Mode::Streaming => "streaming",
        }
    }
}

/// Research server client
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
    endpoint: String,
    mode: Mode,
}

impl QueryClient {
    /// Create client for the mode's default endpoint
    pub fn new(mode: Mode) -> Result<Self> {
        Self::with_endpoint(mode.default_url(), mode)
    }

    /// Create client with a custom endpoint
    pub fn with_endpoint(endpoint: &str, mode: Mode) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            mode,
        })
    }

    /// Run the query in this client's mode
    pub async fn run<O: Write, E: Write>(
        &self,
        query: &Query,
        out: &mut O,
        err: &mut E,
    ) -> Result<RunReport> {
        match self.mode {
            Mode::NonStreaming => self.run_non_streaming(query, out, err).await,
            Mode::Streaming => self.run_streaming(query, out, err).await,
        }
    }

    /// Send the query and render the complete response.
    ///
    /// An `error.message` in a successful response is written to `err` and
    /// counted, but does not fail the run.
    pub async fn run_non_streaming<O: Write, E: Write>(
        &self,
        query: &Query,
        out: &mut O,
        err: &mut E,
    ) -> Result<RunReport> {
        let started = Instant::now();
        let response = self.send(query).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_status(status, &body));
        }

        let text = response.text().await?;

        let mut report = RunReport::default();
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                let reply = Reply::from_body(body);
                match &reply {
                    Reply::ServerError(message) => {
                        tracing::debug!(%message, "server reported an error");
                        report.server_errors += 1;
                    }
                    _ => report.fragments += 1,
                }
                reply.render(out, err)?;
            }
            Err(e) => {
                tracing::debug!(error = %e, "response body is not JSON, printing as text");
                writeln!(out, "{}", text)?;
                out.flush()?;
                report.fragments += 1;
            }
        }

        report.duration = started.elapsed();
        Ok(report)
    }

    /// Send the query and render delta fragments as they arrive.
    ///
    /// Stream `error` payloads are written to `err` and counted; the stream
    /// keeps going. The run ends when the body ends.
    pub async fn run_streaming<O: Write, E: Write>(
        &self,
        query: &Query,
        out: &mut O,
        err: &mut E,
    ) -> Result<RunReport> {
        let started = Instant::now();
        let response = self.send(query).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_status(status, &body));
        }

        let mut report = RunReport::default();
        let mut parser = SseLineParser::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| ClientError::StreamingError(e.to_string()))?;
            tracing::trace!(bytes = bytes.len(), "stream chunk");

            for event in parser.add_bytes(&bytes)? {
                Self::emit(&event, &mut report, out, err)?;
            }
        }

        for event in parser.finish() {
            Self::emit(&event, &mut report, out, err)?;
        }

        report.duration = started.elapsed();
        tracing::debug!(
            fragments = report.fragments,
            server_errors = report.server_errors,
            "stream ended"
        );
        Ok(report)
    }

    fn emit<O: Write, E: Write>(
        event: &StreamEvent,
        report: &mut RunReport,
        out: &mut O,
        err: &mut E,
    ) -> Result<()> {
        match event {
            StreamEvent::Delta(_) => report.fragments += 1,
            StreamEvent::Error(error) => {
                tracing::debug!(%error, "stream reported an error");
                report.server_errors += 1;
            }
            StreamEvent::Done => tracing::debug!("stream sentinel received"),
        }
        event.render(out, err)
    }

    async fn send(&self, query: &Query) -> Result<Response> {
        tracing::debug!(endpoint = %self.endpoint, mode = self.mode.as_str(), "sending query");

        let request = ResearchRequest {
            query: query.as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "response received");
        Ok(response)
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }
}
