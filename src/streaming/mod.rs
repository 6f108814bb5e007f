//! Streaming client module
//!
//! Provides the research query client and incremental line parser.

pub mod client;
pub mod parser;

// Re-export commonly used types
pub use client::{Mode, QueryClient, DEFAULT_NON_STREAMING_URL, DEFAULT_STREAMING_URL};
pub use parser::{SseLineParser, MAX_BUFFER_SIZE};
