//! deepresearch - command-line client for a local deep research server
//!
//! Posts `{"query": ...}` to the server and prints the answer, either from
//! one complete JSON response or incrementally from a `data:` line stream.
//!
//! # Architecture
//!
//! - **types**: query value, wire messages, run report
//! - **streaming**: `QueryClient` and the incremental line parser
//! - **cli**: argument parsing and TOML configuration
//! - **logging**: `tracing` subscriber setup

pub mod errors;
pub mod types;
pub mod streaming;
pub mod cli;
pub mod logging;

// Re-export commonly used types
pub use errors::{ClientError, Result};
pub use streaming::{Mode, QueryClient};
pub use types::{Query, RunReport};
