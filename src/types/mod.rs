//! Type definitions module
//!
//! Query, wire messages and run summaries.

pub mod execution;
pub mod messages;
pub mod query;

// Re-export commonly used types
pub use execution::RunReport;
pub use messages::{Reply, ResearchRequest, StreamEvent, DATA_PREFIX, DONE_SENTINEL};
pub use query::Query;
