//! Per-invocation run summary

use std::time::Duration;

/// What a single query run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Answer pieces written to stdout (1 for a complete reply)
    pub fragments: usize,

    /// Application-level errors reported by the server
    pub server_errors: usize,

    /// Wall time from request to end of body
    pub duration: Duration,
}

impl RunReport {
    /// True when the server reported an error inside a successful response
    pub fn had_server_errors(&self) -> bool {
        self.server_errors > 0
    }
}
