//! Types exchanged with the engine outside the chain calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the engine (e.g., "http://127.0.0.1:8790")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned by the engine for failed calls.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
