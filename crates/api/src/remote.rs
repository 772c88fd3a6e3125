//! HTTP client for the remote log-load endpoint.
//!
//! Wraps a single `GET {url}` returning a JSON array of log entries, using
//! [`reqwest`]. Parsing and timestamp handling live in
//! [`abendlog_core::source`].

use std::time::Duration;

use abendlog_core::log_entry::LogEntry;
use abendlog_core::source::{parse_entries, LoadError, LogSource};
use async_trait::async_trait;

/// Log source backed by an HTTP endpoint.
pub struct HttpLogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpLogSource {
    /// Create a source for `url` whose requests give up after `timeout`.
    pub fn new(url: String, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Request(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl LogSource for HttpLogSource {
    async fn fetch_entries(&self) -> Result<Vec<LogEntry>, LoadError> {
        tracing::debug!(url = %self.url, "Fetching log entries");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        parse_entries(&body)
    }
}
