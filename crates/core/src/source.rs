//! Remote log source capability and wire parsing.
//!
//! A log source returns the complete set of records that should replace the
//! store. The wire shape matches [`LogEntry`] except that `timestamp` is an
//! ISO-8601 string; records are normalized on the way in so loaded data
//! obeys the same length bounds as typed input.

use async_trait::async_trait;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::log_entry::{Category, LogEntry};
use crate::types::{EntryId, Timestamp};

/// Errors from loading records out of a [`LogSource`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No log source is configured.
    #[error("No log source is configured")]
    NotConfigured,

    /// The request never produced a response (network, DNS, timeout, ...).
    #[error("Log source request failed: {0}")]
    Request(String),

    /// The source answered with a non-2xx status.
    #[error("Log source returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of log entries.
    #[error("Log source returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record carried a timestamp that is not ISO-8601.
    #[error("Log entry {id} has an invalid timestamp '{value}'")]
    Timestamp { id: EntryId, value: String },

    /// Two records in one batch share an id.
    #[error("Log source returned id '{id}' more than once")]
    DuplicateId { id: EntryId },
}

/// Where the load flow gets its records from.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch every record, in the order they should be stored.
    async fn fetch_entries(&self) -> Result<Vec<LogEntry>, LoadError>;
}

/// One record as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLogEntry {
    pub id: EntryId,
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub log_number: String,
    pub category: Category,
    pub timestamp: String,
    pub description: String,
    pub problem: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub recovery: String,
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub prevention: String,
    pub created_by: String,
}

impl TryFrom<RemoteLogEntry> for LogEntry {
    type Error = LoadError;

    fn try_from(remote: RemoteLogEntry) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&remote.timestamp).ok_or_else(|| LoadError::Timestamp {
            id: remote.id.clone(),
            value: remote.timestamp.clone(),
        })?;

        let entry = LogEntry {
            id: remote.id,
            subsystem: remote.subsystem,
            composite: remote.composite,
            program: remote.program,
            abend_code: remote.abend_code,
            jobname: remote.jobname,
            log_number: remote.log_number,
            category: remote.category,
            timestamp,
            description: remote.description,
            problem: remote.problem,
            resolution: remote.resolution,
            recovery: remote.recovery,
            results: remote.results,
            prevention: remote.prevention,
            created_by: remote.created_by,
        };
        Ok(entry.normalized())
    }
}

/// Parse an ISO-8601 timestamp. Strings with an offset are converted to
/// UTC; strings without one are taken as UTC, and a bare date is midnight.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Reject a batch in which any id appears twice.
pub fn ensure_unique_ids(entries: &[LogEntry]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(LoadError::DuplicateId {
                id: entry.id.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a JSON array body into log entries. Any bad record, or a repeated
/// id, fails the whole batch.
pub fn parse_entries(body: &[u8]) -> Result<Vec<LogEntry>, LoadError> {
    let remote: Vec<RemoteLogEntry> = serde_json::from_slice(body)?;
    let entries = remote
        .into_iter()
        .map(LogEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&entries)?;
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
