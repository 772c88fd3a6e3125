//! Process-local log entry store.
//!
//! An ordered collection, newest first. Every mutation bumps a revision
//! counter so derived views (the filter memo) can tell when to recompute.
//! Mutations against an id that is not present are silent no-ops.

use chrono::Utc;

use crate::log_entry::{LogEntry, NewLogEntry, UpdateLogEntry};
use crate::types::{new_entry_id, Timestamp};

#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    revision: u64,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds `entries`, in the given order.
    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            revision: 0,
        }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Create a record stamped with a fresh id and the current time, and
    /// put it at the front.
    pub fn create(&mut self, candidate: NewLogEntry) -> LogEntry {
        self.create_at(candidate, Utc::now())
    }

    /// [`create`](Self::create) with an explicit creation time.
    pub fn create_at(&mut self, candidate: NewLogEntry, timestamp: Timestamp) -> LogEntry {
        let entry = candidate.into_entry(new_entry_id(), timestamp);
        self.entries.insert(0, entry.clone());
        self.revision += 1;

        tracing::debug!(entry_id = %entry.id, label = %entry.label(), "Log entry created");
        entry
    }

    /// Apply `changes` to the record with `id` in place. Position, id and
    /// timestamp are preserved. Returns the updated record, or `None` when
    /// the id is unknown.
    pub fn update(&mut self, id: &str, changes: &UpdateLogEntry) -> Option<&LogEntry> {
        let Some(index) = self.position(id) else {
            tracing::debug!(entry_id = %id, "Update ignored, log entry not found");
            return None;
        };

        self.entries[index].apply(changes);
        self.revision += 1;
        tracing::debug!(entry_id = %id, "Log entry updated");
        Some(&self.entries[index])
    }

    /// Remove the record with `id`, returning it if it was present.
    pub fn delete(&mut self, id: &str) -> Option<LogEntry> {
        let Some(index) = self.position(id) else {
            tracing::debug!(entry_id = %id, "Delete ignored, log entry not found");
            return None;
        };

        let removed = self.entries.remove(index);
        self.revision += 1;
        tracing::debug!(entry_id = %id, "Log entry deleted");
        Some(removed)
    }

    /// Replace the entire contents, keeping the given order.
    pub fn replace_all(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
        self.revision += 1;
        tracing::debug!(count = self.entries.len(), "Log store contents replaced");
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
