//! Confirmation capability for destructive actions.
//!
//! The view controller never prompts on its own; callers hand it a
//! [`ConfirmPrompt`] that decides whether a delete goes ahead. Interactive
//! front ends ask the user, the HTTP layer answers from the request, and
//! tests use the fixed implementations below.

use crate::log_entry::LogEntry;

/// Something that can answer a yes/no confirmation prompt.
pub trait ConfirmPrompt {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirms everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// A decision made ahead of time (e.g. a `confirm=true` query flag), which
/// also records the prompt it answered.
#[derive(Debug, Clone, Default)]
pub struct ConfirmFlag {
    pub confirmed: bool,
    pub last_prompt: Option<String>,
}

impl ConfirmFlag {
    pub fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            last_prompt: None,
        }
    }
}

impl ConfirmPrompt for ConfirmFlag {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.last_prompt = Some(prompt.to_string());
        self.confirmed
    }
}

/// Prompt shown before a log entry is deleted.
pub fn delete_prompt(entry: &LogEntry) -> String {
    format!(
        "Are you sure you want to delete this log entry?\n\n\
         Log: {}\n\
         Created: {}\n\n\
         This action cannot be undone.",
        entry.label(),
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_entries;

    #[test]
    fn prompt_names_the_record_and_warns() {
        let entry = &sample_entries()[0];
        let prompt = delete_prompt(entry);
        assert!(prompt.contains("Log: CI-CUSTMGR-ASRA-0001"));
        assert!(prompt.contains("Created: 2024-12-15 14:30:00"));
        assert!(prompt.contains("cannot be undone"));
    }

    #[test]
    fn confirm_flag_records_prompt() {
        let mut flag = ConfirmFlag::new(false);
        assert!(!flag.confirm("delete?"));
        assert_eq!(flag.last_prompt.as_deref(), Some("delete?"));
    }
}
