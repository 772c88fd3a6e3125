//! Required-field validation for the add/copy flow.
//!
//! Validation gates record creation only. Edits saved from the detail panel
//! are not re-validated; they still pass through field normalization, so
//! length bounds hold either way.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::log_entry::{LogEntryDraft, LogField, NewLogEntry};

/// Fields that must be non-empty before a draft can be created.
pub const REQUIRED_FIELDS: &[LogField] = &[
    LogField::Subsystem,
    LogField::Composite,
    LogField::Program,
    LogField::AbendCode,
    LogField::Jobname,
    LogField::LogNumber,
    LogField::Category,
    LogField::Description,
    LogField::Problem,
    LogField::CreatedBy,
];

/// Inline message shown next to a missing required field.
pub fn required_message(field: LogField) -> &'static str {
    match field {
        LogField::Subsystem => "Subsystem is required (2 chars)",
        LogField::Composite => "Composite is required (max 8 chars)",
        LogField::Program => "Program is required (max 8 chars)",
        LogField::AbendCode => "Abend code is required (max 8 chars)",
        LogField::Jobname => "Job name is required (max 8 chars)",
        LogField::LogNumber => "Log number is required (4 chars)",
        LogField::Category => "Category is required",
        LogField::Description => "Description is required",
        LogField::Problem => "Problem description is required",
        LogField::CreatedBy => "Created by is required",
        _ => "This field is required",
    }
}

/// Field-keyed validation messages. Empty means the candidate is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<LogField, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: LogField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: LogField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field (the user is editing it).
    pub fn clear(&mut self, field: LogField) {
        self.0.remove(&field);
    }

    pub fn fields(&self) -> impl Iterator<Item = LogField> + '_ {
        self.0.keys().copied()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.keys().map(|field| field.as_str()).collect();
        write!(f, "missing required fields: {}", names.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Check every required field of a draft.
pub fn validate_draft(draft: &LogEntryDraft) -> FieldErrors {
    let errors = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|&field| draft.field_value(field).is_empty())
        .map(|field| (field, required_message(field)))
        .collect();
    FieldErrors(errors)
}

impl LogEntryDraft {
    /// Validate and convert into a creation candidate.
    pub fn validate(&self) -> Result<NewLogEntry, FieldErrors> {
        let errors = validate_draft(self);
        let category = match self.category {
            Some(category) if errors.is_empty() => category,
            _ => return Err(errors),
        };

        Ok(NewLogEntry {
            subsystem: self.subsystem.clone(),
            composite: self.composite.clone(),
            program: self.program.clone(),
            abend_code: self.abend_code.clone(),
            jobname: self.jobname.clone(),
            log_number: self.log_number.clone(),
            category,
            description: self.description.clone(),
            problem: self.problem.clone(),
            resolution: self.resolution.clone(),
            recovery: self.recovery.clone(),
            results: self.results.clone(),
            prevention: self.prevention.clone(),
            created_by: self.created_by.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
