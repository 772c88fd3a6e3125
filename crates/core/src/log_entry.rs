//! Abend log entry model and field normalization.
//!
//! Provides the [`LogEntry`] record, the add-form working copy
//! ([`LogEntryDraft`]), the validated creation candidate ([`NewLogEntry`]),
//! the partial-edit DTO ([`UpdateLogEntry`]), and the fixed-width field rules
//! applied on every keystroke by both the add form and the edit panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{EntryId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the subsystem code (e.g. `CI`, `DB`).
pub const MAX_SUBSYSTEM_LENGTH: usize = 2;

/// Maximum length of the composite, program, abend code and job name fields.
pub const MAX_IDENTIFIER_LENGTH: usize = 8;

/// Maximum length of the log number.
pub const MAX_LOG_NUMBER_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Classification of an abend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    User,
    #[serde(rename = "JCL")]
    Jcl,
    System,
    Program,
}

impl Category {
    /// All categories, in form display order.
    pub const ALL: [Category; 4] = [
        Category::User,
        Category::Jcl,
        Category::System,
        Category::Program,
    ];

    /// Wire / display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::User => "User",
            Category::Jcl => "JCL",
            Category::System => "System",
            Category::Program => "Program",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive parse of a category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    Category::ALL.map(Category::as_str).join(", ")
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The fourteen user-editable fields shared by the add form and the edit panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogField {
    Subsystem,
    Composite,
    Program,
    AbendCode,
    Jobname,
    LogNumber,
    Category,
    Description,
    Problem,
    Resolution,
    Recovery,
    Results,
    Prevention,
    CreatedBy,
}

impl LogField {
    /// All editable fields, in form order.
    pub const ALL: [LogField; 14] = [
        LogField::Subsystem,
        LogField::Composite,
        LogField::Program,
        LogField::AbendCode,
        LogField::Jobname,
        LogField::LogNumber,
        LogField::Category,
        LogField::Description,
        LogField::Problem,
        LogField::Resolution,
        LogField::Recovery,
        LogField::Results,
        LogField::Prevention,
        LogField::CreatedBy,
    ];

    /// camelCase wire name, matching the JSON keys of [`LogEntry`].
    pub fn as_str(self) -> &'static str {
        match self {
            LogField::Subsystem => "subsystem",
            LogField::Composite => "composite",
            LogField::Program => "program",
            LogField::AbendCode => "abendCode",
            LogField::Jobname => "jobname",
            LogField::LogNumber => "logNumber",
            LogField::Category => "category",
            LogField::Description => "description",
            LogField::Problem => "problem",
            LogField::Resolution => "resolution",
            LogField::Recovery => "recovery",
            LogField::Results => "results",
            LogField::Prevention => "prevention",
            LogField::CreatedBy => "createdBy",
        }
    }

    /// Maximum stored length in characters, for the fixed-width fields.
    pub fn max_length(self) -> Option<usize> {
        match self {
            LogField::Subsystem => Some(MAX_SUBSYSTEM_LENGTH),
            LogField::Composite | LogField::Program | LogField::AbendCode | LogField::Jobname => {
                Some(MAX_IDENTIFIER_LENGTH)
            }
            LogField::LogNumber => Some(MAX_LOG_NUMBER_LENGTH),
            _ => None,
        }
    }

    /// Whether input is upper-cased before it is stored.
    pub fn is_upper_cased(self) -> bool {
        matches!(
            self,
            LogField::Subsystem
                | LogField::Composite
                | LogField::Program
                | LogField::AbendCode
                | LogField::Jobname
        )
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown log field '{s}'"))
    }
}

impl Serialize for LogField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Apply the per-keystroke input rules for `field` to `raw`.
///
/// Fixed-width identifiers are upper-cased and truncated to their maximum
/// character count; the log number is truncated without a case change; every
/// other field passes through untouched. Upper-casing happens before
/// truncation so a case mapping that expands a character can never push the
/// result past its bound.
pub fn normalize_field(field: LogField, raw: &str) -> String {
    let value = if field.is_upper_cased() {
        raw.to_uppercase()
    } else {
        raw.to_string()
    };

    match field.max_length() {
        Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
        _ => value,
    }
}

// ---------------------------------------------------------------------------
// LogEntry
// ---------------------------------------------------------------------------

/// A stored abend log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: EntryId,
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub log_number: String,
    pub category: Category,
    pub timestamp: Timestamp,
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

impl LogEntry {
    /// String value of an editable field (category rendered by name).
    pub fn field_value(&self, field: LogField) -> &str {
        match field {
            LogField::Subsystem => &self.subsystem,
            LogField::Composite => &self.composite,
            LogField::Program => &self.program,
            LogField::AbendCode => &self.abend_code,
            LogField::Jobname => &self.jobname,
            LogField::LogNumber => &self.log_number,
            LogField::Category => self.category.as_str(),
            LogField::Description => &self.description,
            LogField::Problem => &self.problem,
            LogField::Resolution => &self.resolution,
            LogField::Recovery => &self.recovery,
            LogField::Results => &self.results,
            LogField::Prevention => &self.prevention,
            LogField::CreatedBy => &self.created_by,
        }
    }

    /// Set one editable field from raw input, normalized.
    ///
    /// An unrecognized category leaves the current category in place.
    pub fn set_field(&mut self, field: LogField, raw: &str) {
        if field == LogField::Category {
            if let Ok(category) = raw.parse() {
                self.category = category;
            }
            return;
        }
        let value = normalize_field(field, raw);
        *self.text_field_mut(field) = value;
    }

    /// Apply a partial update. `id` and `timestamp` are never touched.
    pub fn apply(&mut self, update: &UpdateLogEntry) {
        for field in LogField::ALL {
            if field == LogField::Category {
                if let Some(category) = update.category {
                    self.category = category;
                }
            } else if let Some(value) = update.text(field) {
                *self.text_field_mut(field) = normalize_field(field, value);
            }
        }
    }

    /// Re-apply the fixed-width rules to every field. Used for records that
    /// arrive from outside the input path (remote loads).
    pub fn normalized(mut self) -> Self {
        for field in LogField::ALL {
            if field.max_length().is_some() {
                let value = normalize_field(field, self.field_value(field));
                *self.text_field_mut(field) = value;
            }
        }
        self
    }

    /// Human-readable identity, e.g. `CI-CUSTMGR-ASRA-0001`.
    pub fn label(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.subsystem, self.program, self.abend_code, self.log_number
        )
    }

    /// `YYYYMMDD` rendering of the creation date, as used by the date column.
    pub fn date_key(&self) -> String {
        self.timestamp.format("%Y%m%d").to_string()
    }

    fn text_field_mut(&mut self, field: LogField) -> &mut String {
        match field {
            LogField::Subsystem => &mut self.subsystem,
            LogField::Composite => &mut self.composite,
            LogField::Program => &mut self.program,
            LogField::AbendCode => &mut self.abend_code,
            LogField::Jobname => &mut self.jobname,
            LogField::LogNumber => &mut self.log_number,
            LogField::Description => &mut self.description,
            LogField::Problem => &mut self.problem,
            LogField::Resolution => &mut self.resolution,
            LogField::Recovery => &mut self.recovery,
            LogField::Results => &mut self.results,
            LogField::Prevention => &mut self.prevention,
            LogField::CreatedBy => &mut self.created_by,
            LogField::Category => unreachable!("category is not a text field"),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft (add form working copy)
// ---------------------------------------------------------------------------

/// The add form's working copy. `category: None` is the unset sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryDraft {
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub log_number: String,
    pub category: Option<Category>,
    pub description: String,
    pub problem: String,
    pub resolution: String,
    pub recovery: String,
    pub results: String,
    pub prevention: String,
    pub created_by: String,
}

impl LogEntryDraft {
    /// Prefill from an existing record for the copy flow. The log number is
    /// left blank so the user has to enter a new one.
    pub fn copy_of(entry: &LogEntry) -> Self {
        Self {
            subsystem: entry.subsystem.clone(),
            composite: entry.composite.clone(),
            program: entry.program.clone(),
            abend_code: entry.abend_code.clone(),
            jobname: entry.jobname.clone(),
            log_number: String::new(),
            category: Some(entry.category),
            description: entry.description.clone(),
            problem: entry.problem.clone(),
            resolution: entry.resolution.clone(),
            recovery: entry.recovery.clone(),
            results: entry.results.clone(),
            prevention: entry.prevention.clone(),
            created_by: entry.created_by.clone(),
        }
    }

    /// String value of a field; an unset category reads as empty.
    pub fn field_value(&self, field: LogField) -> &str {
        match field {
            LogField::Subsystem => &self.subsystem,
            LogField::Composite => &self.composite,
            LogField::Program => &self.program,
            LogField::AbendCode => &self.abend_code,
            LogField::Jobname => &self.jobname,
            LogField::LogNumber => &self.log_number,
            LogField::Category => self.category.map(Category::as_str).unwrap_or(""),
            LogField::Description => &self.description,
            LogField::Problem => &self.problem,
            LogField::Resolution => &self.resolution,
            LogField::Recovery => &self.recovery,
            LogField::Results => &self.results,
            LogField::Prevention => &self.prevention,
            LogField::CreatedBy => &self.created_by,
        }
    }

    /// Set one field from raw input, normalized. Anything that is not a
    /// category name (including `none`) unsets the category.
    pub fn set_field(&mut self, field: LogField, raw: &str) {
        let value = normalize_field(field, raw);
        match field {
            LogField::Subsystem => self.subsystem = value,
            LogField::Composite => self.composite = value,
            LogField::Program => self.program = value,
            LogField::AbendCode => self.abend_code = value,
            LogField::Jobname => self.jobname = value,
            LogField::LogNumber => self.log_number = value,
            LogField::Category => self.category = value.parse().ok(),
            LogField::Description => self.description = value,
            LogField::Problem => self.problem = value,
            LogField::Resolution => self.resolution = value,
            LogField::Recovery => self.recovery = value,
            LogField::Results => self.results = value,
            LogField::Prevention => self.prevention = value,
            LogField::CreatedBy => self.created_by = value,
        }
    }
}

// ---------------------------------------------------------------------------
// NewLogEntry / UpdateLogEntry
// ---------------------------------------------------------------------------

/// A validated creation candidate: a log entry without id or timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub log_number: String,
    pub category: Category,
    pub description: String,
    pub problem: String,
    pub resolution: String,
    pub recovery: String,
    pub results: String,
    pub prevention: String,
    pub created_by: String,
}

impl NewLogEntry {
    /// Attach an identity and creation time.
    pub fn into_entry(self, id: EntryId, timestamp: Timestamp) -> LogEntry {
        LogEntry {
            id,
            subsystem: self.subsystem,
            composite: self.composite,
            program: self.program,
            abend_code: self.abend_code,
            jobname: self.jobname,
            log_number: self.log_number,
            category: self.category,
            timestamp,
            description: self.description,
            problem: self.problem,
            resolution: self.resolution,
            recovery: self.recovery,
            results: self.results,
            prevention: self.prevention,
            created_by: self.created_by,
        }
    }
}

/// DTO for a partial in-place edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogEntry {
    pub subsystem: Option<String>,
    pub composite: Option<String>,
    pub program: Option<String>,
    pub abend_code: Option<String>,
    pub jobname: Option<String>,
    pub log_number: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub problem: Option<String>,
    pub resolution: Option<String>,
    pub recovery: Option<String>,
    pub results: Option<String>,
    pub prevention: Option<String>,
    pub created_by: Option<String>,
}

impl UpdateLogEntry {
    fn text(&self, field: LogField) -> Option<&str> {
        let value = match field {
            LogField::Subsystem => &self.subsystem,
            LogField::Composite => &self.composite,
            LogField::Program => &self.program,
            LogField::AbendCode => &self.abend_code,
            LogField::Jobname => &self.jobname,
            LogField::LogNumber => &self.log_number,
            LogField::Description => &self.description,
            LogField::Problem => &self.problem,
            LogField::Resolution => &self.resolution,
            LogField::Recovery => &self.recovery,
            LogField::Results => &self.results,
            LogField::Prevention => &self.prevention,
            LogField::CreatedBy => &self.created_by,
            LogField::Category => return None,
        };
        value.as_deref()
    }
}

impl From<&LogEntry> for UpdateLogEntry {
    /// Every editable field set to the record's current value.
    fn from(entry: &LogEntry) -> Self {
        Self {
            subsystem: Some(entry.subsystem.clone()),
            composite: Some(entry.composite.clone()),
            program: Some(entry.program.clone()),
            abend_code: Some(entry.abend_code.clone()),
            jobname: Some(entry.jobname.clone()),
            log_number: Some(entry.log_number.clone()),
            category: Some(entry.category),
            description: Some(entry.description.clone()),
            problem: Some(entry.problem.clone()),
            resolution: Some(entry.resolution.clone()),
            recovery: Some(entry.recovery.clone()),
            results: Some(entry.results.clone()),
            prevention: Some(entry.prevention.clone()),
            created_by: Some(entry.created_by.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn sample() -> LogEntry {
        LogEntry {
            id: "1".to_string(),
            subsystem: "CI".to_string(),
            composite: "PROD".to_string(),
            program: "CUSTMGR".to_string(),
            abend_code: "ASRA".to_string(),
            jobname: "BATCH01".to_string(),
            log_number: "0001".to_string(),
            category: Category::Program,
            timestamp: Utc.with_ymd_and_hms(2024, 12, 15, 14, 30, 0).unwrap(),
            description: "Protection exception".to_string(),
            problem: "Array bounds".to_string(),
            resolution: "Fixed bounds check".to_string(),
            recovery: String::new(),
            results: String::new(),
            prevention: String::new(),
            created_by: "John Doe".to_string(),
        }
    }

    // -- normalize_field -----------------------------------------------------

    #[test]
    fn subsystem_truncated_to_two_and_upper_cased() {
        assert_eq!(normalize_field(LogField::Subsystem, "cics"), "CI");
        assert_eq!(normalize_field(LogField::Subsystem, "d"), "D");
    }

    #[test]
    fn identifiers_truncated_to_eight_and_upper_cased() {
        for field in [
            LogField::Composite,
            LogField::Program,
            LogField::AbendCode,
            LogField::Jobname,
        ] {
            assert_eq!(normalize_field(field, "custmgr_extra"), "CUSTMGR_");
        }
    }

    #[test]
    fn log_number_truncated_without_case_change() {
        assert_eq!(normalize_field(LogField::LogNumber, "12345"), "1234");
        assert_eq!(normalize_field(LogField::LogNumber, "ab"), "ab");
    }

    #[test]
    fn narrative_fields_pass_through() {
        let long = "mixed Case text ".repeat(20);
        assert_eq!(normalize_field(LogField::Description, &long), long);
        assert_eq!(normalize_field(LogField::CreatedBy, "Jane Smith"), "Jane Smith");
    }

    #[test]
    fn normalization_is_idempotent_and_bounded() {
        let inputs = ["", "a", "abcdefghijklmnop", "ßtraße", "üñíçødé-long", "  x  "];
        for field in LogField::ALL {
            for raw in inputs {
                let once = normalize_field(field, raw);
                assert_eq!(normalize_field(field, &once), once, "{field} / {raw:?}");
                if let Some(max) = field.max_length() {
                    assert!(once.chars().count() <= max, "{field} / {raw:?}");
                }
                if field.is_upper_cased() {
                    assert_eq!(once.to_uppercase(), once);
                }
            }
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(normalize_field(LogField::LogNumber, "éééééé"), "éééé");
    }

    // -- Category / LogField -------------------------------------------------

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("jcl".parse::<Category>(), Ok(Category::Jcl));
        assert_eq!("Program".parse::<Category>(), Ok(Category::Program));
        assert!("none".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_with_display_names() {
        assert_eq!(serde_json::to_value(Category::Jcl).unwrap(), "JCL");
        assert_eq!(serde_json::to_value(Category::User).unwrap(), "User");
    }

    #[test]
    fn log_field_round_trips_through_wire_name() {
        for field in LogField::ALL {
            assert_eq!(field.as_str().parse::<LogField>(), Ok(field));
        }
        assert!("abend_code".parse::<LogField>().is_err());
    }

    // -- LogEntry ------------------------------------------------------------

    #[test]
    fn entry_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["abendCode"], "ASRA");
        assert_eq!(json["createdBy"], "John Doe");
        assert_eq!(json["category"], "Program");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn set_field_normalizes_input() {
        let mut entry = sample();
        entry.set_field(LogField::Program, "payroll123");
        assert_eq!(entry.program, "PAYROLL1");
    }

    #[test]
    fn set_field_ignores_unknown_category() {
        let mut entry = sample();
        entry.set_field(LogField::Category, "bogus");
        assert_eq!(entry.category, Category::Program);
        entry.set_field(LogField::Category, "system");
        assert_eq!(entry.category, Category::System);
    }

    #[test]
    fn apply_changes_only_given_fields() {
        let mut entry = sample();
        let before = entry.clone();
        entry.apply(&UpdateLogEntry {
            description: Some("x".to_string()),
            jobname: Some("nightly-batch".to_string()),
            ..Default::default()
        });

        assert_eq!(entry.description, "x");
        assert_eq!(entry.jobname, "NIGHTLY-");
        assert_eq!(entry.id, before.id);
        assert_eq!(entry.timestamp, before.timestamp);
        assert_eq!(entry.problem, before.problem);
        assert_eq!(entry.category, before.category);
    }

    #[test]
    fn label_joins_identity_fields() {
        assert_eq!(sample().label(), "CI-CUSTMGR-ASRA-0001");
    }

    #[test]
    fn date_key_is_eight_digits() {
        assert_eq!(sample().date_key(), "20241215");
    }

    #[test]
    fn normalized_repairs_loaded_values() {
        let mut entry = sample();
        entry.subsystem = "cics".to_string();
        entry.log_number = "000123".to_string();
        let entry = entry.normalized();
        assert_eq!(entry.subsystem, "CI");
        assert_eq!(entry.log_number, "0001");
    }

    // -- LogEntryDraft -------------------------------------------------------

    #[test]
    fn copy_of_blanks_log_number_and_keeps_the_rest() {
        let source = sample();
        let draft = LogEntryDraft::copy_of(&source);
        assert_eq!(draft.log_number, "");
        assert_eq!(draft.subsystem, source.subsystem);
        assert_eq!(draft.category, Some(source.category));
        assert_eq!(draft.resolution, source.resolution);
        assert_eq!(draft.created_by, source.created_by);
    }

    #[test]
    fn draft_category_none_sentinel_unsets() {
        let mut draft = LogEntryDraft::default();
        draft.set_field(LogField::Category, "User");
        assert_eq!(draft.category, Some(Category::User));
        draft.set_field(LogField::Category, "none");
        assert_eq!(draft.category, None);
        assert_eq!(draft.field_value(LogField::Category), "");
    }
}
