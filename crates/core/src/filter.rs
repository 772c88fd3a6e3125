//! Results-table filtering: one global search plus ten column filters.
//!
//! A record is shown when it passes the global search AND every non-empty
//! column filter. Matching is substring-based and case-insensitive, except
//! for the date column (matched against `YYYYMMDD`) and the log number,
//! which are compared as typed. Output keeps store order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::log_entry::LogEntry;
use crate::store::LogStore;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// A filterable column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterColumn {
    Subsystem,
    Composite,
    Program,
    AbendCode,
    Jobname,
    Date,
    LogNumber,
    Category,
    Description,
    CreatedBy,
}

impl FilterColumn {
    /// All columns, in table order.
    pub const ALL: [FilterColumn; 10] = [
        FilterColumn::Subsystem,
        FilterColumn::Composite,
        FilterColumn::Program,
        FilterColumn::AbendCode,
        FilterColumn::Jobname,
        FilterColumn::Date,
        FilterColumn::LogNumber,
        FilterColumn::Category,
        FilterColumn::Description,
        FilterColumn::CreatedBy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterColumn::Subsystem => "subsystem",
            FilterColumn::Composite => "composite",
            FilterColumn::Program => "program",
            FilterColumn::AbendCode => "abendCode",
            FilterColumn::Jobname => "jobname",
            FilterColumn::Date => "date",
            FilterColumn::LogNumber => "logNumber",
            FilterColumn::Category => "category",
            FilterColumn::Description => "description",
            FilterColumn::CreatedBy => "createdBy",
        }
    }

    /// Whether the column is compared without case folding.
    pub fn is_case_sensitive(self) -> bool {
        matches!(self, FilterColumn::Date | FilterColumn::LogNumber)
    }

    /// The value this column matches against.
    fn cell(self, entry: &LogEntry) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;
        match self {
            FilterColumn::Subsystem => Cow::Borrowed(&entry.subsystem),
            FilterColumn::Composite => Cow::Borrowed(&entry.composite),
            FilterColumn::Program => Cow::Borrowed(&entry.program),
            FilterColumn::AbendCode => Cow::Borrowed(&entry.abend_code),
            FilterColumn::Jobname => Cow::Borrowed(&entry.jobname),
            FilterColumn::Date => Cow::Owned(entry.date_key()),
            FilterColumn::LogNumber => Cow::Borrowed(&entry.log_number),
            FilterColumn::Category => Cow::Borrowed(entry.category.as_str()),
            FilterColumn::Description => Cow::Borrowed(&entry.description),
            FilterColumn::CreatedBy => Cow::Borrowed(&entry.created_by),
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown filter column '{s}'. Must be one of: {}",
                    FilterColumn::ALL.map(FilterColumn::as_str).join(", ")
                )
            })
    }
}

/// Per-column filter values. Empty strings are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnFilters {
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub date: String,
    pub log_number: String,
    pub category: String,
    pub description: String,
    pub created_by: String,
}

impl ColumnFilters {
    pub fn get(&self, column: FilterColumn) -> &str {
        match column {
            FilterColumn::Subsystem => &self.subsystem,
            FilterColumn::Composite => &self.composite,
            FilterColumn::Program => &self.program,
            FilterColumn::AbendCode => &self.abend_code,
            FilterColumn::Jobname => &self.jobname,
            FilterColumn::Date => &self.date,
            FilterColumn::LogNumber => &self.log_number,
            FilterColumn::Category => &self.category,
            FilterColumn::Description => &self.description,
            FilterColumn::CreatedBy => &self.created_by,
        }
    }

    pub fn set(&mut self, column: FilterColumn, value: impl Into<String>) {
        let slot = match column {
            FilterColumn::Subsystem => &mut self.subsystem,
            FilterColumn::Composite => &mut self.composite,
            FilterColumn::Program => &mut self.program,
            FilterColumn::AbendCode => &mut self.abend_code,
            FilterColumn::Jobname => &mut self.jobname,
            FilterColumn::Date => &mut self.date,
            FilterColumn::LogNumber => &mut self.log_number,
            FilterColumn::Category => &mut self.category,
            FilterColumn::Description => &mut self.description,
            FilterColumn::CreatedBy => &mut self.created_by,
        };
        *slot = value.into();
    }

    /// Columns with a non-empty filter.
    pub fn active(&self) -> impl Iterator<Item = FilterColumn> + '_ {
        FilterColumn::ALL
            .into_iter()
            .filter(|&c| !self.get(c).is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Every field value of a record coerced to a string, for global search.
/// The timestamp appears twice: RFC 3339 and the long date-string form
/// (`Sat Dec 14 2024 09:15:00 GMT+0000`), so month and weekday names match.
fn searchable_values(entry: &LogEntry) -> [std::borrow::Cow<'_, str>; 17] {
    use std::borrow::Cow;
    [
        Cow::Borrowed(entry.id.as_str()),
        Cow::Borrowed(entry.subsystem.as_str()),
        Cow::Borrowed(entry.composite.as_str()),
        Cow::Borrowed(entry.program.as_str()),
        Cow::Borrowed(entry.abend_code.as_str()),
        Cow::Borrowed(entry.jobname.as_str()),
        Cow::Borrowed(entry.log_number.as_str()),
        Cow::Borrowed(entry.category.as_str()),
        Cow::Owned(entry.timestamp.to_rfc3339()),
        Cow::Owned(
            entry
                .timestamp
                .format("%a %b %d %Y %H:%M:%S GMT+0000")
                .to_string(),
        ),
        Cow::Borrowed(entry.description.as_str()),
        Cow::Borrowed(entry.problem.as_str()),
        Cow::Borrowed(entry.resolution.as_str()),
        Cow::Borrowed(entry.recovery.as_str()),
        Cow::Borrowed(entry.results.as_str()),
        Cow::Borrowed(entry.prevention.as_str()),
        Cow::Borrowed(entry.created_by.as_str()),
    ]
}

/// Global search: empty query matches everything; otherwise the query must
/// occur, case-insensitively, in at least one field value.
pub fn matches_global(entry: &LogEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    searchable_values(entry)
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Column filters, conjunctively.
pub fn matches_columns(entry: &LogEntry, filters: &ColumnFilters) -> bool {
    filters.active().all(|column| {
        let cell = column.cell(entry);
        let wanted = filters.get(column);
        if column.is_case_sensitive() {
            cell.contains(wanted)
        } else {
            cell.to_lowercase().contains(&wanted.to_lowercase())
        }
    })
}

pub fn matches(entry: &LogEntry, query: &str, filters: &ColumnFilters) -> bool {
    matches_global(entry, query) && matches_columns(entry, filters)
}

/// Filter `entries`, preserving their order.
pub fn filter_entries<'a>(
    entries: &'a [LogEntry],
    query: &str,
    filters: &ColumnFilters,
) -> Vec<&'a LogEntry> {
    entries
        .iter()
        .filter(|entry| matches(entry, query, filters))
        .collect()
}

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    revision: u64,
    query: String,
    filters: ColumnFilters,
}

/// Input-equality memo over [`filter_entries`].
///
/// Holds the matching positions for the last (store revision, query,
/// filters) triple and recomputes only when one of them changes.
#[derive(Debug, Clone, Default)]
pub struct FilterCache {
    key: Option<FilterKey>,
    positions: Vec<usize>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a call with these inputs would be served from the memo.
    pub fn is_fresh(&self, store: &LogStore, query: &str, filters: &ColumnFilters) -> bool {
        self.key.as_ref().is_some_and(|key| {
            key.revision == store.revision() && key.query == query && &key.filters == filters
        })
    }

    /// Filtered view of `store`, recomputed only when the inputs changed.
    pub fn apply<'a>(
        &mut self,
        store: &'a LogStore,
        query: &str,
        filters: &ColumnFilters,
    ) -> Vec<&'a LogEntry> {
        if !self.is_fresh(store, query, filters) {
            self.positions = store
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, entry)| matches(entry, query, filters))
                .map(|(i, _)| i)
                .collect();
            self.key = Some(FilterKey {
                revision: store.revision(),
                query: query.to_string(),
                filters: filters.clone(),
            });
            tracing::trace!(
                revision = store.revision(),
                matched = self.positions.len(),
                "Filter recomputed"
            );
        }

        let entries = store.entries();
        self.positions.iter().filter_map(|&i| entries.get(i)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
