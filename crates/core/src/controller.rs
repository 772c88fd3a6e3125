//! View controller: screen navigation, the detail overlay, and routing of
//! user actions to the store.
//!
//! The controller is the single owner of the session state. It is a plain
//! synchronous struct; the only async entry point is [`ViewController::load_from`].
//!
//! ```text
//!   landing ──navigate──▶ add ──submit ok──▶ scan
//!      ▲                   │                  │
//!      └──────cancel───────┘                  │ view(id)
//!                                             ▼
//!                     detail overlay (read-only) ──edit──▶ (edit mode)
//!                        │   ▲                                 │
//!                  copy  │   └───────────save / cancel─────────┘
//!                        ▼
//!                add (copy-mode, prefilled)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::confirm::{delete_prompt, ConfirmPrompt};
use crate::error::CoreError;
use crate::filter::{ColumnFilters, FilterCache, FilterColumn};
use crate::log_entry::{LogEntry, LogEntryDraft, LogField, UpdateLogEntry};
use crate::source::{ensure_unique_ids, LoadError, LogSource};
use crate::store::LogStore;
use crate::types::EntryId;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Landing,
    Add,
    Scan,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Add => "add",
            Screen::Scan => "scan",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landing" => Ok(Screen::Landing),
            "add" | "add-log" => Ok(Screen::Add),
            "scan" => Ok(Screen::Scan),
            other => Err(format!(
                "Unknown screen '{other}'. Must be one of: landing, add, scan"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-states
// ---------------------------------------------------------------------------

/// Detail overlay state, orthogonal to the current screen.
#[derive(Debug, Clone, Default)]
pub struct DetailOverlay {
    selected: Option<EntryId>,
    edit_mode: bool,
    copy_mode: bool,
    edit_buffer: Option<LogEntry>,
}

/// Add form working state.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub draft: LogEntryDraft,
    pub errors: FieldErrors,
}

/// Results table inputs plus the filter memo.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub query: String,
    pub filters: ColumnFilters,
    cache: FilterCache,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(LogEntry),
    /// The confirmation prompt was declined.
    Declined,
    /// No record with that id (already gone).
    NotFound,
}

// ---------------------------------------------------------------------------
// ViewController
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    store: LogStore,
    screen: Screen,
    overlay: DetailOverlay,
    add_form: AddForm,
    scan: ScanState,
}

impl ViewController {
    /// Start on the landing screen with nothing selected.
    pub fn new(store: LogStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    // -- read access ---------------------------------------------------------

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn add_form(&self) -> &AddForm {
        &self.add_form
    }

    pub fn scan(&self) -> &ScanState {
        &self.scan
    }

    /// The selected record, if it still exists.
    pub fn selected(&self) -> Option<&LogEntry> {
        self.overlay
            .selected
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    pub fn is_edit_mode(&self) -> bool {
        self.overlay.edit_mode
    }

    pub fn is_copy_mode(&self) -> bool {
        self.overlay.copy_mode
    }

    /// The in-progress edit of the selected record.
    pub fn edit_buffer(&self) -> Option<&LogEntry> {
        self.overlay.edit_buffer.as_ref()
    }

    /// The overlay shows whenever a record is selected outside copy-mode.
    pub fn is_overlay_visible(&self) -> bool {
        !self.overlay.copy_mode && self.selected().is_some()
    }

    // -- navigation ----------------------------------------------------------

    /// Switch screens. Overlay state is left alone; entering the add screen
    /// outside copy-mode starts from a blank form.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == Screen::Add && self.screen != Screen::Add && !self.overlay.copy_mode {
            self.add_form = AddForm::default();
        }
        tracing::debug!(from = %self.screen, to = %screen, "Navigate");
        self.screen = screen;
    }

    // -- add flow ------------------------------------------------------------

    /// Type into an add-form field. Clears that field's error.
    pub fn set_add_field(&mut self, field: LogField, raw: &str) {
        self.add_form.draft.set_field(field, raw);
        self.add_form.errors.clear(field);
    }

    /// Validate the add form and create the record. On success the table is
    /// shown and copy-mode ends; on failure the form keeps its errors.
    pub fn submit_add(&mut self) -> Result<LogEntry, FieldErrors> {
        let candidate = match self.add_form.draft.validate() {
            Ok(candidate) => candidate,
            Err(errors) => {
                tracing::debug!(missing = %errors, "Add form rejected");
                self.add_form.errors = errors.clone();
                return Err(errors);
            }
        };

        let copied = self.overlay.copy_mode;
        let entry = self.store.create(candidate);
        self.add_form = AddForm::default();
        self.overlay.copy_mode = false;
        self.screen = Screen::Scan;

        tracing::info!(
            entry_id = %entry.id,
            label = %entry.label(),
            copied,
            "Log entry saved"
        );
        Ok(entry)
    }

    /// Abandon the add form (and any copy in progress).
    pub fn cancel_add(&mut self) {
        self.add_form = AddForm::default();
        self.overlay.copy_mode = false;
        self.screen = Screen::Landing;
    }

    // -- scan table ----------------------------------------------------------

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.scan.query = query.into();
    }

    pub fn set_column_filter(&mut self, column: FilterColumn, value: impl Into<String>) {
        self.scan.filters.set(column, value);
    }

    pub fn clear_filters(&mut self) {
        self.scan.query.clear();
        self.scan.filters = ColumnFilters::default();
    }

    /// Records passing the current search and column filters, newest first.
    pub fn filtered(&mut self) -> Vec<&LogEntry> {
        let scan = &mut self.scan;
        scan.cache.apply(&self.store, &scan.query, &scan.filters)
    }

    // -- detail overlay ------------------------------------------------------

    /// Open the overlay on a record. Returns `false` for an unknown id.
    pub fn view(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        // Leaving copy-mode drops its prefill with it.
        if self.overlay.copy_mode {
            self.add_form = AddForm::default();
        }
        self.overlay = DetailOverlay {
            selected: Some(id.to_string()),
            ..DetailOverlay::default()
        };
        true
    }

    /// Enter edit mode on the selected record.
    pub fn edit(&mut self) -> Result<(), CoreError> {
        let entry = self.selected().cloned().ok_or_else(nothing_selected)?;
        self.overlay.edit_mode = true;
        self.overlay.edit_buffer = Some(entry);
        Ok(())
    }

    /// Type into an edit-panel field.
    pub fn set_edit_field(&mut self, field: LogField, raw: &str) -> Result<(), CoreError> {
        if !self.overlay.edit_mode {
            return Err(not_editing());
        }
        let buffer = self.overlay.edit_buffer.as_mut().ok_or_else(not_editing)?;
        buffer.set_field(field, raw);
        Ok(())
    }

    /// Save changes to the selected record and return to the read-only
    /// overlay. No validation runs here, only normalization. If the record
    /// vanished meanwhile the overlay closes and `None` is returned.
    pub fn save(&mut self, changes: &UpdateLogEntry) -> Result<Option<LogEntry>, CoreError> {
        let id = self.overlay.selected.clone().ok_or_else(nothing_selected)?;

        let Some(updated) = self.store.update(&id, changes).cloned() else {
            self.close();
            return Ok(None);
        };

        self.overlay = DetailOverlay {
            selected: Some(updated.id.clone()),
            ..DetailOverlay::default()
        };
        tracing::info!(entry_id = %updated.id, label = %updated.label(), "Log entry updated");
        Ok(Some(updated))
    }

    /// Save the edit buffer.
    pub fn save_edit(&mut self) -> Result<Option<LogEntry>, CoreError> {
        if !self.overlay.edit_mode {
            return Err(not_editing());
        }
        let buffer = self.overlay.edit_buffer.as_ref().ok_or_else(not_editing)?;
        let changes = UpdateLogEntry::from(buffer);
        self.save(&changes)
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.overlay.edit_mode = false;
        self.overlay.edit_buffer = None;
    }

    /// Hide the overlay and reset all of its modes.
    pub fn close(&mut self) {
        self.overlay = DetailOverlay::default();
    }

    /// Start the copy flow from a record: selection is cleared, copy-mode
    /// set, and the add form prefilled (log number blank).
    pub fn copy(&mut self, id: &str) -> bool {
        let Some(source) = self.store.get(id) else {
            return false;
        };
        self.add_form = AddForm {
            draft: LogEntryDraft::copy_of(source),
            errors: FieldErrors::default(),
        };
        self.overlay = DetailOverlay {
            copy_mode: true,
            ..DetailOverlay::default()
        };
        self.screen = Screen::Add;
        tracing::debug!(source_id = %id, "Copy flow started");
        true
    }

    /// Copy the record currently shown in the overlay.
    pub fn copy_selected(&mut self) -> Result<(), CoreError> {
        let id = self.overlay.selected.clone().ok_or_else(nothing_selected)?;
        if self.copy(&id) {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "LogEntry",
                id,
            })
        }
    }

    // -- delete --------------------------------------------------------------

    /// Confirmation text for deleting `id`.
    pub fn delete_prompt(&self, id: &str) -> Option<String> {
        self.store.get(id).map(delete_prompt)
    }

    /// Delete after confirmation. Deleting the selected record closes the
    /// overlay.
    pub fn delete(&mut self, id: &str, confirm: &mut dyn ConfirmPrompt) -> DeleteOutcome {
        let Some(prompt) = self.delete_prompt(id) else {
            return DeleteOutcome::NotFound;
        };
        if !confirm.confirm(&prompt) {
            tracing::debug!(entry_id = %id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        let Some(removed) = self.store.delete(id) else {
            return DeleteOutcome::NotFound;
        };
        if self.overlay.selected.as_deref() == Some(id) {
            self.close();
        }
        tracing::info!(entry_id = %id, label = %removed.label(), "Log entry deleted");
        DeleteOutcome::Deleted(removed)
    }

    // -- bulk load -----------------------------------------------------------

    /// Replace every record. A selection that no longer exists is closed.
    pub fn replace_all(&mut self, entries: Vec<LogEntry>) {
        self.store.replace_all(entries);
        if self.overlay.selected.is_some() && self.selected().is_none() {
            self.close();
        }
    }

    /// Fetch from `source` and replace the store. On failure the store is
    /// left untouched and the error is logged and returned.
    pub async fn load_from(&mut self, source: &dyn LogSource) -> Result<usize, LoadError> {
        let fetched = source.fetch_entries().await;
        self.finish_load(fetched)
    }

    /// Apply the outcome of a fetch made elsewhere, so callers sharing the
    /// controller need not hold it across the request.
    pub fn finish_load(
        &mut self,
        fetched: Result<Vec<LogEntry>, LoadError>,
    ) -> Result<usize, LoadError> {
        let checked = fetched.and_then(|entries| {
            ensure_unique_ids(&entries)?;
            Ok(entries)
        });
        match checked {
            Ok(entries) => {
                let count = entries.len();
                self.replace_all(entries);
                tracing::info!(count, "Log entries loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load log entries");
                Err(e)
            }
        }
    }
}

fn nothing_selected() -> CoreError {
    CoreError::Conflict("No log entry is selected".into())
}

fn not_editing() -> CoreError {
    CoreError::Conflict("The detail panel is not in edit mode".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
