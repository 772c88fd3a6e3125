//! Render models for the presentation surfaces.
//!
//! These are the serializable contracts handed to whatever draws the UI:
//! the landing menu, the add form, the results table, and the detail/edit
//! overlay. They carry state only, no styling.

use serde::Serialize;

use crate::controller::{Screen, ViewController};
use crate::filter::ColumnFilters;
use crate::log_entry::{Category, LogEntry, LogEntryDraft, LogField};
use crate::types::EntryId;
use crate::validation::{FieldErrors, REQUIRED_FIELDS};

/// Application title shown in the sidebar and on the landing page.
pub const APP_TITLE: &str = "Abend Log";

/// Form label for a field, with its width hint where it has one.
pub fn field_label(field: LogField) -> &'static str {
    match field {
        LogField::Subsystem => "Subsystem (2)",
        LogField::Composite => "Composite (8)",
        LogField::Program => "Program (8)",
        LogField::AbendCode => "Abend Code (8)",
        LogField::Jobname => "Job Name (8)",
        LogField::LogNumber => "Log Number (4)",
        LogField::Category => "Category",
        LogField::Description => "Description",
        LogField::Problem => "Problem",
        LogField::Resolution => "Resolution",
        LogField::Recovery => "Recovery",
        LogField::Results => "Results",
        LogField::Prevention => "Prevention",
        LogField::CreatedBy => "Created By",
    }
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// Everything needed to draw the current state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppView {
    pub screen: Screen,
    pub view: ScreenView,
    pub overlay: Option<DetailView>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScreenView {
    Landing(LandingView),
    Add(AddFormView),
    Scan(ScanTableView),
}

#[derive(Debug, Serialize)]
pub struct NavAction {
    pub screen: Screen,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub actions: Vec<NavAction>,
}

/// One input of the add / edit form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: LogField,
    pub label: &'static str,
    pub max_length: Option<usize>,
    pub required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFormView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub copy_mode: bool,
    pub fields: Vec<FormField>,
    pub categories: Vec<Category>,
    pub values: LogEntryDraft,
    pub errors: FieldErrors,
}

/// A results-table row: the identifying columns plus description and author.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRow {
    pub id: EntryId,
    pub subsystem: String,
    pub composite: String,
    pub program: String,
    pub abend_code: String,
    pub jobname: String,
    pub date: String,
    pub log_number: String,
    pub category: Category,
    pub description: String,
    pub created_by: String,
}

impl From<&LogEntry> for ScanRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            subsystem: entry.subsystem.clone(),
            composite: entry.composite.clone(),
            program: entry.program.clone(),
            abend_code: entry.abend_code.clone(),
            jobname: entry.jobname.clone(),
            date: entry.date_key(),
            log_number: entry.log_number.clone(),
            category: entry.category,
            description: entry.description.clone(),
            created_by: entry.created_by.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTableView {
    pub query: String,
    pub filters: ColumnFilters,
    pub result_count: usize,
    pub total_count: usize,
    pub rows: Vec<ScanRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub entry: LogEntry,
    /// `YYYY-MM-DD HH:MM:SS` creation time.
    pub created: String,
    pub edit_mode: bool,
    /// Edit buffer, present in edit mode.
    pub form: Option<LogEntry>,
    pub fields: Vec<FormField>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn form_fields() -> Vec<FormField> {
    LogField::ALL
        .into_iter()
        .map(|field| FormField {
            name: field,
            label: field_label(field),
            max_length: field.max_length(),
            required: REQUIRED_FIELDS.contains(&field),
        })
        .collect()
}

pub fn landing_view() -> LandingView {
    LandingView {
        title: APP_TITLE,
        tagline: "Track, analyze, and resolve system abends efficiently",
        actions: vec![
            NavAction {
                screen: Screen::Add,
                label: "Add Log",
                description: "Document a new abend incident",
            },
            NavAction {
                screen: Screen::Scan,
                label: "Scan Logs",
                description: "Find and analyze existing logs",
            },
        ],
    }
}

pub fn add_form_view(controller: &ViewController) -> AddFormView {
    let copy_mode = controller.is_copy_mode();
    let form = controller.add_form();
    let (title, subtitle) = if copy_mode {
        (
            "Copy Log Entry",
            "Creating a new log based on existing entry",
        )
    } else {
        (
            "Add New Log Entry",
            "Document a new abend incident with detailed information",
        )
    };

    AddFormView {
        title,
        subtitle,
        copy_mode,
        fields: form_fields(),
        categories: Category::ALL.to_vec(),
        values: form.draft.clone(),
        errors: form.errors.clone(),
    }
}

pub fn scan_table_view(controller: &mut ViewController) -> ScanTableView {
    let total_count = controller.store().len();
    let rows: Vec<ScanRow> = controller
        .filtered()
        .into_iter()
        .map(ScanRow::from)
        .collect();
    let scan = controller.scan();

    ScanTableView {
        query: scan.query.clone(),
        filters: scan.filters.clone(),
        result_count: rows.len(),
        total_count,
        rows,
    }
}

/// The overlay, when visible.
pub fn detail_view(controller: &ViewController) -> Option<DetailView> {
    if !controller.is_overlay_visible() {
        return None;
    }
    let entry = controller.selected()?.clone();
    let edit_mode = controller.is_edit_mode();

    Some(DetailView {
        created: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        entry,
        edit_mode,
        form: controller.edit_buffer().filter(|_| edit_mode).cloned(),
        fields: form_fields(),
    })
}

/// Render the whole application state.
pub fn render(controller: &mut ViewController) -> AppView {
    let screen = controller.screen();
    let view = match screen {
        Screen::Landing => ScreenView::Landing(landing_view()),
        Screen::Add => ScreenView::Add(add_form_view(controller)),
        Screen::Scan => ScreenView::Scan(scan_table_view(controller)),
    };

    AppView {
        screen,
        view,
        overlay: detail_view(controller),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
