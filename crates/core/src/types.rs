/// Record ids are opaque strings. Records created locally get a UUID v7;
/// records loaded from a remote source keep whatever id they arrived with.
pub type EntryId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered record id.
pub fn new_entry_id() -> EntryId {
    uuid::Uuid::now_v7().to_string()
}
