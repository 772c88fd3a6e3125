//! Sample abend records used to seed a fresh session for demos.

use chrono::{TimeZone, Utc};

use crate::log_entry::{Category, LogEntry};
use crate::types::Timestamp;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Three representative incidents (CICS program check, IMS user abend,
/// DB2 resource unavailable), newest first.
pub fn sample_entries() -> Vec<LogEntry> {
    vec![
        LogEntry {
            id: "1".to_string(),
            subsystem: "CI".to_string(),
            composite: "PROD".to_string(),
            program: "CUSTMGR".to_string(),
            abend_code: "ASRA".to_string(),
            jobname: "BATCH01".to_string(),
            log_number: "0001".to_string(),
            category: Category::Program,
            timestamp: at(2024, 12, 15, 14, 30),
            description: "Customer data retrieval system experienced program protection \
                          exception during peak hours"
                .to_string(),
            problem: "Program protection exception occurred during customer data retrieval."
                .to_string(),
            resolution: "Fixed array bounds checking in customer lookup routine.".to_string(),
            recovery: "Restarted CICS region after applying fix.".to_string(),
            results: "Customer transactions processing normally.".to_string(),
            prevention: "Added automated testing for array bounds in CI pipeline.".to_string(),
            created_by: "John Doe".to_string(),
        },
        LogEntry {
            id: "2".to_string(),
            subsystem: "IM".to_string(),
            composite: "TEST".to_string(),
            program: "PAYROLL".to_string(),
            abend_code: "U0100".to_string(),
            jobname: "PAYROLL1".to_string(),
            log_number: "0002".to_string(),
            category: Category::User,
            timestamp: at(2024, 12, 14, 9, 15),
            description: "Payroll processing failure due to invalid employee ID format in \
                          test environment"
                .to_string(),
            problem: "Invalid employee ID format causing processing failure.".to_string(),
            resolution: "Updated validation routine to handle new ID format.".to_string(),
            recovery: "Reprocessed failed transactions.".to_string(),
            results: "All payroll transactions completed successfully.".to_string(),
            prevention: "Enhanced input validation and error messaging.".to_string(),
            created_by: "Jane Smith".to_string(),
        },
        LogEntry {
            id: "3".to_string(),
            subsystem: "DB".to_string(),
            composite: "PROD".to_string(),
            program: "INVMGMT".to_string(),
            abend_code: "SQL904".to_string(),
            jobname: "INVBATCH".to_string(),
            log_number: "0003".to_string(),
            category: Category::System,
            timestamp: at(2024, 12, 13, 16, 45),
            description: "Database tablespace unavailable causing inventory management batch \
                          job failure"
                .to_string(),
            problem: "Unsuccessful resource allocation - tablespace unavailable.".to_string(),
            resolution: "Freed up tablespace by archiving old inventory records.".to_string(),
            recovery: "Restarted DB2 subsystem and reran batch job.".to_string(),
            results: "Inventory management batch completed successfully.".to_string(),
            prevention: "Implemented automated tablespace monitoring.".to_string(),
            created_by: "Mike Johnson".to_string(),
        },
    ]
}
