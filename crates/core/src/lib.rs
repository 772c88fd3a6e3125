//! Domain core for the abend log: record model, validation, store, filter
//! engine, view controller and presentation surface models.
//!
//! No HTTP and no I/O live here; the one asynchronous seam is the
//! [`source::LogSource`] capability.

pub mod confirm;
pub mod controller;
pub mod error;
pub mod filter;
pub mod log_entry;
pub mod seed;
pub mod source;
pub mod store;
pub mod surface;
pub mod types;
pub mod validation;
