//! Service layer for procurescan business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! The CLI renders the reports produced here.

pub mod classify;
pub mod fields;
pub mod pipeline;

pub use classify::classify;
pub use fields::{extract_fields, field_names};
pub use pipeline::{analyze, load_document, process_file, process_files, FileReport, Outcome, Overrides};
