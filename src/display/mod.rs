//! Display formatting for terminal output
//!
//! Provides utilities for formatting the processed table and report pieces
//! for terminal display.

pub mod records;
pub mod report;

pub use records::{format_category_totals, format_records_table};
