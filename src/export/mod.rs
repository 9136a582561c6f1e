//! Export module for fundsheet
//!
//! Writes analysis results to files:
//! - CSV: the processed per-row table (spreadsheet-compatible)
//! - JSON: the full report bundle, machine-readable
//! - YAML: the full report bundle, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_records_csv;
pub use json::export_bundle_json;
pub use yaml::export_bundle_yaml;
