//! Fundsheet - account-code classification and financial statements
//!
//! This library reads a tabular export of financial transactions, classifies
//! each row's object/account code into a standardized accounting category,
//! computes a debit - credit amount per row, and aggregates the results into
//! a balance sheet and an income statement.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, records)
//! - `services`: Classification, amount calculation, ingestion, aggregation
//! - `reports`: Statement assembly and the chart series
//! - `display`: Terminal table formatting
//! - `export`: CSV, JSON, and YAML export
//! - `cli`: Command handlers for the `fundsheet` binary
//!
//! # Example
//!
//! ```rust
//! use fundsheet::services::{aggregate, ingest};
//!
//! let data = "Object,Debit,Credit\n9000,100,0\n9720,0,200\n";
//! let table = ingest(data.as_bytes())?;
//! let aggregates = aggregate(&table.records);
//!
//! assert_eq!(aggregates.balance_sheet.total_assets.units(), 100);
//! assert!(!aggregates.balance_sheet.is_balanced);
//! # Ok::<(), fundsheet::FundsheetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{FundsheetError, FundsheetResult};
