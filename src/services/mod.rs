//! Business logic layer
//!
//! The classification pipeline: ingest rows, classify each code, compute the
//! row amount, and aggregate into statement summaries.

pub mod aggregate;
pub mod amount;
pub mod classifier;
pub mod ingest;

pub use aggregate::{
    aggregate, Aggregates, Aggregator, BalanceSheetSummary, CategoryTotal, CategoryTotals,
    IncomeStatementSummary,
};
pub use amount::calculate_amount;
pub use classifier::{categorize, categorize_code};
pub use ingest::{ingest, ColumnMapping, IngestService};
