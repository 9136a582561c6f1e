//! Core data models for fundsheet
//!
//! This module contains the data structures that flow through the pipeline:
//! money amounts, account categories, and input records before and after
//! classification.

pub mod category;
pub mod money;
pub mod record;

pub use category::{AccountCategory, StatementSection};
pub use money::{Money, MoneyParseError};
pub use record::{CategorizedRecord, IngestedTable, Record};
