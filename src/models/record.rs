//! Record models
//!
//! One row of a transaction export, before and after classification.

use serde::{Deserialize, Serialize};

use super::category::AccountCategory;
use super::money::Money;

/// One input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based position among the data rows (header excluded)
    pub row_number: usize,
    /// Raw object/account code text, possibly malformed
    pub object_code: String,
    /// Debit amount; `None` when the export has no debit column or the cell is blank
    pub debit: Option<Money>,
    /// Credit amount; `None` when the export has no credit column or the cell is blank
    pub credit: Option<Money>,
    /// Every cell of the original row, in header order
    pub values: Vec<String>,
}

/// A record with its category and signed amount attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecord {
    #[serde(flatten)]
    pub record: Record,
    /// Always assigned; unreadable codes land in `Unknown`, unmatched ones in `Other`
    pub category: AccountCategory,
    /// debit - credit
    pub amount: Money,
}

impl CategorizedRecord {
    pub fn row_number(&self) -> usize {
        self.record.row_number
    }

    pub fn object_code(&self) -> &str {
        &self.record.object_code
    }
}

/// The processed table: normalized headers plus classified rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestedTable {
    /// Original headers, with the code column renamed to its canonical name
    pub headers: Vec<String>,
    pub records: Vec<CategorizedRecord>,
}

impl IngestedTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Sum of every row amount
    pub fn total_amount(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }
}
