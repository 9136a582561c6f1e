//! Reports module for fundsheet
//!
//! Turns aggregated totals into display-ready statements: the balance sheet,
//! the income statement with its chart series, and the bundle that carries
//! both to the terminal or an export file.

pub mod balance_sheet;
pub mod bundle;
pub mod chart;
pub mod income_statement;

pub use balance_sheet::BalanceSheetReport;
pub use bundle::ReportBundle;
pub use chart::{ChartPoint, ChartSeries};
pub use income_statement::IncomeStatementReport;

use serde::{Deserialize, Serialize};

use crate::models::{AccountCategory, Money};
use crate::services::CategoryTotal;

/// An amount with its display string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAmount {
    pub amount: Money,
    pub formatted: String,
}

impl FormattedAmount {
    pub fn new(amount: Money, currency_symbol: &str) -> Self {
        Self {
            amount,
            formatted: amount.format_whole(currency_symbol),
        }
    }
}

/// One category row of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub category: AccountCategory,
    pub rows: usize,
    pub amount: Money,
    pub formatted: String,
}

impl ReportLine {
    pub fn from_total(total: &CategoryTotal, currency_symbol: &str) -> Self {
        Self {
            category: total.category,
            rows: total.rows,
            amount: total.amount,
            formatted: total.amount.format_whole(currency_symbol),
        }
    }
}
