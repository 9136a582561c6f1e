//! Report bundle
//!
//! Packages the processed table and both statements into one serializable
//! value for the presentation surface and for JSON/YAML export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BalanceSheetReport, IncomeStatementReport, ReportLine};
use crate::models::IngestedTable;
use crate::services::Aggregates;

/// Current bundle schema version
pub const BUNDLE_SCHEMA_VERSION: &str = "1.0.0";

/// Everything computed for one input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// When the bundle was assembled
    pub generated_at: DateTime<Utc>,

    /// Application version that produced the bundle
    pub app_version: String,

    /// Input file name, or "-" for stdin
    pub source: String,

    pub currency_symbol: String,

    /// The per-row table with category and amount attached
    pub table: IngestedTable,

    /// Totals for every category present, including unclassified rows
    pub category_totals: Vec<ReportLine>,

    pub balance_sheet: BalanceSheetReport,

    pub income_statement: IncomeStatementReport,
}

impl ReportBundle {
    /// Assemble the bundle from ingestion and aggregation output
    pub fn assemble(
        source: &str,
        table: IngestedTable,
        aggregates: &Aggregates,
        currency_symbol: &str,
    ) -> Self {
        Self {
            schema_version: BUNDLE_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.to_string(),
            currency_symbol: currency_symbol.to_string(),
            table,
            category_totals: aggregates
                .totals
                .iter()
                .map(|t| ReportLine::from_total(t, currency_symbol))
                .collect(),
            balance_sheet: BalanceSheetReport::generate(&aggregates.balance_sheet, currency_symbol),
            income_statement: IncomeStatementReport::generate(
                &aggregates.income_statement,
                currency_symbol,
            ),
        }
    }

    /// Format both statements for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Financial Data Analysis: {} ({} rows)\n\n",
            self.source,
            self.table.len()
        ));
        output.push_str(&self.balance_sheet.format_terminal());
        output.push('\n');
        output.push_str(&self.income_statement.format_terminal(&self.currency_symbol));
        output
    }
}
