//! Balance Sheet Report
//!
//! Statement of net position: per-category totals for assets, liabilities,
//! and fund balance, with the reconciliation of liabilities + fund balance
//! against total assets.

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{FormattedAmount, ReportLine};
use crate::display::report::{double_separator, separator};
use crate::error::{FundsheetError, FundsheetResult};
use crate::services::BalanceSheetSummary;

/// Balance sheet ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    pub lines: Vec<ReportLine>,
    pub total_assets: FormattedAmount,
    pub total_liabilities: FormattedAmount,
    pub fund_balance: FormattedAmount,
    pub liabilities_and_fund_balance: FormattedAmount,
    /// Whether liabilities + fund balance equals total assets
    pub is_balanced: bool,
    /// total assets - (liabilities + fund balance)
    pub imbalance: FormattedAmount,
}

impl BalanceSheetReport {
    /// Format a balance-sheet summary
    pub fn generate(summary: &BalanceSheetSummary, currency_symbol: &str) -> Self {
        let fmt = |amount| FormattedAmount::new(amount, currency_symbol);

        Self {
            lines: summary
                .lines
                .iter()
                .map(|t| ReportLine::from_total(t, currency_symbol))
                .collect(),
            total_assets: fmt(summary.total_assets),
            total_liabilities: fmt(summary.total_liabilities),
            fund_balance: fmt(summary.fund_balance),
            liabilities_and_fund_balance: fmt(summary.liabilities_and_fund_balance),
            is_balanced: summary.is_balanced,
            imbalance: fmt(summary.imbalance()),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Balance Sheet (Statement of Net Position)\n");
        output.push_str(&double_separator(60));
        output.push('\n');

        if self.lines.is_empty() {
            output.push_str("No balance sheet accounts found.\n");
        } else {
            output.push_str(&format!(
                "{:<34} {:>6} {:>18}\n",
                "Account Category", "Rows", "Calculated Amount"
            ));
            output.push_str(&separator(60));
            output.push('\n');
            for line in &self.lines {
                output.push_str(&format!(
                    "{:<34} {:>6} {:>18}\n",
                    line.category.label(),
                    line.rows,
                    line.formatted
                ));
            }
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Assets:               {:>18}\n",
            self.total_assets.formatted
        ));
        output.push_str(&format!(
            "Total Liabilities:          {:>18}\n",
            self.total_liabilities.formatted
        ));
        output.push_str(&format!(
            "Ending Fund Balance:        {:>18}\n",
            self.fund_balance.formatted
        ));
        output.push_str(&format!(
            "Liabilities + Fund Balance: {:>18}\n",
            self.liabilities_and_fund_balance.formatted
        ));

        if self.is_balanced {
            output.push_str("Balanced: assets equal liabilities + fund balance\n");
        } else {
            output.push_str(&format!(
                "Out of balance by {}\n",
                self.imbalance.formatted
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FundsheetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| FundsheetError::Export(e.to_string());

        csv.write_record(["Account Category", "Rows", "Calculated Amount"])
            .map_err(export_err)?;
        for line in &self.lines {
            csv.write_record([
                line.category.label().to_string(),
                line.rows.to_string(),
                line.amount.to_plain(),
            ])
            .map_err(export_err)?;
        }

        for (label, value) in [
            ("Total Assets", &self.total_assets),
            ("Total Liabilities", &self.total_liabilities),
            ("Ending Fund Balance", &self.fund_balance),
            ("Liabilities + Fund Balance", &self.liabilities_and_fund_balance),
        ] {
            csv.write_record([label.to_string(), String::new(), value.amount.to_plain()])
                .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| FundsheetError::Export(e.to_string()))?;
        Ok(())
    }
}
