//! Income Statement Report
//!
//! Revenue and expenditure totals plus the chart series. An empty statement
//! is a normal outcome: the report carries `show_placeholder` so the caller
//! renders a notice instead of an empty chart.

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::chart::ChartSeries;
use super::ReportLine;
use crate::display::report::{double_separator, separator};
use crate::error::{FundsheetError, FundsheetResult};
use crate::services::IncomeStatementSummary;

pub const CHART_TITLE: &str = "Revenue vs. Expenditure";
pub const CHART_Y_LABEL: &str = "Amount ($)";
pub const PLACEHOLDER_MESSAGE: &str = "No income statement data available to plot.";

/// Income statement ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Labels the statement selected on
    pub labels: Vec<String>,
    pub lines: Vec<ReportLine>,
    /// `None` when there is nothing to plot
    pub chart: Option<ChartSeries>,
    /// Render the "no data" notice instead of a chart
    pub show_placeholder: bool,
}

impl IncomeStatementReport {
    /// Format an income-statement summary
    pub fn generate(summary: &IncomeStatementSummary, currency_symbol: &str) -> Self {
        let chart = ChartSeries::from_totals(CHART_TITLE, CHART_Y_LABEL, &summary.lines);

        Self {
            labels: summary.labels.clone(),
            lines: summary
                .lines
                .iter()
                .map(|t| ReportLine::from_total(t, currency_symbol))
                .collect(),
            show_placeholder: chart.is_none(),
            chart,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Income Statement\n");
        output.push_str(&double_separator(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str(&format!(
                "No rows matched the income statement labels ({}).\n",
                self.labels.join(", ")
            ));
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

        output.push('\n');
        match &self.chart {
            Some(chart) => output.push_str(&chart.format_terminal(currency_symbol, 30)),
            None => {
                output.push_str(PLACEHOLDER_MESSAGE);
                output.push('\n');
            }
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

        csv.flush()
            .map_err(|e| FundsheetError::Export(e.to_string()))?;
        Ok(())
    }
}
