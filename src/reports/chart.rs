//! Chartable category series
//!
//! A plain category → amount series for a bar chart. Rendering beyond a
//! terminal bar sketch belongs to whatever surface consumes the series.

use serde::{Deserialize, Serialize};

use crate::display::report::{format_bar, truncate};
use crate::models::Money;
use crate::services::CategoryTotal;

/// One bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub amount: Money,
}

/// A titled category → amount series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Build a series from category totals; `None` when there is nothing to plot
    pub fn from_totals(title: &str, y_label: &str, totals: &[CategoryTotal]) -> Option<Self> {
        if totals.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            y_label: y_label.to_string(),
            points: totals
                .iter()
                .map(|t| ChartPoint {
                    label: t.category.label().to_string(),
                    amount: t.amount,
                })
                .collect(),
        })
    }

    /// Horizontal bar sketch scaled to the largest absolute amount
    pub fn format_terminal(&self, currency_symbol: &str, bar_width: usize) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}  ({})\n", self.title, self.y_label));

        let max = self
            .points
            .iter()
            .map(|p| p.amount.abs().as_f64())
            .fold(0.0_f64, f64::max);

        for point in &self.points {
            output.push_str(&format!(
                "{:<26} {} {:>14}\n",
                truncate(&point.label, 26),
                format_bar(point.amount.abs().as_f64(), max, bar_width),
                point.amount.format_whole(currency_symbol)
            ));
        }

        output
    }
}
