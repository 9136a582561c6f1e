//! Processed table display formatting
//!
//! Renders the per-row table (original columns plus category and amount)
//! and the category totals as terminal tables.

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::IngestedTable;
use crate::reports::ReportLine;

/// Extra column headers appended to every processed row
pub const CATEGORY_HEADER: &str = "Account Category";
pub const AMOUNT_HEADER: &str = "Calculated Amount";

/// Format the processed rows, showing at most `limit` of them
pub fn format_records_table(table: &IngestedTable, limit: Option<usize>) -> String {
    if table.is_empty() {
        return "No rows found.".to_string();
    }

    let mut builder = Builder::default();

    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(table.headers.iter().cloned());
    header.push(CATEGORY_HEADER.to_string());
    header.push(AMOUNT_HEADER.to_string());
    builder.push_record(header);

    let shown = limit.unwrap_or(table.len()).min(table.len());
    for record in table.records.iter().take(shown) {
        let mut row: Vec<String> = vec![record.row_number().to_string()];
        row.extend(record.record.values.iter().cloned());
        row.push(record.category.label().to_string());
        row.push(record.amount.to_string());
        builder.push_record(row);
    }

    let mut rendered = builder.build();
    rendered.with(Style::psql());

    let mut output = rendered.to_string();
    if shown < table.len() {
        output.push_str(&format!("\n... and {} more rows", table.len() - shown));
    }
    output
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Account Category")]
    category: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Calculated Amount")]
    amount: String,
}

/// Format per-category totals as a table
pub fn format_category_totals(lines: &[ReportLine]) -> String {
    if lines.is_empty() {
        return "No categories found.".to_string();
    }

    let rows = lines.iter().map(|l| TotalRow {
        category: l.category.label().to_string(),
        rows: l.rows,
        amount: l.formatted.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ingest;

    #[test]
    fn test_format_records_table() {
        let table = ingest("Fund,Code0SegNum,Debit,Credit\n01,9330,30,0\n01,ABC,0,5\n".as_bytes())
            .unwrap();
        let output = format_records_table(&table, None);

        assert!(output.contains("Object"));
        assert!(output.contains("Account Category"));
        assert!(output.contains("Prepaid Expenses"));
        assert!(output.contains("Unknown"));
        assert!(output.contains("-$5.00"));
        assert!(!output.contains("more rows"));
    }

    #[test]
    fn test_format_records_table_limit() {
        let table = ingest("Object,Debit\n9000,1\n9001,2\n9002,3\n".as_bytes()).unwrap();
        let output = format_records_table(&table, Some(1));
        assert!(output.contains("... and 2 more rows"));
    }

    #[test]
    fn test_format_empty_table() {
        let table = ingest("Object,Debit\n".as_bytes()).unwrap();
        assert_eq!(format_records_table(&table, None), "No rows found.");
        assert_eq!(format_category_totals(&[]), "No categories found.");
    }

    #[test]
    fn test_format_category_totals() {
        let table = ingest("Object,Debit\n9000,1200\n9000,34\n".as_bytes()).unwrap();
        let aggregates = crate::services::aggregate(&table.records);
        let lines: Vec<_> = aggregates
            .totals
            .iter()
            .map(|t| ReportLine::from_total(t, "$"))
            .collect();

        let output = format_category_totals(&lines);
        assert!(output.contains("Cash"));
        assert!(output.contains("$1,234"));
    }
}
