//! CSV Export functionality
//!
//! Writes the processed per-row table: every original column, with the code
//! column under its canonical name, followed by the category and amount.

use std::io::Write;

use crate::display::records::{AMOUNT_HEADER, CATEGORY_HEADER};
use crate::error::{FundsheetError, FundsheetResult};
use crate::models::IngestedTable;

/// Export the processed table to CSV
pub fn export_records_csv<W: Write>(table: &IngestedTable, writer: W) -> FundsheetResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    let export_err = |e: ::csv::Error| FundsheetError::Export(e.to_string());

    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header.push(CATEGORY_HEADER);
    header.push(AMOUNT_HEADER);
    csv.write_record(&header).map_err(export_err)?;

    for record in &table.records {
        let mut row: Vec<String> = record.record.values.clone();
        row.push(record.category.label().to_string());
        row.push(record.amount.to_plain());
        csv.write_record(&row).map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| FundsheetError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ingest;

    #[test]
    fn test_records_csv_export() {
        let table = ingest(
            "Code0SegNum,Debit,Credit,Memo\n9650,0,12.5,\"deferred, grant\"\nABC,,,\n".as_bytes(),
        )
        .unwrap();

        let mut buf = Vec::new();
        export_records_csv(&table, &mut buf).unwrap();
        let csv_string = String::from_utf8(buf).unwrap();

        let mut lines = csv_string.lines();
        assert_eq!(
            lines.next(),
            Some("Object,Debit,Credit,Memo,Account Category,Calculated Amount")
        );
        assert_eq!(
            lines.next(),
            Some("9650,0,12.5,\"deferred, grant\",Deferred/Unearned Revenue,-12.50")
        );
        assert_eq!(lines.next(), Some("ABC,,,,Unknown,0.00"));
    }

    #[test]
    fn test_headers_only_export() {
        let table = ingest("Object,Debit\n".as_bytes()).unwrap();
        let mut buf = Vec::new();
        export_records_csv(&table, &mut buf).unwrap();
        let csv_string = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();
        assert_eq!(lines, vec!["Object,Debit,Account Category,Calculated Amount"]);
    }
}
