//! CSV ingestion service
//!
//! Reads a delimited transaction export, resolves its columns through an
//! explicit name mapping, and classifies every row.
//!
//! Only problems with the table itself are errors: unreadable text, ragged
//! rows, a missing code column, or a debit/credit cell holding something
//! other than a number. A bad account code or an absent debit/credit column
//! is a normal row and resolves to `Unknown` / zero.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{FundsheetError, FundsheetResult};
use crate::models::{CategorizedRecord, IngestedTable, Money, Record};
use crate::services::amount::record_amount;
use crate::services::classifier::categorize;

/// Canonical name of the account code column
pub const OBJECT_COLUMN: &str = "Object";
/// Canonical name of the debit column
pub const DEBIT_COLUMN: &str = "Debit";
/// Canonical name of the credit column
pub const CREDIT_COLUMN: &str = "Credit";

/// Column mapping: canonical column name -> accepted header names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Headers accepted for the account code column, in priority order
    pub object_aliases: Vec<String>,
    /// Headers accepted for the debit column
    pub debit_aliases: Vec<String>,
    /// Headers accepted for the credit column
    pub credit_aliases: Vec<String>,
    /// Delimiter character
    pub delimiter: char,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            object_aliases: vec![OBJECT_COLUMN.to_string(), "Code0SegNum".to_string()],
            debit_aliases: vec![DEBIT_COLUMN.to_string()],
            credit_aliases: vec![CREDIT_COLUMN.to_string()],
            delimiter: ',',
        }
    }
}

impl ColumnMapping {
    /// Create a new column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping taken from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            object_aliases: settings.code_columns.clone(),
            debit_aliases: settings.debit_columns.clone(),
            credit_aliases: settings.credit_columns.clone(),
            delimiter: settings.delimiter,
        }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Accept an additional header name for the code column
    pub fn with_object_alias(mut self, alias: &str) -> Self {
        self.object_aliases.push(alias.to_string());
        self
    }

    /// Resolve header positions
    ///
    /// The code column is required; debit and credit are optional.
    pub fn resolve(&self, headers: &StringRecord) -> FundsheetResult<ResolvedColumns> {
        let object = find_column(headers, &self.object_aliases)
            .ok_or_else(|| FundsheetError::missing_column(OBJECT_COLUMN, &self.object_aliases))?;

        Ok(ResolvedColumns {
            object,
            debit: find_column(headers, &self.debit_aliases),
            credit: find_column(headers, &self.credit_aliases),
        })
    }

    fn delimiter_byte(&self) -> FundsheetResult<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(FundsheetError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

/// Header positions found by [`ColumnMapping::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub object: usize,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
}

/// First header matching any alias, trying aliases in order
fn find_column(headers: &StringRecord, aliases: &[String]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| normalize_header(h).eq_ignore_ascii_case(alias.trim()))
    })
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Service for reading and classifying transaction exports
#[derive(Debug, Clone)]
pub struct IngestService {
    mapping: ColumnMapping,
}

impl Default for IngestService {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}

impl IngestService {
    /// Create a new ingest service
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Read and classify a file on disk
    pub fn ingest_path(&self, path: &Path) -> FundsheetResult<IngestedTable> {
        let file = File::open(path).map_err(|e| {
            FundsheetError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.ingest(file)
    }

    /// Read and classify CSV text
    pub fn ingest_str(&self, data: &str) -> FundsheetResult<IngestedTable> {
        self.ingest(data.as_bytes())
    }

    /// Read and classify delimited text from any reader
    pub fn ingest<R: Read>(&self, input: R) -> FundsheetResult<IngestedTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.mapping.delimiter_byte()?)
            .from_reader(input);

        let raw_headers = reader.headers()?.clone();
        let columns = self.mapping.resolve(&raw_headers)?;
        debug!(
            object = columns.object,
            debit = ?columns.debit,
            credit = ?columns.credit,
            "Resolved column mapping"
        );

        let headers: Vec<String> = raw_headers
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == columns.object {
                    OBJECT_COLUMN.to_string()
                } else {
                    normalize_header(h).to_string()
                }
            })
            .collect();

        let mut records = Vec::new();
        // Bounds every total derived from these rows
        let mut absolute_total: i64 = 0;
        for (idx, result) in reader.records().enumerate() {
            let row = result?;
            let record = parse_record(&row, idx + 1, &columns, &headers)?;
            let category = categorize(&record.object_code);
            let amount = record_amount(&record);
            absolute_total = absolute_total
                .checked_add(amount.cents().abs())
                .ok_or_else(|| {
                    FundsheetError::MalformedInput(format!(
                        "row {}: amounts are too large to total",
                        idx + 1
                    ))
                })?;
            records.push(CategorizedRecord {
                record,
                category,
                amount,
            });
        }

        info!(rows = records.len(), "Ingested transaction export");

        Ok(IngestedTable { headers, records })
    }
}

/// Parse a single CSV row into a record
fn parse_record(
    row: &StringRecord,
    row_number: usize,
    columns: &ResolvedColumns,
    headers: &[String],
) -> FundsheetResult<Record> {
    let object_code = row.get(columns.object).unwrap_or_default().to_string();
    let debit = parse_amount_cell(row, columns.debit, row_number, headers)?;
    let credit = parse_amount_cell(row, columns.credit, row_number, headers)?;

    Ok(Record {
        row_number,
        object_code,
        debit,
        credit,
        values: row.iter().map(String::from).collect(),
    })
}

/// Blank cells and absent columns are `None`; non-numeric text is malformed input
fn parse_amount_cell(
    row: &StringRecord,
    column: Option<usize>,
    row_number: usize,
    headers: &[String],
) -> FundsheetResult<Option<Money>> {
    let Some(idx) = column else {
        return Ok(None);
    };

    let cell = row.get(idx).map(str::trim).unwrap_or("");
    if cell.is_empty() {
        return Ok(None);
    }

    Money::parse(cell).map(Some).map_err(|e| {
        FundsheetError::MalformedInput(format!(
            "row {}: column '{}': {}",
            row_number,
            headers.get(idx).map(String::as_str).unwrap_or("?"),
            e
        ))
    })
}

/// Ingest with the default column mapping
pub fn ingest<R: Read>(input: R) -> FundsheetResult<IngestedTable> {
    IngestService::default().ingest(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::money::MAX_ABS_CENTS;
    use crate::models::AccountCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_simple_csv() {
        let csv_data = "Object,Debit,Credit\n9000,100,0\n9501,0,20\n";
        let table = ingest(csv_data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers, vec!["Object", "Debit", "Credit"]);

        let first = &table.records[0];
        assert_eq!(first.row_number(), 1);
        assert_eq!(first.category, AccountCategory::Cash);
        assert_eq!(first.amount, Money::from_units(100));

        let second = &table.records[1];
        assert_eq!(second.category, AccountCategory::AccountsPayable);
        assert_eq!(second.amount, Money::from_units(-20));
    }

    #[test]
    fn test_code_column_alias_is_renamed() {
        let csv_data = "Fund,Code0SegNum,Debit,Credit\n01,9201,50,0\n";
        let table = ingest(csv_data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Fund", "Object", "Debit", "Credit"]);
        assert_eq!(table.records[0].object_code(), "9201");
        assert_eq!(
            table.records[0].category,
            AccountCategory::AccountsReceivable
        );
        assert_eq!(table.records[0].record.values[0], "01");
    }

    #[test]
    fn test_header_matching_ignores_case_and_whitespace() {
        let csv_data = " object , DEBIT ,credit\n9330,30,\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        assert_eq!(table.records[0].category, AccountCategory::PrepaidExpenses);
        assert_eq!(table.records[0].amount, Money::from_units(30));
    }

    #[test]
    fn test_missing_amount_columns_are_zero() {
        let csv_data = "Object,Description\n9000,Petty cash\n";
        let table = ingest(csv_data.as_bytes()).unwrap();

        let record = &table.records[0];
        assert_eq!(record.record.debit, None);
        assert_eq!(record.record.credit, None);
        assert!(record.amount.is_zero());
    }

    #[test]
    fn test_blank_amount_cells_are_zero() {
        let csv_data = "Object,Debit,Credit\n9000,,\n9001, ,15.25\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        assert!(table.records[0].amount.is_zero());
        assert_eq!(table.records[1].amount, Money::from_cents(-1525));
    }

    #[test]
    fn test_bad_codes_are_not_errors() {
        let csv_data = "Object,Debit,Credit\nABC,10,0\n,5,0\n99999,1,0\n";
        let table = ingest(csv_data.as_bytes()).unwrap();

        let categories: Vec<_> = table.records.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                AccountCategory::Unknown,
                AccountCategory::Unknown,
                AccountCategory::Other
            ]
        );
        assert_eq!(table.total_amount(), Money::from_units(16));
    }

    #[test]
    fn test_headers_only_is_empty_table() {
        let table = ingest("Object,Debit,Credit\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 3);
    }

    #[test]
    fn test_missing_code_column_is_malformed() {
        let err = ingest("Account,Debit,Credit\n9000,1,0\n".as_bytes()).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("Object"));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = ingest("".as_bytes()).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let err = ingest("Object,Debit\n9000,1,2,3\n".as_bytes()).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_non_numeric_amount_is_malformed() {
        let err = ingest("Object,Debit,Credit\n9000,lots,0\n".as_bytes()).unwrap_err();
        assert!(err.is_malformed_input());
        let msg = err.to_string();
        assert!(msg.contains("row 1"));
        assert!(msg.contains("Debit"));
    }

    #[test]
    fn test_sub_cent_amounts_round_per_row() {
        let mut csv_data = String::from("Object,Debit,Credit\n");
        for _ in 0..1000 {
            csv_data.push_str("9000,0.999,0\n");
        }
        let table = ingest(csv_data.as_bytes()).unwrap();
        assert_eq!(table.total_amount(), Money::from_units(1000));
    }

    #[test]
    fn test_exponent_and_plus_amounts() {
        let csv_data = "Object,Debit,Credit\n9000,1.5e3,0\n9000,+100,0\n9001,0,+2.5E1\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        assert_eq!(table.records[0].amount, Money::from_units(1500));
        assert_eq!(table.records[1].amount, Money::from_units(100));
        assert_eq!(table.records[2].amount, Money::from_units(-25));
    }

    #[test]
    fn test_oversized_amount_is_malformed() {
        let err = ingest("Object,Debit,Credit\n9000,90000000000000000,0\n".as_bytes())
            .unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_overflowing_table_total_is_malformed() {
        let big = (MAX_ABS_CENTS / 100).to_string();
        let csv_data = format!(
            "Object,Debit,Credit\n9000,{big},0\n9000,{big},0\n9000,{big},0\n9000,{big},0\n9000,{big},0\n"
        );
        let err = ingest(csv_data.as_bytes()).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("row 5"));
    }

    #[test]
    fn test_custom_delimiter_and_alias() {
        let service = IngestService::new(
            ColumnMapping::new()
                .with_delimiter(';')
                .with_object_alias("Acct"),
        );
        let table = service.ingest_str("Acct;Debit;Credit\n9720;0;200\n").unwrap();
        assert_eq!(table.records[0].category, AccountCategory::FundBalance);
        assert_eq!(table.records[0].amount, Money::from_units(-200));
    }

    #[test]
    fn test_non_ascii_delimiter_is_config_error() {
        let service = IngestService::new(ColumnMapping::new().with_delimiter('€'));
        let err = service.ingest_str("Object\n9000\n").unwrap_err();
        assert!(matches!(err, FundsheetError::Config(_)));
    }

    #[test]
    fn test_ingest_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Object,Debit,Credit").unwrap();
        writeln!(file, "9640,0,10").unwrap();

        let table = IngestService::default().ingest_path(file.path()).unwrap();
        assert_eq!(table.records[0].category, AccountCategory::CurrentLoans);
    }

    #[test]
    fn test_ingest_missing_file_is_io_error() {
        let err = IngestService::default()
            .ingest_path(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, FundsheetError::Io(_)));
    }
}
