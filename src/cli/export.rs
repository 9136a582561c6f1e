//! CLI commands for data export
//!
//! Writes the processed table or one statement's lines as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use super::{ingest_service, read_table};
use crate::config::Settings;
use crate::error::{FundsheetError, FundsheetResult};
use crate::export::export_records_csv;
use crate::reports::{BalanceSheetReport, IncomeStatementReport};
use crate::services::Aggregator;

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportReport {
    /// Every input row plus category and calculated amount
    Records,
    /// Balance sheet lines and totals
    BalanceSheet,
    /// Income statement lines
    IncomeStatement,
}

/// Arguments for `fundsheet export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input file (CSV), or "-" for stdin
    pub file: PathBuf,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Which table to export
    #[arg(short, long, value_enum, default_value = "records")]
    pub report: ExportReport,

    /// Field delimiter (overrides the configured one)
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

/// Handle the export command
pub fn handle_export_command(settings: &Settings, args: ExportArgs) -> FundsheetResult<()> {
    let service = ingest_service(settings, args.delimiter)?;
    let table = read_table(&service, &args.file)?;

    let file = File::create(&args.output).map_err(|e| {
        FundsheetError::Export(format!("Failed to create {}: {}", args.output.display(), e))
    })?;
    let writer = BufWriter::new(file);

    match args.report {
        ExportReport::Records => export_records_csv(&table, writer)?,
        ExportReport::BalanceSheet | ExportReport::IncomeStatement => {
            let aggregator = Aggregator::new(settings.income_statement_labels.clone());
            let aggregates = aggregator.aggregate(&table.records);
            let symbol = &settings.currency_symbol;

            if args.report == ExportReport::BalanceSheet {
                BalanceSheetReport::generate(&aggregates.balance_sheet, symbol)
                    .export_csv(writer)?;
            } else {
                IncomeStatementReport::generate(&aggregates.income_statement, symbol)
                    .export_csv(writer)?;
            }
        }
    }

    info!(path = %args.output.display(), rows = table.len(), "Export complete");
    println!("Exported {} rows to {}", table.len(), args.output.display());
    Ok(())
}
