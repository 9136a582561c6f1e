//! Analyze command
//!
//! Runs the whole pipeline on one input file and renders the report bundle
//! to the terminal or to a JSON/YAML file.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use super::{ingest_service, open_output, read_table, source_name};
use crate::config::Settings;
use crate::display::{format_category_totals, format_records_table};
use crate::error::{FundsheetError, FundsheetResult};
use crate::export::{export_bundle_json, export_bundle_yaml};
use crate::reports::ReportBundle;
use crate::services::Aggregator;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable statements and chart
    Terminal,
    /// Full report bundle as JSON
    Json,
    /// Full report bundle as YAML
    Yaml,
}

/// Arguments for `fundsheet analyze`
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file (CSV), or "-" for stdin
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter (overrides the configured one)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Also print the processed per-row table
    #[arg(long)]
    pub records: bool,

    /// Show at most this many rows of the processed table
    #[arg(long, requires = "records")]
    pub limit: Option<usize>,

    /// Also print totals for every category present
    #[arg(long)]
    pub totals: bool,
}

/// Handle the analyze command
pub fn handle_analyze_command(settings: &Settings, args: AnalyzeArgs) -> FundsheetResult<()> {
    let service = ingest_service(settings, args.delimiter)?;
    let table = read_table(&service, &args.file)?;

    let aggregator = Aggregator::new(settings.income_statement_labels.clone());
    let aggregates = aggregator.aggregate(&table.records);
    let bundle = ReportBundle::assemble(
        &source_name(&args.file),
        table,
        &aggregates,
        &settings.currency_symbol,
    );

    let mut writer = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Terminal => {
            let text = render_terminal(&bundle, &args);
            writer.write_all(text.as_bytes())?;
        }
        OutputFormat::Json => export_bundle_json(&bundle, &mut writer)?,
        OutputFormat::Yaml => export_bundle_yaml(&bundle, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| FundsheetError::Io(format!("Failed to write report: {}", e)))?;

    if let Some(path) = &args.output {
        info!(path = %path.display(), rows = bundle.table.len(), "Report written");
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

fn render_terminal(bundle: &ReportBundle, args: &AnalyzeArgs) -> String {
    let mut output = bundle.format_terminal();

    if args.totals {
        output.push('\n');
        output.push_str("Category Totals\n");
        output.push_str(&format_category_totals(&bundle.category_totals));
        output.push('\n');
    }

    if args.records {
        output.push('\n');
        output.push_str("Processed Financial Data\n");
        output.push_str(&format_records_table(&bundle.table, args.limit));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::bundle_from_json;
    use tempfile::{NamedTempFile, TempDir};

    fn args_for(file: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            file,
            format: OutputFormat::Terminal,
            output: None,
            delimiter: None,
            records: false,
            limit: None,
            totals: false,
        }
    }

    fn scenario_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Object,Debit,Credit").unwrap();
        writeln!(file, "9000,100,0").unwrap();
        writeln!(file, "9720,0,200").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_analyze_to_json_file() {
        let input = scenario_file();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.json");

        let mut args = args_for(input.path().to_path_buf());
        args.format = OutputFormat::Json;
        args.output = Some(out.clone());
        handle_analyze_command(&Settings::default(), args).unwrap();

        let json = std::fs::read_to_string(&out).unwrap();
        let bundle = bundle_from_json(&json).unwrap();
        assert_eq!(bundle.table.len(), 2);
        assert_eq!(bundle.balance_sheet.total_assets.formatted, "$100");
        assert_eq!(bundle.balance_sheet.fund_balance.formatted, "-$200");
    }

    #[test]
    fn test_render_terminal_sections() {
        let input = scenario_file();
        let settings = Settings::default();
        let service = ingest_service(&settings, None).unwrap();
        let table = read_table(&service, input.path()).unwrap();
        let aggregates = Aggregator::default().aggregate(&table.records);
        let bundle = ReportBundle::assemble("scenario.csv", table, &aggregates, "$");

        let mut args = args_for(input.path().to_path_buf());
        let plain = render_terminal(&bundle, &args);
        assert!(!plain.contains("Processed Financial Data"));

        args.records = true;
        args.totals = true;
        let full = render_terminal(&bundle, &args);
        assert!(full.contains("Category Totals"));
        assert!(full.contains("Processed Financial Data"));
        assert!(full.contains("Fund Balance"));
    }

    #[test]
    fn test_missing_code_column_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Account,Debit,Credit").unwrap();
        writeln!(file, "9000,1,0").unwrap();
        file.flush().unwrap();

        let err = handle_analyze_command(&Settings::default(), args_for(file.path().to_path_buf()))
            .unwrap_err();
        assert!(err.is_malformed_input());
    }
}
