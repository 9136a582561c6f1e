use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fundsheet::cli::{
    handle_analyze_command, handle_classify_command, handle_codes_command, handle_export_command,
    AnalyzeArgs, ExportArgs,
};
use fundsheet::config::{FundsheetPaths, Settings};

#[derive(Parser)]
#[command(
    name = "fundsheet",
    version,
    about = "Classify account codes and build financial statements from ledger exports",
    long_about = "Fundsheet reads a CSV export of financial transactions, assigns each \
                  object code a standardized accounting category, and summarizes the \
                  result as a balance sheet and an income statement."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "FUNDSHEET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file and print the balance sheet and income statement
    Analyze(AnalyzeArgs),

    /// Write the processed table or a statement to CSV
    Export(ExportArgs),

    /// Print the category for one or more codes
    Classify {
        /// Object/account codes
        #[arg(required = true, allow_hyphen_values = true)]
        codes: Vec<String>,
    },

    /// Show the classification rules in evaluation order
    Codes,

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FundsheetPaths::new()?;
    let settings_file = cli
        .config
        .clone()
        .unwrap_or_else(|| paths.settings_file());

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_or_create(&paths)?,
    };
    debug!(settings = %settings_file.display(), "Settings loaded");

    match cli.command {
        Some(Commands::Analyze(args)) => handle_analyze_command(&settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&settings, args)?,
        Some(Commands::Classify { codes }) => handle_classify_command(&codes)?,
        Some(Commands::Codes) => handle_codes_command()?,
        Some(Commands::Init) => {
            println!("Writing settings to: {}", settings_file.display());
            match &cli.config {
                Some(path) => settings.save_to(path)?,
                None => settings.save(&paths)?,
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Fundsheet Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", settings_file.display());
            if cli.config.is_none() && !paths.is_initialized() {
                println!("                  (not written yet, run 'fundsheet init')");
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol:         {}", settings.currency_symbol);
            println!("  Code columns:            {}", settings.code_columns.join(", "));
            println!("  Debit columns:           {}", settings.debit_columns.join(", "));
            println!("  Credit columns:          {}", settings.credit_columns.join(", "));
            println!(
                "  Income statement labels: {}",
                settings.income_statement_labels.join(", ")
            );
            println!("  Delimiter:               {:?}", settings.delimiter);
        }
        None => {
            println!("Fundsheet - account-code classification and financial statements");
            println!();
            println!("Run 'fundsheet --help' for usage information.");
            println!("Run 'fundsheet analyze <FILE>' to analyze a ledger export.");
        }
    }

    Ok(())
}
