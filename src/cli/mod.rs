//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analyze;
pub mod codes;
pub mod export;

pub use analyze::{handle_analyze_command, AnalyzeArgs, OutputFormat};
pub use codes::{handle_classify_command, handle_codes_command};
pub use export::{handle_export_command, ExportArgs, ExportReport};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::config::Settings;
use crate::error::{FundsheetError, FundsheetResult};
use crate::models::IngestedTable;
use crate::services::{ColumnMapping, IngestService};

/// Path argument that means "read standard input"
pub const STDIN_PATH: &str = "-";

/// Build the ingest service from settings plus a command-line delimiter override
pub fn ingest_service(settings: &Settings, delimiter: Option<char>) -> FundsheetResult<IngestService> {
    let mut mapping = ColumnMapping::from_settings(settings);
    if let Some(delimiter) = delimiter {
        if !delimiter.is_ascii() {
            return Err(FundsheetError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                delimiter
            )));
        }
        mapping = mapping.with_delimiter(delimiter);
    }
    Ok(IngestService::new(mapping))
}

/// Read the input table from a file, or from stdin when the path is `-`
pub fn read_table(service: &IngestService, file: &Path) -> FundsheetResult<IngestedTable> {
    if file.as_os_str() == STDIN_PATH {
        debug!("Reading input from stdin");
        let stdin = io::stdin();
        let table = service.ingest(stdin.lock())?;
        Ok(table)
    } else {
        service.ingest_path(file)
    }
}

/// Display name for the input in report headers
pub fn source_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

/// Open the output destination: a buffered file, or stdout
pub fn open_output(output: Option<&Path>) -> FundsheetResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FundsheetError::Io(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
