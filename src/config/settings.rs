//! User settings for fundsheet
//!
//! Controls how exports are read (column names, delimiter) and how reports
//! are labelled. The account-code taxonomy itself is fixed and not part of
//! the settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::FundsheetPaths;
use crate::error::FundsheetError;
use crate::services::aggregate::DEFAULT_INCOME_STATEMENT_LABELS;

/// User settings for fundsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in formatted amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Header names accepted for the account code column, in priority order
    #[serde(default = "default_code_columns")]
    pub code_columns: Vec<String>,

    /// Header names accepted for the debit column
    #[serde(default = "default_debit_columns")]
    pub debit_columns: Vec<String>,

    /// Header names accepted for the credit column
    #[serde(default = "default_credit_columns")]
    pub credit_columns: Vec<String>,

    /// Category labels the income statement selects (exact match)
    #[serde(default = "default_income_statement_labels")]
    pub income_statement_labels: Vec<String>,

    /// Field delimiter of the input files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_code_columns() -> Vec<String> {
    vec!["Object".to_string(), "Code0SegNum".to_string()]
}

fn default_debit_columns() -> Vec<String> {
    vec!["Debit".to_string()]
}

fn default_credit_columns() -> Vec<String> {
    vec!["Credit".to_string()]
}

fn default_income_statement_labels() -> Vec<String> {
    DEFAULT_INCOME_STATEMENT_LABELS
        .iter()
        .map(|l| l.to_string())
        .collect()
}

fn default_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            code_columns: default_code_columns(),
            debit_columns: default_debit_columns(),
            credit_columns: default_credit_columns(),
            income_statement_labels: default_income_statement_labels(),
            delimiter: default_delimiter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FundsheetPaths) -> Result<Self, FundsheetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, FundsheetError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FundsheetError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FundsheetError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can drive ingestion
    pub fn validate(&self) -> Result<(), FundsheetError> {
        if self.code_columns.iter().all(|c| c.trim().is_empty()) {
            return Err(FundsheetError::Config(
                "code_columns must name at least one header".into(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(FundsheetError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FundsheetPaths) -> Result<(), FundsheetError> {
        paths.ensure_directories()?;
        self.save_to(&paths.settings_file())
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, settings_path: &Path) -> Result<(), FundsheetError> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FundsheetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(settings_path, contents).map_err(|e| {
            FundsheetError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
