//! Custom error types for fundsheet
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Row-level anomalies (an unparseable account code, a missing debit or
//! credit column) are not errors: they resolve to defined fallback values
//! during ingestion. Only input that cannot be read as a table at all
//! surfaces as [`FundsheetError::MalformedInput`].

use thiserror::Error;

/// The main error type for fundsheet operations
#[derive(Error, Debug)]
pub enum FundsheetError {
    /// Input cannot be parsed as tabular data, or a required column is absent
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FundsheetError {
    /// Create a malformed-input error for a required column that is absent
    pub fn missing_column(canonical: &str, accepted: &[String]) -> Self {
        Self::MalformedInput(format!(
            "required column '{}' not found (accepted headers: {})",
            canonical,
            accepted.join(", ")
        ))
    }

    /// Check if this is a malformed-input error
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FundsheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FundsheetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FundsheetError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for FundsheetError {
    fn from(err: csv::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

/// Result type alias for fundsheet operations
pub type FundsheetResult<T> = Result<T, FundsheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FundsheetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_column_error() {
        let err = FundsheetError::missing_column(
            "Object",
            &["Object".to_string(), "Code0SegNum".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Malformed input: required column 'Object' not found (accepted headers: Object, Code0SegNum)"
        );
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FundsheetError = io_err.into();
        assert!(matches!(err, FundsheetError::Io(_)));
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_from_csv_error_is_malformed_input() {
        let data = "Object,Debit\n9000,1,extra";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let csv_err = reader
            .records()
            .next()
            .unwrap()
            .expect_err("ragged row should fail");
        let err: FundsheetError = csv_err.into();
        assert!(err.is_malformed_input());
    }
}
