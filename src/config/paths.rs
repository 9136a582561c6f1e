//! Path management for fundsheet
//!
//! ## Path Resolution Order
//!
//! 1. `FUNDSHEET_CONFIG_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/fundsheet` (if `XDG_CONFIG_HOME` is set)
//! 3. The platform config directory (`~/.config/fundsheet`,
//!    `~/Library/Application Support/fundsheet`, `%APPDATA%\fundsheet`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FundsheetError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "FUNDSHEET_CONFIG_DIR";

/// Manages the paths used by fundsheet
#[derive(Debug, Clone)]
pub struct FundsheetPaths {
    base_dir: PathBuf,
}

impl FundsheetPaths {
    /// Create a new FundsheetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FundsheetError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FundsheetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/fundsheet/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), FundsheetError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FundsheetError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FundsheetError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("fundsheet"));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("fundsheet"))
        .ok_or_else(|| FundsheetError::Config("Could not determine home directory".into()))
}
