//! Configuration module for fundsheet
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FundsheetPaths;
pub use settings::Settings;
