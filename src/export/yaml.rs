//! YAML Export functionality
//!
//! Writes the report bundle as YAML for human-readable review.

use std::io::Write;

use crate::error::{FundsheetError, FundsheetResult};
use crate::reports::ReportBundle;

/// Export the report bundle to YAML format
pub fn export_bundle_yaml<W: Write>(bundle: &ReportBundle, writer: &mut W) -> FundsheetResult<()> {
    let export_err = |e: std::io::Error| FundsheetError::Export(e.to_string());

    writeln!(writer, "# fundsheet report").map_err(export_err)?;
    writeln!(writer, "# Source: {}", bundle.source).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", bundle.generated_at).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, bundle)?;

    Ok(())
}
