//! JSON Export functionality
//!
//! Serializes the report bundle with its schema version so downstream tools
//! can check compatibility.

use std::io::Write;

use crate::error::{FundsheetError, FundsheetResult};
use crate::reports::ReportBundle;

/// Export the report bundle as pretty-printed JSON
pub fn export_bundle_json<W: Write>(bundle: &ReportBundle, writer: &mut W) -> FundsheetResult<()> {
    serde_json::to_writer_pretty(&mut *writer, bundle)?;
    writeln!(writer).map_err(|e| FundsheetError::Export(e.to_string()))?;
    Ok(())
}

/// Read a bundle back from JSON
pub fn bundle_from_json(json_str: &str) -> FundsheetResult<ReportBundle> {
    Ok(serde_json::from_str(json_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::bundle::BUNDLE_SCHEMA_VERSION;
    use crate::services::{aggregate, ingest};

    #[test]
    fn test_json_export() {
        let table = ingest("Object,Debit,Credit\n9000,100,0\n9720,0,100\n".as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);
        let bundle = ReportBundle::assemble("ledger.csv", table, &aggregates, "$");

        let mut buf = Vec::new();
        export_bundle_json(&bundle, &mut buf).unwrap();
        let json_str = String::from_utf8(buf).unwrap();

        assert!(json_str.contains("\"schema_version\""));
        assert!(json_str.contains("\"Fund Balance\""));

        let restored = bundle_from_json(&json_str).unwrap();
        assert_eq!(restored.schema_version, BUNDLE_SCHEMA_VERSION);
        assert_eq!(restored.table.len(), 2);
        assert_eq!(restored.balance_sheet, bundle.balance_sheet);
    }
}
