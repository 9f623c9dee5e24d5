//! Output module for audit reports
//!
//! This module handles:
//! - Printing page and sitewide reports to the console
//! - Writing markdown reports of sitewide runs
//! - Exporting results as JSON

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{print_page_report, print_sitewide_report};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes any serializable result as pretty-printed JSON
///
/// # Arguments
///
/// * `value` - A `PageReport`, `SitewideResult` or other serializable value
/// * `output_path` - Path of the JSON file to create
pub fn write_json<T: Serialize>(value: &T, output_path: &Path) -> crate::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::session::PageReport;

    #[test]
    fn test_write_json_page_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");

        let report = PageReport::from_facts(extract(
            "<title>Hallo</title>",
            "https://example.com/",
            Some("hallo"),
        ));
        write_json(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["score"], report.score);
        assert_eq!(json["facts"]["title"]["hasKeyword"], true);
        assert_eq!(json["facts"]["urlShape"]["protocol"], "https:");
        assert_eq!(json["issues"][0]["kind"], "warning");
    }

    #[test]
    fn test_write_json_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");

        let result = write_json(&serde_json::json!({"a": 1}), &path);
        assert!(matches!(result, Err(crate::AuditError::Io(_))));
    }
}
