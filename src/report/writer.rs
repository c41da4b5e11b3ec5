//! Report serialization
//!
//! Writes the full report structure as pretty-printed JSON to a file
//! whose name carries the run's start timestamp.

use super::DiagnosticReport;
use crate::error::{IoResultExt, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Report file name for a run that started at `started_at`
pub fn report_filename(started_at: &DateTime<Utc>) -> String {
    format!("laptop_diagnostic_{}.json", started_at.timestamp_millis())
}

/// Serialize the report as indented JSON into `dir`.
///
/// Returns the path of the written file.
pub fn save_report(report: &DiagnosticReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename(&report.started_at));
    let file = File::create(&path).with_path(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;

    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_filename_carries_epoch_millis() {
        let started = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            report_filename(&started),
            "laptop_diagnostic_1700000000123.json"
        );
    }

    #[test]
    fn test_saved_report_parses_with_all_categories() {
        let dir = TempDir::new().unwrap();
        let report = DiagnosticReport::new(Utc::now());

        let path = save_report(&report, dir.path()).unwrap();
        assert!(path.exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "basic_info", "cpu", "memory", "storage", "gpu", "battery", "display",
            "network", "thermal",
        ] {
            assert!(object.contains_key(key), "missing key: {}", key);
        }
    }

    #[test]
    fn test_save_into_missing_directory_errors() {
        let dir = TempDir::new().unwrap();
        let report = DiagnosticReport::new(Utc::now());

        let result = save_report(&report, &dir.path().join("nope"));
        assert!(result.is_err());
    }
}
