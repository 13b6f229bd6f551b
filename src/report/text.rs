//! Flat-file text report.
//!
//! The report is truncated and re-created at the start of every run with a
//! timestamped header, then filled with one block per controller listing its
//! groups. An empty run still produces the header.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{ReportError, Result};
use crate::parse::GroupRecord;

use super::RecordSink;

const RULE_WIDTH: usize = 50;

/// Append-only text report with a per-run header.
#[derive(Debug)]
pub struct TextReport {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TextReport {
    /// Create (truncating) the report file and write the run header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut report = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        report.write_all(&format!(
            "FlexConnect Group Report - {stamp}\n{}\n",
            "=".repeat(RULE_WIDTH)
        ))?;
        Ok(report)
    }

    fn write_all(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| ReportError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}

impl RecordSink for TextReport {
    fn append_rows(&mut self, rows: &[GroupRecord]) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut current_host: Option<&str> = None;

        for row in rows {
            if current_host != Some(row.host.as_str()) {
                self.write_all(&format!("\n[{stamp}] WLC {}:\n", row.host))?;
                current_host = Some(&row.host);
            }
            self.write_all(&format!("Group: {}, APs: {}\n", row.group, row.ap_count))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(host: &str, group: &str, ap_count: u32) -> GroupRecord {
        GroupRecord {
            host: host.into(),
            group: group.into(),
            ap_count,
        }
    }

    #[test]
    fn empty_batch_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        let mut report = TextReport::create(&path).unwrap();
        report.append_rows(&[]).unwrap();
        report.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("FlexConnect Group Report - "));
        assert!(contents.contains(&"=".repeat(RULE_WIDTH)));
        assert!(!contents.contains("WLC"));
    }

    #[test]
    fn rows_are_grouped_by_host() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        let mut report = TextReport::create(&path).unwrap();
        report
            .append_rows(&[
                record("10.0.0.1", "a1", 3),
                record("10.0.0.1", "a2", 0),
                record("10.0.0.2", "b1", 7),
            ])
            .unwrap();
        report.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("WLC 10.0.0.1:").count(), 1);
        assert_eq!(contents.matches("WLC 10.0.0.2:").count(), 1);
        assert!(contents.contains("Group: a1, APs: 3"));
        assert!(contents.contains("Group: a2, APs: 0"));
        assert!(contents.contains("Group: b1, APs: 7"));
    }

    #[test]
    fn unwritable_path_is_a_report_error() {
        let err = TextReport::create(Path::new("/nonexistent/dir/results.txt")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Report(ReportError::Io { .. })
        ));
    }
}
