//! Report output model for headless replay runs.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub final_offset: i32,
    /// Every listener event of the run, in order
    pub events: Vec<String>,
}

/// Counters shared by passed and failed reports
#[derive(Debug, Clone, Default)]
pub struct RunTotals {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub final_offset: i32,
    pub events: Vec<String>,
}

impl HeadlessReport {
    pub fn passed(totals: RunTotals) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames: totals.elapsed_frames,
            elapsed_ms: totals.elapsed_ms,
            final_offset: totals.final_offset,
            events: totals.events,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        totals: RunTotals,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_frames: totals.elapsed_frames,
            elapsed_ms: totals.elapsed_ms,
            final_offset: totals.final_offset,
            events: totals.events,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// Write the report as JSON, creating missing parent directories
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_report_serializes_snake_case() {
        let report = HeadlessReport::failed(
            "assert_offset",
            3,
            "expected offset 0, got -12".to_string(),
            RunTotals {
                elapsed_frames: 4,
                elapsed_ms: 64,
                final_offset: -12,
                events: vec!["header:start:12".to_string()],
            },
        );
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["failed_step_index"], 3);
        assert_eq!(json["final_offset"], -12);
        assert_eq!(json["events"][0], "header:start:12");
    }

    #[test]
    fn writes_report_to_absolute_path() {
        let dir = std::env::temp_dir().join(format!("pullover-report-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let report = HeadlessReport::passed(RunTotals {
            final_offset: -50,
            ..Default::default()
        });

        report.write_to_path(&path).expect("write");
        let written: HeadlessReport =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert!(written.is_passed());
        assert_eq!(written.final_offset, -50);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn writes_trailing_newline() {
        let report = HeadlessReport::passed(RunTotals::default());
        let mut out = Vec::new();
        report.write_to_writer(&mut out).expect("write");
        assert!(out.ends_with(b"}\n"));
        assert!(report.is_passed());
    }
}
