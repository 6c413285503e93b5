//! Append-only JSON-lines decision log.
//!
//! Each record goes to the file in a single write, so a failure partway
//! through a batch leaves every earlier record on disk.

use crate::error::{CliError, Result};
use serde::Serialize;
use sharpedge_domain::traits::DecisionSink;
use sharpedge_domain::DecisionLog;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes one JSON object per decision, tagged with the run id.
pub struct JsonlSink {
    file: File,
    run_id: String,
    written: usize,
}

#[derive(Serialize)]
struct LogLine<'a> {
    run_id: &'a str,
    #[serde(flatten)]
    log: &'a DecisionLog,
}

impl JsonlSink {
    /// Open (or create) a log file for appending.
    pub fn open(path: &Path, run_id: impl Into<String>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            run_id: run_id.into(),
            written: 0,
        })
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl DecisionSink for JsonlSink {
    type Error = CliError;

    fn record(&mut self, log: &DecisionLog) -> Result<()> {
        let line = LogLine {
            run_id: &self.run_id,
            log,
        };
        let mut buf = serde_json::to_vec(&line)?;
        buf.push(b'\n');
        self.file.write_all(&buf)?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpedge_domain::{EvalMode, Proposition, Side};
    use sharpedge_gatekeeper::Gatekeeper;
    use tempfile::tempdir;

    #[test]
    fn test_appends_lines_with_run_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let gatekeeper = Gatekeeper::default_config();
        let prop = Proposition::new("Big", "UTA", "REB", Side::Over, 9.5, -110)
            .with_projection(10.0, 10.0, 0.66, 0.03);

        for run in ["run-a", "run-b"] {
            let mut sink = JsonlSink::open(&path, run).unwrap();
            gatekeeper
                .evaluate_and_record(&prop, EvalMode::Pregame, &mut sink)
                .unwrap();
            sink.flush().unwrap();
            assert_eq!(sink.written(), 1);
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["run_id"], "run-a");
        assert_eq!(lines[1]["run_id"], "run-b");
        assert_eq!(lines[0]["player"], "Big");
        assert_eq!(lines[0]["decision"]["final_tier"], "STRONG");
    }

    #[test]
    fn test_records_reach_disk_without_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let gatekeeper = Gatekeeper::default_config();
        let prop = Proposition::new("Big", "UTA", "REB", Side::Over, 9.5, -110)
            .with_projection(10.0, 10.0, 0.66, 0.03);

        let mut sink = JsonlSink::open(&path, "run-a").unwrap();
        gatekeeper
            .evaluate_and_record(&prop, EvalMode::Liveflow, &mut sink)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_reported() {
        let mut sink = JsonlSink::open(Path::new("/dev/full"), "run-a").unwrap();
        let prop = Proposition::new("Big", "UTA", "REB", Side::Over, 9.5, -110);
        let err = Gatekeeper::default_config()
            .evaluate_and_record(&prop, EvalMode::Pregame, &mut sink)
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(sink.written(), 0);
    }
}
