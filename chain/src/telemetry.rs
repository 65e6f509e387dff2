//! JSON-lines telemetry sink.
//!
//! Each emitted metric becomes one newline-delimited JSON object in a
//! `telemetry.jsonl` file under the miner's log directory, ready for log
//! aggregation. Stands in for an external experiment tracker; the
//! [`TelemetrySink`] seam carries the same contract either way.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use aegis_types::Timestamp;

use crate::client::TelemetrySink;
use crate::error::ChainError;

/// File name used inside the log directory.
const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Appends metrics to a JSON-lines file.
pub struct FileTelemetrySink {
    writer: Mutex<BufWriter<File>>,
}

impl FileTelemetrySink {
    /// Open (or create) `telemetry.jsonl` inside `dir`, appending.
    pub fn open(dir: &Path) -> Result<Self, ChainError> {
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(TELEMETRY_FILE))?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl TelemetrySink for FileTelemetrySink {
    fn emit(&self, tag: &str, value: f64, at: Timestamp) -> Result<(), ChainError> {
        let line = serde_json::json!({
            "tag": tag,
            "value": value,
            "timestamp": at.as_secs(),
        });
        let mut writer = self.writer.lock().expect("telemetry writer poisoned");
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), ChainError> {
        let mut writer = self.writer.lock().expect("telemetry writer poisoned");
        writer.flush()?;
        Ok(())
    }
}
