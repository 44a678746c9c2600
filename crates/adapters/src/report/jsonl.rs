// SPDX-License-Identifier: MIT

use crate::error::GuestError;
use crate::report::ReportSink;
use async_trait::async_trait;
use std::path::PathBuf;
use tmt_core::result::TestResult;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Appends one JSON object per line, matching the way this engine's
/// other persistent logs are append-only and line-delimited.
pub struct JsonlReportSink {
    path: PathBuf,
    // Serializes concurrent `report` calls from different guests onto one
    // append-only file without corrupting interleaved writes.
    lock: Mutex<()>,
}

impl JsonlReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ReportSink for JsonlReportSink {
    async fn report(&self, result: &TestResult) -> Result<(), GuestError> {
        let mut line = serde_json::to_string(result)?;
        line.push('\n');

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
