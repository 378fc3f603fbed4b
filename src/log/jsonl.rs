//! JSONL (JSON Lines) logging of editing sessions
//!
//! Provides append-only logging of closed sessions to `.tmplbind/sessions.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::node::config::NodeConfig;

/// How an editing session ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    /// The config was handed back to the host
    Saved,
    /// The edits were discarded
    Cancelled,
}

/// Record of a single closed editing session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    /// Node that was edited
    pub node_id: String,
    /// Business whose catalog supplied the template
    pub business_id: String,
    /// Selected template name (None if no template was selected)
    pub template: Option<String>,
    /// ISO 8601 timestamp of when the session closed
    pub timestamp: DateTime<Utc>,
    /// How the session ended
    pub outcome: SessionOutcome,
    /// Placeholder count of the selected template
    pub placeholder_count: usize,
    /// Slots still unresolved in the final preview
    #[serde(default)]
    pub unresolved_slots: Vec<usize>,
    /// The saved config (None for cancelled sessions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
}

/// JSONL logger for editing sessions
///
/// Provides append-only logging to `.tmplbind/sessions.jsonl`.
/// Each line is a JSON object representing a single closed session.
pub struct SessionLogger {
    log_path: PathBuf,
}

impl SessionLogger {
    /// Create a new JSONL logger
    ///
    /// # Arguments
    /// * `log_dir` - Directory where sessions.jsonl will be stored (typically `.tmplbind`)
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Ok(Self {
            log_path: log_dir.join("sessions.jsonl"),
        })
    }

    /// Append a session record to the log
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be opened or created
    /// - The record cannot be serialized to JSON
    /// - Writing to the file fails
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json =
            serde_json::to_string(record).context("Failed to serialize session record to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all session records from the log, oldest first
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be read
    /// - Any line cannot be parsed as valid JSON
    pub fn read_all(&self) -> Result<Vec<SessionRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut records = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let record: SessionRecord = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            records.push(record);
        }

        Ok(records)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
