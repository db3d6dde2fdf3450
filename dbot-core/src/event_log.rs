//! Append-only event log: one timestamped line per inbound message, outbound prompt, reply and
//! handled membership event. Write failures never propagate past [`EventLog::append`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;

use crate::error::{DbotError, Result};

/// File-backed append-only log. Appends are serialized so lines never interleave.
#[derive(Debug)]
pub struct EventLog {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl EventLog {
    /// Log that appends to `path`, creating parent directories on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    /// Log that discards every line (tests, chat mode).
    pub fn disabled() -> Self {
        Self {
            path: None,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends `[YYYY-MM-DD HH:MM:SS] line`, with embedded newlines escaped as `\n`. Returns [`DbotError::LogWrite`] on failure.
    pub fn try_append(&self, line: &str) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let _guard = self
            .lock
            .lock()
            .map_err(|e| DbotError::LogWrite(format!("event log lock poisoned: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| DbotError::LogWrite(e.to_string()))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DbotError::LogWrite(e.to_string()))?;
        let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", stamp, line.replace('\n', "\\n")).map_err(|e| DbotError::LogWrite(e.to_string()))
    }

    /// Appends a line; failures go to the tracing output instead.
    pub fn append(&self, line: &str) {
        if let Err(e) = self.try_append(line) {
            warn!(error = %e, line = %line, "event log append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_writes_timestamped_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/events.log");
        let log = EventLog::new(&path);

        log.append("[EVENT] first");
        log.append("[EVENT] second");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] [EVENT] first"));
        assert!(lines[1].ends_with("] [EVENT] second"));
    }

    #[test]
    fn test_try_append_reports_log_write_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let log = EventLog::new(dir.path());

        let err = log.try_append("line").unwrap_err();
        assert!(matches!(err, DbotError::LogWrite(_)));
        // append swallows the same failure
        log.append("line");
    }

    #[test]
    fn test_multiline_entry_stays_on_one_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.log");
        let log = EventLog::new(&path);

        log.append("[PROMPT] User: hi\nBot:");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("User: hi\\nBot:"));
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let log = EventLog::disabled();
        assert!(log.path().is_none());
        assert!(log.try_append("ignored").is_ok());
    }
}
