use crate::trace::sink::TraceSink;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Appends traced commands to a history file
#[derive(Debug, Clone)]
pub struct HistoryFileSink {
    log_path: PathBuf,
}

impl HistoryFileSink {
    /// Create a sink appending to `path`
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Append one traced line
    pub fn append(&self, line: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let entry = format!("[{}] [{}] {}\n", timestamp, user, line);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(entry.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            fs::rename(&self.log_path, self.backup_path())?;
        }

        Ok(())
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Where a rotated log goes: the full file name with `.1` appended
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.log_path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }
}

impl TraceSink for HistoryFileSink {
    fn emit(&self, line: &str) {
        if let Err(e) = self.append(line) {
            tracing::warn!(
                "Failed to write command history to {}: {}",
                self.log_path.display(),
                e
            );
        }
    }
}
