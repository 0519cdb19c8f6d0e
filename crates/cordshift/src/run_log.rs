//! File-backed migration log.

use chrono::{DateTime, Local};
use cordshift_error::{CordshiftResult, IoError};
use cordshift_interface::{LogLevel, MigrationSink};
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const RULE_WIDTH: usize = 80;

/// One timestamped progress line.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LogEntry {
    /// When the line was recorded
    timestamp: DateTime<Local>,
    /// Severity
    level: LogLevel,
    /// Message text
    message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Collects a run's progress lines and unsupported-feature notices, and
/// writes them to a report file when asked.
///
/// Every line is also emitted as a tracing event, so the console shows the
/// same progress as the saved file.
#[derive(Debug)]
pub struct RunLog {
    started: DateTime<Local>,
    entries: Mutex<Vec<LogEntry>>,
    unsupported: Mutex<Vec<String>>,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RunLog {
    /// Start an empty log stamped with the current time.
    pub fn new() -> Self {
        Self {
            started: Local::now(),
            entries: Mutex::new(Vec::new()),
            unsupported: Mutex::new(Vec::new()),
        }
    }

    /// Lines recorded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Unsupported-feature notices recorded so far.
    pub fn unsupported_features(&self) -> Vec<String> {
        lock(&self.unsupported).clone()
    }

    /// Report file name, `migration_YYYYMMDD_HHMMSS.txt`, from the start time.
    pub fn file_name(&self) -> String {
        format!("migration_{}.txt", self.started.format("%Y%m%d_%H%M%S"))
    }

    /// The report text: header, unsupported features (if any), then the log.
    pub fn render(&self) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let mut out = format!(
            "{heavy}\nDiscord to Fluxer Migration Log\nGenerated: {}\n{heavy}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        let unsupported = self.unsupported_features();
        if !unsupported.is_empty() {
            out.push_str(&format!("UNSUPPORTED FEATURES\n{light}\n"));
            for feature in &unsupported {
                out.push_str(&format!("  • {}\n", feature));
            }
            out.push('\n');
        }

        out.push_str(&format!("MIGRATION LOG\n{light}\n"));
        for entry in lock(&self.entries).iter() {
            out.push_str(&format!("{}\n", entry));
        }
        out
    }

    /// Write the report into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] when the directory or file cannot be written.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn save(&self, dir: &Path) -> CordshiftResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .map_err(|e| IoError::new(dir.display().to_string(), e.to_string()))?;

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render())
            .map_err(|e| IoError::new(path.display().to_string(), e.to_string()))?;

        tracing::info!(path = %path.display(), "Migration log saved");
        Ok(path)
    }
}

impl MigrationSink for RunLog {
    fn progress(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
        lock(&self.entries).push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });
    }

    fn unsupported(&self, feature: &str, detail: &str) {
        let notice = if detail.is_empty() {
            format!("Unsupported: {}", feature)
        } else {
            format!("Unsupported: {} - {}", feature, detail)
        };
        lock(&self.unsupported).push(notice.clone());
        self.progress(LogLevel::Warn, &notice);
    }
}
