//! Notification sink seam.

/// Severity of a progress line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    /// Routine progress
    Info,
    /// Item skipped or failed, run continues
    Warn,
    /// Stage or guild failed
    Error,
}

/// Receives progress lines and unsupported-feature notices.
///
/// The sink is injected by the caller, who owns its lifecycle.
pub trait MigrationSink: Send + Sync {
    /// Record one progress line.
    fn progress(&self, level: LogLevel, message: &str);

    /// Record a source feature the destination cannot represent.
    fn unsupported(&self, feature: &str, detail: &str);

    /// Shorthand for an info line.
    fn info(&self, message: &str) {
        self.progress(LogLevel::Info, message);
    }

    /// Shorthand for a warning line.
    fn warn(&self, message: &str) {
        self.progress(LogLevel::Warn, message);
    }

    /// Shorthand for an error line.
    fn error(&self, message: &str) {
        self.progress(LogLevel::Error, message);
    }
}
