//! A sink that forwards to tracing.

use cordshift_interface::{LogLevel, MigrationSink};

/// Emits every progress line as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MigrationSink for TracingSink {
    fn progress(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "cordshift::progress", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "cordshift::progress", "{}", message),
            LogLevel::Error => tracing::error!(target: "cordshift::progress", "{}", message),
        }
    }

    fn unsupported(&self, feature: &str, detail: &str) {
        tracing::warn!(target: "cordshift::unsupported", feature, detail, "Unsupported feature");
    }
}
