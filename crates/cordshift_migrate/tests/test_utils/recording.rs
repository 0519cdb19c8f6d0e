//! Sink and pacer that record what they were given.

use async_trait::async_trait;
use cordshift_interface::{LogLevel, MigrationSink, PacedOperation, Pacer};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(LogLevel, String)>>,
    notices: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().expect("sink lock").clone()
    }

    pub fn notices(&self) -> Vec<(String, String)> {
        self.notices.lock().expect("sink lock").clone()
    }

    pub fn notice_features(&self) -> Vec<String> {
        self.notices().into_iter().map(|(feature, _)| feature).collect()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(text))
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.lines().iter().filter(|(l, _)| *l == level).count()
    }
}

impl MigrationSink for RecordingSink {
    fn progress(&self, level: LogLevel, message: &str) {
        self.lines
            .lock()
            .expect("sink lock")
            .push((level, message.to_string()));
    }

    fn unsupported(&self, feature: &str, detail: &str) {
        self.notices
            .lock()
            .expect("sink lock")
            .push((feature.to_string(), detail.to_string()));
    }
}

/// Records every pause without waiting.
#[derive(Default)]
pub struct CountingPacer {
    operations: Mutex<Vec<PacedOperation>>,
}

impl CountingPacer {
    pub fn operations(&self) -> Vec<PacedOperation> {
        self.operations.lock().expect("pacer lock").clone()
    }

    pub fn count(&self, operation: PacedOperation) -> usize {
        self.operations()
            .iter()
            .filter(|op| **op == operation)
            .count()
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pace(&self, operation: PacedOperation) {
        self.operations.lock().expect("pacer lock").push(operation);
    }
}
