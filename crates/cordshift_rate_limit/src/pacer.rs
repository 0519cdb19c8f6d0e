//! Pacer implementations.

use crate::PacingConfig;
use async_trait::async_trait;
use cordshift_interface::{PacedOperation, Pacer};

/// Sleeps for the configured delay after each operation.
#[derive(Debug, Clone, Default)]
pub struct FixedDelayPacer {
    config: PacingConfig,
}

impl FixedDelayPacer {
    /// Create a pacer from delay settings.
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    /// The delay settings in use.
    pub fn config(&self) -> &PacingConfig {
        &self.config
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    #[tracing::instrument(skip(self))]
    async fn pace(&self, operation: PacedOperation) {
        let delay = self.config.delay_for(operation);
        if delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Pacing");
        tokio::time::sleep(delay).await;
    }
}

/// Never waits. Used by tests and dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pace(&self, _operation: PacedOperation) {}
}
