//! Pacing policy seam.

use async_trait::async_trait;

/// Mutating operations that are followed by a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PacedOperation {
    /// A role was created
    RoleCreate,
    /// A category or channel was created
    ChannelCreate,
    /// An emoji was uploaded
    EmojiUpload,
    /// One guild finished and another is about to start
    BetweenGuilds,
}

/// Called after each successful mutating call.
///
/// Implementations decide how long to wait. The engine never calls this
/// after a failed call or after a mapping-only step.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait as long as the policy requires after `operation`.
    async fn pace(&self, operation: PacedOperation);
}
