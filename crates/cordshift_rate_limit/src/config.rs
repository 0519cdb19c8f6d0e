//! Pacing delays.

use cordshift_interface::PacedOperation;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay, in milliseconds, after each kind of mutating call.
///
/// Loaded from the `[pacing]` table of the settings file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default)]
pub struct PacingConfig {
    /// After a role is created
    #[serde(default = "default_role_create_ms")]
    role_create_ms: u64,
    /// After a category or channel is created
    #[serde(default = "default_channel_create_ms")]
    channel_create_ms: u64,
    /// After an emoji is uploaded
    #[serde(default = "default_emoji_upload_ms")]
    emoji_upload_ms: u64,
    /// Between two guilds of a batch
    #[serde(default = "default_between_guilds_ms")]
    between_guilds_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            role_create_ms: default_role_create_ms(),
            channel_create_ms: default_channel_create_ms(),
            emoji_upload_ms: default_emoji_upload_ms(),
            between_guilds_ms: default_between_guilds_ms(),
        }
    }
}

fn default_role_create_ms() -> u64 {
    2000
}

fn default_channel_create_ms() -> u64 {
    1000
}

fn default_emoji_upload_ms() -> u64 {
    2000
}

fn default_between_guilds_ms() -> u64 {
    1000
}

impl PacingConfig {
    /// Returns a builder for constructing a PacingConfig.
    pub fn builder() -> PacingConfigBuilder {
        PacingConfigBuilder::default()
    }

    /// All delays zero.
    pub fn immediate() -> Self {
        Self {
            role_create_ms: 0,
            channel_create_ms: 0,
            emoji_upload_ms: 0,
            between_guilds_ms: 0,
        }
    }

    /// The pause that follows `operation`.
    pub fn delay_for(&self, operation: PacedOperation) -> Duration {
        let ms = match operation {
            PacedOperation::RoleCreate => self.role_create_ms,
            PacedOperation::ChannelCreate => self.channel_create_ms,
            PacedOperation::EmojiUpload => self.emoji_upload_ms,
            PacedOperation::BetweenGuilds => self.between_guilds_ms,
        };
        Duration::from_millis(ms)
    }
}
