//! Guild descriptors.

use serde::{Deserialize, Serialize};

/// A guild as read from either platform.
///
/// Read-only input to the engine.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GuildDescriptor {
    /// Platform snowflake ID
    id: String,
    /// Guild name
    name: String,
    /// Icon hash, if the guild has an icon
    #[serde(default)]
    #[builder(default)]
    icon: Option<String>,
    /// Set by the user-guild listing when the current user owns the guild
    #[serde(default)]
    #[builder(default)]
    owner: bool,
    /// Owner user ID (full guild objects only)
    #[serde(default)]
    #[builder(default)]
    owner_id: Option<String>,
    /// Approximate member count (listings requested `with_counts`)
    #[serde(default)]
    #[builder(default)]
    approximate_member_count: Option<u64>,
}

impl GuildDescriptor {
    /// Returns a builder for constructing a GuildDescriptor.
    pub fn builder() -> GuildDescriptorBuilder {
        GuildDescriptorBuilder::default()
    }

    /// True when `user_id` owns this guild.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner || self.owner_id.as_deref() == Some(user_id)
    }
}

/// Keep only the guilds owned by `user_id`.
pub fn owned_guilds(guilds: &[GuildDescriptor], user_id: &str) -> Vec<GuildDescriptor> {
    guilds
        .iter()
        .filter(|g| g.is_owned_by(user_id))
        .cloned()
        .collect()
}

/// Payload for creating a guild on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuild {
    /// Guild name
    pub name: String,
    /// Raw icon image, already downloaded
    pub icon: Option<Vec<u8>>,
}
