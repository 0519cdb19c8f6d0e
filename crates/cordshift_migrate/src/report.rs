//! Per-stage counts and the guild run report.

use crate::IdentityMap;
use derive_getters::Getters;
use serde::Serialize;

/// Outcome counts for one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StageTally {
    /// New destination items created
    pub created: usize,
    /// Source items mapped onto items that already existed
    pub matched: usize,
    /// Source items deliberately not migrated
    pub skipped: usize,
    /// Source items whose create call failed
    pub failed: usize,
}

impl StageTally {
    /// Items that now have a destination counterpart.
    pub fn migrated(&self) -> usize {
        self.created + self.matched
    }
}

/// Outcome counts for the channel stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelTally {
    /// Categories
    pub categories: StageTally,
    /// Text, voice and converted channels
    pub channels: StageTally,
    /// Permission overwrites written
    pub overwrites_applied: usize,
    /// Permission overwrites the destination rejected
    pub overwrites_failed: usize,
}

/// Everything one guild run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GuildReport {
    /// Destination guild ID
    destination_guild_id: String,
    /// Role stage counts
    roles: StageTally,
    /// Channel stage counts
    channels: ChannelTally,
    /// Emoji stage counts
    emojis: StageTally,
    /// IDs mapped during the run
    identities: IdentityMap,
}

impl GuildReport {
    pub(crate) fn new(
        destination_guild_id: String,
        roles: StageTally,
        channels: ChannelTally,
        emojis: StageTally,
        identities: IdentityMap,
    ) -> Self {
        Self {
            destination_guild_id,
            roles,
            channels,
            emojis,
            identities,
        }
    }

    /// One-line summary for the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "Roles: {} created, {} matched, {} failed | Categories: {} created, {} matched | Channels: {} created, {} matched, {} skipped, {} failed | Emojis: {} uploaded, {} already present, {} failed",
            self.roles.created,
            self.roles.matched,
            self.roles.failed,
            self.channels.categories.created,
            self.channels.categories.matched,
            self.channels.channels.created,
            self.channels.channels.matched,
            self.channels.channels.skipped,
            self.channels.channels.failed + self.channels.categories.failed,
            self.emojis.created,
            self.emojis.matched,
            self.emojis.failed,
        )
    }
}
