//! Guild and profile migration engine.
//!
//! A guild run goes through fixed stages: resolve the destination guild,
//! optionally read what already exists there (partial sync), then migrate
//! roles, channels and emoji in that order. Roles come first because channel
//! permission overwrites refer to them through the run's [`IdentityMap`].
//!
//! Every collaborator is injected: the two platform clients, the asset
//! fetcher, the pacing policy and the notification sink. Per-item failures
//! are logged to the sink and counted; only guild setup and source reads can
//! abort a guild.

mod channel;
mod emoji;
mod guild;
mod identity;
mod profile;
mod report;
mod role;
mod sink;

pub use channel::{CONVERTED_FORUM_MARKER, ChannelMigrator, DEFAULT_VOICE_BITRATE};
pub use emoji::EmojiMigrator;
pub use guild::{GuildMigrator, GuildMigratorBuilder, GuildOutcome, GuildPlan, GuildPlanBuilder};
pub use identity::{EntityKind, IdentityMap};
pub use profile::{ColorChoice, ProfileMigrator, ProfileMigratorBuilder, ProfileReport};
pub use report::{ChannelTally, GuildReport, StageTally};
pub use role::RoleMigrator;
pub use sink::TracingSink;

use cordshift_interface::{GuildPlatform, MigrationSink, Pacer};

/// Destination-side collaborators shared by the stage migrators.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    /// Client for the platform being written to
    pub destination: &'a dyn GuildPlatform,
    /// Where progress lines go
    pub sink: &'a dyn MigrationSink,
    /// Pause policy after successful creates
    pub pacer: &'a dyn Pacer,
}
