//! Per-guild orchestration.

use crate::{
    ChannelMigrator, ChannelTally, EmojiMigrator, EntityKind, GuildReport, IdentityMap,
    RoleMigrator, StageContext, StageTally,
};
use cordshift_core::{
    ChannelDescriptor, EmojiDescriptor, GuildDescriptor, MigrationOptions, NewGuild,
    RoleDescriptor,
};
use cordshift_error::{CordshiftResult, MigrationError, MigrationErrorKind};
use cordshift_interface::{AssetFetcher, GuildPlatform, MigrationSink, PacedOperation, Pacer};
use std::sync::Arc;

/// One guild to migrate in a batch.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GuildPlan {
    /// Source guild
    source: GuildDescriptor,
    /// What to copy
    #[builder(default)]
    options: MigrationOptions,
    /// Existing destination guild to write into instead of creating one
    #[builder(default)]
    destination_guild_id: Option<String>,
    /// Match existing destination items by name instead of creating duplicates
    #[builder(default)]
    partial_sync: bool,
}

impl GuildPlan {
    /// Returns a builder for constructing a GuildPlan.
    pub fn builder() -> GuildPlanBuilder {
        GuildPlanBuilder::default()
    }
}

/// Result of one guild in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildOutcome {
    /// Source guild ID
    pub source_guild_id: String,
    /// Source guild name
    pub name: String,
    /// Whether the guild run completed
    pub success: bool,
}

/// What the destination already holds, read up front for a partial sync.
#[derive(Debug, Default)]
struct DestinationState {
    roles: Option<Vec<RoleDescriptor>>,
    channels: Option<Vec<ChannelDescriptor>>,
    emojis: Option<Vec<EmojiDescriptor>>,
}

/// Drives the stages of a guild migration.
///
/// Built once per session from its collaborators. Each call to
/// [`GuildMigrator::migrate_guild`] starts from an empty [`IdentityMap`].
#[derive(derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct GuildMigrator {
    /// Platform read from
    source: Arc<dyn GuildPlatform>,
    /// Platform written to
    destination: Arc<dyn GuildPlatform>,
    /// Downloads icons and emoji images
    assets: Arc<dyn AssetFetcher>,
    /// Receives progress lines and notices
    sink: Arc<dyn MigrationSink>,
    /// Pause policy after creates
    pacer: Arc<dyn Pacer>,
}

impl GuildMigrator {
    /// Returns a builder for constructing a GuildMigrator.
    pub fn builder() -> GuildMigratorBuilder {
        GuildMigratorBuilder::default()
    }

    fn context(&self) -> StageContext<'_> {
        StageContext {
            destination: self.destination.as_ref(),
            sink: self.sink.as_ref(),
            pacer: self.pacer.as_ref(),
        }
    }

    /// Migrate one guild and report whether it completed.
    ///
    /// Fatal errors are logged to the sink and turned into `false`;
    /// per-item failures are not fatal and still yield `true`.
    pub async fn migrate_guild(
        &self,
        source_guild: &GuildDescriptor,
        options: &MigrationOptions,
        destination_guild_id: Option<&str>,
        partial_sync: bool,
    ) -> bool {
        match self
            .run_guild(source_guild, options, destination_guild_id, partial_sync)
            .await
        {
            Ok(report) => {
                self.sink.info(&format!(
                    "✓ Server '{}' migration complete",
                    source_guild.name()
                ));
                self.sink.info(&report.summary());
                true
            }
            Err(e) => {
                tracing::error!(guild = %source_guild.name(), error = %e, "Guild migration failed");
                self.sink.error(&format!(
                    "Server migration failed for '{}': {}",
                    source_guild.name(),
                    e
                ));
                false
            }
        }
    }

    /// Migrate one guild and return the full report.
    ///
    /// # Errors
    ///
    /// Fails when the destination guild cannot be created or reused, or when
    /// reading roles, channels or emoji from the source fails.
    #[tracing::instrument(
        skip_all,
        fields(
            source_guild_id = %source_guild.id(),
            partial_sync = partial_sync,
            source = self.source.platform_name(),
            destination = self.destination.platform_name()
        )
    )]
    pub async fn run_guild(
        &self,
        source_guild: &GuildDescriptor,
        options: &MigrationOptions,
        destination_guild_id: Option<&str>,
        partial_sync: bool,
    ) -> CordshiftResult<GuildReport> {
        let sink = self.sink.as_ref();
        sink.info(&format!("=== Migrating Server: {} ===", source_guild.name()));

        let mut identities = IdentityMap::new();
        let destination_id = self
            .resolve_destination(source_guild, destination_guild_id)
            .await?;
        identities.put(EntityKind::Guild, source_guild.id().as_str(), destination_id.as_str());

        let existing = if partial_sync {
            self.read_destination(&destination_id, options).await
        } else {
            DestinationState::default()
        };

        sink.info("Fetching server data...");
        let source_id = source_guild.id();
        let roles = if *options.roles() {
            self.source
                .get_roles(source_id)
                .await
                .map_err(|e| source_fetch("roles", e))?
        } else {
            Vec::new()
        };
        let channels = if *options.channels() {
            self.source
                .get_channels(source_id)
                .await
                .map_err(|e| source_fetch("channels", e))?
        } else {
            Vec::new()
        };
        let emojis = if *options.emojis() {
            self.source
                .get_emojis(source_id)
                .await
                .map_err(|e| source_fetch("emojis", e))?
        } else {
            Vec::new()
        };
        sink.info(&format!(
            "Found {} roles, {} channels, {} emojis",
            roles.len(),
            channels.len(),
            emojis.len()
        ));

        let context = self.context();

        let role_tally = if *options.roles() {
            RoleMigrator::new(context)
                .migrate(
                    &roles,
                    &destination_id,
                    existing.roles.as_deref(),
                    &mut identities,
                )
                .await
        } else {
            StageTally::default()
        };

        let channel_tally = if *options.channels() {
            ChannelMigrator::new(context)
                .migrate(
                    &channels,
                    &destination_id,
                    options.applies_permissions(),
                    existing.channels.as_deref(),
                    &mut identities,
                )
                .await
        } else {
            ChannelTally::default()
        };

        let emoji_tally = if *options.emojis() {
            EmojiMigrator::new(context, self.source.as_ref(), self.assets.as_ref())
                .migrate(&emojis, &destination_id, existing.emojis.as_deref())
                .await
        } else {
            StageTally::default()
        };

        Ok(GuildReport::new(
            destination_id,
            role_tally,
            channel_tally,
            emoji_tally,
            identities,
        ))
    }

    /// Migrate several guilds in order, pausing between them.
    ///
    /// A failed guild does not stop the batch.
    pub async fn migrate_guilds(&self, plans: &[GuildPlan]) -> Vec<GuildOutcome> {
        let mut outcomes = Vec::with_capacity(plans.len());

        for (index, plan) in plans.iter().enumerate() {
            self.sink.info(&format!(
                "[{}/{}] {}",
                index + 1,
                plans.len(),
                plan.source().name()
            ));
            let success = self
                .migrate_guild(
                    plan.source(),
                    plan.options(),
                    plan.destination_guild_id().as_deref(),
                    *plan.partial_sync(),
                )
                .await;
            outcomes.push(GuildOutcome {
                source_guild_id: plan.source().id().clone(),
                name: plan.source().name().clone(),
                success,
            });

            if index + 1 < plans.len() {
                self.pacer.pace(PacedOperation::BetweenGuilds).await;
            }
        }

        let succeeded = outcomes.iter().filter(|o| o.success).count();
        self.sink.info(&format!(
            "=== Batch complete: {}/{} servers migrated ===",
            succeeded,
            outcomes.len()
        ));
        outcomes
    }

    /// Reuse `destination_guild_id` or create a new guild named after the source.
    async fn resolve_destination(
        &self,
        source_guild: &GuildDescriptor,
        destination_guild_id: Option<&str>,
    ) -> CordshiftResult<String> {
        let sink = self.sink.as_ref();

        if let Some(id) = destination_guild_id {
            let existing = self.destination.get_guild(id).await.map_err(|e| {
                MigrationError::new(MigrationErrorKind::GuildResolution(format!(
                    "guild {} is not reachable: {}",
                    id, e
                )))
            })?;
            sink.info(&format!(
                "Using existing server: {} (ID: {})",
                existing.name(),
                existing.id()
            ));
            sink.info("(Will add roles and channels, won't delete anything)");
            return Ok(existing.id().clone());
        }

        let icon = self.download_icon(source_guild).await;
        sink.info(&format!("Creating server: {}", source_guild.name()));
        let request = NewGuild {
            name: source_guild.name().clone(),
            icon,
        };
        let created = self.destination.create_guild(&request).await.map_err(|e| {
            MigrationError::new(MigrationErrorKind::GuildResolution(format!(
                "could not create '{}': {}",
                source_guild.name(),
                e
            )))
        })?;
        sink.info(&format!("✓ Server created with ID: {}", created.id()));
        Ok(created.id().clone())
    }

    async fn download_icon(&self, source_guild: &GuildDescriptor) -> Option<Vec<u8>> {
        let url = self.source.guild_icon_url(source_guild)?;
        self.sink.info("Downloading server icon...");
        match self.assets.fetch_asset(&url).await {
            Ok(Some(icon)) => Some(icon),
            Ok(None) => {
                self.sink.warn("Failed to download server icon, continuing without it");
                None
            }
            Err(e) => {
                self.sink.warn(&format!(
                    "Failed to download server icon ({}), continuing without it",
                    e
                ));
                None
            }
        }
    }

    /// Read destination roles, channels and emoji for name matching.
    ///
    /// A failed read is logged and treated as an empty list.
    async fn read_destination(
        &self,
        destination_guild_id: &str,
        options: &MigrationOptions,
    ) -> DestinationState {
        let sink = self.sink.as_ref();
        sink.info("Fetching existing destination state for partial sync...");
        let mut state = DestinationState::default();

        if *options.roles() {
            state.roles = Some(match self.destination.get_roles(destination_guild_id).await {
                Ok(roles) => roles,
                Err(e) => {
                    sink.warn(&format!("Could not read existing roles: {}", e));
                    Vec::new()
                }
            });
        }
        if *options.channels() {
            state.channels = Some(
                match self.destination.get_channels(destination_guild_id).await {
                    Ok(channels) => channels,
                    Err(e) => {
                        sink.warn(&format!("Could not read existing channels: {}", e));
                        Vec::new()
                    }
                },
            );
        }
        if *options.emojis() {
            state.emojis = Some(match self.destination.get_emojis(destination_guild_id).await {
                Ok(emojis) => emojis,
                Err(e) => {
                    sink.warn(&format!("Could not read existing emojis: {}", e));
                    Vec::new()
                }
            });
        }

        sink.info(&format!(
            "Destination has {} roles, {} channels, {} emojis",
            state.roles.as_ref().map_or(0, Vec::len),
            state.channels.as_ref().map_or(0, Vec::len),
            state.emojis.as_ref().map_or(0, Vec::len)
        ));
        state
    }
}

#[track_caller]
fn source_fetch(what: &str, error: cordshift_error::CordshiftError) -> MigrationError {
    MigrationError::new(MigrationErrorKind::SourceFetch(format!("{}: {}", what, error)))
}
