//! Connected platform clients.

use crate::CordshiftConfig;
use cordshift_core::{GuildDescriptor, UserProfile, owned_guilds};
use cordshift_error::{CordshiftResult, MigrationError, MigrationErrorKind};
use cordshift_interface::{AccountPlatform, MigrationSink};
use cordshift_migrate::{ColorChoice, GuildMigrator, ProfileMigrator};
use cordshift_rate_limit::FixedDelayPacer;
use cordshift_social::{CdnFetcher, RestClient};
use std::sync::Arc;

/// Clients for both platforms plus the shared fetcher and pacer.
///
/// Built once from settings; hands out migrators that share the clients.
pub struct Session {
    discord: Arc<RestClient>,
    fluxer: Arc<RestClient>,
    assets: Arc<CdnFetcher>,
    pacer: Arc<FixedDelayPacer>,
}

impl Session {
    /// Build clients from `config`.
    ///
    /// No request is made here.
    ///
    /// # Errors
    ///
    /// Fails when either token is missing or malformed, or the HTTP client
    /// cannot be constructed.
    #[tracing::instrument(skip_all)]
    pub fn connect(config: &CordshiftConfig) -> CordshiftResult<Self> {
        let discord = RestClient::new(&config.source_token()?, config.discord_profile())?;
        let fluxer = RestClient::new(&config.destination_token()?, config.fluxer_profile())?;
        tracing::debug!(pacing = ?config.pacing(), "Clients ready");

        Ok(Self {
            discord: Arc::new(discord),
            fluxer: Arc::new(fluxer),
            assets: Arc::new(CdnFetcher::new()),
            pacer: Arc::new(FixedDelayPacer::new(*config.pacing())),
        })
    }

    /// The authenticated Discord user.
    ///
    /// # Errors
    ///
    /// Fails when the token is rejected or Discord is unreachable.
    pub async fn source_user(&self) -> CordshiftResult<UserProfile> {
        self.discord.current_user().await
    }

    /// The authenticated Fluxer user.
    ///
    /// # Errors
    ///
    /// Fails when the token is rejected or Fluxer is unreachable.
    pub async fn destination_user(&self) -> CordshiftResult<UserProfile> {
        self.fluxer.current_user().await
    }

    /// Discord guilds the current user owns.
    ///
    /// # Errors
    ///
    /// Fails when the user or guild listing cannot be read.
    pub async fn owned_source_guilds(&self) -> CordshiftResult<Vec<GuildDescriptor>> {
        let user = self.discord.current_user().await?;
        let guilds = self.discord.current_user_guilds().await?;
        let owned = owned_guilds(&guilds, user.id());
        tracing::info!(
            member_of = guilds.len(),
            owned = owned.len(),
            "Listed source guilds"
        );
        Ok(owned)
    }

    /// Fluxer guilds the current user belongs to, as candidates for
    /// migrating into an existing guild.
    ///
    /// # Errors
    ///
    /// Fails when the guild listing cannot be read.
    pub async fn destination_guilds(&self) -> CordshiftResult<Vec<GuildDescriptor>> {
        let guilds = self.fluxer.current_user_guilds().await?;
        tracing::info!(member_of = guilds.len(), "Listed destination guilds");
        Ok(guilds)
    }

    /// A guild migrator from Discord to Fluxer reporting to `sink`.
    ///
    /// # Errors
    ///
    /// Fails only if a collaborator is missing.
    pub fn guild_migrator(&self, sink: Arc<dyn MigrationSink>) -> CordshiftResult<GuildMigrator> {
        let migrator = GuildMigrator::builder()
            .source(self.discord.clone())
            .destination(self.fluxer.clone())
            .assets(self.assets.clone())
            .sink(sink)
            .pacer(self.pacer.clone())
            .build()
            .map_err(|_| MigrationError::new(MigrationErrorKind::ClientsMissing))?;
        Ok(migrator)
    }

    /// A profile migrator from Discord to Fluxer reporting to `sink`.
    ///
    /// # Errors
    ///
    /// Fails only if a collaborator is missing.
    pub fn profile_migrator(
        &self,
        sink: Arc<dyn MigrationSink>,
        color_choice: ColorChoice,
    ) -> CordshiftResult<ProfileMigrator> {
        let migrator = ProfileMigrator::builder()
            .source(self.discord.clone())
            .destination(self.fluxer.clone())
            .assets(self.assets.clone())
            .sink(sink)
            .color_choice(color_choice)
            .build()
            .map_err(|_| MigrationError::new(MigrationErrorKind::ClientsMissing))?;
        Ok(migrator)
    }
}
