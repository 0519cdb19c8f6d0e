//! cordshift - copy Discord guild structure and profiles to Fluxer.
//!
//! Uses user tokens for both platforms. Settings come from `cordshift.toml`
//! and `CORDSHIFT_*` environment variables.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cordshift::{
    ColorChoice, CordshiftConfig, GuildSelection, MigrationOptions, MigrationSink, RunLog,
    Session, init_tracing, plan_guilds,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "cordshift")]
#[command(about = "Copy Discord guild structure and profiles to Fluxer")]
#[command(version)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the Discord servers you own
    Guilds,

    /// List the Fluxer servers you belong to, for use with `guild --into`
    FluxerGuilds,

    /// Migrate servers you own
    Guild {
        /// Source guild IDs, migrated in the order given
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        guild_ids: Vec<String>,

        /// Migrate every server you own
        #[arg(long)]
        all: bool,

        /// Write into this existing Fluxer guild instead of creating one (single source guild only)
        #[arg(long)]
        into: Option<String>,

        /// Match existing roles, channels and emoji by name instead of duplicating them
        #[arg(long, requires = "into")]
        partial: bool,

        /// Skip roles
        #[arg(long)]
        no_roles: bool,

        /// Skip categories and channels
        #[arg(long)]
        no_channels: bool,

        /// Skip channel permission overwrites
        #[arg(long)]
        no_permissions: bool,

        /// Skip custom emoji
        #[arg(long)]
        no_emojis: bool,

        /// Do not write the run log to disk
        #[arg(long)]
        no_save_log: bool,
    },

    /// Migrate your profile
    Profile {
        /// Use the second profile theme colour as the accent colour
        #[arg(long)]
        secondary_color: bool,

        /// Do not write the run log to disk
        #[arg(long)]
        no_save_log: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let cli = Cli::parse();
    let config = CordshiftConfig::load(cli.config.as_deref()).context("Loading settings")?;
    let session = Session::connect(&config).context("Preparing platform clients")?;

    let source_user = session
        .source_user()
        .await
        .context("Discord connection failed; the token may be invalid or expired")?;
    info!(user = %source_user.display_tag(None), "Connected to Discord");
    let destination_user = session
        .destination_user()
        .await
        .context("Fluxer connection failed; the token may be invalid or expired")?;
    info!(user = %destination_user.username(), "Connected to Fluxer");

    match cli.command {
        Command::Guilds => list_guilds(&session).await,
        Command::FluxerGuilds => list_destination_guilds(&session).await,
        Command::Guild {
            guild_ids,
            all,
            into,
            partial,
            no_roles,
            no_channels,
            no_permissions,
            no_emojis,
            no_save_log,
        } => {
            let options = MigrationOptions::builder()
                .roles(!no_roles)
                .channels(!no_channels)
                .permissions(!no_permissions)
                .emojis(!no_emojis)
                .save_log(!no_save_log)
                .build()
                .context("Building migration options")?;
            let selection = if all {
                GuildSelection::All
            } else {
                GuildSelection::Ids(guild_ids)
            };
            migrate_guilds(&session, &config, &selection, into.as_deref(), partial, options).await
        }
        Command::Profile {
            secondary_color,
            no_save_log,
        } => {
            let choice = if secondary_color {
                ColorChoice::Secondary
            } else {
                ColorChoice::Primary
            };
            migrate_profile(&session, &config, choice, !no_save_log).await
        }
    }
}

async fn list_guilds(session: &Session) -> anyhow::Result<()> {
    let guilds = session.owned_source_guilds().await?;
    if guilds.is_empty() {
        println!("You don't own any Discord servers.");
        return Ok(());
    }

    println!("Servers you own:");
    for guild in &guilds {
        match guild.approximate_member_count() {
            Some(count) => println!("  {}  {} ({} members)", guild.id(), guild.name(), count),
            None => println!("  {}  {}", guild.id(), guild.name()),
        }
    }
    Ok(())
}

async fn list_destination_guilds(session: &Session) -> anyhow::Result<()> {
    let guilds = session
        .destination_guilds()
        .await
        .context("Fetching Fluxer servers")?;
    if guilds.is_empty() {
        println!("You're not in any Fluxer servers yet.");
        return Ok(());
    }

    println!("Your Fluxer servers:");
    for guild in &guilds {
        let owner = if *guild.owner() { " [OWNER]" } else { "" };
        println!("  {}  {}{}", guild.id(), guild.name(), owner);
    }
    Ok(())
}

async fn migrate_guilds(
    session: &Session,
    config: &CordshiftConfig,
    selection: &GuildSelection,
    into: Option<&str>,
    partial: bool,
    options: MigrationOptions,
) -> anyhow::Result<()> {
    let owned = session.owned_source_guilds().await?;
    let plans = plan_guilds(&owned, selection, &options, into, partial)?;
    if into.is_some() {
        println!("Roles and channels will be ADDED to the existing server, nothing will be deleted.");
    }

    let log = Arc::new(RunLog::new());
    let migrator = session.guild_migrator(log.clone())?;

    let outcomes = tokio::select! {
        outcomes = migrator.migrate_guilds(&plans) => Some(outcomes),
        _ = tokio::signal::ctrl_c() => None,
    };
    if outcomes.is_none() {
        log.warn("Migration interrupted by user");
    }

    finish(&log, config, *options.save_log())?;
    let Some(outcomes) = outcomes else {
        bail!("Migration interrupted");
    };
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.success)
        .map(|o| o.name.as_str())
        .collect();
    if !failed.is_empty() {
        bail!(
            "{} of {} servers failed: {}",
            failed.len(),
            outcomes.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

async fn migrate_profile(
    session: &Session,
    config: &CordshiftConfig,
    choice: ColorChoice,
    save_log: bool,
) -> anyhow::Result<()> {
    let log = Arc::new(RunLog::new());
    let migrator = session.profile_migrator(log.clone(), choice)?;

    let outcome = tokio::select! {
        ok = migrator.migrate() => Some(ok),
        _ = tokio::signal::ctrl_c() => None,
    };
    if outcome.is_none() {
        log.warn("Profile migration interrupted by user");
    }

    finish(&log, config, save_log)?;
    match outcome {
        Some(true) => Ok(()),
        Some(false) => bail!("Profile migration failed"),
        None => bail!("Profile migration interrupted"),
    }
}

fn finish(log: &RunLog, config: &CordshiftConfig, save: bool) -> anyhow::Result<()> {
    let unsupported = log.unsupported_features();
    if !unsupported.is_empty() {
        warn!(count = unsupported.len(), "Some features could not be migrated");
        for feature in &unsupported {
            warn!("  • {}", feature);
        }
    }

    if save {
        let path = log.save(config.log_dir())?;
        println!("✓ Migration log saved to: {}", path.display());
    }
    Ok(())
}
