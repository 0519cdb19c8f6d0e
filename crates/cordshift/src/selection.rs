//! Turning a command-line guild selection into batch plans.

use cordshift_core::{GuildDescriptor, MigrationOptions};
use cordshift_error::{CordshiftResult, MigrationError, MigrationErrorKind};
use cordshift_migrate::GuildPlan;

/// Which owned guilds to migrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuildSelection {
    /// Every guild the user owns, in listing order
    All,
    /// These guild IDs, in the order given
    Ids(Vec<String>),
}

/// Build one [`GuildPlan`] per selected guild.
///
/// Repeated IDs are migrated once. A destination guild can only be given
/// for a single source guild, since two sources written into one guild
/// would collide.
///
/// # Errors
///
/// Fails with [`MigrationErrorKind::Selection`] when an ID is not among
/// `owned`, nothing is selected, or `destination_guild_id` is combined with
/// more than one source guild.
pub fn plan_guilds(
    owned: &[GuildDescriptor],
    selection: &GuildSelection,
    options: &MigrationOptions,
    destination_guild_id: Option<&str>,
    partial_sync: bool,
) -> CordshiftResult<Vec<GuildPlan>> {
    let selected: Vec<&GuildDescriptor> = match selection {
        GuildSelection::All => owned.iter().collect(),
        GuildSelection::Ids(ids) => {
            let mut picked: Vec<&GuildDescriptor> = Vec::with_capacity(ids.len());
            for id in ids {
                if picked.iter().any(|g| g.id() == id) {
                    continue;
                }
                let guild = owned.iter().find(|g| g.id() == id).ok_or_else(|| {
                    rejected(format!("guild {} is not among the servers you own", id))
                })?;
                picked.push(guild);
            }
            picked
        }
    };

    if selected.is_empty() {
        return Err(rejected("no servers selected").into());
    }
    if destination_guild_id.is_some() && selected.len() > 1 {
        return Err(rejected(format!(
            "an existing destination guild takes one source guild, {} were selected",
            selected.len()
        ))
        .into());
    }

    tracing::debug!(count = selected.len(), partial_sync, "Planned guild batch");
    Ok(selected
        .into_iter()
        .map(|guild| {
            GuildPlan::builder()
                .source(guild.clone())
                .options(*options)
                .destination_guild_id(destination_guild_id.map(str::to_string))
                .partial_sync(partial_sync)
                .build()
                .expect("GuildPlan with source")
        })
        .collect())
}

#[track_caller]
fn rejected(reason: impl Into<String>) -> MigrationError {
    MigrationError::new(MigrationErrorKind::Selection(reason.into()))
}
