//! Channel stage: categories first, then leaf channels.

use crate::{ChannelTally, EntityKind, IdentityMap, StageContext};
use cordshift_core::{
    ChannelDescriptor, ChannelKind, NewChannel, OverwriteTarget, PermissionEdit,
};
use cordshift_interface::PacedOperation;
use std::collections::HashMap;

/// Bitrate given to voice channels whose source bitrate is unknown.
pub const DEFAULT_VOICE_BITRATE: u32 = 64_000;

/// Topic prefix for forum channels recreated as text channels.
pub const CONVERTED_FORUM_MARKER: &str = "Converted from forum.";

/// What to do with one non-category source channel.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LeafPlan {
    Text { topic: Option<String> },
    Voice,
    Skip,
}

/// Recreates categories and channels and copies role permission overwrites.
pub struct ChannelMigrator<'a> {
    context: StageContext<'a>,
}

impl<'a> ChannelMigrator<'a> {
    /// Stage migrator writing through `context`.
    pub fn new(context: StageContext<'a>) -> Self {
        Self { context }
    }

    /// Migrate `channels` into `destination_guild_id`.
    ///
    /// Runs two passes so that every category exists before any channel
    /// refers to it as a parent. `existing` is the destination channel list
    /// for a partial sync. Overwrites are only applied when
    /// `apply_permissions` is set, and only for roles already present in
    /// `identities`.
    #[tracing::instrument(
        skip_all,
        fields(destination_guild_id = %destination_guild_id, source_channels = channels.len())
    )]
    pub async fn migrate(
        &self,
        channels: &[ChannelDescriptor],
        destination_guild_id: &str,
        apply_permissions: bool,
        existing: Option<&[ChannelDescriptor]>,
        identities: &mut IdentityMap,
    ) -> ChannelTally {
        let sink = self.context.sink;
        sink.info("--- Migrating Channels ---");

        let mut tally = ChannelTally::default();
        let existing = existing.unwrap_or_default();

        let mut categories: Vec<&ChannelDescriptor> =
            channels.iter().filter(|c| c.is_category()).collect();
        categories.sort_by_key(|c| *c.position());
        let existing_categories: HashMap<&str, &str> = existing
            .iter()
            .filter(|c| c.is_category())
            .map(|c| (c.name().as_str(), c.id().as_str()))
            .collect();

        sink.info(&format!("Creating {} categories...", categories.len()));
        for category in categories {
            self.migrate_category(
                category,
                destination_guild_id,
                apply_permissions,
                &existing_categories,
                identities,
                &mut tally,
            )
            .await;
        }

        let mut leaves: Vec<&ChannelDescriptor> =
            channels.iter().filter(|c| !c.is_category()).collect();
        leaves.sort_by_key(|c| *c.position());
        let existing_leaves: HashMap<&str, &str> = existing
            .iter()
            .filter(|c| !c.is_category())
            .map(|c| (c.name().as_str(), c.id().as_str()))
            .collect();

        sink.info(&format!("Creating {} channels...", leaves.len()));
        for channel in leaves {
            self.migrate_leaf(
                channel,
                destination_guild_id,
                apply_permissions,
                &existing_leaves,
                identities,
                &mut tally,
            )
            .await;
        }

        sink.info(&format!(
            "✓ Migrated {} categories and {} channels ({} skipped, {} failed)",
            tally.categories.migrated(),
            tally.channels.migrated(),
            tally.channels.skipped,
            tally.categories.failed + tally.channels.failed
        ));
        tally
    }

    async fn migrate_category(
        &self,
        category: &ChannelDescriptor,
        destination_guild_id: &str,
        apply_permissions: bool,
        existing: &HashMap<&str, &str>,
        identities: &mut IdentityMap,
        tally: &mut ChannelTally,
    ) {
        let sink = self.context.sink;

        if let Some(found) = existing.get(category.name().as_str()) {
            sink.info(&format!(
                "Category '{}' already exists (ID: {}), mapping",
                category.name(),
                found
            ));
            identities.put(EntityKind::Category, category.id().as_str(), *found);
            tally.categories.matched += 1;
            if apply_permissions {
                self.apply_overwrites(category, found, identities, tally).await;
            }
            return;
        }

        sink.info(&format!("Creating category: {}", category.name()));
        let request = NewChannel::builder()
            .name(category.name().clone())
            .kind(ChannelKind::Category)
            .position(*category.position())
            .build()
            .expect("NewChannel with name and kind");

        match self
            .context
            .destination
            .create_channel(destination_guild_id, &request)
            .await
        {
            Ok(created) => {
                sink.info(&format!("  ✓ Category created with ID: {}", created.id()));
                identities.put(EntityKind::Category, category.id().as_str(), created.id().as_str());
                tally.categories.created += 1;
                if apply_permissions {
                    self.apply_overwrites(category, created.id(), identities, tally)
                        .await;
                }
                self.context.pacer.pace(PacedOperation::ChannelCreate).await;
            }
            Err(e) => {
                tracing::warn!(category = %category.name(), error = %e, "Category create failed");
                sink.warn(&format!(
                    "  Failed to create category '{}': {}",
                    category.name(),
                    e
                ));
                tally.categories.failed += 1;
            }
        }
    }

    async fn migrate_leaf(
        &self,
        channel: &ChannelDescriptor,
        destination_guild_id: &str,
        apply_permissions: bool,
        existing: &HashMap<&str, &str>,
        identities: &mut IdentityMap,
        tally: &mut ChannelTally,
    ) {
        let sink = self.context.sink;

        let plan = self.plan_leaf(channel);
        if plan == LeafPlan::Skip {
            tally.channels.skipped += 1;
            return;
        }

        if let Some(found) = existing.get(channel.name().as_str()) {
            sink.info(&format!(
                "Channel '{}' already exists (ID: {}), mapping",
                channel.name(),
                found
            ));
            identities.put(EntityKind::Channel, channel.id().as_str(), *found);
            tally.channels.matched += 1;
            if apply_permissions {
                self.apply_overwrites(channel, found, identities, tally).await;
            }
            return;
        }

        let parent_id = channel
            .parent_id()
            .as_deref()
            .and_then(|parent| identities.get(EntityKind::Category, parent))
            .map(str::to_string);

        let request = match plan {
            LeafPlan::Text { topic } => NewChannel::builder()
                .name(channel.name().clone())
                .kind(ChannelKind::Text)
                .topic(topic)
                .nsfw(Some(*channel.nsfw()))
                .position(*channel.position())
                .parent_id(parent_id)
                .build(),
            LeafPlan::Voice => NewChannel::builder()
                .name(channel.name().clone())
                .kind(ChannelKind::Voice)
                .bitrate(Some(channel.bitrate().unwrap_or(DEFAULT_VOICE_BITRATE)))
                .user_limit(Some(channel.user_limit().unwrap_or(0)))
                .position(*channel.position())
                .parent_id(parent_id)
                .build(),
            LeafPlan::Skip => return,
        }
        .expect("NewChannel with name and kind");

        sink.info(&format!(
            "Creating {} channel: {}",
            request.kind(),
            channel.name()
        ));

        match self
            .context
            .destination
            .create_channel(destination_guild_id, &request)
            .await
        {
            Ok(created) => {
                sink.info(&format!("  ✓ Channel created with ID: {}", created.id()));
                identities.put(EntityKind::Channel, channel.id().as_str(), created.id().as_str());
                tally.channels.created += 1;
                if apply_permissions {
                    self.apply_overwrites(channel, created.id(), identities, tally)
                        .await;
                }
                self.context.pacer.pace(PacedOperation::ChannelCreate).await;
            }
            Err(e) => {
                tracing::warn!(channel = %channel.name(), error = %e, "Channel create failed");
                sink.warn(&format!(
                    "  Failed to create channel '{}': {}",
                    channel.name(),
                    e
                ));
                tally.channels.failed += 1;
            }
        }
    }

    /// Type dispatch for non-category channels. Emits the notices for
    /// anything that cannot be carried over as-is.
    fn plan_leaf(&self, channel: &ChannelDescriptor) -> LeafPlan {
        let sink = self.context.sink;
        let name = channel.name();

        match channel.kind() {
            ChannelKind::Text | ChannelKind::Announcement => LeafPlan::Text {
                topic: channel.topic().clone(),
            },
            ChannelKind::Voice => LeafPlan::Voice,
            ChannelKind::Forum => {
                sink.info(&format!("Converting forum channel to text: {}", name));
                sink.unsupported(
                    "Forum channel",
                    &format!("Converted '{}' to a text channel", name),
                );
                let topic = format!(
                    "{} {}",
                    CONVERTED_FORUM_MARKER,
                    channel.topic().as_deref().unwrap_or_default()
                );
                LeafPlan::Text {
                    topic: Some(topic.trim().to_string()),
                }
            }
            ChannelKind::Stage => {
                sink.info(&format!("Skipping stage channel: {}", name));
                sink.unsupported("Stage channel", &format!("Skipped '{}'", name));
                LeafPlan::Skip
            }
            kind if kind.is_thread() => {
                sink.info(&format!("Skipping thread: {}", name));
                sink.unsupported("Thread", &format!("Skipped '{}'", name));
                LeafPlan::Skip
            }
            kind => {
                sink.info(&format!(
                    "Skipping unsupported channel type {} ({}): {}",
                    kind.code(),
                    kind,
                    name
                ));
                sink.unsupported(
                    &format!("Channel type: {}", kind.code()),
                    &format!("Skipped '{}'", name),
                );
                LeafPlan::Skip
            }
        }
    }

    /// Copy role overwrites from `source` onto `destination_channel_id`.
    ///
    /// Member overwrites and overwrites for roles that were never mapped are
    /// skipped. A rejected overwrite does not stop the rest.
    async fn apply_overwrites(
        &self,
        source: &ChannelDescriptor,
        destination_channel_id: &str,
        identities: &IdentityMap,
        tally: &mut ChannelTally,
    ) {
        let sink = self.context.sink;

        for overwrite in source.permission_overwrites() {
            if *overwrite.target() != OverwriteTarget::Role {
                tracing::debug!(target_id = %overwrite.id(), "Skipping member overwrite");
                continue;
            }
            let Some(role_id) = identities.get(EntityKind::Role, overwrite.id()) else {
                tracing::debug!(source_role = %overwrite.id(), "Skipping overwrite for unmapped role");
                continue;
            };

            let edit = PermissionEdit {
                allow: *overwrite.allow(),
                deny: *overwrite.deny(),
                target: OverwriteTarget::Role,
            };
            match self
                .context
                .destination
                .edit_channel_permission(destination_channel_id, role_id, &edit)
                .await
            {
                Ok(()) => {
                    sink.info(&format!("    Applied permission overwrite for role {}", role_id));
                    tally.overwrites_applied += 1;
                }
                Err(e) => {
                    sink.warn(&format!(
                        "    Failed to apply permission overwrite for role {} on '{}': {}",
                        role_id,
                        source.name(),
                        e
                    ));
                    tally.overwrites_failed += 1;
                }
            }
        }
    }
}

