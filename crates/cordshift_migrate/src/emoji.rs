//! Emoji stage.

use crate::{StageContext, StageTally};
use cordshift_core::{EmojiDescriptor, NewEmoji};
use cordshift_interface::{AssetFetcher, GuildPlatform, PacedOperation};
use std::collections::HashSet;

/// Copies custom emoji by downloading each image and re-uploading it.
pub struct EmojiMigrator<'a> {
    context: StageContext<'a>,
    source: &'a dyn GuildPlatform,
    assets: &'a dyn AssetFetcher,
}

impl<'a> EmojiMigrator<'a> {
    /// Stage migrator reading images from `source` through `assets`.
    pub fn new(
        context: StageContext<'a>,
        source: &'a dyn GuildPlatform,
        assets: &'a dyn AssetFetcher,
    ) -> Self {
        Self {
            context,
            source,
            assets,
        }
    }

    /// Upload `emojis` to `destination_guild_id`.
    ///
    /// With `existing` set, emoji whose name is already present are counted
    /// as matched and not uploaded again.
    #[tracing::instrument(
        skip_all,
        fields(destination_guild_id = %destination_guild_id, source_emojis = emojis.len())
    )]
    pub async fn migrate(
        &self,
        emojis: &[EmojiDescriptor],
        destination_guild_id: &str,
        existing: Option<&[EmojiDescriptor]>,
    ) -> StageTally {
        let sink = self.context.sink;
        sink.info("--- Migrating Emojis ---");

        let mut tally = StageTally::default();
        if emojis.is_empty() {
            sink.info("No emojis to migrate");
        }

        let present: HashSet<&str> = existing
            .unwrap_or_default()
            .iter()
            .map(|emoji| emoji.name().as_str())
            .collect();

        for emoji in emojis {
            if present.contains(emoji.name().as_str()) {
                sink.info(&format!("Emoji '{}' already exists, skipping", emoji.name()));
                tally.matched += 1;
                continue;
            }

            let url = self.source.emoji_url(emoji);
            sink.info(&format!("Downloading emoji: {}", emoji.name()));
            let image = match self.assets.fetch_asset(&url).await {
                Ok(Some(image)) => image,
                Ok(None) => {
                    sink.warn(&format!("  Failed to download emoji '{}'", emoji.name()));
                    tally.failed += 1;
                    continue;
                }
                Err(e) => {
                    sink.warn(&format!(
                        "  Failed to download emoji '{}': {}",
                        emoji.name(),
                        e
                    ));
                    tally.failed += 1;
                    continue;
                }
            };

            let upload = NewEmoji {
                name: emoji.name().clone(),
                image,
            };
            match self
                .context
                .destination
                .create_emoji(destination_guild_id, &upload)
                .await
            {
                Ok(created) => {
                    sink.info(&format!("  ✓ Emoji uploaded with ID: {}", created.id()));
                    tally.created += 1;
                    self.context.pacer.pace(PacedOperation::EmojiUpload).await;
                }
                Err(e) => {
                    tracing::warn!(emoji = %emoji.name(), error = %e, "Emoji upload failed");
                    sink.warn(&format!(
                        "  Failed to upload emoji '{}': {}",
                        emoji.name(),
                        e
                    ));
                    tally.failed += 1;
                }
            }
        }

        sink.info(&format!(
            "✓ Migrated {} emojis ({} uploaded, {} already present, {} failed)",
            tally.migrated(),
            tally.created,
            tally.matched,
            tally.failed
        ));
        tally
    }
}
