//! Account profile migration.

use cordshift_core::{ProfileUpdate, UserProfile};
use cordshift_error::CordshiftResult;
use cordshift_interface::{AccountPlatform, AssetFetcher, MigrationSink};
use std::sync::Arc;

/// Which source theme colour becomes the destination accent colour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ColorChoice {
    /// First theme colour
    #[default]
    Primary,
    /// Second theme colour, falling back to the first
    Secondary,
}

impl ColorChoice {
    /// Pick from a source theme colour list.
    pub fn pick(self, colors: &[u32]) -> Option<u32> {
        match self {
            ColorChoice::Primary => colors.first().copied(),
            ColorChoice::Secondary => colors.get(1).or_else(|| colors.first()).copied(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum ProfileImage {
    Avatar,
    Banner,
}

/// What a profile run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileReport {
    /// Avatar uploaded
    pub avatar_updated: bool,
    /// Banner uploaded
    pub banner_updated: bool,
    /// Text fields the destination confirmed
    pub fields_updated: Vec<&'static str>,
    /// Text fields the destination accepted but reported with another value
    pub fields_mismatched: Vec<&'static str>,
}

/// Copies avatar, banner, display name, bio, pronouns and accent colour.
#[derive(derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct ProfileMigrator {
    /// Account read from
    source: Arc<dyn AccountPlatform>,
    /// Account written to
    destination: Arc<dyn AccountPlatform>,
    /// Downloads avatar and banner images
    assets: Arc<dyn AssetFetcher>,
    /// Receives progress lines and notices
    sink: Arc<dyn MigrationSink>,
    /// Theme colour to carry over
    #[builder(default)]
    color_choice: ColorChoice,
}

impl ProfileMigrator {
    /// Returns a builder for constructing a ProfileMigrator.
    pub fn builder() -> ProfileMigratorBuilder {
        ProfileMigratorBuilder::default()
    }

    /// Run the profile migration and report whether it completed.
    pub async fn migrate(&self) -> bool {
        match self.run().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "Profile migration failed");
                self.sink.error(&format!("Profile migration failed: {}", e));
                false
            }
        }
    }

    /// Run the profile migration.
    ///
    /// Image uploads and the field update are each allowed to fail without
    /// failing the run.
    ///
    /// # Errors
    ///
    /// Fails when either current user cannot be read.
    #[tracing::instrument(skip(self), fields(color_choice = %self.color_choice))]
    pub async fn run(&self) -> CordshiftResult<ProfileReport> {
        let sink = self.sink.as_ref();
        sink.info("=== Migrating Profile ===");

        let source_user = self.source.current_user().await?;
        let destination_user = self.destination.current_user().await?;
        sink.info(&format!("Current destination user: {}", destination_user.username()));

        let mut report = ProfileReport::default();
        let accent_color = self.choose_color(&source_user, &destination_user);

        if let Some(url) = self.source.avatar_url(&source_user) {
            report.avatar_updated = self.upload_image(ProfileImage::Avatar, &url).await;
        }
        if let Some(url) = self.source.banner_url(&source_user) {
            report.banner_updated = self.upload_image(ProfileImage::Banner, &url).await;
        }

        let update = text_update(&source_user, &destination_user, accent_color);
        sink.info(&format!(
            "Display name check: source='{}' vs destination='{}'",
            source_user.global_name().as_deref().unwrap_or_default(),
            destination_user.global_name().as_deref().unwrap_or_default()
        ));

        if update.is_empty() {
            sink.info("All profile fields already match - no updates needed");
        } else {
            let fields = update.field_names();
            sink.info(&format!("Updating {} profile fields...", fields.len()));
            match self.destination.modify_current_user(&update).await {
                Ok(result) => {
                    for field in fields {
                        if field_matches(field, &update, &result) {
                            sink.info(&format!("  ✓ {} updated", field));
                            report.fields_updated.push(field);
                        } else {
                            sink.warn(&format!(
                                "  ⚠ {}: accepted but the destination reports a different value",
                                field
                            ));
                            report.fields_mismatched.push(field);
                        }
                    }
                }
                Err(e) => {
                    sink.error(&format!("Failed to update profile fields: {}", e));
                }
            }
        }

        sink.info("✓ Profile migration complete");
        Ok(report)
    }

    fn choose_color(&self, source: &UserProfile, destination: &UserProfile) -> Option<u32> {
        let colors = source.theme_colors().as_deref().unwrap_or_default();
        if colors.is_empty() {
            return None;
        }

        let sink = self.sink.as_ref();
        sink.info(&format!("Source has {} profile colors:", colors.len()));
        for (index, color) in colors.iter().enumerate() {
            sink.info(&format!("  Color {}: #{:06x}", index + 1, color));
        }
        match destination.accent_color() {
            Some(current) => sink.info(&format!("  Current destination color: #{:06x}", current)),
            None => sink.info("  Current destination color: None"),
        }

        let chosen = self.color_choice.pick(colors);
        if let Some(color) = chosen {
            sink.info(&format!("  → Using {} color #{:06x}", self.color_choice, color));
        }
        chosen
    }

    /// Download one image and upload it on its own update call.
    async fn upload_image(&self, kind: ProfileImage, url: &str) -> bool {
        let sink = self.sink.as_ref();
        sink.info(&format!("Downloading {}...", kind));

        let image = match self.assets.fetch_asset(url).await {
            Ok(Some(image)) => image,
            Ok(None) => {
                sink.warn(&format!("Failed to download {}", kind));
                return false;
            }
            Err(e) => {
                sink.warn(&format!("Failed to download {}: {}", kind, e));
                return false;
            }
        };

        let update = match kind {
            ProfileImage::Avatar => ProfileUpdate {
                avatar: Some(image),
                ..ProfileUpdate::default()
            },
            ProfileImage::Banner => ProfileUpdate {
                banner: Some(image),
                ..ProfileUpdate::default()
            },
        };

        sink.info(&format!("Uploading {}...", kind));
        match self.destination.modify_current_user(&update).await {
            Ok(_) => {
                sink.info(&format!("✓ {:?} updated", kind));
                true
            }
            Err(e) => {
                sink.warn(&format!("Failed to upload {}: {}", kind, e));
                if kind == ProfileImage::Banner {
                    sink.unsupported("Banner", "Destination may not support banners yet");
                }
                false
            }
        }
    }
}

/// Text and colour fields that differ between the two accounts.
fn text_update(
    source: &UserProfile,
    destination: &UserProfile,
    accent_color: Option<u32>,
) -> ProfileUpdate {
    fn changed(from: &Option<String>, to: &Option<String>) -> Option<String> {
        match from {
            Some(value) if !value.is_empty() && Some(value) != to.as_ref() => Some(value.clone()),
            _ => None,
        }
    }

    ProfileUpdate {
        global_name: changed(source.global_name(), destination.global_name()),
        bio: changed(source.bio(), destination.bio()),
        pronouns: changed(source.pronouns(), destination.pronouns()),
        accent_color: accent_color.filter(|color| Some(*color) != *destination.accent_color()),
        avatar: None,
        banner: None,
    }
}

fn field_matches(field: &str, sent: &ProfileUpdate, result: &UserProfile) -> bool {
    match field {
        "global_name" => sent.global_name == *result.global_name(),
        "bio" => sent.bio == *result.bio(),
        "pronouns" => sent.pronouns == *result.pronouns(),
        "accent_color" => sent.accent_color == *result.accent_color(),
        _ => true,
    }
}
