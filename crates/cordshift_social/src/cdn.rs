//! CDN URL conventions shared by both platforms.
//!
//! Hashes starting with `a_` belong to animated assets and are served as GIF.

use cordshift_core::{EmojiDescriptor, GuildDescriptor, UserProfile};

/// Emoji are fetched at this size.
pub const EMOJI_SIZE: u32 = 128;

/// Icons, avatars and banners are fetched at the largest size.
pub const IMAGE_SIZE: u32 = 4096;

fn extension_for_hash(hash: &str) -> &'static str {
    if hash.starts_with("a_") { "gif" } else { "png" }
}

/// `{cdn}/emojis/{id}.{gif|png}?size=128`
pub fn emoji_url(cdn_base: &str, emoji: &EmojiDescriptor) -> String {
    let ext = if *emoji.animated() { "gif" } else { "png" };
    format!("{}/emojis/{}.{}?size={}", cdn_base, emoji.id(), ext, EMOJI_SIZE)
}

/// `{cdn}/icons/{guild}/{hash}.{ext}?size=4096`
pub fn guild_icon_url(cdn_base: &str, guild: &GuildDescriptor) -> Option<String> {
    guild
        .icon()
        .as_deref()
        .map(|hash| hashed_asset(cdn_base, "icons", guild.id(), hash))
}

/// `{cdn}/avatars/{user}/{hash}.{ext}?size=4096`
pub fn avatar_url(cdn_base: &str, user: &UserProfile) -> Option<String> {
    user.avatar()
        .as_deref()
        .map(|hash| hashed_asset(cdn_base, "avatars", user.id(), hash))
}

/// `{cdn}/banners/{user}/{hash}.{ext}?size=4096`
pub fn banner_url(cdn_base: &str, user: &UserProfile) -> Option<String> {
    user.banner()
        .as_deref()
        .map(|hash| hashed_asset(cdn_base, "banners", user.id(), hash))
}

fn hashed_asset(cdn_base: &str, bucket: &str, owner_id: &str, hash: &str) -> String {
    format!(
        "{}/{}/{}/{}.{}?size={}",
        cdn_base,
        bucket,
        owner_id,
        hash,
        extension_for_hash(hash),
        IMAGE_SIZE
    )
}
