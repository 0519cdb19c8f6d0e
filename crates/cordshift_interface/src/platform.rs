//! Platform client traits.

use async_trait::async_trait;
use cordshift_core::{
    ChannelDescriptor, EmojiDescriptor, GuildDescriptor, NewChannel, NewEmoji, NewGuild, NewRole,
    PermissionEdit, ProfileUpdate, RoleDescriptor, RolePosition, UserProfile,
};
use cordshift_error::CordshiftResult;

/// Guild-scoped operations needed on both the source and the destination.
///
/// Authentication, pagination and transport are the implementor's concern.
/// Every call may fail with a transport or API error.
#[async_trait]
pub trait GuildPlatform: Send + Sync {
    /// Short platform name for log lines.
    fn platform_name(&self) -> &str;

    /// Fetch one guild.
    async fn get_guild(&self, guild_id: &str) -> CordshiftResult<GuildDescriptor>;

    /// Create a guild owned by the current user.
    async fn create_guild(&self, guild: &NewGuild) -> CordshiftResult<GuildDescriptor>;

    /// List a guild's roles.
    async fn get_roles(&self, guild_id: &str) -> CordshiftResult<Vec<RoleDescriptor>>;

    /// Create a role.
    async fn create_role(&self, guild_id: &str, role: &NewRole)
    -> CordshiftResult<RoleDescriptor>;

    /// Bulk-update role positions.
    async fn reorder_roles(&self, guild_id: &str, positions: &[RolePosition])
    -> CordshiftResult<()>;

    /// List a guild's channels, categories included.
    async fn get_channels(&self, guild_id: &str) -> CordshiftResult<Vec<ChannelDescriptor>>;

    /// Create a channel or category.
    async fn create_channel(
        &self,
        guild_id: &str,
        channel: &NewChannel,
    ) -> CordshiftResult<ChannelDescriptor>;

    /// Create or replace one permission overwrite on a channel.
    async fn edit_channel_permission(
        &self,
        channel_id: &str,
        target_id: &str,
        edit: &PermissionEdit,
    ) -> CordshiftResult<()>;

    /// List a guild's custom emoji.
    async fn get_emojis(&self, guild_id: &str) -> CordshiftResult<Vec<EmojiDescriptor>>;

    /// Upload a custom emoji.
    async fn create_emoji(
        &self,
        guild_id: &str,
        emoji: &NewEmoji,
    ) -> CordshiftResult<EmojiDescriptor>;

    /// Where this platform serves the emoji image (GIF when animated, PNG otherwise).
    fn emoji_url(&self, emoji: &EmojiDescriptor) -> String;

    /// Where this platform serves the guild icon, if the guild has one.
    fn guild_icon_url(&self, guild: &GuildDescriptor) -> Option<String>;
}

/// Operations on the authenticated user's own account.
#[async_trait]
pub trait AccountPlatform: Send + Sync {
    /// The authenticated user, with profile fields when available.
    async fn current_user(&self) -> CordshiftResult<UserProfile>;

    /// Guilds the user is a member of.
    async fn current_user_guilds(&self) -> CordshiftResult<Vec<GuildDescriptor>>;

    /// Update profile fields. Returns the profile as the platform now reports it.
    async fn modify_current_user(&self, update: &ProfileUpdate) -> CordshiftResult<UserProfile>;

    /// Where this platform serves the user's avatar.
    fn avatar_url(&self, user: &UserProfile) -> Option<String>;

    /// Where this platform serves the user's banner.
    fn banner_url(&self, user: &UserProfile) -> Option<String>;
}
