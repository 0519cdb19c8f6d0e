//! In-memory platform with a call journal and scripted failures.

use async_trait::async_trait;
use cordshift_core::{
    ChannelDescriptor, EmojiDescriptor, GuildDescriptor, NewChannel, NewEmoji, NewGuild, NewRole,
    PermissionEdit, ProfileUpdate, RoleDescriptor, RolePosition, UserProfile,
};
use cordshift_error::{ApiError, CordshiftError, CordshiftResult, HttpError};
use cordshift_interface::{AccountPlatform, AssetFetcher, GuildPlatform};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One mutating call, as the platform received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateGuild { name: String, has_icon: bool },
    CreateRole { guild_id: String, name: String },
    ReorderRoles { guild_id: String, positions: Vec<RolePosition> },
    CreateChannel { guild_id: String, channel: NewChannel },
    EditPermission { channel_id: String, target_id: String, edit: PermissionEdit },
    CreateEmoji { guild_id: String, name: String, bytes: usize },
    ModifyUser(ProfileUpdate),
}

#[derive(Default)]
struct State {
    guilds: Vec<GuildDescriptor>,
    roles: HashMap<String, Vec<RoleDescriptor>>,
    channels: HashMap<String, Vec<ChannelDescriptor>>,
    emojis: HashMap<String, Vec<EmojiDescriptor>>,
    user: Option<UserProfile>,
    calls: Vec<Call>,
    next_id: u64,
}

/// A platform backed by plain collections.
///
/// Creates append to the collections and return generated IDs of the form
/// `{name}-{n}`. Creates whose name was passed to [`MockPlatform::fail_name`]
/// fail with a 400, and operations passed to [`MockPlatform::fail_op`] fail
/// with a 500.
pub struct MockPlatform {
    name: &'static str,
    state: Mutex<State>,
    failing_names: Mutex<HashSet<String>>,
    failing_ops: Mutex<HashSet<&'static str>>,
    ignored_fields: Mutex<HashSet<&'static str>>,
}

fn api_failure(status: u16, message: String) -> CordshiftError {
    ApiError::new(status, message).into()
}

impl MockPlatform {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State::default()),
            failing_names: Mutex::new(HashSet::new()),
            failing_ops: Mutex::new(HashSet::new()),
            ignored_fields: Mutex::new(HashSet::new()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock state lock")
    }

    fn next_id(&self) -> String {
        let mut state = self.state();
        state.next_id += 1;
        format!("{}-{}", self.name, state.next_id)
    }

    fn check_op(&self, op: &'static str) -> CordshiftResult<()> {
        if self.failing_ops.lock().expect("ops lock").contains(op) {
            return Err(api_failure(500, format!("{} unavailable", op)));
        }
        Ok(())
    }

    fn check_name(&self, name: &str) -> CordshiftResult<()> {
        if self.failing_names.lock().expect("names lock").contains(name) {
            return Err(api_failure(400, format!("Invalid Form Body: {}", name)));
        }
        Ok(())
    }

    /// Make every create call for `name` fail.
    pub fn fail_name(&self, name: &str) {
        self.failing_names
            .lock()
            .expect("names lock")
            .insert(name.to_string());
    }

    /// Make one operation fail, e.g. `"reorder_roles"` or `"get_channels"`.
    pub fn fail_op(&self, op: &'static str) {
        self.failing_ops.lock().expect("ops lock").insert(op);
    }

    /// Accept updates to `field` but keep reporting the old value.
    pub fn ignore_field(&self, field: &'static str) {
        self.ignored_fields.lock().expect("fields lock").insert(field);
    }

    pub fn with_guild(&self, guild: GuildDescriptor) {
        self.state().guilds.push(guild);
    }

    pub fn add_role(&self, guild_id: &str, role: RoleDescriptor) {
        self.state()
            .roles
            .entry(guild_id.to_string())
            .or_default()
            .push(role);
    }

    pub fn add_channel(&self, guild_id: &str, channel: ChannelDescriptor) {
        self.state()
            .channels
            .entry(guild_id.to_string())
            .or_default()
            .push(channel);
    }

    pub fn add_emoji(&self, guild_id: &str, emoji: EmojiDescriptor) {
        self.state()
            .emojis
            .entry(guild_id.to_string())
            .or_default()
            .push(emoji);
    }

    pub fn set_user(&self, user: UserProfile) {
        self.state().user = Some(user);
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state().user.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn guilds(&self) -> Vec<GuildDescriptor> {
        self.state().guilds.clone()
    }

    pub fn roles_in(&self, guild_id: &str) -> Vec<RoleDescriptor> {
        self.state().roles.get(guild_id).cloned().unwrap_or_default()
    }

    pub fn channels_in(&self, guild_id: &str) -> Vec<ChannelDescriptor> {
        self.state()
            .channels
            .get(guild_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn emojis_in(&self, guild_id: &str) -> Vec<EmojiDescriptor> {
        self.state().emojis.get(guild_id).cloned().unwrap_or_default()
    }

    pub fn created_role_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateRole { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn created_channels(&self) -> Vec<NewChannel> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateChannel { channel, .. } => Some(channel),
                _ => None,
            })
            .collect()
    }

    pub fn reorders(&self) -> Vec<Vec<RolePosition>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ReorderRoles { positions, .. } => Some(positions),
                _ => None,
            })
            .collect()
    }

    pub fn permission_edits(&self) -> Vec<(String, String, PermissionEdit)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::EditPermission {
                    channel_id,
                    target_id,
                    edit,
                } => Some((channel_id, target_id, edit)),
                _ => None,
            })
            .collect()
    }

    pub fn profile_updates(&self) -> Vec<ProfileUpdate> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ModifyUser(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

#[async_trait]
impl GuildPlatform for MockPlatform {
    fn platform_name(&self) -> &str {
        self.name
    }

    async fn get_guild(&self, guild_id: &str) -> CordshiftResult<GuildDescriptor> {
        self.check_op("get_guild")?;
        self.state()
            .guilds
            .iter()
            .find(|g| g.id() == guild_id)
            .cloned()
            .ok_or_else(|| api_failure(404, "Unknown Guild".to_string()))
    }

    async fn create_guild(&self, guild: &NewGuild) -> CordshiftResult<GuildDescriptor> {
        self.record(Call::CreateGuild {
            name: guild.name.clone(),
            has_icon: guild.icon.is_some(),
        });
        self.check_op("create_guild")?;
        self.check_name(&guild.name)?;

        let id = self.next_id();
        let created = GuildDescriptor::builder()
            .id(id.clone())
            .name(guild.name.clone())
            .owner(true)
            .build()
            .expect("Valid guild");
        self.with_guild(created.clone());
        // New guilds come with a default role sharing the guild's ID.
        self.add_role(
            &id,
            RoleDescriptor::builder()
                .id(id.clone())
                .name("@everyone")
                .build()
                .expect("Valid role"),
        );
        Ok(created)
    }

    async fn get_roles(&self, guild_id: &str) -> CordshiftResult<Vec<RoleDescriptor>> {
        self.check_op("get_roles")?;
        Ok(self.roles_in(guild_id))
    }

    async fn create_role(&self, guild_id: &str, role: &NewRole) -> CordshiftResult<RoleDescriptor> {
        self.record(Call::CreateRole {
            guild_id: guild_id.to_string(),
            name: role.name().clone(),
        });
        self.check_op("create_role")?;
        self.check_name(role.name())?;

        let created = RoleDescriptor::builder()
            .id(self.next_id())
            .name(role.name().clone())
            .permissions(*role.permissions())
            .color(*role.color())
            .hoist(*role.hoist())
            .mentionable(*role.mentionable())
            .position(1)
            .build()
            .expect("Valid role");
        self.add_role(guild_id, created.clone());
        Ok(created)
    }

    async fn reorder_roles(&self, guild_id: &str, positions: &[RolePosition]) -> CordshiftResult<()> {
        self.record(Call::ReorderRoles {
            guild_id: guild_id.to_string(),
            positions: positions.to_vec(),
        });
        self.check_op("reorder_roles")
    }

    async fn get_channels(&self, guild_id: &str) -> CordshiftResult<Vec<ChannelDescriptor>> {
        self.check_op("get_channels")?;
        Ok(self.channels_in(guild_id))
    }

    async fn create_channel(
        &self,
        guild_id: &str,
        channel: &NewChannel,
    ) -> CordshiftResult<ChannelDescriptor> {
        self.record(Call::CreateChannel {
            guild_id: guild_id.to_string(),
            channel: channel.clone(),
        });
        self.check_op("create_channel")?;
        self.check_name(channel.name())?;

        let created = ChannelDescriptor::builder()
            .id(self.next_id())
            .name(channel.name().clone())
            .kind(*channel.kind())
            .parent_id(channel.parent_id().clone())
            .position(*channel.position())
            .topic(channel.topic().clone())
            .nsfw(channel.nsfw().unwrap_or(false))
            .bitrate(*channel.bitrate())
            .user_limit(*channel.user_limit())
            .build()
            .expect("Valid channel");
        self.add_channel(guild_id, created.clone());
        Ok(created)
    }

    async fn edit_channel_permission(
        &self,
        channel_id: &str,
        target_id: &str,
        edit: &PermissionEdit,
    ) -> CordshiftResult<()> {
        self.record(Call::EditPermission {
            channel_id: channel_id.to_string(),
            target_id: target_id.to_string(),
            edit: *edit,
        });
        self.check_op("edit_channel_permission")?;
        if self.failing_names.lock().expect("names lock").contains(target_id) {
            return Err(api_failure(403, "Missing Permissions".to_string()));
        }
        Ok(())
    }

    async fn get_emojis(&self, guild_id: &str) -> CordshiftResult<Vec<EmojiDescriptor>> {
        self.check_op("get_emojis")?;
        Ok(self.emojis_in(guild_id))
    }

    async fn create_emoji(&self, guild_id: &str, emoji: &NewEmoji) -> CordshiftResult<EmojiDescriptor> {
        self.record(Call::CreateEmoji {
            guild_id: guild_id.to_string(),
            name: emoji.name.clone(),
            bytes: emoji.image.len(),
        });
        self.check_op("create_emoji")?;
        self.check_name(&emoji.name)?;

        let created = EmojiDescriptor::builder()
            .id(self.next_id())
            .name(emoji.name.clone())
            .build()
            .expect("Valid emoji");
        self.add_emoji(guild_id, created.clone());
        Ok(created)
    }

    fn emoji_url(&self, emoji: &EmojiDescriptor) -> String {
        let ext = if *emoji.animated() { "gif" } else { "png" };
        format!("https://cdn.{}.test/emojis/{}.{}", self.name, emoji.id(), ext)
    }

    fn guild_icon_url(&self, guild: &GuildDescriptor) -> Option<String> {
        guild
            .icon()
            .as_ref()
            .map(|hash| format!("https://cdn.{}.test/icons/{}/{}.png", self.name, guild.id(), hash))
    }
}

#[async_trait]
impl AccountPlatform for MockPlatform {
    async fn current_user(&self) -> CordshiftResult<UserProfile> {
        self.check_op("current_user")?;
        self.user()
            .ok_or_else(|| api_failure(401, "Unauthorized".to_string()))
    }

    async fn current_user_guilds(&self) -> CordshiftResult<Vec<GuildDescriptor>> {
        self.check_op("current_user_guilds")?;
        Ok(self.guilds())
    }

    async fn modify_current_user(&self, update: &ProfileUpdate) -> CordshiftResult<UserProfile> {
        self.record(Call::ModifyUser(update.clone()));
        self.check_op("modify_current_user")?;
        if update.banner.is_some() {
            self.check_op("banner")?;
        }

        let current = self
            .user()
            .ok_or_else(|| api_failure(401, "Unauthorized".to_string()))?;
        let ignored = self.ignored_fields.lock().expect("fields lock").clone();
        let pick = |field: &'static str, new: &Option<String>, old: &Option<String>| {
            if ignored.contains(field) {
                old.clone()
            } else {
                new.clone().or_else(|| old.clone())
            }
        };

        let updated = UserProfile::builder()
            .id(current.id().clone())
            .username(current.username().clone())
            .global_name(pick("global_name", &update.global_name, current.global_name()))
            .bio(pick("bio", &update.bio, current.bio()))
            .pronouns(pick("pronouns", &update.pronouns, current.pronouns()))
            .accent_color(if ignored.contains("accent_color") {
                *current.accent_color()
            } else {
                update.accent_color.or(*current.accent_color())
            })
            .avatar(match update.avatar {
                Some(_) => Some("uploaded-avatar".to_string()),
                None => current.avatar().clone(),
            })
            .banner(match update.banner {
                Some(_) => Some("uploaded-banner".to_string()),
                None => current.banner().clone(),
            })
            .theme_colors(current.theme_colors().clone())
            .build()
            .expect("Valid profile");
        self.set_user(updated.clone());
        Ok(updated)
    }

    fn avatar_url(&self, user: &UserProfile) -> Option<String> {
        user.avatar()
            .as_ref()
            .map(|hash| format!("https://cdn.{}.test/avatars/{}/{}.png", self.name, user.id(), hash))
    }

    fn banner_url(&self, user: &UserProfile) -> Option<String> {
        user.banner()
            .as_ref()
            .map(|hash| format!("https://cdn.{}.test/banners/{}/{}.png", self.name, user.id(), hash))
    }
}

/// Serves a fixed image for every URL except those marked missing or broken.
#[derive(Default)]
pub struct MockAssets {
    image: Vec<u8>,
    missing: Mutex<HashSet<String>>,
    broken: Mutex<HashSet<String>>,
    fetched: Mutex<Vec<String>>,
}

impl MockAssets {
    pub fn serving_everything() -> Self {
        Self {
            image: b"\x89PNG\r\n\x1a\nfake".to_vec(),
            ..Self::default()
        }
    }

    /// Answer `url` with a 404.
    pub fn missing(&self, url: &str) {
        self.missing.lock().expect("assets lock").insert(url.to_string());
    }

    /// Fail the transport for `url`.
    pub fn broken(&self, url: &str) {
        self.broken.lock().expect("assets lock").insert(url.to_string());
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("assets lock").clone()
    }
}

#[async_trait]
impl AssetFetcher for MockAssets {
    async fn fetch_asset(&self, url: &str) -> CordshiftResult<Option<Vec<u8>>> {
        self.fetched.lock().expect("assets lock").push(url.to_string());
        if self.broken.lock().expect("assets lock").contains(url) {
            return Err(HttpError::new("GET", url, "connection reset").into());
        }
        if self.missing.lock().expect("assets lock").contains(url) {
            return Ok(None);
        }
        Ok(Some(self.image.clone()))
    }
}
