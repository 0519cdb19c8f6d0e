//! REST client shared by both platforms.

use crate::payload::{data_uri, merge_user_profile, profile_update_body};
use crate::{PlatformProfile, cdn};
use async_trait::async_trait;
use cordshift_core::{
    ChannelDescriptor, EmojiDescriptor, GuildDescriptor, NewChannel, NewEmoji, NewGuild, NewRole,
    PermissionEdit, ProfileUpdate, RoleDescriptor, RolePosition, UserProfile,
};
use cordshift_error::{ApiError, ConfigError, CordshiftResult, HttpError, JsonError};
use cordshift_interface::{AccountPlatform, GuildPlatform};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, error, instrument};

/// Authenticated REST client for one platform account.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    profile: PlatformProfile,
}

impl RestClient {
    /// Creates a client that authenticates every request with `token`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token cannot be sent as a header
    /// or the HTTP client cannot be built.
    #[instrument(skip(token), fields(platform = %profile.name()))]
    pub fn new(token: &str, profile: PlatformProfile) -> CordshiftResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(token).map_err(|e| {
            ConfigError::for_setting(
                format!("{}_token", profile.name().to_lowercase()),
                format!("not a valid header value: {}", e),
            )
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(profile.user_agent())
                .map_err(|e| ConfigError::new(format!("Invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!(api_base = %profile.api_base(), "Created REST client");
        Ok(Self { client, profile })
    }

    /// The platform this client talks to.
    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    /// Send a request and return the raw response body.
    async fn send(&self, method: Method, path: &str, body: Option<JsonValue>) -> CordshiftResult<String> {
        let url = self.profile.endpoint(path);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            error!(platform = %self.profile.name(), error = ?e, "HTTP request failed");
            HttpError::from_reqwest(method.as_str(), &url, &e)
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::from_reqwest(method.as_str(), &url, &e))?;

        if status.is_success() {
            return Ok(text);
        }

        error!(platform = %self.profile.name(), status = %status, body = %text, "API error");
        let message = match status {
            StatusCode::UNAUTHORIZED => {
                format!("{} token is invalid or expired", self.profile.name())
            }
            StatusCode::FORBIDDEN => format!(
                "{} token doesn't have permission for this action: {}",
                self.profile.name(),
                text
            ),
            _ => text,
        };
        Err(ApiError::new(status.as_u16(), message).into())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> CordshiftResult<T> {
        let text = self.send(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| JsonError::from(e).into())
    }

    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> CordshiftResult<()> {
        self.send(method, path, body).await.map(|_| ())
    }

    fn to_body<T: serde::Serialize>(value: &T) -> CordshiftResult<JsonValue> {
        serde_json::to_value(value).map_err(|e| JsonError::from(e).into())
    }
}

#[async_trait]
impl GuildPlatform for RestClient {
    fn platform_name(&self) -> &str {
        self.profile.name()
    }

    #[instrument(skip(self))]
    async fn get_guild(&self, guild_id: &str) -> CordshiftResult<GuildDescriptor> {
        self.request(Method::GET, &format!("/guilds/{}", guild_id), None)
            .await
    }

    #[instrument(skip(self, guild), fields(name = %guild.name))]
    async fn create_guild(&self, guild: &NewGuild) -> CordshiftResult<GuildDescriptor> {
        let body = json!({
            "name": guild.name,
            "icon": guild.icon.as_deref().map(data_uri),
        });
        self.request(Method::POST, "/guilds", Some(body)).await
    }

    #[instrument(skip(self))]
    async fn get_roles(&self, guild_id: &str) -> CordshiftResult<Vec<RoleDescriptor>> {
        self.request(Method::GET, &format!("/guilds/{}/roles", guild_id), None)
            .await
    }

    #[instrument(skip(self, role), fields(name = %role.name()))]
    async fn create_role(
        &self,
        guild_id: &str,
        role: &NewRole,
    ) -> CordshiftResult<RoleDescriptor> {
        let body = Self::to_body(role)?;
        self.request(
            Method::POST,
            &format!("/guilds/{}/roles", guild_id),
            Some(body),
        )
        .await
    }

    #[instrument(skip(self, positions), fields(count = positions.len()))]
    async fn reorder_roles(
        &self,
        guild_id: &str,
        positions: &[RolePosition],
    ) -> CordshiftResult<()> {
        let body = Self::to_body(&positions)?;
        self.request_empty(
            Method::PATCH,
            &format!("/guilds/{}/roles", guild_id),
            Some(body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_channels(&self, guild_id: &str) -> CordshiftResult<Vec<ChannelDescriptor>> {
        self.request(Method::GET, &format!("/guilds/{}/channels", guild_id), None)
            .await
    }

    #[instrument(skip(self, channel), fields(name = %channel.name(), kind = %channel.kind()))]
    async fn create_channel(
        &self,
        guild_id: &str,
        channel: &NewChannel,
    ) -> CordshiftResult<ChannelDescriptor> {
        let body = Self::to_body(channel)?;
        self.request(
            Method::POST,
            &format!("/guilds/{}/channels", guild_id),
            Some(body),
        )
        .await
    }

    #[instrument(skip(self, edit))]
    async fn edit_channel_permission(
        &self,
        channel_id: &str,
        target_id: &str,
        edit: &PermissionEdit,
    ) -> CordshiftResult<()> {
        let body = Self::to_body(edit)?;
        self.request_empty(
            Method::PUT,
            &format!("/channels/{}/permissions/{}", channel_id, target_id),
            Some(body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_emojis(&self, guild_id: &str) -> CordshiftResult<Vec<EmojiDescriptor>> {
        self.request(Method::GET, &format!("/guilds/{}/emojis", guild_id), None)
            .await
    }

    #[instrument(skip(self, emoji), fields(name = %emoji.name))]
    async fn create_emoji(
        &self,
        guild_id: &str,
        emoji: &NewEmoji,
    ) -> CordshiftResult<EmojiDescriptor> {
        let body = json!({
            "name": emoji.name,
            "image": data_uri(&emoji.image),
        });
        self.request(
            Method::POST,
            &format!("/guilds/{}/emojis", guild_id),
            Some(body),
        )
        .await
    }

    fn emoji_url(&self, emoji: &EmojiDescriptor) -> String {
        cdn::emoji_url(self.profile.cdn_base(), emoji)
    }

    fn guild_icon_url(&self, guild: &GuildDescriptor) -> Option<String> {
        cdn::guild_icon_url(self.profile.cdn_base(), guild)
    }
}

#[async_trait]
impl AccountPlatform for RestClient {
    #[instrument(skip(self))]
    async fn current_user(&self) -> CordshiftResult<UserProfile> {
        let mut user: JsonValue = self.request(Method::GET, "/users/@me", None).await?;

        // Bio, pronouns and theme colours only come back from the profile endpoint.
        if let Some(id) = user.get("id").and_then(JsonValue::as_str).map(str::to_owned) {
            match self
                .request::<JsonValue>(Method::GET, &format!("/users/{}/profile", id), None)
                .await
            {
                Ok(profile) => merge_user_profile(&mut user, &profile),
                Err(e) => debug!(error = %e, "Profile endpoint unavailable"),
            }
        }

        serde_json::from_value(user).map_err(|e| JsonError::from(e).into())
    }

    #[instrument(skip(self))]
    async fn current_user_guilds(&self) -> CordshiftResult<Vec<GuildDescriptor>> {
        self.request(Method::GET, "/users/@me/guilds?with_counts=true", None)
            .await
    }

    #[instrument(skip(self, update), fields(fields = ?update.field_names()))]
    async fn modify_current_user(&self, update: &ProfileUpdate) -> CordshiftResult<UserProfile> {
        self.request(
            Method::PATCH,
            "/users/@me",
            Some(profile_update_body(update)),
        )
        .await
    }

    fn avatar_url(&self, user: &UserProfile) -> Option<String> {
        cdn::avatar_url(self.profile.cdn_base(), user)
    }

    fn banner_url(&self, user: &UserProfile) -> Option<String> {
        cdn::banner_url(self.profile.cdn_base(), user)
    }
}
