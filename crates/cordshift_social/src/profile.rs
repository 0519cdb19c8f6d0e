//! Per-platform endpoint settings.

use derive_getters::Getters;

/// Where a platform lives and what to call it in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PlatformProfile {
    /// Display name, e.g. "Discord"
    name: String,
    /// REST API base URL without trailing slash
    api_base: String,
    /// CDN base URL without trailing slash
    cdn_base: String,
    /// User-Agent header value
    #[builder(default = "default_user_agent()")]
    user_agent: String,
}

fn default_user_agent() -> String {
    format!("cordshift/{}", env!("CARGO_PKG_VERSION"))
}

impl PlatformProfile {
    /// Returns a builder for constructing a PlatformProfile.
    pub fn builder() -> PlatformProfileBuilder {
        PlatformProfileBuilder::default()
    }

    /// Discord REST API v10 and its public CDN.
    pub fn discord() -> Self {
        Self {
            name: "Discord".to_string(),
            api_base: "https://discord.com/api/v10".to_string(),
            cdn_base: "https://cdn.discordapp.com".to_string(),
            user_agent: default_user_agent(),
        }
    }

    /// Fluxer REST API v1 and its CDN.
    pub fn fluxer() -> Self {
        Self {
            name: "Fluxer".to_string(),
            api_base: "https://api.fluxer.app/v1".to_string(),
            cdn_base: "https://fluxerusercontent.com".to_string(),
            user_agent: default_user_agent(),
        }
    }

    /// Same platform, different API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Same platform, different CDN base.
    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an API path such as `/guilds/1/roles`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}
