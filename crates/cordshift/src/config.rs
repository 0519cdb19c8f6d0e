//! Settings loading.

use cordshift_error::{ConfigError, CordshiftResult};
use cordshift_rate_limit::PacingConfig;
use cordshift_social::{PlatformProfile, clean_token};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shortest source token accepted after cleaning.
pub const MIN_SOURCE_TOKEN_LEN: usize = 20;

/// Default settings file name, looked up in the working directory first.
const CONFIG_FILE_NAME: &str = "cordshift.toml";

/// Environment variable prefix, e.g. `CORDSHIFT_DISCORD_TOKEN`.
const ENV_PREFIX: &str = "CORDSHIFT";

/// Runtime settings.
///
/// Sources, lowest precedence first: built-in defaults, the TOML settings
/// file, then `CORDSHIFT_*` environment variables. Nested tables use a
/// double underscore, e.g. `CORDSHIFT_PACING__ROLE_CREATE_MS`.
#[derive(Clone, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CordshiftConfig {
    /// Discord user token
    #[serde(default)]
    #[builder(default)]
    discord_token: String,
    /// Fluxer user token
    #[serde(default)]
    #[builder(default)]
    fluxer_token: String,
    /// Discord REST base URL
    #[serde(default = "default_discord_api_base")]
    #[builder(default = "default_discord_api_base()")]
    discord_api_base: String,
    /// Fluxer REST base URL
    #[serde(default = "default_fluxer_api_base")]
    #[builder(default = "default_fluxer_api_base()")]
    fluxer_api_base: String,
    /// Discord CDN base URL
    #[serde(default = "default_discord_cdn_base")]
    #[builder(default = "default_discord_cdn_base()")]
    discord_cdn_base: String,
    /// Fluxer CDN base URL
    #[serde(default = "default_fluxer_cdn_base")]
    #[builder(default = "default_fluxer_cdn_base()")]
    fluxer_cdn_base: String,
    /// Where run logs are written
    #[serde(default = "default_log_dir")]
    #[builder(default = "default_log_dir()")]
    log_dir: PathBuf,
    /// Pause lengths after mutating calls
    #[serde(default)]
    #[builder(default)]
    pacing: PacingConfig,
}

fn default_discord_api_base() -> String {
    PlatformProfile::discord().api_base().clone()
}

fn default_fluxer_api_base() -> String {
    PlatformProfile::fluxer().api_base().clone()
}

fn default_discord_cdn_base() -> String {
    PlatformProfile::discord().cdn_base().clone()
}

fn default_fluxer_cdn_base() -> String {
    PlatformProfile::fluxer().cdn_base().clone()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl std::fmt::Debug for CordshiftConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |token: &str| if token.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("CordshiftConfig")
            .field("discord_token", &redact(&self.discord_token))
            .field("fluxer_token", &redact(&self.fluxer_token))
            .field("discord_api_base", &self.discord_api_base)
            .field("fluxer_api_base", &self.fluxer_api_base)
            .field("discord_cdn_base", &self.discord_cdn_base)
            .field("fluxer_cdn_base", &self.fluxer_cdn_base)
            .field("log_dir", &self.log_dir)
            .field("pacing", &self.pacing)
            .finish()
    }
}

impl CordshiftConfig {
    /// Returns a builder for constructing a CordshiftConfig.
    pub fn builder() -> CordshiftConfigBuilder {
        CordshiftConfigBuilder::default()
    }

    /// Load settings from `.env`, the settings file and the environment.
    ///
    /// With `path` set the file must exist. Without it, `cordshift.toml` in
    /// the working directory is tried, then the user config directory
    /// (`~/.config/cordshift/cordshift.toml` on Linux); a missing default
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> CordshiftResult<Self> {
        // A missing .env is normal.
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "Loaded .env");
        }
        Self::load_from(path, ENV_PREFIX)
    }

    /// Like [`CordshiftConfig::load`] without `.env`, with a custom
    /// environment prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type.
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> CordshiftResult<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (default_config_path(), false),
        };
        tracing::debug!(file = %file.display(), required, "Reading settings");

        let settings = config::Config::builder()
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| settings_error("Failed to read settings", e))?;

        let loaded: Self = settings
            .try_deserialize()
            .map_err(|e| settings_error("Invalid settings", e))?;
        tracing::info!(config = ?loaded, "Settings loaded");
        Ok(loaded)
    }

    /// Parse settings from a TOML string, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed TOML or mistyped values.
    pub fn from_toml(contents: &str) -> CordshiftResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()
            .map_err(|e| settings_error("Failed to read settings", e))?;
        let parsed: Self = settings
            .try_deserialize()
            .map_err(|e| settings_error("Invalid settings", e))?;
        Ok(parsed)
    }

    /// The cleaned Discord token.
    ///
    /// # Errors
    ///
    /// Fails when the cleaned token is shorter than
    /// [`MIN_SOURCE_TOKEN_LEN`], which usually means only part of the
    /// Authorization header was copied.
    pub fn source_token(&self) -> CordshiftResult<String> {
        let token = clean_token(&self.discord_token);
        if token.len() < MIN_SOURCE_TOKEN_LEN {
            return Err(ConfigError::for_setting(
                "discord_token",
                "appears to be too short or empty. Copy the entire value of the Authorization header.",
            )
            .into());
        }
        Ok(token)
    }

    /// The cleaned Fluxer token.
    ///
    /// # Errors
    ///
    /// Fails when no token is configured.
    pub fn destination_token(&self) -> CordshiftResult<String> {
        let token = clean_token(&self.fluxer_token);
        if token.is_empty() {
            return Err(ConfigError::for_setting("fluxer_token", "is not set").into());
        }
        Ok(token)
    }

    /// Discord endpoints with any configured overrides applied.
    pub fn discord_profile(&self) -> PlatformProfile {
        PlatformProfile::discord()
            .with_api_base(self.discord_api_base.as_str())
            .with_cdn_base(self.discord_cdn_base.as_str())
    }

    /// Fluxer endpoints with any configured overrides applied.
    pub fn fluxer_profile(&self) -> PlatformProfile {
        PlatformProfile::fluxer()
            .with_api_base(self.fluxer_api_base.as_str())
            .with_cdn_base(self.fluxer_cdn_base.as_str())
    }
}

/// Keep the offending key when the `config` crate reports one.
#[track_caller]
fn settings_error(context: &str, err: config::ConfigError) -> ConfigError {
    match &err {
        config::ConfigError::Type { key: Some(key), .. } | config::ConfigError::NotFound(key) => {
            ConfigError::for_setting(key.clone(), format!("{}: {}", context, err))
        }
        _ => ConfigError::new(format!("{}: {}", context, err)),
    }
}

fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("cordshift").join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}
