//! User profile types.

use serde::{Deserialize, Serialize};

/// The current user's profile as returned by `/users/@me`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct UserProfile {
    /// User snowflake ID
    id: String,
    /// Unique username
    #[serde(default)]
    #[builder(default)]
    username: String,
    /// Display name
    #[serde(default)]
    #[builder(default)]
    global_name: Option<String>,
    /// Avatar hash
    #[serde(default)]
    #[builder(default)]
    avatar: Option<String>,
    /// Banner hash
    #[serde(default)]
    #[builder(default)]
    banner: Option<String>,
    /// About-me text
    #[serde(default)]
    #[builder(default)]
    bio: Option<String>,
    /// Pronouns
    #[serde(default)]
    #[builder(default)]
    pronouns: Option<String>,
    /// Profile theme colours, primary first
    #[serde(default)]
    #[builder(default)]
    theme_colors: Option<Vec<u32>>,
    /// Single accent colour
    #[serde(default)]
    #[builder(default)]
    accent_color: Option<u32>,
}

impl UserProfile {
    /// Returns a builder for constructing a UserProfile.
    pub fn builder() -> UserProfileBuilder {
        UserProfileBuilder::default()
    }

    /// `name#1234` for legacy accounts, bare username otherwise.
    pub fn display_tag(&self, discriminator: Option<&str>) -> String {
        match discriminator {
            Some(d) if d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }
}

/// Fields to change on the current user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Display name
    pub global_name: Option<String>,
    /// About-me text
    pub bio: Option<String>,
    /// Pronouns
    pub pronouns: Option<String>,
    /// Accent colour
    pub accent_color: Option<u32>,
    /// Raw avatar image
    pub avatar: Option<Vec<u8>>,
    /// Raw banner image
    pub banner: Option<Vec<u8>>,
}

impl ProfileUpdate {
    /// True when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Names of the fields that are set, in request order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.global_name.is_some() {
            names.push("global_name");
        }
        if self.bio.is_some() {
            names.push("bio");
        }
        if self.pronouns.is_some() {
            names.push("pronouns");
        }
        if self.accent_color.is_some() {
            names.push("accent_color");
        }
        if self.avatar.is_some() {
            names.push("avatar");
        }
        if self.banner.is_some() {
            names.push("banner");
        }
        names
    }
}
