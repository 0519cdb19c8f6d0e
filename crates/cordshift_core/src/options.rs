//! Per-guild migration toggles.

use serde::{Deserialize, Serialize};

/// Independent switches for one guild's migration. Read-only for a run.
///
/// # Examples
///
/// ```
/// use cordshift_core::MigrationOptions;
///
/// let options = MigrationOptions::builder().emojis(false).build().unwrap();
/// assert!(*options.roles());
/// assert!(!*options.emojis());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct MigrationOptions {
    /// Recreate roles
    #[serde(default = "enabled")]
    roles: bool,
    /// Recreate categories and channels
    #[serde(default = "enabled")]
    channels: bool,
    /// Apply role permission overwrites to the categories and channels the
    /// run creates or matches; no effect when `channels` is off
    #[serde(default = "enabled")]
    permissions: bool,
    /// Copy custom emoji
    #[serde(default = "enabled")]
    emojis: bool,
    /// Write the run log to disk when the run ends
    #[serde(default = "enabled")]
    save_log: bool,
}

fn enabled() -> bool {
    true
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self::everything()
    }
}

impl MigrationOptions {
    /// Returns a builder for constructing MigrationOptions.
    pub fn builder() -> MigrationOptionsBuilder {
        MigrationOptionsBuilder::default()
    }

    /// Every toggle on.
    pub fn everything() -> Self {
        Self {
            roles: true,
            channels: true,
            permissions: true,
            emojis: true,
            save_log: true,
        }
    }

    /// True when overwrites will actually be applied.
    pub fn applies_permissions(&self) -> bool {
        self.channels && self.permissions
    }
}
