//! Role descriptors and role request payloads.

use serde::{Deserialize, Serialize};

/// Name of the implicit role every member holds on both platforms.
pub const DEFAULT_ROLE_NAME: &str = "@everyone";

/// A role as read from either platform.
///
/// # Examples
///
/// ```
/// use cordshift_core::RoleDescriptor;
///
/// let role = RoleDescriptor::builder()
///     .id("1")
///     .name("Admin")
///     .permissions(8u64)
///     .position(1)
///     .build()
///     .unwrap();
///
/// assert!(!role.is_default());
/// assert_eq!(*role.permissions(), 8);
/// ```
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
pub struct RoleDescriptor {
    /// Platform snowflake ID
    id: String,
    /// Role name
    name: String,
    /// Permission bitfield, passed through untouched
    #[serde(default, with = "crate::bitmask")]
    #[builder(default)]
    permissions: u64,
    /// 24-bit RGB colour, 0 for none
    #[serde(default)]
    #[builder(default)]
    color: u32,
    /// Display separately in the member list
    #[serde(default)]
    #[builder(default)]
    hoist: bool,
    /// Can be @mentioned
    #[serde(default)]
    #[builder(default)]
    mentionable: bool,
    /// Hierarchy rank, lower is weaker
    #[serde(default)]
    #[builder(default)]
    position: i32,
}

impl RoleDescriptor {
    /// Returns a builder for constructing a RoleDescriptor.
    pub fn builder() -> RoleDescriptorBuilder {
        RoleDescriptorBuilder::default()
    }

    /// True for the implicit default role.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_ROLE_NAME
    }

    /// The create payload that recreates this role elsewhere.
    pub fn to_new_role(&self) -> NewRole {
        NewRole {
            name: self.name.clone(),
            permissions: self.permissions,
            color: self.color,
            hoist: self.hoist,
            mentionable: self.mentionable,
        }
    }
}

/// Payload for creating a role.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct NewRole {
    /// Role name
    pub(crate) name: String,
    /// Permission bitfield
    #[serde(with = "crate::bitmask")]
    #[builder(default)]
    pub(crate) permissions: u64,
    /// RGB colour
    #[builder(default)]
    pub(crate) color: u32,
    /// Display separately
    #[builder(default)]
    pub(crate) hoist: bool,
    /// Mentionable
    #[builder(default)]
    pub(crate) mentionable: bool,
}

/// One entry of a bulk role reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePosition {
    /// Destination role ID
    pub id: String,
    /// Target position
    pub position: i32,
}
