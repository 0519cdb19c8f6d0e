//! Core data types for cordshift.
//!
//! Descriptors here are the typed view of what either platform returns for a
//! guild, role, channel, emoji or user. Fields the engine does not use are
//! dropped during deserialization rather than forwarded.

mod bitmask;
mod channel;
mod emoji;
mod guild;
mod observability;
mod options;
mod role;
mod user;

pub use channel::{
    ChannelDescriptor, ChannelDescriptorBuilder, ChannelKind, NewChannel, NewChannelBuilder,
    OverwriteTarget, PermissionEdit, PermissionOverwrite,
};
pub use emoji::{EmojiDescriptor, EmojiDescriptorBuilder, NewEmoji};
pub use guild::{GuildDescriptor, GuildDescriptorBuilder, NewGuild, owned_guilds};
pub use observability::init_tracing;
pub use options::{MigrationOptions, MigrationOptionsBuilder};
pub use role::{
    DEFAULT_ROLE_NAME, NewRole, NewRoleBuilder, RoleDescriptor, RoleDescriptorBuilder,
    RolePosition,
};
pub use user::{ProfileUpdate, UserProfile, UserProfileBuilder};
