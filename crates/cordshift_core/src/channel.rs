//! Channel descriptors, permission overwrites and channel request payloads.

use serde::{Deserialize, Serialize};

/// Channel type code as used by both platforms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(from = "u8", into = "u8")]
pub enum ChannelKind {
    /// Text channel in a guild (0)
    #[display("text")]
    Text,
    /// Direct message (1)
    #[display("dm")]
    Dm,
    /// Voice channel (2)
    #[display("voice")]
    Voice,
    /// Group direct message (3)
    #[display("group dm")]
    GroupDm,
    /// Category grouping other channels (4)
    #[display("category")]
    Category,
    /// Announcement channel (5)
    #[display("announcement")]
    Announcement,
    /// Thread in an announcement channel (10)
    #[display("announcement thread")]
    AnnouncementThread,
    /// Public thread (11)
    #[display("public thread")]
    PublicThread,
    /// Private thread (12)
    #[display("private thread")]
    PrivateThread,
    /// Stage voice channel (13)
    #[display("stage")]
    Stage,
    /// Student hub directory (14)
    #[display("directory")]
    Directory,
    /// Forum channel (15)
    #[display("forum")]
    Forum,
    /// Media channel (16)
    #[display("media")]
    Media,
    /// Any code this build does not know
    #[display("unknown ({_0})")]
    Unknown(u8),
}

impl ChannelKind {
    /// The numeric type code.
    pub fn code(self) -> u8 {
        self.into()
    }

    /// True for the three thread variants.
    pub fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }
}

impl From<u8> for ChannelKind {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Text,
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::Announcement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::Stage,
            14 => Self::Directory,
            15 => Self::Forum,
            16 => Self::Media,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChannelKind> for u8 {
    fn from(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Text => 0,
            ChannelKind::Dm => 1,
            ChannelKind::Voice => 2,
            ChannelKind::GroupDm => 3,
            ChannelKind::Category => 4,
            ChannelKind::Announcement => 5,
            ChannelKind::AnnouncementThread => 10,
            ChannelKind::PublicThread => 11,
            ChannelKind::PrivateThread => 12,
            ChannelKind::Stage => 13,
            ChannelKind::Directory => 14,
            ChannelKind::Forum => 15,
            ChannelKind::Media => 16,
            ChannelKind::Unknown(code) => code,
        }
    }
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum OverwriteTarget {
    /// Overwrite for a role (0)
    Role,
    /// Overwrite for a single member (1)
    Member,
}

impl From<u8> for OverwriteTarget {
    fn from(code: u8) -> Self {
        if code == 0 { Self::Role } else { Self::Member }
    }
}

impl From<OverwriteTarget> for u8 {
    fn from(target: OverwriteTarget) -> Self {
        match target {
            OverwriteTarget::Role => 0,
            OverwriteTarget::Member => 1,
        }
    }
}

/// Per-channel allow/deny override for one role or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PermissionOverwrite {
    /// Role or user ID
    id: String,
    /// Target kind
    #[serde(rename = "type")]
    target: OverwriteTarget,
    /// Allowed permission bits
    #[serde(default, with = "crate::bitmask")]
    allow: u64,
    /// Denied permission bits
    #[serde(default, with = "crate::bitmask")]
    deny: u64,
}

impl PermissionOverwrite {
    /// Create an overwrite.
    pub fn new(id: impl Into<String>, target: OverwriteTarget, allow: u64, deny: u64) -> Self {
        Self {
            id: id.into(),
            target,
            allow,
            deny,
        }
    }

    /// Shorthand for a role overwrite.
    pub fn role(id: impl Into<String>, allow: u64, deny: u64) -> Self {
        Self::new(id, OverwriteTarget::Role, allow, deny)
    }
}

/// Body of an edit-permissions call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEdit {
    /// Allowed permission bits
    #[serde(with = "crate::bitmask")]
    pub allow: u64,
    /// Denied permission bits
    #[serde(with = "crate::bitmask")]
    pub deny: u64,
    /// Target kind
    #[serde(rename = "type")]
    pub target: OverwriteTarget,
}

/// A channel (or category) as read from either platform.
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
pub struct ChannelDescriptor {
    /// Platform snowflake ID
    id: String,
    /// Channel name
    #[serde(default)]
    #[builder(default)]
    name: String,
    /// Channel type code
    #[serde(rename = "type")]
    kind: ChannelKind,
    /// Parent category ID
    #[serde(default)]
    #[builder(default)]
    parent_id: Option<String>,
    /// Sort position
    #[serde(default)]
    #[builder(default)]
    position: i32,
    /// Topic (text, announcement, forum)
    #[serde(default)]
    #[builder(default)]
    topic: Option<String>,
    /// Age-restricted
    #[serde(default)]
    #[builder(default)]
    nsfw: bool,
    /// Voice bitrate in bits per second
    #[serde(default)]
    #[builder(default)]
    bitrate: Option<u32>,
    /// Voice user limit, 0 for unlimited
    #[serde(default)]
    #[builder(default)]
    user_limit: Option<u32>,
    /// Ordered permission overwrites
    #[serde(default)]
    #[builder(default)]
    permission_overwrites: Vec<PermissionOverwrite>,
}

impl ChannelDescriptor {
    /// Returns a builder for constructing a ChannelDescriptor.
    pub fn builder() -> ChannelDescriptorBuilder {
        ChannelDescriptorBuilder::default()
    }

    /// True for categories.
    pub fn is_category(&self) -> bool {
        self.kind == ChannelKind::Category
    }
}

/// Payload for creating a channel.
///
/// Type-specific fields are left `None` when they do not apply and are then
/// omitted from the request body.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct NewChannel {
    /// Channel name
    name: String,
    /// Channel type code
    #[serde(rename = "type")]
    kind: ChannelKind,
    /// Topic
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    topic: Option<String>,
    /// Age-restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    nsfw: Option<bool>,
    /// Voice bitrate
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    bitrate: Option<u32>,
    /// Voice user limit
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    user_limit: Option<u32>,
    /// Sort position
    #[builder(default)]
    position: i32,
    /// Parent category on the destination
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    parent_id: Option<String>,
}

impl NewChannel {
    /// Returns a builder for constructing a NewChannel.
    pub fn builder() -> NewChannelBuilder {
        NewChannelBuilder::default()
    }
}
