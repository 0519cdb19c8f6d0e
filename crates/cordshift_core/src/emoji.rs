//! Emoji descriptors.

use serde::{Deserialize, Serialize};

/// A custom emoji. The image itself is fetched on demand and never stored.
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
pub struct EmojiDescriptor {
    /// Platform snowflake ID
    id: String,
    /// Emoji name, without colons
    #[serde(default)]
    #[builder(default)]
    name: String,
    /// Animated (GIF) emoji
    #[serde(default)]
    #[builder(default)]
    animated: bool,
}

impl EmojiDescriptor {
    /// Returns a builder for constructing an EmojiDescriptor.
    pub fn builder() -> EmojiDescriptorBuilder {
        EmojiDescriptorBuilder::default()
    }
}

/// Payload for uploading an emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmoji {
    /// Emoji name
    pub name: String,
    /// Raw image bytes
    pub image: Vec<u8>,
}
