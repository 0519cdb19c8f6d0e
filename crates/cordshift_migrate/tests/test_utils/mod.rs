//! Test utilities for migration engine tests.
//!
//! In-memory platform, asset and sink implementations plus descriptor
//! shorthands.

#![allow(dead_code)]

pub mod mock_platform;
pub mod recording;

#[allow(unused_imports)]
pub use mock_platform::{Call, MockAssets, MockPlatform};
#[allow(unused_imports)]
pub use recording::{CountingPacer, RecordingSink};

use cordshift_core::{
    ChannelDescriptor, ChannelKind, EmojiDescriptor, GuildDescriptor, PermissionOverwrite,
    RoleDescriptor,
};
use cordshift_migrate::GuildMigrator;
use std::sync::Arc;

pub fn guild(id: &str, name: &str) -> GuildDescriptor {
    GuildDescriptor::builder()
        .id(id)
        .name(name)
        .build()
        .expect("Valid guild")
}

pub fn role(id: &str, name: &str, position: i32) -> RoleDescriptor {
    RoleDescriptor::builder()
        .id(id)
        .name(name)
        .position(position)
        .color(0x3498dbu32)
        .permissions(1024u64)
        .build()
        .expect("Valid role")
}

pub fn category(id: &str, name: &str, position: i32) -> ChannelDescriptor {
    ChannelDescriptor::builder()
        .id(id)
        .name(name)
        .kind(ChannelKind::Category)
        .position(position)
        .build()
        .expect("Valid category")
}

pub fn channel(
    id: &str,
    name: &str,
    kind: ChannelKind,
    parent_id: Option<&str>,
    position: i32,
) -> ChannelDescriptor {
    ChannelDescriptor::builder()
        .id(id)
        .name(name)
        .kind(kind)
        .parent_id(parent_id.map(str::to_string))
        .position(position)
        .build()
        .expect("Valid channel")
}

pub fn channel_with_overwrites(
    id: &str,
    name: &str,
    overwrites: Vec<PermissionOverwrite>,
) -> ChannelDescriptor {
    ChannelDescriptor::builder()
        .id(id)
        .name(name)
        .kind(ChannelKind::Text)
        .permission_overwrites(overwrites)
        .build()
        .expect("Valid channel")
}

pub fn emoji(id: &str, name: &str, animated: bool) -> EmojiDescriptor {
    EmojiDescriptor::builder()
        .id(id)
        .name(name)
        .animated(animated)
        .build()
        .expect("Valid emoji")
}

/// Everything a guild run test needs, wired together.
pub struct Harness {
    pub source: Arc<MockPlatform>,
    pub destination: Arc<MockPlatform>,
    pub assets: Arc<MockAssets>,
    pub sink: Arc<RecordingSink>,
    pub pacer: Arc<CountingPacer>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            source: Arc::new(MockPlatform::new("discord")),
            destination: Arc::new(MockPlatform::new("fluxer")),
            assets: Arc::new(MockAssets::serving_everything()),
            sink: Arc::new(RecordingSink::default()),
            pacer: Arc::new(CountingPacer::default()),
        }
    }

    pub fn migrator(&self) -> GuildMigrator {
        GuildMigrator::builder()
            .source(self.source.clone())
            .destination(self.destination.clone())
            .assets(self.assets.clone())
            .sink(self.sink.clone())
            .pacer(self.pacer.clone())
            .build()
            .expect("Valid migrator")
    }

    pub fn context(&self) -> cordshift_migrate::StageContext<'_> {
        cordshift_migrate::StageContext {
            destination: self.destination.as_ref(),
            sink: self.sink.as_ref(),
            pacer: self.pacer.as_ref(),
        }
    }
}
