//! Trait definitions for cordshift.
//!
//! The migration engine only talks to the outside world through these
//! traits: two platform clients, a binary asset fetcher, a pacing policy and
//! a notification sink. Each has exactly the operations the engine uses.

mod assets;
mod pacing;
mod platform;
mod sink;

pub use assets::AssetFetcher;
pub use pacing::{PacedOperation, Pacer};
pub use platform::{AccountPlatform, GuildPlatform};
pub use sink::{LogLevel, MigrationSink};
