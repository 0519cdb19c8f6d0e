//! Copy Discord guild structure and profiles to Fluxer.
//!
//! This crate ties the workspace together: settings loading, the file-backed
//! run log, a [`Session`] that wires real platform clients into the
//! migration engine, and the `cordshift` binary.
//!
//! # Example
//!
//! ```no_run
//! use cordshift::{CordshiftConfig, MigrationOptions, RunLog, Session};
//! use std::sync::Arc;
//!
//! # async fn run() -> cordshift::CordshiftResult<()> {
//! let config = CordshiftConfig::load(None)?;
//! let session = Session::connect(&config)?;
//! let log = Arc::new(RunLog::new());
//!
//! let guild = session.owned_source_guilds().await?.remove(0);
//! let migrator = session.guild_migrator(log.clone())?;
//! migrator
//!     .migrate_guild(&guild, &MigrationOptions::everything(), None, false)
//!     .await;
//! log.save(config.log_dir())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod run_log;
mod selection;
mod session;

pub use config::{CordshiftConfig, CordshiftConfigBuilder, MIN_SOURCE_TOKEN_LEN};
pub use run_log::{LogEntry, RunLog};
pub use selection::{GuildSelection, plan_guilds};
pub use session::Session;

pub use cordshift_core::*;
pub use cordshift_error::*;
pub use cordshift_interface::*;
pub use cordshift_migrate::*;
pub use cordshift_rate_limit::*;
pub use cordshift_social::{CdnFetcher, PlatformProfile, RestClient, clean_token};
