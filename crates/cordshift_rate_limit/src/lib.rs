//! Request pacing for cordshift.
//!
//! The destination platform throttles guild-building endpoints hard, so the
//! engine pauses for a fixed time after each successful create call. The
//! delays are plain settings; no value here is load-bearing for correctness.

mod config;
mod pacer;

pub use config::{PacingConfig, PacingConfigBuilder};
pub use pacer::{FixedDelayPacer, NoPacing};
