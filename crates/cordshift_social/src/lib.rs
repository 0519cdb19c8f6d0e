//! REST clients for the platforms cordshift migrates between.
//!
//! Both Discord and Fluxer expose the same REST shape for guilds, roles,
//! channels and emoji, so one [`RestClient`] serves both, parameterised by a
//! [`PlatformProfile`] that carries the API base, CDN base and display name.
//!
//! Requests authenticate with an end-user token sent verbatim in the
//! `Authorization` header. CDN downloads go through [`CdnFetcher`], which
//! never sends the token.

#![warn(missing_docs)]

pub mod cdn;
mod client;
mod fetcher;
mod payload;
mod profile;
mod token;

pub use client::RestClient;
pub use fetcher::CdnFetcher;
pub use payload::{data_uri, image_mime};
pub use profile::{PlatformProfile, PlatformProfileBuilder};
pub use token::clean_token;
