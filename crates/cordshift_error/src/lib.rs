//! Error types for cordshift.
//!
//! Every error records the file and line where it was raised. Per-family
//! structs are collected into [`CordshiftErrorKind`], and [`CordshiftError`]
//! boxes the kind so results stay small.

mod api;
mod config;
mod http;
mod io;
mod json;
mod migration;

pub use api::ApiError;
pub use config::ConfigError;
pub use http::HttpError;
pub use io::IoError;
pub use json::JsonError;
pub use migration::{MigrationError, MigrationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum CordshiftErrorKind {
    /// Transport failure
    #[display("{_0}")]
    Http(HttpError),
    /// Platform rejected the request
    #[display("{_0}")]
    Api(ApiError),
    /// Payload could not be encoded or decoded
    #[display("{_0}")]
    Json(JsonError),
    /// Settings or credentials are unusable
    #[display("{_0}")]
    Config(ConfigError),
    /// Local file could not be read or written
    #[display("{_0}")]
    Io(IoError),
    /// Guild-level migration failure
    #[display("{_0}")]
    Migration(MigrationError),
}

/// Cordshift error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Cordshift Error: {_0}")]
pub struct CordshiftError(Box<CordshiftErrorKind>);

impl CordshiftError {
    /// Create a new error from a kind.
    pub fn new(kind: CordshiftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CordshiftErrorKind {
        &self.0
    }

    /// True when the platform answered with HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind(), CordshiftErrorKind::Api(api) if api.is_rate_limited())
    }
}

impl std::error::Error for CordshiftError {}

impl<T> From<T> for CordshiftError
where
    T: Into<CordshiftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for cordshift operations.
pub type CordshiftResult<T> = std::result::Result<T, CordshiftError>;
