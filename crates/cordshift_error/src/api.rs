//! Platform API error types.

/// A request reached the platform but was refused.
///
/// # Examples
///
/// ```
/// use cordshift_error::ApiError;
///
/// let err = ApiError::new(429, "You are being rate limited.");
/// assert!(err.is_rate_limited());
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error: HTTP {status}: {message} at line {line} in {file}")]
pub struct ApiError {
    /// HTTP status code returned by the platform
    pub status: u16,
    /// Response body or a short explanation
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError at the current location.
    #[track_caller]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// True for HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// True for HTTP 401 and 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}
