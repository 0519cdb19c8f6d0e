//! Transport failures.

/// A request that never produced a response: connection refused, TLS
/// failure, timeout, or a body that could not be read.
///
/// Carries the method and URL so a failed run can be traced back to the
/// exact endpoint.
///
/// # Examples
///
/// ```
/// use cordshift_error::HttpError;
///
/// let err = HttpError::new("POST", "https://api.fluxer.app/v1/guilds", "connection reset");
/// assert_eq!(err.endpoint(), "POST https://api.fluxer.app/v1/guilds");
/// assert!(!err.timed_out);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {method} {url}: {message} at line {line} in {file}")]
pub struct HttpError {
    /// Request method, e.g. `GET`
    pub method: String,
    /// Full request URL
    pub url: String,
    /// Transport message
    pub message: String,
    /// The transport gave up waiting
    pub timed_out: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError for `method url` at the current location.
    #[track_caller]
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let location = std::panic::Location::caller();
        Self {
            method: method.into(),
            url: url.into(),
            message: message.into(),
            timed_out: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// `METHOD url`, as shown in logs.
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// Wrap a reqwest failure for a request sent with `method`.
    ///
    /// The URL comes from the error when reqwest recorded one, otherwise
    /// from `url`.
    #[cfg(feature = "http")]
    #[track_caller]
    pub fn from_reqwest(method: impl Into<String>, url: &str, err: &reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_else(|| url.to_string());
        let mut http = Self::new(method, url, err.to_string());
        http.timed_out = err.is_timeout();
        http
    }
}
