//! File system error types.

/// Failure reading or writing a local file.
///
/// # Examples
///
/// ```
/// use cordshift_error::IoError;
///
/// let err = IoError::new("logs/run.txt", "permission denied");
/// assert!(format!("{}", err).contains("logs/run.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("I/O Error: {}: {} at line {} in {}", path, message, line, file)]
pub struct IoError {
    /// Path being accessed
    pub path: String,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IoError {
    /// Create a new IoError at the current location.
    #[track_caller]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
