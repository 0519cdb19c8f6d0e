//! Settings and token errors.

/// A setting is missing, malformed or has the wrong type.
///
/// `setting` names the offending key in settings-file notation
/// (`discord_token`, `pacing.role_create_ms`) when it is known, so the
/// message can point the user at the line to fix.
///
/// # Examples
///
/// ```
/// use cordshift_error::ConfigError;
///
/// let err = ConfigError::for_setting("fluxer_token", "is not set");
/// assert_eq!(err.setting.as_deref(), Some("fluxer_token"));
/// assert!(err.to_string().contains("fluxer_token: is not set"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Settings key, if the failure concerns a single one
    pub setting: Option<String>,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error not tied to one setting, e.g. an unreadable settings file.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error about the value of `setting`.
    #[track_caller]
    pub fn for_setting(setting: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting: Some(setting.into()),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.setting {
            Some(setting) => write!(
                f,
                "Configuration Error: {}: {} at line {} in {}",
                setting, self.message, self.line, self.file
            ),
            None => write!(
                f,
                "Configuration Error: {} at line {} in {}",
                self.message, self.line, self.file
            ),
        }
    }
}
