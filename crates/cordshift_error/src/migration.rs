//! Guild-level migration error types.

/// Failures that abort the migration of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MigrationErrorKind {
    /// The destination guild could not be created or reused.
    #[display("Guild resolution failed: {_0}")]
    GuildResolution(String),
    /// Reading roles, channels or emoji from the source guild failed.
    #[display("Source fetch failed: {_0}")]
    SourceFetch(String),
    /// The requested source guilds cannot be migrated as asked.
    #[display("Guild selection rejected: {_0}")]
    Selection(String),
    /// A required platform client was not configured.
    #[display("Clients not initialized")]
    ClientsMissing,
}

/// Migration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Migration Error: {} at line {} in {}", kind, line, file)]
pub struct MigrationError {
    kind: MigrationErrorKind,
    line: u32,
    file: &'static str,
}

impl MigrationError {
    /// Create a new migration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MigrationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MigrationErrorKind {
        &self.kind
    }
}
