//! Configuration error types.

/// What went wrong while loading or checking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("Could not read configuration: {}", _0)]
    Unreadable(String),
    /// The merged sources do not deserialize into Archivist settings
    #[display("Malformed configuration: {}", _0)]
    Malformed(String),
    /// A setting parsed but holds an unusable value
    #[display("Invalid value for `{}`: {}", key, reason)]
    InvalidValue {
        /// Dotted path of the setting, e.g. `limits.daily_queries`
        key: String,
        /// Why the value was rejected
        reason: String,
    },
    /// No usage directory was given on the command line or in `storage.path`
    #[display("No storage directory configured; pass --store or set storage.path")]
    MissingStorage,
    /// The effective configuration could not be written back out
    #[display("Could not render configuration: {}", _0)]
    Render(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use archivist_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::invalid("limits.follow_ups_per_topic", "must be greater than zero");
/// assert!(matches!(err.kind, ConfigErrorKind::InvalidValue { .. }));
/// assert!(err.to_string().starts_with("Config Error: Invalid value for `limits.follow_ups_per_topic`"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Rejects the value of the setting at `key`.
    #[track_caller]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        })
    }
}
