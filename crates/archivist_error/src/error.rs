//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, StorageError};

/// Every failure the Archivist crates can surface.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::FileRead("usage.json".into()));
/// let err: ArchivistError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ArchivistErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Usage storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Command output could not be encoded
    #[from(JsonError)]
    Json(JsonError),
}

/// Archivist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistErrorKind, ArchivistResult, ConfigError};
///
/// fn might_fail() -> ArchivistResult<()> {
///     Err(ConfigError::invalid("timezone", "not an IANA zone name"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ArchivistErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Archivist Error: {}", _0)]
pub struct ArchivistError(Box<ArchivistErrorKind>);

impl ArchivistError {
    /// Create a new error from a kind.
    pub fn new(kind: ArchivistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ArchivistErrorKind {
        &self.0
    }
}

impl<T> From<T> for ArchivistError
where
    T: Into<ArchivistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Archivist operations.
pub type ArchivistResult<T> = std::result::Result<T, ArchivistError>;
