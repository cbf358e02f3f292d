//! Usage storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a usage record
    #[display("Failed to write usage record: {}", _0)]
    FileWrite(String),
    /// Failed to read a usage record
    #[display("Failed to read usage record: {}", _0)]
    FileRead(String),
    /// A stored usage record could not be encoded or decoded
    #[display("Corrupt usage record: {}", _0)]
    Serialization(String),
    /// Failed to take the per-user lock on a usage record
    #[display("Failed to lock usage record: {}", _0)]
    Lock(String),
    /// Invalid storage path
    #[display("Invalid storage path: {}", _0)]
    InvalidPath(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use archivist_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Serialization("expected `date`".to_string()));
/// assert!(format!("{}", err).contains("Corrupt usage record"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
