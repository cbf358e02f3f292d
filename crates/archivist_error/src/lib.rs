//! Error types for the Archivist workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The tiering engine itself has no domain failures. Everything here comes
//! from the edges: loading configuration, persisting usage records, and
//! rendering output.
//!
//! # Examples
//!
//! ```
//! use archivist_error::{ArchivistResult, ConfigError};
//!
//! fn load_limits() -> ArchivistResult<u32> {
//!     Err(ConfigError::invalid("limits.daily_queries", "must be greater than zero"))?
//! }
//!
//! assert!(load_limits().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ArchivistError, ArchivistErrorKind, ArchivistResult};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
