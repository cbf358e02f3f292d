//! Errors from writing command output as JSON.

/// A value could not be encoded for printing.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Output Error: could not encode {} as JSON ({}) at line {} in {}", subject, reason, line, file)]
pub struct JsonError {
    /// What was being printed, e.g. `usage summary`
    pub subject: &'static str,
    /// Encoder message
    pub reason: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl JsonError {
    /// Create a new output error for `subject` with automatic location tracking.
    #[track_caller]
    pub fn new(subject: &'static str, reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject,
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
