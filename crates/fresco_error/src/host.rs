//! Remote host error types.

/// Failure of a single remote API call with source location.
///
/// Every operation against the chat platform is fallible; the reconciliation
/// engine records these per item rather than aborting a run.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Host Error: {} at line {} in {}", message, line, file)]
pub struct HostError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HostError {
    /// Create a new HostError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_error::HostError;
    ///
    /// let err = HostError::new("Unknown Guild");
    /// assert!(err.message.contains("Unknown Guild"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
