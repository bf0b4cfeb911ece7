//! Gateway (push channel) error types.

/// Error raised when sending a directive over the push channel fails.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", message, line, file)]
pub struct GatewayError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use concord_error::GatewayError;
    ///
    /// let err = GatewayError::new("Socket closed");
    /// assert!(err.message.contains("closed"));
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
