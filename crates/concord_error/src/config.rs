//! Configuration loading failures.

use std::fmt;

/// A configuration file or setting that could not be read.
///
/// `origin` names the offending file or key when one is known.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// File path or setting key that failed
    pub origin: Option<String>,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Create a config error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use concord_error::ConfigError;
    ///
    /// let err = ConfigError::new("max_messages must be a number").with_origin("concord.toml");
    /// assert_eq!(err.origin.as_deref(), Some("concord.toml"));
    /// assert!(err.to_string().starts_with("Configuration Error in concord.toml: max_messages"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            origin: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name the file or key the error came from.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "Configuration Error in {}: {}", origin, self.message)?,
            None => write!(f, "Configuration Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
