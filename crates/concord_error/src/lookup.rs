//! Stage-labelled lookup failures.

use crate::ConcordError;

/// A failed sub-lookup inside a composite query, labelled with the stage that failed.
///
/// # Examples
///
/// ```
/// use concord_error::{ConcordError, LookupError, StoreError};
///
/// let err = LookupError::new("channel", StoreError::not_found().into());
/// assert_eq!(err.stage, "channel");
/// assert!(format!("{}", err).starts_with("Failed to get channel"));
///
/// let err: ConcordError = err.into();
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Failed to get {}: {}", stage, source)]
pub struct LookupError {
    /// Which lookup failed (e.g. "channel", "guild", "member")
    pub stage: &'static str,
    /// The underlying failure
    pub source: ConcordError,
    /// Line number where the error was wrapped
    pub line: u32,
    /// File where the error was wrapped
    pub file: &'static str,
}

impl LookupError {
    /// Wrap `source` with a stage label at the current location.
    #[track_caller]
    pub fn new(stage: &'static str, source: ConcordError) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage,
            source,
            line: location.line(),
            file: location.file(),
        }
    }
}
