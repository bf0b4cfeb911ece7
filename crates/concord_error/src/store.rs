//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// The requested key is not present in the store.
    #[display("item not found in store")]
    NotFound,
    /// The backing implementation failed (I/O, serialization, remote backend)
    #[display("Store backend failure: {}", _0)]
    Backend(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use concord_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Backend("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// assert!(!err.is_not_found());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create the "not found" sentinel at the current location.
    #[track_caller]
    pub fn not_found() -> Self {
        Self::new(StoreErrorKind::NotFound)
    }

    /// Whether this is the "not found" sentinel.
    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}
