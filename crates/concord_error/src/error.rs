//! Top-level error wrapper types.

use crate::{ApiError, ConfigError, GatewayError, LookupError, StoreError};

/// Every error the Concord crates can return.
///
/// # Examples
///
/// ```
/// use concord_error::{ConcordError, ApiError};
///
/// let api_err = ApiError::new("Connection failed");
/// let err: ConcordError = api_err.into();
/// assert!(format!("{}", err).contains("API Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ConcordErrorKind {
    /// Storage error (including the not-found sentinel)
    #[from(StoreError)]
    Store(StoreError),
    /// Pull API error
    #[from(ApiError)]
    Api(ApiError),
    /// Push channel error
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Stage-labelled composite lookup failure
    #[from(LookupError)]
    Lookup(LookupError),
}

/// Concord error with kind discrimination.
///
/// # Examples
///
/// ```
/// use concord_error::{ConcordError, ConcordResult, ConfigError};
///
/// fn might_fail() -> ConcordResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Concord Error: {}", _0)]
pub struct ConcordError(Box<ConcordErrorKind>);

impl ConcordError {
    /// Create a new error from a kind.
    pub fn new(kind: ConcordErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConcordErrorKind {
        &self.0
    }

    /// Whether this error is (or wraps) the store's "not found" sentinel.
    ///
    /// Stage labels added by [`LookupError`] are looked through.
    pub fn is_not_found(&self) -> bool {
        match self.kind() {
            ConcordErrorKind::Store(err) => err.is_not_found(),
            ConcordErrorKind::Lookup(err) => err.source.is_not_found(),
            _ => false,
        }
    }

    /// The stage label, if this error came from a labelled composite lookup.
    pub fn stage(&self) -> Option<&'static str> {
        match self.kind() {
            ConcordErrorKind::Lookup(err) => Some(err.stage),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ConcordErrorKind
impl<T> From<T> for ConcordError
where
    T: Into<ConcordErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Concord operations.
///
/// # Examples
///
/// ```
/// use concord_error::{ConcordResult, ApiError};
///
/// fn fetch_data() -> ConcordResult<String> {
///     Err(ApiError::with_status(404, "Unknown Channel"))?
/// }
/// ```
pub type ConcordResult<T> = std::result::Result<T, ConcordError>;
