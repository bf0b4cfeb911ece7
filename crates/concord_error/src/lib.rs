//! Error types for the Concord state layer.
//!
//! This crate provides the foundation error types used throughout the Concord crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The storage "not found" sentinel is [`StoreErrorKind::NotFound`]. Stores produce it
//! with [`StoreError::not_found`], callers detect it with [`ConcordError::is_not_found`].
//!
//! # Examples
//!
//! ```
//! use concord_error::{ConcordResult, StoreError};
//!
//! fn lookup() -> ConcordResult<String> {
//!     Err(StoreError::not_found())?
//! }
//!
//! let err = lookup().unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod gateway;
mod lookup;
mod store;

pub use api::ApiError;
pub use config::ConfigError;
pub use error::{ConcordError, ConcordErrorKind, ConcordResult};
pub use gateway::GatewayError;
pub use lookup::LookupError;
pub use store::{StoreError, StoreErrorKind};
