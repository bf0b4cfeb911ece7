//! Pull API contract for the Concord state layer.
//!
//! The REST transport itself lives elsewhere; this crate only describes what the state
//! layer needs from it ([`RestApi`]) and how bulk enumeration walks its pages
//! ([`walk_forward`], [`guilds`]).
//!
//! # Pagination
//!
//! Ranged endpoints return at most [`MAX_GUILD_PAGE`] entities per request. The walker
//! asks for `min(page, remaining)` entities at a time, advancing an `after` cursor to the
//! last ID of the previous page, and stops as soon as a page comes back short.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod paginate;
mod range;

pub use api::RestApi;
pub use paginate::{Paginated, guilds, walk_forward};
pub use range::{GuildRange, MAX_GUILD_PAGE};
