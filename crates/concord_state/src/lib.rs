//! Read-through state for Discord-style clients.
//!
//! [`State`] answers lookups from a [`Store`](concord_store::Store) first and falls back
//! to the [`RestApi`](concord_api::RestApi) on a miss, writing what it fetched back to
//! storage. Hooked to an [`EventDispatcher`](concord_gateway::EventDispatcher), it also
//! keeps storage current from push events.
//!
//! # Read-through fill
//!
//! 1. Query storage; a hit is returned without touching the network.
//! 2. Any storage error, not only "not found", triggers exactly one fetch.
//! 3. A successful fetch is written back, then returned.
//! 4. A failed fetch is returned as is and nothing is cached.
//!
//! Presences are the exception: they only ever come from push events, so those
//! lookups never fetch.
//!
//! # Error categories
//!
//! Structural lookups and [`State::permissions`] propagate every error. The display
//! helpers ([`State::author_display_name`], [`State::author_color`],
//! [`State::member_color`]) never fail and fall back to defaults instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod handlers;
mod helpers;
mod state;

pub use config::{StateConfig, StateConfigBuilder};
pub use state::State;
