//! Push channel model for the Concord state layer.
//!
//! - [`Event`] and its payloads describe what the gateway pushes.
//! - [`Gateway`] carries outbound directives, such as requesting member chunks.
//! - [`EventDispatcher`] fans events out to [`EventHandler`]s, each on its own task.
//!
//! # Dispatch model
//!
//! Every subscriber receives events strictly in order, one at a time. Different
//! subscribers run concurrently with each other, so two handlers writing the same
//! storage race and the last write wins.
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use concord_gateway::{Event, EventDispatcher, EventHandler};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl EventHandler for Printer {
//!     async fn handle(&self, event: &Event) {
//!         println!("{}", event.name());
//!     }
//! }
//!
//! # async fn example() {
//! let dispatcher = EventDispatcher::new(256);
//! let subscription = dispatcher.subscribe(Arc::new(Printer));
//! // ... dispatcher.dispatch(event) from the transport ...
//! subscription.cancel();
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatcher;
mod event;
mod gateway;

pub use config::DispatcherConfig;
pub use dispatcher::{EventDispatcher, EventHandler, Subscription};
pub use event::{Event, GuildCreate, MemberUpdate, MessageUpdate, Ready};
pub use gateway::{Gateway, RequestGuildMembers};
