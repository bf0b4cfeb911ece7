//! Concord: a cache-first state layer for Discord-style chat clients.
//!
//! Two writers feed one store. The gateway pushes events, and the REST API answers
//! whatever storage cannot. [`State`] reconciles them: every lookup checks storage
//! first, falls back to a single fetch, and writes the result back.
//!
//! # Crates
//!
//! | Crate | Contents |
//! |---|---|
//! | [`concord_error`] | Error types |
//! | [`concord_core`] | Snowflakes, entities, permissions |
//! | [`concord_store`] | The [`Store`] contract and [`MemoryStore`] |
//! | [`concord_api`] | The [`RestApi`] contract and pagination |
//! | [`concord_gateway`] | Events, [`Gateway`] directives, [`EventDispatcher`] |
//! | [`concord_state`] | The [`State`] orchestrator |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use concord::{ConcordConfig, connect, init_logging};
//!
//! let config = ConcordConfig::load()?;
//! init_logging(config.logging())?;
//!
//! // `api` and `gateway` wrap your transport.
//! let (state, _subscription, dispatcher) = connect(api, gateway, &config);
//!
//! // Feed gateway events in as they arrive...
//! dispatcher.dispatch(event);
//!
//! // ...and look things up without worrying where they come from.
//! let perms = state.permissions(channel_id, user_id).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod logging;

pub use config::ConcordConfig;
pub use logging::{LoggingConfig, init_logging};

pub use concord_api::{GuildRange, MAX_GUILD_PAGE, Paginated, RestApi, guilds, walk_forward};
pub use concord_core::{
    Channel, ChannelKind, Color, DISCORD_EPOCH_MILLIS, Emoji, Guild, Member, Message, Overwrite,
    OverwriteKind, Permissions, Presence, Role, Snowflake, Status, User, calc_overwrites,
    member_color,
};
pub use concord_error::{
    ApiError, ConcordError, ConcordErrorKind, ConcordResult, ConfigError, GatewayError,
    LookupError, StoreError, StoreErrorKind,
};
pub use concord_gateway::{
    DispatcherConfig, Event, EventDispatcher, EventHandler, Gateway, GuildCreate, MemberUpdate,
    MessageUpdate, Ready, RequestGuildMembers, Subscription,
};
pub use concord_state::{State, StateConfig, StateConfigBuilder};
pub use concord_store::{DEFAULT_MAX_MESSAGES, MemoryStore, Store};

use std::sync::Arc;
use tracing::info;

/// Wire a [`State`] over an in-memory store and hook it to a new dispatcher.
///
/// The store keeps `config.state().max_messages()` messages per channel. Push events
/// into the returned dispatcher; dropping the [`Subscription`] unhooks the state.
///
/// Must be called within a Tokio runtime.
pub fn connect(
    api: Arc<dyn RestApi>,
    gateway: Arc<dyn Gateway>,
    config: &ConcordConfig,
) -> (State, Subscription, EventDispatcher) {
    let store = Arc::new(MemoryStore::new(*config.state().max_messages()));
    let state = State::new(api, gateway, store, config.state().clone());
    let dispatcher = EventDispatcher::from_config(config.dispatcher());
    let subscription = state.hook(&dispatcher);

    info!(
        max_messages = config.state().max_messages(),
        capacity = config.dispatcher().capacity(),
        "Concord state connected"
    );
    (state, subscription, dispatcher)
}
