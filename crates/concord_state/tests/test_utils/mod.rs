//! Test utilities for Concord state tests.
//!
//! This module provides mock collaborators and fixture helpers.

pub mod flaky_store;
pub mod mock_api;
pub mod mock_gateway;

#[allow(unused_imports)]
pub use flaky_store::FlakyStore;
#[allow(unused_imports)]
pub use mock_api::MockApi;
#[allow(unused_imports)]
pub use mock_gateway::MockGateway;

use concord_core::{Message, Snowflake, User};
use concord_state::{State, StateConfig};
use concord_store::{MemoryStore, Store};
use std::sync::Arc;

/// A state over fresh mocks and an in-memory store with the default cap.
#[allow(dead_code)]
pub fn state_with(api: &MockApi, gateway: &MockGateway) -> (State, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = State::new(
        Arc::new(api.clone()),
        Arc::new(gateway.clone()),
        Arc::clone(&store) as Arc<dyn Store>,
        StateConfig::default(),
    );
    (state, store)
}

/// `count` messages in `channel_id` with IDs starting at `first_id`.
#[allow(dead_code)]
pub fn history(channel_id: u64, first_id: u64, count: u64) -> Vec<Message> {
    (first_id..first_id + count)
        .map(|id| Message::new(id, channel_id, User::new(100u64, "morpheus"), format!("#{id}")))
        .collect()
}

/// Shorthand for building IDs in assertions.
#[allow(dead_code)]
pub fn id(raw: u64) -> Snowflake {
    Snowflake::new(raw)
}
