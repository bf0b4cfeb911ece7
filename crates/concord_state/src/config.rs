//! State tunables.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for [`State`](crate::State).
///
/// # Example
///
/// ```
/// use concord_state::{StateConfig, StateConfigBuilder};
///
/// let config = StateConfig::default().with_max_fetch_guilds(250);
/// assert_eq!(*config.max_fetch_guilds(), 250);
/// assert_eq!(*config.max_fetch_members(), 1000);
///
/// let built = StateConfigBuilder::default().max_messages(20usize).build().unwrap();
/// assert_eq!(*built.max_messages(), 20);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct StateConfig {
    /// Members requested when a guild's member list is filled from the API
    #[serde(default = "default_max_fetch_members")]
    max_fetch_members: u32,

    /// Guilds enumerated when the guild list is filled from the API
    #[serde(default = "default_max_fetch_guilds")]
    max_fetch_guilds: u32,

    /// Messages kept per channel by the default store
    #[serde(default = "default_max_messages")]
    max_messages: usize,
}

fn default_max_fetch_members() -> u32 {
    1000
}

fn default_max_fetch_guilds() -> u32 {
    100
}

fn default_max_messages() -> usize {
    50
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            max_fetch_members: default_max_fetch_members(),
            max_fetch_guilds: default_max_fetch_guilds(),
            max_messages: default_max_messages(),
        }
    }
}
