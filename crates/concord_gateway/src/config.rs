//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

fn default_capacity() -> usize {
    256
}

/// Tunables for [`EventDispatcher`](crate::EventDispatcher).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct DispatcherConfig {
    /// Events buffered per subscriber before the slowest one starts skipping
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}
