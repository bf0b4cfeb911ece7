//! Member presences. Only the push channel ever produces these.

use crate::User;
use serde::{Deserialize, Serialize};

/// Online status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Online
    Online,
    /// Away
    Idle,
    /// Do not disturb
    #[serde(rename = "dnd")]
    #[strum(serialize = "dnd")]
    DoNotDisturb,
    /// Offline or invisible
    #[default]
    Offline,
}

/// A user's presence in a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    /// The user the presence belongs to
    pub user: User,
    /// Current status
    #[serde(default)]
    pub status: Status,
    /// Name of the current activity
    #[serde(default)]
    pub activity: Option<String>,
}

impl Presence {
    /// A presence with no activity.
    pub fn new(user: User, status: Status) -> Self {
        Self {
            user,
            status,
            activity: None,
        }
    }
}
