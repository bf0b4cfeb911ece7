//! Guilds (servers).

use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// A guild. Channels, members, roles and emoji are stored separately, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Guild {
    /// Guild ID (also the ID of its `@everyone` role)
    pub id: Snowflake,
    /// Guild name
    pub name: String,
    /// Icon hash
    #[serde(default)]
    pub icon: Option<String>,
    /// Owner user ID
    pub owner_id: Snowflake,
    /// Member count as reported by the service
    #[serde(default)]
    pub member_count: Option<u32>,
    /// Set while the guild is in an outage
    #[serde(default)]
    pub unavailable: bool,
}

impl Guild {
    /// Create a guild with the given ID, name and owner.
    pub fn new(
        id: impl Into<Snowflake>,
        name: impl Into<String>,
        owner_id: impl Into<Snowflake>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            owner_id: owner_id.into(),
            member_count: None,
            unavailable: false,
        }
    }
}
