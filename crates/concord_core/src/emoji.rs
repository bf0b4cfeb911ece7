//! Custom guild emoji.

use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// A custom emoji owned by a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Emoji ID
    pub id: Snowflake,
    /// Emoji name
    pub name: String,
    /// Roles allowed to use it (empty = everyone)
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
    /// Animated emoji
    #[serde(default)]
    pub animated: bool,
    /// Managed by an integration
    #[serde(default)]
    pub managed: bool,
}

impl Emoji {
    /// A static, unrestricted emoji.
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role_ids: Vec::new(),
            animated: false,
            managed: false,
        }
    }
}
