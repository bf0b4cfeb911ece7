//! Guild roles.

use crate::{Color, Permissions, Snowflake};
use serde::{Deserialize, Serialize};

/// A role inside a guild. The role whose ID equals the guild ID is `@everyone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct Role {
    /// Role ID
    pub id: Snowflake,
    /// Role name
    pub name: String,
    /// Display color, zero for none
    #[serde(default)]
    pub color: Color,
    /// Position in the role hierarchy (higher wins)
    #[serde(default)]
    pub position: i32,
    /// Guild-wide permissions granted by the role
    #[serde(default)]
    pub permissions: Permissions,
    /// Shown separately in the member list
    #[serde(default)]
    pub hoist: bool,
    /// Can be mentioned by anyone
    #[serde(default)]
    pub mentionable: bool,
}

impl Role {
    /// A colorless role with no permissions at position 0.
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: Color::DEFAULT_MEMBER,
            position: 0,
            permissions: Permissions::NONE,
            hoist: false,
            mentionable: false,
        }
    }
}
