//! User accounts.

use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// A user account, including the session's own user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct User {
    /// User ID
    pub id: Snowflake,
    /// Account name (not unique per guild, see [`crate::Member::display_name`])
    pub username: String,
    /// Legacy four digit discriminator
    #[serde(default)]
    pub discriminator: String,
    /// Avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    /// Whether this is a bot account
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Create a user with the given ID and username.
    pub fn new(id: impl Into<Snowflake>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: "0000".to_string(),
            avatar: None,
            bot: false,
        }
    }
}
