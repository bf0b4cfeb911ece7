//! Guild members.

use crate::{Snowflake, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's membership in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Member {
    /// The member's account
    pub user: User,
    /// Guild-specific nickname
    #[serde(default)]
    pub nick: Option<String>,
    /// Roles held in the guild
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
    /// When the user joined the guild
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    /// Server deafened
    #[serde(default)]
    pub deaf: bool,
    /// Server muted
    #[serde(default)]
    pub mute: bool,
}

impl Member {
    /// A member with no nickname and no roles.
    pub fn new(user: User) -> Self {
        Self {
            user,
            nick: None,
            role_ids: Vec::new(),
            joined_at: None,
            deaf: false,
            mute: false,
        }
    }

    /// Nickname if set and non-empty, otherwise the username.
    ///
    /// # Examples
    ///
    /// ```
    /// use concord_core::{Member, User};
    ///
    /// let member = Member::new(User::new(1u64, "trinity"));
    /// assert_eq!(member.display_name(), "trinity");
    ///
    /// let member = member.with_nick("Trin".to_string());
    /// assert_eq!(member.display_name(), "Trin");
    /// ```
    pub fn display_name(&self) -> &str {
        match self.nick.as_deref() {
            Some(nick) if !nick.is_empty() => nick,
            _ => &self.user.username,
        }
    }
}
