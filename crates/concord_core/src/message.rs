//! Channel messages.

use crate::{Snowflake, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message posted in a channel.
///
/// `guild_id` is filled by push events but left empty by pull fetches; the state
/// layer stamps it from the channel before caching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Message {
    /// Message ID
    pub id: Snowflake,
    /// Channel the message was posted in
    pub channel_id: Snowflake,
    /// Guild of the channel, if known
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Author
    pub author: User,
    /// Text content
    #[serde(default)]
    pub content: String,
    /// When the message was posted
    pub timestamp: DateTime<Utc>,
    /// When the message was last edited
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    /// Pinned in the channel
    #[serde(default)]
    pub pinned: bool,
}

impl Message {
    /// Create a message; the timestamp is taken from the ID.
    pub fn new(
        id: impl Into<Snowflake>,
        channel_id: impl Into<Snowflake>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            id,
            channel_id: channel_id.into(),
            guild_id: None,
            author,
            content: content.into(),
            timestamp: id.created_at().unwrap_or_default(),
            edited_timestamp: None,
            pinned: false,
        }
    }
}
