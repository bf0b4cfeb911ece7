//! Guild and private channels.

use crate::{Permissions, Snowflake, User};
use serde::{Deserialize, Serialize};

/// Type of channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Text channel inside a guild
    #[default]
    GuildText,
    /// One-to-one private channel
    DirectMessage,
    /// Voice channel inside a guild
    GuildVoice,
    /// Private group channel
    GroupDm,
    /// Category grouping guild channels
    GuildCategory,
    /// Announcement channel
    GuildNews,
}

impl ChannelKind {
    /// Whether channels of this kind live outside any guild.
    pub fn is_private(self) -> bool {
        matches!(self, ChannelKind::DirectMessage | ChannelKind::GroupDm)
    }
}

/// Target of a permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwriteKind {
    /// Overwrite applies to everyone holding the role
    Role,
    /// Overwrite applies to a single member
    Member,
}

/// Channel-level adjustment of guild permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overwrite {
    /// Role or user ID the overwrite targets
    pub id: Snowflake,
    /// Whether `id` is a role or a member
    pub kind: OverwriteKind,
    /// Permissions granted
    #[serde(default)]
    pub allow: Permissions,
    /// Permissions revoked
    #[serde(default)]
    pub deny: Permissions,
}

/// A channel. Guild channels carry a `guild_id`; private channels do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Channel {
    /// Channel ID
    pub id: Snowflake,
    /// Owning guild, `None` for private channels
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Channel type
    #[serde(default)]
    pub kind: ChannelKind,
    /// Channel name (absent for direct messages)
    #[serde(default)]
    pub name: Option<String>,
    /// Sort position inside the guild
    #[serde(default)]
    pub position: i32,
    /// Channel topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Permission overwrites
    #[serde(default)]
    pub permission_overwrites: Vec<Overwrite>,
    /// Recipients of a private channel
    #[serde(default)]
    pub recipients: Vec<User>,
    /// Most recent message ID
    #[serde(default)]
    pub last_message_id: Option<Snowflake>,
}

impl Channel {
    /// A text channel belonging to `guild_id`.
    pub fn guild_text(
        id: impl Into<Snowflake>,
        guild_id: impl Into<Snowflake>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            guild_id: Some(guild_id.into()),
            kind: ChannelKind::GuildText,
            name: Some(name.into()),
            position: 0,
            topic: None,
            permission_overwrites: Vec::new(),
            recipients: Vec::new(),
            last_message_id: None,
        }
    }

    /// A direct message channel with a single recipient.
    pub fn direct(id: impl Into<Snowflake>, recipient: User) -> Self {
        Self {
            id: id.into(),
            guild_id: None,
            kind: ChannelKind::DirectMessage,
            name: None,
            position: 0,
            topic: None,
            permission_overwrites: Vec::new(),
            recipients: vec![recipient],
            last_message_id: None,
        }
    }

    /// Whether the channel belongs to no guild.
    pub fn is_private(&self) -> bool {
        self.guild_id.is_none_or(|id| !id.is_valid())
    }
}
