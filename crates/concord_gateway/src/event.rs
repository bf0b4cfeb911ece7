//! Push events and their payloads.

use chrono::{DateTime, Utc};
use concord_core::{Channel, Emoji, Guild, Member, Message, Presence, Role, Snowflake, User};
use serde::{Deserialize, Serialize};

/// Session snapshot sent once the connection is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ready {
    /// The authenticated user
    pub user: User,
    /// Session identifier used for resuming
    pub session_id: String,
    /// Guilds the user belongs to, possibly unavailable stubs
    pub guilds: Vec<Guild>,
    /// Direct message channels
    pub private_channels: Vec<Channel>,
}

/// A guild becoming available, with everything the gateway sends alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildCreate {
    /// The guild itself
    pub guild: Guild,
    /// Its channels
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Members sent with the guild (large guilds send a subset)
    #[serde(default)]
    pub members: Vec<Member>,
    /// Its roles
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Its custom emoji
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Presences of the members sent
    #[serde(default)]
    pub presences: Vec<Presence>,
}

/// Partial member update; only these fields change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUpdate {
    /// Guild the member belongs to
    pub guild_id: Snowflake,
    /// The member's user
    pub user: User,
    /// Full replacement role list
    pub role_ids: Vec<Snowflake>,
    /// New nickname, `None` when cleared
    pub nick: Option<String>,
}

/// Partial message update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUpdate {
    /// The edited message
    pub id: Snowflake,
    /// Its channel
    pub channel_id: Snowflake,
    /// Its guild, when any
    pub guild_id: Option<Snowflake>,
    /// New content, when changed
    pub content: Option<String>,
    /// When the edit happened
    pub edited_timestamp: Option<DateTime<Utc>>,
}

/// Everything the push channel can deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// Session established
    Ready(Ready),
    /// A guild became available or was joined
    GuildCreate(GuildCreate),
    /// Guild settings changed
    GuildUpdate(Guild),
    /// Guild left, or became unavailable
    GuildDelete {
        /// The guild
        id: Snowflake,
        /// Whether this is an outage rather than a removal
        unavailable: bool,
    },
    /// Channel created
    ChannelCreate(Channel),
    /// Channel changed
    ChannelUpdate(Channel),
    /// Channel deleted
    ChannelDelete(Channel),
    /// Someone joined a guild
    GuildMemberAdd {
        /// The guild
        guild_id: Snowflake,
        /// The new member
        member: Member,
    },
    /// Member roles or nickname changed
    GuildMemberUpdate(MemberUpdate),
    /// Someone left a guild
    GuildMemberRemove {
        /// The guild
        guild_id: Snowflake,
        /// The departed user
        user: User,
    },
    /// Answer to a member request
    GuildMembersChunk {
        /// The guild
        guild_id: Snowflake,
        /// Members in this chunk
        members: Vec<Member>,
        /// Presences, when requested
        presences: Vec<Presence>,
    },
    /// Role created
    GuildRoleCreate {
        /// The guild
        guild_id: Snowflake,
        /// The role
        role: Role,
    },
    /// Role changed
    GuildRoleUpdate {
        /// The guild
        guild_id: Snowflake,
        /// The role
        role: Role,
    },
    /// Role deleted
    GuildRoleDelete {
        /// The guild
        guild_id: Snowflake,
        /// The deleted role
        role_id: Snowflake,
    },
    /// Emoji collection replaced
    GuildEmojisUpdate {
        /// The guild
        guild_id: Snowflake,
        /// The complete new collection
        emojis: Vec<Emoji>,
    },
    /// Message sent
    MessageCreate(Message),
    /// Message edited
    MessageUpdate(MessageUpdate),
    /// Message deleted
    MessageDelete {
        /// The message
        id: Snowflake,
        /// Its channel
        channel_id: Snowflake,
        /// Its guild, when any
        guild_id: Option<Snowflake>,
    },
    /// Several messages deleted at once
    MessageDeleteBulk {
        /// The messages
        ids: Vec<Snowflake>,
        /// Their channel
        channel_id: Snowflake,
        /// Their guild, when any
        guild_id: Option<Snowflake>,
    },
    /// Presence changed
    PresenceUpdate {
        /// The guild
        guild_id: Snowflake,
        /// The new presence
        presence: Presence,
    },
    /// The authenticated user changed
    UserUpdate(User),
}

impl Event {
    /// Gateway name of the event, for logging.
    ///
    /// ```
    /// use concord_core::Snowflake;
    /// use concord_gateway::Event;
    ///
    /// let event = Event::GuildRoleDelete {
    ///     guild_id: Snowflake::new(1),
    ///     role_id: Snowflake::new(2),
    /// };
    /// assert_eq!(event.name(), "GUILD_ROLE_DELETE");
    /// ```
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The guild the event concerns, when it concerns one.
    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Event::Ready(_) | Event::UserUpdate(_) => None,
            Event::GuildCreate(create) => Some(create.guild.id),
            Event::GuildUpdate(guild) => Some(guild.id),
            Event::GuildDelete { id, .. } => Some(*id),
            Event::ChannelCreate(channel)
            | Event::ChannelUpdate(channel)
            | Event::ChannelDelete(channel) => channel.guild_id,
            Event::GuildMemberAdd { guild_id, .. }
            | Event::GuildMemberRemove { guild_id, .. }
            | Event::GuildMembersChunk { guild_id, .. }
            | Event::GuildRoleCreate { guild_id, .. }
            | Event::GuildRoleUpdate { guild_id, .. }
            | Event::GuildRoleDelete { guild_id, .. }
            | Event::GuildEmojisUpdate { guild_id, .. }
            | Event::PresenceUpdate { guild_id, .. } => Some(*guild_id),
            Event::GuildMemberUpdate(update) => Some(update.guild_id),
            Event::MessageCreate(message) => message.guild_id,
            Event::MessageUpdate(update) => update.guild_id,
            Event::MessageDelete { guild_id, .. } | Event::MessageDeleteBulk { guild_id, .. } => {
                *guild_id
            }
        }
    }
}
