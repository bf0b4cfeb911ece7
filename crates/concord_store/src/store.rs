//! Storage trait definition.

use async_trait::async_trait;
use concord_core::{Channel, Emoji, Guild, Member, Message, Presence, Role, Snowflake, User};
use concord_error::ConcordResult;

/// Trait for pluggable entity storage backends.
///
/// Getters return [`StoreErrorKind::NotFound`](concord_error::StoreErrorKind::NotFound)
/// for keys (or parent collections) that were never written. Collection getters return
/// copies. Setters upsert: an element with the same key is replaced, otherwise the value
/// is added.
#[async_trait]
pub trait Store: Send + Sync {
    /// The session's own user.
    async fn me(&self) -> ConcordResult<User>;

    /// Replace the session's own user.
    async fn set_me(&self, me: User) -> ConcordResult<()>;

    /// A channel by ID, guild or private.
    async fn channel(&self, id: Snowflake) -> ConcordResult<Channel>;

    /// All known channels of a guild.
    async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>>;

    /// All known private channels.
    async fn private_channels(&self) -> ConcordResult<Vec<Channel>>;

    /// Insert or replace a channel.
    ///
    /// Implementations file the channel under its guild, or under the private
    /// channels when `guild_id` is `None`.
    async fn set_channel(&self, channel: Channel) -> ConcordResult<()>;

    /// Remove a channel (and any messages cached for it).
    async fn remove_channel(&self, channel: &Channel) -> ConcordResult<()>;

    /// A single emoji of a guild.
    async fn emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> ConcordResult<Emoji>;

    /// All emoji of a guild.
    async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>>;

    /// Replace the whole emoji collection of a guild.
    async fn set_emojis(&self, guild_id: Snowflake, emojis: Vec<Emoji>) -> ConcordResult<()>;

    /// Drop the emoji collection of a guild.
    async fn remove_emojis(&self, guild_id: Snowflake) -> ConcordResult<()>;

    /// A guild by ID.
    async fn guild(&self, id: Snowflake) -> ConcordResult<Guild>;

    /// All known guilds, ordered by ID.
    async fn guilds(&self) -> ConcordResult<Vec<Guild>>;

    /// Insert or replace a guild.
    async fn set_guild(&self, guild: Guild) -> ConcordResult<()>;

    /// Remove a guild together with its channels, members, presences, roles and emoji.
    async fn remove_guild(&self, id: Snowflake) -> ConcordResult<()>;

    /// A member of a guild.
    async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member>;

    /// All known members of a guild.
    async fn members(&self, guild_id: Snowflake) -> ConcordResult<Vec<Member>>;

    /// Insert or replace a member.
    async fn set_member(&self, guild_id: Snowflake, member: Member) -> ConcordResult<()>;

    /// Remove a member.
    async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<()>;

    /// A message of a channel.
    async fn message(&self, channel_id: Snowflake, message_id: Snowflake)
    -> ConcordResult<Message>;

    /// Cached messages of a channel, oldest first, at most [`Store::max_messages`].
    async fn messages(&self, channel_id: Snowflake) -> ConcordResult<Vec<Message>>;

    /// Insert or replace a message. New messages go to the tail; the oldest are dropped
    /// once the channel holds more than [`Store::max_messages`].
    async fn set_message(&self, message: Message) -> ConcordResult<()>;

    /// Remove a message.
    async fn remove_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<()>;

    /// Per-channel message cap. The state layer uses it to tell a full cache from a
    /// partial one.
    fn max_messages(&self) -> usize;

    /// A user's presence in a guild.
    async fn presence(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Presence>;

    /// All known presences in a guild.
    async fn presences(&self, guild_id: Snowflake) -> ConcordResult<Vec<Presence>>;

    /// Insert or replace a presence.
    async fn set_presence(&self, guild_id: Snowflake, presence: Presence) -> ConcordResult<()>;

    /// Remove a presence.
    async fn remove_presence(&self, guild_id: Snowflake, user_id: Snowflake)
    -> ConcordResult<()>;

    /// A role of a guild.
    async fn role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<Role>;

    /// All known roles of a guild.
    async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>>;

    /// Insert or replace a role.
    async fn set_role(&self, guild_id: Snowflake, role: Role) -> ConcordResult<()>;

    /// Remove a role.
    async fn remove_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<()>;

    /// Drop everything.
    async fn reset(&self) -> ConcordResult<()>;
}
