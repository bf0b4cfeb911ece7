//! The pull API trait.

use crate::GuildRange;
use async_trait::async_trait;
use concord_core::{Channel, Emoji, Guild, Member, Message, Role, Snowflake, User};
use concord_error::ConcordResult;

/// Request/response access to the remote service.
///
/// Implementations own the transport (HTTP client, authentication, rate limiting).
/// Failures are reported as [`ApiError`](concord_error::ApiError) wrapped in
/// [`ConcordError`](concord_error::ConcordError).
///
/// Entities returned by [`messages`](RestApi::messages) and
/// [`message`](RestApi::message) are not required to carry a guild ID.
#[async_trait]
pub trait RestApi: Send + Sync {
    /// The authenticated user.
    async fn me(&self) -> ConcordResult<User>;

    /// A single channel.
    async fn channel(&self, id: Snowflake) -> ConcordResult<Channel>;

    /// All channels of a guild.
    async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>>;

    /// Direct message channels of the authenticated user.
    async fn private_channels(&self) -> ConcordResult<Vec<Channel>>;

    /// All custom emoji of a guild.
    async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>>;

    /// A single guild.
    async fn guild(&self, id: Snowflake) -> ConcordResult<Guild>;

    /// One page of the guilds the user belongs to.
    async fn guilds_range(&self, range: GuildRange) -> ConcordResult<Vec<Guild>>;

    /// A single guild member.
    async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member>;

    /// Up to `limit` members of a guild.
    async fn members(&self, guild_id: Snowflake, limit: u32) -> ConcordResult<Vec<Member>>;

    /// A single message.
    async fn message(&self, channel_id: Snowflake, message_id: Snowflake)
    -> ConcordResult<Message>;

    /// The `limit` most recent messages of a channel, oldest first.
    async fn messages(&self, channel_id: Snowflake, limit: u32) -> ConcordResult<Vec<Message>>;

    /// All roles of a guild.
    async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>>;
}
