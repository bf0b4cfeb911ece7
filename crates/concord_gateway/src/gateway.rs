//! Outbound gateway directives.

use async_trait::async_trait;
use concord_core::Snowflake;
use concord_error::ConcordResult;
use serde::{Deserialize, Serialize};

/// Request for member chunks to be pushed for one or more guilds.
///
/// The members arrive later as [`Event::GuildMembersChunk`](crate::Event::GuildMembersChunk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestGuildMembers {
    /// Guilds to stream members of
    pub guild_ids: Vec<Snowflake>,
    /// Username prefix filter, empty for everyone
    pub query: String,
    /// Maximum members to send, zero for no limit
    pub limit: u32,
    /// Whether presences are included with each chunk
    pub presences: bool,
}

impl RequestGuildMembers {
    /// Stream every member of `guild_id`, with presences.
    pub fn streaming(guild_id: impl Into<Snowflake>) -> Self {
        Self {
            guild_ids: vec![guild_id.into()],
            query: String::new(),
            limit: 0,
            presences: true,
        }
    }
}

/// The push channel's outbound side.
///
/// Only the send is awaited; what the remote does with the directive shows up later
/// as events.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Ask the gateway to stream guild members.
    async fn request_guild_members(&self, request: RequestGuildMembers) -> ConcordResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_request() {
        let request = RequestGuildMembers::streaming(42u64);
        assert_eq!(request.guild_ids, vec![Snowflake::new(42)]);
        assert!(request.query.is_empty());
        assert_eq!(request.limit, 0);
        assert!(request.presences);
    }
}
