//! Mock pull API serving fixture data and counting calls.

use async_trait::async_trait;
use concord_api::{GuildRange, RestApi};
use concord_core::{Channel, Emoji, Guild, Member, Message, Role, Snowflake, User};
use concord_error::{ApiError, ConcordResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Fixture {
    me: Option<User>,
    channels: Vec<Channel>,
    guilds: Vec<Guild>,
    members: HashMap<Snowflake, Vec<Member>>,
    messages: HashMap<Snowflake, Vec<Message>>,
    roles: HashMap<Snowflake, Vec<Role>>,
    emojis: HashMap<Snowflake, Vec<Emoji>>,
}

/// Pull API backed by in-test fixtures.
///
/// Every call is counted per method name, and methods can be made to fail.
#[derive(Clone, Default)]
pub struct MockApi {
    fixture: Arc<Mutex<Fixture>>,
    calls: Arc<Mutex<HashMap<&'static str, usize>>>,
    failing: Arc<Mutex<HashSet<&'static str>>>,
    latency: Option<Duration>,
}

fn not_found<T>(what: &str) -> ConcordResult<T> {
    Err(ApiError::with_status(404, format!("Unknown {what}")).into())
}

#[allow(dead_code)]
impl MockApi {
    /// An API with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call, to widen race windows.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `user` as the authenticated user.
    pub fn with_me(self, user: User) -> Self {
        self.fixture.lock().unwrap().me = Some(user);
        self
    }

    /// Serve a channel, guild or private.
    pub fn with_channel(self, channel: Channel) -> Self {
        self.fixture.lock().unwrap().channels.push(channel);
        self
    }

    /// Serve a guild.
    pub fn with_guild(self, guild: Guild) -> Self {
        self.fixture.lock().unwrap().guilds.push(guild);
        self
    }

    /// Serve `count` guilds with IDs starting at `first_id`.
    pub fn with_guilds(self, first_id: u64, count: u64) -> Self {
        {
            let mut fixture = self.fixture.lock().unwrap();
            for id in first_id..first_id + count {
                fixture
                    .guilds
                    .push(Guild::new(id, format!("guild-{id}"), 1u64));
            }
        }
        self
    }

    /// Serve a member of `guild_id`.
    pub fn with_member(self, guild_id: u64, member: Member) -> Self {
        self.fixture
            .lock()
            .unwrap()
            .members
            .entry(Snowflake::new(guild_id))
            .or_default()
            .push(member);
        self
    }

    /// Serve a message history for `channel_id`, oldest first.
    pub fn with_messages(self, channel_id: u64, messages: Vec<Message>) -> Self {
        self.fixture
            .lock()
            .unwrap()
            .messages
            .entry(Snowflake::new(channel_id))
            .or_default()
            .extend(messages);
        self
    }

    /// Serve a role of `guild_id`.
    pub fn with_role(self, guild_id: u64, role: Role) -> Self {
        self.fixture
            .lock()
            .unwrap()
            .roles
            .entry(Snowflake::new(guild_id))
            .or_default()
            .push(role);
        self
    }

    /// Serve an emoji of `guild_id`.
    pub fn with_emoji(self, guild_id: u64, emoji: Emoji) -> Self {
        self.fixture
            .lock()
            .unwrap()
            .emojis
            .entry(Snowflake::new(guild_id))
            .or_default()
            .push(emoji);
        self
    }

    /// Make `method` fail with a server error from now on.
    pub fn fail(&self, method: &'static str) {
        self.failing.lock().unwrap().insert(method);
    }

    /// Times `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    /// Total calls across all methods.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Reset all call counts to zero.
    pub fn reset_call_count(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn enter(&self, method: &'static str) -> ConcordResult<()> {
        *self.calls.lock().unwrap().entry(method).or_default() += 1;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.lock().unwrap().contains(method) {
            return Err(ApiError::with_status(500, format!("{method} failed")).into());
        }
        Ok(())
    }
}

#[async_trait]
impl RestApi for MockApi {
    async fn me(&self) -> ConcordResult<User> {
        self.enter("me").await?;
        match self.fixture.lock().unwrap().me.clone() {
            Some(me) => Ok(me),
            None => not_found("user"),
        }
    }

    async fn channel(&self, id: Snowflake) -> ConcordResult<Channel> {
        self.enter("channel").await?;
        let found = self
            .fixture
            .lock()
            .unwrap()
            .channels
            .iter()
            .find(|c| c.id == id)
            .cloned();
        found.map_or_else(|| not_found("channel"), Ok)
    }

    async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>> {
        self.enter("channels").await?;
        Ok(self
            .fixture
            .lock()
            .unwrap()
            .channels
            .iter()
            .filter(|c| c.guild_id == Some(guild_id))
            .cloned()
            .collect())
    }

    async fn private_channels(&self) -> ConcordResult<Vec<Channel>> {
        self.enter("private_channels").await?;
        Ok(self
            .fixture
            .lock()
            .unwrap()
            .channels
            .iter()
            .filter(|c| c.is_private())
            .cloned()
            .collect())
    }

    async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>> {
        self.enter("emojis").await?;
        let found = self.fixture.lock().unwrap().emojis.get(&guild_id).cloned();
        found.map_or_else(|| not_found("guild"), Ok)
    }

    async fn guild(&self, id: Snowflake) -> ConcordResult<Guild> {
        self.enter("guild").await?;
        let found = self
            .fixture
            .lock()
            .unwrap()
            .guilds
            .iter()
            .find(|g| g.id == id)
            .cloned();
        found.map_or_else(|| not_found("guild"), Ok)
    }

    async fn guilds_range(&self, range: GuildRange) -> ConcordResult<Vec<Guild>> {
        self.enter("guilds_range").await?;
        let mut guilds = self.fixture.lock().unwrap().guilds.clone();
        guilds.sort_by_key(|g| g.id);
        Ok(guilds
            .into_iter()
            .filter(|g| range.after.is_none_or(|after| g.id > after))
            .filter(|g| range.before.is_none_or(|before| g.id < before))
            .take(range.limit)
            .collect())
    }

    async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member> {
        self.enter("member").await?;
        let found = self
            .fixture
            .lock()
            .unwrap()
            .members
            .get(&guild_id)
            .and_then(|members| members.iter().find(|m| m.user.id == user_id).cloned());
        found.map_or_else(|| not_found("member"), Ok)
    }

    async fn members(&self, guild_id: Snowflake, limit: u32) -> ConcordResult<Vec<Member>> {
        self.enter("members").await?;
        Ok(self
            .fixture
            .lock()
            .unwrap()
            .members
            .get(&guild_id)
            .map(|members| members.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<Message> {
        self.enter("message").await?;
        let found = self
            .fixture
            .lock()
            .unwrap()
            .messages
            .get(&channel_id)
            .and_then(|messages| messages.iter().find(|m| m.id == message_id).cloned());
        // The pull API does not report the guild of a message.
        found
            .map(|message| Message {
                guild_id: None,
                ..message
            })
            .map_or_else(|| not_found("message"), Ok)
    }

    async fn messages(&self, channel_id: Snowflake, limit: u32) -> ConcordResult<Vec<Message>> {
        self.enter("messages").await?;
        let history = self
            .fixture
            .lock()
            .unwrap()
            .messages
            .get(&channel_id)
            .cloned()
            .unwrap_or_default();
        let skip = history.len().saturating_sub(limit as usize);
        Ok(history
            .into_iter()
            .skip(skip)
            .map(|message| Message {
                guild_id: None,
                ..message
            })
            .collect())
    }

    async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>> {
        self.enter("roles").await?;
        let found = self.fixture.lock().unwrap().roles.get(&guild_id).cloned();
        found.map_or_else(|| not_found("guild"), Ok)
    }
}
