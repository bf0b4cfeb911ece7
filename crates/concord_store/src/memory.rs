//! In-memory storage backend.
//!
//! Every entity lives in one set of maps behind a single `RwLock`, so each trait call
//! observes and mutates a consistent snapshot. Nothing survives the process.

use crate::Store;
use async_trait::async_trait;
use concord_core::{Channel, Emoji, Guild, Member, Message, Presence, Role, Snowflake, User};
use concord_error::{ConcordResult, StoreError};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// Message cap used by [`MemoryStore::default`].
pub const DEFAULT_MAX_MESSAGES: usize = 50;

/// In-memory [`Store`].
///
/// Cloning is cheap and clones share the same entities.
///
/// # Example
/// ```no_run
/// use concord_store::MemoryStore;
///
/// let store = MemoryStore::new(100);
/// // Hand it to the state layer, or use the Store methods directly.
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// All cached entities
    entities: Arc<RwLock<Entities>>,
    /// Per-channel message cap
    max_messages: usize,
}

/// Internal storage structure.
#[derive(Debug, Default)]
struct Entities {
    me: Option<User>,
    guilds: BTreeMap<Snowflake, Guild>,
    channels: HashMap<Snowflake, Channel>,
    guild_channels: HashMap<Snowflake, Vec<Snowflake>>,
    private_channels: Vec<Snowflake>,
    members: HashMap<Snowflake, Vec<Member>>,
    presences: HashMap<Snowflake, Vec<Presence>>,
    roles: HashMap<Snowflake, Vec<Role>>,
    emojis: HashMap<Snowflake, Vec<Emoji>>,
    messages: HashMap<Snowflake, VecDeque<Message>>,
}

impl Entities {
    fn file_channel(&mut self, channel: &Channel) {
        let list = match parent_guild(channel) {
            Some(guild_id) => self.guild_channels.entry(guild_id).or_default(),
            None => &mut self.private_channels,
        };
        if !list.contains(&channel.id) {
            list.push(channel.id);
        }
    }

    fn unfile_channel(&mut self, channel: &Channel) {
        let list = match parent_guild(channel) {
            Some(guild_id) => match self.guild_channels.get_mut(&guild_id) {
                Some(list) => list,
                None => return,
            },
            None => &mut self.private_channels,
        };
        list.retain(|id| *id != channel.id);
    }

    fn collect_channels(&self, ids: &[Snowflake]) -> Vec<Channel> {
        ids.iter()
            .filter_map(|id| self.channels.get(id))
            .cloned()
            .collect()
    }
}

/// The guild a channel is filed under, `None` for private channels.
fn parent_guild(channel: &Channel) -> Option<Snowflake> {
    channel.guild_id.filter(|id| id.is_valid())
}

/// Replace the first element matching `same`, or append.
fn upsert<T>(list: &mut Vec<T>, value: T, same: impl Fn(&T) -> bool) {
    match list.iter_mut().find(|existing| same(existing)) {
        Some(slot) => *slot = value,
        None => list.push(value),
    }
}

/// Remove the first element matching `same`.
#[track_caller]
fn remove_first<T>(list: Option<&mut Vec<T>>, same: impl Fn(&T) -> bool) -> ConcordResult<()> {
    let list = list.ok_or_else(StoreError::not_found)?;
    let position = list
        .iter()
        .position(same)
        .ok_or_else(StoreError::not_found)?;
    list.remove(position);
    Ok(())
}

/// Clone the first element matching `same`.
#[track_caller]
fn find_cloned<T: Clone>(list: Option<&Vec<T>>, same: impl Fn(&T) -> bool) -> ConcordResult<T> {
    list.and_then(|list| list.iter().find(|item| same(item)))
        .cloned()
        .ok_or_else(|| StoreError::not_found().into())
}

/// Clone a whole collection.
#[track_caller]
fn clone_all<T: Clone>(list: Option<&Vec<T>>) -> ConcordResult<Vec<T>> {
    list.cloned().ok_or_else(|| StoreError::not_found().into())
}

impl MemoryStore {
    /// Create an empty store keeping at most `max_messages` messages per channel.
    pub fn new(max_messages: usize) -> Self {
        debug!(max_messages, "Creating in-memory store");
        Self {
            entities: Arc::new(RwLock::new(Entities::default())),
            max_messages,
        }
    }

    /// Number of guilds held (for testing and diagnostics).
    pub async fn guild_count(&self) -> usize {
        self.entities.read().await.guilds.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn me(&self) -> ConcordResult<User> {
        self.entities
            .read()
            .await
            .me
            .clone()
            .ok_or_else(|| StoreError::not_found().into())
    }

    #[instrument(level = "trace", skip(self, me), fields(user_id = %me.id))]
    async fn set_me(&self, me: User) -> ConcordResult<()> {
        self.entities.write().await.me = Some(me);
        Ok(())
    }

    async fn channel(&self, id: Snowflake) -> ConcordResult<Channel> {
        self.entities
            .read()
            .await
            .channels
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found().into())
    }

    async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>> {
        let entities = self.entities.read().await;
        let ids = entities
            .guild_channels
            .get(&guild_id)
            .ok_or_else(StoreError::not_found)?;
        Ok(entities.collect_channels(ids))
    }

    async fn private_channels(&self) -> ConcordResult<Vec<Channel>> {
        let entities = self.entities.read().await;
        if entities.private_channels.is_empty() {
            return Err(StoreError::not_found().into());
        }
        Ok(entities.collect_channels(&entities.private_channels))
    }

    #[instrument(level = "trace", skip(self, channel), fields(channel_id = %channel.id))]
    async fn set_channel(&self, channel: Channel) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;

        // A channel moving between parents must leave its old list.
        if let Some(previous) = entities.channels.get(&channel.id).cloned()
            && parent_guild(&previous) != parent_guild(&channel)
        {
            entities.unfile_channel(&previous);
        }

        entities.file_channel(&channel);
        entities.channels.insert(channel.id, channel);
        Ok(())
    }

    #[instrument(level = "trace", skip(self, channel), fields(channel_id = %channel.id))]
    async fn remove_channel(&self, channel: &Channel) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        let stored = entities
            .channels
            .remove(&channel.id)
            .ok_or_else(StoreError::not_found)?;
        entities.unfile_channel(&stored);
        entities.messages.remove(&channel.id);
        Ok(())
    }

    async fn emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> ConcordResult<Emoji> {
        let entities = self.entities.read().await;
        find_cloned(entities.emojis.get(&guild_id), |emoji| emoji.id == emoji_id)
    }

    async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>> {
        clone_all(self.entities.read().await.emojis.get(&guild_id))
    }

    #[instrument(level = "trace", skip(self, emojis), fields(count = emojis.len()))]
    async fn set_emojis(&self, guild_id: Snowflake, emojis: Vec<Emoji>) -> ConcordResult<()> {
        self.entities.write().await.emojis.insert(guild_id, emojis);
        Ok(())
    }

    async fn remove_emojis(&self, guild_id: Snowflake) -> ConcordResult<()> {
        self.entities
            .write()
            .await
            .emojis
            .remove(&guild_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found().into())
    }

    async fn guild(&self, id: Snowflake) -> ConcordResult<Guild> {
        self.entities
            .read()
            .await
            .guilds
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found().into())
    }

    async fn guilds(&self) -> ConcordResult<Vec<Guild>> {
        let entities = self.entities.read().await;
        if entities.guilds.is_empty() {
            return Err(StoreError::not_found().into());
        }
        Ok(entities.guilds.values().cloned().collect())
    }

    #[instrument(level = "trace", skip(self, guild), fields(guild_id = %guild.id))]
    async fn set_guild(&self, guild: Guild) -> ConcordResult<()> {
        self.entities.write().await.guilds.insert(guild.id, guild);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    async fn remove_guild(&self, id: Snowflake) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        entities
            .guilds
            .remove(&id)
            .ok_or_else(StoreError::not_found)?;

        if let Some(channel_ids) = entities.guild_channels.remove(&id) {
            for channel_id in channel_ids {
                entities.channels.remove(&channel_id);
                entities.messages.remove(&channel_id);
            }
        }
        entities.members.remove(&id);
        entities.presences.remove(&id);
        entities.roles.remove(&id);
        entities.emojis.remove(&id);

        trace!(guild_id = %id, "Removed guild and its children");
        Ok(())
    }

    async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member> {
        let entities = self.entities.read().await;
        find_cloned(entities.members.get(&guild_id), |m| m.user.id == user_id)
    }

    async fn members(&self, guild_id: Snowflake) -> ConcordResult<Vec<Member>> {
        clone_all(self.entities.read().await.members.get(&guild_id))
    }

    async fn set_member(&self, guild_id: Snowflake, member: Member) -> ConcordResult<()> {
        let user_id = member.user.id;
        let mut entities = self.entities.write().await;
        let members = entities.members.entry(guild_id).or_default();
        upsert(members, member, |m| m.user.id == user_id);
        Ok(())
    }

    async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        remove_first(entities.members.get_mut(&guild_id), |m| m.user.id == user_id)
    }

    async fn message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<Message> {
        self.entities
            .read()
            .await
            .messages
            .get(&channel_id)
            .and_then(|messages| messages.iter().find(|m| m.id == message_id))
            .cloned()
            .ok_or_else(|| StoreError::not_found().into())
    }

    async fn messages(&self, channel_id: Snowflake) -> ConcordResult<Vec<Message>> {
        self.entities
            .read()
            .await
            .messages
            .get(&channel_id)
            .map(|messages| messages.iter().cloned().collect())
            .ok_or_else(|| StoreError::not_found().into())
    }

    #[instrument(
        level = "trace",
        skip(self, message),
        fields(channel_id = %message.channel_id, message_id = %message.id)
    )]
    async fn set_message(&self, message: Message) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        let messages = entities.messages.entry(message.channel_id).or_default();

        if let Some(existing) = messages.iter_mut().find(|m| m.id == message.id) {
            *existing = message;
            return Ok(());
        }

        messages.push_back(message);
        while messages.len() > self.max_messages {
            messages.pop_front();
        }
        Ok(())
    }

    async fn remove_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        let messages = entities
            .messages
            .get_mut(&channel_id)
            .ok_or_else(StoreError::not_found)?;
        let position = messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(StoreError::not_found)?;
        messages.remove(position);
        Ok(())
    }

    fn max_messages(&self) -> usize {
        self.max_messages
    }

    async fn presence(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Presence> {
        let entities = self.entities.read().await;
        find_cloned(entities.presences.get(&guild_id), |p| p.user.id == user_id)
    }

    async fn presences(&self, guild_id: Snowflake) -> ConcordResult<Vec<Presence>> {
        clone_all(self.entities.read().await.presences.get(&guild_id))
    }

    async fn set_presence(&self, guild_id: Snowflake, presence: Presence) -> ConcordResult<()> {
        let user_id = presence.user.id;
        let mut entities = self.entities.write().await;
        let presences = entities.presences.entry(guild_id).or_default();
        upsert(presences, presence, |p| p.user.id == user_id);
        Ok(())
    }

    async fn remove_presence(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        remove_first(entities.presences.get_mut(&guild_id), |p| {
            p.user.id == user_id
        })
    }

    async fn role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<Role> {
        let entities = self.entities.read().await;
        find_cloned(entities.roles.get(&guild_id), |role| role.id == role_id)
    }

    async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>> {
        clone_all(self.entities.read().await.roles.get(&guild_id))
    }

    async fn set_role(&self, guild_id: Snowflake, role: Role) -> ConcordResult<()> {
        let role_id = role.id;
        let mut entities = self.entities.write().await;
        let roles = entities.roles.entry(guild_id).or_default();
        upsert(roles, role, |r| r.id == role_id);
        Ok(())
    }

    async fn remove_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<()> {
        let mut entities = self.entities.write().await;
        remove_first(entities.roles.get_mut(&guild_id), |r| r.id == role_id)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> ConcordResult<()> {
        *self.entities.write().await = Entities::default();
        debug!("Reset in-memory store");
        Ok(())
    }
}
