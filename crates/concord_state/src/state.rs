//! The read-through state orchestrator.

use crate::StateConfig;
use concord_api::RestApi;
use concord_core::{Channel, Emoji, Guild, Member, Message, Presence, Role, Snowflake, User};
use concord_error::{ConcordError, ConcordResult, StoreError};
use concord_gateway::{EventDispatcher, EventHandler, Gateway, Ready, RequestGuildMembers, Subscription};
use concord_store::Store;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, instrument, trace, warn};

/// Messages requested when a channel's history is filled from the API.
const MESSAGE_FETCH_LIMIT: u32 = 100;

/// Cache-first view of the remote service.
///
/// Cloning is cheap; clones share storage, collaborators and the small-channel memo.
///
/// # Example
///
/// ```rust,ignore
/// let state = State::new(api, gateway, Arc::new(MemoryStore::default()), StateConfig::default());
/// let _subscription = state.hook(&dispatcher);
///
/// let guild = state.guild(guild_id).await?;      // storage, or one fetch on a miss
/// let perms = state.permissions(channel_id, user_id).await?;
/// ```
#[derive(Clone)]
pub struct State {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn RestApi>,
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn Store>,
    config: StateConfig,
    /// Channels known to hold fewer messages than the store cap.
    small_channels: Mutex<HashSet<Snowflake>>,
    ready: RwLock<Option<Ready>>,
    pre_handler: RwLock<Option<Arc<dyn EventHandler>>>,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("config", &self.inner.config)
            .field("small_channels", &self.small_channel_count())
            .finish_non_exhaustive()
    }
}

/// Log a storage miss before falling back to the API.
fn log_miss(entity: &'static str, error: &ConcordError) {
    if error.is_not_found() {
        debug!(entity, "Cache miss");
    } else {
        warn!(entity, error = %error, "Storage read failed, fetching instead");
    }
}

impl State {
    /// Create a state over the given collaborators.
    pub fn new(
        api: Arc<dyn RestApi>,
        gateway: Arc<dyn Gateway>,
        store: Arc<dyn Store>,
        config: StateConfig,
    ) -> Self {
        debug!(
            max_messages = store.max_messages(),
            max_fetch_members = config.max_fetch_members(),
            max_fetch_guilds = config.max_fetch_guilds(),
            "Creating state"
        );
        Self {
            inner: Arc::new(Inner {
                api,
                gateway,
                store,
                config,
                small_channels: Mutex::new(HashSet::new()),
                ready: RwLock::new(None),
                pre_handler: RwLock::new(None),
            }),
        }
    }

    /// The underlying storage.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.inner.store
    }

    /// The pull API.
    pub fn api(&self) -> &Arc<dyn RestApi> {
        &self.inner.api
    }

    /// The gateway used for outbound directives.
    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.inner.gateway
    }

    /// The configuration this state was built with.
    pub fn config(&self) -> &StateConfig {
        &self.inner.config
    }

    /// The session snapshot from the last `READY` event.
    pub fn ready(&self) -> Option<Ready> {
        self.inner
            .ready
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_ready(&self, ready: Option<Ready>) {
        *self
            .inner
            .ready
            .write()
            .unwrap_or_else(PoisonError::into_inner) = ready;
    }

    /// Handler run on every hooked event before the state updates storage.
    pub fn set_pre_handler(&self, handler: Option<Arc<dyn EventHandler>>) {
        *self
            .inner
            .pre_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = handler;
    }

    pub(crate) fn pre_handler(&self) -> Option<Arc<dyn EventHandler>> {
        self.inner
            .pre_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a channel is known to hold fewer messages than the store keeps.
    pub fn is_small_channel(&self, channel_id: Snowflake) -> bool {
        self.small_channels().contains(&channel_id)
    }

    fn small_channel_count(&self) -> usize {
        self.small_channels().len()
    }

    fn small_channels(&self) -> std::sync::MutexGuard<'_, HashSet<Snowflake>> {
        self.inner
            .small_channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_small_channel(&self, channel_id: Snowflake) {
        self.small_channels().insert(channel_id);
    }

    pub(crate) fn forget_small_channel(&self, channel_id: Snowflake) {
        self.small_channels().remove(&channel_id);
    }

    /// Subscribe this state to `dispatcher`, keeping storage current from events.
    pub fn hook(&self, dispatcher: &EventDispatcher) -> Subscription {
        dispatcher.subscribe(Arc::new(self.clone()))
    }

    /// Clear storage, the small-channel memo and the session snapshot.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> ConcordResult<()> {
        self.small_channels().clear();
        self.set_ready(None);
        self.store().reset().await
    }

    /// The authenticated user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> ConcordResult<User> {
        match self.store().me().await {
            Ok(me) => return Ok(me),
            Err(e) => log_miss("me", &e),
        }

        let me = self.api().me().await?;
        self.store().set_me(me.clone()).await?;
        Ok(me)
    }

    /// A channel by ID.
    #[instrument(skip_all, fields(%id))]
    pub async fn channel(&self, id: Snowflake) -> ConcordResult<Channel> {
        match self.store().channel(id).await {
            Ok(channel) => return Ok(channel),
            Err(e) => log_miss("channel", &e),
        }

        let channel = self.api().channel(id).await?;
        self.store().set_channel(channel.clone()).await?;
        Ok(channel)
    }

    /// All channels of a guild.
    #[instrument(skip_all, fields(%guild_id))]
    pub async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>> {
        match self.store().channels(guild_id).await {
            Ok(channels) => return Ok(channels),
            Err(e) => log_miss("channels", &e),
        }

        let channels = self.api().channels(guild_id).await?;
        for channel in &channels {
            self.store().set_channel(channel.clone()).await?;
        }
        debug!(count = channels.len(), "Filled channels");
        Ok(channels)
    }

    /// Direct message channels.
    #[instrument(skip(self))]
    pub async fn private_channels(&self) -> ConcordResult<Vec<Channel>> {
        match self.store().private_channels().await {
            Ok(channels) => return Ok(channels),
            Err(e) => log_miss("private_channels", &e),
        }

        let channels = self.api().private_channels().await?;
        for channel in &channels {
            self.store().set_channel(channel.clone()).await?;
        }
        debug!(count = channels.len(), "Filled private channels");
        Ok(channels)
    }

    /// A custom emoji of a guild.
    ///
    /// On a miss the guild's whole collection is fetched and stored; an ID absent from
    /// it is reported as not found.
    #[instrument(skip_all, fields(%guild_id, %emoji_id))]
    pub async fn emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> ConcordResult<Emoji> {
        match self.store().emoji(guild_id, emoji_id).await {
            Ok(emoji) => return Ok(emoji),
            Err(e) => log_miss("emoji", &e),
        }

        let emojis = self.api().emojis(guild_id).await?;
        self.store().set_emojis(guild_id, emojis.clone()).await?;

        emojis
            .into_iter()
            .find(|emoji| emoji.id == emoji_id)
            .ok_or_else(|| StoreError::not_found().into())
    }

    /// All custom emoji of a guild.
    #[instrument(skip_all, fields(%guild_id))]
    pub async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>> {
        match self.store().emojis(guild_id).await {
            Ok(emojis) => return Ok(emojis),
            Err(e) => log_miss("emojis", &e),
        }

        let emojis = self.api().emojis(guild_id).await?;
        self.store().set_emojis(guild_id, emojis.clone()).await?;
        Ok(emojis)
    }

    /// A guild by ID.
    #[instrument(skip_all, fields(%id))]
    pub async fn guild(&self, id: Snowflake) -> ConcordResult<Guild> {
        match self.store().guild(id).await {
            Ok(guild) => return Ok(guild),
            Err(e) => log_miss("guild", &e),
        }

        let guild = self.api().guild(id).await?;
        self.store().set_guild(guild.clone()).await?;
        Ok(guild)
    }

    /// Guilds the user belongs to.
    ///
    /// A cold fill enumerates at most `max_fetch_guilds` guilds.
    #[instrument(skip(self))]
    pub async fn guilds(&self) -> ConcordResult<Vec<Guild>> {
        match self.store().guilds().await {
            Ok(guilds) => return Ok(guilds),
            Err(e) => log_miss("guilds", &e),
        }

        let max = *self.config().max_fetch_guilds() as usize;
        let guilds = concord_api::guilds(self.api().as_ref(), max).await?;
        for guild in &guilds {
            self.store().set_guild(guild.clone()).await?;
        }
        debug!(count = guilds.len(), "Filled guilds");
        Ok(guilds)
    }

    /// A guild member.
    #[instrument(skip_all, fields(%guild_id, %user_id))]
    pub async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member> {
        match self.store().member(guild_id, user_id).await {
            Ok(member) => return Ok(member),
            Err(e) => log_miss("member", &e),
        }

        let member = self.api().member(guild_id, user_id).await?;
        self.store().set_member(guild_id, member.clone()).await?;
        Ok(member)
    }

    /// Members of a guild.
    ///
    /// A cold fill fetches up to `max_fetch_members` members, stores them, then asks
    /// the gateway to stream the rest. A failure to send that request is returned even
    /// though the fetched members were stored.
    #[instrument(skip_all, fields(%guild_id))]
    pub async fn members(&self, guild_id: Snowflake) -> ConcordResult<Vec<Member>> {
        match self.store().members(guild_id).await {
            Ok(members) => return Ok(members),
            Err(e) => log_miss("members", &e),
        }

        let members = self
            .api()
            .members(guild_id, *self.config().max_fetch_members())
            .await?;
        for member in &members {
            self.store().set_member(guild_id, member.clone()).await?;
        }
        debug!(count = members.len(), "Filled members, requesting stream");

        self.gateway()
            .request_guild_members(RequestGuildMembers::streaming(guild_id))
            .await?;
        Ok(members)
    }

    /// A message.
    ///
    /// Fetched messages get their guild ID from the channel before being stored.
    #[instrument(skip_all, fields(%channel_id, %message_id))]
    pub async fn message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<Message> {
        match self.store().message(channel_id, message_id).await {
            Ok(message) => return Ok(message),
            Err(e) => log_miss("message", &e),
        }

        let mut message = self.api().message(channel_id, message_id).await?;
        message.guild_id = self.channel_guild(channel_id).await;
        self.store().set_message(message.clone()).await?;
        Ok(message)
    }

    /// Recent messages of a channel, oldest first.
    ///
    /// Storage answers when it already holds a full history, or when the channel is
    /// known to be small. Otherwise the 100 most recent messages are fetched and
    /// stored; fewer than the store cap marks the channel small, otherwise the most
    /// recent `cap` are returned.
    #[instrument(skip_all, fields(%channel_id))]
    pub async fn messages(&self, channel_id: Snowflake) -> ConcordResult<Vec<Message>> {
        let cap = self.store().max_messages();

        match self.store().messages(channel_id).await {
            Ok(messages) if messages.len() >= cap => {
                trace!(count = messages.len(), "Storage holds full history");
                return Ok(messages);
            }
            Ok(messages) if self.is_small_channel(channel_id) => {
                trace!(count = messages.len(), "Small channel, skipping fetch");
                return Ok(messages);
            }
            Ok(messages) => debug!(count = messages.len(), cap, "Partial history, fetching"),
            Err(e) => log_miss("messages", &e),
        }

        let mut messages = self
            .api()
            .messages(channel_id, MESSAGE_FETCH_LIMIT)
            .await?;

        let guild_id = self.channel_guild(channel_id).await;
        for message in &mut messages {
            message.guild_id = guild_id;
            self.store().set_message(message.clone()).await?;
        }

        if messages.len() < cap {
            debug!(count = messages.len(), "Marking channel small");
            self.mark_small_channel(channel_id);
            return Ok(messages);
        }

        // Oldest first; keep the most recent `cap`, matching what storage retained.
        messages.drain(..messages.len() - cap);
        Ok(messages)
    }

    /// Guild of a channel for stamping fetched messages; lookup failures mean none.
    async fn channel_guild(&self, channel_id: Snowflake) -> Option<Snowflake> {
        match self.channel(channel_id).await {
            Ok(channel) => channel.guild_id,
            Err(e) => {
                debug!(%channel_id, error = %e, "Channel lookup failed, leaving guild unset");
                None
            }
        }
    }

    /// A user's presence. Storage only; never fetched.
    #[instrument(skip_all, fields(%guild_id, %user_id))]
    pub async fn presence(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ConcordResult<Presence> {
        self.store().presence(guild_id, user_id).await
    }

    /// Presences of a guild. Storage only; never fetched.
    #[instrument(skip_all, fields(%guild_id))]
    pub async fn presences(&self, guild_id: Snowflake) -> ConcordResult<Vec<Presence>> {
        self.store().presences(guild_id).await
    }

    /// A role of a guild.
    ///
    /// On a miss the guild's roles are fetched and stored. `Ok(None)` means the fetch
    /// succeeded but no role had this ID. If writing a fetched role back fails, that
    /// error is returned and the matching role is dropped even when it was already
    /// found; the store may then hold part of the collection.
    #[instrument(skip_all, fields(%guild_id, %role_id))]
    pub async fn role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ConcordResult<Option<Role>> {
        match self.store().role(guild_id, role_id).await {
            Ok(role) => return Ok(Some(role)),
            Err(e) => log_miss("role", &e),
        }

        let roles = self.api().roles(guild_id).await?;
        let mut found = None;
        for role in roles {
            if role.id == role_id {
                found = Some(role.clone());
            }
            self.store().set_role(guild_id, role).await?;
        }

        if found.is_none() {
            debug!("Role absent from fetched collection");
        }
        Ok(found)
    }

    /// Roles of a guild.
    #[instrument(skip_all, fields(%guild_id))]
    pub async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>> {
        match self.store().roles(guild_id).await {
            Ok(roles) => return Ok(roles),
            Err(e) => log_miss("roles", &e),
        }

        let roles = self.api().roles(guild_id).await?;
        for role in &roles {
            self.store().set_role(guild_id, role.clone()).await?;
        }
        debug!(count = roles.len(), "Filled roles");
        Ok(roles)
    }
}
