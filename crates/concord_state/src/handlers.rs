//! Applying push events to storage.

use crate::State;
use async_trait::async_trait;
use concord_core::Snowflake;
use concord_error::{ConcordError, ConcordResult};
use concord_gateway::{Event, EventHandler, GuildCreate, MemberUpdate, MessageUpdate};
use tracing::{debug, instrument, warn};

/// Collects the outcome of the store writes one event causes.
struct Applied {
    event: &'static str,
    first_error: Option<ConcordError>,
}

impl Applied {
    fn new(event: &'static str) -> Self {
        Self {
            event,
            first_error: None,
        }
    }

    fn record(&mut self, result: ConcordResult<()>) {
        let Err(e) = result else {
            return;
        };
        if e.is_not_found() {
            debug!(event = self.event, error = %e, "State update skipped");
        } else {
            warn!(event = self.event, error = %e, "State update failed");
        }
        if self.first_error.is_none() {
            self.first_error = Some(e);
        }
    }

    fn finish(self) -> ConcordResult<()> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl State {
    /// Apply one push event to storage.
    ///
    /// Every write the event implies is attempted; the first failure is returned.
    /// Partial updates for entities not in storage are dropped.
    #[instrument(skip_all, fields(event = event.name()))]
    pub async fn handle_event(&self, event: &Event) -> ConcordResult<()> {
        let mut applied = Applied::new(event.name());
        let store = self.store();

        match event {
            Event::Ready(ready) => {
                self.set_ready(Some(ready.clone()));
                applied.record(store.set_me(ready.user.clone()).await);
                for guild in &ready.guilds {
                    applied.record(store.set_guild(guild.clone()).await);
                }
                for channel in &ready.private_channels {
                    applied.record(store.set_channel(channel.clone()).await);
                }
            }
            Event::GuildCreate(create) => self.apply_guild_create(create, &mut applied).await,
            Event::GuildUpdate(guild) => applied.record(store.set_guild(guild.clone()).await),
            Event::GuildDelete { id, unavailable } => {
                self.apply_guild_delete(*id, *unavailable, &mut applied)
                    .await
            }
            Event::ChannelCreate(channel) | Event::ChannelUpdate(channel) => {
                applied.record(store.set_channel(channel.clone()).await)
            }
            Event::ChannelDelete(channel) => {
                self.forget_small_channel(channel.id);
                applied.record(store.remove_channel(channel).await);
            }
            Event::GuildMemberAdd { guild_id, member } => {
                applied.record(store.set_member(*guild_id, member.clone()).await)
            }
            Event::GuildMemberUpdate(update) => {
                applied.record(self.apply_member_update(update).await)
            }
            Event::GuildMemberRemove { guild_id, user } => {
                applied.record(store.remove_member(*guild_id, user.id).await)
            }
            Event::GuildMembersChunk {
                guild_id,
                members,
                presences,
            } => {
                for member in members {
                    applied.record(store.set_member(*guild_id, member.clone()).await);
                }
                for presence in presences {
                    applied.record(store.set_presence(*guild_id, presence.clone()).await);
                }
                debug!(%guild_id, members = members.len(), "Stored member chunk");
            }
            Event::GuildRoleCreate { guild_id, role } | Event::GuildRoleUpdate { guild_id, role } => {
                applied.record(store.set_role(*guild_id, role.clone()).await)
            }
            Event::GuildRoleDelete { guild_id, role_id } => {
                applied.record(store.remove_role(*guild_id, *role_id).await)
            }
            Event::GuildEmojisUpdate { guild_id, emojis } => {
                applied.record(store.set_emojis(*guild_id, emojis.clone()).await)
            }
            Event::MessageCreate(message) => {
                applied.record(store.set_message(message.clone()).await)
            }
            Event::MessageUpdate(update) => {
                applied.record(self.apply_message_update(update).await)
            }
            Event::MessageDelete { id, channel_id, .. } => {
                applied.record(store.remove_message(*channel_id, *id).await)
            }
            Event::MessageDeleteBulk {
                ids, channel_id, ..
            } => {
                for id in ids {
                    applied.record(store.remove_message(*channel_id, *id).await);
                }
            }
            Event::PresenceUpdate { guild_id, presence } => {
                applied.record(store.set_presence(*guild_id, presence.clone()).await)
            }
            Event::UserUpdate(user) => applied.record(store.set_me(user.clone()).await),
        }

        applied.finish()
    }

    async fn apply_guild_create(&self, create: &GuildCreate, applied: &mut Applied) {
        let store = self.store();
        let guild_id = create.guild.id;

        applied.record(store.set_guild(create.guild.clone()).await);
        for channel in &create.channels {
            let mut channel = channel.clone();
            // Channels nested in a guild payload omit their guild.
            if channel.guild_id.is_none() {
                channel.guild_id = Some(guild_id);
            }
            applied.record(store.set_channel(channel).await);
        }
        for member in &create.members {
            applied.record(store.set_member(guild_id, member.clone()).await);
        }
        for role in &create.roles {
            applied.record(store.set_role(guild_id, role.clone()).await);
        }
        applied.record(store.set_emojis(guild_id, create.emojis.clone()).await);
        for presence in &create.presences {
            applied.record(store.set_presence(guild_id, presence.clone()).await);
        }
    }

    async fn apply_guild_delete(&self, id: Snowflake, unavailable: bool, applied: &mut Applied) {
        let store = self.store();

        if unavailable {
            match store.guild(id).await {
                Ok(mut guild) => {
                    guild.unavailable = true;
                    applied.record(store.set_guild(guild).await);
                }
                Err(e) => debug!(guild_id = %id, error = %e, "Unavailable guild not stored"),
            }
            return;
        }

        if let Ok(channels) = store.channels(id).await {
            for channel in channels {
                self.forget_small_channel(channel.id);
            }
        }
        applied.record(store.remove_guild(id).await);
    }

    async fn apply_member_update(&self, update: &MemberUpdate) -> ConcordResult<()> {
        let store = self.store();
        let mut member = match store.member(update.guild_id, update.user.id).await {
            Ok(member) => member,
            Err(e) if e.is_not_found() => {
                debug!(user_id = %update.user.id, "Dropping update for unknown member");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        member.user = update.user.clone();
        member.role_ids = update.role_ids.clone();
        member.nick = update.nick.clone();
        store.set_member(update.guild_id, member).await
    }

    async fn apply_message_update(&self, update: &MessageUpdate) -> ConcordResult<()> {
        let store = self.store();
        let mut message = match store.message(update.channel_id, update.id).await {
            Ok(message) => message,
            Err(e) if e.is_not_found() => {
                debug!(message_id = %update.id, "Dropping update for unknown message");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if let Some(content) = &update.content {
            message.content = content.clone();
        }
        if let Some(edited) = update.edited_timestamp {
            message.edited_timestamp = Some(edited);
        }
        store.set_message(message).await
    }
}

#[async_trait]
impl EventHandler for State {
    async fn handle(&self, event: &Event) {
        if let Some(pre_handler) = self.pre_handler() {
            pre_handler.handle(event).await;
        }
        // Failures were logged as they happened; nobody is waiting on the result.
        let _ = self.handle_event(event).await;
    }
}
