//! Store wrapper that injects backend failures.

use async_trait::async_trait;
use concord_core::{Channel, Emoji, Guild, Member, Message, Presence, Role, Snowflake, User};
use concord_error::{ConcordResult, StoreError, StoreErrorKind};
use concord_store::{MemoryStore, Store};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Delegates to a [`MemoryStore`], failing reads or writes on demand.
#[derive(Clone)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: Arc<AtomicBool>,
    /// Writes still allowed before every write fails; `usize::MAX` means unlimited.
    writes_left: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FlakyStore {
    /// A store that behaves like a plain [`MemoryStore`].
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::default(),
            fail_reads: Arc::new(AtomicBool::new(false)),
            writes_left: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    /// The wrapped store, for seeding and inspecting without failures.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Fail every read with a backend error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Allow `count` more writes, then fail all writes.
    pub fn fail_writes_after(&self, count: usize) {
        self.writes_left.store(count, Ordering::SeqCst);
    }

    fn read(&self) -> ConcordResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::new(StoreErrorKind::Backend("disk on fire".into())).into());
        }
        Ok(())
    }

    fn write(&self) -> ConcordResult<()> {
        let allowed = self
            .writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                usize::MAX => Some(usize::MAX),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok();
        if !allowed {
            return Err(StoreError::new(StoreErrorKind::Backend("read-only".into())).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn me(&self) -> ConcordResult<User> {
        self.read()?;
        self.inner.me().await
    }

    async fn set_me(&self, me: User) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_me(me).await
    }

    async fn channel(&self, id: Snowflake) -> ConcordResult<Channel> {
        self.read()?;
        self.inner.channel(id).await
    }

    async fn channels(&self, guild_id: Snowflake) -> ConcordResult<Vec<Channel>> {
        self.read()?;
        self.inner.channels(guild_id).await
    }

    async fn private_channels(&self) -> ConcordResult<Vec<Channel>> {
        self.read()?;
        self.inner.private_channels().await
    }

    async fn set_channel(&self, channel: Channel) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_channel(channel).await
    }

    async fn remove_channel(&self, channel: &Channel) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_channel(channel).await
    }

    async fn emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> ConcordResult<Emoji> {
        self.read()?;
        self.inner.emoji(guild_id, emoji_id).await
    }

    async fn emojis(&self, guild_id: Snowflake) -> ConcordResult<Vec<Emoji>> {
        self.read()?;
        self.inner.emojis(guild_id).await
    }

    async fn set_emojis(&self, guild_id: Snowflake, emojis: Vec<Emoji>) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_emojis(guild_id, emojis).await
    }

    async fn remove_emojis(&self, guild_id: Snowflake) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_emojis(guild_id).await
    }

    async fn guild(&self, id: Snowflake) -> ConcordResult<Guild> {
        self.read()?;
        self.inner.guild(id).await
    }

    async fn guilds(&self) -> ConcordResult<Vec<Guild>> {
        self.read()?;
        self.inner.guilds().await
    }

    async fn set_guild(&self, guild: Guild) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_guild(guild).await
    }

    async fn remove_guild(&self, id: Snowflake) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_guild(id).await
    }

    async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Member> {
        self.read()?;
        self.inner.member(guild_id, user_id).await
    }

    async fn members(&self, guild_id: Snowflake) -> ConcordResult<Vec<Member>> {
        self.read()?;
        self.inner.members(guild_id).await
    }

    async fn set_member(&self, guild_id: Snowflake, member: Member) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_member(guild_id, member).await
    }

    async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_member(guild_id, user_id).await
    }

    async fn message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<Message> {
        self.read()?;
        self.inner.message(channel_id, message_id).await
    }

    async fn messages(&self, channel_id: Snowflake) -> ConcordResult<Vec<Message>> {
        self.read()?;
        self.inner.messages(channel_id).await
    }

    async fn set_message(&self, message: Message) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_message(message).await
    }

    async fn remove_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_message(channel_id, message_id).await
    }

    fn max_messages(&self) -> usize {
        self.inner.max_messages()
    }

    async fn presence(&self, guild_id: Snowflake, user_id: Snowflake) -> ConcordResult<Presence> {
        self.read()?;
        self.inner.presence(guild_id, user_id).await
    }

    async fn presences(&self, guild_id: Snowflake) -> ConcordResult<Vec<Presence>> {
        self.read()?;
        self.inner.presences(guild_id).await
    }

    async fn set_presence(&self, guild_id: Snowflake, presence: Presence) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_presence(guild_id, presence).await
    }

    async fn remove_presence(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_presence(guild_id, user_id).await
    }

    async fn role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<Role> {
        self.read()?;
        self.inner.role(guild_id, role_id).await
    }

    async fn roles(&self, guild_id: Snowflake) -> ConcordResult<Vec<Role>> {
        self.read()?;
        self.inner.roles(guild_id).await
    }

    async fn set_role(&self, guild_id: Snowflake, role: Role) -> ConcordResult<()> {
        self.write()?;
        self.inner.set_role(guild_id, role).await
    }

    async fn remove_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ConcordResult<()> {
        self.write()?;
        self.inner.remove_role(guild_id, role_id).await
    }

    async fn reset(&self) -> ConcordResult<()> {
        self.inner.reset().await
    }
}
