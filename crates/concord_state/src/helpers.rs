//! Derived lookups built on top of the read-through accessors.

use crate::State;
use concord_core::{Color, Message, Permissions, Snowflake, calc_overwrites};
use concord_error::{ConcordResult, LookupError, StoreError};
use tracing::{debug, instrument};

impl State {
    /// Name to show for a message author: nickname in the guild, else username.
    ///
    /// Never fails; messages outside a guild and failed lookups use the username.
    pub async fn author_display_name(&self, message: &Message) -> String {
        let Some(guild_id) = message.guild_id.filter(|id| id.is_valid()) else {
            return message.author.username.clone();
        };

        match self.member_display_name(guild_id, message.author.id).await {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "Falling back to username");
                message.author.username.clone()
            }
        }
    }

    /// Nickname of a member, else their username.
    #[instrument(skip_all, fields(%guild_id, %user_id))]
    pub async fn member_display_name(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ConcordResult<String> {
        let member = self.member(guild_id, user_id).await?;
        Ok(member.display_name().to_string())
    }

    /// Color of a message author.
    ///
    /// Never fails; messages outside a guild get [`Color::DEFAULT_MEMBER`].
    pub async fn author_color(&self, message: &Message) -> Color {
        match message.guild_id.filter(|id| id.is_valid()) {
            Some(guild_id) => self.member_color(guild_id, message.author.id).await,
            None => Color::DEFAULT_MEMBER,
        }
    }

    /// Color of a member's highest colored role.
    ///
    /// Never fails; any failed lookup yields [`Color::DEFAULT_MEMBER`].
    #[instrument(skip_all, fields(%guild_id, %user_id))]
    pub async fn member_color(&self, guild_id: Snowflake, user_id: Snowflake) -> Color {
        let member = match self.member(guild_id, user_id).await {
            Ok(member) => member,
            Err(e) => {
                debug!(error = %e, "No member, using default color");
                return Color::DEFAULT_MEMBER;
            }
        };

        match self.roles(guild_id).await {
            Ok(roles) => concord_core::member_color(&member, &roles),
            Err(e) => {
                debug!(error = %e, "No roles, using default color");
                Color::DEFAULT_MEMBER
            }
        }
    }

    /// Effective permissions of a user in a channel.
    ///
    /// Each lookup failure is labelled with its stage: `"channel"`, `"guild"`,
    /// `"member"` or `"roles"`. A channel outside any guild fails at `"guild"` with a
    /// not-found error.
    #[instrument(skip_all, fields(%channel_id, %user_id))]
    pub async fn permissions(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ConcordResult<Permissions> {
        let channel = self
            .channel(channel_id)
            .await
            .map_err(|e| LookupError::new("channel", e))?;

        let guild_id = channel
            .guild_id
            .filter(|id| id.is_valid())
            .ok_or_else(|| LookupError::new("guild", StoreError::not_found().into()))?;

        let guild = self
            .guild(guild_id)
            .await
            .map_err(|e| LookupError::new("guild", e))?;

        let member = self
            .member(guild_id, user_id)
            .await
            .map_err(|e| LookupError::new("member", e))?;

        let roles = self
            .roles(guild_id)
            .await
            .map_err(|e| LookupError::new("roles", e))?;

        Ok(calc_overwrites(&guild, &channel, &member, &roles))
    }
}
