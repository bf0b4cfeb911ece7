//! Permission bit sets and channel overwrite resolution.

use crate::{Channel, Guild, Member, OverwriteKind, Role};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// A set of permission bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Create instant invites
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Kick members
        const KICK_MEMBERS = 1 << 1;
        /// Ban members
        const BAN_MEMBERS = 1 << 2;
        /// Bypasses every other check
        const ADMINISTRATOR = 1 << 3;
        /// Manage channels
        const MANAGE_CHANNELS = 1 << 4;
        /// Manage the guild
        const MANAGE_GUILD = 1 << 5;
        /// Add reactions
        const ADD_REACTIONS = 1 << 6;
        /// See the channel
        const VIEW_CHANNEL = 1 << 10;
        /// Send messages
        const SEND_MESSAGES = 1 << 11;
        /// Delete other users' messages
        const MANAGE_MESSAGES = 1 << 13;
        /// Embed links
        const EMBED_LINKS = 1 << 14;
        /// Attach files
        const ATTACH_FILES = 1 << 15;
        /// Read message history
        const READ_MESSAGE_HISTORY = 1 << 16;
        /// Mention @everyone
        const MENTION_EVERYONE = 1 << 17;
        /// Connect to voice
        const CONNECT = 1 << 20;
        /// Speak in voice
        const SPEAK = 1 << 21;
        /// Change own nickname
        const CHANGE_NICKNAME = 1 << 26;
        /// Manage roles
        const MANAGE_ROLES = 1 << 28;
        /// Manage emoji
        const MANAGE_EMOJIS = 1 << 30;
        /// Every permission bit the service defines.
        const ALL = (1 << 31) - 1;
    }
}

impl Permissions {
    /// No permissions.
    pub const NONE: Permissions = Permissions::empty();

    fn apply(self, allow: Permissions, deny: Permissions) -> Self {
        self.difference(deny).union(allow)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

// Raw integer on the wire, unknown bits preserved.
impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// Effective permissions of `member` in `channel`.
///
/// Resolution order:
/// 1. The guild owner holds every permission.
/// 2. Base = `@everyone` role (ID equal to the guild ID) plus every role the member holds.
/// 3. `ADMINISTRATOR` in the base grants every permission.
/// 4. The channel's `@everyone` overwrite, then the union of the member's role
///    overwrites (deny before allow), then the member-specific overwrite.
///
/// `roles` is the guild's role list; roles the member does not hold are ignored.
pub fn calc_overwrites(
    guild: &Guild,
    channel: &Channel,
    member: &Member,
    roles: &[Role],
) -> Permissions {
    if guild.owner_id == member.user.id {
        return Permissions::ALL;
    }

    let mut perms = roles
        .iter()
        .find(|role| role.id == guild.id)
        .map(|role| role.permissions)
        .unwrap_or_default();

    for role in roles {
        if member.role_ids.contains(&role.id) {
            perms |= role.permissions;
        }
    }

    if perms.contains(Permissions::ADMINISTRATOR) {
        return Permissions::ALL;
    }

    let overwrites = &channel.permission_overwrites;

    if let Some(everyone) = overwrites
        .iter()
        .find(|ow| ow.kind == OverwriteKind::Role && ow.id == guild.id)
    {
        perms = perms.apply(everyone.allow, everyone.deny);
    }

    let mut allow = Permissions::NONE;
    let mut deny = Permissions::NONE;
    for ow in overwrites
        .iter()
        .filter(|ow| ow.kind == OverwriteKind::Role && member.role_ids.contains(&ow.id))
    {
        allow |= ow.allow;
        deny |= ow.deny;
    }
    perms = perms.apply(allow, deny);

    if let Some(own) = overwrites
        .iter()
        .find(|ow| ow.kind == OverwriteKind::Member && ow.id == member.user.id)
    {
        perms = perms.apply(own.allow, own.deny);
    }

    perms
}
