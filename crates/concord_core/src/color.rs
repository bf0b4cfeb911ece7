//! Role colors.

use crate::{Member, Role};
use serde::{Deserialize, Serialize};

/// A 24-bit RGB color.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("#{:06x}", _0)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Color used for members without a colored role.
    pub const DEFAULT_MEMBER: Color = Color(0x000000);

    /// Wrap a raw `0xRRGGBB` value (upper byte is discarded).
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// The raw `0xRRGGBB` value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is the "no color" value.
    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT_MEMBER.0
    }

    /// Split into red, green and blue components.
    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// Color of the highest positioned colored role the member holds.
///
/// Roles the member does not hold and roles without a color are skipped; with no
/// candidate the result is [`Color::DEFAULT_MEMBER`].
///
/// # Examples
///
/// ```
/// use concord_core::{Color, Member, Role, User, member_color};
///
/// let roles = vec![
///     Role::new(10u64, "mod").with_color(Color::new(0x3498db)).with_position(2),
///     Role::new(11u64, "admin").with_color(Color::new(0xe74c3c)).with_position(5),
/// ];
/// let member = Member::new(User::new(1u64, "neo")).with_role_ids(vec![10u64.into()]);
/// assert_eq!(member_color(&member, &roles), Color::new(0x3498db));
/// ```
pub fn member_color(member: &Member, roles: &[Role]) -> Color {
    roles
        .iter()
        .filter(|role| !role.color.is_default() && member.role_ids.contains(&role.id))
        .max_by_key(|role| role.position)
        .map(|role| role.color)
        .unwrap_or(Color::DEFAULT_MEMBER)
}
