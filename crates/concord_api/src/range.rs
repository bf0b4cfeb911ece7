//! Ranged fetch requests.

use concord_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Largest page a ranged endpoint returns.
pub const MAX_GUILD_PAGE: usize = 100;

/// One page request against a ranged endpoint.
///
/// `limit` is always in `1..=MAX_GUILD_PAGE`; a requested limit of zero means a full
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRange {
    /// Only entities with an ID below this one
    pub before: Option<Snowflake>,
    /// Only entities with an ID above this one
    pub after: Option<Snowflake>,
    /// Page size
    pub limit: usize,
}

impl GuildRange {
    /// An unbounded page of `limit` entities.
    ///
    /// ```
    /// use concord_api::{GuildRange, MAX_GUILD_PAGE};
    ///
    /// assert_eq!(GuildRange::new(0).limit, MAX_GUILD_PAGE);
    /// assert_eq!(GuildRange::new(250).limit, MAX_GUILD_PAGE);
    /// assert_eq!(GuildRange::new(7).limit, 7);
    /// ```
    pub fn new(limit: usize) -> Self {
        let limit = match limit {
            0 => MAX_GUILD_PAGE,
            n => n.min(MAX_GUILD_PAGE),
        };
        Self {
            before: None,
            after: None,
            limit,
        }
    }

    /// A page of entities created before `id`.
    pub fn before(id: impl Into<Snowflake>, limit: usize) -> Self {
        Self {
            before: Some(id.into()),
            ..Self::new(limit)
        }
    }

    /// A page of entities created after `id`.
    pub fn after(id: impl Into<Snowflake>, limit: usize) -> Self {
        Self {
            after: Some(id.into()),
            ..Self::new(limit)
        }
    }
}

impl Default for GuildRange {
    fn default() -> Self {
        Self::new(MAX_GUILD_PAGE)
    }
}
