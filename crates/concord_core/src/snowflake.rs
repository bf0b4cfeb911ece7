//! Time-ordered 64-bit identifiers.

use serde::{Deserialize, Serialize};

/// Milliseconds between the Unix epoch and the first second of 2015.
pub const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// A 64-bit identifier whose high bits encode its creation time.
///
/// Ordering snowflakes orders entities by creation time, which is what the
/// pagination cursor relies on. Zero is never issued and is treated as "absent".
///
/// # Examples
///
/// ```
/// use concord_core::Snowflake;
///
/// let older = Snowflake::new(175928847299117063);
/// let newer = Snowflake::new(175928847299117064);
/// assert!(older < newer);
/// assert!(older.is_valid());
/// assert!(!Snowflake::default().is_valid());
/// assert_eq!(older.timestamp_millis(), 1_462_015_105_796);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this identifier could have been issued (non-zero).
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub const fn timestamp_millis(self) -> u64 {
        (self.0 >> 22) + DISCORD_EPOCH_MILLIS
    }

    /// Creation time as a UTC timestamp.
    pub fn created_at(self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp_millis() as i64)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}
