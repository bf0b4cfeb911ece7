//! Entity storage for the Concord state layer.
//!
//! This crate defines the [`Store`] contract that every storage backend implements,
//! and [`MemoryStore`], the reference in-memory backend.
//!
//! # Contract
//!
//! - **Self-synchronised**: implementations are safe to call from many tasks at once;
//!   callers never lock around them. Each individual mutation is atomic.
//! - **Defensive copies**: getters return owned values, so a later `set_*` or `remove_*`
//!   cannot change a result that was already handed out.
//! - **Not found sentinel**: a missing key is reported as
//!   [`StoreErrorKind::NotFound`](concord_error::StoreErrorKind::NotFound). Any other
//!   failure (I/O, a remote backend) uses a different kind.
//!
//! # Example
//!
//! ```rust
//! use concord_core::{Guild, Snowflake};
//! use concord_store::{MemoryStore, Store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new(50);
//!
//! store.set_guild(Guild::new(1u64, "zion", 2u64)).await?;
//! let guild = store.guild(Snowflake::new(1)).await?;
//! assert_eq!(guild.name, "zion");
//!
//! let missing = store.guild(Snowflake::new(9)).await.unwrap_err();
//! assert!(missing.is_not_found());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod store;

pub use concord_error::{StoreError, StoreErrorKind};
pub use memory::{DEFAULT_MAX_MESSAGES, MemoryStore};
pub use store::Store;
