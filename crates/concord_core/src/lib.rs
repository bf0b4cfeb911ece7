//! Core data types for the Concord state layer.
//!
//! Entities are plain records keyed by [`Snowflake`]. Only the fields the state layer
//! and its derived helpers need are modelled; everything else about the remote schema
//! is the transport's business.
//!
//! | Entity | Key |
//! |---|---|
//! | [`User`] | id |
//! | [`Channel`] | id (guild optional) |
//! | [`Guild`] | id |
//! | [`Member`] | (guild, user id) |
//! | [`Message`] | (channel, id) |
//! | [`Role`] | (guild, id) |
//! | [`Emoji`] | (guild, id) |
//! | [`Presence`] | (guild, user id) |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod color;
mod emoji;
mod guild;
mod member;
mod message;
mod permissions;
mod presence;
mod role;
mod snowflake;
mod user;

pub use channel::{Channel, ChannelKind, Overwrite, OverwriteKind};
pub use color::{Color, member_color};
pub use emoji::Emoji;
pub use guild::Guild;
pub use member::Member;
pub use message::Message;
pub use permissions::{Permissions, calc_overwrites};
pub use presence::{Presence, Status};
pub use role::Role;
pub use snowflake::{DISCORD_EPOCH_MILLIS, Snowflake};
pub use user::User;
