//! Core data types for the Fresco guild mirroring bot.
//!
//! This crate provides the platform-agnostic model of a guild's
//! organizational structure: roles, categories, channels, and permission
//! overwrites, along with the identity map and ordering rules the
//! reconciliation engine is built on. Nothing in this crate talks to the
//! network; the `fresco_sync` crate consumes these types through its host
//! abstraction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod id;
mod identity;
mod order;
mod overwrite;
mod permissions;
mod role;
mod snapshot;

pub use channel::{CategorySpec, ChannelKind, ChannelSpec};
pub use id::{ChannelId, GuildId, MemberId, RoleId};
pub use identity::IdentityMap;
pub use order::{
    by_ascending_position, by_category_position, by_descending_position,
    by_parent_then_own_position,
};
pub use overwrite::{OverwriteSpec, Principal};
pub use permissions::{PermissionPair, PermissionSet};
pub use role::RoleSpec;
pub use snapshot::GuildSnapshot;
