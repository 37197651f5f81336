//! Identifier newtypes for guild entities.
//!
//! The platform assigns every entity an opaque immutable snowflake. Wrapping
//! them keeps role, channel, member, and guild identifiers from being mixed
//! up inside the identity map and the reconcilers.

use serde::{Deserialize, Serialize};

macro_rules! snowflake_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
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
        pub struct $name(pub u64);

        impl $name {
            /// The raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

snowflake_id! {
    /// Identifier of a guild (server).
    GuildId
}

snowflake_id! {
    /// Identifier of a role.
    RoleId
}

snowflake_id! {
    /// Identifier of a channel or category.
    ///
    /// Categories are channels on the platform, so they share this type.
    ChannelId
}

snowflake_id! {
    /// Identifier of a guild member; stable platform-wide across guilds.
    MemberId
}
