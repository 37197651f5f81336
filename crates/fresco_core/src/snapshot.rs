//! Point-in-time view of a guild's structure.

use crate::{CategorySpec, ChannelId, ChannelSpec, GuildId, RoleId, RoleSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the reconcilers need to know about one guild.
///
/// A snapshot is read once per guild per run. For the target guild the
/// `acting_ceiling` field carries the acting principal's highest role
/// position; the platform refuses actions at or above it, so the
/// reconcilers filter their candidates below it before issuing calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    /// Guild identifier.
    pub id: GuildId,
    /// Guild display name.
    pub name: String,
    /// The guild's default "everyone" role.
    pub everyone: RoleId,
    /// All roles, including "everyone" and managed roles.
    pub roles: Vec<RoleSpec>,
    /// All categories.
    pub categories: Vec<CategorySpec>,
    /// All non-category channels.
    pub channels: Vec<ChannelSpec>,
    /// The platform's voice bit-rate cap for this guild, in bits per second.
    pub bitrate_ceiling: u32,
    /// Highest role position held by the acting principal.
    pub acting_ceiling: u16,
}

impl GuildSnapshot {
    /// Look up a role by identifier.
    pub fn role(&self, id: RoleId) -> Option<&RoleSpec> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Category positions keyed by category identifier.
    ///
    /// Used to order channels by their owning category's position.
    pub fn category_positions(&self) -> HashMap<ChannelId, u16> {
        self.categories.iter().map(|c| (c.id, c.position)).collect()
    }
}
