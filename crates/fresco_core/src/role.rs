//! Role attributes as read from and written to a guild.

use crate::{PermissionSet, RoleId};
use serde::{Deserialize, Serialize};

/// A role's attributes.
///
/// Names are treated as unique within a guild for matching purposes: the
/// role reconciler pairs source and target roles by name. Position is the
/// hierarchy position, higher meaning more authority. Managed roles belong
/// to a platform integration and are never created, edited, deleted, or
/// repositioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Permission bitset granted guild-wide.
    pub permissions: PermissionSet,
    /// Display color, `0` meaning no color.
    pub color: u32,
    /// Whether members are displayed separately in the sidebar.
    pub hoist: bool,
    /// Whether the role can be mentioned by anyone.
    pub mentionable: bool,
    /// Hierarchy position; higher means more authority.
    pub position: u16,
    /// Whether the role is owned by a platform integration.
    pub managed: bool,
}
