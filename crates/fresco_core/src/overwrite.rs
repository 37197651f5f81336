//! Permission overwrites scoped to categories and channels.

use crate::{MemberId, PermissionPair, RoleId};
use serde::{Deserialize, Serialize};

/// The principal a permission overwrite applies to.
///
/// Role and member principals translate differently when a structure is
/// mirrored onto another guild: role principals resolve through the identity
/// map, while member identifiers are stable platform-wide and only need a
/// presence check in the target guild.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Principal {
    /// A role in the owning guild.
    #[display("role {_0}")]
    Role(RoleId),
    /// A member of the owning guild.
    #[display("member {_0}")]
    Member(MemberId),
}

/// A per-principal allow/deny pair scoped to a category or channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct OverwriteSpec {
    /// Who the overwrite applies to.
    pub principal: Principal,
    /// The allow/deny pair.
    pub permissions: PermissionPair,
}
