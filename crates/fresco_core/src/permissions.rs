//! Permission bitsets and allow/deny pairs.

use serde::{Deserialize, Serialize};

/// A permission bitset as the platform encodes it.
///
/// The individual bit meanings belong to the platform; the engine only moves
/// whole sets around, so this stays an opaque `u64`.
///
/// # Examples
///
/// ```
/// use fresco_core::PermissionSet;
///
/// let perms = PermissionSet(0b1010);
/// assert!(!perms.is_empty());
/// assert_eq!(perms.bits(), 0b1010);
/// ```
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
    derive_more::From,
)]
pub struct PermissionSet(pub u64);

impl PermissionSet {
    /// The empty permission set.
    pub const EMPTY: Self = Self(0);

    /// The raw bit representation.
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Whether no permission bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// An allow/deny pair as used by permission overwrites.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct PermissionPair {
    /// Permissions explicitly granted.
    pub allow: PermissionSet,
    /// Permissions explicitly denied.
    pub deny: PermissionSet,
}
