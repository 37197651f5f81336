//! Source-to-target identity correspondence for one sync run.

use crate::{ChannelId, RoleId};
use std::collections::HashMap;

/// Mapping from source role/category identifiers to their target
/// counterparts, built incrementally during a sync run.
///
/// The role reconciler populates the role half; the channel reconciler
/// populates the category half as categories are created, and both halves
/// are read-only once a downstream stage begins. An entry can be missing
/// when the corresponding create or update failed; downstream stages skip
/// anything that does not resolve.
///
/// The map covers a single run and is discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    roles: HashMap<RoleId, RoleId>,
    categories: HashMap<ChannelId, ChannelId>,
}

impl IdentityMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source-to-target role correspondence.
    pub fn bind_role(&mut self, source: RoleId, target: RoleId) {
        self.roles.insert(source, target);
    }

    /// Resolve a source role to its target counterpart.
    pub fn role(&self, source: RoleId) -> Option<RoleId> {
        self.roles.get(&source).copied()
    }

    /// Record a source-to-target category correspondence.
    pub fn bind_category(&mut self, source: ChannelId, target: ChannelId) {
        self.categories.insert(source, target);
    }

    /// Resolve a source category to its target counterpart.
    pub fn category(&self, source: ChannelId) -> Option<ChannelId> {
        self.categories.get(&source).copied()
    }

    /// Number of mapped roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Number of mapped categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_entries_resolve_to_none() {
        let map = IdentityMap::new();
        assert_eq!(map.role(RoleId(1)), None);
        assert_eq!(map.category(ChannelId(1)), None);
    }

    #[test]
    fn bindings_resolve() {
        let mut map = IdentityMap::new();
        map.bind_role(RoleId(1), RoleId(10));
        map.bind_category(ChannelId(2), ChannelId(20));
        assert_eq!(map.role(RoleId(1)), Some(RoleId(10)));
        assert_eq!(map.category(ChannelId(2)), Some(ChannelId(20)));
        assert_eq!(map.role_count(), 1);
        assert_eq!(map.category_count(), 1);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut map = IdentityMap::new();
        map.bind_role(RoleId(1), RoleId(10));
        map.bind_role(RoleId(1), RoleId(11));
        assert_eq!(map.role(RoleId(1)), Some(RoleId(11)));
        assert_eq!(map.role_count(), 1);
    }
}
