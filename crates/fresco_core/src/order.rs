//! Named ordering rules for the reconciliation stages.
//!
//! Each stage processes entities in a specific order; keeping the
//! comparators here makes the orderings testable on their own.

use crate::{CategorySpec, ChannelId, ChannelSpec, RoleSpec};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Roles by ascending hierarchy position, lowest authority first.
///
/// The role reconciler processes creations and updates in this order to
/// minimize contention with the acting principal's own role position.
pub fn by_ascending_position(a: &RoleSpec, b: &RoleSpec) -> Ordering {
    a.position.cmp(&b.position)
}

/// Roles by descending hierarchy position, highest authority first.
///
/// The position reconciler assigns candidate positions counting down in
/// this order.
pub fn by_descending_position(a: &RoleSpec, b: &RoleSpec) -> Ordering {
    b.position.cmp(&a.position)
}

/// Categories by ascending position.
pub fn by_category_position(a: &CategorySpec, b: &CategorySpec) -> Ordering {
    a.position.cmp(&b.position)
}

/// Channels by owning category's position, then the channel's own position.
///
/// Uncategorized channels sort before every categorized one (`None` orders
/// below `Some`). A parent missing from `positions` is treated the same as
/// no parent.
pub fn by_parent_then_own_position(
    positions: &HashMap<ChannelId, u16>,
) -> impl Fn(&ChannelSpec, &ChannelSpec) -> Ordering + '_ {
    move |a, b| {
        let parent_pos = |c: &ChannelSpec| c.parent.and_then(|p| positions.get(&p).copied());
        parent_pos(a)
            .cmp(&parent_pos(b))
            .then(a.position.cmp(&b.position))
    }
}
