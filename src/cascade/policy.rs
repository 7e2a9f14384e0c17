//! Whether a group may cascade rotate and resize changes

use crate::graph::GroupData;

/// Cascading is allowed when the group transforms with its container and does
/// not restrict its own footprint.
///
/// A restricting group would have to validate every descendant before its own
/// resize commits, which cannot happen once the group has already changed.
pub fn enabled(group: &GroupData) -> bool {
    group.transform_with_container && !group.is_restrict
}
