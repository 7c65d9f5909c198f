//! Readiness gate.

use magic_grid_core::Completeness;

/// Whether the item set is complete enough to lay out.
///
/// Static content is always ready. Otherwise the container must exist and
/// hold exactly the expected number of children. The check is a snapshot and
/// keeps no state between calls.
pub fn is_ready(completeness: Completeness, container_present: bool, item_count: usize) -> bool {
    match completeness {
        Completeness::Static => true,
        Completeness::Expected(expected) => container_present && item_count == expected.get(),
    }
}
