//! Source-order sorting of code groups.

use crate::CodeGroup;

/// Sort `groups` by start line, then start column.
///
/// The sort is stable: groups sharing a start position keep their relative
/// input order. End positions never take part in the comparison.
pub fn order_groups(groups: &mut [CodeGroup<'_>]) {
    groups.sort_by_key(|group| group.span().start());
}
