//! Hidden allocation detection for compiled method bodies.
//!
//! This crate provides:
//!
//! - **Grouping** ([`GroupBuilder`], [`CodeGroup`]): a method's instruction
//!   stream is cut into contiguous runs, one per visible sequence point.
//!
//! - **Ordering** ([`order_groups`]): groups from every method of a unit are
//!   put back into source order. Closures and state machines are emitted in
//!   declaration order, so without this step results would appear scrambled.
//!
//! - **Classification** ([`classify`], [`AllocationKind`]): each group's
//!   instructions are scanned once; the first decisive instruction picks the
//!   group's single [`AllocationKind`].
//!
//! - **Pipeline** ([`analyze_module`], [`analyze_methods`]): the three steps
//!   above over a whole compiled unit.
//!
//! # Design
//!
//! Classification never fails. Operands the scan cannot resolve degrade to
//! [`AllocationKind::New`], so the analysis over-reports rather than misses.
//! Groups are classified independently of each other; nothing flows between
//! them, which is what lets the pipeline classify them in parallel.
//!
//! The crate performs no I/O. Debug events go through `tracing`.

mod classify;
mod config;
mod excerpt;
mod group;
mod order;
mod pipeline;

#[cfg(test)]
mod test_helpers;

use std::fmt;

pub use classify::{classify, AllocationReason, Classification};
pub use config::{AnalysisConfig, WellKnownMembers};
pub use excerpt::render_excerpt;
pub use group::{build_groups, CodeGroup, GroupBuilder};
pub use order::order_groups;
pub use pipeline::{analyze_methods, analyze_module, AllocationSummary, AnalysisOutput};

/// Allocation category of one code group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AllocationKind {
    /// Nothing in the group allocates.
    #[default]
    None,
    /// Array or reference-type object construction.
    New,
    /// A value type is copied to the heap.
    Boxing,
    /// An interface call hands out a heap-allocated enumerator.
    GetEnumerator,
}

impl AllocationKind {
    #[inline]
    pub fn is_allocation(self) -> bool {
        self != AllocationKind::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AllocationKind::None => "None",
            AllocationKind::New => "New",
            AllocationKind::Boxing => "Boxing",
            AllocationKind::GetEnumerator => "GetEnumerator",
        }
    }
}

impl fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
