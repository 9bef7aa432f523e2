//! Whole-unit analysis: group every method, order, classify.

use std::fmt;

use hidalloc_ir::{Instruction, Module, SourceText};
use rayon::prelude::*;

use crate::{order_groups, AllocationKind, AnalysisConfig, CodeGroup, GroupBuilder};

/// Per-kind group counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationSummary {
    pub none: usize,
    pub new: usize,
    pub boxing: usize,
    pub get_enumerator: usize,
}

impl AllocationSummary {
    fn record(&mut self, kind: AllocationKind) {
        *self.slot(kind) += 1;
    }

    fn slot(&mut self, kind: AllocationKind) -> &mut usize {
        match kind {
            AllocationKind::None => &mut self.none,
            AllocationKind::New => &mut self.new,
            AllocationKind::Boxing => &mut self.boxing,
            AllocationKind::GetEnumerator => &mut self.get_enumerator,
        }
    }

    pub fn count(&self, kind: AllocationKind) -> usize {
        match kind {
            AllocationKind::None => self.none,
            AllocationKind::New => self.new,
            AllocationKind::Boxing => self.boxing,
            AllocationKind::GetEnumerator => self.get_enumerator,
        }
    }

    /// Groups classified as anything but `None`.
    pub fn allocations(&self) -> usize {
        self.new + self.boxing + self.get_enumerator
    }

    pub fn groups(&self) -> usize {
        self.none + self.allocations()
    }
}

impl fmt::Display for AllocationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allocations = self.allocations();
        let noun = if allocations == 1 { "allocation" } else { "allocations" };
        write!(
            f,
            "{allocations} hidden {noun} in {} groups (New: {}, Boxing: {}, GetEnumerator: {})",
            self.groups(),
            self.new,
            self.boxing,
            self.get_enumerator,
        )
    }
}

/// Classified groups of one unit, in source order.
#[derive(Clone, Debug)]
pub struct AnalysisOutput<'a> {
    groups: Vec<CodeGroup<'a>>,
    summary: AllocationSummary,
}

impl<'a> AnalysisOutput<'a> {
    /// Every group, classified, ordered by start position.
    pub fn groups(&self) -> &[CodeGroup<'a>] {
        &self.groups
    }

    /// Groups whose classification is not `None`, in order.
    pub fn allocations(&self) -> impl Iterator<Item = &CodeGroup<'a>> + '_ {
        self.groups
            .iter()
            .filter(|group| group.allocation().is_some_and(AllocationKind::is_allocation))
    }

    pub fn summary(&self) -> AllocationSummary {
        self.summary
    }

    pub fn into_groups(self) -> Vec<CodeGroup<'a>> {
        self.groups
    }
}

/// Analyze every method body of `module`.
///
/// Bodies are visited in [`Module::method_bodies`] order, which only matters
/// for the relative order of groups sharing a start position.
pub fn analyze_module<'a>(
    module: &'a Module,
    source: &SourceText,
    config: &AnalysisConfig,
) -> AnalysisOutput<'a> {
    tracing::debug!(module = %module.name, "analyzing module");
    let methods = module
        .method_bodies()
        .into_iter()
        .map(|body| (body.name.as_str(), body.instructions.as_slice()));
    analyze_methods(methods, source, config)
}

/// Analyze `(method name, instructions)` pairs.
pub fn analyze_methods<'a, I>(
    methods: I,
    source: &SourceText,
    config: &AnalysisConfig,
) -> AnalysisOutput<'a>
where
    I: IntoIterator<Item = (&'a str, &'a [Instruction])>,
{
    let mut builder = GroupBuilder::new(source);
    let mut groups = Vec::new();
    for (method, instructions) in methods {
        let built = builder.build(method, instructions);
        tracing::debug!(
            method,
            instructions = instructions.len(),
            groups = built.len(),
            "grouped method"
        );
        groups.extend(built);
    }

    order_groups(&mut groups);

    let members = &config.members;
    if config.parallel {
        groups.par_iter_mut().for_each(|group| {
            group.classify_with(members);
        });
    } else {
        for group in &mut groups {
            group.classify_with(members);
        }
    }

    let mut summary = AllocationSummary::default();
    for group in &groups {
        summary.record(group.allocation().unwrap_or_default());
    }
    tracing::debug!(
        groups = summary.groups(),
        new = summary.new,
        boxing = summary.boxing,
        get_enumerator = summary.get_enumerator,
        parallel = config.parallel,
        "classified groups"
    );

    AnalysisOutput { groups, summary }
}
