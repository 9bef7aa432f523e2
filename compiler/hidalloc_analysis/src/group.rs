//! Partitioning a method's instruction stream into code groups.
//!
//! A group opens at every instruction carrying a visible sequence point and
//! runs until the next one. Hidden and span-less instructions belong to
//! whichever group is open. Instructions before the first visible sequence
//! point belong to no group and are dropped.
//!
//! Because of those rules every group is a contiguous subslice of the method
//! body, so groups borrow instead of copying.

use hidalloc_ir::{Instruction, SourceSpan, SourceText};

use crate::classify::{classify, Classification};
use crate::excerpt::render_excerpt;
use crate::{AllocationKind, WellKnownMembers};

/// Contiguous run of instructions sharing one opening sequence point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeGroup<'a> {
    method: &'a str,
    span: SourceSpan,
    excerpt: String,
    instructions: &'a [Instruction],
    classification: Option<Classification>,
}

impl<'a> CodeGroup<'a> {
    /// Fully-qualified name of the owning method.
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// The sequence point that opened this group.
    pub fn span(&self) -> SourceSpan {
        self.span
    }

    /// Rendered source excerpt, see [`render_excerpt`].
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    /// The group's instructions. The first one opened the group.
    pub fn instructions(&self) -> &'a [Instruction] {
        self.instructions
    }

    /// Classification result, `None` until the group has been classified.
    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Allocation kind, `None` until the group has been classified.
    pub fn allocation(&self) -> Option<AllocationKind> {
        self.classification.as_ref().map(Classification::kind)
    }

    pub fn is_classified(&self) -> bool {
        self.classification.is_some()
    }

    /// Classify this group once.
    ///
    /// The first result sticks: later calls return it without rescanning.
    pub fn classify_with(&mut self, members: &WellKnownMembers) -> &Classification {
        let instructions = self.instructions;
        self.classification
            .get_or_insert_with(|| classify(instructions, members))
    }
}

/// Group under construction: where it starts, and what it will carry.
struct OpenGroup {
    start: usize,
    span: SourceSpan,
    excerpt: String,
}

impl OpenGroup {
    fn close<'a>(self, method: &'a str, instructions: &'a [Instruction]) -> CodeGroup<'a> {
        CodeGroup {
            method,
            span: self.span,
            excerpt: self.excerpt,
            instructions,
            classification: None,
        }
    }
}

/// Builds code groups against one source-line table.
///
/// Holds a scratch buffer for excerpt rendering that is reused across the
/// groups of every method it builds.
pub struct GroupBuilder<'src> {
    source: &'src SourceText,
    scratch: String,
}

impl<'src> GroupBuilder<'src> {
    pub fn new(source: &'src SourceText) -> Self {
        GroupBuilder {
            source,
            scratch: String::new(),
        }
    }

    /// Partition one method body into groups, in stream order.
    pub fn build<'a>(
        &mut self,
        method: &'a str,
        instructions: &'a [Instruction],
    ) -> Vec<CodeGroup<'a>> {
        let mut groups = Vec::new();
        let mut open: Option<OpenGroup> = None;

        for (index, instruction) in instructions.iter().enumerate() {
            let Some(span) = instruction.visible_span() else {
                continue;
            };
            if let Some(previous) = open.take() {
                let body = &instructions[previous.start..index];
                groups.push(previous.close(method, body));
            }
            open = Some(OpenGroup {
                start: index,
                span,
                excerpt: self.excerpt(span),
            });
        }

        if let Some(last) = open {
            let body = &instructions[last.start..];
            groups.push(last.close(method, body));
        }

        let dropped = instructions.len() - grouped_len(&groups);
        tracing::trace!(method, groups = groups.len(), dropped, "built code groups");
        groups
    }

    fn excerpt(&mut self, span: SourceSpan) -> String {
        self.scratch.clear();
        render_excerpt(&mut self.scratch, span, self.source);
        self.scratch.clone()
    }
}

fn grouped_len(groups: &[CodeGroup<'_>]) -> usize {
    groups.iter().map(|group| group.instructions.len()).sum()
}

/// Partition one method body into groups against `source`.
pub fn build_groups<'a>(
    method: &'a str,
    instructions: &'a [Instruction],
    source: &SourceText,
) -> Vec<CodeGroup<'a>> {
    GroupBuilder::new(source).build(method, instructions)
}
