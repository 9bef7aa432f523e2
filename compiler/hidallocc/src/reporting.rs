//! Turning classified groups into diagnostics and dump listings.

use std::fmt::Write as _;

use hidalloc_analysis::{AllocationKind, AllocationReason, CodeGroup};
use hidalloc_diagnostic::{Diagnostic, ErrorCode};
use hidalloc_ir::{SourceSpan, SourceText};

/// Diagnostic code for an allocation kind. `None` has no code.
pub fn error_code(kind: AllocationKind) -> Option<ErrorCode> {
    match kind {
        AllocationKind::None => None,
        AllocationKind::New => Some(ErrorCode::A0001),
        AllocationKind::Boxing => Some(ErrorCode::A0002),
        AllocationKind::GetEnumerator => Some(ErrorCode::A0003),
    }
}

/// Render a sequence point suffix: empty without a span, ` @ HIDDEN (0xfeefee)`
/// for the hidden sentinel, ` @ l,c -> l,c` otherwise.
pub fn sequence_point(span: Option<SourceSpan>) -> String {
    span.map(|span| format!(" @ {span}")).unwrap_or_default()
}

/// Warnings for one group: one per instruction with a visible span.
///
/// Unclassified groups and groups classified `None` produce nothing.
pub fn group_diagnostics(group: &CodeGroup<'_>, source: &SourceText) -> Vec<Diagnostic> {
    let Some(classification) = group.classification() else {
        return Vec::new();
    };
    let Some(code) = error_code(classification.kind()) else {
        return Vec::new();
    };

    let description = classification
        .reason()
        .map_or("hidden allocation", AllocationReason::description);
    let decided_by = classification
        .decided_by()
        .and_then(|index| group.instructions().get(index));
    let listing: Vec<String> = group
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect();

    group
        .instructions()
        .iter()
        .filter_map(|instruction| instruction.visible_span())
        .map(|span| {
            let mut diagnostic = Diagnostic::new(code, group.method(), span)
                .with_message(format!("hidden allocation: {}", classification.kind()))
                .with_instructions(listing.iter().cloned());
            if let Some(byte_span) = source.span_of(span) {
                diagnostic = diagnostic.with_label(byte_span, description);
            }
            if let Some(instruction) = decided_by {
                diagnostic = diagnostic.with_decided_by(instruction.to_string());
            }
            diagnostic
        })
        .collect()
}

/// Warnings for every group, in group order.
pub fn allocation_diagnostics<'g, 'a: 'g>(
    groups: impl IntoIterator<Item = &'g CodeGroup<'a>>,
    source: &SourceText,
) -> Vec<Diagnostic> {
    groups
        .into_iter()
        .flat_map(|group| group_diagnostics(group, source))
        .collect()
}

/// Append the dump listing of one group to `out`.
///
/// Method name, excerpt, the classification (skipped for `None` unless
/// `all`), every instruction with its sequence point, then a blank line.
pub fn write_group(out: &mut String, group: &CodeGroup<'_>, all: bool) {
    let _ = writeln!(out, "{}", group.method());
    if !group.excerpt().trim().is_empty() {
        let _ = writeln!(out, "{}", group.excerpt());
    }
    let kind = group.allocation().unwrap_or_default();
    if all || kind.is_allocation() {
        let _ = writeln!(out, "{kind}");
    }
    for instruction in group.instructions() {
        let _ = writeln!(out, "{instruction}{}", sequence_point(instruction.span));
    }
    out.push('\n');
}

/// Dump listing of every group, in order.
pub fn render_groups<'g, 'a: 'g>(
    groups: impl IntoIterator<Item = &'g CodeGroup<'a>>,
    all: bool,
) -> String {
    let mut out = String::new();
    for group in groups {
        write_group(&mut out, group, all);
    }
    out
}
