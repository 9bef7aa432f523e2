//! Debug excerpts: the source lines a group covers plus a column marker.
//!
//! ```text
//! [   7]                 var hc = noGetHashCode.GetHashCode();
//!                        ***********************************
//! ```

use std::fmt::Write;

use hidalloc_ir::{SourceSpan, SourceText};

/// Width of the `[NNNN] ` line prefix.
const GUTTER_WIDTH: u32 = 7;

/// Marker columns are clamped here when no rendered line bounds them.
const MAX_UNBOUNDED_COLUMN: u32 = 1024;

/// Render the excerpt for `span` into `out`.
///
/// Writes one `[line] text` row per line in `start_line..=end_line` that the
/// table has (missing lines are skipped), then a marker row of asterisks
/// under `start_column..end_column`. The marker row has no trailing newline.
/// Appends to `out`; callers own clearing and reuse of the buffer.
///
/// The marker never reaches past one column after the widest rendered line,
/// so out-of-range columns in a listing cannot blow up the output.
pub fn render_excerpt(out: &mut String, span: SourceSpan, source: &SourceText) {
    let last_line = span
        .end_line
        .min(u32::try_from(source.line_count()).unwrap_or(u32::MAX));
    let mut widest: Option<u32> = None;
    for number in span.start_line..=last_line {
        if let Some(text) = source.line(number) {
            let _ = writeln!(out, "[{number:>4}] {text}");
            let width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
            widest = Some(widest.map_or(width, |widest| widest.max(width)));
        }
    }

    let limit = widest.map_or(MAX_UNBOUNDED_COLUMN, |width| width.saturating_add(1));
    let start = span.start_column.min(limit);
    let end = span.end_column.min(limit);
    push_repeated(out, ' ', GUTTER_WIDTH.saturating_add(start).saturating_sub(1));
    push_repeated(out, '*', end.saturating_sub(start));
}

fn push_repeated(out: &mut String, c: char, count: u32) {
    out.extend(std::iter::repeat(c).take(count as usize));
}
