//! Sequence points: the line/column region attached to an instruction.

use std::fmt;

/// Reserved line number marking compiler-synthesized code.
///
/// Debug-symbol writers emit `0xFEEFEE` on sequence points that have no
/// user-visible location.
pub const HIDDEN_LINE: u32 = 0x00FE_EFEE;

/// Line/column region of source code, as recorded in debug symbols.
///
/// Lines and columns are 1-based. The end column is exclusive.
///
/// Equality compares the whole 4-tuple. Reporting order only looks at the
/// start position, see [`SourceSpan::start`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    /// Sequence point with no user-visible location.
    pub const HIDDEN: SourceSpan = SourceSpan {
        start_line: HIDDEN_LINE,
        start_column: 0,
        end_line: HIDDEN_LINE,
        end_column: 0,
    };

    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        SourceSpan {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Span covering `start_column..end_column` on a single line.
    pub const fn single_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(line, start_column, line, end_column)
    }

    /// Whether this is a hidden sequence point.
    ///
    /// The sentinel on either end line is enough.
    #[inline]
    pub const fn is_hidden(&self) -> bool {
        self.start_line == HIDDEN_LINE || self.end_line == HIDDEN_LINE
    }

    /// Start position as `(line, column)`, the reporting sort key.
    #[inline]
    pub const fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_column)
    }

    /// Number of columns the span covers on its start line.
    ///
    /// Zero when the end column is not past the start column.
    #[inline]
    pub const fn column_width(&self) -> u32 {
        self.end_column.saturating_sub(self.start_column)
    }
}

/// Renders `l,c -> l,c`, or `HIDDEN (0xfeefee)` when both lines carry the
/// sentinel. A span with the sentinel on one line only is hidden for
/// grouping but still prints its raw coordinates.
impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == HIDDEN_LINE && self.end_line == HIDDEN_LINE {
            write!(f, "HIDDEN (0xfeefee)")
        } else {
            write!(
                f,
                "{},{} -> {},{}",
                self.start_line, self.start_column, self.end_line, self.end_column
            )
        }
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SourceSpan;
    crate::static_assert_size!(SourceSpan, 16);
}

#[cfg(test)]
mod tests;
