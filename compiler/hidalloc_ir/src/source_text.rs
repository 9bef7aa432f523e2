//! Source text with a pre-computed line table.
//!
//! Sequence points address source by 1-based line and column. This table
//! answers both "what is the text of line N" (excerpt rendering) and "which
//! byte does line N, column C start at" (diagnostic spans) without rescanning.

use crate::{SourceSpan, Span};

/// Source text plus the byte offset of every line start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    /// `line_starts[i]` is the byte offset of line `i + 1`.
    line_starts: Vec<u32>,
}

impl SourceText {
    /// Build the line table for `text`.
    ///
    /// A trailing newline does not start a new line, so `"a\nb\n"` has two.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = Vec::new();
        let mut offset = 0usize;
        for line in text.split_inclusive('\n') {
            line_starts.push(u32::try_from(offset).unwrap_or(u32::MAX));
            offset += line.len();
        }
        SourceText { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }

    /// Text of 1-based line `number`, without its line terminator.
    pub fn line(&self, number: u32) -> Option<&str> {
        let (start, end) = self.line_bounds(number)?;
        let raw = &self.text[start..end];
        let raw = raw.strip_suffix('\n').unwrap_or(raw);
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }

    /// Iterate `(line_number, text)` pairs, 1-based.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        (1..=u32::try_from(self.line_count()).unwrap_or(u32::MAX))
            .filter_map(move |number| self.line(number).map(|text| (number, text)))
    }

    /// Byte offset of 1-based `(line, column)`.
    ///
    /// Columns count characters. Columns past the end of the line clamp to
    /// the line end; column 0 is treated as column 1. Returns `None` when the line does not exist.
    pub fn offset_of(&self, line: u32, column: u32) -> Option<u32> {
        let text = self.line(line)?;
        let (start, _) = self.line_bounds(line)?;
        let column_offset = text
            .char_indices()
            .nth(column.saturating_sub(1) as usize)
            .map_or(text.len(), |(index, _)| index);
        u32::try_from(start + column_offset).ok()
    }

    /// Byte span for a sequence point.
    ///
    /// Multi-line regions collapse onto their start line, keeping their
    /// start and end columns. Hidden spans and spans whose start line is
    /// missing have no byte span.
    pub fn span_of(&self, span: SourceSpan) -> Option<Span> {
        if span.is_hidden() {
            return None;
        }
        let start = self.offset_of(span.start_line, span.start_column)?;
        let end = self.offset_of(span.start_line, span.end_column)?;
        Some(Span::new(start, end.max(start)))
    }

    /// 1-based `(line, column)` of a byte offset, columns counted in
    /// characters. Offsets past the end land on the last line.
    pub fn location(&self, offset: u32) -> (u32, u32) {
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(index).map_or(0, |&start| start as usize);
        let end = (offset as usize).clamp(start, self.text.len());
        let column = self
            .text
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());
        let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        (line, u32::try_from(column).unwrap_or(u32::MAX - 1) + 1)
    }

    fn line_bounds(&self, number: u32) -> Option<(usize, usize)> {
        let index = (number as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)? as usize;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |&next| next as usize);
        Some((start, end))
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        SourceText::new(text)
    }
}
