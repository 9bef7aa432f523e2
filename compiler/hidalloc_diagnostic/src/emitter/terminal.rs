//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. Given
//! the source text, labels are rendered as line/column locations with the
//! source line underneath; without it they fall back to raw byte spans.

use std::io::{self, Write};

use hidalloc_ir::{SourceText, Span};

use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// The source line a label points into.
struct Snippet<'a> {
    line: u32,
    column: u32,
    text: &'a str,
    /// Underline width in characters, at least one.
    width: usize,
}

impl<'a> Snippet<'a> {
    fn locate(source: &'a SourceText, span: Span) -> Option<Self> {
        let (line, column) = source.location(span.start);
        let text = source.line(line)?;
        let covered = source.text().get(span.to_range())?;
        let width = covered.chars().take_while(|&c| c != '\n').count().max(1);
        Some(Snippet {
            line,
            column,
            text,
            width,
        })
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src SourceText>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` says whether `writer` is a terminal, and is consulted for
    /// [`ColorMode::Auto`] only.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Render labels against `source`.
    #[must_use]
    pub fn with_source(mut self, source: &'src SourceText) -> Self {
        self.source = Some(source);
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    fn write_bold(&mut self, text: &str) -> io::Result<()> {
        self.write_colored(text, colors::BOLD)
    }

    fn write_label(&mut self, label: &Label) -> io::Result<()> {
        let snippet = self
            .source
            .and_then(|source| Snippet::locate(source, label.span));
        let Some(snippet) = snippet else {
            write!(self.writer, "  --> {:?}: ", label.span)?;
            self.write_colored(&label.message, colors::WARNING)?;
            return writeln!(self.writer);
        };

        let number = snippet.line.to_string();
        let gutter = " ".repeat(number.len() + 2);
        let underline = "^".repeat(snippet.width);
        let pad = " ".repeat(snippet.column.saturating_sub(1) as usize);

        writeln!(self.writer, "  --> {}:{}", snippet.line, snippet.column)?;
        writeln!(self.writer, "{gutter}|")?;
        writeln!(self.writer, " {number} | {}", snippet.text)?;
        write!(self.writer, "{gutter}| {pad}")?;
        self.write_colored(&underline, colors::WARNING)?;
        if !label.message.is_empty() {
            write!(self.writer, " ")?;
            self.write_colored(&label.message, colors::WARNING)?;
        }
        writeln!(self.writer)
    }

    /// Closing line: how many warnings were emitted. Nothing for zero.
    pub fn emit_summary(&mut self, warning_count: usize) -> io::Result<()> {
        if warning_count == 0 {
            return Ok(());
        }
        self.write_colored("warning", colors::WARNING)?;
        let plural = if warning_count == 1 { "" } else { "s" };
        writeln!(self.writer, ": {warning_count} warning{plural} emitted")
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        // Header: warning[CODE]: message
        self.write_colored("warning", colors::WARNING)?;
        if self.colors {
            write!(self.writer, "{}[{}]{}", colors::BOLD, diagnostic.code, colors::RESET)?;
        } else {
            write!(self.writer, "[{}]", diagnostic.code)?;
        }
        writeln!(self.writer, ": {}", diagnostic.message)?;

        if let Some(label) = &diagnostic.label {
            self.write_label(label)?;
        }

        for note in diagnostic.notes() {
            write!(self.writer, "  = ")?;
            self.write_bold("note")?;
            writeln!(self.writer, ": {note}")?;
        }

        writeln!(self.writer)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
