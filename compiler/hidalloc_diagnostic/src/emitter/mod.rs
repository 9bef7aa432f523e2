//! Diagnostic emitters.
//!
//! [`TerminalEmitter`] renders warnings with source snippets and optional
//! color; [`JsonEmitter`] writes them as one JSON array. Write failures are
//! returned to the caller.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::io;

use crate::Diagnostic;

/// Sink for allocation warnings.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        diagnostics.iter().try_for_each(|diag| self.emit(diag))
    }

    /// Write out anything buffered and flush the underlying writer.
    fn finish(&mut self) -> io::Result<()>;
}
