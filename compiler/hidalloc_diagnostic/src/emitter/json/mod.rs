//! JSON emitter: every diagnostic of a run as one pretty-printed array.

use std::io::{self, Write};

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// Collects diagnostics and writes them as a JSON array on [`finish`].
///
/// [`finish`]: DiagnosticEmitter::finish
pub struct JsonEmitter<W: Write> {
    writer: W,
    pending: Vec<Diagnostic>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            pending: Vec::new(),
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.pending.push(diagnostic.clone());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.pending)?;
        writeln!(self.writer)?;
        self.pending.clear();
        self.writer.flush()
    }
}
