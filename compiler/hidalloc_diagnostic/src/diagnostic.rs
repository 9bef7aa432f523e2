//! The hidden-allocation warning.

use hidalloc_ir::{SourceSpan, Span};
use serde::Serialize;

use crate::ErrorCode;

/// Source region an allocation warning points at.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Label {
    #[serde(flatten)]
    pub span: Span,
    pub message: String,
}

/// One hidden allocation, located at a sequence point of a method.
///
/// ```text
/// Diagnostic::new(ErrorCode::A0002, "System.Void Script::.ctor()", span)
///     .with_message("hidden allocation: Boxing")
///     .with_label(byte_span, "value type boxed explicitly")
///     .with_decided_by("IL_0002: box System.Int32")
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    /// Absent when the source table cannot resolve the sequence point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Fully-qualified owning method.
    pub method: String,
    pub sequence_point: SourceSpan,
    /// The instruction that settled the classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    /// Rendered instructions of the whole group.
    pub instructions: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, method: impl Into<String>, sequence_point: SourceSpan) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            label: None,
            method: method.into(),
            sequence_point,
            decided_by: None,
            instructions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_decided_by(mut self, instruction: impl Into<String>) -> Self {
        self.decided_by = Some(instruction.into());
        self
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions
            .extend(instructions.into_iter().map(Into::into));
        self
    }

    /// Byte span of the label, if the warning has one.
    pub fn span(&self) -> Option<Span> {
        self.label.as_ref().map(|label| label.span)
    }

    /// Trailing notes in rendering order: sequence point, method, deciding
    /// instruction, then the group listing.
    pub fn notes(&self) -> Vec<String> {
        let mut notes = vec![
            format!("sequence point @ {}", self.sequence_point),
            format!("in `{}`", self.method),
        ];
        if let Some(instruction) = &self.decided_by {
            notes.push(format!("decided by `{instruction}`"));
        }
        if !self.instructions.is_empty() {
            let mut listing = String::from("group:");
            for instruction in &self.instructions {
                listing.push_str("\n        ");
                listing.push_str(instruction);
            }
            notes.push(listing);
        }
        notes
    }
}

#[cfg(test)]
mod tests;
