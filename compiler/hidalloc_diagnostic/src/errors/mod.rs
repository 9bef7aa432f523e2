//! Embedded documentation for `hidalloc explain`.
//!
//! Each code has a markdown file in this directory, embedded at compile time.

use crate::ErrorCode;

/// Registry of embedded code documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for `code`, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    (ErrorCode::A0001, include_str!("A0001.md")),
    (ErrorCode::A0002, include_str!("A0002.md")),
    (ErrorCode::A0003, include_str!("A0003.md")),
];

#[cfg(test)]
mod tests;
