//! Diagnostic codes, one per allocation kind.

use std::fmt;

use serde::Serialize;

/// Codes for hidden allocation diagnostics.
///
/// Format: A####, numbered in allocation-kind order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum ErrorCode {
    /// Object or array allocated on the heap
    A0001,
    /// Value type boxed
    A0002,
    /// Enumerator allocated through an interface call
    A0003,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[ErrorCode::A0001, ErrorCode::A0002, ErrorCode::A0003];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::A0001 => "A0001",
            ErrorCode::A0002 => "A0002",
            ErrorCode::A0003 => "A0003",
        }
    }

    /// Short title, as used in docs headings.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::A0001 => "heap allocation",
            ErrorCode::A0002 => "boxing",
            ErrorCode::A0003 => "enumerator allocation",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a code like `"A0002"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
