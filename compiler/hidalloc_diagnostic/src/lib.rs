//! Diagnostics for hidden allocations.
//!
//! Every report carries:
//! - an error code for `explain` lookups
//! - a message naming the allocation kind
//! - a primary label pointing at the source region
//! - notes with the sequence point, the owning method, and the instruction
//!   listing that triggered it
//!
//! Emitters render diagnostics for terminals or as JSON. Byte spans are
//! mapped back to lines through [`hidalloc_ir::SourceText`] when the
//! emitter is given the source.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
