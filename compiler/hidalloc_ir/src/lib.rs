//! Data model shared by every hidalloc crate.
//!
//! This crate provides:
//!
//! - **Instructions** ([`Instruction`], [`Opcode`], [`Operand`]): one
//!   low-level operation of a compiled method body, with the operand metadata
//!   the allocation classifier needs (method descriptors, type kinds, declared
//!   methods of constrained types).
//!
//! - **Sequence points** ([`SourceSpan`]): the line/column region a compiler
//!   attached to an instruction, including the reserved hidden sentinel.
//!
//! - **Source text** ([`SourceText`]): the 1-based line table used to render
//!   excerpts and to turn line/column pairs into byte [`Span`]s.
//!
//! - **Modules** ([`Module`], [`TypeDecl`], [`MethodBody`]): the compiled unit
//!   as handed over by whatever reads the binary.
//!
//! Everything here is plain data. With the `serde` feature enabled every type
//! round-trips through serde, which is how the CLI reads module listings.

/// Compile-time assertion that a type has a specific size.
///
/// ```text
/// static_assert_size!(SourceSpan, 16);
/// ```
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod instruction;
mod module;
mod source_span;
mod source_text;
mod span;

pub use instruction::{
    Instruction, MethodAttributes, MethodDef, MethodRef, Opcode, Operand, TypeDef, TypeKind,
    TypeRef,
};
pub use module::{MethodBody, Module, ModuleError, TypeDecl};
pub use source_span::{SourceSpan, HIDDEN_LINE};
pub use source_text::SourceText;
pub use span::Span;
