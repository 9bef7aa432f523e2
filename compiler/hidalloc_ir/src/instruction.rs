//! Instruction model for compiled method bodies.
//!
//! Only the opcodes that can introduce a hidden allocation get their own
//! variant. Everything else is [`Opcode::Other`] and keeps its mnemonic for
//! display.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::SourceSpan;

/// Opcode categories the allocation classifier distinguishes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    /// `nop`: padding the compiler emits around sequence points.
    NoOp,
    /// `newarr`: allocate a one-dimensional array.
    AllocateArray,
    /// `box`: copy a value type onto the heap.
    Box,
    /// `constrained.`: prefix naming the receiver type of the next call.
    ConstrainedPrefix,
    /// `newobj`: run a constructor on fresh storage.
    ConstructObject,
    /// `callvirt`: virtual dispatch through a method reference.
    VirtualCall,
    /// Any other opcode, identified by its mnemonic.
    Other(String),
}

impl Opcode {
    /// Assembly mnemonic for display.
    pub fn mnemonic(&self) -> &str {
        match self {
            Opcode::NoOp => "nop",
            Opcode::AllocateArray => "newarr",
            Opcode::Box => "box",
            Opcode::ConstrainedPrefix => "constrained.",
            Opcode::ConstructObject => "newobj",
            Opcode::VirtualCall => "callvirt",
            Opcode::Other(mnemonic) => mnemonic.as_str(),
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        matches!(self, Opcode::NoOp)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Whether instances of a type live inline or behind a heap reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Stored inline (structs, enums, primitives).
    Value,
    /// Stored on the heap and passed by reference.
    #[default]
    Reference,
}

/// Reference to a type by its fully-qualified name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TypeKind,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeRef {
            name: name.into(),
            kind,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Value)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Reference)
    }

    #[inline]
    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::Value
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reference to a callable, as it appears in a call or `newobj` operand.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodRef {
    /// Fully-qualified descriptor, e.g.
    /// `System.Int32 System.Object::GetHashCode()`.
    pub full_name: String,
    /// Simple name, e.g. `GetHashCode` or `.ctor`.
    pub name: String,
    /// Declared return type. For constructors this is the constructed type.
    pub return_type: TypeRef,
}

impl MethodRef {
    pub fn new(full_name: impl Into<String>, name: impl Into<String>, return_type: TypeRef) -> Self {
        MethodRef {
            full_name: full_name.into(),
            name: name.into(),
            return_type,
        }
    }

    /// Constructor reference for `ty`, named the way debug symbols name it.
    pub fn constructor(ty: TypeRef, parameters: &str) -> Self {
        let full_name = format!("System.Void {}::.ctor({parameters})", ty.name);
        MethodRef {
            full_name,
            name: ".ctor".to_string(),
            return_type: ty,
        }
    }
}

bitflags! {
    /// Attributes of a declared method that override detection inspects.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MethodAttributes: u8 {
        /// Callable from outside the declaring type.
        const PUBLIC = 1 << 0;
        /// Occupies a vtable slot, so it can override an inherited method.
        const VIRTUAL = 1 << 1;
        /// Instance or type initializer (`.ctor` / `.cctor`).
        const CONSTRUCTOR = 1 << 2;
        const STATIC = 1 << 3;
    }
}

/// A method declared on a [`TypeDef`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: SmallVec<[TypeRef; 4]>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: MethodAttributes,
    pub return_type: TypeRef,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, attributes: MethodAttributes, return_type: TypeRef) -> Self {
        MethodDef {
            name: name.into(),
            parameters: SmallVec::new(),
            attributes,
            return_type,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: TypeRef) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.attributes.contains(MethodAttributes::PUBLIC)
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.attributes.contains(MethodAttributes::VIRTUAL)
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        self.attributes.contains(MethodAttributes::CONSTRUCTOR)
    }
}

/// A resolved type definition together with its declared methods.
///
/// Only `constrained.` operands need the method table, so only they carry a
/// `TypeDef`; everything else refers to types through [`TypeRef`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TypeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub methods: Vec<MethodDef>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDef {
            name: name.into(),
            kind,
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    #[inline]
    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::Value
    }

    pub fn as_type_ref(&self) -> TypeRef {
        TypeRef::new(self.name.clone(), self.kind)
    }
}

/// Instruction operand.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    Method(MethodRef),
    Type(TypeRef),
    TypeDef(Arc<TypeDef>),
    /// Any other operand (literals, locals, fields, branch targets).
    Literal(String),
}

impl Operand {
    pub fn as_method(&self) -> Option<&MethodRef> {
        match self {
            Operand::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_type_def(&self) -> Option<&TypeDef> {
        match self {
            Operand::TypeDef(def) => Some(def.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Method(method) => f.write_str(&method.full_name),
            Operand::Type(ty) => f.write_str(&ty.name),
            Operand::TypeDef(def) => f.write_str(&def.name),
            Operand::Literal(text) => f.write_str(text),
        }
    }
}

/// One instruction of a method body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Byte offset within the method body. Display only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: u32,
    pub opcode: Opcode,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub operand: Option<Operand>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub span: Option<SourceSpan>,
}

impl Instruction {
    pub fn new(offset: u32, opcode: Opcode) -> Self {
        Instruction {
            offset,
            opcode,
            operand: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_operand(mut self, operand: Operand) -> Self {
        self.operand = Some(operand);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// The span, unless it is absent or hidden.
    #[inline]
    pub fn visible_span(&self) -> Option<SourceSpan> {
        self.span.filter(|span| !span.is_hidden())
    }

    /// Method operand, if the operand resolves to one.
    #[inline]
    pub fn method(&self) -> Option<&MethodRef> {
        self.operand.as_ref().and_then(Operand::as_method)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04x}: {}", self.offset, self.opcode)?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
