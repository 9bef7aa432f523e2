//! Shared test utilities for grouping, classification, and pipeline tests.
//! Only compiled in test builds.

use std::sync::Arc;

use hidalloc_ir::{
    Instruction, MethodAttributes, MethodDef, MethodRef, Opcode, Operand, SourceSpan, TypeDef,
    TypeKind, TypeRef,
};

/// Instruction at offset 0 with no operand or span.
pub(crate) fn ins(opcode: Opcode) -> Instruction {
    Instruction::new(0, opcode)
}

pub(crate) fn nop() -> Instruction {
    ins(Opcode::NoOp)
}

/// `nop` carrying the single-line span `line:start..end`.
pub(crate) fn nop_at(line: u32, start: u32, end: u32) -> Instruction {
    nop().with_span(SourceSpan::single_line(line, start, end))
}

pub(crate) fn other(mnemonic: &str) -> Instruction {
    ins(Opcode::Other(mnemonic.to_string()))
}

pub(crate) fn newarr(element: &str) -> Instruction {
    ins(Opcode::AllocateArray).with_operand(Operand::Type(TypeRef::value(element)))
}

pub(crate) fn box_value(name: &str) -> Instruction {
    ins(Opcode::Box).with_operand(Operand::Type(TypeRef::value(name)))
}

pub(crate) fn constrained(def: TypeDef) -> Instruction {
    ins(Opcode::ConstrainedPrefix).with_operand(Operand::TypeDef(Arc::new(def)))
}

/// `newobj` calling the parameterless constructor of `ty`.
pub(crate) fn newobj(ty: TypeRef) -> Instruction {
    ins(Opcode::ConstructObject).with_operand(Operand::Method(MethodRef::constructor(ty, "")))
}

pub(crate) fn callvirt(full_name: &str, name: &str, return_type: TypeRef) -> Instruction {
    ins(Opcode::VirtualCall).with_operand(Operand::Method(MethodRef::new(
        full_name,
        name,
        return_type,
    )))
}

pub(crate) fn object_get_hash_code() -> Instruction {
    callvirt(
        "System.Int32 System.Object::GetHashCode()",
        "GetHashCode",
        TypeRef::value("System.Int32"),
    )
}

pub(crate) fn object_equals() -> Instruction {
    callvirt(
        "System.Boolean System.Object::Equals(System.Object)",
        "Equals",
        TypeRef::value("System.Boolean"),
    )
}

pub(crate) fn enumerable_get_enumerator() -> Instruction {
    callvirt(
        "System.Collections.Generic.IEnumerator`1<!0> System.Collections.Generic.IEnumerable`1<System.Int32>::GetEnumerator()",
        "GetEnumerator",
        TypeRef::reference("System.Collections.Generic.IEnumerator`1<System.Int32>"),
    )
}

/// Value type declaring only a constructor.
pub(crate) fn plain_struct(name: &str) -> TypeDef {
    TypeDef::new(name, TypeKind::Value).with_method(MethodDef::new(
        ".ctor",
        MethodAttributes::PUBLIC | MethodAttributes::CONSTRUCTOR,
        TypeRef::value("System.Void"),
    ))
}

/// Value type with a public virtual `GetHashCode` override.
pub(crate) fn struct_overriding_get_hash_code(name: &str) -> TypeDef {
    plain_struct(name).with_method(MethodDef::new(
        "GetHashCode",
        MethodAttributes::PUBLIC | MethodAttributes::VIRTUAL,
        TypeRef::value("System.Int32"),
    ))
}

/// Renumber offsets so listings read `IL_0000`, `IL_0001`, ...
pub(crate) fn numbered(instructions: impl IntoIterator<Item = Instruction>) -> Vec<Instruction> {
    instructions
        .into_iter()
        .zip(0u32..)
        .map(|(mut instruction, offset)| {
            instruction.offset = offset;
            instruction
        })
        .collect()
}
