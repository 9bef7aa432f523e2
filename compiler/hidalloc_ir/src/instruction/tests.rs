use pretty_assertions::assert_eq;

use super::*;

#[test]
fn mnemonics() {
    assert_eq!(Opcode::NoOp.mnemonic(), "nop");
    assert_eq!(Opcode::AllocateArray.mnemonic(), "newarr");
    assert_eq!(Opcode::ConstrainedPrefix.mnemonic(), "constrained.");
    assert_eq!(Opcode::Other("ldloc.0".into()).mnemonic(), "ldloc.0");
    assert!(Opcode::NoOp.is_noop());
    assert!(!Opcode::Box.is_noop());
}

#[test]
fn instruction_display_without_operand() {
    let instr = Instruction::new(0x1a, Opcode::Other("ret".into()));
    assert_eq!(instr.to_string(), "IL_001a: ret");
}

#[test]
fn instruction_display_with_operand() {
    let instr = Instruction::new(12, Opcode::Box).with_operand(Operand::Type(TypeRef::value(
        "System.Int32",
    )));
    assert_eq!(instr.to_string(), "IL_000c: box System.Int32");

    let call = Instruction::new(3, Opcode::VirtualCall).with_operand(Operand::Method(
        MethodRef::new(
            "System.Int32 System.Object::GetHashCode()",
            "GetHashCode",
            TypeRef::value("System.Int32"),
        ),
    ));
    assert_eq!(
        call.to_string(),
        "IL_0003: callvirt System.Int32 System.Object::GetHashCode()"
    );
}

#[test]
fn visible_span_filters_hidden() {
    let hidden = Instruction::new(0, Opcode::NoOp).with_span(SourceSpan::HIDDEN);
    assert_eq!(hidden.visible_span(), None);

    let span = SourceSpan::single_line(2, 1, 5);
    let visible = Instruction::new(0, Opcode::NoOp).with_span(span);
    assert_eq!(visible.visible_span(), Some(span));

    assert_eq!(Instruction::new(0, Opcode::NoOp).visible_span(), None);
}

#[test]
fn constructor_ref_names_constructed_type() {
    let ctor = MethodRef::constructor(TypeRef::reference("System.Text.StringBuilder"), "");
    assert_eq!(ctor.full_name, "System.Void System.Text.StringBuilder::.ctor()");
    assert_eq!(ctor.name, ".ctor");
    assert!(!ctor.return_type.is_value_type());
}

#[test]
fn method_def_attributes() {
    let def = MethodDef::new(
        "GetHashCode",
        MethodAttributes::PUBLIC | MethodAttributes::VIRTUAL,
        TypeRef::value("System.Int32"),
    );
    assert!(def.is_public());
    assert!(def.is_virtual());
    assert!(!def.is_constructor());
    assert!(def.parameters.is_empty());

    let with_param = def.with_parameter(TypeRef::reference("System.Object"));
    assert_eq!(with_param.parameters.len(), 1);
}

#[test]
fn operand_accessors() {
    let def = Arc::new(TypeDef::new("Point", TypeKind::Value));
    let operand = Operand::TypeDef(Arc::clone(&def));
    assert_eq!(operand.as_type_def(), Some(&*def));
    assert!(operand.as_method().is_none());
    assert!(Operand::Type(def.as_type_ref()).as_type_def().is_none());
}

#[test]
fn type_kind_defaults_to_reference() {
    assert_eq!(TypeKind::default(), TypeKind::Reference);
    assert!(TypeDef::new("S", TypeKind::Value).is_value_type());
}
