//! Allocation classifier.
//!
//! Scans a group's instructions once, front to back, and stops at the first
//! decisive instruction. The only state carried between instructions is the
//! receiver type named by the most recent `constrained.` prefix.

use std::fmt;
use std::ops::ControlFlow;

use hidalloc_ir::{Instruction, MethodRef, Opcode, Operand, TypeDef};

use crate::{AllocationKind, WellKnownMembers};

/// Why a group was classified as allocating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocationReason {
    /// `newarr`.
    ArrayAllocation,
    /// Explicit `box`.
    ExplicitBox,
    /// `newobj` whose operand is not a method reference.
    UnresolvedConstructor,
    /// `newobj` constructing a reference type.
    ReferenceTypeConstructor,
    /// Sequence-interface `GetEnumerator()` returning a reference.
    InterfaceEnumerator,
    /// Constrained call to an object-base virtual the receiver does not
    /// override.
    InheritedObjectVirtual,
}

impl AllocationReason {
    pub fn kind(self) -> AllocationKind {
        match self {
            AllocationReason::ArrayAllocation
            | AllocationReason::UnresolvedConstructor
            | AllocationReason::ReferenceTypeConstructor => AllocationKind::New,
            AllocationReason::ExplicitBox | AllocationReason::InheritedObjectVirtual => {
                AllocationKind::Boxing
            }
            AllocationReason::InterfaceEnumerator => AllocationKind::GetEnumerator,
        }
    }

    /// One-line human description.
    pub fn description(self) -> &'static str {
        match self {
            AllocationReason::ArrayAllocation => "array allocation",
            AllocationReason::ExplicitBox => "value type boxed explicitly",
            AllocationReason::UnresolvedConstructor => "constructor operand could not be resolved",
            AllocationReason::ReferenceTypeConstructor => "reference type constructed",
            AllocationReason::InterfaceEnumerator => {
                "enumerator obtained through the sequence interface"
            }
            AllocationReason::InheritedObjectVirtual => {
                "inherited object virtual called on a value type that does not override it"
            }
        }
    }
}

impl fmt::Display for AllocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Result of classifying one group.
///
/// `reason` and `decided_by` are set exactly when the kind is an
/// allocation. `decided_by` indexes into the group's instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Classification {
    kind: AllocationKind,
    reason: Option<AllocationReason>,
    decided_by: Option<usize>,
}

impl Classification {
    /// Nothing in the group allocates.
    pub const NONE: Classification = Classification {
        kind: AllocationKind::None,
        reason: None,
        decided_by: None,
    };

    fn decided(reason: AllocationReason, index: usize) -> Self {
        Classification {
            kind: reason.kind(),
            reason: Some(reason),
            decided_by: Some(index),
        }
    }

    #[inline]
    pub fn kind(&self) -> AllocationKind {
        self.kind
    }

    #[inline]
    pub fn reason(&self) -> Option<AllocationReason> {
        self.reason
    }

    /// Index of the instruction that decided the classification.
    #[inline]
    pub fn decided_by(&self) -> Option<usize> {
        self.decided_by
    }
}

/// State threaded through the scan.
#[derive(Clone, Copy, Default)]
struct ScanState<'a> {
    /// Receiver type of the next constrained call.
    constrained: Option<&'a TypeDef>,
}

/// Classify one group's instructions.
///
/// Never fails: operands that cannot be resolved either degrade to
/// [`AllocationKind::New`] (constructors) or are skipped (virtual calls).
pub fn classify(instructions: &[Instruction], members: &WellKnownMembers) -> Classification {
    if instructions.iter().all(|instruction| instruction.opcode.is_noop()) {
        return Classification::NONE;
    }

    let scan = instructions
        .iter()
        .enumerate()
        .try_fold(ScanState::default(), |state, (index, instruction)| {
            match step(state, instruction, members) {
                ControlFlow::Continue(next) => ControlFlow::Continue(next),
                ControlFlow::Break(reason) => ControlFlow::Break((reason, index)),
            }
        });

    match scan {
        ControlFlow::Break((reason, index)) => Classification::decided(reason, index),
        ControlFlow::Continue(_) => Classification::NONE,
    }
}

fn step<'a>(
    state: ScanState<'a>,
    instruction: &'a Instruction,
    members: &WellKnownMembers,
) -> ControlFlow<AllocationReason, ScanState<'a>> {
    match instruction.opcode {
        Opcode::AllocateArray => ControlFlow::Break(AllocationReason::ArrayAllocation),
        Opcode::Box => ControlFlow::Break(AllocationReason::ExplicitBox),
        // A prefix without a resolved definition clears the receiver.
        Opcode::ConstrainedPrefix => ControlFlow::Continue(ScanState {
            constrained: instruction.operand.as_ref().and_then(Operand::as_type_def),
        }),
        Opcode::ConstructObject => match instruction.method() {
            None => ControlFlow::Break(AllocationReason::UnresolvedConstructor),
            Some(ctor) if !ctor.return_type.is_value_type() => {
                ControlFlow::Break(AllocationReason::ReferenceTypeConstructor)
            }
            Some(_) => ControlFlow::Continue(state),
        },
        Opcode::VirtualCall => match instruction.method() {
            Some(called) => virtual_call(state, called, members),
            None => ControlFlow::Continue(state),
        },
        Opcode::NoOp | Opcode::Other(_) => ControlFlow::Continue(state),
    }
}

fn virtual_call<'a>(
    state: ScanState<'a>,
    called: &MethodRef,
    members: &WellKnownMembers,
) -> ControlFlow<AllocationReason, ScanState<'a>> {
    let descriptor = called.full_name.as_str();
    let returns_reference = !called.return_type.is_value_type();

    if returns_reference && members.is_sequence_member(descriptor, &members.get_enumerator) {
        return ControlFlow::Break(AllocationReason::InterfaceEnumerator);
    }

    // Reference-returning MoveNext is recognized but never classified.
    if returns_reference && members.is_sequence_member(descriptor, &members.move_next) {
        return ControlFlow::Continue(state);
    }

    if let Some(receiver) = state.constrained {
        if members.is_object_virtual(descriptor) && !overrides(receiver, called) {
            return ControlFlow::Break(AllocationReason::InheritedObjectVirtual);
        }
    }

    ControlFlow::Continue(state)
}

/// Whether `receiver` declares a parameterless public virtual override of
/// `called` with the same return type.
///
/// Parameterized members never count, so `Equals(object)` always boxes.
fn overrides(receiver: &TypeDef, called: &MethodRef) -> bool {
    receiver.methods.iter().any(|method| {
        called.full_name.contains(method.name.as_str())
            && method.parameters.is_empty()
            && !method.is_constructor()
            && method.is_public()
            && method.is_virtual()
            && method.return_type.name == called.return_type.name
    })
}
