//! Load/transfer opcodes that sit outside every family grid.
//!
//! These are fixed literals: (BC)/(DE) accumulator transfers, the high-page
//! and absolute-address forms, the HL post-increment/decrement forms and the
//! stack pointer loads. Only HL gets the auto-adjusting and general register
//! indirection forms; BC and DE are limited to moving A.
use tracing::debug;

use crate::builder::OperationDescriptorBuilder as Op;
use crate::error::GenerationError;
use crate::operation::Operand;
use crate::registers::{Register, RegisterPair};
use crate::table::{DecodeTableEntry, EntrySource};

const A: Operand = Operand::Register(Register::A);
const BC: Operand = Operand::PairPointer(RegisterPair::BC);
const DE: Operand = Operand::PairPointer(RegisterPair::DE);
const HL: Operand = Operand::PairPointer(RegisterPair::HL);
const C: Operand = Operand::HighPagePointer(Register::C);

/// The standard irregular literals of the load/transfer group
pub const LOAD_TRANSFER_LITERALS: &[DecodeTableEntry] = &[
    DecodeTableEntry::new(0x0A, Op::load(A, BC, 2)),
    DecodeTableEntry::new(0x1A, Op::load(A, DE, 2)),
    DecodeTableEntry::new(0x02, Op::load(BC, A, 2)),
    DecodeTableEntry::new(0x12, Op::load(DE, A, 2)),
    DecodeTableEntry::new(0x36, Op::load(HL, Operand::Immediate8, 3)),
    DecodeTableEntry::new(0xF2, Op::load(A, C, 2)),
    DecodeTableEntry::new(0xE2, Op::load(C, A, 2)),
    DecodeTableEntry::new(0xF0, Op::load(A, Operand::HighPageAddress, 3)),
    DecodeTableEntry::new(0xE0, Op::load(Operand::HighPageAddress, A, 3)),
    DecodeTableEntry::new(0xFA, Op::load(A, Operand::Address16, 4)),
    DecodeTableEntry::new(0xEA, Op::load(Operand::Address16, A, 4)),
    DecodeTableEntry::new(0x2A, Op::load_increment(A, HL, 2)),
    DecodeTableEntry::new(0x3A, Op::load_decrement(A, HL, 2)),
    DecodeTableEntry::new(0x22, Op::load_increment(HL, A, 2)),
    DecodeTableEntry::new(0x32, Op::load_decrement(HL, A, 2)),
    DecodeTableEntry::new(
        0x31,
        Op::load16(Operand::StackPointer, Operand::Immediate16, 3),
    ),
    DecodeTableEntry::new(
        0xF9,
        Op::load16(
            Operand::StackPointer,
            Operand::RegisterPair(RegisterPair::HL),
            2,
        ),
    ),
];

/// Literal entries that passed the collision check against generated opcodes.
#[derive(Debug, Clone, Default)]
pub struct IrregularOpcodeRegistry {
    entries: Vec<DecodeTableEntry>,
}

impl IrregularOpcodeRegistry {
    /// Accepts `literals` one at a time, rejecting the first that reuses an
    /// opcode from `claimed` or from an earlier literal.
    pub fn admit(
        literals: &[DecodeTableEntry],
        claimed: &[(EntrySource, DecodeTableEntry)],
    ) -> Result<Self, GenerationError> {
        let mut registry = Self::default();
        for literal in literals {
            if let Some((source, _)) = claimed
                .iter()
                .find(|(_, entry)| entry.opcode == literal.opcode)
            {
                return Err(GenerationError::OpcodeCollision {
                    opcode: literal.opcode,
                    first: *source,
                    second: EntrySource::Irregular,
                });
            }
            if registry.contains(literal.opcode) {
                return Err(GenerationError::OpcodeCollision {
                    opcode: literal.opcode,
                    first: EntrySource::Irregular,
                    second: EntrySource::Irregular,
                });
            }
            registry.entries.push(*literal);
        }
        debug!(admitted = registry.entries.len(), "irregular literals admitted");
        Ok(registry)
    }

    pub fn contains(&self, opcode: u8) -> bool {
        self.entries.iter().any(|entry| entry.opcode == opcode)
    }

    pub fn entries(&self) -> &[DecodeTableEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DecodeTableEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::Family;
    use crate::operation::OperationKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_literals_have_distinct_opcodes() {
        let registry = IrregularOpcodeRegistry::admit(LOAD_TRANSFER_LITERALS, &[]).unwrap();
        assert_eq!(registry.entries().len(), 17);
    }

    #[test]
    fn test_hl_post_increment_load() {
        let entry = LOAD_TRANSFER_LITERALS
            .iter()
            .find(|entry| entry.opcode == 0x2A)
            .unwrap();
        assert_eq!(entry.descriptor.kind, OperationKind::LoadIncrement);
        assert_eq!(entry.descriptor.source, HL);
        assert_eq!(entry.descriptor.destination, A);
        assert_eq!(entry.descriptor.cycles, 2);
    }

    #[test]
    fn test_only_hl_gets_pointer_adjustment() {
        for entry in LOAD_TRANSFER_LITERALS {
            if entry.descriptor.hl_adjustment() != 0 {
                assert!(entry.descriptor.source == HL || entry.descriptor.destination == HL);
            }
            for operand in [entry.descriptor.source, entry.descriptor.destination] {
                if operand == BC || operand == DE {
                    assert_eq!(entry.descriptor.kind, OperationKind::Load);
                    assert!(entry.descriptor.source == A || entry.descriptor.destination == A);
                }
            }
        }
    }

    #[test]
    fn test_literal_colliding_with_generated_opcode_is_rejected() {
        let generated: Vec<_> = Family::RegisterToRegister
            .enumerate()
            .unwrap()
            .into_iter()
            .map(|entry| (EntrySource::Family(Family::RegisterToRegister), entry))
            .collect();
        let rogue = DecodeTableEntry::new(0x41, Op::load(A, BC, 2));

        let err = IrregularOpcodeRegistry::admit(&[rogue], &generated).unwrap_err();
        assert_eq!(
            err,
            GenerationError::OpcodeCollision {
                opcode: 0x41,
                first: EntrySource::Family(Family::RegisterToRegister),
                second: EntrySource::Irregular,
            }
        );
    }

    #[test]
    fn test_duplicate_literal_is_rejected() {
        let literal = LOAD_TRANSFER_LITERALS[0];
        let err = IrregularOpcodeRegistry::admit(&[literal, literal], &[]).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::OpcodeCollision {
                first: EntrySource::Irregular,
                second: EntrySource::Irregular,
                ..
            }
        ));
    }
}
