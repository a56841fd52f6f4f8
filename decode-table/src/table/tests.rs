use super::*;
use crate::builder::OperationDescriptorBuilder;
use crate::operation::Operand;
use crate::registers::{Register, RegisterPair};
use pretty_assertions::assert_eq;

const LD_B_C: OperationDescriptor = OperationDescriptorBuilder::load(
    Operand::Register(Register::B),
    Operand::Register(Register::C),
    1,
);

const PUSH_HL: OperationDescriptor = OperationDescriptorBuilder::push(RegisterPair::HL, 4);

#[test]
fn test_emit_orders_by_opcode() {
    let mut emitter = TableEmitter::new();
    emitter.push(EntrySource::Irregular, DecodeTableEntry::new(0xE5, PUSH_HL));
    emitter.push(
        EntrySource::Family(Family::RegisterToRegister),
        DecodeTableEntry::new(0x41, LD_B_C),
    );
    assert_eq!(emitter.len(), 2);

    let table = emitter.emit().unwrap();
    assert_eq!(table.opcodes().collect::<Vec<_>>(), vec![0x41, 0xE5]);
    assert_eq!(table.get(0x41), Some(&LD_B_C));
    assert!(table.contains(0xE5));
    assert!(!table.contains(0x00));
    assert_eq!(table.iter().len(), 2);
}

#[test]
fn test_emit_rejects_collision_between_sources() {
    let mut emitter = TableEmitter::new();
    emitter.extend(
        EntrySource::Family(Family::RegisterToRegister),
        [DecodeTableEntry::new(0x41, LD_B_C)],
    );
    emitter.extend(
        EntrySource::Irregular,
        [DecodeTableEntry::new(0x41, PUSH_HL)],
    );

    assert_eq!(
        emitter.emit(),
        Err(GenerationError::OpcodeCollision {
            opcode: 0x41,
            first: EntrySource::Family(Family::RegisterToRegister),
            second: EntrySource::Irregular,
        })
    );
}

#[test]
fn test_emit_rejects_duplicate_within_one_source() {
    let mut emitter = TableEmitter::new();
    emitter.extend(
        EntrySource::Irregular,
        [
            DecodeTableEntry::new(0xE5, PUSH_HL),
            DecodeTableEntry::new(0xE5, PUSH_HL),
        ],
    );
    assert!(matches!(
        emitter.emit(),
        Err(GenerationError::OpcodeCollision { opcode: 0xE5, .. })
    ));
}

#[test]
fn test_empty_emitter_yields_empty_table() {
    let emitter = TableEmitter::new();
    assert!(emitter.is_empty());
    let table = emitter.emit().unwrap();
    assert!(table.is_empty());
    assert_eq!((&table).into_iter().count(), 0);
}

#[test]
fn test_collision_message_names_both_sources() {
    let err = GenerationError::OpcodeCollision {
        opcode: 0x41,
        first: EntrySource::Family(Family::RegisterToRegister),
        second: EntrySource::Irregular,
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"Opcode 0x41 produced by both family `LD r, r'` and irregular literal"
    );
}
