use thiserror::Error;

use crate::families::Family;
use crate::table::EntrySource;

/// Errors raised while building or applying an opcode template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Field at bit {offset} with width {width} does not fit in an 8-bit opcode")]
    FieldOutOfRange { offset: u8, width: u8 },
    #[error("Field at bit {offset} has zero width")]
    EmptyField { offset: u8 },
    #[error("Fields overlap in mask {mask:#010b}")]
    OverlappingFields { mask: u8 },
    #[error("Fixed bits {fixed:#010b} overlap field mask {mask:#010b}")]
    FixedBitsOverlap { fixed: u8, mask: u8 },
    #[error("Field width {width} does not match the {table} code width {expected}")]
    WidthMismatch {
        table: &'static str,
        width: u8,
        expected: u8,
    },
    #[error("Expected {expected} field values, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("Value {value:#04X} does not fit in a {width}-bit field")]
    ValueTooWide { value: u8, width: u8 },
}

/// Errors that abort decode table generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Opcode {opcode:#04X} produced by both {first} and {second}")]
    OpcodeCollision {
        opcode: u8,
        first: EntrySource,
        second: EntrySource,
    },
    #[error("Malformed template: {0}")]
    Template(#[from] TemplateError),
    #[error("Invalid {table} code table: {reason}")]
    InvalidCodeTable { table: &'static str, reason: String },
    #[error("{family} received operands {operands} it cannot encode")]
    OperandMismatch { family: Family, operands: String },
    #[error("{table} has no code for {identity}")]
    MissingCode {
        table: &'static str,
        identity: String,
    },
}
