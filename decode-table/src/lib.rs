//! Decode table generation for the Game Boy CPU load/transfer instruction group.
//!
//! Regular sub-families are enumerated from bit-field templates, the irregular
//! literal opcodes are merged in, and the whole set is validated for opcode
//! uniqueness before a [`DecodeTable`] is handed to the execution engine.
pub mod builder;
pub mod config;
pub mod encoding;
pub mod error;
pub mod families;
pub mod irregular;
pub mod operation;
pub mod registers;
pub mod table;

// Re-export common types
pub use builder::OperationDescriptorBuilder;
pub use config::{generate, load_transfer_table, GeneratorConfig};
pub use encoding::{FieldSlot, OpcodeTemplate};
pub use error::{GenerationError, TemplateError};
pub use families::Family;
pub use irregular::{IrregularOpcodeRegistry, LOAD_TRANSFER_LITERALS};
pub use operation::{Effects, Operand, OperationDescriptor, OperationKind};
pub use registers::{
    CodeTable, FieldIdentity, FieldTable, Register, RegisterPair, LOAD16_PAIR_CODES,
    REGISTER_CODES, STACK_PAIR_CODES,
};
pub use table::{DecodeTable, DecodeTableEntry, EntrySource, TableEmitter};
