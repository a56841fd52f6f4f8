//! Semantic description of a decoded load/transfer instruction.
//!
//! A descriptor names the operation, where data comes from, where it goes, and
//! how many machine cycles the instruction takes. The execution engine uses it
//! to drive register and memory transfers without re-deriving anything from
//! opcode bits.
use std::fmt;

use bitflags::bitflags;

use crate::registers::{Register, RegisterPair};

/// Operation performed by an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OperationKind {
    /// 8-bit transfer
    Load,
    /// 8-bit transfer through (HL), then HL is incremented
    LoadIncrement,
    /// 8-bit transfer through (HL), then HL is decremented
    LoadDecrement,
    /// 16-bit transfer
    Load16,
    /// Decrement SP twice and store a register pair on the stack
    Push,
    /// Load a register pair from the stack and increment SP twice
    Pop,
}

/// Where an operation reads from or writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Operand {
    Register(Register),
    RegisterPair(RegisterPair),
    StackPointer,
    /// Memory addressed by a register pair, e.g. `(HL)`
    PairPointer(RegisterPair),
    /// Memory at `0xFF00 | register`, e.g. `(C)`
    HighPagePointer(Register),
    /// Byte following the opcode
    Immediate8,
    /// Little-endian word following the opcode
    Immediate16,
    /// Memory at `0xFF00 | d8`, where `d8` follows the opcode
    HighPageAddress,
    /// Memory at the little-endian address following the opcode
    Address16,
    /// Memory at SP, as used by PUSH and POP
    Stack,
}

impl Operand {
    pub const fn is_memory(self) -> bool {
        matches!(
            self,
            Self::PairPointer(_)
                | Self::HighPagePointer(_)
                | Self::HighPageAddress
                | Self::Address16
                | Self::Stack
        )
    }

    /// Number of bytes this operand consumes after the opcode
    pub const fn immediate_bytes(self) -> u8 {
        match self {
            Self::Immediate8 | Self::HighPageAddress => 1,
            Self::Immediate16 | Self::Address16 => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(r) => write!(f, "{r}"),
            Self::RegisterPair(rr) => write!(f, "{rr}"),
            Self::StackPointer => f.write_str("SP"),
            Self::PairPointer(rr) => write!(f, "({rr})"),
            Self::HighPagePointer(r) => write!(f, "({r})"),
            Self::Immediate8 => f.write_str("d8"),
            Self::Immediate16 => f.write_str("d16"),
            Self::HighPageAddress => f.write_str("(a8)"),
            Self::Address16 => f.write_str("(a16)"),
            Self::Stack => f.write_str("(SP)"),
        }
    }
}

bitflags! {
    /// Side effects the execution engine must carry out for an instruction
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Effects: u8 {
        const READS_MEMORY  = 0b0000_0001;
        const WRITES_MEMORY = 0b0000_0010;
        const IMMEDIATE_8   = 0b0000_0100;
        const IMMEDIATE_16  = 0b0000_1000;
        const STACK         = 0b0001_0000;
        const ADJUSTS_HL    = 0b0010_0000;
    }
}

/// Decoded form of one opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OperationDescriptor {
    pub kind: OperationKind,
    pub destination: Operand,
    pub source: Operand,
    /// Machine cycles, including the opcode fetch
    pub cycles: u8,
}

impl OperationDescriptor {
    pub const fn new(
        kind: OperationKind,
        destination: Operand,
        source: Operand,
        cycles: u8,
    ) -> Self {
        Self {
            kind,
            destination,
            source,
            cycles,
        }
    }

    /// Cycle cost in clock ticks (4 per machine cycle)
    pub const fn clock_ticks(&self) -> u16 {
        self.cycles as u16 * 4
    }

    /// Instruction length in bytes, opcode included
    pub const fn length(&self) -> u8 {
        1 + self.destination.immediate_bytes() + self.source.immediate_bytes()
    }

    /// Change applied to HL after the transfer
    pub const fn hl_adjustment(&self) -> i8 {
        match self.kind {
            OperationKind::LoadIncrement => 1,
            OperationKind::LoadDecrement => -1,
            _ => 0,
        }
    }

    pub fn effects(&self) -> Effects {
        let mut effects = Effects::empty();
        if self.source.is_memory() {
            effects |= Effects::READS_MEMORY;
        }
        if self.destination.is_memory() {
            effects |= Effects::WRITES_MEMORY;
        }
        if self.source == Operand::Stack || self.destination == Operand::Stack {
            effects |= Effects::STACK;
        }
        for operand in [self.source, self.destination] {
            match operand.immediate_bytes() {
                1 => effects |= Effects::IMMEDIATE_8,
                2 => effects |= Effects::IMMEDIATE_16,
                _ => {}
            }
        }
        if self.hl_adjustment() != 0 {
            effects |= Effects::ADJUSTS_HL;
        }
        effects
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, operand: Operand) -> fmt::Result {
        match (operand, self.kind) {
            (Operand::PairPointer(RegisterPair::HL), OperationKind::LoadIncrement) => {
                f.write_str("(HL+)")
            }
            (Operand::PairPointer(RegisterPair::HL), OperationKind::LoadDecrement) => {
                f.write_str("(HL-)")
            }
            _ => write!(f, "{operand}"),
        }
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperationKind::Push => return write!(f, "PUSH {}", self.source),
            OperationKind::Pop => return write!(f, "POP {}", self.destination),
            _ => {}
        }
        let high_page =
            self.destination == Operand::HighPageAddress || self.source == Operand::HighPageAddress;
        f.write_str(if high_page { "LDH " } else { "LD " })?;
        self.write_operand(f, self.destination)?;
        f.write_str(", ")?;
        self.write_operand(f, self.source)
    }
}
