//! Register identities and the bit-field codes that select them.
//!
//! The load/transfer group uses three separate code tables:
//!
//! - 3-bit single register codes (B, C, D, E, H, L, A; `110` is not a register)
//! - 2-bit pair codes for 16-bit immediate loads (BC, DE, HL)
//! - 2-bit pair codes for PUSH/POP (BC, DE, HL, AF)
//!
//! The two pair tables are both 2 bits wide but cover different pairs, so they
//! are kept as distinct tables and never merged.
use std::fmt;

use crate::error::GenerationError;

/// 8-bit CPU registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Register {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::F => "F",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::H => "H",
            Self::L => "L",
        };
        f.write_str(name)
    }
}

/// Two 8-bit registers addressed together as one 16-bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RegisterPair {
    BC,
    DE,
    HL,
    AF,
}

impl RegisterPair {
    /// Register holding the upper byte
    pub const fn high(self) -> Register {
        match self {
            Self::BC => Register::B,
            Self::DE => Register::D,
            Self::HL => Register::H,
            Self::AF => Register::A,
        }
    }

    /// Register holding the lower byte
    pub const fn low(self) -> Register {
        match self {
            Self::BC => Register::C,
            Self::DE => Register::E,
            Self::HL => Register::L,
            Self::AF => Register::F,
        }
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high(), self.low())
    }
}

/// A bijection between register identities and fixed-width bit codes.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable<T: 'static> {
    name: &'static str,
    width: u8,
    entries: &'static [(T, u8)],
}

impl<T: 'static> CodeTable<T> {
    pub const fn new(name: &'static str, width: u8, entries: &'static [(T, u8)]) -> Self {
        Self {
            name,
            width,
            entries,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Bit width of every code in the table
    pub const fn width(&self) -> u8 {
        self.width
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn entries(&self) -> &'static [(T, u8)] {
        self.entries
    }
}

impl<T: Copy + PartialEq + fmt::Debug + 'static> CodeTable<T> {
    pub fn code_of(&self, identity: T) -> Option<u8> {
        self.entries
            .iter()
            .find(|(id, _)| *id == identity)
            .map(|(_, code)| *code)
    }

    pub fn identity_of(&self, code: u8) -> Option<T> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(id, _)| *id)
    }

    /// Identities in declaration order
    pub fn identities(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Checks that every code fits the table width and that neither identities
    /// nor codes repeat.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidCodeTable {
            table: self.name,
            reason,
        };
        if self.width == 0 || self.width > 8 {
            return Err(invalid(format!("width {} is not a valid field width", self.width)));
        }
        let limit = 1u16 << self.width;
        for (i, (identity, code)) in self.entries.iter().enumerate() {
            if u16::from(*code) >= limit {
                return Err(invalid(format!(
                    "code {code:#b} for {identity:?} exceeds {} bits",
                    self.width
                )));
            }
            for (other, other_code) in &self.entries[i + 1..] {
                if other == identity {
                    return Err(invalid(format!("{identity:?} listed twice")));
                }
                if other_code == code {
                    return Err(invalid(format!(
                        "{identity:?} and {other:?} share code {code:#b}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// 3-bit codes for the single-register fields
pub const REGISTER_CODES: CodeTable<Register> = CodeTable::new(
    "register",
    3,
    &[
        (Register::B, 0b000),
        (Register::C, 0b001),
        (Register::D, 0b010),
        (Register::E, 0b011),
        (Register::H, 0b100),
        (Register::L, 0b101),
        (Register::A, 0b111),
    ],
);

/// 2-bit pair codes used by `LD rr, d16`
pub const LOAD16_PAIR_CODES: CodeTable<RegisterPair> = CodeTable::new(
    "16-bit load pair",
    2,
    &[
        (RegisterPair::BC, 0b00),
        (RegisterPair::DE, 0b01),
        (RegisterPair::HL, 0b10),
    ],
);

/// 2-bit pair codes used by PUSH and POP
pub const STACK_PAIR_CODES: CodeTable<RegisterPair> = CodeTable::new(
    "push/pop pair",
    2,
    &[
        (RegisterPair::BC, 0b00),
        (RegisterPair::DE, 0b01),
        (RegisterPair::HL, 0b10),
        (RegisterPair::AF, 0b11),
    ],
);

/// Which code table supplies the values of a template field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTable {
    Registers,
    Load16Pairs,
    StackPairs,
}

/// An identity drawn from one of the code tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldIdentity {
    Register(Register),
    Pair(RegisterPair),
}

impl fmt::Display for FieldIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(r) => fmt::Display::fmt(r, f),
            Self::Pair(rr) => fmt::Display::fmt(rr, f),
        }
    }
}

impl FieldTable {
    pub const ALL: [Self; 3] = [Self::Registers, Self::Load16Pairs, Self::StackPairs];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Registers => REGISTER_CODES.name(),
            Self::Load16Pairs => LOAD16_PAIR_CODES.name(),
            Self::StackPairs => STACK_PAIR_CODES.name(),
        }
    }

    pub const fn width(self) -> u8 {
        match self {
            Self::Registers => REGISTER_CODES.width(),
            Self::Load16Pairs => LOAD16_PAIR_CODES.width(),
            Self::StackPairs => STACK_PAIR_CODES.width(),
        }
    }

    pub fn identities(self) -> Vec<FieldIdentity> {
        match self {
            Self::Registers => REGISTER_CODES
                .identities()
                .map(FieldIdentity::Register)
                .collect(),
            Self::Load16Pairs => LOAD16_PAIR_CODES
                .identities()
                .map(FieldIdentity::Pair)
                .collect(),
            Self::StackPairs => STACK_PAIR_CODES
                .identities()
                .map(FieldIdentity::Pair)
                .collect(),
        }
    }

    /// Code for `identity`, or `None` if the identity belongs to another table
    pub fn code_of(self, identity: FieldIdentity) -> Option<u8> {
        match (self, identity) {
            (Self::Registers, FieldIdentity::Register(r)) => REGISTER_CODES.code_of(r),
            (Self::Load16Pairs, FieldIdentity::Pair(rr)) => LOAD16_PAIR_CODES.code_of(rr),
            (Self::StackPairs, FieldIdentity::Pair(rr)) => STACK_PAIR_CODES.code_of(rr),
            _ => None,
        }
    }

    pub fn identity_of(self, code: u8) -> Option<FieldIdentity> {
        match self {
            Self::Registers => REGISTER_CODES
                .identity_of(code)
                .map(FieldIdentity::Register),
            Self::Load16Pairs => LOAD16_PAIR_CODES
                .identity_of(code)
                .map(FieldIdentity::Pair),
            Self::StackPairs => STACK_PAIR_CODES
                .identity_of(code)
                .map(FieldIdentity::Pair),
        }
    }

    pub fn validate(self) -> Result<(), GenerationError> {
        match self {
            Self::Registers => REGISTER_CODES.validate(),
            Self::Load16Pairs => LOAD16_PAIR_CODES.validate(),
            Self::StackPairs => STACK_PAIR_CODES.validate(),
        }
    }
}

#[cfg(test)]
mod tests;
