//! Regular instruction families of the load/transfer group.
//!
//! Each family is one opcode template plus a rule for building descriptors.
//! Enumerating a family walks the full operand space of its template fields
//! (a Cartesian product for two fields), encodes each combination and pairs it
//! with its descriptor.
//!
//! | Family              | Template      | Field codes        | Cycles |
//! |---------------------|---------------|--------------------|--------|
//! | `LD r, r'`          | `01 ddd sss`  | register x2        | 1      |
//! | `LD r, d8`          | `00 ddd 110`  | register           | 2      |
//! | `LD r, (HL)`        | `01 ddd 110`  | register           | 2      |
//! | `LD (HL), r`        | `01 110 sss`  | register           | 2      |
//! | `LD rr, d16`        | `00 pp 0001`  | 16-bit load pair   | 3      |
//! | `PUSH rr`           | `11 pp 0101`  | push/pop pair      | 4      |
//! | `POP rr`            | `11 pp 0001`  | push/pop pair      | 3      |
use std::fmt;

use tracing::trace;

use crate::builder::OperationDescriptorBuilder;
use crate::encoding::{FieldSlot, OpcodeTemplate};
use crate::error::{GenerationError, TemplateError};
use crate::registers::{FieldIdentity, FieldTable};
use crate::table::DecodeTableEntry;

const DEST_REGISTER: FieldSlot = FieldSlot::new(3, FieldTable::Registers);
const SRC_REGISTER: FieldSlot = FieldSlot::new(0, FieldTable::Registers);
const LOAD16_PAIR: FieldSlot = FieldSlot::new(4, FieldTable::Load16Pairs);
const STACK_PAIR: FieldSlot = FieldSlot::new(4, FieldTable::StackPairs);

const REGISTER_GRID: &[FieldSlot] = &[DEST_REGISTER, SRC_REGISTER];
const DEST_ONLY: &[FieldSlot] = &[DEST_REGISTER];
const SRC_ONLY: &[FieldSlot] = &[SRC_REGISTER];
const LOAD16_ONLY: &[FieldSlot] = &[LOAD16_PAIR];
const STACK_ONLY: &[FieldSlot] = &[STACK_PAIR];

/// A regular sub-family of the load/transfer group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Family {
    RegisterToRegister,
    ImmediateToRegister,
    PointerToRegister,
    RegisterToPointer,
    Immediate16ToPair,
    PushPair,
    PopPair,
}

impl Family {
    pub const ALL: [Self; 7] = [
        Self::RegisterToRegister,
        Self::ImmediateToRegister,
        Self::PointerToRegister,
        Self::RegisterToPointer,
        Self::Immediate16ToPair,
        Self::PushPair,
        Self::PopPair,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::RegisterToRegister => "LD r, r'",
            Self::ImmediateToRegister => "LD r, d8",
            Self::PointerToRegister => "LD r, (HL)",
            Self::RegisterToPointer => "LD (HL), r",
            Self::Immediate16ToPair => "LD rr, d16",
            Self::PushPair => "PUSH rr",
            Self::PopPair => "POP rr",
        }
    }

    const fn layout(self) -> (u8, &'static [FieldSlot]) {
        match self {
            Self::RegisterToRegister => (0b0100_0000, REGISTER_GRID),
            Self::ImmediateToRegister => (0b0000_0110, DEST_ONLY),
            Self::PointerToRegister => (0b0100_0110, DEST_ONLY),
            Self::RegisterToPointer => (0b0111_0000, SRC_ONLY),
            Self::Immediate16ToPair => (0b0000_0001, LOAD16_ONLY),
            Self::PushPair => (0b1100_0101, STACK_ONLY),
            Self::PopPair => (0b1100_0001, STACK_ONLY),
        }
    }

    pub fn template(self) -> Result<OpcodeTemplate, TemplateError> {
        let (fixed, slots) = self.layout();
        OpcodeTemplate::new(fixed, slots)
    }

    /// Every operand combination, in slot order, with the first slot varying
    /// slowest.
    pub fn operand_space(self) -> Vec<Vec<FieldIdentity>> {
        let (_, slots) = self.layout();
        slots.iter().fold(vec![Vec::new()], |combinations, slot| {
            let identities = slot.table.identities();
            combinations
                .iter()
                .flat_map(|prefix| {
                    identities.iter().map(move |identity| {
                        let mut combination = prefix.clone();
                        combination.push(*identity);
                        combination
                    })
                })
                .collect()
        })
    }

    /// Encodes and describes every member of the family.
    pub fn enumerate(self) -> Result<Vec<DecodeTableEntry>, GenerationError> {
        let template = self.template()?;
        self.operand_space()
            .iter()
            .map(|operands| -> Result<DecodeTableEntry, GenerationError> {
                let codes = operands
                    .iter()
                    .zip(template.slots())
                    .map(|(identity, slot)| {
                        slot.table
                            .code_of(*identity)
                            .ok_or_else(|| GenerationError::MissingCode {
                                table: slot.table.name(),
                                identity: identity.to_string(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let opcode = template.encode(&codes)?;
                let descriptor = OperationDescriptorBuilder::for_family(self, operands)?;
                trace!(family = self.name(), opcode, %descriptor, "encoded");
                Ok(DecodeTableEntry::new(opcode, descriptor))
            })
            .collect()
    }

    /// Operand identities encoded in `opcode`, or `None` if the opcode is not a
    /// member of this family.
    pub fn recover_operands(self, opcode: u8) -> Option<Vec<FieldIdentity>> {
        let template = self.template().ok()?;
        let codes = template.decode(opcode)?;
        codes
            .iter()
            .zip(template.slots())
            .map(|(code, slot)| slot.table.identity_of(*code))
            .collect()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
