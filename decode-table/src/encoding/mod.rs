//! Bit-field composition of opcode bytes.
//!
//! An [`OpcodeTemplate`] is a fixed 8-bit pattern plus zero or more variable
//! fields. Every bit not claimed by a field is a fixed bit, so a template that
//! passes construction always covers exactly 8 bits with no overlap.
//!
//! ```text
//!   LD r, r'     0 1 d d d s s s      d = dest register, s = source register
//!   PUSH rr      1 1 p p 0 1 0 1      p = push/pop pair code
//! ```
use crate::error::TemplateError;
use crate::registers::FieldTable;

/// A variable bit range inside an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    /// Bit position of the least significant bit of the field
    pub offset: u8,
    pub width: u8,
    /// Code table supplying the field values
    pub table: FieldTable,
}

impl FieldSlot {
    /// A slot as wide as the codes of `table`
    pub const fn new(offset: u8, table: FieldTable) -> Self {
        Self {
            offset,
            width: table.width(),
            table,
        }
    }

    pub const fn with_width(offset: u8, width: u8, table: FieldTable) -> Self {
        Self {
            offset,
            width,
            table,
        }
    }

    /// Largest value the slot can hold
    pub const fn max_value(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Bits of the opcode covered by this slot
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) << self.offset) as u8
    }
}

/// Fixed opcode bits plus the variable fields that complete them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTemplate {
    fixed: u8,
    slots: Vec<FieldSlot>,
}

impl OpcodeTemplate {
    /// Builds a template, rejecting fields that leave the byte, overlap each
    /// other, overlap set fixed bits, or disagree with their code table width.
    pub fn new(fixed: u8, slots: &[FieldSlot]) -> Result<Self, TemplateError> {
        let mut field_mask = 0u8;
        for slot in slots {
            if slot.width == 0 {
                return Err(TemplateError::EmptyField {
                    offset: slot.offset,
                });
            }
            if u16::from(slot.offset) + u16::from(slot.width) > 8 {
                return Err(TemplateError::FieldOutOfRange {
                    offset: slot.offset,
                    width: slot.width,
                });
            }
            if slot.width != slot.table.width() {
                return Err(TemplateError::WidthMismatch {
                    table: slot.table.name(),
                    width: slot.width,
                    expected: slot.table.width(),
                });
            }
            if field_mask & slot.mask() != 0 {
                return Err(TemplateError::OverlappingFields {
                    mask: field_mask & slot.mask(),
                });
            }
            field_mask |= slot.mask();
        }
        if fixed & field_mask != 0 {
            return Err(TemplateError::FixedBitsOverlap {
                fixed,
                mask: field_mask,
            });
        }
        Ok(Self {
            fixed,
            slots: slots.to_vec(),
        })
    }

    pub const fn fixed_bits(&self) -> u8 {
        self.fixed
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// Union of all variable field bits
    pub fn field_mask(&self) -> u8 {
        self.slots.iter().fold(0, |mask, slot| mask | slot.mask())
    }

    /// Bits that hold the fixed pattern; the complement of [`Self::field_mask`]
    pub fn fixed_mask(&self) -> u8 {
        !self.field_mask()
    }

    /// Inserts one value per slot, in slot order, into the fixed pattern.
    pub fn encode(&self, values: &[u8]) -> Result<u8, TemplateError> {
        if values.len() != self.slots.len() {
            return Err(TemplateError::FieldCount {
                expected: self.slots.len(),
                actual: values.len(),
            });
        }
        self.slots
            .iter()
            .zip(values)
            .try_fold(self.fixed, |opcode, (slot, &value)| {
                if value > slot.max_value() {
                    return Err(TemplateError::ValueTooWide {
                        value,
                        width: slot.width,
                    });
                }
                Ok(opcode | (value << slot.offset))
            })
    }

    /// Extracts the slot values from `opcode`, or `None` if its fixed bits do
    /// not match this template.
    pub fn decode(&self, opcode: u8) -> Option<Vec<u8>> {
        if opcode & self.fixed_mask() != self.fixed {
            return None;
        }
        Some(
            self.slots
                .iter()
                .map(|slot| (opcode & slot.mask()) >> slot.offset)
                .collect(),
        )
    }
}
