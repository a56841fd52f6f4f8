//! Construction of [`OperationDescriptor`]s for family combinations and literals.
use crate::error::GenerationError;
use crate::families::Family;
use crate::operation::{Operand, OperationDescriptor, OperationKind};
use crate::registers::{FieldIdentity, RegisterPair};

/// Builds descriptors, including their cycle cost.
///
/// The `const` constructors are shared with the irregular literal table so
/// every descriptor in the decode table goes through the same shapes.
pub struct OperationDescriptorBuilder;

impl OperationDescriptorBuilder {
    /// Machine cycles charged by every member of a regular family
    pub const fn cycles_for(family: Family) -> u8 {
        match family {
            Family::RegisterToRegister => 1,
            Family::ImmediateToRegister => 2,
            Family::PointerToRegister => 2,
            Family::RegisterToPointer => 2,
            Family::Immediate16ToPair => 3,
            Family::PushPair => 4,
            Family::PopPair => 3,
        }
    }

    /// Descriptor for one operand combination of `family`, operands given in
    /// template slot order.
    pub fn for_family(
        family: Family,
        operands: &[FieldIdentity],
    ) -> Result<OperationDescriptor, GenerationError> {
        use FieldIdentity::{Pair, Register as Reg};

        let cycles = Self::cycles_for(family);
        let hl = Operand::PairPointer(RegisterPair::HL);
        let descriptor = match (family, operands) {
            (Family::RegisterToRegister, [Reg(dest), Reg(src)]) => {
                Self::load(Operand::Register(*dest), Operand::Register(*src), cycles)
            }
            (Family::ImmediateToRegister, [Reg(dest)]) => {
                Self::load(Operand::Register(*dest), Operand::Immediate8, cycles)
            }
            (Family::PointerToRegister, [Reg(dest)]) => {
                Self::load(Operand::Register(*dest), hl, cycles)
            }
            (Family::RegisterToPointer, [Reg(src)]) => {
                Self::load(hl, Operand::Register(*src), cycles)
            }
            (Family::Immediate16ToPair, [Pair(dest)]) => {
                Self::load16(Operand::RegisterPair(*dest), Operand::Immediate16, cycles)
            }
            (Family::PushPair, [Pair(src)]) => Self::push(*src, cycles),
            (Family::PopPair, [Pair(dest)]) => Self::pop(*dest, cycles),
            _ => {
                return Err(GenerationError::OperandMismatch {
                    family,
                    operands: format!("{operands:?}"),
                })
            }
        };
        Ok(descriptor)
    }

    pub const fn load(destination: Operand, source: Operand, cycles: u8) -> OperationDescriptor {
        OperationDescriptor::new(OperationKind::Load, destination, source, cycles)
    }

    /// Transfer through (HL) followed by HL += 1
    pub const fn load_increment(
        destination: Operand,
        source: Operand,
        cycles: u8,
    ) -> OperationDescriptor {
        OperationDescriptor::new(OperationKind::LoadIncrement, destination, source, cycles)
    }

    /// Transfer through (HL) followed by HL -= 1
    pub const fn load_decrement(
        destination: Operand,
        source: Operand,
        cycles: u8,
    ) -> OperationDescriptor {
        OperationDescriptor::new(OperationKind::LoadDecrement, destination, source, cycles)
    }

    pub const fn load16(destination: Operand, source: Operand, cycles: u8) -> OperationDescriptor {
        OperationDescriptor::new(OperationKind::Load16, destination, source, cycles)
    }

    pub const fn push(pair: RegisterPair, cycles: u8) -> OperationDescriptor {
        OperationDescriptor::new(
            OperationKind::Push,
            Operand::Stack,
            Operand::RegisterPair(pair),
            cycles,
        )
    }

    pub const fn pop(pair: RegisterPair, cycles: u8) -> OperationDescriptor {
        OperationDescriptor::new(
            OperationKind::Pop,
            Operand::RegisterPair(pair),
            Operand::Stack,
            cycles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::Register;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_to_register_descriptor() {
        let descriptor = OperationDescriptorBuilder::for_family(
            Family::RegisterToRegister,
            &[
                FieldIdentity::Register(Register::B),
                FieldIdentity::Register(Register::C),
            ],
        )
        .unwrap();
        assert_eq!(descriptor.kind, OperationKind::Load);
        assert_eq!(descriptor.destination, Operand::Register(Register::B));
        assert_eq!(descriptor.source, Operand::Register(Register::C));
        assert_eq!(descriptor.cycles, 1);
    }

    #[test]
    fn test_pair_families_use_stack_operand() {
        let push = OperationDescriptorBuilder::for_family(
            Family::PushPair,
            &[FieldIdentity::Pair(RegisterPair::AF)],
        )
        .unwrap();
        assert_eq!(push, OperationDescriptorBuilder::push(RegisterPair::AF, 4));

        let pop = OperationDescriptorBuilder::for_family(
            Family::PopPair,
            &[FieldIdentity::Pair(RegisterPair::DE)],
        )
        .unwrap();
        assert_eq!(pop.destination, Operand::RegisterPair(RegisterPair::DE));
        assert_eq!(pop.source, Operand::Stack);
        assert_eq!(pop.cycles, 3);
    }

    #[test]
    fn test_operand_shape_mismatch_is_rejected() {
        let err = OperationDescriptorBuilder::for_family(
            Family::PushPair,
            &[FieldIdentity::Register(Register::A)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::OperandMismatch {
                family: Family::PushPair,
                ..
            }
        ));

        let err = OperationDescriptorBuilder::for_family(Family::RegisterToRegister, &[])
            .unwrap_err();
        assert!(matches!(err, GenerationError::OperandMismatch { .. }));
    }
}
