use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(Register::B, 0b000)]
#[test_case(Register::C, 0b001)]
#[test_case(Register::D, 0b010)]
#[test_case(Register::E, 0b011)]
#[test_case(Register::H, 0b100)]
#[test_case(Register::L, 0b101)]
#[test_case(Register::A, 0b111)]
fn test_register_codes(register: Register, code: u8) {
    assert_eq!(REGISTER_CODES.code_of(register), Some(code));
    assert_eq!(REGISTER_CODES.identity_of(code), Some(register));
}

#[test]
fn test_register_table_is_complete_bijection() {
    assert!(REGISTER_CODES.validate().is_ok());
    assert_eq!(REGISTER_CODES.len(), 7);
    assert_eq!(REGISTER_CODES.width(), 3);
    // 0b110 selects (HL) in the register grid, not a register
    assert_eq!(REGISTER_CODES.identity_of(0b110), None);
    assert_eq!(REGISTER_CODES.code_of(Register::F), None);
}

#[test]
fn test_pair_tables_are_independent() {
    assert!(LOAD16_PAIR_CODES.validate().is_ok());
    assert!(STACK_PAIR_CODES.validate().is_ok());

    assert_eq!(LOAD16_PAIR_CODES.len(), 3);
    assert_eq!(STACK_PAIR_CODES.len(), 4);

    // AF only exists in the push/pop table
    assert_eq!(LOAD16_PAIR_CODES.code_of(RegisterPair::AF), None);
    assert_eq!(LOAD16_PAIR_CODES.identity_of(0b11), None);
    assert_eq!(STACK_PAIR_CODES.code_of(RegisterPair::AF), Some(0b11));
    assert_eq!(STACK_PAIR_CODES.identity_of(0b11), Some(RegisterPair::AF));
}

#[test]
fn test_validate_rejects_shared_code() {
    const BROKEN: CodeTable<RegisterPair> = CodeTable::new(
        "broken",
        2,
        &[(RegisterPair::BC, 0b00), (RegisterPair::DE, 0b00)],
    );
    let err = BROKEN.validate().unwrap_err();
    assert!(matches!(
        err,
        GenerationError::InvalidCodeTable { table: "broken", .. }
    ));
}

#[test]
fn test_validate_rejects_duplicate_identity() {
    const BROKEN: CodeTable<Register> =
        CodeTable::new("broken", 3, &[(Register::A, 0b000), (Register::A, 0b001)]);
    assert!(BROKEN.validate().is_err());
}

#[test]
fn test_validate_rejects_code_wider_than_table() {
    const BROKEN: CodeTable<Register> = CodeTable::new("broken", 2, &[(Register::A, 0b111)]);
    assert!(BROKEN.validate().is_err());
}

#[test]
fn test_field_table_lookup_respects_identity_kind() {
    let b = FieldIdentity::Register(Register::B);
    let bc = FieldIdentity::Pair(RegisterPair::BC);
    assert_eq!(FieldTable::Registers.code_of(b), Some(0));
    assert_eq!(FieldTable::Registers.code_of(bc), None);
    assert_eq!(FieldTable::StackPairs.code_of(b), None);
    assert_eq!(
        FieldTable::StackPairs.identity_of(0b10),
        Some(FieldIdentity::Pair(RegisterPair::HL))
    );
    for table in FieldTable::ALL {
        assert!(table.validate().is_ok(), "{} table invalid", table.name());
    }
}

#[test]
fn test_pair_halves_and_names() {
    assert_eq!(RegisterPair::AF.high(), Register::A);
    assert_eq!(RegisterPair::AF.low(), Register::F);
    assert_eq!(RegisterPair::DE.to_string(), "DE");
    assert_eq!(FieldIdentity::Register(Register::L).to_string(), "L");
}
