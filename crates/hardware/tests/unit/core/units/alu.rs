//! ALU tests.
//!
//! Verifies operation results, the comparison flags (including the
//! borrow-as-overflow convention the branch resolution table depends on),
//! shift-amount extraction, and the control table.

use proptest::prelude::*;
use rstest::rstest;

use rvpipe_core::core::pipeline::signals::AluOpClass;
use rvpipe_core::core::units::alu::{self, AluInst};

// ──────────────────────────────────────────────────────────
// 1. Operations
// ──────────────────────────────────────────────────────────

#[rstest]
#[case::and(AluInst::And, 0b1100, 0b1010, 0b1000)]
#[case::or(AluInst::Or, 0b1100, 0b1010, 0b1110)]
#[case::xor(AluInst::Xor, 0b1100, 0b1010, 0b0110)]
#[case::add(AluInst::Add, 5, 7, 12)]
#[case::sub(AluInst::Sub, 7, 5, 2)]
#[case::sll(AluInst::Sll, 1, 4, 0x10)]
#[case::srl(AluInst::Srl, 0x10, 4, 1)]
fn operation_results(#[case] inst: AluInst, #[case] a: u64, #[case] b: u64, #[case] expect: u64) {
    let (result, _) = alu::execute(inst, a, b, 64);
    assert_eq!(result, expect);
}

#[test]
fn shift_amount_uses_low_six_bits() {
    // Bit 6 and above of op1 must be ignored.
    let (result, _) = alu::execute(AluInst::Sll, 1, 0x40 | 3, 64);
    assert_eq!(result, 8, "shamt is op1[5:0]");
}

#[test]
fn results_mask_to_width() {
    let (result, flags) = alu::execute(AluInst::Add, 0xffff_ffff, 1, 32);
    assert_eq!(result, 0, "32-bit add wraps");
    assert!(flags.zero);
    assert!(flags.overflow, "carry out of bit 32");
}

// ──────────────────────────────────────────────────────────
// 2. Flags
// ──────────────────────────────────────────────────────────

#[test]
fn zero_and_sign_track_result() {
    let (_, flags) = alu::execute(AluInst::Sub, 9, 9, 64);
    assert!(flags.zero);
    assert!(!flags.sign);

    let (_, flags) = alu::execute(AluInst::Sub, 3, 9, 64);
    assert!(!flags.zero);
    assert!(flags.sign, "negative difference sets the sign bit");
}

#[test]
fn subtract_overflow_is_unsigned_borrow() {
    // bltu resolves on this flag: overflow <=> op0 < op1 (unsigned).
    let (_, flags) = alu::execute(AluInst::Sub, 1, 2, 64);
    assert!(flags.overflow, "1 < 2 unsigned");

    let (_, flags) = alu::execute(AluInst::Sub, 2, 1, 64);
    assert!(!flags.overflow);

    let (_, flags) = alu::execute(AluInst::Sub, u64::MAX, 1, 64);
    assert!(!flags.overflow, "MAX >= 1 unsigned even though negative signed");
}

proptest! {
    #[test]
    fn borrow_matches_unsigned_compare(a: u64, b: u64) {
        let (_, flags) = alu::execute(AluInst::Sub, a, b, 64);
        prop_assert_eq!(flags.overflow, a < b);
    }

    #[test]
    fn add_matches_wrapping_reference(a: u64, b: u64) {
        let (result, _) = alu::execute(AluInst::Add, a, b, 64);
        prop_assert_eq!(result, a.wrapping_add(b));
    }
}

// ──────────────────────────────────────────────────────────
// 3. Control table
// ──────────────────────────────────────────────────────────

#[rstest]
#[case::add(0b000, 0b000_0000, AluInst::Add)]
#[case::sub(0b000, 0b010_0000, AluInst::Sub)]
#[case::sll(0b001, 0b000_0000, AluInst::Sll)]
#[case::xor(0b100, 0b000_0000, AluInst::Xor)]
#[case::srl(0b101, 0b000_0000, AluInst::Srl)]
#[case::or(0b110, 0b000_0000, AluInst::Or)]
#[case::and(0b111, 0b000_0000, AluInst::And)]
fn reg_class_decodes_functs(#[case] funct3: u32, #[case] funct7: u32, #[case] expect: AluInst) {
    assert_eq!(
        alu::control(AluOpClass::Reg, funct3, funct7, false),
        expect
    );
}

#[test]
fn branch_class_always_subtracts() {
    for funct3 in 0..8 {
        assert_eq!(
            alu::control(AluOpClass::Branch, funct3, 0x7f, false),
            AluInst::Sub
        );
    }
}

#[test]
fn imm_logicals_ignore_funct7() {
    // For andi/ori/xori the funct7 bits belong to the immediate.
    assert_eq!(alu::control(AluOpClass::Imm, 0b111, 0b111_1111, false), AluInst::And);
    assert_eq!(alu::control(AluOpClass::Imm, 0b110, 0b010_1010, false), AluInst::Or);
    assert_eq!(alu::control(AluOpClass::Imm, 0b100, 0b100_0001, false), AluInst::Xor);
}

#[test]
fn memory_and_jalr_force_add() {
    // A load's funct3 is the access size, not an operation; the port address
    // is always rs1 + imm.
    assert_eq!(alu::control(AluOpClass::Imm, 0b110, 0, true), AluInst::Add);
    assert_eq!(alu::control(AluOpClass::Imm, 0b011, 0, true), AluInst::Add);
}

#[test]
fn unknown_pattern_falls_to_default() {
    // srai has no SRA lane; it falls through to the all-zero default.
    assert_eq!(
        alu::control(AluOpClass::Imm, 0b101, 0b010_0000, false),
        AluInst::And
    );
}
