//! Immediate generation tests.
//!
//! Each format's bit shuffle is checked against hand-assembled encodings,
//! and sign extension is exercised across the full encodable ranges.

use proptest::prelude::*;

use crate::common as asm;
use rvpipe_core::isa::instruction::{immediate, InstFormat};

#[test]
fn i_type_sign_extends() {
    assert_eq!(immediate(asm::addi(1, 0, 2047), InstFormat::I), 2047);
    assert_eq!(immediate(asm::addi(1, 0, -2048), InstFormat::I), -2048i64 as u64);
    assert_eq!(immediate(asm::addi(1, 0, -1), InstFormat::I), u64::MAX);
}

#[test]
fn s_type_reassembles_split_field() {
    assert_eq!(immediate(asm::sw(2, 3, 0x7ff), InstFormat::S), 0x7ff);
    assert_eq!(immediate(asm::sw(2, 3, -4), InstFormat::S), -4i64 as u64);
}

#[test]
fn b_type_is_even_and_signed() {
    assert_eq!(immediate(asm::beq(1, 2, 8), InstFormat::B), 8);
    assert_eq!(immediate(asm::beq(1, 2, -8), InstFormat::B), -8i64 as u64);
    assert_eq!(immediate(asm::beq(1, 2, 4094), InstFormat::B), 4094);
}

#[test]
fn u_type_fills_the_upper_bits() {
    assert_eq!(immediate(asm::lui(1, 1), InstFormat::U), 0x1000);
    assert_eq!(
        immediate(asm::lui(1, 0x80000), InstFormat::U),
        0xffff_ffff_8000_0000,
        "bit 31 sign-extends on a 64-bit datapath"
    );
}

#[test]
fn j_type_bit_shuffle() {
    assert_eq!(immediate(asm::jal(1, 8), InstFormat::J), 8);
    assert_eq!(immediate(asm::jal(1, 0x800), InstFormat::J), 0x800);
    assert_eq!(immediate(asm::jal(1, -16), InstFormat::J), -16i64 as u64);
}

#[test]
fn r_type_has_no_immediate() {
    assert_eq!(immediate(asm::add(1, 2, 3), InstFormat::R), 0);
}

proptest! {
    #[test]
    fn i_type_round_trips(imm in -2048i32..=2047) {
        let inst = asm::addi(1, 2, imm);
        prop_assert_eq!(immediate(inst, InstFormat::I), imm as i64 as u64);
    }

    #[test]
    fn s_type_round_trips(imm in -2048i32..=2047) {
        let inst = asm::sw(1, 2, imm);
        prop_assert_eq!(immediate(inst, InstFormat::S), imm as i64 as u64);
    }

    #[test]
    fn b_type_round_trips(halfwords in -2048i32..=2047) {
        let imm = halfwords * 2;
        let inst = asm::beq(1, 2, imm);
        prop_assert_eq!(immediate(inst, InstFormat::B), imm as i64 as u64);
    }

    #[test]
    fn j_type_round_trips(halfwords in -524_288i32..=524_287) {
        let imm = halfwords * 2;
        let inst = asm::jal(1, imm);
        prop_assert_eq!(immediate(inst, InstFormat::J), imm as i64 as u64);
    }
}
