//! Field extraction tests.

use crate::common as asm;
use rvpipe_core::isa;

#[test]
fn fields_come_from_fixed_positions() {
    let inst = asm::r_type(0b011_0011, 7, 0b101, 13, 21, 0b010_0000);
    assert_eq!(isa::opcode(inst), 0b011_0011);
    assert_eq!(isa::rd(inst), 7);
    assert_eq!(isa::funct3(inst), 0b101);
    assert_eq!(isa::rs1(inst), 13);
    assert_eq!(isa::rs2(inst), 21);
    assert_eq!(isa::funct7(inst), 0b010_0000);
}

#[test]
fn link_registers_are_x1_and_x5() {
    assert!(isa::is_link_reg(1));
    assert!(isa::is_link_reg(5));
    assert!(!isa::is_link_reg(0));
    assert!(!isa::is_link_reg(2));
    assert!(!isa::is_link_reg(31));
}

#[test]
fn nop_is_addi_x0() {
    assert_eq!(isa::NOP, asm::addi(0, 0, 0));
}
