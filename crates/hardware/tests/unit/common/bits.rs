//! Bit helper tests.

use rvpipe_core::common::bits::{mask, sign_extend, slice};

#[test]
fn mask_widths() {
    assert_eq!(mask(0), 0);
    assert_eq!(mask(1), 1);
    assert_eq!(mask(12), 0xfff);
    assert_eq!(mask(32), 0xffff_ffff);
    assert_eq!(mask(64), u64::MAX);
}

#[test]
fn sign_extend_from_bit_boundaries() {
    assert_eq!(sign_extend(0x800, 12), 0xffff_ffff_ffff_f800);
    assert_eq!(sign_extend(0x7ff, 12), 0x7ff);
    assert_eq!(sign_extend(0xffff_ffff, 32), u64::MAX);
    assert_eq!(sign_extend(0x7fff_ffff, 32), 0x7fff_ffff);
    assert_eq!(sign_extend(1, 1), u64::MAX, "one-bit value sign-extends");
}

#[test]
fn slice_matches_hardware_notation() {
    assert_eq!(slice(0xdead_beef, 15, 0), 0xbeef);
    assert_eq!(slice(0xdead_beef, 31, 16), 0xdead);
    assert_eq!(slice(0x80, 7, 7), 1);
    assert_eq!(slice(0x80, 6, 0), 0);
}
