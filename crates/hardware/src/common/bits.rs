//! Bit-precise integer helpers.
//!
//! Every signal in the model is carried in the smallest `u64` that holds it,
//! with explicit masks at every slice. These helpers keep the masking and
//! sign handling in one place:
//! 1. **Masks:** `mask(width)` for any width up to 64 bits.
//! 2. **Extension:** explicit sign extension from an arbitrary bit position.
//! 3. **Slicing:** inclusive bit-range extraction, matching hardware notation.

/// Returns a mask with the low `width` bits set.
///
/// # Panics
///
/// Panics if `width > 64`; widths are validated at configuration time, so a
/// violation here is a programming error.
#[inline]
pub fn mask(width: u32) -> u64 {
    assert!(width <= 64, "mask width {width} out of range");
    if width == 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Sign-extends the low `width` bits of `value` to 64 bits.
#[inline]
pub fn sign_extend(value: u64, width: u32) -> u64 {
    debug_assert!(width >= 1 && width <= 64);
    let shift = 64 - width;
    (((value << shift) as i64) >> shift) as u64
}

/// Extracts the inclusive bit range `[hi:lo]` of `value`.
///
/// Mirrors the `signal(hi, lo)` notation used in hardware descriptions.
#[inline]
pub fn slice(value: u64, hi: u32, lo: u32) -> u64 {
    debug_assert!(hi >= lo && hi < 64);
    (value >> lo) & mask(hi - lo + 1)
}
