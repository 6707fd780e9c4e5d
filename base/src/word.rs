//! Arithmetic of the 16-bit P3 machine word.
//!
//! Source text gives constants as unbounded integers, but the machine
//! stores 16-bit two's-complement words.  Any value whose bit 15 is
//! set is therefore read back as negative.  Renderings in hexadecimal
//! and binary use the unsigned view of the same bits.

#[cfg(test)]
mod tests;

/// Bit 15, the sign bit of a 16-bit word.
pub const SIGN_BIT: i64 = 0x8000;

/// The number of distinct 16-bit words.
pub const WORD_MODULUS: i64 = 0x1_0000;

/// Reinterprets a nonnegative value whose sign bit is set as a signed
/// 16-bit quantity (by subtracting 65536).  Negative values, and
/// values with bit 15 clear, are returned unchanged.
#[must_use]
pub fn reinterpret_signed(value: i64) -> i64 {
    if value >= 0 && value & SIGN_BIT != 0 {
        value - WORD_MODULUS
    } else {
        value
    }
}

/// Returns the unsigned 16-bit view of a value (the bits the machine
/// would store for a negative value).  Nonnegative values are
/// returned unchanged.
#[must_use]
pub fn unsigned_view(value: i64) -> u64 {
    if value < 0 {
        value.rem_euclid(WORD_MODULUS).unsigned_abs()
    } else {
        value.unsigned_abs()
    }
}
