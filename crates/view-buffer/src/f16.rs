//! Half-precision (16-bit) floating point utilities.
//!
//! The host has no native binary16 type, so values are carried as raw `u16`
//! bit patterns and widened to `f64` for arithmetic.

/// Smallest positive normal value, `2^-14`.
const MIN_NORMAL: f64 = 6.103515625e-5;

/// Decodes a half-precision (16-bit) floating point value.
///
/// The input is the raw binary representation (u16) of an IEEE 754 half-precision float.
/// Decoding is exact: every binary16 value is representable in `f64`.
///
/// # Example
///
/// ```
/// use view_buffer::decode_f16;
///
/// // Positive zero
/// assert_eq!(decode_f16(0x0000), 0.0);
///
/// // One
/// assert_eq!(decode_f16(0x3C00), 1.0);
///
/// // Positive infinity
/// assert!(decode_f16(0x7C00).is_infinite() && decode_f16(0x7C00).is_sign_positive());
///
/// // NaN
/// assert!(decode_f16(0x7C01).is_nan());
/// ```
pub fn decode_f16(binary: u16) -> f64 {
    let exponent = ((binary & 0x7C00) >> 10) as i32;
    let fraction = (binary & 0x03FF) as f64;
    let sign = if (binary >> 15) & 1 == 1 { -1.0 } else { 1.0 };

    if exponent == 0 {
        // Subnormal or zero
        sign * MIN_NORMAL * (fraction / 1024.0)
    } else if exponent == 0x1F {
        // Infinity or NaN
        if fraction != 0.0 {
            f64::NAN
        } else {
            sign * f64::INFINITY
        }
    } else {
        // Normalized
        sign * 2f64.powi(exponent - 15) * (1.0 + fraction / 1024.0)
    }
}

/// Encodes a value as the nearest half-precision bit pattern.
///
/// Rounds to nearest, ties to even, directly from the `f64` input so there is
/// no double rounding. Values at or beyond `65520` become infinity, values
/// below half the smallest subnormal become signed zero, and NaN becomes a
/// quiet NaN.
///
/// # Example
///
/// ```
/// use view_buffer::encode_f16;
///
/// assert_eq!(encode_f16(1.0), 0x3C00);
/// assert_eq!(encode_f16(-2.0), 0xC000);
/// assert_eq!(encode_f16(0.1), 0x2E66);
/// assert_eq!(encode_f16(65504.0), 0x7BFF);
/// assert_eq!(encode_f16(65520.0), 0x7C00);
/// ```
pub fn encode_f16(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;
    let exponent = ((bits >> 52) & 0x7FF) as i32;
    let mantissa = bits & 0x000F_FFFF_FFFF_FFFF;

    if exponent == 0x7FF {
        return if mantissa != 0 {
            sign | 0x7E00
        } else {
            sign | 0x7C00
        };
    }
    // f64 subnormals are far below the binary16 range.
    if exponent == 0 {
        return sign;
    }

    let unbiased = exponent - 1023;
    if unbiased > 15 {
        return sign | 0x7C00;
    }

    if unbiased >= -14 {
        // Normal: keep the top 10 of 52 mantissa bits. A rounding carry
        // spills into the exponent, which also yields infinity at the top.
        let half = (((unbiased + 15) as u64) << 10) | (mantissa >> 42);
        let rest = mantissa & ((1 << 42) - 1);
        return sign | round_half_even(half, rest, 1 << 41) as u16;
    }

    // Subnormal: count units of 2^-24.
    let full = mantissa | (1 << 52);
    let shift = (28 - unbiased) as u32;
    if shift > 53 {
        return sign;
    }
    let half = full >> shift;
    let rest = full & ((1 << shift) - 1);
    sign | round_half_even(half, rest, 1 << (shift - 1)) as u16
}

fn round_half_even(truncated: u64, rest: u64, halfway: u64) -> u64 {
    if rest > halfway || (rest == halfway && truncated & 1 == 1) {
        truncated + 1
    } else {
        truncated
    }
}

/// Rounds a value to the nearest binary16-representable value.
///
/// ```
/// use view_buffer::f16_round;
///
/// assert_eq!(f16_round(1.0), 1.0);
/// assert_eq!(f16_round(0.1), 0.0999755859375);
/// ```
pub fn f16_round(value: f64) -> f64 {
    decode_f16(encode_f16(value))
}

/// A binary16 value stored as its raw bit pattern.
///
/// Equality compares bit patterns, so `-0.0 != 0.0` and identical NaNs are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F16(u16);

impl F16 {
    /// Wraps a raw binary16 bit pattern.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw binary16 bit pattern.
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Rounds `value` to the nearest binary16 value.
    pub fn from_f64(value: f64) -> Self {
        Self(encode_f16(value))
    }

    /// Rounds `value` to the nearest binary16 value.
    pub fn from_f32(value: f32) -> Self {
        Self(encode_f16(value as f64))
    }

    /// Widens to `f64`; exact.
    pub fn to_f64(self) -> f64 {
        decode_f16(self.0)
    }

    /// Widens to `f32`; exact.
    pub fn to_f32(self) -> f32 {
        decode_f16(self.0) as f32
    }
}

impl From<F16> for f64 {
    fn from(value: F16) -> Self {
        value.to_f64()
    }
}

impl From<F16> for f32 {
    fn from(value: F16) -> Self {
        value.to_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_f16_specials() {
        assert_eq!(encode_f16(0.0), 0x0000);
        assert_eq!(encode_f16(-0.0), 0x8000);
        assert_eq!(encode_f16(f64::INFINITY), 0x7C00);
        assert_eq!(encode_f16(f64::NEG_INFINITY), 0xFC00);
        assert!(decode_f16(encode_f16(f64::NAN)).is_nan());
        assert_eq!(encode_f16(1e10), 0x7C00);
        assert_eq!(encode_f16(-1e10), 0xFC00);
    }

    #[test]
    fn test_encode_f16_subnormals() {
        assert_eq!(encode_f16(2f64.powi(-24)), 0x0001);
        // Exactly half the smallest subnormal ties to even (zero).
        assert_eq!(encode_f16(2f64.powi(-25)), 0x0000);
        assert_eq!(encode_f16(1.5 * 2f64.powi(-25)), 0x0001);
        assert_eq!(encode_f16(decode_f16(0x03FF)), 0x03FF);
        assert_eq!(encode_f16(MIN_NORMAL), 0x0400);
        assert_eq!(encode_f16(1e-300), 0x0000);
    }

    #[test]
    fn test_encode_f16_ties_to_even() {
        // 1 + 2^-11 lies halfway between 0x3C00 and 0x3C01.
        assert_eq!(encode_f16(1.0 + 2f64.powi(-11)), 0x3C00);
        // 1 + 3 * 2^-11 lies halfway between 0x3C01 and 0x3C02.
        assert_eq!(encode_f16(1.0 + 3.0 * 2f64.powi(-11)), 0x3C02);
        assert_eq!(encode_f16(1.0 + 2f64.powi(-11) + 2f64.powi(-30)), 0x3C01);
    }

    #[test]
    fn test_every_pattern_survives_decode_encode() {
        let mut nans = 0;
        for bits in 0..=u16::MAX {
            let value = decode_f16(bits);
            let exponent_all_ones = bits & 0x7C00 == 0x7C00;
            if exponent_all_ones && bits & 0x03FF != 0 {
                assert!(value.is_nan(), "pattern {bits:#06x}");
                nans += 1;
                continue;
            }
            assert_eq!(value.is_infinite(), exponent_all_ones, "pattern {bits:#06x}");
            assert_eq!(value.is_sign_negative(), bits & 0x8000 != 0, "pattern {bits:#06x}");
            assert_eq!(encode_f16(value), bits, "pattern {bits:#06x}");
        }
        // Two signs times 1023 non-zero fractions.
        assert_eq!(nans, 2 * 1023);
        assert_eq!(decode_f16(0x3C00), 1.0);
        assert_eq!(decode_f16(0xBC00), -1.0);
    }

    #[test]
    fn test_f16_newtype() {
        let half = F16::from_f32(0.5);
        assert_eq!(half.to_bits(), 0x3800);
        assert_eq!(f64::from(half), 0.5);
        assert_eq!(f32::from(F16::from_bits(0xC000)), -2.0);
    }
}
