//! Fixed-width value kinds readable from and writable to a [`ViewBuffer`](crate::ViewBuffer).

use crate::{Endian, F16};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric kind with a byte-order aware binary form.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`,
/// [`F16`], `f32` and `f64`. The set is closed.
pub trait Scalar: sealed::Sealed + Copy {
    /// Encoded width in bytes, at most 8.
    const SIZE: usize;

    /// Decodes a value from exactly `SIZE` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != SIZE`.
    fn from_bytes(bytes: &[u8], endian: Endian) -> Self;

    /// Encodes the value into exactly `SIZE` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != SIZE`.
    fn to_bytes(self, endian: Endian, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty => $size:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const SIZE: usize = $size;

                #[inline]
                fn from_bytes(bytes: &[u8], endian: Endian) -> Self {
                    let mut raw = [0u8; $size];
                    raw.copy_from_slice(bytes);
                    match endian {
                        Endian::Little => <$ty>::from_le_bytes(raw),
                        Endian::Big => <$ty>::from_be_bytes(raw),
                    }
                }

                #[inline]
                fn to_bytes(self, endian: Endian, out: &mut [u8]) {
                    let raw = match endian {
                        Endian::Little => self.to_le_bytes(),
                        Endian::Big => self.to_be_bytes(),
                    };
                    out.copy_from_slice(&raw);
                }
            }
        )*
    };
}

impl_scalar! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

impl sealed::Sealed for F16 {}

impl Scalar for F16 {
    const SIZE: usize = 2;

    #[inline]
    fn from_bytes(bytes: &[u8], endian: Endian) -> Self {
        F16::from_bits(u16::from_bytes(bytes, endian))
    }

    #[inline]
    fn to_bytes(self, endian: Endian, out: &mut [u8]) {
        self.to_bits().to_bytes(endian, out);
    }
}
