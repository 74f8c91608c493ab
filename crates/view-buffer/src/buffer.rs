//! Fixed-size binary cursor buffer.

use std::cell::Cell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use crate::{print_octets, Endian, Scalar, ViewBufferError, F16};

/// Generates the named accessors for single-byte kinds, which have no byte order.
macro_rules! byte_accessors {
    ($($ty:ident: $read:ident, $read_array:ident, $write:ident, $write_array:ident;)*) => {
        $(
            #[doc = concat!("Reads one `", stringify!($ty), "`.")]
            pub fn $read(&mut self) -> Result<$ty, ViewBufferError> {
                self.read::<$ty>()
            }

            #[doc = concat!("Copies `count` bytes out as `", stringify!($ty), "` values.")]
            pub fn $read_array(&mut self, count: usize) -> Result<Vec<$ty>, ViewBufferError> {
                self.read_array::<$ty>(count)
            }

            #[doc = concat!("Writes one `", stringify!($ty), "`.")]
            pub fn $write(&mut self, value: $ty) -> Result<(), ViewBufferError> {
                self.write(value)
            }

            #[doc = concat!("Writes every `", stringify!($ty), "` in `values`.")]
            pub fn $write_array(&mut self, values: &[$ty]) -> Result<(), ViewBufferError> {
                self.write_array(values)
            }
        )*
    };
}

/// Generates the named accessors for multi-byte kinds: default byte order
/// plus a `_with` variant taking an explicit [`Endian`].
macro_rules! endian_accessors {
    ($($ty:ident:
        $read:ident, $read_with:ident, $read_array:ident, $read_array_with:ident,
        $write:ident, $write_with:ident, $write_array:ident, $write_array_with:ident;)*) => {
        $(
            #[doc = concat!("Reads one `", stringify!($ty), "` using the default byte order.")]
            pub fn $read(&mut self) -> Result<$ty, ViewBufferError> {
                self.read::<$ty>()
            }

            #[doc = concat!("Reads one `", stringify!($ty), "` using `endian`.")]
            pub fn $read_with(&mut self, endian: Endian) -> Result<$ty, ViewBufferError> {
                self.read_with::<$ty>(endian)
            }

            #[doc = concat!("Reads `count` `", stringify!($ty), "` values using the default byte order.")]
            pub fn $read_array(&mut self, count: usize) -> Result<Vec<$ty>, ViewBufferError> {
                self.read_array::<$ty>(count)
            }

            #[doc = concat!("Reads `count` `", stringify!($ty), "` values using `endian`.")]
            pub fn $read_array_with(
                &mut self,
                count: usize,
                endian: Endian,
            ) -> Result<Vec<$ty>, ViewBufferError> {
                self.read_array_with::<$ty>(count, endian)
            }

            #[doc = concat!("Writes one `", stringify!($ty), "` using the default byte order.")]
            pub fn $write(&mut self, value: $ty) -> Result<(), ViewBufferError> {
                self.write(value)
            }

            #[doc = concat!("Writes one `", stringify!($ty), "` using `endian`.")]
            pub fn $write_with(&mut self, value: $ty, endian: Endian) -> Result<(), ViewBufferError> {
                self.write_with(value, endian)
            }

            #[doc = concat!("Writes every `", stringify!($ty), "` in `values` using the default byte order.")]
            pub fn $write_array(&mut self, values: &[$ty]) -> Result<(), ViewBufferError> {
                self.write_array(values)
            }

            #[doc = concat!("Writes every `", stringify!($ty), "` in `values` using `endian`.")]
            pub fn $write_array_with(
                &mut self,
                values: &[$ty],
                endian: Endian,
            ) -> Result<(), ViewBufferError> {
                self.write_array_with(values, endian)
            }
        )*
    };
}

#[derive(Clone)]
enum Storage<'a> {
    Owned(Rc<[Cell<u8>]>),
    Borrowed(&'a [Cell<u8>]),
}

impl Storage<'_> {
    fn cells(&self) -> &[Cell<u8>] {
        match self {
            Storage::Owned(cells) => &cells[..],
            Storage::Borrowed(cells) => *cells,
        }
    }
}

/// A cursor over a fixed-size byte region with typed, endian-aware access.
///
/// Every read and write starts at the current position and advances it by
/// the number of bytes consumed. An access that would run past the end of the
/// buffer fails without moving the position or touching any byte.
///
/// Views created with [`ViewBuffer::view`] share the same memory as their
/// parent but carry their own position and default byte order.
///
/// # Example
///
/// ```
/// use view_buffer::{Endian, ViewBuffer};
///
/// let mut buf = ViewBuffer::new(16).with_endian(Endian::Little);
/// buf.write_u8(0x01).unwrap();
/// buf.write_u32(0x0203_0405).unwrap();
/// buf.write_str("hi").unwrap();
/// assert_eq!(buf.position(), 8);
///
/// buf.seek(0).unwrap();
/// assert_eq!(buf.read_u8().unwrap(), 0x01);
/// assert_eq!(buf.read_u32().unwrap(), 0x0203_0405);
/// assert_eq!(buf.read_str().unwrap(), "hi");
/// ```
pub struct ViewBuffer<'a> {
    storage: Storage<'a>,
    /// Offset of this view within `storage`.
    start: usize,
    length: usize,
    position: usize,
    endian: Endian,
}

impl ViewBuffer<'static> {
    /// Creates a zero-filled buffer of `length` bytes.
    pub fn new(length: usize) -> Self {
        let cells: Rc<[Cell<u8>]> = (0..length).map(|_| Cell::new(0)).collect();
        Self::from_storage(Storage::Owned(cells), 0, length)
    }

    /// Creates a buffer that takes ownership of `bytes`.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let length = bytes.len();
        let cells: Rc<[Cell<u8>]> = bytes.into_iter().map(Cell::new).collect();
        Self::from_storage(Storage::Owned(cells), 0, length)
    }
}

impl<'a> ViewBuffer<'a> {
    fn from_storage(storage: Storage<'a>, start: usize, length: usize) -> Self {
        Self {
            storage,
            start,
            length,
            position: 0,
            endian: Endian::default(),
        }
    }

    /// Wraps an existing byte region without copying it.
    pub fn wrap(bytes: &'a mut [u8]) -> Self {
        Self::wrap_cells(Cell::from_mut(bytes).as_slice_of_cells())
    }

    /// Wraps `[offset, offset + length)` of an existing byte region.
    ///
    /// `length` defaults to the rest of the region.
    pub fn wrap_range(
        bytes: &'a mut [u8],
        offset: usize,
        length: Option<usize>,
    ) -> Result<Self, ViewBufferError> {
        Self::wrap(bytes).view(offset, length)
    }

    /// Wraps a region that other cursors may also wrap.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use view_buffer::ViewBuffer;
    ///
    /// let mut bytes = [0u8; 4];
    /// let cells = Cell::from_mut(&mut bytes[..]).as_slice_of_cells();
    /// let mut a = ViewBuffer::wrap_cells(cells);
    /// let mut b = ViewBuffer::wrap_cells(cells);
    /// a.write_u16(0xBEEF).unwrap();
    /// assert_eq!(b.read_u16().unwrap(), 0xBEEF);
    /// ```
    pub fn wrap_cells(cells: &'a [Cell<u8>]) -> Self {
        Self::from_storage(Storage::Borrowed(cells), 0, cells.len())
    }

    /// Sets the default byte order, builder style.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Creates a new cursor over `[start, start + length)` of this buffer.
    ///
    /// The view shares memory with this buffer, starts at position 0, and
    /// inherits the current default byte order. `length` defaults to the rest
    /// of this buffer.
    pub fn view(
        &self,
        start: usize,
        length: Option<usize>,
    ) -> Result<ViewBuffer<'a>, ViewBufferError> {
        let length = length.unwrap_or_else(|| self.length.saturating_sub(start));
        match start.checked_add(length) {
            Some(end) if end <= self.length => Ok(ViewBuffer {
                storage: self.storage.clone(),
                start: self.start + start,
                length,
                position: 0,
                endian: self.endian,
            }),
            _ => Err(self.out_of_bounds(start, length)),
        }
    }

    /// Sets the default byte order for accesses without an explicit override.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Current default byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Length of this view in bytes.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the view has no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes between the cursor and the end.
    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.position)
    }

    /// Returns the byte at `index`, ignoring the cursor.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells().get(index).map(Cell::get)
    }

    /// Overwrites the byte at `index`, ignoring the cursor.
    ///
    /// Returns `None` when `index` is outside the view.
    pub fn set(&self, index: usize, value: u8) -> Option<()> {
        self.cells().get(index).map(|cell| cell.set(value))
    }

    /// Copies the whole view out into a fresh vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells().iter().map(Cell::get).collect()
    }

    /// Moves the cursor to `position`, which must lie in `[0, length)`.
    pub fn seek(&mut self, position: usize) -> Result<(), ViewBufferError> {
        if position >= self.length {
            tracing::trace!(position, length = self.length, "rejected seek");
            return Err(ViewBufferError::SeekOutOfRange {
                position,
                length: self.length,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Advances the cursor by `length` bytes without reading or writing.
    ///
    /// No bounds check happens here; the next access reports an overrun.
    pub fn pad(&mut self, length: usize) {
        self.position = self.position.saturating_add(length);
    }

    /// Pads the cursor up to the next multiple of `multiple`, then adds `offset`.
    ///
    /// ```
    /// use view_buffer::ViewBuffer;
    ///
    /// let mut buf = ViewBuffer::new(32);
    /// buf.pad(5);
    /// buf.align(4, 0).unwrap();
    /// assert_eq!(buf.position(), 8);
    /// buf.align(4, 0).unwrap();
    /// assert_eq!(buf.position(), 8);
    /// buf.align(8, 2).unwrap();
    /// assert_eq!(buf.position(), 10);
    /// ```
    pub fn align(&mut self, multiple: usize, offset: usize) -> Result<(), ViewBufferError> {
        if multiple == 0 {
            return Err(ViewBufferError::InvalidAlignment);
        }
        let padding = (multiple - self.position % multiple) % multiple;
        self.position = self
            .position
            .saturating_add(offset)
            .saturating_add(padding);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generic accessors
    // -----------------------------------------------------------------------

    /// Reads one value using the default byte order.
    pub fn read<T: Scalar>(&mut self) -> Result<T, ViewBufferError> {
        self.read_with(self.endian)
    }

    /// Reads one value using `endian`.
    pub fn read_with<T: Scalar>(&mut self, endian: Endian) -> Result<T, ViewBufferError> {
        let range = self.span(T::SIZE)?;
        let value = self.load(range.start, endian);
        self.position = range.end;
        Ok(value)
    }

    /// Reads `count` consecutive values using the default byte order.
    pub fn read_array<T: Scalar>(&mut self, count: usize) -> Result<Vec<T>, ViewBufferError> {
        self.read_array_with(count, self.endian)
    }

    /// Reads `count` consecutive values using `endian`.
    pub fn read_array_with<T: Scalar>(
        &mut self,
        count: usize,
        endian: Endian,
    ) -> Result<Vec<T>, ViewBufferError> {
        let range = self.span_of::<T>(count)?;
        let values = range
            .clone()
            .step_by(T::SIZE)
            .map(|at| self.load(at, endian))
            .collect();
        self.position = range.end;
        Ok(values)
    }

    /// Writes one value using the default byte order.
    pub fn write<T: Scalar>(&mut self, value: T) -> Result<(), ViewBufferError> {
        self.write_with(value, self.endian)
    }

    /// Writes one value using `endian`.
    pub fn write_with<T: Scalar>(&mut self, value: T, endian: Endian) -> Result<(), ViewBufferError> {
        let range = self.span(T::SIZE)?;
        self.store(range.start, value, endian);
        self.position = range.end;
        Ok(())
    }

    /// Writes every value in `values` using the default byte order.
    pub fn write_array<T: Scalar>(&mut self, values: &[T]) -> Result<(), ViewBufferError> {
        self.write_array_with(values, self.endian)
    }

    /// Writes every value in `values` using `endian`.
    pub fn write_array_with<T: Scalar>(
        &mut self,
        values: &[T],
        endian: Endian,
    ) -> Result<(), ViewBufferError> {
        let range = self.span_of::<T>(values.len())?;
        for (at, &value) in range.clone().step_by(T::SIZE).zip(values) {
            self.store(at, value, endian);
        }
        self.position = range.end;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Named accessors
    // -----------------------------------------------------------------------

    byte_accessors! {
        u8: read_u8, read_u8_array, write_u8, write_u8_array;
        i8: read_i8, read_i8_array, write_i8, write_i8_array;
    }

    endian_accessors! {
        u16: read_u16, read_u16_with, read_u16_array, read_u16_array_with,
            write_u16, write_u16_with, write_u16_array, write_u16_array_with;
        i16: read_i16, read_i16_with, read_i16_array, read_i16_array_with,
            write_i16, write_i16_with, write_i16_array, write_i16_array_with;
        u32: read_u32, read_u32_with, read_u32_array, read_u32_array_with,
            write_u32, write_u32_with, write_u32_array, write_u32_array_with;
        i32: read_i32, read_i32_with, read_i32_array, read_i32_array_with,
            write_i32, write_i32_with, write_i32_array, write_i32_array_with;
        u64: read_u64, read_u64_with, read_u64_array, read_u64_array_with,
            write_u64, write_u64_with, write_u64_array, write_u64_array_with;
        i64: read_i64, read_i64_with, read_i64_array, read_i64_array_with,
            write_i64, write_i64_with, write_i64_array, write_i64_array_with;
        f32: read_f32, read_f32_with, read_f32_array, read_f32_array_with,
            write_f32, write_f32_with, write_f32_array, write_f32_array_with;
        f64: read_f64, read_f64_with, read_f64_array, read_f64_array_with,
            write_f64, write_f64_with, write_f64_array, write_f64_array_with;
    }

    /// Reads a half-precision float, widened to `f64`.
    pub fn read_f16(&mut self) -> Result<f64, ViewBufferError> {
        self.read_f16_with(self.endian)
    }

    /// Reads a half-precision float using `endian`, widened to `f64`.
    pub fn read_f16_with(&mut self, endian: Endian) -> Result<f64, ViewBufferError> {
        self.read_with::<F16>(endian).map(F16::to_f64)
    }

    /// Reads `count` half-precision floats using the default byte order.
    pub fn read_f16_array(&mut self, count: usize) -> Result<Vec<f64>, ViewBufferError> {
        self.read_f16_array_with(count, self.endian)
    }

    /// Reads `count` half-precision floats using `endian`.
    pub fn read_f16_array_with(
        &mut self,
        count: usize,
        endian: Endian,
    ) -> Result<Vec<f64>, ViewBufferError> {
        let halves = self.read_array_with::<F16>(count, endian)?;
        Ok(halves.into_iter().map(F16::to_f64).collect())
    }

    /// Writes `value` rounded to the nearest half-precision float.
    pub fn write_f16(&mut self, value: f64) -> Result<(), ViewBufferError> {
        self.write_f16_with(value, self.endian)
    }

    /// Writes `value` rounded to half precision using `endian`.
    pub fn write_f16_with(&mut self, value: f64, endian: Endian) -> Result<(), ViewBufferError> {
        self.write_with(F16::from_f64(value), endian)
    }

    /// Writes every value rounded to half precision, default byte order.
    pub fn write_f16_array(&mut self, values: &[f64]) -> Result<(), ViewBufferError> {
        self.write_f16_array_with(values, self.endian)
    }

    /// Writes every value rounded to half precision using `endian`.
    pub fn write_f16_array_with(
        &mut self,
        values: &[f64],
        endian: Endian,
    ) -> Result<(), ViewBufferError> {
        let halves: Vec<F16> = values.iter().map(|&value| F16::from_f64(value)).collect();
        self.write_array_with(&halves, endian)
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Reads a null-terminated UTF-8 string.
    ///
    /// The cursor ends up past the terminator. Without a terminator the text
    /// runs to the end of the buffer and the cursor stops at the end.
    /// Malformed UTF-8 is replaced with `U+FFFD`.
    pub fn read_str(&mut self) -> Result<String, ViewBufferError> {
        let start = self.position;
        if start > self.length {
            return Err(self.out_of_bounds(start, 1));
        }
        let terminator = self.cells()[start..]
            .iter()
            .position(|cell| cell.get() == 0)
            .map(|offset| start + offset);
        let end = terminator.unwrap_or(self.length);
        let text = self.decode(start..end);
        self.position = terminator.map_or(self.length, |at| at + 1);
        Ok(text)
    }

    /// Reads exactly `length` bytes as UTF-8; embedded zeros are kept.
    pub fn read_str_exact(&mut self, length: usize) -> Result<String, ViewBufferError> {
        let range = self.span(length)?;
        let text = self.decode(range.clone());
        self.position = range.end;
        Ok(text)
    }

    /// Writes `text` as UTF-8 followed by a zero byte.
    pub fn write_str(&mut self, text: &str) -> Result<(), ViewBufferError> {
        let bytes = text.as_bytes();
        let range = self.span(bytes.len().saturating_add(1))?;
        self.store_bytes(range.start, bytes);
        self.cells()[range.end - 1].set(0);
        self.position = range.end;
        Ok(())
    }

    /// Writes `text` as UTF-8 into a slot of exactly `length` bytes.
    ///
    /// No terminator is written. Nothing is written when the encoded length
    /// differs from `length`.
    pub fn write_str_fixed(&mut self, text: &str, length: usize) -> Result<(), ViewBufferError> {
        let bytes = text.as_bytes();
        if bytes.len() != length {
            tracing::trace!(actual = bytes.len(), expected = length, "rejected fixed-length string");
            return Err(ViewBufferError::LengthMismatch {
                actual: bytes.len(),
                expected: length,
            });
        }
        let range = self.span(length)?;
        self.store_bytes(range.start, bytes);
        self.position = range.end;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn cells(&self) -> &[Cell<u8>] {
        &self.storage.cells()[self.start..self.start + self.length]
    }

    fn out_of_bounds(&self, position: usize, size: usize) -> ViewBufferError {
        tracing::trace!(position, size, length = self.length, "rejected out-of-bounds access");
        ViewBufferError::OutOfBounds {
            position,
            size,
            length: self.length,
        }
    }

    /// Validates `[position, position + size)` against the buffer length.
    fn span(&self, size: usize) -> Result<Range<usize>, ViewBufferError> {
        match self.position.checked_add(size) {
            Some(end) if end <= self.length => Ok(self.position..end),
            _ => Err(self.out_of_bounds(self.position, size)),
        }
    }

    fn span_of<T: Scalar>(&self, count: usize) -> Result<Range<usize>, ViewBufferError> {
        let size = count
            .checked_mul(T::SIZE)
            .ok_or_else(|| self.out_of_bounds(self.position, usize::MAX))?;
        self.span(size)
    }

    fn load<T: Scalar>(&self, at: usize, endian: Endian) -> T {
        let mut scratch = [0u8; 8];
        let bytes = &mut scratch[..T::SIZE];
        for (byte, cell) in bytes.iter_mut().zip(&self.cells()[at..at + T::SIZE]) {
            *byte = cell.get();
        }
        T::from_bytes(bytes, endian)
    }

    fn store<T: Scalar>(&self, at: usize, value: T, endian: Endian) {
        let mut scratch = [0u8; 8];
        let bytes = &mut scratch[..T::SIZE];
        value.to_bytes(endian, bytes);
        self.store_bytes(at, bytes);
    }

    fn store_bytes(&self, at: usize, bytes: &[u8]) {
        for (cell, &byte) in self.cells()[at..at + bytes.len()].iter().zip(bytes) {
            cell.set(byte);
        }
    }

    fn decode(&self, range: Range<usize>) -> String {
        let bytes: Vec<u8> = self.cells()[range].iter().map(Cell::get).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl fmt::Debug for ViewBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octets = print_octets(&self.to_vec(), 16);
        f.debug_struct("ViewBuffer")
            .field("position", &self.position)
            .field("length", &self.length)
            .field("endian", &self.endian)
            .field("octets", &format_args!("[{octets}]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = ViewBuffer::new(4);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_vec(), vec![0, 0, 0, 0]);
        assert_eq!(buf.endian(), Endian::Big);
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_seek_bounds() {
        let mut buf = ViewBuffer::new(8);
        buf.seek(7).unwrap();
        assert_eq!(buf.position(), 7);
        assert_eq!(
            buf.seek(8),
            Err(ViewBufferError::SeekOutOfRange {
                position: 8,
                length: 8
            })
        );
        assert_eq!(buf.position(), 7);
    }

    #[test]
    fn test_seek_on_empty_buffer_fails() {
        let mut buf = ViewBuffer::new(0);
        assert!(buf.seek(0).is_err());
    }

    #[test]
    fn test_failed_read_keeps_position() {
        let mut buf = ViewBuffer::new(6);
        buf.seek(4).unwrap();
        assert_eq!(
            buf.read_u32(),
            Err(ViewBufferError::OutOfBounds {
                position: 4,
                size: 4,
                length: 6
            })
        );
        assert_eq!(buf.position(), 4);
        assert_eq!(buf.read_u16().unwrap(), 0);
        assert_eq!(buf.position(), 6);
    }

    #[test]
    fn test_failed_array_write_is_atomic() {
        let mut buf = ViewBuffer::new(4);
        buf.write_u8(0xAA).unwrap();
        assert_eq!(
            buf.write_u16_array(&[1, 2]),
            Err(ViewBufferError::OutOfBounds {
                position: 1,
                size: 4,
                length: 4
            })
        );
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.to_vec(), vec![0xAA, 0, 0, 0]);

        buf.write_u16_array(&[0x0102]).unwrap();
        assert_eq!(buf.position(), 3);
        assert_eq!(buf.to_vec(), vec![0xAA, 0x01, 0x02, 0]);
    }

    #[test]
    fn test_huge_array_count_is_out_of_bounds() {
        let mut buf = ViewBuffer::new(4);
        assert!(matches!(
            buf.read_u64_array(usize::MAX),
            Err(ViewBufferError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_pad_past_end_fails_next_access() {
        let mut buf = ViewBuffer::new(4);
        buf.pad(10);
        assert_eq!(buf.position(), 10);
        assert_eq!(buf.remaining(), 0);
        assert!(buf.read_u8().is_err());
        assert!(buf.read_str().is_err());
    }

    #[test]
    fn test_align() {
        let mut buf = ViewBuffer::new(16);
        buf.align(4, 0).unwrap();
        assert_eq!(buf.position(), 0);
        buf.pad(1);
        buf.align(4, 0).unwrap();
        assert_eq!(buf.position(), 4);
        assert_eq!(buf.align(0, 0), Err(ViewBufferError::InvalidAlignment));
    }

    #[test]
    fn test_endian_override() {
        let mut buf = ViewBuffer::new(4);
        buf.write_u32_with(0x1234ABCD, Endian::Little).unwrap();
        assert_eq!(buf.to_vec(), vec![0xCD, 0xAB, 0x34, 0x12]);
        buf.seek(0).unwrap();
        assert_eq!(buf.read_u32().unwrap(), 0xCDAB3412);
        assert_eq!(buf.endian(), Endian::Big);
    }

    #[test]
    fn test_view_aliases_parent() {
        let mut parent = ViewBuffer::new(8).with_endian(Endian::Little);
        let mut child = parent.view(4, None).unwrap();
        assert_eq!(child.len(), 4);
        assert_eq!(child.endian(), Endian::Little);

        child.write_u16(0xBEEF).unwrap();
        assert_eq!(child.position(), 2);
        assert_eq!(parent.position(), 0);

        parent.seek(4).unwrap();
        assert_eq!(parent.read_u16().unwrap(), 0xBEEF);
    }

    #[test]
    fn test_view_of_view_is_relative() {
        let parent = ViewBuffer::from_vec((0..10).collect());
        let child = parent.view(2, Some(6)).unwrap();
        let mut grandchild = child.view(1, Some(2)).unwrap();
        assert_eq!(grandchild.read_u8_array(2).unwrap(), vec![3, 4]);
        assert!(grandchild.read_u8().is_err());
    }

    #[test]
    fn test_view_out_of_range() {
        let parent = ViewBuffer::new(4);
        assert!(parent.view(2, Some(3)).is_err());
        assert!(parent.view(5, None).is_err());
        assert_eq!(parent.view(4, None).unwrap().len(), 0);
    }

    #[test]
    fn test_view_outlives_parent() {
        let child = {
            let parent = ViewBuffer::from_vec(vec![1, 2, 3]);
            parent.view(1, None).unwrap()
        };
        assert_eq!(child.to_vec(), vec![2, 3]);
    }

    #[test]
    fn test_wrap_writes_through() {
        let mut bytes = [0u8; 4];
        {
            let mut buf = ViewBuffer::wrap(&mut bytes);
            buf.write_u16(0x0102).unwrap();
        }
        assert_eq!(bytes, [0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_wrap_range() {
        let mut bytes = [0u8; 8];
        {
            let mut buf = ViewBuffer::wrap_range(&mut bytes, 2, Some(4)).unwrap();
            assert_eq!(buf.len(), 4);
            buf.write_u32(0xFFFF_FFFF).unwrap();
            assert!(buf.write_u8(1).is_err());
        }
        assert_eq!(bytes, [0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0]);
        assert!(ViewBuffer::wrap_range(&mut bytes, 6, Some(3)).is_err());
    }

    #[test]
    fn test_read_str_unterminated_clamps() {
        let mut buf = ViewBuffer::from_vec(b"abc".to_vec());
        assert_eq!(buf.read_str().unwrap(), "abc");
        assert_eq!(buf.position(), 3);
        assert_eq!(buf.read_str().unwrap(), "");
        assert_eq!(buf.position(), 3);
    }

    #[test]
    fn test_read_str_lossy() {
        let mut buf = ViewBuffer::from_vec(vec![b'a', 0xFF, b'b', 0]);
        assert_eq!(buf.read_str().unwrap(), "a\u{FFFD}b");
        assert_eq!(buf.position(), 4);
    }

    #[test]
    fn test_write_str_needs_room_for_terminator() {
        let mut buf = ViewBuffer::new(5);
        assert!(buf.write_str("hello").is_err());
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.to_vec(), vec![0; 5]);
        buf.write_str("hell").unwrap();
        assert_eq!(buf.position(), 5);
    }

    #[test]
    fn test_write_str_fixed_mismatch_writes_nothing() {
        let mut buf = ViewBuffer::new(8);
        assert_eq!(
            buf.write_str_fixed("ABCD", 3),
            Err(ViewBufferError::LengthMismatch {
                actual: 4,
                expected: 3
            })
        );
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.to_vec(), vec![0; 8]);
    }

    #[test]
    fn test_write_str_fixed_counts_utf8_bytes() {
        let mut buf = ViewBuffer::new(8);
        assert!(buf.write_str_fixed("日本", 2).is_err());
        buf.write_str_fixed("日本", 6).unwrap();
        assert_eq!(buf.position(), 6);
        buf.seek(0).unwrap();
        assert_eq!(buf.read_str_exact(6).unwrap(), "日本");
    }

    #[test]
    fn test_set_ignores_cursor() {
        let mut buf = ViewBuffer::new(4);
        buf.pad(1);
        assert_eq!(buf.set(2, 0x7F), Some(()));
        assert_eq!(buf.set(4, 0x01), None);
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.get(2), Some(0x7F));
        assert_eq!(buf.read_u16().unwrap(), 0x007F);
    }

    #[test]
    fn test_set_is_visible_through_views() {
        let parent = ViewBuffer::new(8);
        let child = parent.view(4, None).unwrap();
        child.set(0, 0xEE).unwrap();
        assert_eq!(parent.get(4), Some(0xEE));
        assert_eq!(parent.get(8), None);
    }

    #[test]
    fn test_debug_output() {
        let buf = ViewBuffer::from_vec(vec![0x01, 0xAB]);
        assert_eq!(
            format!("{buf:?}"),
            "ViewBuffer { position: 0, length: 2, endian: Big, octets: [01 ab] }"
        );
    }
}
