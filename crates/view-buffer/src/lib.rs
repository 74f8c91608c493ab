//! Fixed-size binary cursor buffer.
//!
//! This crate provides a stateful cursor over a fixed-length byte region with
//! typed reads and writes of integers, IEEE floats (including emulated
//! half precision) and UTF-8 text, in either byte order.
//!
//! # Overview
//!
//! - [`ViewBuffer`] - Cursor over owned or borrowed bytes, with aliasing sub-views
//! - [`Endian`] - Default and per-call byte order
//! - [`Scalar`] - The fixed-width kinds accepted by the generic accessors
//! - [`F16`], [`encode_f16`], [`decode_f16`] - binary16 emulation
//!
//! # Example
//!
//! ```
//! use view_buffer::{Endian, ViewBuffer};
//!
//! let mut buf = ViewBuffer::new(32);
//! buf.write_u16(0x0102).unwrap();
//! buf.write_u32_with(0x1234ABCD, Endian::Little).unwrap();
//! buf.write_f64_array(&[0.5, 1.5]).unwrap();
//! buf.write_str_fixed("MAGIC", 5).unwrap();
//! assert_eq!(buf.position(), 27);
//!
//! buf.seek(0).unwrap();
//! assert_eq!(buf.read_u16().unwrap(), 0x0102);
//! assert_eq!(buf.read_u32().unwrap(), 0xCDAB3412);
//! assert_eq!(buf.read_f64_array(2).unwrap(), vec![0.5, 1.5]);
//! assert_eq!(buf.read_str_exact(5).unwrap(), "MAGIC");
//! ```

mod buffer;
mod endian;
mod error;
mod f16;
mod print_octets;
mod scalar;

pub use buffer::ViewBuffer;
pub use endian::Endian;
pub use error::ViewBufferError;
pub use f16::{decode_f16, encode_f16, f16_round, F16};
pub use print_octets::print_octets;
pub use scalar::Scalar;
