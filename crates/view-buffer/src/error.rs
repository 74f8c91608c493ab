use thiserror::Error;

/// Error type for cursor buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewBufferError {
    /// `seek` target outside `[0, length)`.
    #[error("cannot seek outside of buffer ({position}, length {length})")]
    SeekOutOfRange { position: usize, length: usize },
    /// An access spanning `[position, position + size)` does not fit the buffer.
    #[error("access of {size} bytes at {position} exceeds buffer length {length}")]
    OutOfBounds {
        position: usize,
        size: usize,
        length: usize,
    },
    /// Fixed-length string write with a mismatched encoded width.
    #[error("string of length {actual} does not match write length of {expected}")]
    LengthMismatch { actual: usize, expected: usize },
    /// `align` called with a zero multiple.
    #[error("alignment multiple must be non-zero")]
    InvalidAlignment,
}
