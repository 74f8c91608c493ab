//! Hex formatting for buffer contents.

use std::fmt::Write;

/// Formats at most `max` leading bytes as space-separated lowercase hex.
///
/// Truncated output is suffixed with the count of omitted bytes.
///
/// # Example
///
/// ```
/// use view_buffer::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[0xde, 0xad, 0xbe, 0xef], 2), "de ad... (2 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let _ = write!(result, "{byte:02x}");
    }

    if octets.len() > max {
        let _ = write!(result, "... ({} more)", octets.len() - max);
    }

    result
}
