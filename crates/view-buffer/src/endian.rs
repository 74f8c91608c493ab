//! Byte order selection.

/// Byte order used to interpret multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    #[default]
    Big,
}

impl Endian {
    /// Converts the boolean "little-endian" flag form.
    ///
    /// ```
    /// use view_buffer::Endian;
    ///
    /// assert_eq!(Endian::from_little(true), Endian::Little);
    /// assert_eq!(Endian::from_little(false), Endian::Big);
    /// ```
    pub fn from_little(little: bool) -> Self {
        if little {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Returns `true` for [`Endian::Little`].
    pub fn is_little(self) -> bool {
        self == Endian::Little
    }

    /// Returns the opposite byte order.
    pub fn reverse(self) -> Self {
        match self {
            Endian::Little => Endian::Big,
            Endian::Big => Endian::Little,
        }
    }
}
