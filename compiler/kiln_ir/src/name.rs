//! Interned string identifier.

use std::fmt;

/// Interned string identifier.
///
/// A `Name` is an index into a [`StringInterner`](crate::StringInterner).
/// Two names from the same interner are equal exactly when their strings are.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string. Also the name of the top-level class.
    pub const EMPTY: Name = Name(0);

    /// Pre-interned `main`.
    pub const MAIN: Name = Name(1);

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
