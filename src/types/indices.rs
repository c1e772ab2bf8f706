//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up a station position in the catalog with a
//! constituent column or a correction-table row.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        // Allow using as array index
        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }
    };
}

define_index!(
    /// Position of a station in a harmonic catalog.
    StationIndex,
    "S"
);

define_index!(
    /// Column of a constituent, shared by station constants and correction rows.
    ///
    /// # Example
    ///
    /// ```
    /// use tide_rs::types::ConstituentIndex;
    ///
    /// let c = ConstituentIndex::new(3);
    /// assert_eq!(c.get(), 3);
    /// ```
    ConstituentIndex,
    "C"
);

define_index!(
    /// Row of a year correction table (`year - start_year`).
    YearIndex,
    "Y"
);
