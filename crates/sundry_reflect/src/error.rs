use core::fmt;

/// The coarse category of a failure, shared by
/// [`ConvertError`](crate::coerce::ConvertError) and
/// [`AccessError`](crate::access::AccessError).
///
/// Callers that only need to branch on the kind of failure can match on this
/// instead of the detailed error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A step addressed a node of the wrong shape, or an unknown record field.
    ShapeMismatch,
    /// A write addressed a position outside of a sequence.
    IndexOutOfBounds,
    /// An index step was not a valid integer.
    IndexParse,
    /// A value could not be converted to the requested type.
    ConvertFailure,
    /// A nil value was converted while zero-mode was off.
    NilToNonZero,
    /// A write targeted a slot that cannot be assigned through this root.
    UnaddressableWrite,
    /// The value handed to an accessor cannot be a root.
    InvalidRoot,
    /// The configured separator is not usable.
    InvalidSeparator,
    /// A shared node was already borrowed elsewhere.
    BorrowConflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::ShapeMismatch => "shape mismatch",
            Self::IndexOutOfBounds => "index out of bounds",
            Self::IndexParse => "index parse",
            Self::ConvertFailure => "convert failure",
            Self::NilToNonZero => "nil to non-zero",
            Self::UnaddressableWrite => "unaddressable write",
            Self::InvalidRoot => "invalid root",
            Self::InvalidSeparator => "invalid separator",
            Self::BorrowConflict => "borrow conflict",
        })
    }
}
