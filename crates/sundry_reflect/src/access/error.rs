use alloc::string::String;

use thiserror::Error;

use crate::ErrorKind;
use crate::coerce::ConvertError;
use crate::info::Kind;

/// An error returned from a failed path access.
///
/// `at` is the path prefix where the failure occurred, rendered with the
/// accessor's separator; the root renders as `$`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("at `{at}`: cannot apply `{step}` to {actual}")]
    ShapeMismatch {
        at: String,
        step: String,
        actual: Kind,
    },

    #[error("at `{at}`: index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { at: String, index: isize, len: usize },

    #[error("at `{at}`: `{step}` is not a valid index")]
    IndexParse { at: String, step: String },

    #[error("at `{at}`: {source}")]
    Convert {
        at: String,
        #[source]
        source: ConvertError,
    },

    #[error("at `{at}`: cannot write through this root, {reason}")]
    UnaddressableWrite { at: String, reason: &'static str },

    #[error("cannot wrap a value of kind {kind}")]
    InvalidRoot { kind: Kind },

    #[error("invalid path separator {0:#04x}")]
    InvalidSeparator(u8),

    #[error("at `{at}`: the node is already borrowed")]
    BorrowConflict { at: String },
}

impl AccessError {
    /// Returns the coarse category of this error.
    ///
    /// Conversion failures report the kind of the wrapped [`ConvertError`].
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::IndexParse { .. } => ErrorKind::IndexParse,
            Self::Convert { source, .. } => source.kind(),
            Self::UnaddressableWrite { .. } => ErrorKind::UnaddressableWrite,
            Self::InvalidRoot { .. } => ErrorKind::InvalidRoot,
            Self::InvalidSeparator(_) => ErrorKind::InvalidSeparator,
            Self::BorrowConflict { .. } => ErrorKind::BorrowConflict,
        }
    }

    /// Returns the path prefix where the error occurred, if any.
    pub fn at(&self) -> Option<&str> {
        match self {
            Self::ShapeMismatch { at, .. }
            | Self::IndexOutOfBounds { at, .. }
            | Self::IndexParse { at, .. }
            | Self::Convert { at, .. }
            | Self::UnaddressableWrite { at, .. }
            | Self::BorrowConflict { at } => Some(at),
            Self::InvalidRoot { .. } | Self::InvalidSeparator(_) => None,
        }
    }
}
