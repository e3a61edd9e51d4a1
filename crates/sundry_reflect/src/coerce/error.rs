use alloc::string::{String, ToString};
use core::fmt;

use thiserror::Error;

use crate::ErrorKind;
use crate::info::TypeInfo;
use crate::value::Value;

/// A failed conversion.
///
/// `value` is the formatted form of the source and `target` the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("cannot convert nil to {target}")]
    Nil { target: TypeInfo },

    #[error("cannot convert `{value}` to {target}")]
    Unsupported { value: String, target: TypeInfo },

    #[error("cannot convert `{value}` to {target}: {reason}")]
    Invalid {
        value: String,
        target: TypeInfo,
        reason: String,
    },
}

impl ConvertError {
    #[inline]
    pub(crate) fn nil(target: &TypeInfo) -> Self {
        Self::Nil {
            target: target.clone(),
        }
    }

    #[inline]
    pub(crate) fn unsupported(value: &Value, target: &TypeInfo) -> Self {
        Self::Unsupported {
            value: value.to_string(),
            target: target.clone(),
        }
    }

    #[inline]
    pub(crate) fn invalid(value: &Value, target: &TypeInfo, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            value: value.to_string(),
            target: target.clone(),
            reason: reason.to_string(),
        }
    }

    /// Returns [`ErrorKind::NilToNonZero`] or [`ErrorKind::ConvertFailure`].
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Nil { .. } => ErrorKind::NilToNonZero,
            Self::Unsupported { .. } | Self::Invalid { .. } => ErrorKind::ConvertFailure,
        }
    }

    /// Returns the requested target type.
    pub const fn target(&self) -> &TypeInfo {
        match self {
            Self::Nil { target } | Self::Unsupported { target, .. } | Self::Invalid { target, .. } => {
                target
            }
        }
    }
}
