//! Provide [`Value`], the node type of a dynamic data graph.
//!
//! ## Menu
//!
//! - [`Value`]: Nil, one variant per scalar type, [`Timestamp`] and the composite shapes.
//!     - [`Array`]: fixed-length sequence.
//!     - [`List`]: growable sequence.
//!     - [`Map`]: association from key values to values.
//!     - [`Record`]: named fields, laid out by a [`RecordInfo`](crate::info::RecordInfo).
//!     - [`Pointer`]: shared location, the only shape that introduces aliasing.
//!
//! Every composite carries its declared item types, so a value always knows its
//! own [`TypeInfo`]. `Nil` is the untyped nil and reports [`TypeInfo::Any`].
//!
//! The `Display` form mirrors the usual "default formatted form" of dynamic
//! languages: `[a b]`, `map[k:v]`, `{f1 f2}`, `&inner` and `<nil>`.

// -----------------------------------------------------------------------------
// Modules

mod complex;
mod display;
mod list;
mod map;
mod pointer;
mod record;
mod timestamp;

// -----------------------------------------------------------------------------
// Exports

pub use complex::Complex;
pub use list::{Array, List};
pub use map::Map;
pub use pointer::Pointer;
pub use record::Record;
pub use timestamp::{Timestamp, is_zero_timestamp, zero_timestamp};

// -----------------------------------------------------------------------------
// Value

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::info::{Kind, TypeInfo};

/// A node of a dynamic data graph.
///
/// # Examples
///
/// ```
/// use sundry_reflect::info::{Kind, TypeInfo};
/// use sundry_reflect::value::{List, Value};
///
/// let list = Value::from(List::new(TypeInfo::I32).with(1_i32).with(2_i32));
///
/// assert_eq!(list.kind(), Kind::List);
/// assert_eq!(list.to_string(), "[1 2]");
/// assert_eq!(Value::Nil.type_info(), TypeInfo::Any);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    Uintptr(usize),
    F32(f32),
    F64(f64),
    C64(Complex<f32>),
    C128(Complex<f64>),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(Timestamp),
    Array(Array),
    List(List),
    Map(Map),
    Record(Record),
    Pointer(Pointer),
}

// Helper macro for accessor methods like `as_list` and `as_list_mut`.
macro_rules! impl_as_method {
    ($name:ident, $name_mut:ident : $variant:ident => $ty:ty) => {
        #[inline]
        pub fn $name(&self) -> Option<&$ty> {
            match self {
                Self::$variant(v) => Some(v),
                _ => None,
            }
        }

        #[inline]
        pub fn $name_mut(&mut self) -> Option<&mut $ty> {
            match self {
                Self::$variant(v) => Some(v),
                _ => None,
            }
        }
    };
}

impl Value {
    impl_as_method!(as_array, as_array_mut: Array => Array);
    impl_as_method!(as_list, as_list_mut: List => List);
    impl_as_method!(as_map, as_map_mut: Map => Map);
    impl_as_method!(as_record, as_record_mut: Record => Record);
    impl_as_method!(as_pointer, as_pointer_mut: Pointer => Pointer);

    /// Creates an empty `Map<String, Any>`.
    #[inline]
    pub const fn untyped_map() -> Self {
        Self::Map(Map::untyped())
    }

    /// Creates an empty `List<Any>`.
    #[inline]
    pub const fn untyped_list() -> Self {
        Self::List(List::new(TypeInfo::Any))
    }

    /// Returns `true` for [`Value::Nil`]. Nil pointers are not `Nil`.
    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the dynamic [`Kind`] of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Nil => Kind::Any,
            Self::Bool(_) => Kind::Bool,
            Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_) | Self::Isize(_) => Kind::Int,
            Self::U8(_)
            | Self::U16(_)
            | Self::U32(_)
            | Self::U64(_)
            | Self::Usize(_)
            | Self::Uintptr(_) => Kind::Uint,
            Self::F32(_) | Self::F64(_) => Kind::Float,
            Self::C64(_) | Self::C128(_) => Kind::Complex,
            Self::String(_) => Kind::String,
            Self::Bytes(_) => Kind::Bytes,
            Self::Timestamp(_) => Kind::Timestamp,
            Self::Array(_) => Kind::Array,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Record(_) => Kind::Record,
            Self::Pointer(_) => Kind::Pointer,
        }
    }

    /// Returns the dynamic [`TypeInfo`] of this value.
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Self::Nil => TypeInfo::Any,
            Self::Bool(_) => TypeInfo::Bool,
            Self::I8(_) => TypeInfo::I8,
            Self::I16(_) => TypeInfo::I16,
            Self::I32(_) => TypeInfo::I32,
            Self::I64(_) => TypeInfo::I64,
            Self::Isize(_) => TypeInfo::Isize,
            Self::U8(_) => TypeInfo::U8,
            Self::U16(_) => TypeInfo::U16,
            Self::U32(_) => TypeInfo::U32,
            Self::U64(_) => TypeInfo::U64,
            Self::Usize(_) => TypeInfo::Usize,
            Self::Uintptr(_) => TypeInfo::Uintptr,
            Self::F32(_) => TypeInfo::F32,
            Self::F64(_) => TypeInfo::F64,
            Self::C64(_) => TypeInfo::C64,
            Self::C128(_) => TypeInfo::C128,
            Self::String(_) => TypeInfo::String,
            Self::Bytes(_) => TypeInfo::Bytes,
            Self::Timestamp(_) => TypeInfo::Timestamp,
            Self::Array(v) => v.type_info(),
            Self::List(v) => v.type_info(),
            Self::Map(v) => v.type_info(),
            Self::Record(v) => v.type_info(),
            Self::Pointer(v) => v.type_info(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Returns the number of items of sequences, maps and bytes.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array(v) => Some(v.len()),
            Self::List(v) => Some(v.len()),
            Self::Map(v) => Some(v.len()),
            Self::Bytes(v) => Some(v.len()),
            _ => None,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(v) => v.hash(state),
            Self::I8(v) => v.hash(state),
            Self::I16(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::Isize(v) => v.hash(state),
            Self::U8(v) => v.hash(state),
            Self::U16(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::Usize(v) | Self::Uintptr(v) => v.hash(state),
            // `-0.0 == 0.0`, so both must hash alike.
            Self::F32(v) => (if *v == 0.0 { 0 } else { v.to_bits() }).hash(state),
            Self::F64(v) => (if *v == 0.0 { 0 } else { v.to_bits() }).hash(state),
            Self::C64(v) => v.hash(state),
            Self::C128(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::Array(v) => v.as_slice().hash(state),
            Self::List(v) => v.as_slice().hash(state),
            // Entry order is unspecified, the length is the only stable summary.
            Self::Map(v) => v.len().hash(state),
            Self::Record(v) => {
                v.info().name().hash(state);
                v.values().hash(state);
            }
            Self::Pointer(v) => {
                if let Some(target) = v.target()
                    && let Ok(inner) = target.try_borrow()
                {
                    inner.hash(state);
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Complex<f32> => C64,
    Complex<f64> => C128,
    String => String,
    Vec<u8> => Bytes,
    Timestamp => Timestamp,
    Array => Array,
    List => List,
    Map => Map,
    Record => Record,
    Pointer => Pointer,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes [`Value::Nil`].
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{Complex, Pointer, Value};
    use crate::info::{Kind, TypeInfo};
    use sundry_utils::hash::fixed_hash;

    #[test]
    fn nil_reports_any() {
        assert_eq!(Value::Nil.kind(), Kind::Any);
        assert!(Value::default().is_nil());
        assert!(!Value::Pointer(Pointer::nil(TypeInfo::I8)).is_nil());
        assert_eq!(Value::from(None::<i32>), Value::Nil);
    }

    #[test]
    fn signed_zero_hash() {
        assert_eq!(fixed_hash(&Value::F64(0.0)), fixed_hash(&Value::F64(-0.0)));
        assert_eq!(
            fixed_hash(&Value::C64(Complex::new(-0.0, 1.0))),
            fixed_hash(&Value::C64(Complex::new(0.0, 1.0)))
        );
        assert_ne!(fixed_hash(&Value::I32(1)), fixed_hash(&Value::I64(1)));
    }

    #[test]
    fn pointer_hash_follows_target() {
        let a = Value::Pointer(Pointer::new(TypeInfo::String, "k"));
        let b = Value::Pointer(Pointer::new(TypeInfo::String, "k"));
        assert_eq!(a, b);
        assert_eq!(fixed_hash(&a), fixed_hash(&b));
    }

    #[test]
    fn type_info_of_composites() {
        let value = Value::untyped_list();
        assert_eq!(value.type_info(), TypeInfo::untyped_list());
        assert_eq!(value.len(), Some(0));
        assert_eq!(Value::from(1_u8).len(), None);
    }
}
