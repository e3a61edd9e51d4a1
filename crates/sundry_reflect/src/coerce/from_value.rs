use alloc::string::String;
use alloc::vec::Vec;

use super::{ConvertError, bytes_of, float_of, int_of, to_bool, to_string, to_timestamp, uint_of};
use crate::info::TypeInfo;
use crate::value::{Timestamp, Value};

/// A type that can be extracted from a [`Value`] through the coercion rules.
///
/// Narrow integer targets truncate the 64-bit result, like
/// [`convert`](super::convert) does for narrow [`TypeInfo`] targets.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::FromValue;
/// use sundry_reflect::value::Value;
///
/// assert_eq!(u8::from_value(&Value::from("29")).unwrap(), 29);
/// assert_eq!(String::from_value(&Value::F64(2.5)).unwrap(), "2.5");
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ConvertError>;
}

macro_rules! impl_from_value_int {
    ($via:ident: $($ty:ty => $info:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                #[inline]
                fn from_value(value: &Value) -> Result<Self, ConvertError> {
                    $via(value, &TypeInfo::$info).map(|v| v as $ty)
                }
            }
        )*
    };
}

impl_from_value_int!(int_of: i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
impl_from_value_int!(uint_of: u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);
impl_from_value_int!(float_of: f32 => F32, f64 => F64);

impl FromValue for bool {
    #[inline]
    fn from_value(value: &Value) -> Result<Self, ConvertError> {
        to_bool(value)
    }
}

impl FromValue for String {
    #[inline]
    fn from_value(value: &Value) -> Result<Self, ConvertError> {
        to_string(value)
    }
}

impl FromValue for Vec<u8> {
    #[inline]
    fn from_value(value: &Value) -> Result<Self, ConvertError> {
        bytes_of(value, &TypeInfo::Bytes)
    }
}

impl FromValue for Timestamp {
    #[inline]
    fn from_value(value: &Value) -> Result<Self, ConvertError> {
        to_timestamp(value)
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: &Value) -> Result<Self, ConvertError> {
        Ok(value.clone())
    }
}
