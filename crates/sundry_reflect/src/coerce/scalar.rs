use alloc::borrow::Cow;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::SecondsFormat;

use super::{ConvertError, nil_or, with_target};
use crate::info::{Kind, TypeInfo};
use crate::value::{Complex, Value};

/// Reads bytes as UTF-8 text, replacing invalid sequences.
#[inline]
pub(super) fn text_of(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Widens through the shortest decimal form, so `1.2_f32` becomes `1.2_f64`
/// instead of `1.2000000476837158`.
#[inline]
pub(super) fn widen_f32(v: f32) -> f64 {
    format!("{v}").parse().unwrap_or(f64::from(v))
}

// -----------------------------------------------------------------------------
// bool

/// Converts to `bool`.
///
/// Numbers are `true` when non-zero. Strings must be `true` or `false`
/// in any letter case.
pub fn to_bool(value: &Value) -> Result<bool, ConvertError> {
    const TARGET: &TypeInfo = &TypeInfo::Bool;

    fn parse(value: &Value, text: &str) -> Result<bool, ConvertError> {
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::invalid(value, TARGET, "expected `true` or `false`"))
        }
    }

    match value {
        Value::Nil => nil_or(TARGET, false),
        Value::Bool(v) => Ok(*v),
        Value::I8(v) => Ok(*v != 0),
        Value::I16(v) => Ok(*v != 0),
        Value::I32(v) => Ok(*v != 0),
        Value::I64(v) => Ok(*v != 0),
        Value::Isize(v) => Ok(*v != 0),
        Value::U8(v) => Ok(*v != 0),
        Value::U16(v) => Ok(*v != 0),
        Value::U32(v) => Ok(*v != 0),
        Value::U64(v) => Ok(*v != 0),
        Value::Usize(v) | Value::Uintptr(v) => Ok(*v != 0),
        Value::F32(v) => Ok(*v != 0.0),
        Value::F64(v) => Ok(*v != 0.0),
        Value::C64(v) => Ok(!v.is_zero()),
        Value::C128(v) => Ok(!v.is_zero()),
        Value::String(s) => parse(value, s),
        Value::Bytes(b) => parse(value, &text_of(b)),
        Value::Pointer(p) => with_target(p, TARGET, to_bool),
        _ => Err(ConvertError::unsupported(value, TARGET)),
    }
}

// -----------------------------------------------------------------------------
// integers

/// `2^63`, the first float past the end of `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
/// `2^64`, the first float past the end of `u64`.
const U64_END: f64 = 18_446_744_073_709_551_616.0;

/// Truncates toward zero; NaN, infinities and out-of-range values fail.
fn trunc_int(value: &Value, target: &TypeInfo, v: f64) -> Result<i64, ConvertError> {
    if (-I64_END..I64_END).contains(&v) {
        Ok(v as i64)
    } else {
        Err(ConvertError::invalid(value, target, "out of range"))
    }
}

/// Truncates toward zero; NaN, infinities and values outside `(-1, 2^64)` fail.
fn trunc_uint(value: &Value, target: &TypeInfo, v: f64) -> Result<u64, ConvertError> {
    if v > -1.0 && v < U64_END {
        Ok(v as u64)
    } else {
        Err(ConvertError::invalid(value, target, "out of range"))
    }
}

/// Converts to `i64`.
///
/// Unsigned values are reinterpreted bit for bit, floats truncate toward
/// zero and strings are parsed in base 10. Complex numbers never convert,
/// nor do floats that are NaN, infinite or outside the `i64` range.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_int;
/// use sundry_reflect::value::Value;
///
/// assert_eq!(to_int(&Value::F64(-2.9)).unwrap(), -2);
/// assert_eq!(to_int(&Value::U64(u64::MAX)).unwrap(), -1);
/// assert_eq!(to_int(&Value::from("103")).unwrap(), 103);
/// ```
#[inline]
pub fn to_int(value: &Value) -> Result<i64, ConvertError> {
    int_of(value, &TypeInfo::I64)
}

/// Converts to `i64`, reporting failures against `target`.
pub(crate) fn int_of(value: &Value, target: &TypeInfo) -> Result<i64, ConvertError> {
    fn parse(value: &Value, target: &TypeInfo, text: &str) -> Result<i64, ConvertError> {
        text.parse()
            .map_err(|e| ConvertError::invalid(value, target, e))
    }

    match value {
        Value::Nil => nil_or(target, 0),
        Value::Bool(v) => Ok(i64::from(*v)),
        Value::I8(v) => Ok(i64::from(*v)),
        Value::I16(v) => Ok(i64::from(*v)),
        Value::I32(v) => Ok(i64::from(*v)),
        Value::I64(v) => Ok(*v),
        Value::Isize(v) => Ok(*v as i64),
        Value::U8(v) => Ok(i64::from(*v)),
        Value::U16(v) => Ok(i64::from(*v)),
        Value::U32(v) => Ok(i64::from(*v)),
        Value::U64(v) => Ok(*v as i64),
        Value::Usize(v) | Value::Uintptr(v) => Ok(*v as i64),
        Value::F32(v) => trunc_int(value, target, f64::from(*v)),
        Value::F64(v) => trunc_int(value, target, *v),
        Value::String(s) => parse(value, target, s),
        Value::Bytes(b) => parse(value, target, &text_of(b)),
        Value::Pointer(p) => with_target(p, target, |v| int_of(v, target)),
        _ => Err(ConvertError::unsupported(value, target)),
    }
}

/// Converts to `u64`.
///
/// Signed values are reinterpreted bit for bit, floats truncate toward
/// zero and strings are parsed in base 10. Floats that are NaN, infinite
/// or truncate outside the `u64` range fail.
#[inline]
pub fn to_uint(value: &Value) -> Result<u64, ConvertError> {
    uint_of(value, &TypeInfo::U64)
}

/// Converts to `u64`, reporting failures against `target`.
pub(crate) fn uint_of(value: &Value, target: &TypeInfo) -> Result<u64, ConvertError> {
    fn parse(value: &Value, target: &TypeInfo, text: &str) -> Result<u64, ConvertError> {
        text.parse()
            .map_err(|e| ConvertError::invalid(value, target, e))
    }

    match value {
        Value::Nil => nil_or(target, 0),
        Value::Bool(v) => Ok(u64::from(*v)),
        Value::I8(v) => Ok(*v as u64),
        Value::I16(v) => Ok(*v as u64),
        Value::I32(v) => Ok(*v as u64),
        Value::I64(v) => Ok(*v as u64),
        Value::Isize(v) => Ok(*v as u64),
        Value::U8(v) => Ok(u64::from(*v)),
        Value::U16(v) => Ok(u64::from(*v)),
        Value::U32(v) => Ok(u64::from(*v)),
        Value::U64(v) => Ok(*v),
        Value::Usize(v) | Value::Uintptr(v) => Ok(*v as u64),
        Value::F32(v) => trunc_uint(value, target, f64::from(*v)),
        Value::F64(v) => trunc_uint(value, target, *v),
        Value::String(s) => parse(value, target, s),
        Value::Bytes(b) => parse(value, target, &text_of(b)),
        Value::Pointer(p) => with_target(p, target, |v| uint_of(v, target)),
        _ => Err(ConvertError::unsupported(value, target)),
    }
}

// -----------------------------------------------------------------------------
// floats

/// Converts to `f64`.
///
/// `f32` sources widen through their shortest decimal form. Strings may use
/// scientific notation.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_float;
/// use sundry_reflect::value::Value;
///
/// assert_eq!(to_float(&Value::F32(1.2)).unwrap(), 1.2);
/// assert_eq!(to_float(&Value::from("1e3")).unwrap(), 1000.0);
/// ```
#[inline]
pub fn to_float(value: &Value) -> Result<f64, ConvertError> {
    float_of(value, &TypeInfo::F64)
}

/// Converts to `f64`, reporting failures against `target`.
pub(crate) fn float_of(value: &Value, target: &TypeInfo) -> Result<f64, ConvertError> {
    fn parse(value: &Value, target: &TypeInfo, text: &str) -> Result<f64, ConvertError> {
        text.parse()
            .map_err(|e| ConvertError::invalid(value, target, e))
    }

    match value {
        Value::Nil => nil_or(target, 0.0),
        Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
        Value::I8(v) => Ok(f64::from(*v)),
        Value::I16(v) => Ok(f64::from(*v)),
        Value::I32(v) => Ok(f64::from(*v)),
        Value::I64(v) => Ok(*v as f64),
        Value::Isize(v) => Ok(*v as f64),
        Value::U8(v) => Ok(f64::from(*v)),
        Value::U16(v) => Ok(f64::from(*v)),
        Value::U32(v) => Ok(f64::from(*v)),
        Value::U64(v) => Ok(*v as f64),
        Value::Usize(v) | Value::Uintptr(v) => Ok(*v as f64),
        Value::F32(v) => Ok(widen_f32(*v)),
        Value::F64(v) => Ok(*v),
        Value::String(s) => parse(value, target, s),
        Value::Bytes(b) => parse(value, target, &text_of(b)),
        Value::Pointer(p) => with_target(p, target, |v| float_of(v, target)),
        _ => Err(ConvertError::unsupported(value, target)),
    }
}

/// Converts to a complex number with `f64` parts.
///
/// Real numbers get a zero imaginary part.
pub(crate) fn complex_of(value: &Value, target: &TypeInfo) -> Result<Complex<f64>, ConvertError> {
    match value {
        Value::Nil => nil_or(target, Complex::default()),
        Value::C64(v) => Ok(Complex::new(widen_f32(v.re), widen_f32(v.im))),
        Value::C128(v) => Ok(*v),
        Value::Pointer(p) => with_target(p, target, |v| complex_of(v, target)),
        v if matches!(v.kind(), Kind::Int | Kind::Uint | Kind::Float) => {
            Ok(Complex::new(float_of(v, target)?, 0.0))
        }
        _ => Err(ConvertError::unsupported(value, target)),
    }
}

// -----------------------------------------------------------------------------
// text

/// Converts to `String`.
///
/// Scalars use their natural decimal form, floats the shortest form that
/// round-trips, bytes are read as UTF-8 text and timestamps use RFC 3339.
/// Composite values use their default formatted form.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_string;
/// use sundry_reflect::value::Value;
///
/// assert_eq!(to_string(&Value::F32(0.1)).unwrap(), "0.1");
/// assert_eq!(to_string(&Value::Bytes(b"hi".to_vec())).unwrap(), "hi");
/// ```
pub fn to_string(value: &Value) -> Result<String, ConvertError> {
    const TARGET: &TypeInfo = &TypeInfo::String;

    match value {
        Value::Nil => nil_or(TARGET, String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Bytes(b) => Ok(text_of(b).into_owned()),
        Value::Timestamp(ts) => Ok(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Pointer(p) => with_target(p, TARGET, to_string),
        _ => Ok(value.to_string()),
    }
}

/// Converts to raw bytes.
///
/// Strings yield their UTF-8 encoding; sequences convert element-wise to `u8`.
pub(crate) fn bytes_of(value: &Value, target: &TypeInfo) -> Result<Vec<u8>, ConvertError> {
    fn collect<'a>(
        items: impl Iterator<Item = &'a Value>,
    ) -> Result<Vec<u8>, ConvertError> {
        items.map(|v| uint_of(v, &TypeInfo::U8).map(|b| b as u8)).collect()
    }

    match value {
        Value::Nil => nil_or(target, Vec::new()),
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        Value::Bytes(b) => Ok(b.clone()),
        Value::Array(a) => collect(a.iter()),
        Value::List(l) => collect(l.iter()),
        Value::Pointer(p) => with_target(p, target, |v| bytes_of(v, target)),
        _ => Err(ConvertError::unsupported(value, target)),
    }
}
