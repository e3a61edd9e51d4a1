//! The coercion kernel: converts any [`Value`] to a requested type.
//!
//! ## Menu
//!
//! - Scalar targets: [`to_bool`], [`to_int`], [`to_uint`], [`to_float`], [`to_string`].
//! - Time targets: [`to_timestamp`], [`to_timestamp_with_layout`].
//! - Composite targets: [`to_sequence`], [`to_mapping`], [`to_record`], [`to_indirection`].
//! - [`convert`]: dispatches on a [`TypeInfo`] target, including narrow widths.
//! - [`FromValue`]: typed extraction built on the functions above.
//! - [`zero_mode`]: whether nil converts to the target's zero value or fails.
//!
//! Pointers are followed transparently on every target but [`TypeInfo::Pointer`],
//! and conversions never modify their input. Composite targets are built fresh.
//!
//! Self-referential graphs (pointer cycles) are not supported and may recurse
//! without bound.

// -----------------------------------------------------------------------------
// Modules

mod composite;
mod error;
mod from_value;
mod scalar;
mod time;
mod zero_mode;

// -----------------------------------------------------------------------------
// Exports

pub use composite::{to_indirection, to_mapping, to_record, to_sequence};
pub use error::ConvertError;
pub use from_value::FromValue;
pub use scalar::{to_bool, to_float, to_int, to_string, to_uint};
pub use time::{to_timestamp, to_timestamp_with_layout};
pub use zero_mode::{ZeroModeGuard, set_zero_mode, zero_mode};

pub(crate) use composite::array_of;
pub(crate) use scalar::{bytes_of, complex_of, float_of, int_of, uint_of};

#[cfg(test)]
pub(crate) use zero_mode::ZeroModeScope;

// -----------------------------------------------------------------------------
// Dispatch

use crate::info::TypeInfo;
use crate::value::{Pointer, Value};

/// Returns `zero` in zero-mode, a [`ConvertError::Nil`] otherwise.
#[inline]
fn nil_or<T>(target: &TypeInfo, zero: T) -> Result<T, ConvertError> {
    if zero_mode() {
        Ok(zero)
    } else {
        Err(ConvertError::nil(target))
    }
}

/// Applies `f` to the target of `pointer`; a nil pointer reads as [`Value::Nil`].
fn with_target<T>(
    pointer: &Pointer,
    target: &TypeInfo,
    f: impl FnOnce(&Value) -> Result<T, ConvertError>,
) -> Result<T, ConvertError> {
    let Some(shared) = pointer.target() else {
        return f(&Value::Nil);
    };
    match shared.try_borrow() {
        Ok(inner) => f(&inner),
        Err(_) => Err(ConvertError::Invalid {
            value: "&<borrowed>".into(),
            target: target.clone(),
            reason: "pointer target is already borrowed".into(),
        }),
    }
}

/// Converts `value` to the type described by `target`.
///
/// Narrow numeric targets truncate the 64-bit conversion, e.g. `300` to `u8`
/// gives `44`. [`TypeInfo::Any`] accepts the value as is.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::convert;
/// use sundry_reflect::info::TypeInfo;
/// use sundry_reflect::value::Value;
///
/// assert_eq!(convert(&Value::from("29"), &TypeInfo::U64).unwrap(), Value::U64(29));
/// assert_eq!(convert(&Value::I8(-1), &TypeInfo::U8).unwrap(), Value::U8(255));
///
/// let list = convert(&Value::from("ab"), &TypeInfo::Bytes).unwrap();
/// assert_eq!(list, Value::Bytes(b"ab".to_vec()));
/// ```
pub fn convert(value: &Value, target: &TypeInfo) -> Result<Value, ConvertError> {
    Ok(match target {
        TypeInfo::Bool => Value::Bool(to_bool(value)?),
        TypeInfo::I8 => Value::I8(int_of(value, target)? as i8),
        TypeInfo::I16 => Value::I16(int_of(value, target)? as i16),
        TypeInfo::I32 => Value::I32(int_of(value, target)? as i32),
        TypeInfo::I64 => Value::I64(int_of(value, target)?),
        TypeInfo::Isize => Value::Isize(int_of(value, target)? as isize),
        TypeInfo::U8 => Value::U8(uint_of(value, target)? as u8),
        TypeInfo::U16 => Value::U16(uint_of(value, target)? as u16),
        TypeInfo::U32 => Value::U32(uint_of(value, target)? as u32),
        TypeInfo::U64 => Value::U64(uint_of(value, target)?),
        TypeInfo::Usize => Value::Usize(uint_of(value, target)? as usize),
        TypeInfo::Uintptr => Value::Uintptr(uint_of(value, target)? as usize),
        TypeInfo::F32 => Value::F32(float_of(value, target)? as f32),
        TypeInfo::F64 => Value::F64(float_of(value, target)?),
        TypeInfo::C64 => Value::C64(complex_of(value, target)?.narrow()),
        TypeInfo::C128 => Value::C128(complex_of(value, target)?),
        TypeInfo::String => Value::String(to_string(value)?),
        TypeInfo::Bytes => Value::Bytes(bytes_of(value, target)?),
        TypeInfo::Timestamp => Value::Timestamp(to_timestamp(value)?),
        TypeInfo::Array(info) => Value::Array(array_of(value, info.item(), info.len())?),
        TypeInfo::List(info) => Value::List(to_sequence(value, info.item())?),
        TypeInfo::Map(info) => Value::Map(to_mapping(value, info.key(), info.value())?),
        TypeInfo::Record(info) => Value::Record(to_record(value, info)?),
        TypeInfo::Pointer(info) => Value::Pointer(to_indirection(value, info.pointee())?),
        TypeInfo::Any => value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{ZeroModeScope, convert, to_bool, to_float, to_int, to_string, to_timestamp};
    use crate::ErrorKind;
    use crate::info::{FieldInfo, RecordInfo, TypeInfo};
    use crate::value::{Complex, List, Pointer, Record, Value, zero_timestamp};

    #[test]
    fn nil_in_zero_mode() {
        let _scope = ZeroModeScope::new(true);
        assert!(!to_bool(&Value::Nil).unwrap());
        assert_eq!(to_int(&Value::Nil).unwrap(), 0);
        assert_eq!(to_float(&Value::Nil).unwrap(), 0.0);
        assert_eq!(to_string(&Value::Nil).unwrap(), "");
        assert_eq!(to_timestamp(&Value::Nil).unwrap(), zero_timestamp());

        let info = RecordInfo::new("R", [FieldInfo::new("A", TypeInfo::U8)]);
        let record = convert(&Value::Nil, &TypeInfo::record(info.clone())).unwrap();
        assert_eq!(record, Value::Record(Record::new(info)));

        let nil_ptr = Value::Pointer(Pointer::nil(TypeInfo::I32));
        assert_eq!(convert(&nil_ptr, &TypeInfo::I16).unwrap(), Value::I16(0));
    }

    #[test]
    fn nil_without_zero_mode() {
        let _scope = ZeroModeScope::new(false);
        for target in [TypeInfo::Bool, TypeInfo::U32, TypeInfo::String, TypeInfo::Timestamp] {
            let err = convert(&Value::Nil, &target).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NilToNonZero);
            assert_eq!(err.target(), &target);
        }
        let list = convert(&Value::Nil, &TypeInfo::untyped_list()).unwrap_err();
        assert_eq!(list.kind(), ErrorKind::NilToNonZero);

        // nil pointers stay nil, `Any` keeps the nil
        let ptr = convert(&Value::Nil, &TypeInfo::pointer(TypeInfo::I8)).unwrap();
        assert_eq!(ptr, Value::Pointer(Pointer::nil(TypeInfo::I8)));
        assert_eq!(convert(&Value::Nil, &TypeInfo::Any).unwrap(), Value::Nil);
    }

    #[test]
    fn narrow_widths_truncate() {
        assert_eq!(convert(&Value::I64(300), &TypeInfo::U8).unwrap(), Value::U8(44));
        assert_eq!(convert(&Value::U64(65_535), &TypeInfo::I16).unwrap(), Value::I16(-1));
        assert_eq!(convert(&Value::F64(1.5), &TypeInfo::F32).unwrap(), Value::F32(1.5));
        assert_eq!(convert(&Value::U8(7), &TypeInfo::Uintptr).unwrap(), Value::Uintptr(7));
    }

    #[test]
    fn complex_targets() {
        assert_eq!(
            convert(&Value::I32(3), &TypeInfo::C128).unwrap(),
            Value::C128(Complex::new(3.0, 0.0))
        );
        assert_eq!(
            convert(&Value::C128(Complex::new(1.5, -1.0)), &TypeInfo::C64).unwrap(),
            Value::C64(Complex::new(1.5, -1.0))
        );
        assert!(convert(&Value::from("1+2i"), &TypeInfo::C64).is_err());
    }

    #[test]
    fn bytes_targets() {
        let list = Value::from(List::new(TypeInfo::I64).with(104_i64).with(105_i64));
        assert_eq!(convert(&list, &TypeInfo::Bytes).unwrap(), Value::Bytes(b"hi".to_vec()));
        assert_eq!(to_string(&Value::Bytes(b"hi".to_vec())).unwrap(), "hi");
    }

    #[test]
    fn pointer_target_transparency() {
        let x = Value::from("12");
        let p = Value::Pointer(Pointer::new(TypeInfo::String, x.clone()));
        for target in [TypeInfo::U16, TypeInfo::F64, TypeInfo::String, TypeInfo::Timestamp] {
            assert_eq!(convert(&p, &target).unwrap(), convert(&x, &target).unwrap());
        }
        let ptr_target = TypeInfo::pointer(TypeInfo::I8);
        assert_eq!(convert(&p, &ptr_target).unwrap(), convert(&x, &ptr_target).unwrap());
    }

    #[test]
    fn any_keeps_pointer_sharing() {
        let p = Pointer::new(TypeInfo::I8, 1_i8);
        let Value::Pointer(copy) = convert(&Value::Pointer(p.clone()), &TypeInfo::Any).unwrap() else {
            panic!("expected a pointer");
        };
        assert!(matches!(
            (p.target(), copy.target()),
            (Some(a), Some(b)) if alloc::rc::Rc::ptr_eq(a, b)
        ));
    }

    #[test]
    fn idempotent_conversions() {
        let samples = [Value::from("7"), Value::F32(2.5), Value::U16(9), Value::Bool(true)];
        let targets = [TypeInfo::I32, TypeInfo::U64, TypeInfo::F32, TypeInfo::String, TypeInfo::Bool];
        for x in &samples {
            for target in &targets {
                if let Ok(once) = convert(x, target)
                    && let Ok(twice) = convert(&once, target)
                {
                    assert_eq!(once, twice, "{x} as {target}");
                }
            }
        }
    }
}
