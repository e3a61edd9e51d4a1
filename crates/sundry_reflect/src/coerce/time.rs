use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{ConvertError, nil_or, with_target};
use crate::info::TypeInfo;
use crate::value::{Timestamp, Value, zero_timestamp};

use super::scalar::text_of;

const TARGET: &TypeInfo = &TypeInfo::Timestamp;

/// Largest integer read as seconds.
const MAX_SECS: u64 = 99_999_999_999;
/// Largest integer read as milliseconds.
const MAX_MILLIS: u64 = 99_999_999_999_999;
/// Largest integer read as microseconds; anything above is nanoseconds.
const MAX_MICROS: u64 = 99_999_999_999_999_999;

/// Converts to a [`Timestamp`].
///
/// Integers are UNIX times whose unit is inferred from their magnitude:
/// seconds up to `99_999_999_999`, then milliseconds, microseconds and
/// nanoseconds for every further three digits. Negative integers fail.
///
/// Strings holding an integer follow the same rule. Records yield their
/// first exported timestamp field in declaration order.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_timestamp;
/// use sundry_reflect::value::Value;
///
/// let secs = to_timestamp(&Value::I64(1_547_549_353)).unwrap();
/// let millis = to_timestamp(&Value::from("1547549353123")).unwrap();
///
/// assert_eq!(secs.to_rfc3339(), "2019-01-15T10:49:13+00:00");
/// assert_eq!((millis - secs).num_milliseconds(), 123);
/// ```
#[inline]
pub fn to_timestamp(value: &Value) -> Result<Timestamp, ConvertError> {
    timestamp_of(value, None)
}

/// Converts to a [`Timestamp`], parsing non-numeric strings with `layout`.
///
/// `layout` uses `chrono`'s strftime syntax. A layout without an offset is
/// read as UTC, and a layout with only a date is read as midnight UTC.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_timestamp_with_layout;
/// use sundry_reflect::value::Value;
///
/// let ts = to_timestamp_with_layout(&Value::from("2019-01-15 10:49"), "%Y-%m-%d %H:%M").unwrap();
/// assert_eq!(ts.timestamp(), 1_547_549_340);
/// ```
#[inline]
pub fn to_timestamp_with_layout(value: &Value, layout: &str) -> Result<Timestamp, ConvertError> {
    timestamp_of(value, Some(layout))
}

fn timestamp_of(value: &Value, layout: Option<&str>) -> Result<Timestamp, ConvertError> {
    match value {
        Value::Nil => nil_or(TARGET, zero_timestamp()),
        Value::Timestamp(ts) => Ok(*ts),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) | Value::Isize(_) => {
            let n = super::int_of(value, TARGET)?;
            from_signed(value, n)
        }
        Value::U8(_)
        | Value::U16(_)
        | Value::U32(_)
        | Value::U64(_)
        | Value::Usize(_)
        | Value::Uintptr(_) => {
            let n = super::uint_of(value, TARGET)?;
            from_unix(value, n)
        }
        Value::String(s) => from_text(value, s, layout),
        Value::Bytes(b) => from_text(value, &text_of(b), layout),
        Value::Record(record) => {
            let mut fields = record
                .iter()
                .filter(|(info, _)| info.is_exported() && *info.ty() == TypeInfo::Timestamp);
            let Some((first, ts)) = fields.next() else {
                return Err(ConvertError::unsupported(value, TARGET));
            };
            if fields.next().is_some() {
                log::warn!(
                    "record `{}` has several timestamp fields, using `{}`",
                    record.info().name(),
                    first.name(),
                );
            }
            timestamp_of(ts, layout)
        }
        Value::Pointer(p) => with_target(p, TARGET, |v| timestamp_of(v, layout)),
        _ => Err(ConvertError::unsupported(value, TARGET)),
    }
}

fn from_signed(value: &Value, n: i64) -> Result<Timestamp, ConvertError> {
    match u64::try_from(n) {
        Ok(n) => from_unix(value, n),
        Err(_) => Err(ConvertError::invalid(value, TARGET, "negative unix time")),
    }
}

fn from_unix(value: &Value, n: u64) -> Result<Timestamp, ConvertError> {
    let utc: Option<DateTime<Utc>> = if n <= MAX_SECS {
        DateTime::from_timestamp(n as i64, 0)
    } else if n <= MAX_MILLIS {
        DateTime::from_timestamp_millis(n as i64)
    } else if n <= MAX_MICROS {
        DateTime::from_timestamp_micros(n as i64)
    } else {
        i64::try_from(n).ok().map(DateTime::from_timestamp_nanos)
    };

    utc.map(|ts| ts.fixed_offset())
        .ok_or_else(|| ConvertError::invalid(value, TARGET, "unix time out of range"))
}

fn from_text(value: &Value, text: &str, layout: Option<&str>) -> Result<Timestamp, ConvertError> {
    if let Ok(n) = text.parse::<i64>() {
        return from_signed(value, n);
    }
    let Some(layout) = layout else {
        return Err(ConvertError::invalid(
            value,
            TARGET,
            "not a unix time and no layout given",
        ));
    };
    parse_layout(text, layout).map_err(|e| ConvertError::invalid(value, TARGET, e))
}

/// Parses with an offset first, then as UTC date-time, then as UTC date.
fn parse_layout(text: &str, layout: &str) -> Result<Timestamp, chrono::ParseError> {
    let err = match DateTime::parse_from_str(text, layout) {
        Ok(ts) => return Ok(ts),
        Err(err) => err,
    };
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
        return Ok(date.and_time(NaiveTime::default()).and_utc().fixed_offset());
    }
    Err(err)
}
