use chrono::{DateTime, FixedOffset};

/// An instant with wall-clock semantics and the offset of its location.
///
/// Timestamps derived from integers are in UTC.
pub type Timestamp = DateTime<FixedOffset>;

/// Seconds from the UNIX epoch to `0001-01-01T00:00:00Z`.
const ZERO_UNIX_SECS: i64 = -62_135_596_800;

/// Returns the zero timestamp, `0001-01-01T00:00:00Z`.
///
/// # Examples
///
/// ```
/// use sundry_reflect::value::zero_timestamp;
///
/// assert_eq!(zero_timestamp().to_rfc3339(), "0001-01-01T00:00:00+00:00");
/// ```
#[inline]
pub fn zero_timestamp() -> Timestamp {
    DateTime::from_timestamp(ZERO_UNIX_SECS, 0)
        .unwrap_or_default()
        .fixed_offset()
}

/// Returns `true` if `ts` is the same instant as [`zero_timestamp`].
#[inline]
pub fn is_zero_timestamp(ts: &Timestamp) -> bool {
    ts.timestamp() == ZERO_UNIX_SECS && ts.timestamp_subsec_nanos() == 0
}
