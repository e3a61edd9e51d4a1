//! `serde` support for [`Value`](crate::value::Value).
//!
//! ## Serialization
//!
//! Every value serializes through its natural data-model form:
//!
//! - Nil and nil pointers become unit (`null` in JSON).
//! - Complex numbers become a `(re, im)` tuple.
//! - Timestamps become RFC 3339 strings.
//! - Sequences become sequences, maps become maps with entries ordered by key.
//! - Records become maps of their exported fields.
//! - Pointers serialize their target.
//!
//! ## Deserialization
//!
//! Without type information the result is untyped: objects become
//! `Map<String, Any>`, arrays become `List<Any>`, integers become `I64` unless
//! they only fit `U64`, and floats become `F64`.
//!
//! ```
//! use sundry_reflect::value::Value;
//!
//! let value: Value = serde_json::from_str(r#"{ "ports": [8080, 8081] }"#).unwrap();
//! assert_eq!(value.to_string(), "map[ports:[8080 8081]]");
//! assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"ports":[8080,8081]}"#);
//! ```

mod de;
mod ser;

use core::fmt::Display;

/// Builds a custom `serde` error from a message.
#[inline]
fn make_custom_error<E: serde_core::ser::Error>(msg: impl Display) -> E {
    E::custom(msg)
}
