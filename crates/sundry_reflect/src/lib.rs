//! Reads and writes nested values inside dynamic data graphs by textual path.
//!
//! A graph is built from [`Value`](value::Value)s: scalars, timestamps and the
//! composite shapes array, list, map, record and shared pointer. Every slot has
//! a declared [`TypeInfo`](info::TypeInfo), and values entering a slot are
//! coerced to it by the [`coerce`] kernel.
//!
//! The [`access::Accessor`] wraps a root and resolves paths such as
//! `Employees[0].Name` against it, creating missing intermediate nodes
//! on write.
//!
//! ```
//! use sundry_reflect::access::Accessor;
//! use sundry_reflect::value::Value;
//!
//! let mut acc = Accessor::wrap(Value::untyped_map()).unwrap();
//! acc.set("server.ports[]", 8080_i64).unwrap();
//! acc.set("server.ports[]", "8081").unwrap();
//!
//! assert_eq!(acc.get_as::<u16>("server.ports[1]").unwrap(), Some(8081));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod access;
pub mod coerce;
pub mod info;
pub mod serde;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::ErrorKind;
