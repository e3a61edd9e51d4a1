//! A collection of small utility crates.
//!
//! The interesting part lives in [`reflect`]: a path accessor that reads and
//! writes nested values inside dynamic data graphs, coercing them on the way out.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sundry_reflect as reflect;
pub use sundry_utils as utils;
