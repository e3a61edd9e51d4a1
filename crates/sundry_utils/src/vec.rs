//! Re-exports [`fastvec`]'s containers.
//!
//! Path parsing collects steps into a [`FastVec`] before freezing them,
//! which keeps short paths off the heap until the final boxed slice.

pub use fastvec::{FastVec, fast_vec};
