//! Provide runtime type descriptors for dynamic values.
//!
//! ## Menu
//!
//! - [`TypeInfo`]: A closed enum describing the declared type of a slot in a data graph.
//!     - Scalars are unit variants, e.g. `TypeInfo::I32`, `TypeInfo::String`.
//!     - Composite variants carry an `Arc`-shared descriptor:
//!         - [`ArrayInfo`]: fixed-length sequence, item type and length.
//!         - [`ListInfo`]: growable sequence, item type.
//!         - [`MapInfo`]: key type and value type.
//!         - [`RecordInfo`]: record name and an ordered field table.
//!         - [`PointerInfo`]: pointee type.
//!     - `TypeInfo::Any` accepts every value; its concrete shape is discovered when visited.
//!
//! - [`FieldInfo`]: A record field: name, declared type and [`Visibility`].
//!
//! - [`Kind`]: A fast discriminator over `TypeInfo` and [`Value`](crate::value::Value),
//!   used by the coercion kernel for dispatch and by errors for reporting.

// -----------------------------------------------------------------------------
// Modules

mod collection_info;
mod field_info;
mod record_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use collection_info::{ArrayInfo, ListInfo, MapInfo, PointerInfo};
pub use field_info::{FieldInfo, Visibility};
pub use record_info::RecordInfo;
pub use type_info::{Kind, KindError, TypeInfo};
