use alloc::sync::Arc;
use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, ListInfo, MapInfo, PointerInfo, RecordInfo};
use crate::value::{Array, List, Map, Pointer, Record, Value, zero_timestamp};

// -----------------------------------------------------------------------------
// Kind

/// An enumeration of the "kinds" of a type or value.
///
/// Every width of an integer shares one kind, e.g. `i8` and `i64` are both
/// [`Kind::Int`]. A `Nil` value reports [`Kind::Any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    String,
    Bytes,
    Timestamp,
    Array,
    List,
    Map,
    Record,
    Pointer,
    Any,
}

impl Kind {
    /// Returns `true` for kinds that hold a single, non-composite value.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Int
                | Self::Uint
                | Self::Float
                | Self::Complex
                | Self::String
                | Self::Bytes
        )
    }

    /// Returns `true` for [`Kind::Array`] and [`Kind::List`].
    #[inline]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::Array | Self::List)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.pad("Bool"),
            Self::Int => f.pad("Int"),
            Self::Uint => f.pad("Uint"),
            Self::Float => f.pad("Float"),
            Self::Complex => f.pad("Complex"),
            Self::String => f.pad("String"),
            Self::Bytes => f.pad("Bytes"),
            Self::Timestamp => f.pad("Timestamp"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Record => f.pad("Record"),
            Self::Pointer => f.pad("Pointer"),
            Self::Any => f.pad("Any"),
        }
    }
}

/// Error returned when a `TypeInfo` is not the expected [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("kind mismatch: expected {expected}, received {received}")]
pub struct KindError {
    pub expected: Kind,
    pub received: Kind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The declared type of a slot in a data graph.
///
/// This replaces runtime reflection: containers carry the `TypeInfo` of their
/// items, records carry a field table, and the coercion kernel dispatches on
/// the target's `TypeInfo`.
///
/// Composite descriptors are behind an `Arc`, so cloning a `TypeInfo` is cheap.
///
/// # Examples
///
/// ```
/// use sundry_reflect::info::{Kind, TypeInfo};
///
/// let info = TypeInfo::map(TypeInfo::String, TypeInfo::list(TypeInfo::U16));
///
/// assert_eq!(info.kind(), Kind::Map);
/// assert_eq!(info.to_string(), "Map<String, List<u16>>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    Uintptr,
    F32,
    F64,
    C64,
    C128,
    String,
    Bytes,
    Timestamp,
    Array(Arc<ArrayInfo>),
    List(Arc<ListInfo>),
    Map(Arc<MapInfo>),
    Record(Arc<RecordInfo>),
    Pointer(Arc<PointerInfo>),
    Any,
}

// Helper macro that implements type-safe accessor methods like `as_record`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: Kind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_record: Record => RecordInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);

    /// Creates a fixed-length sequence type.
    #[inline]
    pub fn array(item: TypeInfo, len: usize) -> Self {
        Self::Array(Arc::new(ArrayInfo::new(item, len)))
    }

    /// Creates a growable sequence type.
    #[inline]
    pub fn list(item: TypeInfo) -> Self {
        Self::List(Arc::new(ListInfo::new(item)))
    }

    /// Creates a mapping type.
    #[inline]
    pub fn map(key: TypeInfo, value: TypeInfo) -> Self {
        Self::Map(Arc::new(MapInfo::new(key, value)))
    }

    /// Creates a record type.
    #[inline]
    pub fn record(info: impl Into<Arc<RecordInfo>>) -> Self {
        Self::Record(info.into())
    }

    /// Creates a pointer type.
    #[inline]
    pub fn pointer(pointee: TypeInfo) -> Self {
        Self::Pointer(Arc::new(PointerInfo::new(pointee)))
    }

    /// `Map<String, Any>`, the shape auto-created for intermediate names.
    #[inline]
    pub fn untyped_map() -> Self {
        Self::map(Self::String, Self::Any)
    }

    /// `List<Any>`, the shape auto-created for intermediate indices.
    #[inline]
    pub fn untyped_list() -> Self {
        Self::list(Self::Any)
    }

    /// Returns the [`Kind`] of this type (a fast discriminator).
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool => Kind::Bool,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize => Kind::Int,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize | Self::Uintptr => {
                Kind::Uint
            }
            Self::F32 | Self::F64 => Kind::Float,
            Self::C64 | Self::C128 => Kind::Complex,
            Self::String => Kind::String,
            Self::Bytes => Kind::Bytes,
            Self::Timestamp => Kind::Timestamp,
            Self::Array(_) => Kind::Array,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Record(_) => Kind::Record,
            Self::Pointer(_) => Kind::Pointer,
            Self::Any => Kind::Any,
        }
    }

    /// Returns the item type of arrays and lists, or the pointee type of pointers.
    pub fn item(&self) -> Option<&TypeInfo> {
        match self {
            Self::Array(info) => Some(info.item()),
            Self::List(info) => Some(info.item()),
            Self::Pointer(info) => Some(info.pointee()),
            _ => None,
        }
    }

    /// Builds the zero value of this type.
    ///
    /// Lists and maps are empty, records hold the zero value of every field,
    /// pointers are nil and `Any` is [`Value::Nil`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sundry_reflect::{info::TypeInfo, value::Value};
    ///
    /// assert_eq!(TypeInfo::I16.zero_value(), Value::I16(0));
    /// assert_eq!(TypeInfo::Any.zero_value(), Value::Nil);
    /// ```
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::I8 => Value::I8(0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::Isize => Value::Isize(0),
            Self::U8 => Value::U8(0),
            Self::U16 => Value::U16(0),
            Self::U32 => Value::U32(0),
            Self::U64 => Value::U64(0),
            Self::Usize => Value::Usize(0),
            Self::Uintptr => Value::Uintptr(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::C64 => Value::C64(Default::default()),
            Self::C128 => Value::C128(Default::default()),
            Self::String => Value::String(Default::default()),
            Self::Bytes => Value::Bytes(Default::default()),
            Self::Timestamp => Value::Timestamp(zero_timestamp()),
            Self::Array(info) => Value::Array(Array::new(info.item().clone(), info.len())),
            Self::List(info) => Value::List(List::new(info.item().clone())),
            Self::Map(info) => Value::Map(Map::new(info.key().clone(), info.value().clone())),
            Self::Record(info) => Value::Record(Record::new(info.clone())),
            Self::Pointer(info) => Value::Pointer(Pointer::nil(info.pointee().clone())),
            Self::Any => Value::Nil,
        }
    }
}

impl From<RecordInfo> for TypeInfo {
    #[inline]
    fn from(value: RecordInfo) -> Self {
        Self::Record(Arc::new(value))
    }
}

impl From<Arc<RecordInfo>> for TypeInfo {
    #[inline]
    fn from(value: Arc<RecordInfo>) -> Self {
        Self::Record(value)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::I8 => f.write_str("i8"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::Isize => f.write_str("isize"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::Usize => f.write_str("usize"),
            Self::Uintptr => f.write_str("uintptr"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::C64 => f.write_str("c64"),
            Self::C128 => f.write_str("c128"),
            Self::String => f.write_str("String"),
            Self::Bytes => f.write_str("Bytes"),
            Self::Timestamp => f.write_str("Timestamp"),
            Self::Array(info) => write!(f, "[{}; {}]", info.item(), info.len()),
            Self::List(info) => write!(f, "List<{}>", info.item()),
            Self::Map(info) => write!(f, "Map<{}, {}>", info.key(), info.value()),
            Self::Record(info) => f.write_str(info.name()),
            Self::Pointer(info) => write!(f, "Ptr<{}>", info.pointee()),
            Self::Any => f.write_str("Any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Kind, TypeInfo};
    use crate::info::{FieldInfo, RecordInfo};

    #[test]
    fn kinds_group_widths() {
        assert_eq!(TypeInfo::I8.kind(), TypeInfo::Isize.kind());
        assert_eq!(TypeInfo::Uintptr.kind(), Kind::Uint);
        assert_eq!(TypeInfo::untyped_list().kind(), Kind::List);
        assert!(Kind::Bytes.is_scalar());
        assert!(!Kind::Timestamp.is_scalar());
        assert!(Kind::Array.is_sequence());
    }

    #[test]
    fn cast_reports_kinds() {
        let info = TypeInfo::array(TypeInfo::F32, 3);
        assert_eq!(info.as_array().map(|a| a.len()), Ok(3));

        let err = info.as_map().unwrap_err();
        assert_eq!(err.expected, Kind::Map);
        assert_eq!(err.received, Kind::Array);
    }

    #[test]
    fn display_names() {
        let point = RecordInfo::new("Point", [FieldInfo::new("X", TypeInfo::I32)]);
        let info = TypeInfo::pointer(TypeInfo::array(TypeInfo::record(point), 2));
        assert_eq!(info.to_string(), "Ptr<[Point; 2]>");
        assert_eq!(TypeInfo::untyped_map().to_string(), "Map<String, Any>");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(TypeInfo::list(TypeInfo::U8), TypeInfo::list(TypeInfo::U8));
        assert_ne!(TypeInfo::list(TypeInfo::U8), TypeInfo::list(TypeInfo::I8));
        assert_ne!(TypeInfo::array(TypeInfo::U8, 2), TypeInfo::array(TypeInfo::U8, 3));
    }
}
