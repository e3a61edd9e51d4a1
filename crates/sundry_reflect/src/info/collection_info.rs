use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// ArrayInfo

/// A container for fixed-length sequence info.
///
/// Arrays can be read and written by index, but never grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayInfo {
    item: TypeInfo,
    len: usize,
}

impl ArrayInfo {
    /// Creates a new [`ArrayInfo`].
    #[inline]
    pub const fn new(item: TypeInfo, len: usize) -> Self {
        Self { item, len }
    }

    /// Returns the declared type of the items.
    #[inline]
    pub const fn item(&self) -> &TypeInfo {
        &self.item
    }

    /// Returns the fixed length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// A container for growable sequence info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInfo {
    item: TypeInfo,
}

impl ListInfo {
    /// Creates a new [`ListInfo`].
    #[inline]
    pub const fn new(item: TypeInfo) -> Self {
        Self { item }
    }

    /// Returns the declared type of the items.
    #[inline]
    pub const fn item(&self) -> &TypeInfo {
        &self.item
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// A container for mapping info.
///
/// Paths address entries by name, so keys that are not strings are reached
/// by coercing the name to the key type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo {
    key: TypeInfo,
    value: TypeInfo,
}

impl MapInfo {
    /// Creates a new [`MapInfo`].
    #[inline]
    pub const fn new(key: TypeInfo, value: TypeInfo) -> Self {
        Self { key, value }
    }

    /// Returns the declared key type.
    #[inline]
    pub const fn key(&self) -> &TypeInfo {
        &self.key
    }

    /// Returns the declared value type.
    #[inline]
    pub const fn value(&self) -> &TypeInfo {
        &self.value
    }
}

// -----------------------------------------------------------------------------
// PointerInfo

/// A container for pointer info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerInfo {
    pointee: TypeInfo,
}

impl PointerInfo {
    /// Creates a new [`PointerInfo`].
    #[inline]
    pub const fn new(pointee: TypeInfo) -> Self {
        Self { pointee }
    }

    /// Returns the declared type of the pointed-to value.
    #[inline]
    pub const fn pointee(&self) -> &TypeInfo {
        &self.pointee
    }
}
