use alloc::boxed::Box;
use alloc::vec::Vec;
use core::slice;

use crate::info::TypeInfo;
use crate::value::Value;

// -----------------------------------------------------------------------------
// List

/// A growable sequence of values sharing one declared item type.
///
/// The item type is not enforced on insertion; values written through an
/// [`Accessor`](crate::access::Accessor) are coerced to it first.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    item: TypeInfo,
    items: Vec<Value>,
}

impl List {
    /// Creates an empty list.
    #[inline]
    pub const fn new(item: TypeInfo) -> Self {
        Self {
            item,
            items: Vec::new(),
        }
    }

    /// Creates a list from existing items.
    #[inline]
    pub fn from_items(item: TypeInfo, items: impl Into<Vec<Value>>) -> Self {
        Self {
            item,
            items: items.into(),
        }
    }

    /// Returns the declared item type.
    #[inline]
    pub const fn item(&self) -> &TypeInfo {
        &self.item
    }

    /// Returns the [`TypeInfo`] of this list.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::list(self.item.clone())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Appends a value to the end of the list.
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Builder-style [`push`](Self::push).
    #[inline]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.items.push(value.into());
        self
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.items
    }

    #[inline]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// -----------------------------------------------------------------------------
// Array

/// A fixed-length sequence of values sharing one declared item type.
///
/// Elements can be replaced but the length never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    item: TypeInfo,
    items: Box<[Value]>,
}

impl Array {
    /// Creates an array of `len` zero values.
    pub fn new(item: TypeInfo, len: usize) -> Self {
        let items = (0..len).map(|_| item.zero_value()).collect();
        Self { item, items }
    }

    /// Creates an array from existing items; the length is taken from `items`.
    #[inline]
    pub fn from_items(item: TypeInfo, items: impl Into<Box<[Value]>>) -> Self {
        Self {
            item,
            items: items.into(),
        }
    }

    /// Returns the declared item type.
    #[inline]
    pub const fn item(&self) -> &TypeInfo {
        &self.item
    }

    /// Returns the [`TypeInfo`] of this array.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::array(self.item.clone(), self.items.len())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.items
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
