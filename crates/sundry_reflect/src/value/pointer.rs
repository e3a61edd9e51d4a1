use alloc::rc::Rc;
use core::cell::RefCell;

use crate::info::TypeInfo;
use crate::value::Value;

/// A shared, mutable location holding a value of the pointee type.
///
/// Cloning a pointer shares its target: a write through one clone is seen by
/// every other. Pointers are the only way to build a graph where one node is
/// reachable from several parents.
///
/// Not thread-safe.
///
/// # Examples
///
/// ```
/// use sundry_reflect::info::TypeInfo;
/// use sundry_reflect::value::{Pointer, Value};
///
/// let a = Pointer::new(TypeInfo::I64, 1_i64);
/// let b = a.clone();
///
/// if let Some(target) = b.target() {
///     *target.borrow_mut() = Value::I64(2);
/// }
/// assert_eq!(a.get(), Some(Value::I64(2)));
/// ```
#[derive(Debug, Clone)]
pub struct Pointer {
    pointee: TypeInfo,
    target: Option<Rc<RefCell<Value>>>,
}

impl Pointer {
    /// Creates a nil pointer.
    #[inline]
    pub const fn nil(pointee: TypeInfo) -> Self {
        Self {
            pointee,
            target: None,
        }
    }

    /// Creates a pointer to a fresh location holding `value`.
    #[inline]
    pub fn new(pointee: TypeInfo, value: impl Into<Value>) -> Self {
        Self::from_shared(pointee, Rc::new(RefCell::new(value.into())))
    }

    /// Creates a pointer to an existing location.
    #[inline]
    pub const fn from_shared(pointee: TypeInfo, target: Rc<RefCell<Value>>) -> Self {
        Self {
            pointee,
            target: Some(target),
        }
    }

    #[inline]
    pub const fn pointee(&self) -> &TypeInfo {
        &self.pointee
    }

    /// Returns the [`TypeInfo`] of this pointer.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::pointer(self.pointee.clone())
    }

    #[inline]
    pub const fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    #[inline]
    pub fn target(&self) -> Option<&Rc<RefCell<Value>>> {
        self.target.as_ref()
    }

    /// Returns a copy of the pointed-to value.
    ///
    /// `None` for nil pointers and for targets that are mutably borrowed.
    pub fn get(&self) -> Option<Value> {
        let target = self.target.as_ref()?;
        target.try_borrow().ok().map(|v| v.clone())
    }
}

impl PartialEq for Pointer {
    /// Pointers are equal when they have the same pointee type and
    /// point at equal values (or are both nil).
    fn eq(&self, other: &Self) -> bool {
        if self.pointee != other.pointee {
            return false;
        }
        match (&self.target, &other.target) {
            (None, None) => true,
            (Some(a), Some(b)) if Rc::ptr_eq(a, b) => true,
            (Some(a), Some(b)) => match (a.try_borrow(), b.try_borrow()) {
                (Ok(a), Ok(b)) => *a == *b,
                _ => false,
            },
            _ => false,
        }
    }
}
