use alloc::borrow::Cow;

use crate::info::TypeInfo;

/// Whether a record field can be reached through any root.
///
/// Private fields are only visible when the record is reached through an
/// addressable root or a pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Exported,
    Private,
}

/// Information for a named record field.
///
/// # Examples
///
/// ```
/// use sundry_reflect::info::{FieldInfo, TypeInfo, Visibility};
///
/// let field = FieldInfo::private("salary", TypeInfo::F64);
///
/// assert_eq!(field.name(), "salary");
/// assert_eq!(field.visibility(), Visibility::Private);
/// assert!(!field.is_exported());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    name: Cow<'static, str>,
    ty: TypeInfo,
    visibility: Visibility,
}

impl FieldInfo {
    /// Creates a new exported [`FieldInfo`].
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeInfo) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Exported,
        }
    }

    /// Creates a new private [`FieldInfo`].
    #[inline]
    pub fn private(name: impl Into<Cow<'static, str>>, ty: TypeInfo) -> Self {
        Self::new(name, ty).with_visibility(Visibility::Private)
    }

    /// Replaces the visibility.
    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field's declared type.
    #[inline]
    pub const fn ty(&self) -> &TypeInfo {
        &self.ty
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn is_exported(&self) -> bool {
        matches!(self.visibility, Visibility::Exported)
    }
}
