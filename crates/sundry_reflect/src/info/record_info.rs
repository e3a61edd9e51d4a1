use alloc::borrow::Cow;
use alloc::boxed::Box;

use sundry_utils::hash::HashMap;

use crate::info::FieldInfo;

/// A container for record info: a name and an ordered field table.
///
/// Two records have the same type when their names and field tables are equal.
///
/// # Examples
///
/// ```rust
/// use sundry_reflect::info::{FieldInfo, RecordInfo, TypeInfo};
///
/// let info = RecordInfo::new("Employee", [
///     FieldInfo::new("Name", TypeInfo::String),
///     FieldInfo::private("salary", TypeInfo::F64),
/// ]);
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("salary"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct RecordInfo {
    name: Cow<'static, str>,
    fields: Box<[FieldInfo]>,
    indices: HashMap<Cow<'static, str>, usize>,
}

impl RecordInfo {
    /// Create a new [`RecordInfo`].
    ///
    /// The order of fields is fixed and follows the input order. If a name
    /// occurs twice, lookups by name resolve to the first occurrence.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        fields: impl IntoIterator<Item = FieldInfo>,
    ) -> Self {
        let fields: Box<[FieldInfo]> = fields.into_iter().collect();
        let mut indices = HashMap::with_capacity_and_hasher(fields.len(), Default::default());
        for (index, field) in fields.iter().enumerate() {
            indices
                .entry(Cow::Owned(field.name().into()))
                .or_insert(index);
        }

        Self {
            name: name.into(),
            fields,
            indices,
        }
    }

    /// Returns the record type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`FieldInfo`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(self.index_of(name)?)
    }

    /// Returns the [`FieldInfo`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the index for the given field `name`, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}

impl PartialEq for RecordInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for RecordInfo {}

#[cfg(test)]
mod tests {
    use super::RecordInfo;
    use crate::info::{FieldInfo, TypeInfo, Visibility};

    #[test]
    fn first_duplicate_wins() {
        let info = RecordInfo::new(
            "Dup",
            [
                FieldInfo::new("A", TypeInfo::I8),
                FieldInfo::new("A", TypeInfo::U8),
            ],
        );
        assert_eq!(info.index_of("A"), Some(0));
        assert_eq!(info.field("A").map(FieldInfo::ty), Some(&TypeInfo::I8));
        assert_eq!(info.field_len(), 2);
    }

    #[test]
    fn declaration_order() {
        let info = RecordInfo::new(
            "Order",
            [
                FieldInfo::new("z", TypeInfo::Bool),
                FieldInfo::private("a", TypeInfo::Bool),
            ],
        );
        let names: alloc::vec::Vec<_> = info.iter().map(FieldInfo::name).collect();
        assert_eq!(names, ["z", "a"]);
        assert_eq!(info.field_at(1).map(FieldInfo::visibility), Some(Visibility::Private));
        assert_eq!(info.field("missing"), None);
    }
}
