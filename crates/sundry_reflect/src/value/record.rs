use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::{FieldInfo, RecordInfo, TypeInfo};
use crate::value::Value;

/// An instance of a record type: one value per declared field.
///
/// # Examples
///
/// ```
/// use sundry_reflect::info::{FieldInfo, RecordInfo, TypeInfo};
/// use sundry_reflect::value::{Record, Value};
///
/// let info = RecordInfo::new("Employee", [
///     FieldInfo::new("Name", TypeInfo::String),
///     FieldInfo::new("Age", TypeInfo::U8),
/// ]);
///
/// let bob = Record::new(info).with_field("Name", "Bob");
///
/// assert_eq!(bob.field("Name"), Some(&Value::from("Bob")));
/// assert_eq!(bob.field("Age"), Some(&Value::U8(0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    info: Arc<RecordInfo>,
    values: Box<[Value]>,
}

impl Record {
    /// Creates a record holding the zero value of every field.
    pub fn new(info: impl Into<Arc<RecordInfo>>) -> Self {
        let info = info.into();
        let values = info.iter().map(|f| f.ty().zero_value()).collect();
        Self { info, values }
    }

    /// Creates a record from values in declaration order.
    ///
    /// Returns `None` if the number of values does not match the field count.
    pub fn from_values(info: impl Into<Arc<RecordInfo>>, values: Vec<Value>) -> Option<Self> {
        let info = info.into();
        if info.field_len() != values.len() {
            return None;
        }
        Some(Self {
            info,
            values: values.into_boxed_slice(),
        })
    }

    /// Builder-style field assignment. Unknown names are ignored.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(slot) = self.field_mut(name) {
            *slot = value.into();
        }
        self
    }

    #[inline]
    pub fn info(&self) -> &Arc<RecordInfo> {
        &self.info
    }

    /// Returns the [`TypeInfo`] of this record.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::Record(self.info.clone())
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.values.get(self.info.index_of(name)?)
    }

    #[inline]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(self.info.index_of(name)?)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[inline]
    pub fn field_at_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    /// Returns `(info, value)` pairs in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&FieldInfo, &Value)> {
        self.info.iter().zip(self.values.iter())
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::info::{FieldInfo, RecordInfo, TypeInfo};
    use crate::value::Value;

    fn point() -> RecordInfo {
        RecordInfo::new(
            "Point",
            [
                FieldInfo::new("X", TypeInfo::I32),
                FieldInfo::private("y", TypeInfo::I32),
            ],
        )
    }

    #[test]
    fn from_values_checks_len() {
        assert!(Record::from_values(point(), alloc::vec![Value::I32(1)]).is_none());
        let p = Record::from_values(point(), alloc::vec![Value::I32(1), Value::I32(2)]);
        assert_eq!(p.and_then(|p| p.field("y").cloned()), Some(Value::I32(2)));
    }

    #[test]
    fn with_field_ignores_unknown() {
        let p = Record::new(point()).with_field("Z", 3_i32).with_field("X", 4_i32);
        assert_eq!(p.values(), &[Value::I32(4), Value::I32(0)]);
    }
}
