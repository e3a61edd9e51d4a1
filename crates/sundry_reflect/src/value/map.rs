use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use sundry_utils::hash::{HashTable, fixed_hash};

use crate::info::TypeInfo;
use crate::value::Value;

/// An unordered association from key values to values.
///
/// Keys are hashed with [`fixed_hash`], so two maps built from the same
/// entries iterate in the same order. Key and value types are declared
/// but, like [`List`](super::List), not enforced on insertion.
///
/// # Examples
///
/// ```
/// use sundry_reflect::value::{Map, Value};
///
/// let mut map = Map::untyped();
/// map.insert("overtime", false);
///
/// assert_eq!(map.get(&Value::from("overtime")), Some(&Value::Bool(false)));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct Map {
    key: TypeInfo,
    value: TypeInfo,
    hash_table: HashTable<(Value, Value)>,
}

impl Map {
    /// Creates an empty map with the given key and value types.
    #[inline]
    pub const fn new(key: TypeInfo, value: TypeInfo) -> Self {
        Self {
            key,
            value,
            hash_table: HashTable::new(),
        }
    }

    /// Creates an empty `Map<String, Any>`.
    #[inline]
    pub const fn untyped() -> Self {
        Self::new(TypeInfo::String, TypeInfo::Any)
    }

    #[inline]
    pub const fn key_type(&self) -> &TypeInfo {
        &self.key
    }

    #[inline]
    pub const fn value_type(&self) -> &TypeInfo {
        &self.value
    }

    /// Returns the [`TypeInfo`] of this map.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::map(self.key.clone(), self.value.clone())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hash_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hash_table.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.hash_table
            .find(fixed_hash(key), Self::internal_eq(key))
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.hash_table
            .find_mut(fixed_hash(key), Self::internal_eq(key))
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a value, returning the previous value of the same key.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let hash = fixed_hash(&key);
        match self.hash_table.find_mut(hash, Self::internal_eq(&key)) {
            Some((_, old)) => Some(core::mem::replace(old, value)),
            None => {
                self.hash_table
                    .insert_unique(hash, (key, value), |(k, _)| fixed_hash(k));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[inline]
    pub fn with(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.hash_table
            .find_entry(fixed_hash(key), Self::internal_eq(key))
            .ok()
            .map(|entry| entry.remove().0.1)
    }

    /// Returns an iterator over all entries, in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.hash_table.iter().map(|(k, v)| (k, v))
    }

    /// Returns the entries sorted by the formatted form of their keys.
    pub fn sorted_entries(&self) -> Vec<(String, &Value)> {
        use alloc::string::ToString;

        let mut entries: Vec<_> = self.iter().map(|(k, v)| (k.to_string(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    #[inline]
    fn internal_eq(key: &Value) -> impl Fn(&(Value, Value)) -> bool + '_ {
        move |(other, _)| key == other
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Map;
    use crate::info::TypeInfo;
    use crate::value::Value;

    #[test]
    fn insert_replaces() {
        let mut map = Map::untyped();
        assert_eq!(map.insert("a", 1_i64), None);
        assert_eq!(map.insert("a", 2_i64), Some(Value::I64(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(&Value::from("a")), Some(Value::I64(2)));
        assert!(map.is_empty());
    }

    #[test]
    fn typed_keys() {
        let map = Map::new(TypeInfo::I32, TypeInfo::String)
            .with(7_i32, "seven")
            .with(8_i32, "eight");
        assert_eq!(map.get(&Value::I32(7)), Some(&Value::from("seven")));
        // keys are compared by exact variant
        assert_eq!(map.get(&Value::I64(7)), None);
        assert_eq!(map.type_info(), TypeInfo::map(TypeInfo::I32, TypeInfo::String));
    }

    #[test]
    fn equality_ignores_order() {
        let a = Map::untyped().with("x", 1_i64).with("y", 2_i64);
        let b = Map::untyped().with("y", 2_i64).with("x", 1_i64);
        assert_eq!(a, b);
        assert_ne!(a, Map::untyped().with("x", 1_i64));
    }

    #[test]
    fn sorted_by_key_text() {
        let map = Map::untyped().with("b", 1_i64).with("a", 2_i64);
        let keys: alloc::vec::Vec<_> = map.sorted_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
