use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

use serde_core::de::{Error, MapAccess, SeqAccess, Visitor};
use serde_core::{Deserialize, Deserializer};

use crate::coerce::to_string;
use crate::info::TypeInfo;
use crate::value::{List, Map, Value};

/// A [`Visitor`] building untyped [`Value`]s.
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    #[inline]
    fn visit_bool<E: Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn visit_i64<E: Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    #[inline]
    fn visit_u64<E: Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::U64(v), Value::I64))
    }

    #[inline]
    fn visit_f64<E: Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    #[inline]
    fn visit_str<E: Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_string<E: Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    #[inline]
    fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_byte_buf<E: Error>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(v))
    }

    #[inline]
    fn visit_none<E: Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    #[inline]
    fn visit_unit<E: Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<Value, V::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::List(List::from_items(TypeInfo::Any, items)))
    }

    fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<Value, V::Error> {
        let mut dynamic = Map::untyped();
        while let Some(key) = map.next_key::<Value>()? {
            let key = to_string(&key).map_err(V::Error::custom)?;
            let value = map.next_value::<Value>()?;
            dynamic.insert(key, value);
        }
        Ok(Value::Map(dynamic))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
