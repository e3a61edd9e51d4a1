use alloc::string::ToString;
use alloc::vec::Vec;

use chrono::SecondsFormat;
use serde_core::ser::{SerializeMap, SerializeTuple};
use serde_core::{Serialize, Serializer};

use super::make_custom_error;

use crate::value::{Complex, Map, Pointer, Record, Value};

/// Serializes a [`Map`] with its entries ordered by the formatted key.
struct MapSerializer<'a> {
    map: &'a Map,
}

impl Serialize for MapSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.map.iter().collect();
        entries.sort_by_cached_key(|(key, _)| key.to_string());

        let mut state = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

/// Serializes the exported fields of a [`Record`] as a map.
struct RecordSerializer<'a> {
    record: &'a Record,
}

impl Serialize for RecordSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.record.info().iter().filter(|f| f.is_exported()).count();

        let mut state = serializer.serialize_map(Some(len))?;
        for (field, value) in self.record.iter().filter(|(field, _)| field.is_exported()) {
            state.serialize_entry(field.name(), value)?;
        }
        state.end()
    }
}

struct ComplexSerializer<T>(Complex<T>);

impl<T: Serialize> Serialize for ComplexSerializer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_tuple(2)?;
        state.serialize_element(&self.0.re)?;
        state.serialize_element(&self.0.im)?;
        state.end()
    }
}

fn serialize_pointer<S: Serializer>(pointer: &Pointer, serializer: S) -> Result<S::Ok, S::Error> {
    let Some(shared) = pointer.target() else {
        return serializer.serialize_unit();
    };
    let inner = shared
        .try_borrow()
        .map_err(|_| make_custom_error("pointer target is already borrowed"))?;
    inner.serialize(serializer)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::I8(v) => serializer.serialize_i8(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::Isize(v) => serializer.serialize_i64(*v as i64),
            Self::U8(v) => serializer.serialize_u8(*v),
            Self::U16(v) => serializer.serialize_u16(*v),
            Self::U32(v) => serializer.serialize_u32(*v),
            Self::U64(v) => serializer.serialize_u64(*v),
            Self::Usize(v) | Self::Uintptr(v) => serializer.serialize_u64(*v as u64),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::C64(v) => ComplexSerializer(*v).serialize(serializer),
            Self::C128(v) => ComplexSerializer(*v).serialize(serializer),
            Self::String(v) => serializer.serialize_str(v),
            Self::Bytes(v) => serializer.serialize_bytes(v),
            Self::Timestamp(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Array(array) => serializer.collect_seq(array.iter()),
            Self::List(list) => serializer.collect_seq(list.iter()),
            Self::Map(map) => MapSerializer { map }.serialize(serializer),
            Self::Record(record) => RecordSerializer { record }.serialize(serializer),
            Self::Pointer(pointer) => serialize_pointer(pointer, serializer),
        }
    }
}
