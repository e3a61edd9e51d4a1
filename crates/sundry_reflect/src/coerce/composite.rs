use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{ConvertError, convert, nil_or, with_target};
use crate::info::{RecordInfo, TypeInfo};
use crate::value::{Array, List, Map, Pointer, Record, Value};

/// Converts the items of any sequence.
fn convert_items<'a>(
    items: impl Iterator<Item = &'a Value>,
    item: &TypeInfo,
) -> Result<Vec<Value>, ConvertError> {
    items.map(|v| convert(v, item)).collect()
}

/// Converts to a [`List`] of `item`, element by element.
///
/// Arrays, lists and bytes are accepted.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_sequence;
/// use sundry_reflect::info::TypeInfo;
/// use sundry_reflect::value::{List, Value};
///
/// let source = Value::from(List::new(TypeInfo::Any).with("1").with(2.5_f64));
/// let list = to_sequence(&source, &TypeInfo::I32).unwrap();
///
/// assert_eq!(list.as_slice(), &[Value::I32(1), Value::I32(2)]);
/// ```
pub fn to_sequence(value: &Value, item: &TypeInfo) -> Result<List, ConvertError> {
    let target = || TypeInfo::list(item.clone());

    match value {
        Value::Nil => nil_or(&target(), List::new(item.clone())),
        Value::Array(a) => Ok(List::from_items(item.clone(), convert_items(a.iter(), item)?)),
        Value::List(l) => Ok(List::from_items(item.clone(), convert_items(l.iter(), item)?)),
        Value::Bytes(b) => {
            let items = b.iter().map(|byte| convert(&Value::U8(*byte), item));
            Ok(List::from_items(item.clone(), items.collect::<Result<Vec<_>, _>>()?))
        }
        Value::Pointer(p) => with_target(p, &target(), |v| to_sequence(v, item)),
        _ => Err(ConvertError::unsupported(value, &target())),
    }
}

/// Converts to an [`Array`] of `len` items.
///
/// The source length must equal `len`.
pub(crate) fn array_of(value: &Value, item: &TypeInfo, len: usize) -> Result<Array, ConvertError> {
    let target = || TypeInfo::array(item.clone(), len);

    let items = match value {
        Value::Nil => return nil_or(&target(), Array::new(item.clone(), len)),
        Value::Pointer(p) => return with_target(p, &target(), |v| array_of(v, item, len)),
        Value::Array(_) | Value::List(_) | Value::Bytes(_) => to_sequence(value, item)?.into_items(),
        _ => return Err(ConvertError::unsupported(value, &target())),
    };

    if items.len() != len {
        return Err(ConvertError::invalid(
            value,
            &target(),
            alloc::format!("expected {len} items, found {}", items.len()),
        ));
    }
    Ok(Array::from_items(item.clone(), items))
}

/// Converts to a [`Map`], coercing every key and every value.
pub fn to_mapping(value: &Value, key: &TypeInfo, val: &TypeInfo) -> Result<Map, ConvertError> {
    let target = || TypeInfo::map(key.clone(), val.clone());

    match value {
        Value::Nil => nil_or(&target(), Map::new(key.clone(), val.clone())),
        Value::Map(source) => {
            let mut map = Map::new(key.clone(), val.clone());
            for (k, v) in source.iter() {
                map.insert(convert(k, key)?, convert(v, val)?);
            }
            Ok(map)
        }
        Value::Pointer(p) => with_target(p, &target(), |v| to_mapping(v, key, val)),
        _ => Err(ConvertError::unsupported(value, &target())),
    }
}

/// Converts to a [`Record`] of type `info`.
///
/// A record of the same type is returned as is. Otherwise the first exported
/// field declared with type `info` is returned; nested records are not searched.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use sundry_reflect::coerce::to_record;
/// use sundry_reflect::info::{FieldInfo, RecordInfo, TypeInfo};
/// use sundry_reflect::value::{Record, Value};
///
/// let address = Arc::new(RecordInfo::new("Address", [FieldInfo::new("City", TypeInfo::String)]));
/// let person = RecordInfo::new("Person", [FieldInfo::new("Home", TypeInfo::record(address.clone()))]);
///
/// let home = Record::new(address.clone()).with_field("City", "Lyon");
/// let bob = Value::from(Record::new(person).with_field("Home", home.clone()));
///
/// assert_eq!(to_record(&bob, &address).unwrap(), home);
/// ```
pub fn to_record(value: &Value, info: &Arc<RecordInfo>) -> Result<Record, ConvertError> {
    let target = || TypeInfo::Record(info.clone());

    match value {
        Value::Nil => nil_or(&target(), Record::new(info.clone())),
        Value::Record(record) if Arc::ptr_eq(record.info(), info) || **record.info() == **info => {
            Ok(record.clone())
        }
        Value::Record(record) => {
            let wanted = target();
            let found = record
                .iter()
                .find(|(field, _)| field.is_exported() && *field.ty() == wanted);
            match found {
                Some((_, Value::Record(inner))) => Ok(inner.clone()),
                Some((_, inner)) => to_record(inner, info),
                None => Err(ConvertError::unsupported(value, &wanted)),
            }
        }
        Value::Pointer(p) => with_target(p, &target(), |v| to_record(v, info)),
        _ => Err(ConvertError::unsupported(value, &target())),
    }
}

/// Converts to a [`Pointer`] to `pointee`.
///
/// The source is dereferenced, converted to `pointee` and stored in a fresh
/// location. Nil and nil pointers convert to a nil pointer.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::to_indirection;
/// use sundry_reflect::info::TypeInfo;
/// use sundry_reflect::value::Value;
///
/// let p = to_indirection(&Value::from("7"), &TypeInfo::U8).unwrap();
/// assert_eq!(p.get(), Some(Value::U8(7)));
///
/// assert!(to_indirection(&Value::Nil, &TypeInfo::U8).unwrap().is_nil());
/// ```
pub fn to_indirection(value: &Value, pointee: &TypeInfo) -> Result<Pointer, ConvertError> {
    match value {
        Value::Nil => Ok(Pointer::nil(pointee.clone())),
        Value::Pointer(p) if p.is_nil() => Ok(Pointer::nil(pointee.clone())),
        Value::Pointer(p) => with_target(p, &TypeInfo::pointer(pointee.clone()), |v| {
            Ok(Pointer::new(pointee.clone(), convert(v, pointee)?))
        }),
        _ => Ok(Pointer::new(pointee.clone(), convert(value, pointee)?)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{array_of, to_indirection, to_mapping, to_record, to_sequence};
    use crate::ErrorKind;
    use crate::info::{FieldInfo, RecordInfo, TypeInfo};
    use crate::value::{Array, List, Map, Pointer, Record, Value};

    #[test]
    fn sequences_convert_items() {
        let array = Value::from(Array::from_items(
            TypeInfo::String,
            vec![Value::from("true"), Value::from("FALSE")],
        ));
        let list = to_sequence(&array, &TypeInfo::Bool).unwrap();
        assert_eq!(list.as_slice(), &[Value::Bool(true), Value::Bool(false)]);
        assert_eq!(list.item(), &TypeInfo::Bool);

        let mixed = Value::from(List::new(TypeInfo::String).with("true").with("1"));
        let err = to_sequence(&mixed, &TypeInfo::Bool).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConvertFailure);

        let bytes = to_sequence(&Value::Bytes(vec![1, 2]), &TypeInfo::I64).unwrap();
        assert_eq!(bytes.as_slice(), &[Value::I64(1), Value::I64(2)]);

        let err = to_sequence(&Value::from("12"), &TypeInfo::U8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConvertFailure);
    }

    #[test]
    fn arrays_need_equal_length() {
        let list = Value::from(List::new(TypeInfo::Any).with(1_i64).with(2_i64));
        let array = array_of(&list, &TypeInfo::U8, 2).unwrap();
        assert_eq!(array.as_slice(), &[Value::U8(1), Value::U8(2)]);
        assert!(array_of(&list, &TypeInfo::U8, 3).is_err());
    }

    #[test]
    fn mappings_convert_keys_and_values() {
        let map = Value::from(Map::untyped().with("1", "true").with("2", 0_i64));
        let converted = to_mapping(&map, &TypeInfo::U16, &TypeInfo::Bool).unwrap();
        assert_eq!(converted.get(&Value::U16(1)), Some(&Value::Bool(true)));
        assert_eq!(converted.get(&Value::U16(2)), Some(&Value::Bool(false)));
        assert!(to_mapping(&Value::untyped_list(), &TypeInfo::String, &TypeInfo::Any).is_err());
    }

    #[test]
    fn records_match_exported_fields_only() {
        let inner = Arc::new(RecordInfo::new("Inner", [FieldInfo::new("V", TypeInfo::I8)]));
        let outer = RecordInfo::new(
            "Outer",
            [
                FieldInfo::private("hidden", TypeInfo::record(inner.clone())),
                FieldInfo::new("Shown", TypeInfo::record(inner.clone())),
            ],
        );
        let hidden = Record::new(inner.clone()).with_field("V", 1_i8);
        let shown = Record::new(inner.clone()).with_field("V", 2_i8);
        let value = Value::from(
            Record::new(outer)
                .with_field("hidden", hidden)
                .with_field("Shown", shown.clone()),
        );
        assert_eq!(to_record(&value, &inner).unwrap(), shown);

        let same = Value::from(shown.clone());
        assert_eq!(to_record(&same, &inner).unwrap(), shown);

        let other = Arc::new(RecordInfo::new("Other", Vec::<FieldInfo>::new()));
        assert_eq!(to_record(&value, &other).unwrap_err().kind(), ErrorKind::ConvertFailure);
    }

    #[test]
    fn indirection() {
        let nil = Value::Pointer(Pointer::nil(TypeInfo::I8));
        assert!(to_indirection(&nil, &TypeInfo::I64).unwrap().is_nil());

        let p = Value::Pointer(Pointer::new(TypeInfo::String, "5"));
        let converted = to_indirection(&p, &TypeInfo::I64).unwrap();
        assert_eq!(converted.get(), Some(Value::I64(5)));
        assert_eq!(converted, to_indirection(&Value::from("5"), &TypeInfo::I64).unwrap());

        // the result never aliases the source
        if let (Value::Pointer(source), Some(target)) = (&p, converted.target()) {
            assert!(!source.target().is_some_and(|s| alloc::rc::Rc::ptr_eq(s, target)));
        }
    }
}
