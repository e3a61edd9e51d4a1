//! Read-only descent through a graph.

use alloc::string::ToString;

use crate::access::AccessError;
use crate::access::cursor::Cursor;
use crate::access::path::Step;
use crate::coerce::{ConvertError, convert};
use crate::info::TypeInfo;
use crate::value::{Map, Value};

/// Parses the text of an index step.
///
/// Negative values parse; callers decide how to treat them.
pub(super) fn parse_index(cursor: &Cursor<'_>, step: &Step<'_>, raw: &str) -> Result<isize, AccessError> {
    raw.parse().map_err(|_| AccessError::IndexParse {
        at: cursor.path(),
        step: step.to_string(),
    })
}

/// Builds the key addressed by `name` in `map`.
pub(super) fn map_key(map: &Map, name: &str) -> Result<Value, ConvertError> {
    match map.key_type() {
        TypeInfo::String | TypeInfo::Any => Ok(Value::from(name)),
        key => convert(&Value::from(name), key),
    }
}

pub(super) fn shape_mismatch(cursor: &Cursor<'_>, step: &Step<'_>, node: &Value) -> AccessError {
    AccessError::ShapeMismatch {
        at: cursor.path(),
        step: step.to_string(),
        actual: node.kind(),
    }
}

/// Returns a copy of the node at `steps` below `node`.
///
/// Missing keys and fields, nil nodes, out-of-range indices, hidden private
/// fields and `[]` all resolve to `None`. Applying a step to a node of the
/// wrong shape is an error.
pub(super) fn read(
    node: &Value,
    cursor: &Cursor<'_>,
    steps: &[Step<'_>],
) -> Result<Option<Value>, AccessError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(Some(node.clone()));
    };

    if let Value::Pointer(pointer) = node {
        let Some(shared) = pointer.target() else {
            return Ok(None);
        };
        let inner = shared
            .try_borrow()
            .map_err(|_| AccessError::BorrowConflict { at: cursor.path() })?;
        return read(&inner, &cursor.deref(), steps);
    }

    match (node, step) {
        (Value::Nil, _) | (_, Step::Append) => Ok(None),
        (Value::Map(map), Step::Name(name)) => {
            let Ok(key) = map_key(map, name) else {
                return Ok(None);
            };
            match map.get(&key) {
                Some(child) => read(child, &cursor.entry(step), rest),
                None => Ok(None),
            }
        }
        (Value::Record(record), Step::Name(name)) => {
            let Some(index) = record.info().index_of(name) else {
                return Ok(None);
            };
            let visible = record
                .info()
                .field_at(index)
                .is_some_and(|f| f.is_exported() || cursor.by_ref());
            match record.field_at(index) {
                Some(child) if visible => read(child, &cursor.field(step), rest),
                _ => Ok(None),
            }
        }
        (Value::List(list), Step::Index(raw)) => {
            let index = parse_index(cursor, step, raw)?;
            match usize::try_from(index).ok().and_then(|i| list.get(i)) {
                Some(child) => read(child, &cursor.entry(step), rest),
                None => Ok(None),
            }
        }
        (Value::Array(array), Step::Index(raw)) => {
            let index = parse_index(cursor, step, raw)?;
            match usize::try_from(index).ok().and_then(|i| array.get(i)) {
                Some(child) => read(child, &cursor.field(step), rest),
                None => Ok(None),
            }
        }
        (Value::Bytes(bytes), Step::Index(raw)) => {
            let index = parse_index(cursor, step, raw)?;
            match usize::try_from(index).ok().and_then(|i| bytes.get(i)) {
                Some(byte) => read(&Value::U8(*byte), &cursor.entry(step), rest),
                None => Ok(None),
            }
        }
        _ => Err(shape_mismatch(cursor, step, node)),
    }
}
