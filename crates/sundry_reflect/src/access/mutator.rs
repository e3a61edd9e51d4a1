//! Writes through a graph, creating missing nodes on the way.
//!
//! Writes are all-or-nothing: missing nodes are built and filled on the side,
//! then attached to the graph once the whole remaining path succeeded.

use alloc::string::{String, ToString};

use crate::access::AccessError;
use crate::access::cursor::Cursor;
use crate::access::path::Step;
use crate::access::walker::{map_key, parse_index, shape_mismatch};
use crate::coerce::{ConvertError, convert, uint_of};
use crate::info::{FieldInfo, Kind, RecordInfo, TypeInfo};
use crate::value::{Pointer, Value};

// -----------------------------------------------------------------------------
// Helpers

#[inline]
fn unaddressable(at: String, reason: &'static str) -> AccessError {
    AccessError::UnaddressableWrite { at, reason }
}

#[inline]
fn convert_failed(at: String) -> impl FnOnce(ConvertError) -> AccessError {
    move |source| AccessError::Convert { at, source }
}

fn unknown_field(cursor: &Cursor<'_>, step: &Step<'_>) -> AccessError {
    AccessError::ShapeMismatch {
        at: cursor.path(),
        step: step.to_string(),
        actual: Kind::Record,
    }
}

/// Looks up a field a write may go through.
fn writable_field<'i>(
    info: &'i RecordInfo,
    cursor: &Cursor<'_>,
    step: &Step<'_>,
    name: &str,
) -> Result<(usize, &'i FieldInfo), AccessError> {
    let Some((index, field)) = info
        .index_of(name)
        .and_then(|index| Some((index, info.field_at(index)?)))
    else {
        return Err(unknown_field(cursor, step));
    };
    if !field.is_exported() && !cursor.by_ref() {
        return Err(unaddressable(cursor.path_with(step), "the field is private"));
    }
    Ok((index, field))
}

/// Resolves an index step to an existing slot; writes never extend a sequence.
fn slot_at<'v, T>(
    cursor: &Cursor<'_>,
    step: &Step<'_>,
    raw: &str,
    items: &'v mut [T],
) -> Result<&'v mut T, AccessError> {
    let len = items.len();
    let index = parse_index(cursor, step, raw)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get_mut(i))
        .ok_or_else(|| AccessError::IndexOutOfBounds {
            at: cursor.path(),
            index,
            len,
        })
}

/// Creates the node a missing slot of type `declared` gets before `next` is applied.
///
/// `Any` slots become an untyped map before a name and an untyped list before
/// an index; typed slots get their zero value.
fn create_node(cursor: &Cursor<'_>, declared: &TypeInfo, next: &Step<'_>) -> Value {
    let node = match declared {
        TypeInfo::Any if next.is_name() => Value::untyped_map(),
        TypeInfo::Any => Value::untyped_list(),
        ty => ty.zero_value(),
    };
    log::trace!("creating {} at `{}`", node.type_info(), cursor.path());
    node
}

/// Builds a detached node of type `declared` holding `value` at `steps`.
fn write_fresh(
    cursor: &Cursor<'_>,
    declared: &TypeInfo,
    steps: &[Step<'_>],
    value: &Value,
) -> Result<Value, AccessError> {
    let Some(next) = steps.first() else {
        return convert(value, declared).map_err(convert_failed(cursor.path()));
    };
    let mut node = create_node(cursor, declared, next);
    write(&mut node, cursor, steps, value)?;
    Ok(node)
}

/// Fills `slot` if it is nil, writes into it otherwise.
fn write_slot(
    slot: &mut Value,
    cursor: &Cursor<'_>,
    declared: &TypeInfo,
    steps: &[Step<'_>],
    value: &Value,
) -> Result<(), AccessError> {
    if !slot.is_nil() {
        return write(slot, cursor, steps, value);
    }
    if !cursor.rebindable() {
        return Err(unaddressable(cursor.path(), "the container is held by value"));
    }
    *slot = write_fresh(cursor, declared, steps, value)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Write

/// Writes `value` at `steps` below `node`.
pub(super) fn write(
    node: &mut Value,
    cursor: &Cursor<'_>,
    steps: &[Step<'_>],
    value: &Value,
) -> Result<(), AccessError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(());
    };

    if let Value::Pointer(pointer) = node {
        let pointee = pointer.pointee().clone();
        let target = cursor.deref();
        return match pointer.target().cloned() {
            Some(shared) => {
                let mut inner = shared
                    .try_borrow_mut()
                    .map_err(|_| AccessError::BorrowConflict { at: cursor.path() })?;
                write_slot(&mut inner, &target, &pointee, steps, value)
            }
            None => {
                if !cursor.rebindable() {
                    return Err(unaddressable(
                        cursor.path(),
                        "a nil pointer in this slot cannot be allocated",
                    ));
                }
                let fresh = write_fresh(&target, &pointee, steps, value)?;
                *node = Value::Pointer(Pointer::new(pointee, fresh));
                Ok(())
            }
        };
    }

    if rest.is_empty() {
        assign(node, cursor, step, value)
    } else {
        descend(node, cursor, step, rest, value)
    }
}

/// Applies the last step of a path.
fn assign(
    node: &mut Value,
    cursor: &Cursor<'_>,
    step: &Step<'_>,
    value: &Value,
) -> Result<(), AccessError> {
    let at = || cursor.path_with(step);

    match (node, step) {
        (Value::Map(map), Step::Name(name)) => {
            let key = map_key(map, name).map_err(convert_failed(at()))?;
            let value = convert(value, map.value_type()).map_err(convert_failed(at()))?;
            map.insert(key, value);
        }
        (Value::Record(record), Step::Name(name)) => {
            let info = record.info().clone();
            let (index, field) = writable_field(&info, cursor, step, name)?;
            if !cursor.addressable() {
                return Err(unaddressable(at(), "the record is held by value"));
            }
            let value = convert(value, field.ty()).map_err(convert_failed(at()))?;
            if let Some(slot) = record.field_at_mut(index) {
                *slot = value;
            }
        }
        (Value::List(list), Step::Index(raw)) => {
            let item = list.item().clone();
            let slot = slot_at(cursor, step, raw, list.as_mut_slice())?;
            *slot = convert(value, &item).map_err(convert_failed(at()))?;
        }
        (Value::Array(array), Step::Index(raw)) => {
            let item = array.item().clone();
            let slot = slot_at(cursor, step, raw, array.as_mut_slice())?;
            if !cursor.addressable() {
                return Err(unaddressable(at(), "the array is held by value"));
            }
            *slot = convert(value, &item).map_err(convert_failed(at()))?;
        }
        (Value::Bytes(bytes), Step::Index(raw)) => {
            let slot = slot_at(cursor, step, raw, bytes.as_mut_slice())?;
            *slot = uint_of(value, &TypeInfo::U8).map_err(convert_failed(at()))? as u8;
        }
        (Value::List(list), Step::Append) => {
            if !cursor.rebindable() {
                return Err(unaddressable(cursor.path(), "the list cannot be rebound"));
            }
            let value = convert(value, list.item()).map_err(convert_failed(at()))?;
            list.push(value);
            log::debug!("appended to `{}`, length {}", cursor.path(), list.len());
        }
        (Value::Bytes(bytes), Step::Append) => {
            if !cursor.rebindable() {
                return Err(unaddressable(cursor.path(), "the bytes cannot be rebound"));
            }
            let byte = uint_of(value, &TypeInfo::U8).map_err(convert_failed(at()))?;
            bytes.push(byte as u8);
            log::debug!("appended to `{}`, length {}", cursor.path(), bytes.len());
        }
        (node, step) => return Err(shape_mismatch(cursor, step, node)),
    }
    Ok(())
}

/// Applies an intermediate step and continues with `rest`.
fn descend(
    node: &mut Value,
    cursor: &Cursor<'_>,
    step: &Step<'_>,
    rest: &[Step<'_>],
    value: &Value,
) -> Result<(), AccessError> {
    match (node, step) {
        (Value::Map(map), Step::Name(name)) => {
            let key = map_key(map, name).map_err(convert_failed(cursor.path_with(step)))?;
            let child = cursor.entry(step);
            if let Some(slot) = map.get_mut(&key)
                && !slot.is_nil()
            {
                return write(slot, &child, rest, value);
            }
            let fresh = write_fresh(&child, map.value_type(), rest, value)?;
            map.insert(key, fresh);
            Ok(())
        }
        (Value::Record(record), Step::Name(name)) => {
            let info = record.info().clone();
            let (index, field) = writable_field(&info, cursor, step, name)?;
            let child = cursor.field(step);
            match record.field_at_mut(index) {
                Some(slot) => write_slot(slot, &child, field.ty(), rest, value),
                None => Err(unknown_field(cursor, step)),
            }
        }
        (Value::List(list), Step::Index(raw)) => {
            let item = list.item().clone();
            let slot = slot_at(cursor, step, raw, list.as_mut_slice())?;
            write_slot(slot, &cursor.entry(step), &item, rest, value)
        }
        (Value::Array(array), Step::Index(raw)) => {
            let item = array.item().clone();
            let slot = slot_at(cursor, step, raw, array.as_mut_slice())?;
            write_slot(slot, &cursor.field(step), &item, rest, value)
        }
        (Value::List(list), Step::Append) => {
            if !cursor.rebindable() {
                return Err(unaddressable(cursor.path(), "the list cannot be rebound"));
            }
            let fresh = write_fresh(&cursor.entry(step), list.item(), rest, value)?;
            list.push(fresh);
            log::debug!("appended to `{}`, length {}", cursor.path(), list.len());
            Ok(())
        }
        (node, step) => Err(shape_mismatch(cursor, step, node)),
    }
}
