//! Read and write nested values by path.
//!
//! ## Menu
//!
//! - [`Accessor`]: wraps one graph root and resolves paths against it.
//!     - [`RootHandle`]: a root is held by value ([`Value`](crate::value::Value))
//!       or by addressable reference (`&mut Value`).
//! - [`split_path`], [`Step`]: the path lexer.
//! - [`Path`]: a lexed path that can be reused.
//! - [`AccessPath`]: anything usable as a path: `&str`, `String`, [`Path`].
//! - [`AccessError`]: everything that can go wrong while walking.
//!
//! # Syntax
//!
//! A path is a list of segments joined by a separator (`.` by default):
//!
//! - Name: a map key or record field, e.g. `employees`.
//! - Index: a sequence position in brackets, e.g. `[0]`. Negative and
//!   out-of-range indices resolve to nothing on read and fail on write.
//! - Append: `[]`, which on write adds an element at the end of a list.
//!
//! `employees[1].options.work_hours[0]` reads as five steps.
//!
//! # Writes
//!
//! Missing map entries, nil slots and nil pointers on the way are created from
//! the slot's declared type. A slot declared as `Any` becomes a map when the
//! next step is a name and a list otherwise.
//!
//! Whether a slot may be replaced depends on how it was reached:
//!
//! - Map entries, list elements, the root and everything behind a pointer can
//!   always be replaced.
//! - Record fields and array elements can be replaced only when their
//!   container can, i.e. not for a record held by value.
//! - Private record fields are only visible through an addressable root or a
//!   pointer.
//!
//! Appending through a record field of a root held by value therefore fails
//! with [`AccessError::UnaddressableWrite`], while the same root wrapped as
//! `&mut Value` accepts it.
//!
//! # Examples
//!
//! ```
//! use sundry_reflect::access::Accessor;
//! use sundry_reflect::value::Value;
//!
//! let root: Value = serde_json::from_str(r#"{ "Employees": [ { "age": 29 } ] }"#).unwrap();
//! let acc = Accessor::wrap(root).unwrap().with_separator(b'/').unwrap();
//!
//! assert_eq!(acc.get_as::<u64>("Employees[0]/age").unwrap(), Some(29));
//! assert_eq!(acc.get("Employees[5]/age").unwrap(), None);
//! ```
//!
//! The graph is not shared between threads, and cycles built with pointers are
//! not detected.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod cursor;
mod error;
mod mutator;
mod path;
mod walker;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{Accessor, RootHandle};
pub use error::AccessError;
pub use path::{AccessPath, DEFAULT_SEPARATOR, Path, Step, split_path};

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;

    use super::{AccessError, Accessor, Path};
    use crate::ErrorKind;
    use crate::coerce::{ZeroModeScope, to_timestamp};
    use crate::info::{FieldInfo, Kind, RecordInfo, TypeInfo};
    use crate::value::{Array, List, Map, Pointer, Record, Value};

    fn employee_info() -> Arc<RecordInfo> {
        Arc::new(RecordInfo::new(
            "Employee",
            [
                FieldInfo::new("Name", TypeInfo::String),
                FieldInfo::new("Age", TypeInfo::U8),
                FieldInfo::private("salary", TypeInfo::F64),
                FieldInfo::new("Options", TypeInfo::untyped_map()),
            ],
        ))
    }

    fn company_info(employee: &Arc<RecordInfo>) -> Arc<RecordInfo> {
        Arc::new(RecordInfo::new(
            "Company",
            [
                FieldInfo::new("Name", TypeInfo::String),
                FieldInfo::new("Employees", TypeInfo::list(TypeInfo::record(employee.clone()))),
                FieldInfo::new("Founded", TypeInfo::Timestamp),
                FieldInfo::new("Ceo", TypeInfo::pointer(TypeInfo::record(employee.clone()))),
                FieldInfo::new("Board", TypeInfo::array(TypeInfo::String, 2)),
            ],
        ))
    }

    fn company() -> Value {
        let employee = employee_info();
        let alice = Record::new(employee.clone())
            .with_field("Name", "Alice")
            .with_field("Age", 41_u8)
            .with_field("salary", 120.5_f64);
        let bob = Record::new(employee.clone())
            .with_field("Name", "Bob")
            .with_field("Age", 29_u8);
        let employees = List::from_items(
            TypeInfo::record(employee.clone()),
            [Value::from(alice.clone()), Value::from(bob)],
        );
        let founded = to_timestamp(&Value::I64(1_547_549_353)).unwrap();
        let record = Record::new(company_info(&employee))
            .with_field("Name", "Acme")
            .with_field("Employees", employees)
            .with_field("Founded", founded)
            .with_field("Ceo", Pointer::new(TypeInfo::record(employee), alice));
        Value::from(record)
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn nested_map_read() {
        let root = json(r#"{ "Employees": [ { "age": 29, "options": { "overtime": false } } ] }"#);
        let acc = Accessor::wrap(root).unwrap();

        assert_eq!(acc.get("Employees[0].options.overtime").unwrap(), Some(Value::Bool(false)));
        assert_eq!(
            acc.get_typed("Employees[0].age", &TypeInfo::U64).unwrap(),
            Value::U64(29)
        );
        assert_eq!(acc.get_as::<i8>("Employees[0].age").unwrap(), Some(29));
    }

    #[test]
    fn unresolved_reads_are_not_errors() {
        let root = json(r#"{ "a": { "b": [1, 2, 3] }, "n": null }"#);
        let acc = Accessor::wrap(root).unwrap();
        for path in ["x", "a.x", "a.b[3]", "a.b[-1]", "a.b[]", "n.deep[0]", "a.x.y.z"] {
            assert_eq!(acc.get(path).unwrap(), None, "{path}");
        }
    }

    #[test]
    fn shape_mismatch_on_read() {
        let root = json(r#"{ "a": { "b": [1, 2, 3] }, "s": "text" }"#);
        let acc = Accessor::wrap(root).unwrap();

        let err = acc.get("a.b.c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(err.at(), Some("a.b"));
        assert!(matches!(err, AccessError::ShapeMismatch { actual: Kind::List, .. }));

        assert_eq!(acc.get("a[0]").unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(acc.get("s.len").unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn auto_create_with_append() {
        let mut acc = Accessor::wrap(Value::untyped_map()).unwrap();
        acc.set("a.b[].c.d", "19").unwrap();

        assert_eq!(acc.get_typed("a.b[0].c.d", &TypeInfo::I64).unwrap(), Value::I64(19));
        assert_eq!(acc.get("a.b[0].c.d").unwrap(), Some(Value::from("19")));
        assert_eq!(acc.root().to_string(), "map[a:map[b:[map[c:map[d:19]]]]]");

        acc.set("a.b[].c.d", 20_i64).unwrap();
        assert_eq!(acc.get("a.b").unwrap().and_then(|b| b.len()), Some(2));
    }

    #[test]
    fn append_on_value_held_record() {
        let mut by_value = Accessor::wrap(company()).unwrap();
        let err = by_value.set("Employees[].Name", "X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnaddressableWrite);
        assert_eq!(err.at(), Some("Employees"));
        assert_eq!(by_value.get("Employees").unwrap().and_then(|e| e.len()), Some(2));

        let mut root = company();
        let mut by_ref = Accessor::wrap(&mut root).unwrap();
        by_ref.set("Employees[].Name", "X").unwrap();
        assert_eq!(by_ref.get("Employees").unwrap().and_then(|e| e.len()), Some(3));
        assert_eq!(by_ref.get_as::<String>("Employees[2].Name").unwrap().as_deref(), Some("X"));
        // the new element starts from the zero record
        assert_eq!(by_ref.get("Employees[2].Age").unwrap(), Some(Value::U8(0)));
    }

    #[test]
    fn out_of_bounds_read_vs_write() {
        let list = List::new(TypeInfo::I32).with(1_i32).with(2_i32).with(3_i32);
        let mut acc = Accessor::wrap(Value::from(list)).unwrap();

        assert_eq!(acc.get("[7]").unwrap(), None);

        let err = acc.set("[7]", 4_i32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        assert!(matches!(err, AccessError::IndexOutOfBounds { index: 7, len: 3, .. }));

        acc.set("[]", "4").unwrap();
        assert_eq!(acc.root().len(), Some(4));
        assert_eq!(acc.get("[3]").unwrap(), Some(Value::I32(4)));

        assert_eq!(acc.set("[-1]", 0_i32).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    }

    #[test]
    fn index_parse() {
        let mut acc = Accessor::wrap(json("[1, 2]")).unwrap();
        for path in ["[x]", "[1e3]", "[0x1]", "[99999999999999999999]"] {
            assert_eq!(acc.get(path).unwrap_err().kind(), ErrorKind::IndexParse, "{path}");
            assert_eq!(acc.set(path, 0_i64).unwrap_err().kind(), ErrorKind::IndexParse, "{path}");
        }
    }

    #[test]
    fn append_grows_and_coerces() {
        let mut root = company();
        let mut acc = Accessor::wrap(&mut root).unwrap();
        acc.set("Employees[0].Options.hours[]", 8_u8).unwrap();
        acc.set("Employees[0].Options.hours[]", "9").unwrap();
        assert_eq!(acc.get("Employees[0].Options.hours[1]").unwrap(), Some(Value::from("9")));

        let mut typed = Accessor::wrap(Value::from(Map::untyped().with("seq", List::new(TypeInfo::U16))))
            .unwrap();
        for (n, v) in ["1", "2", "3"].into_iter().enumerate() {
            typed.set("seq[]", v).unwrap();
            assert_eq!(typed.get("seq").unwrap().and_then(|s| s.len()), Some(n + 1));
            assert_eq!(typed.get(format!("seq[{n}]")).unwrap(), Some(Value::U16(n as u16 + 1)));
        }
        let err = typed.set("seq[]", "many").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConvertFailure);
        assert_eq!(err.at(), Some("seq[]"));
    }

    #[test]
    fn separator_independence() {
        for sep in [b'.', b'/', b':', b';'] {
            let s = char::from(sep);
            let mut acc = Accessor::wrap(Value::untyped_map())
                .unwrap()
                .with_separator(sep)
                .unwrap();
            acc.set(format!("a{s}b[]{s}c"), 1_i64).unwrap();
            assert_eq!(acc.get(format!("a{s}b[0]{s}c")).unwrap(), Some(Value::I64(1)));
            assert_eq!(acc.separator(), sep);
        }
    }

    #[test]
    fn invalid_separators() {
        for sep in [b'[', b']', b' ', b'\n', 0x7f, 0xc3] {
            let err = Accessor::wrap(Value::untyped_map()).unwrap().with_separator(sep).unwrap_err();
            assert_eq!(err, AccessError::InvalidSeparator(sep));
        }
    }

    #[test]
    fn private_fields_need_an_addressable_root() {
        let mut by_value = Accessor::wrap(company()).unwrap();
        // visible behind the pointer, hidden in the list
        assert_eq!(by_value.get("Ceo.salary").unwrap(), Some(Value::F64(120.5)));
        assert_eq!(by_value.get("Employees[0].salary").unwrap(), None);
        let err = by_value.set("Employees[0].salary", 1_i64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnaddressableWrite);
        by_value.set("Ceo.salary", 99_i64).unwrap();
        assert_eq!(by_value.get("Ceo.salary").unwrap(), Some(Value::F64(99.0)));

        let mut root = company();
        let mut by_ref = Accessor::wrap(&mut root).unwrap();
        assert!(by_ref.is_addressable());
        assert_eq!(by_ref.get("Employees[0].salary").unwrap(), Some(Value::F64(120.5)));
        by_ref.set("Employees[0].salary", "130").unwrap();
        assert_eq!(by_ref.get("Employees[0].salary").unwrap(), Some(Value::F64(130.0)));
    }

    #[test]
    fn record_fields_of_value_held_root() {
        let mut by_value = Accessor::wrap(company()).unwrap();
        assert_eq!(by_value.set("Name", "Other").unwrap_err().kind(), ErrorKind::UnaddressableWrite);
        assert_eq!(by_value.set("Board[0]", "x").unwrap_err().kind(), ErrorKind::UnaddressableWrite);
        // list elements stay replaceable
        by_value.set("Employees[1].Name", "Robert").unwrap();
        assert_eq!(by_value.get_as::<String>("Employees[1].Name").unwrap().as_deref(), Some("Robert"));

        let mut root = company();
        let mut by_ref = Accessor::wrap(&mut root).unwrap();
        by_ref.set("Board[1]", 7_i64).unwrap();
        assert_eq!(by_ref.get("Board").unwrap().map(|b| b.to_string()).as_deref(), Some("[ 7]"));
        assert_eq!(by_ref.set("Board[]", "x").unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(by_ref.set("Missing", "x").unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn record_inside_map_is_writable() {
        let employee = Record::new(employee_info()).with_field("Name", "Eve");
        let mut acc = Accessor::wrap(Value::from(Map::untyped().with("boss", employee))).unwrap();
        acc.set("boss.Age", 51_i64).unwrap();
        assert_eq!(acc.get("boss.Age").unwrap(), Some(Value::U8(51)));
        assert_eq!(acc.set("boss.salary", 1_i64).unwrap_err().kind(), ErrorKind::UnaddressableWrite);
        // typed maps inside records are created from the field type
        acc.set("boss.Options.remote", true).unwrap();
        assert_eq!(acc.get("boss.Options.remote").unwrap(), Some(Value::Bool(true)));
    }

    #[test]
    fn failed_writes_leave_graph_unchanged() {
        let mut acc = Accessor::wrap(json(r#"{ "a": { "b": 5 } }"#)).unwrap();
        let before = acc.root().clone();

        assert_eq!(acc.set("a.b.c", 1_i64).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(acc.set("x.y[0]", 1_i64).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(acc.set("x.y[].z[0]", 1_i64).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(acc.root(), &before);
    }

    #[test]
    fn pointers() {
        let shared = Pointer::new(TypeInfo::untyped_map(), Value::untyped_map());
        let root = Map::untyped()
            .with("left", shared.clone())
            .with("right", shared.clone())
            .with("empty", Pointer::nil(TypeInfo::untyped_map()));
        let mut acc = Accessor::wrap(Value::from(root)).unwrap();

        acc.set("left.x", 1_i64).unwrap();
        assert_eq!(acc.get("right.x").unwrap(), Some(Value::I64(1)));
        assert_eq!(shared.get().and_then(|m| m.len()), Some(1));

        assert_eq!(acc.get("empty.x").unwrap(), None);
        acc.set("empty.x", "y").unwrap();
        assert_eq!(acc.get("empty.x").unwrap(), Some(Value::from("y")));
    }

    #[test]
    fn pointer_roots() {
        let target = Pointer::new(TypeInfo::untyped_list(), Value::untyped_list());
        let mut acc = Accessor::wrap(Value::from(target.clone())).unwrap();
        acc.set("[]", 3_i64).unwrap();
        assert_eq!(target.get().and_then(|l| l.len()), Some(1));

        let err = Accessor::try_wrap(Value::from(Pointer::nil(TypeInfo::untyped_map()))).unwrap_err();
        assert_eq!(err, AccessError::InvalidRoot { kind: Kind::Pointer });
        let scalar = Pointer::new(TypeInfo::I8, 1_i8);
        assert!(Accessor::wrap(Value::from(scalar)).is_none());
    }

    #[test]
    fn invalid_roots() {
        assert!(Accessor::wrap(Value::I32(3)).is_none());
        assert!(Accessor::wrap(Value::Nil).is_none());
        assert!(Accessor::wrap(Value::Bytes(alloc::vec![1])).is_none());
        let err = Accessor::try_wrap(Value::from("text")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRoot);
        assert!(Accessor::wrap(Value::from(Array::new(TypeInfo::I8, 2))).is_some());
    }

    #[test]
    fn empty_path() {
        let mut acc = Accessor::wrap(json(r#"{ "a": 1 }"#)).unwrap();
        assert_eq!(acc.get("").unwrap().as_ref(), Some(acc.root()));
        acc.set("", Map::untyped().with("b", 2_i64)).unwrap();
        assert_eq!(acc.get("b").unwrap(), Some(Value::I64(2)));
        assert_eq!(acc.set("", 5_i64).unwrap_err().kind(), ErrorKind::ConvertFailure);
    }

    #[test]
    fn typed_map_keys() {
        let map = Map::new(TypeInfo::U16, TypeInfo::String).with(7_u16, "seven");
        let mut acc = Accessor::wrap(Value::from(map)).unwrap();
        assert_eq!(acc.get("7").unwrap(), Some(Value::from("seven")));
        assert_eq!(acc.get("seven").unwrap(), None);
        acc.set("8", 8_i64).unwrap();
        assert_eq!(acc.get("8").unwrap(), Some(Value::from("8")));
        assert_eq!(acc.set("eight", "x").unwrap_err().kind(), ErrorKind::ConvertFailure);
    }

    #[test]
    fn bytes_nodes() {
        let mut acc = Accessor::wrap(Value::from(Map::untyped().with("b", Value::Bytes(alloc::vec![1, 2])))).unwrap();
        assert_eq!(acc.get("b[1]").unwrap(), Some(Value::U8(2)));
        acc.set("b[0]", "65").unwrap();
        acc.set("b[]", 66_i64).unwrap();
        assert_eq!(acc.get_as::<String>("b").unwrap().as_deref(), Some("A\u{2}B"));
    }

    #[test]
    fn timestamps() {
        let acc = Accessor::wrap(company()).unwrap();
        let founded = acc.get_timestamp("Founded").unwrap();
        assert_eq!(founded.timestamp(), 1_547_549_353);

        let root = json(r#"{ "at": "2019-01-15 10:49:13", "unix": "1547549353123" }"#);
        let acc = Accessor::wrap(root).unwrap();
        let at = acc.get_timestamp_with_layout("at", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(at, founded);
        assert_eq!(acc.get_timestamp("unix").unwrap().timestamp_subsec_millis(), 123);
        assert_eq!(acc.get_timestamp("at").unwrap_err().kind(), ErrorKind::ConvertFailure);
    }

    #[test]
    fn unresolved_typed_reads_follow_zero_mode() {
        let acc = Accessor::wrap(Value::untyped_map()).unwrap();
        {
            let _scope = ZeroModeScope::new(true);
            assert_eq!(acc.get_typed("missing", &TypeInfo::I32).unwrap(), Value::I32(0));
        }
        let _scope = ZeroModeScope::new(false);
        let err = acc.get_typed("missing", &TypeInfo::I32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NilToNonZero);
        assert_eq!(err.at(), Some("missing"));
        assert_eq!(acc.get_as::<i32>("missing").unwrap(), None);
    }

    #[test]
    fn reusable_paths() {
        let path = Path::parse("Employees[1].Name", b'.').unwrap();
        let acc = Accessor::wrap(company()).unwrap().with_separator(b'/').unwrap();
        assert_eq!(acc.get(&path).unwrap(), Some(Value::from("Bob")));
        assert_eq!(acc.get("Employees[1]/Name").unwrap(), Some(Value::from("Bob")));
        let owned = String::from("Employees[0]/Age");
        assert_eq!(acc.get_as::<u64>(&owned).unwrap(), Some(41));
    }

    #[test]
    fn unwrap_returns_root() {
        let mut root = json(r#"{ "a": 1 }"#);
        {
            let mut acc = Accessor::wrap(&mut root).unwrap();
            acc.set("a", 2_i64).unwrap();
            let handle: &mut Value = acc.unwrap();
            assert!(handle.as_map().is_some());
        }
        assert_eq!(root.as_map().and_then(|m| m.get(&Value::from("a")).cloned()), Some(Value::I64(2)));
    }
}
