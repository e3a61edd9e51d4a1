use crate::access::cursor::Cursor;
use crate::access::path::{AccessPath, DEFAULT_SEPARATOR, check_separator, render_steps};
use crate::access::{AccessError, mutator, walker};
use crate::coerce::{ConvertError, FromValue, convert, to_timestamp, to_timestamp_with_layout};
use crate::info::TypeInfo;
use crate::value::{Timestamp, Value};

// -----------------------------------------------------------------------------
// RootHandle

/// How an [`Accessor`] holds its root.
///
/// A root held by value is not addressable: private record fields are hidden,
/// and fields of records or arrays reached without a pointer cannot be
/// replaced. A root held by `&mut` is addressable and allows every write.
pub trait RootHandle {
    fn value(&self) -> &Value;

    fn value_mut(&mut self) -> &mut Value;

    fn is_addressable(&self) -> bool;
}

impl RootHandle for Value {
    #[inline]
    fn value(&self) -> &Value {
        self
    }

    #[inline]
    fn value_mut(&mut self) -> &mut Value {
        self
    }

    #[inline]
    fn is_addressable(&self) -> bool {
        false
    }
}

impl RootHandle for &mut Value {
    #[inline]
    fn value(&self) -> &Value {
        self
    }

    #[inline]
    fn value_mut(&mut self) -> &mut Value {
        self
    }

    #[inline]
    fn is_addressable(&self) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// Reads and writes nested values of one graph by path.
///
/// The root must be an array, list, map or record, or a non-nil pointer to one.
///
/// # Examples
///
/// ```
/// use sundry_reflect::access::Accessor;
/// use sundry_reflect::info::TypeInfo;
/// use sundry_reflect::value::Value;
///
/// let mut root = Value::untyped_map();
/// let mut acc = Accessor::wrap(&mut root).unwrap();
///
/// acc.set("a.b[].c.d", "19").unwrap();
///
/// assert_eq!(acc.get_typed("a.b[0].c.d", &TypeInfo::I64).unwrap(), Value::I64(19));
/// assert_eq!(acc.get("a.b[1]").unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Accessor<R: RootHandle = Value> {
    root: R,
    separator: u8,
}

fn is_container(value: &Value) -> bool {
    match value {
        Value::Array(_) | Value::List(_) | Value::Map(_) | Value::Record(_) => true,
        Value::Pointer(pointer) => pointer
            .target()
            .and_then(|shared| shared.try_borrow().ok())
            .is_some_and(|inner| is_container(&inner)),
        _ => false,
    }
}

impl<R: RootHandle> Accessor<R> {
    /// Wraps `root`, or returns `None` if it cannot be a root.
    #[inline]
    pub fn wrap(root: R) -> Option<Self> {
        Self::try_wrap(root).ok()
    }

    /// Wraps `root`, failing with [`AccessError::InvalidRoot`] if it cannot be a root.
    pub fn try_wrap(root: R) -> Result<Self, AccessError> {
        if !is_container(root.value()) {
            return Err(AccessError::InvalidRoot {
                kind: root.value().kind(),
            });
        }
        Ok(Self {
            root,
            separator: DEFAULT_SEPARATOR,
        })
    }

    /// Returns the root handle.
    #[inline]
    pub fn unwrap(self) -> R {
        self.root
    }

    #[inline]
    pub fn root(&self) -> &Value {
        self.root.value()
    }

    /// Replaces the separator used to split string paths.
    ///
    /// Any printable ASCII character but `[` and `]` is accepted.
    pub fn with_separator(mut self, separator: u8) -> Result<Self, AccessError> {
        self.separator = check_separator(separator)?;
        Ok(self)
    }

    #[inline]
    pub fn separator(&self) -> u8 {
        self.separator
    }

    #[inline]
    pub fn is_addressable(&self) -> bool {
        self.root.is_addressable()
    }

    #[inline]
    fn cursor(&self) -> Cursor<'static> {
        Cursor::root(self.root.is_addressable(), self.separator)
    }

    /// Returns a copy of the node at `path`, or `None` if it does not resolve.
    pub fn get(&self, path: impl AccessPath) -> Result<Option<Value>, AccessError> {
        let steps = path.to_steps(self.separator);
        walker::read(self.root.value(), &self.cursor(), &steps)
    }

    /// Returns the node at `path` converted to `target`.
    ///
    /// A path that does not resolve converts as nil: it yields the zero value
    /// of `target` in zero-mode and fails otherwise.
    pub fn get_typed(&self, path: impl AccessPath, target: &TypeInfo) -> Result<Value, AccessError> {
        self.get_with(path, |node| convert(node, target))
    }

    /// Returns the node at `path` extracted as `T`, or `None` if it does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use sundry_reflect::access::Accessor;
    /// use sundry_reflect::value::{Map, Value};
    ///
    /// let acc = Accessor::wrap(Value::from(Map::untyped().with("age", "29"))).unwrap();
    ///
    /// assert_eq!(acc.get_as::<u64>("age").unwrap(), Some(29));
    /// assert_eq!(acc.get_as::<u64>("height").unwrap(), None);
    /// ```
    pub fn get_as<T: FromValue>(&self, path: impl AccessPath) -> Result<Option<T>, AccessError> {
        let steps = path.to_steps(self.separator);
        match walker::read(self.root.value(), &self.cursor(), &steps)? {
            Some(node) => T::from_value(&node)
                .map(Some)
                .map_err(|source| AccessError::Convert {
                    at: render_steps(steps.iter(), self.separator),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Returns the node at `path` converted to a [`Timestamp`].
    #[inline]
    pub fn get_timestamp(&self, path: impl AccessPath) -> Result<Timestamp, AccessError> {
        self.get_with(path, to_timestamp)
    }

    /// Returns the node at `path` converted to a [`Timestamp`], parsing
    /// non-numeric strings with `layout`.
    #[inline]
    pub fn get_timestamp_with_layout(
        &self,
        path: impl AccessPath,
        layout: &str,
    ) -> Result<Timestamp, AccessError> {
        self.get_with(path, |node| to_timestamp_with_layout(node, layout))
    }

    fn get_with<T>(
        &self,
        path: impl AccessPath,
        f: impl FnOnce(&Value) -> Result<T, ConvertError>,
    ) -> Result<T, AccessError> {
        let steps = path.to_steps(self.separator);
        let node = walker::read(self.root.value(), &self.cursor(), &steps)?.unwrap_or_default();
        f(&node).map_err(|source| AccessError::Convert {
            at: render_steps(steps.iter(), self.separator),
            source,
        })
    }

    /// Writes `value` at `path`, converted to the type of the destination.
    ///
    /// Missing intermediate nodes are created, and `[]` appends to a list.
    /// An empty path replaces the root with `value` converted to the root's type.
    /// On error the graph is left unchanged.
    pub fn set(&mut self, path: impl AccessPath, value: impl Into<Value>) -> Result<(), AccessError> {
        let value = value.into();
        let steps = path.to_steps(self.separator);
        let cursor = self.cursor();
        let root = self.root.value_mut();

        if steps.is_empty() {
            let replaced = convert(&value, &root.type_info())
                .map_err(|source| AccessError::Convert {
                    at: cursor.path(),
                    source,
                })?;
            if !is_container(&replaced) {
                return Err(AccessError::InvalidRoot {
                    kind: replaced.kind(),
                });
            }
            *root = replaced;
            return Ok(());
        }
        mutator::write(root, &cursor, &steps, &value)
    }
}
