//! Provide the path lexer.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use sundry_utils::vec::FastVec;

use crate::access::AccessError;

/// The default separator between path segments.
pub const DEFAULT_SEPARATOR: u8 = b'.';

/// Accepts printable ASCII other than `[` and `]`.
pub(crate) fn check_separator(separator: u8) -> Result<u8, AccessError> {
    if separator.is_ascii_graphic() && separator != b'[' && separator != b']' {
        Ok(separator)
    } else {
        Err(AccessError::InvalidSeparator(separator))
    }
}

// -----------------------------------------------------------------------------
// Step

/// One element of a parsed path.
///
/// Index steps keep the raw text between the brackets; it is parsed as an
/// integer only when the step is applied, so malformed indices fail there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step<'a> {
    /// A map key or a record field, e.g. `name`.
    Name(Cow<'a, str>),
    /// A sequence position, e.g. `[3]`.
    Index(Cow<'a, str>),
    /// The append marker `[]`.
    Append,
}

impl Step<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Step<'static> {
        match self {
            Self::Name(name) => Step::Name(Cow::Owned(name.into_owned())),
            Self::Index(raw) => Step::Index(Cow::Owned(raw.into_owned())),
            Self::Append => Step::Append,
        }
    }

    #[inline]
    pub const fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(raw) => write!(f, "[{raw}]"),
            Self::Append => f.write_str("[]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Lexer

/// Splits `path` into steps.
///
/// Segments are separated by `separator`, and bracket groups split a segment
/// further, so `a.b[1][]` yields `a`, `b`, `[1]` and `[]`. Empty names are
/// skipped and an unmatched `[` keeps the rest of the segment as a name.
/// Lexing never fails; malformed steps fail when they are applied.
/// `separator` is expected to be printable ASCII other than `[` and `]`, as
/// enforced by [`Path::parse`] and [`Accessor::with_separator`](crate::access::Accessor::with_separator).
///
/// # Examples
///
/// ```
/// use sundry_reflect::access::{Step, split_path};
///
/// let steps = split_path("employees[1]/options", b'/');
///
/// assert_eq!(steps, [
///     Step::Name("employees".into()),
///     Step::Index("1".into()),
///     Step::Name("options".into()),
/// ]);
/// assert!(split_path("", b'.').is_empty());
/// ```
pub fn split_path(path: &str, separator: u8) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    for segment in path.split(char::from(separator)) {
        split_segment(segment, &mut steps);
    }
    steps
}

fn split_segment<'a>(mut segment: &'a str, steps: &mut Vec<Step<'a>>) {
    while !segment.is_empty() {
        let Some(open) = segment.find('[') else {
            steps.push(Step::Name(Cow::Borrowed(segment)));
            return;
        };
        if open > 0 {
            steps.push(Step::Name(Cow::Borrowed(&segment[..open])));
        }
        let Some(close) = segment[open..].find(']').map(|i| open + i) else {
            steps.push(Step::Name(Cow::Borrowed(&segment[open..])));
            return;
        };
        let inner = &segment[open + 1..close];
        steps.push(if inner.is_empty() {
            Step::Append
        } else {
            Step::Index(Cow::Borrowed(inner))
        });
        segment = &segment[close + 1..];
    }
}

/// Renders steps back into path text.
pub(crate) fn render_steps<'s, 'a: 's>(
    steps: impl IntoIterator<Item = &'s Step<'a>>,
    separator: u8,
) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    for step in steps {
        if step.is_name() && !out.is_empty() {
            out.push(char::from(separator));
        }
        let _ = write!(out, "{step}");
    }
    out
}

// -----------------------------------------------------------------------------
// Reusable path

/// A parsed, reusable path.
///
/// Unlike a `&str`, which is split on every call, this container is lexed
/// once. Names and indices are copied so it holds no borrow.
///
/// # Examples
///
/// ```
/// use sundry_reflect::access::{Accessor, Path};
/// use sundry_reflect::value::Value;
///
/// let path = Path::parse("a:b", b':').unwrap();
/// let mut acc = Accessor::wrap(Value::untyped_map()).unwrap();
///
/// acc.set(&path, 1_i64).unwrap();
/// assert_eq!(acc.get(&path).unwrap(), Some(Value::I64(1)));
/// assert_eq!(path.to_string(), "a:b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Box<[Step<'static>]>,
    separator: u8,
}

impl Path {
    /// Lexes `path` with the given separator.
    ///
    /// Fails with [`AccessError::InvalidSeparator`] unless `separator` is
    /// printable ASCII other than `[` and `]`.
    pub fn parse(path: &str, separator: u8) -> Result<Self, AccessError> {
        let separator = check_separator(separator)?;
        let mut vec: FastVec<Step<'static>, 8> = FastVec::new();
        let data = vec.get();
        data.extend(split_path(path, separator).into_iter().map(Step::into_owned));

        Ok(Self {
            steps: vec.into_boxed_slice(),
            separator,
        })
    }

    #[inline]
    pub fn steps(&self) -> &[Step<'static>] {
        &self.steps
    }

    #[inline]
    pub const fn separator(&self) -> u8 {
        self.separator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Path {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_steps(self.steps.iter(), self.separator))
    }
}

// -----------------------------------------------------------------------------
// AccessPath

/// Anything that can be turned into path steps.
///
/// Implemented for `str`, `String` and [`Path`]. A [`Path`] keeps the
/// separator it was parsed with and ignores the accessor's.
pub trait AccessPath {
    /// Returns the steps of this path, lexing with `separator` if needed.
    fn to_steps(&self, separator: u8) -> Cow<'_, [Step<'_>]>;
}

impl AccessPath for str {
    #[inline]
    fn to_steps(&self, separator: u8) -> Cow<'_, [Step<'_>]> {
        Cow::Owned(split_path(self, separator))
    }
}

impl AccessPath for String {
    #[inline]
    fn to_steps(&self, separator: u8) -> Cow<'_, [Step<'_>]> {
        Cow::Owned(split_path(self, separator))
    }
}

impl AccessPath for Path {
    #[inline]
    fn to_steps(&self, _separator: u8) -> Cow<'_, [Step<'_>]> {
        Cow::Borrowed(self.steps())
    }
}

impl<T: AccessPath + ?Sized> AccessPath for &T {
    #[inline]
    fn to_steps(&self, separator: u8) -> Cow<'_, [Step<'_>]> {
        (**self).to_steps(separator)
    }
}
