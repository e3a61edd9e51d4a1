use alloc::string::String;

use sundry_utils::vec::FastVec;

use crate::access::path::{Step, render_steps};

/// A position in the graph during one walk.
///
/// Cursors live on the stack of the walker and link back to their parent,
/// so errors can render the path that led to them. They also carry the
/// write permissions of the position:
///
/// - `addressable`: the children of this node may be replaced.
/// - `rebindable`: this node itself may be replaced in its parent.
/// - `by_ref`: this node was reached through an addressable root or a pointer,
///   which makes private record fields visible.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    parent: Option<&'a Cursor<'a>>,
    step: Option<&'a Step<'a>>,
    separator: u8,
    addressable: bool,
    rebindable: bool,
    by_ref: bool,
}

impl<'a> Cursor<'a> {
    /// The root slot is owned by the accessor, so it is always rebindable.
    #[inline]
    pub const fn root(addressable: bool, separator: u8) -> Self {
        Self {
            parent: None,
            step: None,
            separator,
            addressable,
            rebindable: true,
            by_ref: addressable,
        }
    }

    /// A map entry or list element: always replaceable.
    #[inline]
    pub const fn entry(&'a self, step: &'a Step<'a>) -> Self {
        Self {
            parent: Some(self),
            step: Some(step),
            separator: self.separator,
            addressable: true,
            rebindable: true,
            by_ref: self.by_ref,
        }
    }

    /// A record field or array element: replaceable if the container is.
    #[inline]
    pub const fn field(&'a self, step: &'a Step<'a>) -> Self {
        Self {
            parent: Some(self),
            step: Some(step),
            separator: self.separator,
            addressable: self.addressable,
            rebindable: self.addressable,
            by_ref: self.by_ref,
        }
    }

    /// The target of a pointer at this position.
    #[inline]
    pub const fn deref(&self) -> Self {
        Self {
            addressable: true,
            rebindable: true,
            by_ref: true,
            ..*self
        }
    }

    #[inline]
    pub const fn addressable(&self) -> bool {
        self.addressable
    }

    #[inline]
    pub const fn rebindable(&self) -> bool {
        self.rebindable
    }

    #[inline]
    pub const fn by_ref(&self) -> bool {
        self.by_ref
    }

    /// Renders the path leading to this cursor, `$` for the root.
    #[inline]
    pub fn path(&self) -> String {
        self.render(None)
    }

    /// Renders the path leading to this cursor followed by `step`.
    #[inline]
    pub fn path_with(&self, step: &Step<'_>) -> String {
        self.render(Some(step))
    }

    fn render(&self, last: Option<&Step<'_>>) -> String {
        let chain = core::iter::successors(Some(self), |c| c.parent)
            .filter_map(|c| c.step)
            .collect::<FastVec<_, 8>>();

        let steps = chain.as_slice().iter().rev().copied().chain(last);
        let rendered = render_steps(steps, self.separator);
        if rendered.is_empty() {
            String::from("$")
        } else {
            rendered
        }
    }
}
