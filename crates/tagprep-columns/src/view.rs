//! Generic column views.

use tagprep_core::{Error, Result};

/// A read-only column of `T`: borrowed caller storage or storage synthesized
/// by this crate.
///
/// The length is fixed at construction. Callers that index with positions
/// taken from the producing collection can use [`value`](ColumnView::value)
/// directly; out-of-range access there is a programming error and panics.
#[derive(Debug, Clone)]
pub enum ColumnView<'a, T> {
    /// Storage owned by the view (synthesized during assembly)
    Owned(Vec<T>),
    /// Caller-owned contiguous storage, shared for one invocation
    Borrowed(&'a [T]),
}

impl<'a, T> ColumnView<'a, T> {
    /// View `expected` elements of a caller-owned buffer.
    ///
    /// Object counts arrive separately from the buffers, so a longer buffer
    /// is truncated to `expected`; a shorter one cannot satisfy the count.
    pub fn from_slice(src: &'a [T], expected: usize) -> Result<Self> {
        if src.len() < expected {
            return Err(Error::Shape(format!(
                "column buffer holds {} values, expected {}",
                src.len(),
                expected
            )));
        }
        Ok(ColumnView::Borrowed(&src[..expected]))
    }

    /// Wrap synthesized storage.
    pub fn from_vec(values: Vec<T>) -> Self {
        ColumnView::Owned(values)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True when the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column contents as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            ColumnView::Owned(v) => v.as_slice(),
            ColumnView::Borrowed(s) => s,
        }
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: Copy> ColumnView<'_, T> {
    /// Element `i`. Panics if `i >= len()`.
    pub fn value(&self, i: usize) -> T {
        self.as_slice()[i]
    }

    /// Element `i`, or `None` when out of range.
    pub fn get(&self, i: usize) -> Option<T> {
        self.as_slice().get(i).copied()
    }
}
