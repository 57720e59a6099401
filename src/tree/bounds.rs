//! Logical index bounds of a tree.
//!
//! Callers address positions in `[first, last]`; the trees work in internal
//! coordinates `[0, len - 1]`. All translation and clamping goes through
//! [`Bounds`] so both tree variants agree on edge behavior.

use crate::error::{Error, Result};
use crate::strategy::Span;

/// Logical positions `[first, last]`, with `i64::MIN < first` and
/// `last < i64::MAX` so that `first - 1` and `last + 1` always exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    first: i64,
    len: usize,
}

impl Bounds {
    pub fn new(first: i64, last: i64) -> Result<Bounds> {
        if last < first {
            return Err(Error::EmptyBounds { first, last });
        }
        if first == i64::MIN || last == i64::MAX {
            return Err(Error::BoundsAtLimit { first, last });
        }
        let len = (last as i128 - first as i128 + 1) as usize;
        return Ok(Bounds { first, len });
    }

    pub fn first(&self) -> i64 {
        return self.first;
    }

    pub fn last(&self) -> i64 {
        return self.first + (self.len - 1) as i64;
    }

    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Bounds always hold at least one position.
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Span of the root node.
    pub fn root(&self) -> Span {
        return Span::new(0, self.len - 1);
    }

    /// Internal index of a logical position, if it is inside the bounds.
    pub fn to_internal(&self, pos: i64) -> Option<usize> {
        if pos < self.first || pos > self.last() {
            return None;
        }
        return Some((pos - self.first) as usize);
    }

    pub fn to_logical(&self, idx: usize) -> i64 {
        return self.first + idx as i64;
    }

    /// Clamp `[l, r]` into the bounds and translate it.
    ///
    /// Fails when nothing is left after clamping, including when `l > r` was
    /// already true on input.
    pub fn clamp(&self, l: i64, r: i64) -> Result<Span> {
        let lo = l.max(self.first);
        let hi = r.min(self.last());
        if lo > hi {
            return Err(Error::InvertedRange {
                l,
                r,
                first: self.first,
                last: self.last(),
            });
        }
        return Ok(Span::new((lo - self.first) as usize, (hi - self.first) as usize));
    }
}
