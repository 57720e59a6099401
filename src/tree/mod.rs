//! Segment trees over a fixed logical index range.
//!
//! Both variants store nodes in a flat arena using implicit heap indexing and
//! take logical positions in `[first, last]`:
//!
//! - [`RangeTree`]: point updates, range queries, boundary searches.
//! - [`LazyRangeTree`]: adds range updates by deferring work at nodes.
//!
//! Range arguments are clamped into the tree. An empty range after clamping
//! is a caller bug and panics (or returns [`Error::InvertedRange`] from the
//! `try_` forms). A plain point update outside the tree is ignored.
//!
//! [`Error::InvertedRange`]: crate::Error::InvertedRange

mod bounds;
pub mod lazy;
pub mod plain;
mod search;

pub use lazy::LazyRangeTree;
pub use plain::RangeTree;
