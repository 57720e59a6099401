//! Rangekit - Segment trees parameterized by a combination strategy.
//!
//! A strategy describes the algebra (what a node stores, how two nodes merge,
//! how an update changes a node); the trees supply the mechanics: building,
//! point and range updates, range queries, and boundary searches.
//!
//! # Quick Start
//!
//! ```
//! use rangekit::strategy::{RangeAddSum, Sum};
//! use rangekit::{LazyRangeTree, RangeTree};
//!
//! // Point updates over positions 0..=4
//! let mut tree = RangeTree::new(0, 4, Sum, &[1, 2, 3, 4, 5]);
//! tree.update(2, &10);
//! assert_eq!(tree.query(0, 4), 25);
//!
//! // First position where the prefix sum reaches 10
//! assert_eq!(tree.find_min_from_left(0, 4, |&sum| sum >= 10), 2);
//!
//! // Range updates
//! let mut lazy = LazyRangeTree::new(0, 3, RangeAddSum, &[0, 0, 0, 0]);
//! lazy.update(1, 2, &5);
//! assert_eq!(lazy.query(0, 3), 10);
//! ```
//!
//! # Peer utilities
//!
//! - [`hash`]: rolling-hash digests of sequence windows.
//! - [`factor`]: smallest-prime-factor sieve with primality and factorization.

pub mod error;
pub mod factor;
pub mod hash;
pub mod profiling;
pub mod strategy;
pub mod tree;

pub use error::{Error, Result};
pub use strategy::{LazyStrategy, Span, Strategy};
pub use tree::{LazyRangeTree, RangeTree};
