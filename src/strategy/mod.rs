//! Combination strategies: the algebra a range tree is parameterized by.
//!
//! A strategy supplies the aggregate stored per node, the update type, and the
//! operations that combine and mutate them. The plain [`RangeTree`] needs only
//! [`Strategy`]; the [`LazyRangeTree`] additionally defers updates and needs
//! [`LazyStrategy`].
//!
//! # Laws
//!
//! The tree calls these operations in an order that depends on its shape, so
//! callers must make the result independent of that order:
//!
//! - `merge` is associative and `neutral` is its identity on both sides.
//! - `merge(left, right)` always receives `left` covering the positions
//!   before `right`. Commutativity is never assumed.
//! - For lazy strategies, pushing a deferred value then applying a new update
//!   must equal applying both directly, and `neutral_deferred` must be a no-op.
//!
//! None of this is checked at runtime. Breaking a law gives deterministic but
//! unspecified answers.
//!
//! [`RangeTree`]: crate::tree::RangeTree
//! [`LazyRangeTree`]: crate::tree::LazyRangeTree

pub mod point;
pub mod range;

pub use point::{AffineMap, Compose, Max, Min, MinCount, MinCountNode, Sum};
pub use range::{RangeAddSum, RangeAffineSum, RangeAssignMin, RangeAssignSum};

/// Inclusive internal bounds `[lo, hi]` of a tree node.
///
/// Internal coordinates always start at zero, whatever the tree's logical
/// `first` position is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    pub fn new(lo: usize, hi: usize) -> Span {
        debug_assert!(lo <= hi);
        return Span { lo, hi };
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        return self.hi - self.lo + 1;
    }

    pub fn is_leaf(&self) -> bool {
        return self.lo == self.hi;
    }

    pub fn mid(&self) -> usize {
        return (self.lo + self.hi) >> 1;
    }

    /// Split into the spans of the left and right children.
    pub fn halves(&self) -> (Span, Span) {
        let mid = self.mid();
        return (Span::new(self.lo, mid), Span::new(mid + 1, self.hi));
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        return self.lo <= other.lo && other.hi <= self.hi;
    }

    /// Whether the two spans share at least one position.
    pub fn overlaps(&self, other: &Span) -> bool {
        return self.lo <= other.hi && other.lo <= self.hi;
    }
}

/// Algebra for a plain range tree: point updates, range queries.
pub trait Strategy {
    /// Aggregate stored at every node.
    type Node: Clone;
    /// Point mutation payload. Initial values are updates applied to
    /// `neutral()`.
    type Update;

    /// Identity for `merge`.
    fn neutral(&self) -> Self::Node;

    /// Combine two adjacent aggregates, `left` before `right`.
    fn merge(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;

    /// Mutate a leaf aggregate in place.
    fn apply(&self, node: &mut Self::Node, update: &Self::Update);
}

/// Algebra for a lazy range tree: range updates with deferred propagation.
pub trait LazyStrategy {
    /// Aggregate stored at every node.
    type Node: Clone;
    /// Range mutation payload.
    type Update;
    /// Pending update held at a node for its children.
    type Deferred: Clone;

    /// Identity for `merge`.
    fn neutral(&self) -> Self::Node;

    /// Deferred value whose propagation changes nothing.
    fn neutral_deferred(&self) -> Self::Deferred;

    /// Combine two adjacent aggregates, `left` before `right`.
    fn merge(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;

    /// Apply `update` to every position of `span`.
    ///
    /// The aggregate must reflect the update immediately; its effect on the
    /// children is recorded in `deferred` for a later [`push`].
    ///
    /// [`push`]: LazyStrategy::push
    fn apply(
        &self,
        node: &mut Self::Node,
        deferred: &mut Self::Deferred,
        update: &Self::Update,
        span: Span,
    );

    /// Move a parent's pending update into both children.
    ///
    /// `span` is the parent's span; `span.halves()` gives the children's.
    fn push(
        &self,
        parent: &Self::Deferred,
        left: &mut Self::Node,
        right: &mut Self::Node,
        left_deferred: &mut Self::Deferred,
        right_deferred: &mut Self::Deferred,
        span: Span,
    );
}
