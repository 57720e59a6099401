//! Range tree with deferred range updates.
//!
//! Each node carries a deferred value next to its aggregate. A range update
//! stops at the O(log n) nodes that exactly cover the range and records the
//! update there; the work reaches the children only when some later operation
//! descends through the node.
//!
//! # Push discipline
//!
//! Every traversal calls [`LazyRangeTree::push`] on a node before it reads the
//! node's children, and an update also pushes the sibling it does not descend
//! into. Between operations this keeps one invariant: a node's children
//! reflect every update applied at or above it, except the deferred value
//! stored exactly at that node.

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::profiling;
use crate::strategy::{LazyStrategy, Span};

use super::bounds::Bounds;
use super::search::{self, Descend, Direction};

/// An implicit binary tree over `[first, last]` with range updates.
pub struct LazyRangeTree<S: LazyStrategy> {
    nodes: Vec<S::Node>,
    deferred: Vec<S::Deferred>,
    bounds: Bounds,
    strategy: S,
}

impl<S: LazyStrategy> LazyRangeTree<S> {
    /// Build over `[first, last]`, applying `initial[i]` over the single
    /// position `first + i`. Missing positions stay neutral.
    ///
    /// Panics if `last < first` or `initial` is longer than the range.
    pub fn new(first: i64, last: i64, strategy: S, initial: &[S::Update]) -> LazyRangeTree<S> {
        return match LazyRangeTree::try_new(first, last, strategy, initial) {
            Ok(tree) => tree,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_new(
        first: i64,
        last: i64,
        strategy: S,
        initial: &[S::Update],
    ) -> Result<LazyRangeTree<S>> {
        let bounds = Bounds::new(first, last)?;
        if initial.len() > bounds.len() {
            return Err(Error::DataTooLong {
                len: initial.len(),
                capacity: bounds.len(),
            });
        }

        let slots = 4 * bounds.len();
        let mut tree = LazyRangeTree {
            nodes: vec![strategy.neutral(); slots],
            deferred: vec![strategy.neutral_deferred(); slots],
            bounds,
            strategy,
        };
        tree.build(1, bounds.root(), initial);
        trace!(first, last, len = bounds.len(), "built lazy range tree");
        return Ok(tree);
    }

    /// Build over `[first, last]` with every position neutral.
    pub fn with_neutral(first: i64, last: i64, strategy: S) -> LazyRangeTree<S> {
        return LazyRangeTree::new(first, last, strategy, &[]);
    }

    pub fn first(&self) -> i64 {
        return self.bounds.first();
    }

    pub fn last(&self) -> i64 {
        return self.bounds.last();
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        return self.bounds.len();
    }

    /// Trees always cover at least one position.
    pub fn is_empty(&self) -> bool {
        return self.bounds.is_empty();
    }

    pub fn strategy(&self) -> &S {
        return &self.strategy;
    }

    fn build(&mut self, v: usize, span: Span, data: &[S::Update]) {
        self.deferred[v] = self.strategy.neutral_deferred();
        if span.is_leaf() {
            self.nodes[v] = self.strategy.neutral();
            if let Some(update) = data.get(span.lo) {
                self.strategy.apply(&mut self.nodes[v], &mut self.deferred[v], update, span);
            }
            return;
        }

        let (left, right) = span.halves();
        self.build(v << 1, left, data);
        self.build(v << 1 | 1, right, data);
        self.pull(v);
    }

    fn pull(&mut self, v: usize) {
        self.nodes[v] = self.strategy.merge(&self.nodes[v << 1], &self.nodes[v << 1 | 1]);
    }

    /// Hand the pending value at `v` to its children and clear it.
    ///
    /// On a leaf the value has nowhere to go and is simply cleared.
    fn push(&mut self, v: usize, span: Span) {
        profiling::push();
        let pending = std::mem::replace(&mut self.deferred[v], self.strategy.neutral_deferred());
        if span.is_leaf() {
            return;
        }

        let child = v << 1;
        let (left, right) = self.nodes[child..child + 2].split_at_mut(1);
        let (left_deferred, right_deferred) = self.deferred[child..child + 2].split_at_mut(1);
        self.strategy.push(
            &pending,
            &mut left[0],
            &mut right[0],
            &mut left_deferred[0],
            &mut right_deferred[0],
            span,
        );
    }

    /// Apply `update` to every position of `[l, r]`, clamped into the tree.
    ///
    /// Panics if nothing is left after clamping.
    pub fn update(&mut self, l: i64, r: i64, update: &S::Update) {
        if let Err(err) = self.try_update(l, r, update) {
            panic!("{err}");
        }
    }

    pub fn try_update(&mut self, l: i64, r: i64, update: &S::Update) -> Result<()> {
        let target = self.bounds.clamp(l, r)?;
        self.update_at(1, self.bounds.root(), target, update);
        return Ok(());
    }

    fn update_at(&mut self, v: usize, span: Span, target: Span, update: &S::Update) {
        profiling::node_visit();
        self.push(v, span);
        if span == target {
            self.strategy.apply(&mut self.nodes[v], &mut self.deferred[v], update, span);
            return;
        }

        let (left, right) = span.halves();
        if target.hi <= left.hi {
            self.update_at(v << 1, left, target, update);
            self.push(v << 1 | 1, right);
        } else if target.lo >= right.lo {
            self.push(v << 1, left);
            self.update_at(v << 1 | 1, right, target, update);
        } else {
            self.update_at(v << 1, left, Span::new(target.lo, left.hi), update);
            self.update_at(v << 1 | 1, right, Span::new(right.lo, target.hi), update);
        }
        self.pull(v);
    }

    /// Merge of every position in `[l, r]`, clamped into the tree.
    ///
    /// Takes `&mut self` because pending values are pushed on the way down.
    /// Panics if nothing is left after clamping.
    pub fn query(&mut self, l: i64, r: i64) -> S::Node {
        return match self.try_query(l, r) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_query(&mut self, l: i64, r: i64) -> Result<S::Node> {
        let target = self.bounds.clamp(l, r)?;
        return Ok(self.query_at(1, self.bounds.root(), target));
    }

    /// Aggregate of a single position.
    pub fn get(&mut self, pos: i64) -> S::Node {
        return self.query(pos, pos);
    }

    fn query_at(&mut self, v: usize, span: Span, target: Span) -> S::Node {
        profiling::node_visit();
        self.push(v, span);
        if span == target {
            return self.nodes[v].clone();
        }

        let (left, right) = span.halves();
        if target.hi <= left.hi {
            return self.query_at(v << 1, left, target);
        }
        if target.lo >= right.lo {
            return self.query_at(v << 1 | 1, right, target);
        }
        let head = self.query_at(v << 1, left, Span::new(target.lo, left.hi));
        let tail = self.query_at(v << 1 | 1, right, Span::new(right.lo, target.hi));
        return self.strategy.merge(&head, &tail);
    }

    /// Smallest `p` in `[l, r]` such that `pred(query(l, p))` holds, or
    /// `r + 1` when there is none.
    pub fn find_min_from_left(&mut self, l: i64, r: i64, pred: impl FnMut(&S::Node) -> bool) -> i64 {
        let bounds = self.bounds;
        return search::locate(self, &bounds, l, r, Direction::Ascending, pred);
    }

    /// Largest `p` in `[l, r]` such that `pred` holds for every prefix ending
    /// at or before `p`, or `l - 1` when it fails on `[l, l]`.
    pub fn find_max_from_left(
        &mut self,
        l: i64,
        r: i64,
        mut pred: impl FnMut(&S::Node) -> bool,
    ) -> i64 {
        return self.find_min_from_left(l, r, |node| !pred(node)) - 1;
    }

    /// Largest `p` in `[l, r]` such that `pred(query(p, r))` holds, or
    /// `l - 1` when there is none.
    pub fn find_max_from_right(&mut self, l: i64, r: i64, pred: impl FnMut(&S::Node) -> bool) -> i64 {
        let bounds = self.bounds;
        return search::locate(self, &bounds, l, r, Direction::Descending, pred);
    }

    /// Smallest `p` in `[l, r]` such that `pred` holds for every suffix
    /// starting at or after `p`, or `r + 1` when it fails on `[r, r]`.
    pub fn find_min_from_right(
        &mut self,
        l: i64,
        r: i64,
        mut pred: impl FnMut(&S::Node) -> bool,
    ) -> i64 {
        return self.find_max_from_right(l, r, |node| !pred(node)) + 1;
    }

    /// Every leaf aggregate, in position order.
    ///
    /// Pending values are carried down on copies, so the tree itself is left
    /// untouched.
    pub fn slice(&self) -> Vec<S::Node> {
        let mut out = Vec::with_capacity(self.len());
        self.collect(
            1,
            self.bounds.root(),
            self.nodes[1].clone(),
            self.deferred[1].clone(),
            &mut out,
        );
        return out;
    }

    fn collect(
        &self,
        v: usize,
        span: Span,
        node: S::Node,
        pending: S::Deferred,
        out: &mut Vec<S::Node>,
    ) {
        if span.is_leaf() {
            out.push(node);
            return;
        }

        let child = v << 1;
        let mut left = self.nodes[child].clone();
        let mut right = self.nodes[child + 1].clone();
        let mut left_deferred = self.deferred[child].clone();
        let mut right_deferred = self.deferred[child + 1].clone();
        self.strategy.push(
            &pending,
            &mut left,
            &mut right,
            &mut left_deferred,
            &mut right_deferred,
            span,
        );

        let (left_span, right_span) = span.halves();
        self.collect(child, left_span, left, left_deferred, out);
        self.collect(child + 1, right_span, right, right_deferred, out);
    }
}

impl<S: LazyStrategy> Descend for LazyRangeTree<S> {
    type Node = S::Node;

    fn visit(&mut self, v: usize, span: Span) {
        profiling::node_visit();
        self.push(v, span);
    }

    fn node(&self, v: usize) -> &S::Node {
        return &self.nodes[v];
    }

    fn neutral(&self) -> S::Node {
        return self.strategy.neutral();
    }

    fn merge(&self, left: &S::Node, right: &S::Node) -> S::Node {
        return self.strategy.merge(left, right);
    }
}

impl<S> Clone for LazyRangeTree<S>
where
    S: LazyStrategy + Clone,
{
    fn clone(&self) -> Self {
        return LazyRangeTree {
            nodes: self.nodes.clone(),
            deferred: self.deferred.clone(),
            bounds: self.bounds,
            strategy: self.strategy.clone(),
        };
    }
}

impl<S> fmt::Debug for LazyRangeTree<S>
where
    S: LazyStrategy + fmt::Debug,
    S::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("LazyRangeTree")
            .field("first", &self.first())
            .field("last", &self.last())
            .field("strategy", &self.strategy)
            .field("leaves", &self.slice())
            .finish();
    }
}

/// Renders the leaf aggregates, e.g. `[1, 2, 3]`.
impl<S> fmt::Display for LazyRangeTree<S>
where
    S: LazyStrategy,
    S::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{:?}", self.slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AffineMap, RangeAddSum, RangeAffineSum, RangeAssignMin, RangeAssignSum};

    #[test]
    fn range_add_then_query() {
        let mut tree = LazyRangeTree::new(0, 3, RangeAddSum, &[0, 0, 0, 0]);
        tree.update(1, 2, &5);
        assert_eq!(tree.query(0, 3), 10);
        assert_eq!(tree.query(0, 0), 0);
        assert_eq!(tree.query(1, 1), 5);
        assert_eq!(tree.query(2, 3), 5);
    }

    #[test]
    fn overlapping_updates_accumulate() {
        let mut tree = LazyRangeTree::new(0, 7, RangeAddSum, &[1, 2, 3, 4, 5, 6, 7, 8]);
        tree.update(0, 5, &1);
        tree.update(3, 7, &-2);
        tree.update(4, 4, &10);
        assert_eq!(tree.slice(), vec![2, 3, 4, 3, 14, 5, 5, 6]);
        assert_eq!(tree.query(2, 5), 4 + 3 + 14 + 5);
        assert_eq!(tree.query(0, 7), 42);
    }

    #[test]
    fn slice_does_not_disturb_pending() {
        let mut tree = LazyRangeTree::with_neutral(0, 9, RangeAddSum);
        tree.update(0, 9, &3);
        let before = tree.slice();
        assert_eq!(before, vec![3; 10]);
        assert_eq!(tree.slice(), before);
        assert_eq!(tree.query(4, 6), 9);
    }

    #[test]
    fn update_clamps_and_rejects_inverted() {
        let mut tree = LazyRangeTree::with_neutral(10, 14, RangeAddSum);
        tree.update(0, 11, &2);
        assert_eq!(tree.slice(), vec![2, 2, 0, 0, 0]);
        assert_eq!(
            tree.try_update(15, 20, &1),
            Err(Error::InvertedRange { l: 15, r: 20, first: 10, last: 14 })
        );
        assert_eq!(tree.slice(), vec![2, 2, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "inverted range")]
    fn inverted_update_panics() {
        let mut tree = LazyRangeTree::with_neutral(0, 3, RangeAddSum);
        tree.update(3, 1, &1);
    }

    #[test]
    fn assign_sum_overrides() {
        let mut tree = LazyRangeTree::new(0, 5, RangeAssignSum, &[1, 1, 1, 1, 1, 1]);
        tree.update(0, 3, &4);
        tree.update(2, 5, &-1);
        assert_eq!(tree.slice(), vec![4, 4, -1, -1, -1, -1]);
        assert_eq!(tree.query(1, 3), 2);
    }

    #[test]
    fn assign_min_with_unwritten_tail() {
        let mut tree = LazyRangeTree::new(0, 5, RangeAssignMin, &[5, 6, 7]);
        assert_eq!(tree.query(3, 5), i64::MAX);
        tree.update(2, 4, &1);
        assert_eq!(tree.query(0, 5), 1);
        assert_eq!(tree.query(5, 5), i64::MAX);
        assert_eq!(tree.find_min_from_left(0, 5, |&m| m <= 1), 2);
    }

    #[test]
    fn affine_sum_composes_updates() {
        let modulus = 998_244_353;
        let initial: Vec<AffineMap> = (1..=4).map(AffineMap::constant).collect();
        let mut tree = LazyRangeTree::new(0, 3, RangeAffineSum::new(modulus), &initial);
        tree.update(0, 2, &AffineMap::new(2, 1));
        tree.update(1, 3, &AffineMap::new(3, 0));
        // [1, 2, 3, 4] -> [3, 5, 7, 4] -> [3, 15, 21, 12]
        assert_eq!(tree.slice(), vec![3, 15, 21, 12]);
        assert_eq!(tree.query(0, 3), 51);
    }

    #[test]
    fn searches_see_pending_updates() {
        let mut tree = LazyRangeTree::new(0, 4, RangeAddSum, &[1, 1, 1, 1, 1]);
        tree.update(2, 4, &4);
        // values [1, 1, 5, 5, 5]; prefixes 1, 2, 7, 12, 17
        assert_eq!(tree.find_min_from_left(0, 4, |&s| s >= 7), 2);
        assert_eq!(tree.find_max_from_left(0, 4, |&s| s < 12), 2);
        // suffixes from 4: 5, 10, 15, 16, 17
        assert_eq!(tree.find_max_from_right(0, 4, |&s| s >= 15), 2);
        assert_eq!(tree.find_min_from_right(0, 4, |&s| s <= 10), 3);
        assert_eq!(tree.find_max_from_right(0, 4, |&s| s >= 100), -1);
    }

    #[test]
    fn display_renders_leaves() {
        let mut tree = LazyRangeTree::new(0, 2, RangeAddSum, &[1, 2, 3]);
        tree.update(0, 2, &1);
        assert_eq!(tree.to_string(), "[2, 3, 4]");
    }
}
