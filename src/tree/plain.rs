//! Range tree with point updates and range queries.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::profiling;
use crate::strategy::{Span, Strategy};

use super::bounds::Bounds;
use super::search::{self, Descend, Direction};

/// An implicit binary tree over logical positions `[first, last]`.
///
/// Node `1` is the root and node `v` has children `2v` and `2v + 1`. Storage is
/// allocated once, at `4 * len` slots, and never resized.
pub struct RangeTree<S: Strategy> {
    nodes: Vec<S::Node>,
    bounds: Bounds,
    strategy: S,
}

impl<S: Strategy> RangeTree<S> {
    /// Build over `[first, last]`, applying `initial[i]` to the neutral
    /// aggregate at position `first + i`. Missing positions stay neutral.
    ///
    /// Panics if `last < first` or `initial` is longer than the range.
    pub fn new(first: i64, last: i64, strategy: S, initial: &[S::Update]) -> RangeTree<S> {
        return match RangeTree::try_new(first, last, strategy, initial) {
            Ok(tree) => tree,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_new(first: i64, last: i64, strategy: S, initial: &[S::Update]) -> Result<RangeTree<S>> {
        let bounds = Bounds::new(first, last)?;
        if initial.len() > bounds.len() {
            return Err(Error::DataTooLong {
                len: initial.len(),
                capacity: bounds.len(),
            });
        }

        let neutral = strategy.neutral();
        let mut tree = RangeTree {
            nodes: vec![neutral; 4 * bounds.len()],
            bounds,
            strategy,
        };
        tree.build(1, bounds.root(), initial);
        trace!(first, last, len = bounds.len(), "built range tree");
        return Ok(tree);
    }

    /// Build over `[first, last]` with every position neutral.
    pub fn with_neutral(first: i64, last: i64, strategy: S) -> RangeTree<S> {
        return RangeTree::new(first, last, strategy, &[]);
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
        if span.is_leaf() {
            let mut node = self.strategy.neutral();
            if let Some(update) = data.get(span.lo) {
                self.strategy.apply(&mut node, update);
            }
            self.nodes[v] = node;
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

    /// Apply `update` at `pos`. Positions outside the tree are ignored.
    pub fn update(&mut self, pos: i64, update: &S::Update) {
        let Some(idx) = self.bounds.to_internal(pos) else {
            debug!(pos, first = self.first(), last = self.last(), "point update outside bounds ignored");
            return;
        };
        self.update_at(1, self.bounds.root(), idx, update);
    }

    fn update_at(&mut self, v: usize, span: Span, idx: usize, update: &S::Update) {
        profiling::node_visit();
        if span.is_leaf() {
            self.strategy.apply(&mut self.nodes[v], update);
            return;
        }

        let (left, right) = span.halves();
        if idx <= left.hi {
            self.update_at(v << 1, left, idx, update);
        } else {
            self.update_at(v << 1 | 1, right, idx, update);
        }
        self.pull(v);
    }

    /// Merge of every position in `[l, r]`, clamped into the tree.
    ///
    /// Panics if nothing is left after clamping.
    pub fn query(&self, l: i64, r: i64) -> S::Node {
        return match self.try_query(l, r) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_query(&self, l: i64, r: i64) -> Result<S::Node> {
        let target = self.bounds.clamp(l, r)?;
        return Ok(self.query_at(1, self.bounds.root(), target));
    }

    /// Aggregate of a single position.
    pub fn get(&self, pos: i64) -> S::Node {
        return self.query(pos, pos);
    }

    fn query_at(&self, v: usize, span: Span, target: Span) -> S::Node {
        profiling::node_visit();
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
    ///
    /// `pred` must turn true at most once as the prefix grows. Otherwise the
    /// answer is some deterministic position, but not a meaningful one.
    pub fn find_min_from_left(&self, l: i64, r: i64, pred: impl FnMut(&S::Node) -> bool) -> i64 {
        return search::locate(&mut Reader(self), &self.bounds, l, r, Direction::Ascending, pred);
    }

    /// Largest `p` in `[l, r]` such that `pred` holds for every prefix ending
    /// at or before `p`, or `l - 1` when it fails on `[l, l]`.
    pub fn find_max_from_left(&self, l: i64, r: i64, mut pred: impl FnMut(&S::Node) -> bool) -> i64 {
        return self.find_min_from_left(l, r, |node| !pred(node)) - 1;
    }

    /// Largest `p` in `[l, r]` such that `pred(query(p, r))` holds, or
    /// `l - 1` when there is none.
    pub fn find_max_from_right(&self, l: i64, r: i64, pred: impl FnMut(&S::Node) -> bool) -> i64 {
        return search::locate(&mut Reader(self), &self.bounds, l, r, Direction::Descending, pred);
    }

    /// Smallest `p` in `[l, r]` such that `pred` holds for every suffix
    /// starting at or after `p`, or `r + 1` when it fails on `[r, r]`.
    pub fn find_min_from_right(&self, l: i64, r: i64, mut pred: impl FnMut(&S::Node) -> bool) -> i64 {
        return self.find_max_from_right(l, r, |node| !pred(node)) + 1;
    }

    /// Every leaf aggregate, in position order.
    pub fn slice(&self) -> Vec<S::Node> {
        let mut out = Vec::with_capacity(self.len());
        self.collect(1, self.bounds.root(), &mut out);
        return out;
    }

    fn collect(&self, v: usize, span: Span, out: &mut Vec<S::Node>) {
        if span.is_leaf() {
            out.push(self.nodes[v].clone());
            return;
        }
        let (left, right) = span.halves();
        self.collect(v << 1, left, out);
        self.collect(v << 1 | 1, right, out);
    }
}

/// Read-only search access; plain nodes never hold pending work.
struct Reader<'a, S: Strategy>(&'a RangeTree<S>);

impl<S: Strategy> Descend for Reader<'_, S> {
    type Node = S::Node;

    fn visit(&mut self, _v: usize, _span: Span) {
        profiling::node_visit();
    }

    fn node(&self, v: usize) -> &S::Node {
        return &self.0.nodes[v];
    }

    fn neutral(&self) -> S::Node {
        return self.0.strategy.neutral();
    }

    fn merge(&self, left: &S::Node, right: &S::Node) -> S::Node {
        return self.0.strategy.merge(left, right);
    }
}

impl<S> Clone for RangeTree<S>
where
    S: Strategy + Clone,
{
    fn clone(&self) -> Self {
        return RangeTree {
            nodes: self.nodes.clone(),
            bounds: self.bounds,
            strategy: self.strategy.clone(),
        };
    }
}

impl<S> fmt::Debug for RangeTree<S>
where
    S: Strategy + fmt::Debug,
    S::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("RangeTree")
            .field("first", &self.first())
            .field("last", &self.last())
            .field("strategy", &self.strategy)
            .field("leaves", &self.slice())
            .finish();
    }
}

/// Renders the leaf aggregates, e.g. `[1, 2, 3]`.
impl<S> fmt::Display for RangeTree<S>
where
    S: Strategy,
    S::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{:?}", self.slice());
    }
}
