//! Directional boundary search shared by both tree variants.
//!
//! The search looks for the first position, scanning from one end of a target
//! span, at which a predicate over the accumulated aggregate becomes true. It
//! is written once against [`Descend`]; the plain tree implements it with a
//! no-op visit, the lazy tree pushes pending updates on every visit.
//!
//! The accumulator always holds the merge of everything already ruled out, in
//! range order, so a fully covered subtree costs one merge and one predicate
//! call unless the answer lies inside it.

use crate::profiling;
use crate::strategy::Span;

use super::bounds::Bounds;

/// Node access the search needs from a tree.
pub(crate) trait Descend {
    type Node: Clone;

    /// Called before a node's aggregate or children are read.
    fn visit(&mut self, v: usize, span: Span);

    fn node(&self, v: usize) -> &Self::Node;

    fn neutral(&self) -> Self::Node;

    fn merge(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;
}

/// Scan order of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Prefixes grow rightwards from the left end.
    Ascending,
    /// Suffixes grow leftwards from the right end.
    Descending,
}

impl Direction {
    /// Extend the accumulator by `node`, keeping range order.
    fn join<D: Descend>(self, tree: &D, acc: &D::Node, node: &D::Node) -> D::Node {
        match self {
            Direction::Ascending => tree.merge(acc, node),
            Direction::Descending => tree.merge(node, acc),
        }
    }

    /// Children of `v` in scan order.
    fn children(self, v: usize, span: Span) -> [(usize, Span); 2] {
        let (left, right) = span.halves();
        let left = (v << 1, left);
        let right = (v << 1 | 1, right);
        match self {
            Direction::Ascending => [left, right],
            Direction::Descending => [right, left],
        }
    }
}

/// Find the first internal position of `target` where `pred` holds for the
/// aggregate scanned so far, or `None` when it never holds.
fn search<D, F>(
    tree: &mut D,
    v: usize,
    span: Span,
    target: Span,
    dir: Direction,
    acc: &mut D::Node,
    pred: &mut F,
) -> Option<usize>
where
    D: Descend,
    F: FnMut(&D::Node) -> bool,
{
    if !span.overlaps(&target) {
        return None;
    }
    tree.visit(v, span);
    profiling::search_step();

    if span.is_leaf() || target.contains(&span) {
        let joined = dir.join(&*tree, acc, tree.node(v));
        if !pred(&joined) {
            *acc = joined;
            return None;
        }
        if span.is_leaf() {
            return Some(span.lo);
        }

        // The answer is inside: settle which child holds it before descending.
        let [near, far] = dir.children(v, span);
        let near_joined = dir.join(&*tree, acc, tree.node(near.0));
        if pred(&near_joined) {
            return search(tree, near.0, near.1, target, dir, acc, pred);
        }
        *acc = near_joined;
        return search(tree, far.0, far.1, target, dir, acc, pred);
    }

    let [near, far] = dir.children(v, span);
    if let Some(found) = search(tree, near.0, near.1, target, dir, acc, pred) {
        return Some(found);
    }
    return search(tree, far.0, far.1, target, dir, acc, pred);
}

/// Run a search over logical `[l, r]` and translate the answer.
///
/// Ascending searches return the found position or `r + 1`; descending ones
/// return the found position or `l - 1`, with `l` and `r` clamped into the
/// bounds. Panics when `[l, r]` clamps to nothing.
pub(crate) fn locate<D, F>(tree: &mut D, bounds: &Bounds, l: i64, r: i64, dir: Direction, mut pred: F) -> i64
where
    D: Descend,
    F: FnMut(&D::Node) -> bool,
{
    let target = match bounds.clamp(l, r) {
        Ok(target) => target,
        Err(err) => panic!("{err}"),
    };
    let mut acc = tree.neutral();
    let found = search(tree, 1, bounds.root(), target, dir, &mut acc, &mut pred);
    return match (found, dir) {
        (Some(idx), _) => bounds.to_logical(idx),
        (None, Direction::Ascending) => bounds.to_logical(target.hi) + 1,
        (None, Direction::Descending) => bounds.to_logical(target.lo) - 1,
    };
}
