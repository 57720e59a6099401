//! Ready-made strategies for the lazy range tree.
//!
//! Initial values are passed to the tree as updates over single positions, so
//! each strategy documents what an update on a fresh leaf produces.

use super::point::AffineMap;
use super::{LazyStrategy, Span};

/// Range add, range sum. A fresh leaf updated with `x` holds `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeAddSum;

impl LazyStrategy for RangeAddSum {
    type Node = i64;
    type Update = i64;
    type Deferred = i64;

    fn neutral(&self) -> i64 {
        return 0;
    }

    fn neutral_deferred(&self) -> i64 {
        return 0;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return left + right;
    }

    fn apply(&self, node: &mut i64, deferred: &mut i64, update: &i64, span: Span) {
        *node += update * span.len() as i64;
        *deferred += update;
    }

    fn push(
        &self,
        parent: &i64,
        left: &mut i64,
        right: &mut i64,
        left_deferred: &mut i64,
        right_deferred: &mut i64,
        span: Span,
    ) {
        if *parent == 0 {
            return;
        }
        let (left_span, right_span) = span.halves();
        self.apply(left, left_deferred, parent, left_span);
        self.apply(right, right_deferred, parent, right_span);
    }
}

/// Range assign, range sum. A fresh leaf updated with `x` holds `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeAssignSum;

impl LazyStrategy for RangeAssignSum {
    type Node = i64;
    type Update = i64;
    type Deferred = Option<i64>;

    fn neutral(&self) -> i64 {
        return 0;
    }

    fn neutral_deferred(&self) -> Option<i64> {
        return None;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return left + right;
    }

    fn apply(&self, node: &mut i64, deferred: &mut Option<i64>, update: &i64, span: Span) {
        *node = update * span.len() as i64;
        *deferred = Some(*update);
    }

    fn push(
        &self,
        parent: &Option<i64>,
        left: &mut i64,
        right: &mut i64,
        left_deferred: &mut Option<i64>,
        right_deferred: &mut Option<i64>,
        span: Span,
    ) {
        let Some(value) = parent else {
            return;
        };
        let (left_span, right_span) = span.halves();
        self.apply(left, left_deferred, value, left_span);
        self.apply(right, right_deferred, value, right_span);
    }
}

/// Range assign, range minimum. A fresh leaf updated with `x` holds `x`;
/// positions never written stay at `i64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeAssignMin;

impl LazyStrategy for RangeAssignMin {
    type Node = i64;
    type Update = i64;
    type Deferred = Option<i64>;

    fn neutral(&self) -> i64 {
        return i64::MAX;
    }

    fn neutral_deferred(&self) -> Option<i64> {
        return None;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return *left.min(right);
    }

    fn apply(&self, node: &mut i64, deferred: &mut Option<i64>, update: &i64, _span: Span) {
        *node = *update;
        *deferred = Some(*update);
    }

    fn push(
        &self,
        parent: &Option<i64>,
        left: &mut i64,
        right: &mut i64,
        left_deferred: &mut Option<i64>,
        right_deferred: &mut Option<i64>,
        span: Span,
    ) {
        let Some(value) = parent else {
            return;
        };
        let (left_span, right_span) = span.halves();
        self.apply(left, left_deferred, value, left_span);
        self.apply(right, right_deferred, value, right_span);
    }
}

/// Range affine transform, range sum, modulo `modulus`.
///
/// An update `x -> a * x + b` rewrites every position of the range. A fresh
/// leaf holds zero, so building from `AffineMap::constant(x)` stores `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeAffineSum {
    modulus: u64,
}

impl RangeAffineSum {
    pub fn new(modulus: u64) -> RangeAffineSum {
        assert!(modulus >= 1, "modulus must be positive");
        return RangeAffineSum { modulus };
    }

    pub fn modulus(&self) -> u64 {
        return self.modulus;
    }
}

impl LazyStrategy for RangeAffineSum {
    type Node = u64;
    type Update = AffineMap;
    type Deferred = AffineMap;

    fn neutral(&self) -> u64 {
        return 0;
    }

    fn neutral_deferred(&self) -> AffineMap {
        return AffineMap::IDENTITY;
    }

    fn merge(&self, left: &u64, right: &u64) -> u64 {
        return ((*left as u128 + *right as u128) % self.modulus as u128) as u64;
    }

    fn apply(&self, node: &mut u64, deferred: &mut AffineMap, update: &AffineMap, span: Span) {
        let m = self.modulus as u128;
        let scaled = update.a as u128 % m * (*node as u128 % m);
        let shift = update.b as u128 % m * (span.len() as u128 % m);
        *node = ((scaled + shift) % m) as u64;
        *deferred = deferred.then(update, self.modulus);
    }

    fn push(
        &self,
        parent: &AffineMap,
        left: &mut u64,
        right: &mut u64,
        left_deferred: &mut AffineMap,
        right_deferred: &mut AffineMap,
        span: Span,
    ) {
        if *parent == AffineMap::IDENTITY {
            return;
        }
        let (left_span, right_span) = span.halves();
        self.apply(left, left_deferred, parent, left_span);
        self.apply(right, right_deferred, parent, right_span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sum_scales_by_length() {
        let strategy = RangeAddSum;
        let mut node = 10;
        let mut deferred = strategy.neutral_deferred();
        strategy.apply(&mut node, &mut deferred, &3, Span::new(0, 3));
        assert_eq!(node, 22);
        assert_eq!(deferred, 3);
    }

    #[test]
    fn add_sum_push_splits_span() {
        let strategy = RangeAddSum;
        let (mut left, mut right) = (1, 2);
        let (mut left_deferred, mut right_deferred) = (0, 0);
        strategy.push(
            &2,
            &mut left,
            &mut right,
            &mut left_deferred,
            &mut right_deferred,
            Span::new(0, 4),
        );
        // left covers 3 positions, right covers 2
        assert_eq!((left, right), (7, 6));
        assert_eq!((left_deferred, right_deferred), (2, 2));
    }

    #[test]
    fn assign_overrides_pending() {
        let strategy = RangeAssignSum;
        let mut node = 0;
        let mut deferred = strategy.neutral_deferred();
        strategy.apply(&mut node, &mut deferred, &4, Span::new(2, 3));
        strategy.apply(&mut node, &mut deferred, &-1, Span::new(2, 3));
        assert_eq!(node, -2);
        assert_eq!(deferred, Some(-1));
    }

    #[test]
    fn assign_min_ignores_length() {
        let strategy = RangeAssignMin;
        let mut node = strategy.neutral();
        let mut deferred = strategy.neutral_deferred();
        strategy.apply(&mut node, &mut deferred, &-7, Span::new(0, 9));
        assert_eq!(node, -7);
        assert_eq!(strategy.merge(&node, &strategy.neutral()), -7);
    }

    #[test]
    fn affine_composes_newest_last() {
        let strategy = RangeAffineSum::new(998_244_353);
        let mut node = 5;
        let mut deferred = strategy.neutral_deferred();
        let span = Span::new(0, 1);
        // node is the sum of two positions
        strategy.apply(&mut node, &mut deferred, &AffineMap::new(2, 0), span);
        strategy.apply(&mut node, &mut deferred, &AffineMap::new(1, 3), span);
        assert_eq!(node, 2 * 5 + 3 * 2);
        assert_eq!(deferred, AffineMap::new(2, 3));
    }

    #[test]
    fn affine_constant_builds_value() {
        let strategy = RangeAffineSum::new(97);
        let mut node = strategy.neutral();
        let mut deferred = strategy.neutral_deferred();
        strategy.apply(&mut node, &mut deferred, &AffineMap::constant(42), Span::new(3, 3));
        assert_eq!(node, 42);
    }

    #[test]
    #[should_panic(expected = "modulus must be positive")]
    fn affine_rejects_zero_modulus() {
        RangeAffineSum::new(0);
    }

    #[test]
    fn affine_modulus_getter() {
        assert_eq!(RangeAffineSum::new(998_244_353).modulus(), 998_244_353);
    }
}
