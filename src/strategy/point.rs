//! Ready-made strategies for the plain range tree.

use super::Strategy;

/// Range sum; an update adds its delta to one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl Strategy for Sum {
    type Node = i64;
    type Update = i64;

    fn neutral(&self) -> i64 {
        return 0;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return left + right;
    }

    fn apply(&self, node: &mut i64, update: &i64) {
        *node += update;
    }
}

/// Range minimum; an update overwrites one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

impl Strategy for Min {
    type Node = i64;
    type Update = i64;

    fn neutral(&self) -> i64 {
        return i64::MAX;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return *left.min(right);
    }

    fn apply(&self, node: &mut i64, update: &i64) {
        *node = *update;
    }
}

/// Range maximum; an update overwrites one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl Strategy for Max {
    type Node = i64;
    type Update = i64;

    fn neutral(&self) -> i64 {
        return i64::MIN;
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        return *left.max(right);
    }

    fn apply(&self, node: &mut i64, update: &i64) {
        *node = *update;
    }
}

/// Minimum of a range together with how many positions attain it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinCountNode {
    pub min: i64,
    pub count: usize,
}

/// Range minimum with multiplicity; an update overwrites one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinCount;

impl Strategy for MinCount {
    type Node = MinCountNode;
    type Update = i64;

    fn neutral(&self) -> MinCountNode {
        return MinCountNode { min: i64::MAX, count: 0 };
    }

    fn merge(&self, left: &MinCountNode, right: &MinCountNode) -> MinCountNode {
        if left.min < right.min {
            return *left;
        }
        if right.min < left.min {
            return *right;
        }
        return MinCountNode {
            min: left.min,
            count: left.count + right.count,
        };
    }

    fn apply(&self, node: &mut MinCountNode, update: &i64) {
        *node = MinCountNode { min: *update, count: 1 };
    }
}

/// The map `x -> a * x + b` over integers modulo some `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AffineMap {
    pub a: u64,
    pub b: u64,
}

impl AffineMap {
    pub const IDENTITY: AffineMap = AffineMap { a: 1, b: 0 };

    pub fn new(a: u64, b: u64) -> AffineMap {
        return AffineMap { a, b };
    }

    /// The map sending everything to `value`.
    pub fn constant(value: u64) -> AffineMap {
        return AffineMap { a: 0, b: value };
    }

    /// Evaluate at `x`, modulo `modulus`.
    pub fn eval(&self, x: u64, modulus: u64) -> u64 {
        let x = x as u128 % modulus as u128;
        return ((self.a as u128 * x + self.b as u128) % modulus as u128) as u64;
    }

    /// The map that applies `self` first and `next` second.
    pub fn then(&self, next: &AffineMap, modulus: u64) -> AffineMap {
        let m = modulus as u128;
        let a = next.a as u128 * self.a as u128 % m;
        let b = (next.a as u128 * self.b as u128 + next.b as u128) % m;
        return AffineMap { a: a as u64, b: b as u64 };
    }
}

/// Composition of affine maps in position order, modulo `modulus`.
///
/// `query(l, r)` is the map applying position `l` first and `r` last, so the
/// merge is not commutative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compose {
    modulus: u64,
}

impl Compose {
    pub fn new(modulus: u64) -> Compose {
        assert!(modulus >= 1, "modulus must be positive");
        return Compose { modulus };
    }

    pub fn modulus(&self) -> u64 {
        return self.modulus;
    }
}

impl Strategy for Compose {
    type Node = AffineMap;
    type Update = AffineMap;

    fn neutral(&self) -> AffineMap {
        return AffineMap::IDENTITY;
    }

    fn merge(&self, left: &AffineMap, right: &AffineMap) -> AffineMap {
        return left.then(right, self.modulus);
    }

    fn apply(&self, node: &mut AffineMap, update: &AffineMap) {
        *node = AffineMap {
            a: update.a % self.modulus,
            b: update.b % self.modulus,
        };
    }
}
