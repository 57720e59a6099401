//! Brute-force reference models for differential testing.
//!
//! Everything here is written the slow, literal way: folds walk every
//! element, searches scan one position at a time, and primality is trial
//! division. The models know nothing about trees; callers pass the algebra
//! in as closures.
//!
//! # Example
//!
//! ```
//! use oracle::NaiveArray;
//!
//! let mut array = NaiveArray::from_values(0, vec![1i64, 2, 3, 4, 5]);
//! array.map_point(2, |x| *x += 10);
//! assert_eq!(array.fold(0, 4, 0, |acc, x| acc + x), 25);
//! assert_eq!(array.min_from_left(0, 4, 0, |acc, x| acc + x, |&s| s >= 10), 2);
//! ```

use rustc_hash::FxHashSet;

// =============================================================================
// NaiveArray
// =============================================================================

/// A plain vector addressed by logical positions starting at `first`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaiveArray<T> {
    first: i64,
    values: Vec<T>,
}

impl<T: Clone> NaiveArray<T> {
    /// Positions `first..=last`, all set to `fill`.
    pub fn new(first: i64, last: i64, fill: T) -> Self {
        let len = (last - first + 1).max(0) as usize;
        return NaiveArray {
            first,
            values: vec![fill; len],
        };
    }
}

impl<T> NaiveArray<T> {
    pub fn from_values(first: i64, values: Vec<T>) -> Self {
        return NaiveArray { first, values };
    }

    pub fn first(&self) -> i64 {
        return self.first;
    }

    pub fn last(&self) -> i64 {
        return self.first + self.values.len() as i64 - 1;
    }

    pub fn len(&self) -> usize {
        return self.values.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.values.is_empty();
    }

    pub fn values(&self) -> &[T] {
        return &self.values;
    }

    pub fn get(&self, pos: i64) -> Option<&T> {
        let index = self.index(pos)?;
        return self.values.get(index);
    }

    /// Mutate one position. Positions outside the array are ignored.
    pub fn map_point(&mut self, pos: i64, f: impl FnOnce(&mut T)) {
        if let Some(index) = self.index(pos) {
            f(&mut self.values[index]);
        }
    }

    /// Mutate every position of `[l, r]` clamped into the array.
    pub fn map_range(&mut self, l: i64, r: i64, mut f: impl FnMut(&mut T)) {
        if let Some((lo, hi)) = self.clamp(l, r) {
            for value in &mut self.values[lo..=hi] {
                f(value);
            }
        }
    }

    /// Left-to-right fold over `[l, r]` clamped into the array.
    pub fn fold<A>(&self, l: i64, r: i64, init: A, mut f: impl FnMut(A, &T) -> A) -> A {
        let mut acc = init;
        if let Some((lo, hi)) = self.clamp(l, r) {
            for value in &self.values[lo..=hi] {
                acc = f(acc, value);
            }
        }
        return acc;
    }

    /// First `p` in `[l, r]` whose prefix fold `[l, p]` satisfies `pred`,
    /// else `r + 1` (after clamping).
    pub fn min_from_left<A>(
        &self,
        l: i64,
        r: i64,
        init: A,
        mut merge: impl FnMut(A, &T) -> A,
        pred: impl Fn(&A) -> bool,
    ) -> i64 {
        let Some((lo, hi)) = self.clamp(l, r) else {
            return r + 1;
        };
        let mut acc = init;
        for index in lo..=hi {
            acc = merge(acc, &self.values[index]);
            if pred(&acc) {
                return self.first + index as i64;
            }
        }
        return self.first + hi as i64 + 1;
    }

    /// Last `p` in `[l, r]` whose suffix fold `[p, r]` satisfies `pred`,
    /// else `l - 1` (after clamping). `merge` receives the new element first.
    pub fn max_from_right<A>(
        &self,
        l: i64,
        r: i64,
        init: A,
        mut merge: impl FnMut(&T, A) -> A,
        pred: impl Fn(&A) -> bool,
    ) -> i64 {
        let Some((lo, hi)) = self.clamp(l, r) else {
            return l - 1;
        };
        let mut acc = init;
        for index in (lo..=hi).rev() {
            acc = merge(&self.values[index], acc);
            if pred(&acc) {
                return self.first + index as i64;
            }
        }
        return self.first + lo as i64 - 1;
    }

    fn index(&self, pos: i64) -> Option<usize> {
        if pos < self.first || pos > self.last() {
            return None;
        }
        return Some((pos - self.first) as usize);
    }

    fn clamp(&self, l: i64, r: i64) -> Option<(usize, usize)> {
        let l = l.max(self.first);
        let r = r.min(self.last());
        if l > r {
            return None;
        }
        return Some(((l - self.first) as usize, (r - self.first) as usize));
    }
}

// =============================================================================
// Primes
// =============================================================================

pub fn naive_is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    return true;
}

/// Trial-division factorization, ascending by prime.
pub fn naive_factorize(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut d = 2u64;
    while n > 1 && d <= n / d {
        let mut exp = 0;
        while n % d == 0 {
            n /= d;
            exp += 1;
        }
        if exp > 0 {
            factors.push((d, exp));
        }
        d += 1;
    }
    if n > 1 {
        factors.push((n, 1));
    }
    return factors;
}

// =============================================================================
// Windows
// =============================================================================

/// Digest of `window` as if it were the prefix of a sequence with the given
/// capacity: `sum h(x_j) * base^(capacity - 1 - j) mod modulus`.
pub fn naive_window_digest(window: &[u64], capacity: usize, base: u64, modulus: u64) -> u64 {
    let mut digest = 0u128;
    for (j, &value) in window.iter().enumerate() {
        let mut power = 1u128;
        for _ in 0..capacity - 1 - j {
            power = power * base as u128 % modulus as u128;
        }
        digest = (digest + (value % modulus) as u128 * power) % modulus as u128;
    }
    return digest as u64;
}

/// Number of distinct contiguous windows of `width` elements.
pub fn naive_distinct_windows<T: std::hash::Hash + Eq>(values: &[T], width: usize) -> usize {
    if width == 0 || width > values.len() {
        return 0;
    }
    let seen: FxHashSet<&[T]> = values.windows(width).collect();
    return seen.len();
}
