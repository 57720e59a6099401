//! Rolling-hash digests of sequence windows.
//!
//! A [`HashSequence`] has a fixed capacity `n` and stores prefix sums of
//! `h(x_i) * base^(n - 1 - i)`. The digest of a window `[l, r]` is rescaled by
//! `base^l`, so two windows with equal contents and equal length hash to the
//! same value wherever they sit in the sequence. Digests of windows with
//! different lengths are not comparable.
//!
//! A single modulus near `10^9` collides often enough to matter on large
//! inputs; [`DoubleHashSequence`] keeps two independent schemes side by side.

use std::marker::PhantomData;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// A `(base, modulus)` pair defining one polynomial hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashScheme {
    pub base: u64,
    pub modulus: u64,
}

impl HashScheme {
    pub const PRIMARY: HashScheme = HashScheme {
        base: 131,
        modulus: 1_000_000_007,
    };

    pub const SECONDARY: HashScheme = HashScheme {
        base: 137,
        modulus: 998_244_353,
    };

    /// Checked constructor: the modulus must be in `[2, 2^63)` and the base in
    /// `[1, modulus)`.
    pub fn new(base: u64, modulus: u64) -> Result<HashScheme> {
        let scheme = HashScheme { base, modulus };
        scheme.validate()?;
        return Ok(scheme);
    }

    fn validate(&self) -> Result<()> {
        if self.modulus < 2 || self.modulus >= 1 << 63 || self.base == 0 || self.base >= self.modulus {
            return Err(Error::InvalidScheme {
                base: self.base,
                modulus: self.modulus,
            });
        }
        return Ok(());
    }

    fn mul(&self, a: u64, b: u64) -> u64 {
        return (a as u128 * b as u128 % self.modulus as u128) as u64;
    }
}

impl Default for HashScheme {
    fn default() -> Self {
        return HashScheme::PRIMARY;
    }
}

/// Hash of a single element under a scheme.
pub trait ElementHash<T> {
    fn hash(&self, value: &T, scheme: &HashScheme) -> u64;
}

/// Hashes integer-like values as `value mod modulus`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<T> ElementHash<T> for Identity
where
    T: Copy + Into<u64>,
{
    fn hash(&self, value: &T, scheme: &HashScheme) -> u64 {
        return (*value).into() % scheme.modulus;
    }
}

/// Adapts a closure into an [`ElementHash`].
#[derive(Clone, Copy, Debug)]
pub struct HashFn<F>(pub F);

impl<T, F> ElementHash<T> for HashFn<F>
where
    F: Fn(&T, &HashScheme) -> u64,
{
    fn hash(&self, value: &T, scheme: &HashScheme) -> u64 {
        return (self.0)(value, scheme) % scheme.modulus;
    }
}

/// Append-only sequence answering window digests in O(1).
#[derive(Clone, Debug)]
pub struct HashSequence<T, H> {
    scheme: HashScheme,
    capacity: usize,
    /// `powers[i] = base^i`, for `i < capacity`.
    powers: Vec<u64>,
    /// `prefix[i]` = digest sum of elements `0..=i`, unscaled.
    prefix: Vec<u64>,
    hasher: H,
    _element: PhantomData<fn(&T)>,
}

impl<T, H: ElementHash<T>> HashSequence<T, H> {
    pub fn new(capacity: usize, scheme: HashScheme, hasher: H) -> Result<HashSequence<T, H>> {
        scheme.validate()?;

        let mut powers = Vec::with_capacity(capacity);
        let mut power = 1;
        for _ in 0..capacity {
            powers.push(power);
            power = scheme.mul(power, scheme.base);
        }

        return Ok(HashSequence {
            scheme,
            capacity,
            powers,
            prefix: Vec::with_capacity(capacity),
            hasher,
            _element: PhantomData,
        });
    }

    /// Create and fill with `data` in order.
    pub fn with_data(capacity: usize, scheme: HashScheme, hasher: H, data: &[T]) -> Result<HashSequence<T, H>> {
        if data.len() > capacity {
            return Err(Error::DataTooLong {
                len: data.len(),
                capacity,
            });
        }
        let mut sequence = HashSequence::new(capacity, scheme, hasher)?;
        for value in data {
            sequence.try_add(value)?;
        }
        return Ok(sequence);
    }

    /// Number of elements added so far.
    pub fn len(&self) -> usize {
        return self.prefix.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.prefix.is_empty();
    }

    pub fn capacity(&self) -> usize {
        return self.capacity;
    }

    pub fn scheme(&self) -> &HashScheme {
        return &self.scheme;
    }

    /// Append an element. Panics when the sequence is full.
    pub fn add(&mut self, value: &T) {
        if let Err(err) = self.try_add(value) {
            panic!("{err}");
        }
    }

    pub fn try_add(&mut self, value: &T) -> Result<()> {
        let len = self.prefix.len();
        if len == self.capacity {
            return Err(Error::SequenceFull {
                capacity: self.capacity,
            });
        }

        let hash = self.hasher.hash(value, &self.scheme) % self.scheme.modulus;
        let term = self.scheme.mul(hash, self.powers[self.capacity - len - 1]);
        let previous = self.prefix.last().copied().unwrap_or(0);
        self.prefix.push((previous + term) % self.scheme.modulus);
        return Ok(());
    }

    /// Digest of the window `[l, r]`. Panics unless `l <= r < len()`.
    pub fn query(&self, l: usize, r: usize) -> u64 {
        return match self.try_query(l, r) {
            Ok(digest) => digest,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_query(&self, l: usize, r: usize) -> Result<u64> {
        if l > r || r >= self.len() {
            return Err(Error::HashOutOfBounds { l, r, len: self.len() });
        }
        return Ok(self.window(l, r));
    }

    fn window(&self, l: usize, r: usize) -> u64 {
        if l == 0 {
            return self.prefix[r];
        }
        let modulus = self.scheme.modulus;
        let diff = (self.prefix[r] + modulus - self.prefix[l - 1]) % modulus;
        return self.scheme.mul(diff, self.powers[l]);
    }

    /// Number of distinct digests among all windows of `width` elements.
    pub fn distinct_windows(&self, width: usize) -> usize {
        if width == 0 || width > self.len() {
            return 0;
        }
        let mut seen = FxHashSet::default();
        for l in 0..=self.len() - width {
            seen.insert(self.window(l, l + width - 1));
        }
        return seen.len();
    }
}

/// Two [`HashSequence`]s over the same elements under different schemes.
#[derive(Clone, Debug)]
pub struct DoubleHashSequence<T, H> {
    first: HashSequence<T, H>,
    second: HashSequence<T, H>,
}

impl<T, H> DoubleHashSequence<T, H>
where
    H: ElementHash<T> + Clone,
{
    pub fn new(capacity: usize, first: HashScheme, second: HashScheme, hasher: H) -> Result<DoubleHashSequence<T, H>> {
        return Ok(DoubleHashSequence {
            first: HashSequence::new(capacity, first, hasher.clone())?,
            second: HashSequence::new(capacity, second, hasher)?,
        });
    }

    /// Both default schemes, [`HashScheme::PRIMARY`] and [`HashScheme::SECONDARY`].
    pub fn with_defaults(capacity: usize, hasher: H) -> DoubleHashSequence<T, H> {
        return DoubleHashSequence {
            first: HashSequence::new(capacity, HashScheme::PRIMARY, hasher.clone())
                .unwrap_or_else(|err| panic!("{err}")),
            second: HashSequence::new(capacity, HashScheme::SECONDARY, hasher)
                .unwrap_or_else(|err| panic!("{err}")),
        };
    }

    pub fn with_data(
        capacity: usize,
        first: HashScheme,
        second: HashScheme,
        hasher: H,
        data: &[T],
    ) -> Result<DoubleHashSequence<T, H>> {
        return Ok(DoubleHashSequence {
            first: HashSequence::with_data(capacity, first, hasher.clone(), data)?,
            second: HashSequence::with_data(capacity, second, hasher, data)?,
        });
    }

    pub fn len(&self) -> usize {
        return self.first.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.first.is_empty();
    }

    pub fn capacity(&self) -> usize {
        return self.first.capacity();
    }

    pub fn add(&mut self, value: &T) {
        if let Err(err) = self.try_add(value) {
            panic!("{err}");
        }
    }

    pub fn try_add(&mut self, value: &T) -> Result<()> {
        self.first.try_add(value)?;
        return self.second.try_add(value);
    }

    pub fn query(&self, l: usize, r: usize) -> (u64, u64) {
        return match self.try_query(l, r) {
            Ok(digest) => digest,
            Err(err) => panic!("{err}"),
        };
    }

    pub fn try_query(&self, l: usize, r: usize) -> Result<(u64, u64)> {
        return Ok((self.first.try_query(l, r)?, self.second.try_query(l, r)?));
    }

    /// Number of distinct digest pairs among all windows of `width` elements.
    pub fn distinct_windows(&self, width: usize) -> usize {
        if width == 0 || width > self.len() {
            return 0;
        }
        let mut seen = FxHashSet::default();
        for l in 0..=self.len() - width {
            let r = l + width - 1;
            seen.insert((self.first.window(l, r), self.second.window(l, r)));
        }
        return seen.len();
    }
}
