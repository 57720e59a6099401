//! Byte-driven differential harness shared by the fuzzer and the replayer.
//!
//! The first byte picks the tree size; the rest decodes into operations run
//! against a plain tree, a lazy tree and the brute-force model at once.

use oracle::NaiveArray;
use rangekit::strategy::{RangeAddSum, Sum};
use rangekit::{LazyRangeTree, RangeTree};

/// Positions are offset so that fuzzed trees do not all start at zero.
const FIRST: i64 = -3;

#[derive(Debug, Clone, Copy)]
pub enum FuzzOp {
    /// Add to one position, possibly outside the tree.
    Point { pos: u8, delta: u8 },
    /// Add to every position of a range.
    Range { l: u8, r: u8, delta: u8 },
    Query { l: u8, r: u8 },
    SearchLeft { l: u8, r: u8, threshold: u8 },
    SearchRight { l: u8, r: u8, threshold: u8 },
}

impl FuzzOp {
    pub fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = FuzzOp::Point { pos: rest[0], delta: rest[1] % 16 };
                Some((op, &rest[2..]))
            }
            1 if rest.len() >= 3 => {
                let op = FuzzOp::Range { l: rest[0], r: rest[1], delta: rest[2] % 16 };
                Some((op, &rest[3..]))
            }
            2 if rest.len() >= 2 => Some((FuzzOp::Query { l: rest[0], r: rest[1] }, &rest[2..])),
            3 if rest.len() >= 3 => {
                let op = FuzzOp::SearchLeft { l: rest[0], r: rest[1], threshold: rest[2] };
                Some((op, &rest[3..]))
            }
            4 if rest.len() >= 3 => {
                let op = FuzzOp::SearchRight { l: rest[0], r: rest[1], threshold: rest[2] };
                Some((op, &rest[3..]))
            }
            _ => None,
        }
    }
}

pub struct Harness {
    plain: RangeTree<Sum>,
    lazy: LazyRangeTree<RangeAddSum>,
    model: NaiveArray<i64>,
}

impl Harness {
    /// Build from the leading byte; returns the harness and the op bytes.
    pub fn from_bytes(data: &[u8]) -> Option<(Harness, &[u8])> {
        let (&size, rest) = data.split_first()?;
        let len = (size % 64) as i64 + 1;
        let last = FIRST + len - 1;
        let harness = Harness {
            plain: RangeTree::with_neutral(FIRST, last, Sum),
            lazy: LazyRangeTree::with_neutral(FIRST, last, RangeAddSum),
            model: NaiveArray::new(FIRST, last, 0),
        };
        return Some((harness, rest));
    }

    /// Map a byte onto a position up to two past either end.
    fn position(&self, frac: u8) -> i64 {
        let span = self.model.len() as i64 + 4;
        return FIRST - 2 + frac as i64 * span / 256;
    }

    fn range(&self, a: u8, b: u8) -> (i64, i64) {
        let (a, b) = (self.position(a), self.position(b));
        return (a.min(b), a.max(b));
    }

    fn overlaps(&self, l: i64, r: i64) -> bool {
        return l.max(self.model.first()) <= r.min(self.model.last());
    }

    pub fn step(&mut self, op: FuzzOp) {
        match op {
            FuzzOp::Point { pos, delta } => {
                let pos = self.position(pos);
                let delta = delta as i64;
                self.plain.update(pos, &delta);
                if self.overlaps(pos, pos) {
                    self.lazy.update(pos, pos, &delta);
                }
                self.model.map_point(pos, |x| *x += delta);
            }
            FuzzOp::Range { l, r, delta } => {
                let (l, r) = self.range(l, r);
                let delta = delta as i64;
                if !self.overlaps(l, r) {
                    assert!(self.lazy.try_update(l, r, &delta).is_err());
                    return;
                }
                self.lazy.update(l, r, &delta);
                self.model.map_range(l, r, |x| *x += delta);
                let first = self.model.first();
                let last = self.model.last();
                let lo = l.max(first);
                let hi = r.min(last);
                for pos in lo..=hi {
                    self.plain.update(pos, &delta);
                }
            }
            FuzzOp::Query { l, r } => {
                let (l, r) = self.range(l, r);
                if !self.overlaps(l, r) {
                    assert!(self.plain.try_query(l, r).is_err());
                    assert!(self.lazy.try_query(l, r).is_err());
                    return;
                }
                let expected = self.model.fold(l, r, 0i64, |a, x| a + x);
                assert_eq!(self.plain.query(l, r), expected, "plain query [{l}, {r}]");
                assert_eq!(self.lazy.query(l, r), expected, "lazy query [{l}, {r}]");
            }
            FuzzOp::SearchLeft { l, r, threshold } => {
                let (l, r) = self.range(l, r);
                if !self.overlaps(l, r) {
                    return;
                }
                let reached = |s: &i64| *s >= threshold as i64;
                let expected = self.model.min_from_left(l, r, 0i64, |a, x| a + x, reached);
                assert_eq!(self.plain.find_min_from_left(l, r, reached), expected);
                assert_eq!(self.lazy.find_min_from_left(l, r, reached), expected);
            }
            FuzzOp::SearchRight { l, r, threshold } => {
                let (l, r) = self.range(l, r);
                if !self.overlaps(l, r) {
                    return;
                }
                let reached = |s: &i64| *s >= threshold as i64;
                let expected = self.model.max_from_right(l, r, 0i64, |x, a| x + a, reached);
                assert_eq!(self.plain.find_max_from_right(l, r, reached), expected);
                assert_eq!(self.lazy.find_max_from_right(l, r, reached), expected);
            }
        }
    }

    /// Final whole-tree comparison.
    pub fn finish(&self) {
        assert_eq!(self.plain.slice(), self.model.values().to_vec());
        assert_eq!(self.lazy.slice(), self.model.values().to_vec());
    }
}
