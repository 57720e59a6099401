//! Concrete end-to-end scenarios for both tree variants.

use rangekit::strategy::{AffineMap, Compose, Max, MinCount, RangeAddSum, RangeAffineSum, RangeAssignMin, Sum};
use rangekit::{Error, LazyRangeTree, RangeTree};

#[test]
fn prefix_sums_with_point_add() {
    let mut tree = RangeTree::new(0, 4, Sum, &[1, 2, 3, 4, 5]);
    assert_eq!(tree.query(0, 4), 15);

    tree.update(2, &10);
    assert_eq!(tree.query(0, 4), 25);
    assert_eq!(tree.query(1, 3), 19);
    assert_eq!(tree.query(2, 2), 13);

    // 1, 3, 16, ... first reaches 10 at position 2
    assert_eq!(tree.find_min_from_left(0, 4, |&s| s >= 10), 2);
    assert_eq!(tree.find_min_from_left(0, 4, |&s| s >= 1000), 5);
    assert_eq!(tree.find_max_from_right(0, 4, |&s| s >= 9), 3);
}

#[test]
fn range_add_over_part_of_the_tree() {
    let mut tree = LazyRangeTree::new(0, 3, RangeAddSum, &[0, 0, 0, 0]);
    tree.update(1, 2, &5);
    assert_eq!(tree.query(0, 3), 10);
    assert_eq!(tree.query(0, 0), 0);
    assert_eq!(tree.query(2, 3), 5);
    assert_eq!(tree.slice(), vec![0, 5, 5, 0]);
}

#[test]
fn negative_logical_positions() {
    let mut tree = RangeTree::with_neutral(-5, 5, Max);
    tree.update(-5, &3);
    tree.update(0, &9);
    tree.update(5, &4);
    assert_eq!(tree.query(-5, -1), 3);
    assert_eq!(tree.query(-100, 100), 9);
    assert_eq!(tree.find_min_from_left(-5, 5, |&m| m >= 9), 0);
    assert_eq!(tree.find_max_from_right(-5, 5, |&m| m >= 9), 0);
}

#[test]
fn ranges_are_clamped() {
    let tree = RangeTree::new(10, 14, Sum, &[1, 1, 1, 1, 1]);
    assert_eq!(tree.query(0, 11), 2);
    assert_eq!(tree.query(13, 99), 2);
    assert_eq!(tree.find_min_from_left(-50, 50, |&s| s >= 5), 14);
    assert_eq!(tree.find_min_from_left(-50, 50, |&s| s >= 6), 15);
}

#[test]
fn point_update_out_of_range_is_ignored() {
    let mut tree = RangeTree::new(0, 3, Sum, &[1, 1, 1, 1]);
    tree.update(4, &100);
    tree.update(-1, &100);
    assert_eq!(tree.query(0, 3), 4);
}

#[test]
fn range_outside_the_tree_is_an_error() {
    let mut plain = RangeTree::new(0, 3, Sum, &[]);
    let mut lazy = LazyRangeTree::new(0, 3, RangeAddSum, &[]);
    let inverted = Error::InvertedRange { l: 5, r: 8, first: 0, last: 3 };
    assert_eq!(plain.try_query(5, 8), Err(inverted.clone()));
    assert_eq!(lazy.try_update(5, 8, &1), Err(inverted.clone()));
    assert_eq!(lazy.try_query(5, 8), Err(inverted));
    plain.update(0, &1);
    assert_eq!(plain.query(0, 3), 1);
}

#[test]
#[should_panic(expected = "inverted range")]
fn inverted_query_panics() {
    let tree = RangeTree::new(0, 3, Sum, &[]);
    tree.query(3, 1);
}

#[test]
fn construction_errors() {
    assert_eq!(RangeTree::try_new(4, 3, Sum, &[]).unwrap_err(), Error::EmptyBounds { first: 4, last: 3 });
    assert_eq!(
        LazyRangeTree::try_new(0, 1, RangeAddSum, &[1, 2, 3]).unwrap_err(),
        Error::DataTooLong { len: 3, capacity: 2 }
    );
    assert_eq!(
        RangeTree::try_new(i64::MAX - 1, i64::MAX, Sum, &[1, 1]).unwrap_err(),
        Error::BoundsAtLimit { first: i64::MAX - 1, last: i64::MAX }
    );
    assert_eq!(
        LazyRangeTree::try_new(i64::MIN, i64::MIN + 1, RangeAddSum, &[]).unwrap_err(),
        Error::BoundsAtLimit { first: i64::MIN, last: i64::MIN + 1 }
    );
}

#[test]
fn failed_searches_next_to_the_i64_limits() {
    let high = RangeTree::new(i64::MAX - 2, i64::MAX - 1, Sum, &[1, 1]);
    assert_eq!(high.find_min_from_left(i64::MIN, i64::MAX, |&s| s >= 100), i64::MAX);
    assert_eq!(high.find_min_from_right(i64::MIN, i64::MAX, |&s| s >= 100), i64::MAX);

    let mut low = LazyRangeTree::new(i64::MIN + 1, i64::MIN + 2, RangeAddSum, &[1, 1]);
    assert_eq!(low.find_max_from_right(i64::MIN, i64::MAX, |&s| s >= 100), i64::MIN);
    assert_eq!(low.find_max_from_left(i64::MIN, i64::MAX, |&s| s >= 100), i64::MIN);
}

#[test]
fn min_with_count() {
    let mut tree = RangeTree::new(0, 5, MinCount, &[4, 2, 7, 2, 2, 9]);
    let node = tree.query(0, 5);
    assert_eq!((node.min, node.count), (2, 3));
    tree.update(1, &1);
    let node = tree.query(0, 5);
    assert_eq!((node.min, node.count), (1, 1));
    assert_eq!(tree.query(2, 5).count, 2);
}

#[test]
fn composition_keeps_order() {
    let m = 998_244_353;
    let maps = [AffineMap::new(2, 3), AffineMap::new(5, 7), AffineMap::new(1, 4)];
    let tree = RangeTree::new(0, 2, Compose::new(m), &maps);

    // x -> 2x + 3 -> 5(2x + 3) + 7 -> ... + 4
    let composed = tree.query(0, 2);
    assert_eq!(composed.eval(1, m), (5 * (2 + 3) + 7) + 4);
    assert_eq!(tree.query(1, 2).eval(10, m), 5 * 10 + 7 + 4);
}

#[test]
fn assign_then_search_with_pending_work() {
    let mut tree = LazyRangeTree::new(0, 7, RangeAssignMin, &[8, 7, 6, 5, 4, 3, 2, 1]);
    tree.update(2, 5, &10);
    assert_eq!(tree.slice(), vec![8, 7, 10, 10, 10, 10, 2, 1]);
    assert_eq!(tree.find_min_from_left(0, 7, |&m| m <= 2), 6);
    assert_eq!(tree.find_max_from_right(0, 5, |&m| m <= 7), 1);
    assert_eq!(tree.find_max_from_left(0, 7, |&m| m >= 7), 5);
}

#[test]
fn affine_range_updates() {
    let m = 1_000_000_007;
    let initial: Vec<AffineMap> = [1, 2, 3, 4].iter().map(|&x| AffineMap::constant(x)).collect();
    let mut tree = LazyRangeTree::new(0, 3, RangeAffineSum::new(m), &initial);
    assert_eq!(tree.query(0, 3), 10);

    tree.update(0, 1, &AffineMap::new(3, 1)); // 4, 7, 3, 4
    tree.update(1, 2, &AffineMap::new(2, 0)); // 4, 14, 6, 4
    assert_eq!(tree.slice(), vec![4, 14, 6, 4]);
    assert_eq!(tree.query(1, 3), 24);
}

#[test]
fn display_shows_leaves() {
    let tree = RangeTree::new(0, 2, Sum, &[3, 1, 2]);
    assert_eq!(tree.to_string(), "[3, 1, 2]");
}
