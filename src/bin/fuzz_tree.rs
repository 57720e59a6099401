//! AFL fuzz harness for the range trees.
//!
//! Each input drives a plain tree, a lazy tree and a brute-force array
//! through the same point updates, range updates, queries and searches, and
//! asserts that all three agree after every step.

#[path = "common/harness.rs"]
mod harness;

use afl::fuzz;

use harness::{FuzzOp, Harness};

fn main() {
    fuzz!(|data: &[u8]| {
        let Some((mut harness, mut remaining)) = Harness::from_bytes(data) else {
            return;
        };
        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            harness.step(op);
        }
        harness.finish();
    });
}
