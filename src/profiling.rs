//! Simple profiling counters for understanding traversal cost.
//!
//! The hooks are no-ops unless the `profiling` feature is enabled, so the
//! tree recursion pays nothing for them in normal builds.

use std::sync::atomic::{AtomicU64, Ordering};

pub static NODE_VISITS: AtomicU64 = AtomicU64::new(0);
pub static PUSHES: AtomicU64 = AtomicU64::new(0);
pub static SEARCH_STEPS: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn node_visit() {
    #[cfg(feature = "profiling")]
    NODE_VISITS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn push() {
    #[cfg(feature = "profiling")]
    PUSHES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn search_step() {
    #[cfg(feature = "profiling")]
    SEARCH_STEPS.fetch_add(1, Ordering::Relaxed);
}

pub fn reset() {
    NODE_VISITS.store(0, Ordering::Relaxed);
    PUSHES.store(0, Ordering::Relaxed);
    SEARCH_STEPS.store(0, Ordering::Relaxed);
}

pub fn report() -> String {
    let visits = NODE_VISITS.load(Ordering::Relaxed);
    let pushes = PUSHES.load(Ordering::Relaxed);
    let steps = SEARCH_STEPS.load(Ordering::Relaxed);
    let push_rate = if visits > 0 { pushes as f64 / visits as f64 * 100.0 } else { 0.0 };

    format!(
        "Visits: {}, Pushes: {} ({:.1}% of visits), Search steps: {}",
        visits, pushes, push_rate, steps
    )
}
