//! Property tests for rolling-hash sequences and the factor sieve.

use proptest::prelude::*;

use oracle::{naive_distinct_windows, naive_factorize, naive_is_prime, naive_window_digest};
use rangekit::factor::FactorSieve;
use rangekit::hash::{DoubleHashSequence, HashScheme, HashSequence, Identity};

// =============================================================================
// Rolling hash
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn window_digest_matches_direct_sum(
        values in prop::collection::vec(0u64..1_000, 1..40),
        window in (0usize..40, 0usize..40),
        slack in 0usize..8,
    ) {
        let capacity = values.len() + slack;
        let seq = HashSequence::with_data(capacity, HashScheme::PRIMARY, Identity, &values).unwrap();

        let (l, r) = (window.0 % values.len(), window.1 % values.len());
        let (l, r) = (l.min(r), l.max(r));
        let scheme = HashScheme::PRIMARY;
        let expected = naive_window_digest(&values[l..=r], capacity, scheme.base, scheme.modulus);
        prop_assert_eq!(seq.query(l, r), expected);
    }

    #[test]
    fn equal_windows_hash_equal(
        pattern in prop::collection::vec(b'a'..=b'c', 1..10),
        gap in prop::collection::vec(b'a'..=b'c', 0..10),
    ) {
        let mut data = pattern.clone();
        data.extend(&gap);
        data.extend(&pattern);

        let seq = DoubleHashSequence::with_data(
            data.len(),
            HashScheme::PRIMARY,
            HashScheme::SECONDARY,
            Identity,
            &data,
        ).unwrap();
        let width = pattern.len();
        let second = width + gap.len();
        prop_assert_eq!(seq.query(0, width - 1), seq.query(second, second + width - 1));
    }

    #[test]
    fn distinct_windows_match_naive_count(
        data in prop::collection::vec(b'a'..=b'd', 1..60),
        width in 1usize..8,
    ) {
        let seq = DoubleHashSequence::with_data(
            data.len(),
            HashScheme::PRIMARY,
            HashScheme::SECONDARY,
            Identity,
            &data,
        ).unwrap();
        prop_assert_eq!(seq.distinct_windows(width), naive_distinct_windows(&data, width));
    }
}

// =============================================================================
// Factor sieve
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn factorization_matches_trial_division(
        bound in 1u32..2_000,
        n in 0u64..5_000_000,
    ) {
        let sieve = FactorSieve::new(bound);
        prop_assert_eq!(sieve.factorize(n).to_vec(), naive_factorize(n));
        prop_assert_eq!(sieve.is_prime(n), naive_is_prime(n));
    }

    #[test]
    fn factors_multiply_back(n in 1u64..1_000_000_000_000) {
        let sieve = FactorSieve::new(10_000);
        let factors = sieve.factorize(n);
        let product = factors.iter().fold(1u64, |acc, &(p, e)| acc * p.pow(e));
        prop_assert_eq!(product, n);
        prop_assert!(factors.windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert!(factors.iter().all(|&(p, _)| sieve.is_prime(p)));
    }

    #[test]
    fn divisors_divide(n in 1u64..100_000) {
        let sieve = FactorSieve::new(1_000);
        let divisors = sieve.divisors(n);
        let naive: Vec<u64> = (1..=n).filter(|d| n % d == 0).collect();
        prop_assert_eq!(divisors, naive);
    }
}
