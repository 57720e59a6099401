//! Smallest-prime-factor sieve with primality testing and factorization.
//!
//! Numbers up to the sieve bound are answered from the table. Larger inputs
//! fall back to deterministic Miller-Rabin for primality and to trial
//! division until the remaining cofactor drops under the bound.

use smallvec::SmallVec;
use tracing::debug;

/// Prime factors with exponents, ascending by prime.
pub type Factors = SmallVec<[(u64, u32); 8]>;

/// Witnesses that make Miller-Rabin exact for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

#[derive(Clone, Debug)]
pub struct FactorSieve {
    /// `smallest[n]` is the least prime dividing `n`, 0 for `n < 2`.
    smallest: Vec<u32>,
    primes: Vec<u32>,
}

impl FactorSieve {
    /// Linear sieve over `0..=bound`.
    pub fn new(bound: u32) -> FactorSieve {
        let mut smallest = vec![0u32; bound as usize + 1];
        let mut primes = Vec::new();

        for i in 2..=bound {
            if smallest[i as usize] == 0 {
                smallest[i as usize] = i;
                primes.push(i);
            }
            let limit = smallest[i as usize];
            for &p in primes.iter() {
                let multiple = i as u64 * p as u64;
                if p > limit || multiple > bound as u64 {
                    break;
                }
                smallest[multiple as usize] = p;
            }
        }

        debug!(bound, primes = primes.len(), "sieve built");
        return FactorSieve { smallest, primes };
    }

    pub fn bound(&self) -> u64 {
        return (self.smallest.len() - 1) as u64;
    }

    /// Primes up to the bound, ascending.
    pub fn primes(&self) -> &[u32] {
        return &self.primes;
    }

    pub fn is_prime(&self, n: u64) -> bool {
        if n <= self.bound() {
            return n >= 2 && self.smallest[n as usize] as u64 == n;
        }
        return miller_rabin(n);
    }

    /// Least prime factor of `n`, when `2 <= n <= bound`.
    pub fn smallest_factor(&self, n: u64) -> Option<u64> {
        if n < 2 || n > self.bound() {
            return None;
        }
        return Some(self.smallest[n as usize] as u64);
    }

    pub fn factorize(&self, n: u64) -> Factors {
        let mut factors = Factors::new();
        if n < 2 {
            return factors;
        }

        let bound = self.bound();
        let mut rest = n;

        for &p in self.primes.iter() {
            let p = p as u64;
            if rest <= bound || p > rest / p {
                break;
            }
            strip(&mut rest, p, &mut factors);
        }

        if rest > bound && !miller_rabin(rest) {
            let mut d = match self.primes.last() {
                None => 2,
                Some(2) => 3,
                Some(&p) => p as u64 + 2,
            };
            while rest > bound && d <= rest / d {
                strip(&mut rest, d, &mut factors);
                d += if d == 2 { 1 } else { 2 };
            }
        }

        if rest > bound {
            factors.push((rest, 1));
            return factors;
        }

        while rest > 1 {
            let p = self.smallest[rest as usize] as u64;
            strip(&mut rest, p, &mut factors);
        }
        return factors;
    }

    /// All positive divisors of `n`, ascending. Empty for `n == 0`.
    pub fn divisors(&self, n: u64) -> Vec<u64> {
        if n == 0 {
            return Vec::new();
        }

        let mut divisors = vec![1u64];
        for (p, exp) in self.factorize(n) {
            let existing = divisors.len();
            let mut power = 1u64;
            for _ in 0..exp {
                power *= p;
                for i in 0..existing {
                    divisors.push(divisors[i] * power);
                }
            }
        }
        divisors.sort_unstable();
        return divisors;
    }

    /// Count of `1..=n` coprime to `n`.
    pub fn euler_phi(&self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        let mut phi = n;
        for (p, _) in self.factorize(n) {
            phi = phi / p * (p - 1);
        }
        return phi;
    }
}

fn strip(rest: &mut u64, p: u64, factors: &mut Factors) {
    let mut exp = 0;
    while *rest % p == 0 {
        *rest /= p;
        exp += 1;
    }
    if exp > 0 {
        factors.push((p, exp));
    }
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    return (a as u128 * b as u128 % m as u128) as u64;
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    return result;
}

fn miller_rabin(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &w in WITNESSES.iter() {
        if n % w == 0 {
            return n == w;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for &w in WITNESSES.iter() {
        let mut x = pow_mod(w, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    return true;
}
