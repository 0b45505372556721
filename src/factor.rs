//! Integer factorization by Pollard's rho with Brent-style cycle doubling.
//!
//! The iteration budget is deliberately tiny: the callers only ever need the
//! smooth part of a group order, and a factor that survives the budget is
//! treated as unreachable rather than ground through.

use log::debug;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::util::{big, is_probable_prime};

/// Doubling rounds before a rho walk gives up.
const MAX_RHO_ROUNDS: usize = 20;

/// Finds a nontrivial divisor of the odd composite `n` with the x ← x² + 1
/// walk, or `None` when the budget runs out without a split.
fn pollard_rho(n: &BigInt) -> Option<BigInt> {
    let mut anchor = big(2);
    let mut x = big(2);
    let mut cycle_size = 2usize;
    let mut factor = BigInt::one();

    for _ in 0..MAX_RHO_ROUNDS {
        let mut step = 0;
        while step < cycle_size && factor.is_one() {
            x = (&x * &x + 1u32).mod_floor(n);
            factor = (&x - &anchor).gcd(n);
            step += 1;
        }
        if !factor.is_one() {
            break;
        }
        cycle_size *= 2;
        anchor = x.clone();
    }

    if factor.is_one() || factor == *n {
        return None;
    }
    Some(factor)
}

/// Factors `n` into a sorted multiset of primes. Parts whose smallest prime
/// factor exceeds the rho budget are dropped, so the product of the returned
/// factors divides `n` but may fall short of it.
pub(crate) fn factorize(n: &BigInt) -> Vec<BigInt> {
    let mut factors = Vec::new();
    if *n <= BigInt::one() {
        return factors;
    }

    let mut nn = n.clone();
    while nn.is_even() {
        nn /= 2;
        factors.push(big(2));
    }

    let mut pending = vec![nn];
    while let Some(m) = pending.pop() {
        if m.is_one() {
            continue;
        }
        if is_probable_prime(&m, 5) {
            factors.push(m);
            continue;
        }
        match pollard_rho(&m) {
            Some(d) => {
                pending.push(&m / &d);
                pending.push(d);
            }
            None => {
                debug!("rho budget exhausted, dropping a {}-bit cofactor", m.bits());
            }
        }
    }

    factors.sort();
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorize_small() {
        let cases: [(i64, &[i64]); 5] = [
            (1, &[]),
            (2, &[2]),
            (96, &[2, 2, 2, 2, 2, 3]),
            (7889, &[7, 7, 7, 23]),
            (7919, &[7919]),
        ];
        for (n, want) in cases {
            let got = factorize(&big(n));
            let want: Vec<BigInt> = want.iter().map(|&f| big(f)).collect();
            assert_eq!(got, want, "factorize({})", n);
        }
    }

    #[test]
    fn test_factorize_semiprime() {
        let n = big(1_000_003) * big(1_000_033);
        assert_eq!(factorize(&n), vec![big(1_000_003), big(1_000_033)]);
    }

    #[test]
    fn test_rho_gives_up_on_primes() {
        assert_eq!(pollard_rho(&big(1_000_003)), None);
    }
}
