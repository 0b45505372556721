//! Shared big-integer helpers: modular inverses and square roots, probable
//! primality, prime enumeration, and Chinese-remainder reconstruction.

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;

/// Shorthand for small integer constants.
pub fn big(n: i64) -> BigInt {
    BigInt::from(n)
}

/// Parses a base-10 integer literal. Panics on malformed input, which is an
/// internal error for the hard-coded constants this is used on.
pub fn big_from_decimal(s: &str) -> BigInt {
    BigInt::parse_bytes(s.as_bytes(), 10).expect("invalid decimal literal")
}

/// Parses a base-16 integer literal (no `0x` prefix). Panics on malformed
/// input.
pub fn big_from_hex(s: &str) -> BigInt {
    BigInt::parse_bytes(s.as_bytes(), 16).expect("invalid hex literal")
}

/// Computes the inverse of `a` modulo `m` via the extended Euclidean
/// algorithm, or `None` when `gcd(a, m) != 1`.
pub fn modinv(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let gcd = a.mod_floor(m).extended_gcd(m);
    if gcd.gcd.is_one() {
        Some(gcd.x.mod_floor(m))
    } else {
        None
    }
}

/// Computes the inverse of `k` in GF(p) by Fermat's method (exponentiation
/// modulo p − 2, per Euler's theorem). `p` must be prime.
pub fn fermat_inverse(k: &BigInt, p: &BigInt) -> BigInt {
    k.mod_floor(p).modpow(&(p - 2u32), p)
}

/// Computes a square root of `a` modulo the odd prime `p` by Tonelli–Shanks,
/// or `None` when `a` is a quadratic non-residue.
pub fn mod_sqrt(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let a = a.mod_floor(p);
    if a.is_zero() {
        return Some(BigInt::zero());
    }
    if *p == big(2) {
        return Some(a);
    }

    let one = BigInt::one();
    let p_minus_1 = p - &one;
    if a.modpow(&(&p_minus_1 / 2), p) != one {
        return None;
    }

    // Fast path for p ≡ 3 (mod 4).
    if p.mod_floor(&big(4)) == big(3) {
        return Some(a.modpow(&((p + &one) / 4), p));
    }

    // p − 1 = q·2^s with q odd.
    let mut q = p_minus_1.clone();
    let mut s = 0u64;
    while q.is_even() {
        q /= 2;
        s += 1;
    }

    // Any quadratic non-residue will do as the seed of the 2-Sylow walk.
    let mut z = big(2);
    while z.modpow(&(&p_minus_1 / 2), p) == one {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) / 2), p);

    while !t.is_one() {
        let mut i = 0u64;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = (&t2 * &t2).mod_floor(p);
            i += 1;
        }
        let b = c.modpow(&(BigInt::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b).mod_floor(p);
        t = (&t * &c).mod_floor(p);
        r = (&r * &b).mod_floor(p);
    }
    Some(r)
}

/// Miller–Rabin probable-primality test with base 2 plus `rounds` random
/// witnesses.
pub fn is_probable_prime(n: &BigInt, rounds: usize) -> bool {
    let two = big(2);
    if *n < two {
        return false;
    }
    for small in [2i64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let small = big(small);
        if n.mod_floor(&small).is_zero() {
            return *n == small;
        }
    }

    // n − 1 = d·2^s with d odd.
    let n_minus_1 = n - 1u32;
    let mut d = n_minus_1.clone();
    let mut s = 0u64;
    while d.is_even() {
        d /= 2;
        s += 1;
    }

    let mut rng = OsRng;
    let witness = |a: &BigInt| -> bool {
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            return true;
        }
        for _ in 1..s {
            x = (&x * &x).mod_floor(n);
            if x == n_minus_1 {
                return true;
            }
        }
        false
    };

    if !witness(&two) {
        return false;
    }
    for _ in 0..rounds {
        let a = rng.gen_bigint_range(&two, &n_minus_1);
        if !witness(&a) {
            return false;
        }
    }
    true
}

/// Returns the smallest probable prime strictly greater than `n`.
pub fn next_prime(n: &BigInt) -> BigInt {
    if *n <= BigInt::one() {
        return big(2);
    }
    if *n == big(2) {
        return big(3);
    }

    let mut p = n.clone();
    if p.is_even() {
        p += 1u32;
        if is_probable_prime(&p, 20) {
            return p;
        }
    }
    loop {
        p += 2u32;
        if is_probable_prime(&p, 20) {
            return p;
        }
    }
}

/// Unbounded stream of the primes 2, 3, 5, 7, ...
pub fn primes() -> Primes {
    Primes {
        current: BigInt::zero(),
    }
}

pub struct Primes {
    current: BigInt,
}

impl Iterator for Primes {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        self.current = next_prime(&self.current);
        Some(self.current.clone())
    }
}

/// Chinese remainder theorem: finds `x` with `x ≡ residues[i] (mod
/// moduli[i])` for all `i`, in `[0, ∏ moduli)`. Returns `None` when the
/// moduli are not pairwise coprime.
pub fn crt(residues: &[BigInt], moduli: &[BigInt]) -> Option<BigInt> {
    let mut product = BigInt::one();
    for m in moduli {
        product *= m;
    }
    let mut sum = BigInt::zero();
    for (r, m) in residues.iter().zip(moduli) {
        let q = &product / m;
        let s = modinv(&q, m)?;
        sum += r * q * s;
    }
    Some(sum.mod_floor(&product))
}

#[test]
fn test_modinv() {
    let cases: [(i64, i64, Option<i64>); 5] = [
        (3, 7, Some(5)),
        (1, 2, Some(1)),
        (4, 12, None),
        (7919, 7920, Some(7919)),
        (-3, 7, Some(2)),
    ];
    for (a, m, want) in cases {
        assert_eq!(modinv(&big(a), &big(m)), want.map(big), "modinv({}, {})", a, m);
    }
}

#[test]
fn test_fermat_inverse_matches_modinv() {
    let p = big(7919);
    for k in [1i64, 2, 17, 1001, 7918] {
        assert_eq!(fermat_inverse(&big(k), &p), modinv(&big(k), &p).unwrap());
    }
}

#[test]
fn test_mod_sqrt() {
    for p in [29i64, 97, 7919, 1046527] {
        let p = big(p);
        for v in 1i64..30 {
            let square = (&big(v) * &big(v)).mod_floor(&p);
            let root = mod_sqrt(&square, &p).unwrap();
            assert_eq!((&root * &root).mod_floor(&p), square);
        }
    }
    // 2 is a non-residue mod 5.
    assert_eq!(mod_sqrt(&big(2), &big(5)), None);
}

#[test]
fn test_is_probable_prime() {
    for p in [2i64, 3, 5, 97, 7919, 1234567891] {
        assert!(is_probable_prime(&big(p), 20), "{} should be prime", p);
    }
    // 561 and 41041 are Carmichael numbers.
    for c in [1i64, 4, 561, 7889, 41041, 1234567890] {
        assert!(!is_probable_prime(&big(c), 20), "{} should be composite", c);
    }
}

#[test]
fn test_next_prime() {
    let cases = [
        (1i64, 2i64),
        (2, 3),
        (17, 19),
        (1234567890, 1234567891),
    ];
    for (n, want) in cases {
        assert_eq!(next_prime(&big(n)), big(want));
    }
    let first: Vec<BigInt> = primes().take(6).collect();
    assert_eq!(first, vec![big(2), big(3), big(5), big(7), big(11), big(13)]);
}

#[test]
fn test_crt() {
    let x = crt(&[big(2), big(3), big(2)], &[big(3), big(5), big(7)]).unwrap();
    assert_eq!(x, big(23));
    assert_eq!(crt(&[big(1), big(2)], &[big(4), big(6)]), None);
}
