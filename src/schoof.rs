//! Schoof's algorithm for counting the points of a curve over 𝔽_q.
//!
//! The trace of Frobenius t satisfies π² − tπ + q = 0 on every torsion
//! subgroup. For each small prime ℓ the trace is recovered modulo ℓ by
//! testing the candidate characteristic polynomials against the ℓ-torsion,
//! represented in 𝔽_q[x]/(ψ_ℓ); the residues are then recombined with the
//! CRT inside the Hasse interval, which pins t uniquely once ∏ℓ > 4√q.
//!
//! Each ℓ gets its own worker over its own curve snapshot; the workers run
//! in parallel, every result stays tagged with its prime, and the first
//! worker error cancels the remaining work.

use log::debug;
use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_traits::{One, ToPrimitive, Zero};
use rayon::prelude::*;

use crate::curve::Curve;
use crate::endo::{self, Endo, Qring};
use crate::polynomial::Poly;
use crate::util::{big, crt, next_prime};
use crate::Error;

impl Curve {
    /// Counts the points of this curve over its prime field.
    pub fn schoof(&self) -> Result<BigInt, Error> {
        curve_order(&self.p, &self.a, &self.b)
    }
}

/// Computes #E(𝔽_q) for y² = x³ + ax + b over 𝔽_q by Schoof's algorithm.
pub fn curve_order(q: &BigInt, a: &BigInt, b: &BigInt) -> Result<BigInt, Error> {
    debug!(
        "counting points of y^2 = {} over F_{}",
        Curve::from_equation(q, a, b).equation_poly(),
        q
    );

    // Enough small primes that the CRT modulus clears the Hasse bound 4√q.
    let goal = q.sqrt() * 4u32;
    let mut ells = Vec::new();
    let mut modulus = BigInt::one();
    let mut ell = big(2);
    while modulus <= goal {
        ells.push(ell.clone());
        modulus *= &ell;
        ell = next_prime(&ell);
    }

    let traces = ells
        .par_iter()
        .map(|ell| {
            let snapshot = Curve::from_equation(q, a, b);
            trace_mod(&snapshot, ell).map(|t| (t, ell.clone()))
        })
        .collect::<Result<Vec<(BigInt, BigInt)>, Error>>()?;

    let (residues, moduli): (Vec<BigInt>, Vec<BigInt>) = traces.into_iter().unzip();
    for (t, ell) in residues.iter().zip(&moduli) {
        debug!("trace {} mod {}", t, ell);
    }

    let mut t = crt(&residues, &moduli).expect("trace moduli are distinct primes");
    if t >= &modulus / 2 {
        t -= &modulus;
    }
    debug!("trace of Frobenius = {}", t);

    Ok(q + 1 - t)
}

/// The shared-factor signal or a scan that ran dry.
enum TraceFail {
    SharedFactor(Poly),
    NoMatch,
}

/// Computes the trace of Frobenius modulo ℓ.
fn trace_mod(c: &Curve, ell: &BigInt) -> Result<BigInt, Error> {
    let q = &c.p;
    let f = c.equation_poly();

    if *ell == big(2) {
        // t is even iff the curve has a point of order 2, which exists iff
        // x³ + ax + b has a root in 𝔽_q.
        let ring = Qring {
            h: f,
            q: q.clone(),
        };
        return Ok(if ring.irreducible() {
            BigInt::one()
        } else {
            BigInt::zero()
        });
    }

    let ell_small = ell.to_u64().expect("trace primes are small");
    let mut h = c.division_polynomial(ell_small).monic(q);

    loop {
        if h.degree() == 0 {
            return Err(Error::NoCharacterPoly);
        }
        let ring = Qring {
            h: h.clone(),
            q: q.clone(),
        };
        match trace_candidates(&ring, c, ell) {
            Ok(t) => return Ok(t),
            Err(TraceFail::SharedFactor(d)) => {
                let g = h.gcd(&d, q);
                debug!(
                    "found a degree-{} factor of the {}-division polynomial",
                    g.degree(),
                    ell
                );
                if g.degree() == 0 || g == h {
                    return Err(Error::NoCharacterPoly);
                }
                h = g;
            }
            Err(TraceFail::NoMatch) => return Err(Error::NoCharacterPoly),
        }
    }
}

/// One pass over the candidate traces in the current quotient ring. A
/// zero-division inside the endomorphism arithmetic aborts the pass and
/// reports the factor so the caller can refine h.
fn trace_candidates(ring: &Qring, c: &Curve, ell: &BigInt) -> Result<BigInt, TraceFail> {
    let q = &ring.q;
    let f = c.equation_poly();

    let pi = endo::frobenius(ring, &f);
    let pi2 = endo::frobenius_square(ring, &f);

    // S = π² + [q mod ℓ]·ι must equal [t]·π for exactly one t.
    let iota = endo::identity(ring);
    let scalar = q.mod_floor(ell);
    let shifted = endo::scalar_mul(ring, &iota, &scalar, &c.a, &f)
        .map_err(TraceFail::SharedFactor)?;
    let s = endo::add(ring, Some(&pi2), shifted.as_ref(), &c.a, &f)
        .map_err(TraceFail::SharedFactor)?;

    let Some(s) = s else {
        return Ok(BigInt::zero());
    };
    if s == pi {
        return Ok(BigInt::one());
    }
    if endo::neg(ring, &s) == pi {
        return Ok(ell - 1u32);
    }

    let ell_small = ell.to_u64().expect("trace primes are small");
    let mut acc: Option<Endo> = Some(pi.clone());
    for t in 2..ell_small - 1 {
        acc = endo::add(ring, acc.as_ref(), Some(&pi), &c.a, &f)
            .map_err(TraceFail::SharedFactor)?;
        if acc.as_ref() == Some(&s) {
            return Ok(big(t as i64));
        }
    }
    Err(TraceFail::NoMatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_mod_l(p: i64, a: i64, b: i64, ell: i64) -> BigInt {
        let c = Curve::from_equation(&big(p), &big(a), &big(b));
        trace_mod(&c, &big(ell)).unwrap()
    }

    #[test]
    fn test_trace_mod_2() {
        // Curves over F_191 with a point of order 2...
        for (a, b) in [(3, 9), (3, 4), (4, 4), (2, 4), (77, 1), (79, 44)] {
            assert_eq!(t_mod_l(191, a, b, 2), big(0), "a={} b={}", a, b);
        }
        // ...and without one.
        for (a, b) in [(50, 10), (92, 13), (52, 99), (27, 13), (40, 46), (180, 101)] {
            assert_eq!(t_mod_l(191, a, b, 2), big(1), "a={} b={}", a, b);
        }
    }

    #[test]
    fn test_trace_mod_3() {
        assert_eq!(t_mod_l(191, 11, 49, 3), big(1));
        assert_eq!(t_mod_l(191, 11, 50, 3), big(0));
        assert_eq!(t_mod_l(191, 12, 50, 3), big(0));
        assert_eq!(t_mod_l(191, 50, 50, 3), big(0));
        assert_eq!(t_mod_l(191, 107, 59, 3), big(2));
        assert_eq!(t_mod_l(191, 104, 52, 3), big(1));
        assert_eq!(t_mod_l(191, 103, 53, 3), big(0));
    }

    #[test]
    fn test_trace_mod_5() {
        assert_eq!(t_mod_l(191, 106, 158, 5), big(0));
        assert_eq!(t_mod_l(191, 69, 78, 5), big(3));
        assert_eq!(t_mod_l(191, 42, 167, 5), big(1));
        assert_eq!(t_mod_l(191, 6, 60, 5), big(0));
        assert_eq!(t_mod_l(191, 23, 171, 5), big(2));
    }

    #[test]
    fn test_trace_mod_11() {
        assert_eq!(t_mod_l(191, 186, 20, 11), big(10));
    }

    #[test]
    fn test_curve_order() {
        assert_eq!(curve_order(&big(191), &big(186), &big(20)).unwrap(), big(204));
        assert_eq!(
            curve_order(&big(65519), &big(14368), &big(6420)).unwrap(),
            big(65614)
        );
    }

    #[test]
    #[ignore = "a 28-bit field, noticeably slow without optimizations"]
    fn test_curve_order_larger_field() {
        assert_eq!(
            curve_order(&big(138172777), &big(135939349), &big(38820686)).unwrap(),
            big(138161621)
        );
    }
}
