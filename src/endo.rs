//! The endomorphism ring Endo(E[ℓ]) that Schoof's algorithm computes in.
//!
//! Elements are pairs (a, b·y) with a, b ∈ 𝔽_q[x]/(h(x)), where h is the
//! ℓ-th division polynomial or a factor of it (for example the kernel
//! polynomial of an isogeny). The y is implicit but must be accounted for
//! when applying the group law: by the curve equation y² = f(x), every y²
//! is rewritten as the image of x³ + ax + b, which keeps both components
//! inside the ring.
//!
//! The identity endomorphism has no (a, b) representation; callers carry
//! `Option<Endo>` with `None` for it. A slope denominator that is not a unit
//! mod h is not an error: the failing denominator shares a nontrivial factor
//! with h, and the operations surface it as the `Err` payload so the caller
//! can shrink h and retry.

use num_bigint::BigInt;

use crate::polynomial::Poly;

/// The quotient ring 𝔽_q[x]/(h(x)).
#[derive(Clone, Debug)]
pub(crate) struct Qring {
    pub h: Poly,
    pub q: BigInt,
}

impl Qring {
    /// The canonical representative of `p` in the ring.
    pub fn reduce(&self, p: &Poly) -> Poly {
        p.div(&self.h, &self.q).1
    }

    /// In-ring exponentiation by square and multiply.
    pub fn exp(&self, p: &Poly, e: &BigInt) -> Poly {
        let mut r = Poly::one();
        for i in (0..e.bits()).rev() {
            r = self.reduce(&r.mul(&r, Some(&self.q)));
            if e.bit(i) {
                r = self.reduce(&r.mul(p, Some(&self.q)));
            }
        }
        r
    }

    /// Whether h is irreducible over 𝔽_q, decided by gcd(x^q − x, h): the
    /// product of all monic linear factors on the left meets any root of h.
    pub fn irreducible(&self) -> bool {
        let x = Poly::x();
        let xq = self.exp(&x, &self.q).sub(&x, Some(&self.q));
        xq.gcd(&self.h, &self.q).is_one()
    }
}

/// An element a(x) + b(x)·y of Endo(E[ℓ]), reduced mod h.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Endo {
    pub a: Poly,
    pub b: Poly,
}

impl Endo {
    pub fn new(ring: &Qring, a: Poly, b: Poly) -> Endo {
        Endo {
            a: ring.reduce(&a),
            b: ring.reduce(&b),
        }
    }
}

/// The multiplicative identity ι = (x, 1·y).
pub(crate) fn identity(ring: &Qring) -> Endo {
    Endo::new(ring, Poly::x(), Poly::one())
}

/// The Frobenius endomorphism π = (x^q, f^{(q−1)/2}·y).
pub(crate) fn frobenius(ring: &Qring, f: &Poly) -> Endo {
    let xq = ring.exp(&Poly::x(), &ring.q);
    let yq = ring.exp(f, &(&ring.q / 2));
    Endo { a: xq, b: yq }
}

/// π², computed directly as (x^{q²}, f^{(q²−1)/2}·y). The two
/// exponentiations are independent and run concurrently.
pub(crate) fn frobenius_square(ring: &Qring, f: &Poly) -> Endo {
    let q2 = &ring.q * &ring.q;
    let e = &q2 / 2;
    let (a, b) = rayon::join(|| ring.exp(&Poly::x(), &q2), || ring.exp(f, &e));
    Endo { a, b }
}

/// Adds two endomorphisms. `None` is the identity; `Err` carries a
/// denominator sharing a nontrivial factor with h.
pub(crate) fn add(
    ring: &Qring,
    u: Option<&Endo>,
    v: Option<&Endo>,
    a_coef: &BigInt,
    f: &Poly,
) -> Result<Option<Endo>, Poly> {
    let (u, v) = match (u, v) {
        (None, _) => return Ok(v.cloned()),
        (_, None) => return Ok(u.cloned()),
        (Some(u), Some(v)) => (u, v),
    };
    if u.a == v.a {
        if u.b != v.b {
            // Opposite points: the sum is the identity.
            return Ok(None);
        }
        return double(ring, Some(u), a_coef, f);
    }

    let q = &ring.q;
    let den = v.a.sub(&u.a, Some(q));
    let Some(inv) = den.mod_inverse(&ring.h, q) else {
        return Err(den);
    };
    let num = v.b.sub(&u.b, Some(q));
    let slope = ring.reduce(&num.mul(&inv, Some(q)));
    let slope2 = ring.reduce(&slope.mul(&slope, Some(q)));

    // x₃ = f·μ² − x₁ − x₂, y₃ = μ·(x₁ − x₃) − y₁; the f absorbs the y² the
    // squared slope contributes.
    let a3 = ring.reduce(
        &ring
            .reduce(&f.mul(&slope2, Some(q)))
            .sub(&u.a.add(&v.a, Some(q)), Some(q)),
    );
    let b3 = ring.reduce(
        &ring
            .reduce(&slope.mul(&u.a.sub(&a3, Some(q)), Some(q)))
            .sub(&u.b, Some(q)),
    );
    Ok(Some(Endo { a: a3, b: b3 }))
}

/// Doubles an endomorphism, with the same identity and shared-factor
/// conventions as [`add`].
pub(crate) fn double(
    ring: &Qring,
    u: Option<&Endo>,
    a_coef: &BigInt,
    f: &Poly,
) -> Result<Option<Endo>, Poly> {
    let Some(u) = u else {
        return Ok(None);
    };
    let q = &ring.q;

    // μ = (3a² + A) / (2bf)
    let num = ring
        .reduce(&u.a.mul(&u.a, Some(q)))
        .mul(&Poly::from_ints(&[3]), Some(q))
        .add(&Poly::constant(a_coef.clone()), Some(q));
    let den = ring
        .reduce(&u.b.mul(f, Some(q)))
        .mul(&Poly::from_ints(&[2]), Some(q));
    let Some(inv) = den.mod_inverse(&ring.h, q) else {
        return Err(den);
    };
    let slope = ring.reduce(&num.mul(&inv, Some(q)));
    let slope2 = ring.reduce(&slope.mul(&slope, Some(q)));

    let a3 = ring.reduce(
        &ring
            .reduce(&f.mul(&slope2, Some(q)))
            .sub(&u.a.mul(&Poly::from_ints(&[2]), Some(q)), Some(q)),
    );
    let b3 = ring.reduce(
        &ring
            .reduce(&slope.mul(&u.a.sub(&a3, Some(q)), Some(q)))
            .sub(&u.b, Some(q)),
    );
    Ok(Some(Endo { a: a3, b: b3 }))
}

/// Negates an endomorphism.
pub(crate) fn neg(ring: &Qring, u: &Endo) -> Endo {
    Endo {
        a: u.a.clone(),
        b: u.b.neg(Some(&ring.q)),
    }
}

/// The scalar multiple k·u by left-to-right double-and-add over the bits of
/// k below its most significant one. k = 0 yields the identity.
pub(crate) fn scalar_mul(
    ring: &Qring,
    u: &Endo,
    k: &BigInt,
    a_coef: &BigInt,
    f: &Poly,
) -> Result<Option<Endo>, Poly> {
    let mut acc: Option<Endo> = None;
    for i in (0..k.bits()).rev() {
        acc = double(ring, acc.as_ref(), a_coef, f)?;
        if k.bit(i) {
            acc = add(ring, acc.as_ref(), Some(u), a_coef, f)?;
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::util::big;

    fn ring_and_curve() -> (Qring, Curve) {
        // ℓ = 3 torsion of the order-27 curve over 𝔽₁₉.
        let c = Curve::from_equation(&big(19), &big(2), &big(1));
        let h = c.division_polynomial(3).monic(&c.p);
        let ring = Qring {
            h,
            q: c.p.clone(),
        };
        (ring, c)
    }

    #[test]
    fn test_identity_laws() {
        let (ring, c) = ring_and_curve();
        let f = c.equation_poly();
        let iota = identity(&ring);

        let sum = add(&ring, Some(&iota), None, &c.a, &f).unwrap();
        assert_eq!(sum, Some(iota.clone()));
        let sum = add(&ring, None, Some(&iota), &c.a, &f).unwrap();
        assert_eq!(sum, Some(iota.clone()));
        assert_eq!(double(&ring, None, &c.a, &f).unwrap(), None);
        assert_eq!(scalar_mul(&ring, &iota, &big(0), &c.a, &f).unwrap(), None);
        assert_eq!(
            scalar_mul(&ring, &iota, &big(1), &c.a, &f).unwrap(),
            Some(iota)
        );
    }

    #[test]
    fn test_add_opposite_is_identity() {
        let (ring, c) = ring_and_curve();
        let f = c.equation_poly();
        let iota = identity(&ring);
        let minus = neg(&ring, &iota);
        let sum = add(&ring, Some(&iota), Some(&minus), &c.a, &f).unwrap();
        assert_eq!(sum, None);
    }

    #[test]
    fn test_scalar_mul_matches_repeated_add() {
        let (ring, c) = ring_and_curve();
        let f = c.equation_poly();
        let iota = identity(&ring);

        let mut acc: Option<Endo> = None;
        for k in 1u32..6 {
            acc = add(&ring, acc.as_ref(), Some(&iota), &c.a, &f).unwrap();
            let direct = scalar_mul(&ring, &iota, &big(k as i64), &c.a, &f).unwrap();
            assert_eq!(acc, direct, "k = {}", k);
        }
    }

    #[test]
    fn test_noninvertible_denominator_surfaces_factor() {
        // A reducible h = x·(x + 1) over 𝔽₅ and two elements whose slope
        // denominator is x: the inversion must fail and hand back a
        // polynomial sharing the factor x with h.
        let ring = Qring {
            h: Poly::from_ints(&[0, 1, 1]),
            q: big(5),
        };
        let f = Poly::from_ints(&[1, 1, 0, 1]);
        let u = Endo::new(&ring, Poly::x(), Poly::one());
        let v = Endo::new(
            &ring,
            Poly::x().mul(&Poly::from_ints(&[2]), Some(&ring.q)),
            Poly::one(),
        );
        let err = add(&ring, Some(&u), Some(&v), &big(0), &f).unwrap_err();
        assert!(err.gcd(&ring.h, &ring.q).degree() > 0);
    }

    #[test]
    fn test_frobenius_components() {
        let (ring, c) = ring_and_curve();
        let f = c.equation_poly();
        let pi = frobenius(&ring, &f);
        assert_eq!(pi.a, ring.exp(&Poly::x(), &c.p));
        assert_eq!(pi.b, ring.exp(&f, &big(9)));

        let pi2 = frobenius_square(&ring, &f);
        assert_eq!(pi2.a, ring.exp(&Poly::x(), &(&c.p * &c.p)));
        assert_eq!(pi2.b, ring.exp(&f, &big((19 * 19 - 1) / 2)));
    }
}
