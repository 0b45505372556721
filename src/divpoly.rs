//! Division polynomials ψ_n of a curve, built by the odd/even recursion and
//! memoized per curve.
//!
//! The roots of ψ_ℓ (odd ℓ) are the x-coordinates of the nonzero ℓ-torsion
//! points. Even-index entries are carried multiplied by 2y, with every y²
//! rewritten as f(x) = x³ + ax + b, so the whole table lives in 𝔽_p[x]; the
//! constant in front washes out wherever the table is consumed, because only
//! the monic form of ψ_ℓ ever leaves this module's callers.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::curve::Curve;
use crate::polynomial::Poly;
use crate::util::big;

impl Curve {
    /// The curve equation's right-hand side x³ + ax + b as a polynomial.
    pub(crate) fn equation_poly(&self) -> Poly {
        Poly::from_bigints(vec![
            self.b.clone(),
            self.a.clone(),
            BigInt::zero(),
            BigInt::one(),
        ])
    }

    /// Returns ψ_n, computing and caching any missing entries. The cache
    /// only ever grows.
    pub fn division_polynomial(&self, n: u64) -> Poly {
        if let Some(dp) = self.dp_cache.borrow().get(&n) {
            return dp.clone();
        }
        let dp = self.compute_division_polynomial(n);
        self.dp_cache.borrow_mut().insert(n, dp.clone());
        dp
    }

    fn compute_division_polynomial(&self, n: u64) -> Poly {
        let q = &self.p;
        let f = self.equation_poly();
        let a = &self.a;
        let b = &self.b;

        match n {
            0 => Poly::zero(),
            1 => Poly::one(),
            2 => f.mul(&Poly::from_ints(&[4]), Some(q)),
            3 => Poly::from_bigints(vec![
                -(a * a),
                b * 12,
                a * 6,
                BigInt::zero(),
                big(3),
            ])
            .reduce(q),
            4 => Poly::from_bigints(vec![
                b * b * -64 - a * a * a * 8,
                a * b * -32,
                a * a * -40,
                b * 160,
                a * 40,
                BigInt::zero(),
                big(8),
            ])
            .mul(&f, Some(q)),
            _ => {
                let m = n / 2;
                let psi_m_minus_2 = self.division_polynomial(m - 2);
                let psi_m_minus_1 = self.division_polynomial(m - 1);
                let psi_m = self.division_polynomial(m);
                let psi_m_plus_1 = self.division_polynomial(m + 1);
                let psi_m_plus_2 = self.division_polynomial(m + 2);

                if n & 1 == 1 {
                    // ψ_{2m+1} = ψ_{m+2}·ψ_m³ − ψ_{m−1}·ψ_{m+1}³, where the
                    // term holding the even-index cube carries a spurious
                    // (2y)⁴ = 16f² that has to be divided back out.
                    let denom = f.mul(&f, Some(q)).mul(&Poly::from_ints(&[16]), Some(q));
                    let cube_m = psi_m.exp(&big(3), q);
                    let cube_m1 = psi_m_plus_1.exp(&big(3), q);
                    let mut t1 = psi_m_plus_2.mul(&cube_m, Some(q));
                    let mut t2 = psi_m_minus_1.mul(&cube_m1, Some(q));
                    if m & 1 == 0 {
                        t1 = t1.div(&denom, q).0;
                    } else {
                        t2 = t2.div(&denom, q).0;
                    }
                    t1.sub(&t2, Some(q))
                } else {
                    // ψ_{2m} = (ψ_m/ψ_2)·(ψ_{m+2}·ψ_{m−1}² − ψ_{m−2}·ψ_{m+1}²)
                    let sq_m_minus_1 = psi_m_minus_1.exp(&big(2), q);
                    let sq_m_plus_1 = psi_m_plus_1.exp(&big(2), q);
                    let dp = psi_m.mul(
                        &psi_m_plus_2
                            .mul(&sq_m_minus_1, Some(q))
                            .sub(&psi_m_minus_2.mul(&sq_m_plus_1, Some(q)), Some(q)),
                        Some(q),
                    );
                    dp.div(&self.division_polynomial(2), q).0
                }
            }
        }
    }
}
