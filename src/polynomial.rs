//! Dense univariate polynomial arithmetic over ℤ and its reductions 𝔽_m[x].
//!
//! A polynomial is an ordered coefficient vector in little-endian degree
//! order: `3x^3 + 2x + 1` is `[1, 2, 0, 3]`. The representation keeps a trim
//! invariant: the leading coefficient is nonzero unless the polynomial is the
//! canonical zero `[0]`. Operations take the coefficient modulus as an
//! argument — optionally for the additive ones, mandatorily wherever an
//! inverse is needed — and return fresh values; operands are never mutated.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::util::{big, modinv};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<BigInt>,
}

impl Poly {
    /// Constructs a polynomial from little-endian coefficients, restoring the
    /// trim invariant.
    pub fn from_bigints(coeffs: Vec<BigInt>) -> Self {
        let mut p = Poly { coeffs };
        p.trim();
        p
    }

    /// Constructs a polynomial from small literal coefficients.
    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::from_bigints(coeffs.iter().map(|&c| big(c)).collect())
    }

    pub fn zero() -> Self {
        Poly {
            coeffs: vec![BigInt::zero()],
        }
    }

    pub fn one() -> Self {
        Poly {
            coeffs: vec![BigInt::one()],
        }
    }

    /// The monomial x.
    pub fn x() -> Self {
        Poly {
            coeffs: vec![BigInt::zero(), BigInt::one()],
        }
    }

    pub fn constant(c: BigInt) -> Self {
        Poly { coeffs: vec![c] }
    }

    /// Drops trailing zero coefficients, keeping at least the constant term.
    fn trim(&mut self) {
        if self.coeffs.is_empty() {
            self.coeffs.push(BigInt::zero());
            return;
        }
        let mut last = self.coeffs.len() - 1;
        while last > 0 && self.coeffs[last].is_zero() {
            last -= 1;
        }
        self.coeffs.truncate(last + 1);
    }

    /// The degree; the zero polynomial has degree 0 by convention.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    pub fn leading_coef(&self) -> &BigInt {
        self.coeffs.last().expect("trim keeps at least one coefficient")
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Reduces every coefficient to its canonical representative in [0, m)
    /// and re-trims.
    pub fn reduce(&self, m: &BigInt) -> Poly {
        Poly::from_bigints(self.coeffs.iter().map(|c| c.mod_floor(m)).collect())
    }

    fn maybe_reduce(p: Poly, m: Option<&BigInt>) -> Poly {
        match m {
            Some(m) => p.reduce(m),
            None => p,
        }
    }

    pub fn add(&self, rhs: &Poly, m: Option<&BigInt>) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        let zero = BigInt::zero();
        for i in 0..len {
            let a = self.coeffs.get(i).unwrap_or(&zero);
            let b = rhs.coeffs.get(i).unwrap_or(&zero);
            out.push(a + b);
        }
        Self::maybe_reduce(Poly::from_bigints(out), m)
    }

    pub fn sub(&self, rhs: &Poly, m: Option<&BigInt>) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        let zero = BigInt::zero();
        for i in 0..len {
            let a = self.coeffs.get(i).unwrap_or(&zero);
            let b = rhs.coeffs.get(i).unwrap_or(&zero);
            out.push(a - b);
        }
        Self::maybe_reduce(Poly::from_bigints(out), m)
    }

    pub fn neg(&self, m: Option<&BigInt>) -> Poly {
        Self::maybe_reduce(
            Poly::from_bigints(self.coeffs.iter().map(|c| -c).collect()),
            m,
        )
    }

    /// Schoolbook multiplication, O(deg self · deg rhs) coefficient products.
    pub fn mul(&self, rhs: &Poly, m: Option<&BigInt>) -> Poly {
        let mut out = vec![BigInt::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
                if let Some(m) = m {
                    out[i + j] = out[i + j].mod_floor(m);
                }
            }
        }
        Self::maybe_reduce(Poly::from_bigints(out), m)
    }

    /// Square-and-multiply exponentiation in 𝔽_m[x], scanning the bits of
    /// `e` from the most significant down.
    pub fn exp(&self, e: &BigInt, m: &BigInt) -> Poly {
        let mut r = Poly::one();
        for i in (0..e.bits()).rev() {
            r = r.mul(&r, Some(m));
            if e.bit(i) {
                r = r.mul(self, Some(m));
            }
        }
        r
    }

    /// Euclidean division: returns `(quotient, remainder)` with
    /// `deg remainder < deg rhs`. The leading coefficient of `rhs` must be a
    /// unit mod `m`, which holds whenever `m` is prime and `rhs` is trimmed.
    pub fn div(&self, rhs: &Poly, m: &BigInt) -> (Poly, Poly) {
        let dividend = self.reduce(m);
        let divisor = rhs.reduce(m);
        assert!(!divisor.is_zero(), "polynomial division by zero");
        if dividend.degree() < divisor.degree() {
            return (Poly::zero(), dividend);
        }

        let inv = modinv(divisor.leading_coef(), m)
            .expect("leading coefficient of the divisor is not a unit");
        let mut quo = vec![BigInt::zero(); dividend.degree() - divisor.degree() + 1];
        let mut rem = dividend;

        while !rem.is_zero() && rem.coeffs.len() >= divisor.coeffs.len() {
            let shift = rem.coeffs.len() - divisor.coeffs.len();
            let c = (rem.leading_coef() * &inv).mod_floor(m);
            for (i, d) in divisor.coeffs.iter().enumerate() {
                rem.coeffs[i + shift] = (&rem.coeffs[i + shift] - &c * d).mod_floor(m);
            }
            quo[shift] = c;
            rem.trim();
        }

        (Poly::from_bigints(quo), rem)
    }

    /// Scales the polynomial so its leading coefficient is 1.
    pub fn monic(&self, m: &BigInt) -> Poly {
        let p = self.reduce(m);
        if p.is_zero() || p.leading_coef().is_one() {
            return p;
        }
        let inv = modinv(p.leading_coef(), m).expect("leading coefficient is not a unit");
        Poly::from_bigints(p.coeffs.iter().map(|c| (c * &inv).mod_floor(m)).collect())
    }

    /// The formal derivative over 𝔽_m.
    pub fn deriv(&self, m: &BigInt) -> Poly {
        if self.is_constant() {
            return Poly::zero();
        }
        let mut out = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().enumerate().skip(1) {
            out.push((c * big(i as i64)).mod_floor(m));
        }
        Poly::from_bigints(out)
    }

    /// Evaluates the polynomial at `x` over 𝔽_m by Horner's scheme.
    pub fn eval(&self, x: &BigInt, m: &BigInt) -> BigInt {
        let mut acc = self.leading_coef().clone();
        for c in self.coeffs.iter().rev().skip(1) {
            acc = (acc * x + c).mod_floor(m);
        }
        acc.mod_floor(m)
    }

    /// The monic greatest common divisor in 𝔽_m[x].
    pub fn gcd(&self, rhs: &Poly, m: &BigInt) -> Poly {
        let mut a = self.reduce(m);
        let mut b = rhs.reduce(m);
        while !b.is_zero() {
            let (_, r) = a.div(&b, m);
            a = b;
            b = r;
        }
        a.monic(m)
    }

    /// Extended Euclidean algorithm: returns `(g, s, t)` with
    /// `g = s·self + t·rhs` and `g` monic.
    pub fn extended_gcd(&self, rhs: &Poly, m: &BigInt) -> (Poly, Poly, Poly) {
        let (mut old_r, mut r) = (self.reduce(m), rhs.reduce(m));
        let (mut old_s, mut s) = (Poly::one(), Poly::zero());
        let (mut old_t, mut t) = (Poly::zero(), Poly::one());

        while !r.is_zero() {
            let (q, _) = old_r.div(&r, m);
            let next_r = old_r.sub(&q.mul(&r, Some(m)), Some(m));
            let next_s = old_s.sub(&q.mul(&s, Some(m)), Some(m));
            let next_t = old_t.sub(&q.mul(&t, Some(m)), Some(m));
            old_r = std::mem::replace(&mut r, next_r);
            old_s = std::mem::replace(&mut s, next_s);
            old_t = std::mem::replace(&mut t, next_t);
        }

        // Scale all three together so the Bézout identity holds for the monic
        // gcd.
        if !old_r.is_zero() && !old_r.leading_coef().is_one() {
            let inv = modinv(old_r.leading_coef(), m)
                .expect("leading coefficient is not a unit");
            let scale = Poly::constant(inv);
            old_r = old_r.mul(&scale, Some(m));
            old_s = old_s.mul(&scale, Some(m));
            old_t = old_t.mul(&scale, Some(m));
        }
        (old_r, old_s, old_t)
    }

    /// The inverse of `self` in the quotient ring 𝔽_m[x]/(h), or `None` when
    /// `gcd(self, h)` has positive degree — the one place where a nontrivial
    /// factor of `h` ever surfaces.
    pub fn mod_inverse(&self, h: &Poly, m: &BigInt) -> Option<Poly> {
        let (g, _, t) = h.extended_gcd(self, m);
        if !g.is_constant() {
            return None;
        }
        Some(t.div(h, m).1)
    }
}

impl Ord for Poly {
    /// Orders by length, then by coefficients from the constant term up.
    fn cmp(&self, other: &Self) -> Ordering {
        self.coeffs.len().cmp(&other.coeffs.len()).then_with(|| {
            for (a, b) in self.coeffs.iter().zip(&other.coeffs) {
                match a.cmp(b) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            Ordering::Equal
        })
    }
}

impl PartialOrd for Poly {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Poly {
    /// Renders `[3x^3 + 3x^2 - 4x + 5]`.
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::from("[");
        let deg = self.coeffs.len() - 1;
        for i in (0..self.coeffs.len()).rev() {
            let c = &self.coeffs[i];
            match c.sign() {
                Sign::NoSign => continue,
                Sign::Minus => {
                    s.push_str(if i == deg { "-" } else { " - " });
                    if i == 0 || *c != big(-1) {
                        s.push_str(&c.abs().to_string());
                    }
                }
                Sign::Plus => {
                    if i < deg {
                        s.push_str(" + ");
                    }
                    if i == 0 || !c.is_one() {
                        s.push_str(&c.to_string());
                    }
                }
            }
            if i > 0 {
                s.push('x');
                if i > 1 {
                    s.push_str(&format!("^{}", i));
                }
            }
        }
        if s == "[" {
            s.push('0');
        }
        s.push(']');
        out.write_str(&s)
    }
}

#[test]
fn test_pretty_print() {
    let cases = [
        (Poly::from_ints(&[0]), "[0]"),
        (Poly::from_ints(&[5, -4, 3, 3]), "[3x^3 + 3x^2 - 4x + 5]"),
        (Poly::from_ints(&[5, 6, 2]), "[2x^2 + 6x + 5]"),
        (Poly::from_ints(&[5, -2, 0, 2, 1, 3]), "[3x^5 + x^4 + 2x^3 - 2x + 5]"),
        (Poly::from_ints(&[2, 1, 0, -1, -2]), "[-2x^4 - x^3 + x + 2]"),
        (Poly::from_ints(&[1, 2, 2, 0, 1, 1]), "[x^5 + x^4 + 2x^2 + 2x + 1]"),
    ];
    for (p, want) in cases {
        assert_eq!(p.to_string(), want);
    }
}

#[test]
fn test_add() {
    let cases = [
        (Poly::from_ints(&[0]), Poly::from_ints(&[0]), 2, Poly::from_ints(&[0])),
        (
            Poly::from_ints(&[4, 0, 0, 3, 0, 1]),
            Poly::from_ints(&[0, 0, 0, 4, 0, 0, 2]),
            4,
            Poly::from_ints(&[0, 0, 0, 3, 0, 1, 2]),
        ),
    ];
    for (p, q, m, want) in cases {
        assert_eq!(p.add(&q, Some(&big(m))), want);
    }
}

#[test]
fn test_sub() {
    let p = Poly::from_ints(&[4, 0, 0, 3, 0, 1]);
    let q = Poly::from_ints(&[0, 0, 0, 4, 0, 0, 6]);
    assert_eq!(
        p.sub(&q, Some(&big(11))),
        Poly::from_ints(&[4, 0, 0, 10, 0, 1, 5])
    );
    assert_eq!(Poly::zero().sub(&Poly::zero(), Some(&big(2))), Poly::zero());
}

#[test]
fn test_mul() {
    let p = Poly::from_ints(&[4, 0, 0, 3, 0, 1]);
    let q = Poly::from_ints(&[0, 0, 0, 4, 0, 0, 6]);
    assert_eq!(
        p.mul(&q, Some(&big(11))),
        Poly::from_ints(&[0, 0, 0, 5, 0, 0, 3, 0, 4, 7, 0, 6])
    );
    assert_eq!(Poly::zero().mul(&Poly::zero(), Some(&big(2))), Poly::zero());
}

#[test]
fn test_div() {
    let cases = [
        (
            Poly::from_ints(&[2, 0, 2, 1]),
            Poly::from_ints(&[1, 0, 1]),
            3,
            Poly::from_ints(&[2, 1]),
            Poly::from_ints(&[0, 2]),
        ),
        (
            Poly::from_ints(&[5, 0, 0, 4, 7, 0, 3]),
            Poly::from_ints(&[4, 0, 0, 3, 1]),
            11,
            Poly::from_ints(&[1, 2, 3]),
            Poly::from_ints(&[1, 3, 10, 1]),
        ),
        (
            Poly::from_ints(&[
                184, 187, 234, 0, 39, 245, 13, 268, 288, 250, 164, 0, 64, 258, 14, 113, 43, 161,
            ]),
            Poly::from_ints(&[48, 0, 43, 22, 56, 84, 45, 67, 0, 34, 53]),
            307,
            Poly::from_ints(&[98, 35, 0, 0, 23, 55, 44, 32]),
            Poly::from_ints(&[85, 42, 11, 23, 45]),
        ),
        (
            Poly::from_ints(&[4, 0, 0, 1]),
            Poly::from_ints(&[3, 1, 4, 1]),
            7,
            Poly::from_ints(&[1]),
            Poly::from_ints(&[1, 6, 3]),
        ),
    ];
    for (p, q, m, quo, rem) in cases {
        let m = big(m);
        let (got_q, got_r) = p.div(&q, &m);
        assert_eq!(got_q, quo);
        assert_eq!(got_r, rem);
        // Division law: p ≡ q·quo + rem with deg rem < deg q.
        let back = q.mul(&got_q, Some(&m)).add(&got_r, Some(&m));
        assert_eq!(back, p.reduce(&m));
        assert!(got_r.degree() < q.degree() || got_r.is_zero());
    }
}

#[test]
fn test_exp() {
    let p = Poly::from_ints(&[1, 1]);
    let m = big(7);
    assert_eq!(p.exp(&big(2), &m), Poly::from_ints(&[1, 2, 1]));
    assert_eq!(p.exp(&big(3), &m), Poly::from_ints(&[1, 3, 3, 1]));
    assert_eq!(p.exp(&big(4), &m), Poly::from_ints(&[1, 4, 6, 4, 1]));
    assert_eq!(p.exp(&big(0), &m), Poly::one());
}

#[test]
fn test_deriv() {
    let cases = [
        (Poly::from_ints(&[5]), 7, Poly::from_ints(&[0])),
        (Poly::from_ints(&[0, 8]), 7, Poly::from_ints(&[1])),
        (Poly::from_ints(&[4, 0, 0, 1]), 7, Poly::from_ints(&[0, 0, 3])),
        (Poly::from_ints(&[5, -4, 3, 3]), 7, Poly::from_ints(&[3, 6, 2])),
        (
            Poly::from_ints(&[1, 2, 3, 4, 5]),
            23,
            Poly::from_ints(&[2, 6, 12, 20]),
        ),
    ];
    for (p, m, want) in cases {
        assert_eq!(p.deriv(&big(m)), want);
    }
}

#[test]
fn test_eval() {
    let cases = [
        (Poly::from_ints(&[0]), 0, 2, 0),
        (Poly::from_ints(&[0]), 1, 2, 0),
        (Poly::from_ints(&[6, 2, 0, 4, 1]), 2, 10, 8),
        (
            Poly::from_ints(&[
                45545, 343424, 5545, 3445435, 0, 343434, 4665, 5452, 34344, 534556, 4345345, 5656,
                434525, 53333, 36645,
            ]),
            394,
            1046527,
            636194,
        ),
    ];
    for (p, x, m, want) in cases {
        assert_eq!(p.eval(&big(x), &big(m)), big(want));
    }
}

#[test]
fn test_gcd() {
    let m = big(13);
    let common = Poly::from_ints(&[3, 0, 3]);
    let p = common.mul(&Poly::from_ints(&[4, 5, 6, 7]), Some(&m));
    let q = common.mul(&Poly::from_ints(&[5, 6, 7, 8, 9]), Some(&m));
    assert_eq!(p.gcd(&q, &m), Poly::from_ints(&[1, 0, 1]));

    let m = big(7);
    assert_eq!(
        Poly::from_ints(&[4, 0, 0, 1]).gcd(&Poly::from_ints(&[3, 1, 4, 1]), &m),
        Poly::one()
    );
    assert_eq!(
        Poly::from_ints(&[6, 7, 1]).gcd(&Poly::from_ints(&[-6, -5, 1]), &m),
        Poly::from_ints(&[1, 1])
    );
}

#[test]
fn test_extended_gcd_identity() {
    let m = big(13);
    let cases = [
        (Poly::from_ints(&[4, 0, 0, 1]), Poly::from_ints(&[3, 1, 4, 1])),
        (Poly::from_ints(&[6, 7, 1]), Poly::from_ints(&[-6, -5, 1])),
        (
            Poly::from_ints(&[3, 0, 3]).mul(&Poly::from_ints(&[4, 5, 6, 7]), Some(&big(13))),
            Poly::from_ints(&[3, 0, 3]).mul(&Poly::from_ints(&[5, 6, 7, 8, 9]), Some(&big(13))),
        ),
    ];
    for (p, q) in cases {
        let (g, s, t) = p.extended_gcd(&q, &m);
        assert!(g.leading_coef().is_one(), "gcd is monic");
        let combo = s.mul(&p, Some(&m)).add(&t.mul(&q, Some(&m)), Some(&m));
        assert_eq!(combo, g, "g = s·p + t·q");
        assert_eq!(g, p.gcd(&q, &m));
    }
}

#[test]
fn test_mod_inverse() {
    let cases = [
        (
            Poly::from_ints(&[1, 1, 0, 1, 1, 0, 0, 0, 1]),
            Poly::from_ints(&[1, 1, 0, 0, 1, 0, 1]),
            2,
        ),
        (
            Poly::from_ints(&[1, 1, 0, 0, 1]),
            Poly::from_ints(&[0, 0, 1]),
            2,
        ),
        (Poly::from_ints(&[1, 0, 1, 1]), Poly::from_ints(&[1, 0, 1]), 2),
        (
            Poly::from_ints(&[-1, 0, 0, 0, 0, 1]),
            Poly::from_ints(&[1, 0, 1]),
            3,
        ),
    ];
    for (h, p, m) in cases {
        let m = big(m);
        let inv = p.mod_inverse(&h, &m).expect("unit in the quotient ring");
        let product = p.mul(&inv, Some(&m)).div(&h, &m).1;
        assert!(product.is_one(), "p·p⁻¹ ≡ 1 (mod h)");
    }

    // x² + 1 divides both x⁵ + x⁴ + x³ + x² over 𝔽₂ and itself, so no
    // inverse exists and the gcd is non-constant.
    let m = big(2);
    let h = Poly::from_ints(&[0, 0, 0, 1, 1]).mul(&Poly::from_ints(&[1, 0, 1]), Some(&m));
    let p = Poly::from_ints(&[1, 0, 1]);
    assert_eq!(p.mod_inverse(&h, &m), None);
    assert!(p.gcd(&h, &m).degree() > 0);
}

#[test]
fn test_ordering() {
    assert!(Poly::from_ints(&[1, 1]) > Poly::from_ints(&[5]));
    assert!(Poly::from_ints(&[1, 2]) < Poly::from_ints(&[2, 2]));
    assert_eq!(
        Poly::from_ints(&[3, 1]).cmp(&Poly::from_ints(&[3, 1])),
        Ordering::Equal
    );
}
