//! Short-form Weierstrass curves y² = x³ + ax + b over prime fields.
//!
//! Internally the group law works in Jacobian coordinates: a position (x, y)
//! on the curve is carried as (X, Y, Z) with x = X/Z² and y = Y/Z³, and
//! Z = 0 marks the point at infinity. The whole of a scalar multiplication
//! runs inside the transform; only the final result is mapped back to affine
//! coordinates, so each multiplication costs a single field inversion.
//!
//! The conventional point at infinity (0, 0) is never considered on the
//! curve by [`Curve::is_on_curve`], although the group operations both accept
//! and return it.

use std::cell::RefCell;
use std::collections::HashMap;

use num_bigint::{BigInt, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::rngs::OsRng;

use crate::polynomial::Poly;
use crate::util::mod_sqrt;

/// A short-form Weierstrass curve together with a distinguished base point.
///
/// The behavior of the group operations when handed a point not on the curve
/// is a panic; decoding functions return `None` instead.
#[derive(Clone, Debug)]
pub struct Curve {
    /// The order of the underlying field.
    pub p: BigInt,
    /// The linear constant of the curve equation.
    pub a: BigInt,
    /// The constant term of the curve equation.
    pub b: BigInt,
    /// The base point.
    pub gx: BigInt,
    pub gy: BigInt,
    /// The order of the base point.
    pub n: BigInt,
    /// The cofactor of the subgroup.
    pub h: BigInt,
    /// The size of the underlying field in bits.
    pub bit_size: usize,
    /// The canonical name of the curve.
    pub name: String,
    /// Lazily grown table of division polynomials ψ_n. Single-writer: clone
    /// the curve rather than sharing it across workers.
    pub(crate) dp_cache: RefCell<HashMap<u64, Poly>>,
}

impl Curve {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p: BigInt,
        a: BigInt,
        b: BigInt,
        gx: BigInt,
        gy: BigInt,
        n: BigInt,
        h: BigInt,
        bit_size: usize,
        name: &str,
    ) -> Curve {
        Curve {
            p,
            a,
            b,
            gx,
            gy,
            n,
            h,
            bit_size,
            name: name.to_owned(),
            dp_cache: RefCell::new(HashMap::new()),
        }
    }

    /// A curve workspace carrying only the equation, with no base point.
    /// This is what a point-counting worker operates on.
    pub fn from_equation(p: &BigInt, a: &BigInt, b: &BigInt) -> Curve {
        let bit_size = p.bits() as usize;
        Curve::new(
            p.clone(),
            a.clone(),
            b.clone(),
            BigInt::zero(),
            BigInt::zero(),
            BigInt::zero(),
            BigInt::one(),
            bit_size,
            "",
        )
    }

    /// Evaluates the right-hand side x³ + ax + b of the curve equation.
    pub(crate) fn polynomial(&self, x: &BigInt) -> BigInt {
        let x3 = x * x * x;
        (x3 + &self.a * x + &self.b).mod_floor(&self.p)
    }

    /// Reports whether (x, y) lies on the curve. Coordinates outside [0, p)
    /// are rejected, as is the (0, 0) infinity sentinel.
    pub fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool {
        if x.is_negative() || *x >= self.p || y.is_negative() || *y >= self.p {
            return false;
        }
        let y2 = (y * y).mod_floor(&self.p);
        self.polynomial(x) == y2
    }

    fn panic_if_not_on_curve(&self, x: &BigInt, y: &BigInt) {
        // (0, 0) is the point at infinity by convention; the group law
        // handles it even though is_on_curve reports false.
        if x.is_zero() && y.is_zero() {
            return;
        }
        if !self.is_on_curve(x, y) {
            panic!("attempted operation on a point not on the curve");
        }
    }

    /// The Jacobian Z value for an affine point, with Z = 0 encoding ∞.
    fn z_for_affine(x: &BigInt, y: &BigInt) -> BigInt {
        if x.is_zero() && y.is_zero() {
            BigInt::zero()
        } else {
            BigInt::one()
        }
    }

    /// Reverses the Jacobian transform; ∞ maps to (0, 0).
    fn affine_from_jacobian(&self, x: &BigInt, y: &BigInt, z: &BigInt) -> (BigInt, BigInt) {
        if z.is_zero() {
            return (BigInt::zero(), BigInt::zero());
        }
        let zinv = crate::util::modinv(z, &self.p).expect("z is a unit mod the field prime");
        let zinv2 = (&zinv * &zinv).mod_floor(&self.p);
        let x_out = (x * &zinv2).mod_floor(&self.p);
        let zinv3 = (zinv2 * &zinv).mod_floor(&self.p);
        let y_out = (y * zinv3).mod_floor(&self.p);
        (x_out, y_out)
    }

    /// Returns the sum of (x1, y1) and (x2, y2).
    pub fn add(&self, x1: &BigInt, y1: &BigInt, x2: &BigInt, y2: &BigInt) -> (BigInt, BigInt) {
        self.panic_if_not_on_curve(x1, y1);
        self.panic_if_not_on_curve(x2, y2);

        let z1 = Self::z_for_affine(x1, y1);
        let z2 = Self::z_for_affine(x2, y2);
        let (x, y, z) = self.add_jacobian(x1, y1, &z1, x2, y2, &z2);
        self.affine_from_jacobian(&x, &y, &z)
    }

    /// Jacobian point addition, add-2007-bl.
    /// See <https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-3.html#addition-add-2007-bl>
    fn add_jacobian(
        &self,
        x1: &BigInt,
        y1: &BigInt,
        z1: &BigInt,
        x2: &BigInt,
        y2: &BigInt,
        z2: &BigInt,
    ) -> (BigInt, BigInt, BigInt) {
        let p = &self.p;
        if z1.is_zero() {
            return (x2.clone(), y2.clone(), z2.clone());
        }
        if z2.is_zero() {
            return (x1.clone(), y1.clone(), z1.clone());
        }

        let z1z1 = (z1 * z1).mod_floor(p);
        let z2z2 = (z2 * z2).mod_floor(p);

        let u1 = (x1 * &z2z2).mod_floor(p);
        let u2 = (x2 * &z1z1).mod_floor(p);
        let h = (&u2 - &u1).mod_floor(p);
        let x_equal = h.is_zero();
        let i = {
            let twice: BigInt = &h * 2i32;
            (&twice * &twice).mod_floor(p)
        };
        let j = (&h * &i).mod_floor(p);

        let s1 = (y1 * z2 * &z2z2).mod_floor(p);
        let s2 = (y2 * z1 * &z1z1).mod_floor(p);
        let r = (&s2 - &s1).mod_floor(p);
        let y_equal = r.is_zero();
        if x_equal && y_equal {
            return self.double_jacobian(x1, y1, z1);
        }
        let r: BigInt = r * 2i32;
        let v = (&u1 * &i).mod_floor(p);

        let x3 = (&r * &r - &j - &v - &v).mod_floor(p);
        let y3 = (&r * (&v - &x3) - s1 * j * 2i32).mod_floor(p);
        let z3 = {
            let sum = z1 + z2;
            ((&sum * &sum - z1z1 - z2z2) * h).mod_floor(p)
        };
        (x3, y3, z3)
    }

    /// Returns 2·(x, y).
    pub fn double(&self, x1: &BigInt, y1: &BigInt) -> (BigInt, BigInt) {
        self.panic_if_not_on_curve(x1, y1);

        let z1 = Self::z_for_affine(x1, y1);
        let (x, y, z) = self.double_jacobian(x1, y1, &z1);
        self.affine_from_jacobian(&x, &y, &z)
    }

    /// Jacobian point doubling, dbl-2007-bl.
    /// See <https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian.html#doubling-dbl-2007-bl>
    fn double_jacobian(&self, x: &BigInt, y: &BigInt, z: &BigInt) -> (BigInt, BigInt, BigInt) {
        let p = &self.p;
        let xx = (x * x).mod_floor(p);
        let yy = (y * y).mod_floor(p);
        let yyyy = (&yy * &yy).mod_floor(p);
        let zz = (z * z).mod_floor(p);
        let zzzz = (&zz * &zz).mod_floor(p);

        let s = {
            let sum = x + &yy;
            let diff: BigInt = &sum * &sum - &xx - &yyyy;
            (diff * 2i32).mod_floor(p)
        };
        let m = (&xx * 3i32 + &self.a * zzzz).mod_floor(p);
        let t = (&m * &m - &s * 2i32).mod_floor(p);

        let x3 = t;
        let y3 = (m * (s - &x3) - yyyy * 8i32).mod_floor(p);
        let z3 = {
            let sum = y + z;
            (&sum * &sum - yy - zz).mod_floor(p)
        };
        (x3, y3, z3)
    }

    /// Returns −(x, y); the point at infinity is its own negative.
    pub fn neg(&self, x: &BigInt, y: &BigInt) -> (BigInt, BigInt) {
        if x.is_zero() && y.is_zero() {
            return (BigInt::zero(), BigInt::zero());
        }
        (x.clone(), (-y).mod_floor(&self.p))
    }

    /// Returns k·(bx, by) for a big-endian byte scalar.
    pub fn scalar_mult_bytes(&self, bx: &BigInt, by: &BigInt, k: &[u8]) -> (BigInt, BigInt) {
        self.panic_if_not_on_curve(bx, by);

        let bz = Self::z_for_affine(bx, by);
        let (mut x, mut y, mut z) = (BigInt::zero(), BigInt::zero(), BigInt::zero());
        for byte in k {
            let mut b = *byte;
            for _ in 0..8 {
                (x, y, z) = self.double_jacobian(&x, &y, &z);
                if b & 0x80 == 0x80 {
                    (x, y, z) = self.add_jacobian(bx, by, &bz, &x, &y, &z);
                }
                b <<= 1;
            }
        }
        self.affine_from_jacobian(&x, &y, &z)
    }

    /// Returns k·(bx, by). k = 0 yields the point at infinity.
    pub fn scalar_mult(&self, bx: &BigInt, by: &BigInt, k: &BigInt) -> (BigInt, BigInt) {
        debug_assert!(!k.is_negative(), "scalars are non-negative");
        self.scalar_mult_bytes(bx, by, &k.to_bytes_be().1)
    }

    /// Returns k·G for a big-endian byte scalar.
    pub fn scalar_base_mult_bytes(&self, k: &[u8]) -> (BigInt, BigInt) {
        self.scalar_mult_bytes(&self.gx, &self.gy, k)
    }

    /// Returns k·G.
    pub fn scalar_base_mult(&self, k: &BigInt) -> (BigInt, BigInt) {
        self.scalar_mult(&self.gx, &self.gy, k)
    }

    /// Returns m·G + k·(qx, qy), the combination ECDSA verification needs.
    pub fn combined_mult(
        &self,
        qx: &BigInt,
        qy: &BigInt,
        m: &BigInt,
        k: &BigInt,
    ) -> (BigInt, BigInt) {
        let (x1, y1) = self.scalar_base_mult(m);
        let (x2, y2) = self.scalar_mult(qx, qy, k);
        self.add(&x1, &y1, &x2, &y2)
    }

    /// Generates a key pair: a uniform scalar d in [1, n) and Q = d·G.
    pub fn generate_key(&self) -> (BigInt, BigInt, BigInt) {
        let mut rng = OsRng;
        let d = rng.gen_bigint_range(&BigInt::one(), &self.n);
        let (x, y) = self.scalar_base_mult(&d);
        (d, x, y)
    }

    pub(crate) fn byte_len(&self) -> usize {
        (self.bit_size + 7) / 8
    }

    fn pad_bytes(&self, v: &BigInt) -> Vec<u8> {
        let bytes = v.to_bytes_be().1;
        let len = self.byte_len();
        let mut out = vec![0u8; len];
        out[len - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Encodes a point in SEC 1 uncompressed form, `04 ‖ x ‖ y`. The point is
    /// assumed to be on the curve.
    pub fn marshal(&self, x: &BigInt, y: &BigInt) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 2 * self.byte_len());
        out.push(4);
        out.extend_from_slice(&self.pad_bytes(x));
        out.extend_from_slice(&self.pad_bytes(y));
        out
    }

    /// Decodes a SEC 1 uncompressed point. Returns `None` when the encoding
    /// is malformed, the coordinates are out of range, the point is not on
    /// the curve, or it is the point at infinity.
    pub fn unmarshal(&self, data: &[u8]) -> Option<(BigInt, BigInt)> {
        let byte_len = self.byte_len();
        if data.len() != 1 + 2 * byte_len || data[0] != 4 {
            return None;
        }
        let x = BigInt::from_bytes_be(Sign::Plus, &data[1..1 + byte_len]);
        let y = BigInt::from_bytes_be(Sign::Plus, &data[1 + byte_len..]);
        if x >= self.p || y >= self.p {
            return None;
        }
        if !self.is_on_curve(&x, &y) {
            return None;
        }
        Some((x, y))
    }

    /// Encodes a point in SEC 1 compressed form, `(02 | sign(y)) ‖ x`.
    pub fn marshal_compressed(&self, x: &BigInt, y: &BigInt) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.byte_len());
        out.push(2 | y.bit(0) as u8);
        out.extend_from_slice(&self.pad_bytes(x));
        out
    }

    /// Decodes a SEC 1 compressed point, recovering y as the modular square
    /// root of x³ + ax + b whose parity matches the prefix byte.
    pub fn unmarshal_compressed(&self, data: &[u8]) -> Option<(BigInt, BigInt)> {
        let byte_len = self.byte_len();
        if data.len() != 1 + byte_len || (data[0] != 2 && data[0] != 3) {
            return None;
        }
        let x = BigInt::from_bytes_be(Sign::Plus, &data[1..]);
        if x >= self.p {
            return None;
        }
        let mut y = mod_sqrt(&self.polynomial(&x), &self.p)?;
        if y.bit(0) as u8 != data[0] & 1 {
            y = (-y).mod_floor(&self.p);
        }
        if !self.is_on_curve(&x, &y) {
            return None;
        }
        Some((x, y))
    }
}
