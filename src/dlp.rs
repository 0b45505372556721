//! Solvers for the elliptic-curve discrete-logarithm problem: given P of
//! order n and H in ⟨P⟩, recover k with k·P = H.

use std::collections::HashMap;

use num_bigint::{BigInt, RandBigInt};
use num_integer::{Integer, Roots};
use num_traits::{One, Zero};
use rand::rngs::OsRng;

use crate::curve::Curve;
use crate::factor::factorize;
use crate::util::{big, crt, modinv};

/// Restart rounds and per-round iterations of the rho walk.
const RHO_ROUNDS: usize = 100;
const RHO_ITERATIONS: usize = 10_000;

impl Curve {
    /// Shanks' baby-step/giant-step: O(√n) group operations and O(√n)
    /// memory. Returns `None` when no collision is found.
    pub fn shanks(
        &self,
        px: &BigInt,
        py: &BigInt,
        hx: &BigInt,
        hy: &BigInt,
    ) -> Option<BigInt> {
        self.shanks_in(px, py, hx, hy, &self.n)
    }

    /// Baby-step/giant-step in the subgroup of the given order.
    fn shanks_in(
        &self,
        px: &BigInt,
        py: &BigInt,
        hx: &BigInt,
        hy: &BigInt,
        order: &BigInt,
    ) -> Option<BigInt> {
        if hx.is_zero() && hy.is_zero() {
            return Some(BigInt::zero());
        }

        let m = order.sqrt() + 1u32;

        // Baby steps: j·P for j = 1..m, keyed by canonical encoding.
        let mut table: HashMap<Vec<u8>, BigInt> = HashMap::new();
        let (mut jx, mut jy) = (px.clone(), py.clone());
        let mut j = BigInt::one();
        while j <= m {
            table.insert(self.marshal(&jx, &jy), j.clone());
            (jx, jy) = self.add(&jx, &jy, px, py);
            j += 1u32;
        }

        // Giant steps: H − i·(m·P) for i = 0..m.
        let (mx, my) = self.scalar_mult(px, py, &m);
        let (neg_mx, neg_my) = self.neg(&mx, &my);
        let (mut rx, mut ry) = (hx.clone(), hy.clone());
        let mut i = BigInt::zero();
        while i <= m {
            if rx.is_zero() && ry.is_zero() {
                return Some((&i * &m).mod_floor(order));
            }
            if let Some(j) = table.get(&self.marshal(&rx, &ry)) {
                return Some((j + &i * &m).mod_floor(order));
            }
            (rx, ry) = self.add(&rx, &ry, &neg_mx, &neg_my);
            i += 1u32;
        }
        None
    }

    /// Pollard's rho for the ECDLP, memory-free at O(√n) expected group
    /// operations. Returns `None` after the restart budget is exhausted.
    pub fn pollard_rho(
        &self,
        px: &BigInt,
        py: &BigInt,
        hx: &BigInt,
        hy: &BigInt,
    ) -> Option<BigInt> {
        self.pollard_rho_in(px, py, hx, hy, &self.n)
    }

    fn pollard_rho_in(
        &self,
        px: &BigInt,
        py: &BigInt,
        hx: &BigInt,
        hy: &BigInt,
        order: &BigInt,
    ) -> Option<BigInt> {
        if hx.is_zero() && hy.is_zero() {
            return Some(BigInt::zero());
        }

        let three = big(3);

        // The walk partitions points by x mod 3, maintaining X = αP + βH.
        let step = |x: BigInt, y: BigInt, a: BigInt, b: BigInt| {
            let class = x.mod_floor(&three);
            if class.is_zero() {
                let (x, y) = self.add(px, py, &x, &y);
                ((x, y), ((a + 1u32).mod_floor(order), b))
            } else if class.is_one() {
                let (x, y) = self.double(&x, &y);
                ((x, y), ((&a + &a).mod_floor(order), (&b + &b).mod_floor(order)))
            } else {
                let (x, y) = self.add(hx, hy, &x, &y);
                ((x, y), (a, (b + 1u32).mod_floor(order)))
            }
        };

        let mut rng = OsRng;
        let mut start = || {
            let a = rng.gen_bigint_range(&BigInt::zero(), order);
            let b = rng.gen_bigint_range(&BigInt::zero(), order);
            let (vx, vy) = self.scalar_mult(px, py, &a);
            let (ux, uy) = self.scalar_mult(hx, hy, &b);
            let (x, y) = self.add(&vx, &vy, &ux, &uy);
            (x, y, a, b)
        };

        for _ in 0..RHO_ROUNDS {
            let (mut x1, mut y1, mut a1, mut b1) = start();
            let (mut x2, mut y2, mut a2, mut b2) = start();
            for _ in 0..RHO_ITERATIONS {
                ((x1, y1), (a1, b1)) = step(x1, y1, a1, b1);
                // The second walker moves at double speed.
                ((x2, y2), (a2, b2)) = step(x2, y2, a2, b2);
                ((x2, y2), (a2, b2)) = step(x2, y2, a2, b2);

                if x1 == x2 && y1 == y2 {
                    if b1 == b2 {
                        break;
                    }
                    let num = (&a1 - &a2).mod_floor(order);
                    let den = (&b2 - &b1).mod_floor(order);
                    let Some(den_inv) = modinv(&den, order) else {
                        break;
                    };
                    let k = (num * den_inv).mod_floor(order);
                    let (tx, ty) = self.scalar_mult(px, py, &k);
                    if tx == *hx && ty == *hy {
                        return Some(k);
                    }
                    break;
                }
            }
        }
        None
    }

    /// Pohlig–Hellman: reduces the ECDLP to the prime-power subgroups of the
    /// factored order and recombines with the CRT. Returns `None` when the
    /// order yields no usable factors or a sub-problem fails.
    pub fn pohlig_hellman(
        &self,
        px: &BigInt,
        py: &BigInt,
        hx: &BigInt,
        hy: &BigInt,
    ) -> Option<BigInt> {
        let n = &self.n;
        let factors = factorize(n);
        if factors.is_empty() {
            return None;
        }

        // Group the sorted prime multiset into prime powers.
        let mut prime_powers: Vec<BigInt> = Vec::new();
        let mut i = 0;
        while i < factors.len() {
            let mut q = factors[i].clone();
            let mut j = i + 1;
            while j < factors.len() && factors[j] == factors[i] {
                q *= &factors[i];
                j += 1;
            }
            prime_powers.push(q);
            i = j;
        }

        let mut logs = Vec::with_capacity(prime_powers.len());
        for q in &prime_powers {
            // t·P and t·H live in the unique subgroup of order q.
            let t = n / q;
            let (tpx, tpy) = self.scalar_mult(px, py, &t);
            let (tqx, tqy) = self.scalar_mult(hx, hy, &t);
            let k = if tqx.is_zero() && tqy.is_zero() {
                BigInt::zero()
            } else if self.bit_size <= 100 {
                self.shanks_in(&tpx, &tpy, &tqx, &tqy, q)?
            } else {
                self.pollard_rho_in(&tpx, &tpy, &tqx, &tqy, q)?
            };
            logs.push(k);
        }
        crt(&logs, &prime_powers)
    }
}

#[cfg(test)]
mod tests {
    use crate::util::big;
    use crate::Curve;

    fn dlp_curve() -> Curve {
        Curve::new(
            big(7919),
            big(1001),
            big(75),
            big(4023),
            big(6036),
            big(7889),
            big(1),
            13,
            "dlp test curve",
        )
    }

    #[test]
    fn test_solvers_agree_on_small_logs() {
        let c = dlp_curve();
        let (px, py) = (c.gx.clone(), c.gy.clone());
        for k in 1i64..=40 {
            let (hx, hy) = c.scalar_base_mult(&big(k));
            assert_eq!(c.shanks(&px, &py, &hx, &hy), Some(big(k)), "shanks k={}", k);
            assert_eq!(
                c.pollard_rho(&px, &py, &hx, &hy),
                Some(big(k)),
                "pollard rho k={}",
                k
            );
            assert_eq!(
                c.pohlig_hellman(&px, &py, &hx, &hy),
                Some(big(k)),
                "pohlig-hellman k={}",
                k
            );
        }
    }

    #[test]
    fn test_identity_log_is_zero() {
        let c = dlp_curve();
        let (px, py) = (c.gx.clone(), c.gy.clone());
        let inf = big(0);
        assert_eq!(c.shanks(&px, &py, &inf, &inf), Some(big(0)));
        assert_eq!(c.pollard_rho(&px, &py, &inf, &inf), Some(big(0)));
    }
}
