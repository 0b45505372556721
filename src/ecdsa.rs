//! ECDSA signing and verification, plus the ECDH shared-secret shell.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::curve::Curve;
use crate::util::fermat_inverse;

impl Curve {
    /// Converts a hash value to an integer. Per FIPS 186-4, section 6.4, the
    /// left-most bits of the hash are used, up to the bit-length of the order
    /// of the curve; excess low bits are shifted away, mirroring SEC 1,
    /// version 2.0, section 4.1.3.
    fn hash_to_int(&self, hash: &[u8]) -> BigInt {
        let order_bits = self.n.bits() as usize;
        let order_bytes = (order_bits + 7) / 8;
        let hash = if hash.len() > order_bytes {
            &hash[..order_bytes]
        } else {
            hash
        };

        let mut ret = BigInt::from_bytes_be(Sign::Plus, hash);
        let excess = (hash.len() * 8).saturating_sub(order_bits);
        if excess > 0 {
            ret >>= excess;
        }
        ret
    }

    /// Signs a hash (which should be the result of hashing a larger message)
    /// with the private scalar, returning the signature pair (r, s). Hashes
    /// longer than the bit-length of the curve order are truncated.
    pub fn sign(&self, priv_key: &BigInt, hash: &[u8]) -> (BigInt, BigInt) {
        let n = &self.n;
        loop {
            let (k, rx, _) = self.generate_key();
            let r = rx.mod_floor(n);
            if r.is_zero() {
                continue;
            }
            let k_inv = fermat_inverse(&k, n);
            let z = self.hash_to_int(hash);
            let s = ((z + &r * priv_key) * k_inv).mod_floor(n);
            if s.is_zero() {
                continue;
            }
            return (r, s);
        }
    }

    /// Verifies the signature (r, s) of a hash against the public key
    /// (qx, qy).
    pub fn verify(&self, qx: &BigInt, qy: &BigInt, hash: &[u8], r: &BigInt, s: &BigInt) -> bool {
        let n = &self.n;
        if !r.is_positive() || !s.is_positive() || *r >= *n || *s >= *n {
            return false;
        }

        let s_inv = fermat_inverse(s, n);
        let z = self.hash_to_int(hash);
        let u1 = (z * &s_inv).mod_floor(n);
        let u2 = (r * s_inv).mod_floor(n);

        let (x, y) = self.combined_mult(qx, qy, &u1, &u2);
        if x.is_zero() && y.is_zero() {
            return false;
        }
        x.mod_floor(n) == *r
    }

    /// Computes the ECDH shared secret for our private scalar and the peer's
    /// public point, encoded as an uncompressed point.
    pub fn shared_secret(&self, priv_key: &BigInt, pub_x: &BigInt, pub_y: &BigInt) -> Vec<u8> {
        let (sx, sy) = self.scalar_mult(pub_x, pub_y, priv_key);
        self.marshal(&sx, &sy)
    }
}
