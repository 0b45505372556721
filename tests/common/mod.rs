//! The fixture curves shared by the integration suites.

#![allow(dead_code)]

use ecckit::util::{big, big_from_decimal, big_from_hex};
use ecckit::Curve;

pub fn toy() -> Curve {
    Curve::new(
        big(29),
        big(4),
        big(20),
        big(1),
        big(5),
        big(37),
        big(1),
        6,
        "toy curve",
    )
}

pub fn small() -> Curve {
    Curve::new(
        big(229),
        big(1),
        big(44),
        big(5),
        big(116),
        big(239),
        big(1),
        8,
        "small curve",
    )
}

pub fn secp256k1() -> Curve {
    Curve::new(
        big_from_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        big(0),
        big(7),
        big_from_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        big_from_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        big_from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        big(1),
        256,
        "secp256k1",
    )
}

/// See FIPS 186-3, section D.2.4.
pub fn p384() -> Curve {
    Curve::new(
        big_from_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff000000000\
             0000000ffffffff",
        ),
        big(-3),
        big_from_hex(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2\
             a85c8edd3ec2aef",
        ),
        big_from_hex(
            "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3\
             a545e3872760ab7",
        ),
        big_from_hex(
            "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7\
             a431d7c90ea0e5f",
        ),
        big_from_hex(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77ae\
             cec196accc52973",
        ),
        big(1),
        384,
        "p384",
    )
}

/// See FIPS 186-3, section D.2.5.
pub fn p521() -> Curve {
    Curve::new(
        big_from_hex(
            "1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             ffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        big(-3),
        big_from_hex(
            "051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e93\
             7b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00",
        ),
        big_from_hex(
            "c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe7592\
             8fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
        ),
        big_from_hex(
            "11839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef426\
             40c550b9013fad0761353c7086a272c24088be94769fd16650",
        ),
        big_from_hex(
            "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f96\
             6b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409",
        ),
        big(1),
        521,
        "p521",
    )
}

/// Every curve with a full parameter set, for property sweeps.
pub fn all_curves() -> Vec<Curve> {
    vec![toy(), small(), secp256k1(), p384(), p521()]
}

/// The small curve every discrete-log solver is exercised against.
pub fn dlp_curve() -> Curve {
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

/// A CTF curve whose order hides two ~80-bit primes; only the smooth part of
/// the order is reachable by the bounded factorizer.
/// See <https://gist.github.com/jproney/7e6cb7a40a8bf342e978a900a32e4dfc>.
pub fn ctf_curve() -> Curve {
    Curve::new(
        big_from_decimal(
            "93556643250795678718734474880013829509320385402690660619699653921022012489089",
        ),
        big_from_decimal(
            "66001598144012865876674115570268990806314506711104521036747533612798434904785",
        ),
        big_from_decimal(
            "25255205054024371783896605039267101837972419055969636393425590261926131199030",
        ),
        big_from_decimal(
            "56027910981442853390816693056740903416379421186644480759538594137486160388926",
        ),
        big_from_decimal(
            "65533262933617146434438829354623658858649726233622196512439589744498050226926",
        ),
        big_from_decimal(
            "93556643250795678718734474880013829509196181230338248789325711173791286325820",
        ),
        big(1),
        256,
        "ctf curve",
    )
}

/// A mid-sized curve whose order splits as 11 · 13 · 31582419389, so the
/// sub-logarithms fall to baby-step/giant-step.
pub fn midsize_curve() -> Curve {
    Curve::new(
        big_from_decimal("4516284508517"),
        big(7),
        big(1),
        big_from_decimal("816487529800"),
        big_from_decimal("1845320358420"),
        big_from_decimal("4516285972627"),
        big(1),
        43,
        "midsize curve",
    )
}
