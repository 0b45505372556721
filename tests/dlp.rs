//! Discrete-logarithm scenarios: the three solvers against the small test
//! curve, and Pohlig–Hellman against larger orders with known structure.

mod common;

use ecckit::util::{big, big_from_decimal};

#[test]
fn test_solvers_agree_across_the_group() {
    let c = common::dlp_curve();
    let (px, py) = (c.gx.clone(), c.gy.clone());

    // A strided sweep keeps the default run fast; the exhaustive sweep below
    // covers every k.
    let mut ks: Vec<i64> = (1..200).collect();
    ks.extend((200..7889).step_by(97));
    ks.extend([7887, 7888]);

    for k in ks {
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
#[ignore = "exhaustive sweep over the whole group, minutes in debug builds"]
fn test_solvers_agree_for_every_k() {
    let c = common::dlp_curve();
    let (px, py) = (c.gx.clone(), c.gy.clone());
    for k in 1..7889i64 {
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
fn test_pollard_rho_known_log() {
    let c = common::dlp_curve();
    let (hx, hy) = (big(1075), big(54));
    let k = c.pollard_rho(&c.gx.clone(), &c.gy.clone(), &hx, &hy);
    assert_eq!(k, Some(big(1275)));
    // Cross-check the witness.
    assert_eq!(c.scalar_base_mult(&big(1275)), (hx, hy));
}

#[test]
fn test_pohlig_hellman_ctf_curve() {
    // The order of this curve contains two ~80-bit primes that no bounded
    // rho budget can split, so the solver recovers the logarithm modulo the
    // smooth part of the order.
    let c = common::ctf_curve();
    let hx = big_from_decimal(
        "79745356646949069441279781387743208137742538544495675881933883371885177103895",
    );
    let hy = big_from_decimal(
        "34529309219406689418881493671300037164559702076524725195399995669560101677178",
    );
    let k = c.pohlig_hellman(&c.gx.clone(), &c.gy.clone(), &hx, &hy);
    assert_eq!(k, Some(big_from_decimal("124194987912445918487544544020")));
}

#[test]
fn test_pohlig_hellman_midsize_curve() {
    let c = common::midsize_curve();
    let want = big(21_345_332);
    let (hx, hy) = c.scalar_base_mult(&want);
    let k = c.pohlig_hellman(&c.gx.clone(), &c.gy.clone(), &hx, &hy);
    assert_eq!(k, Some(want));
}
