//! # ecckit
//!
//! A research toolkit for elliptic curves in short Weierstrass form,
//! $E(\mathbb{F}_p) : y^2 = x^3 + ax + b$ over a prime field. Alongside the
//! group law, ECDSA and ECDH, the crate implements the algorithms that attack
//! and count the group structure:
//!
//! * the discrete-logarithm solvers — Shanks' baby-step/giant-step,
//!   Pollard's rho, and Pohlig–Hellman;
//! * [Schoof's algorithm] for the curve order, built on division polynomials
//!   and the action of Frobenius on the torsion ideals.
//!
//! **None of the arithmetic here is constant-time.** This crate is for
//! experimenting with curves and with the attacks on them, not for
//! protecting secrets.
//!
//! [Schoof's algorithm]: https://en.wikipedia.org/wiki/Schoof's_algorithm

pub mod curve;
pub mod polynomial;
pub mod util;

mod divpoly;
mod dlp;
mod ecdsa;
mod endo;
mod factor;
mod schoof;

pub use curve::Curve;
pub use polynomial::Poly;
pub use schoof::curve_order;

use thiserror::Error as ThisError;

/// Errors surfaced by the point-counting driver.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A trace worker exhausted every candidate characteristic polynomial of
    /// Frobenius, even after refining the torsion ideal.
    #[error("frobenius satisfies no characteristic polynomial")]
    NoCharacterPoly,
}
