use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use ecckit::util::{big, big_from_hex};
use ecckit::{Curve, Poly};

fn secp256k1() -> Curve {
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

fn bench_poly_arith(c: &mut Criterion) {
    let p = Poly::from_ints(&[4, 0, 0, 3, 0, 1]);
    let q = Poly::from_ints(&[0, 0, 0, 4, 0, 0, 6]);
    let m = big(11);
    c.bench_function("poly_add", |b| {
        b.iter(|| black_box(&p).add(black_box(&q), Some(&m)))
    });
    c.bench_function("poly_mul", |b| {
        b.iter(|| black_box(&p).mul(black_box(&q), Some(&m)))
    });
    c.bench_function("poly_div", |b| {
        b.iter(|| black_box(&p).div(black_box(&q), &m))
    });
}

fn bench_scalar_base_mult(c: &mut Criterion) {
    let curve = secp256k1();
    let (d, _, _) = curve.generate_key();
    c.bench_function("scalar_base_mult", |b| {
        b.iter(|| curve.scalar_base_mult(black_box(&d)))
    });
}

fn bench_scalar_mult(c: &mut Criterion) {
    let curve = secp256k1();
    let (_, x, y) = curve.generate_key();
    let (d, _, _) = curve.generate_key();
    c.bench_function("scalar_mult", |b| {
        b.iter(|| curve.scalar_mult(black_box(&x), black_box(&y), black_box(&d)))
    });
}

fn bench_marshal_round_trip(c: &mut Criterion) {
    let curve = secp256k1();
    let (_, x, y) = curve.generate_key();
    c.bench_function("marshal_unmarshal", |b| {
        b.iter(|| {
            let buf = curve.marshal(black_box(&x), black_box(&y));
            curve.unmarshal(&buf).unwrap()
        })
    });
}

fn bench_sign_verify(c: &mut Criterion) {
    let curve = secp256k1();
    let (d, qx, qy) = curve.generate_key();
    let hashed = b"testing";
    c.bench_function("sign", |b| b.iter(|| curve.sign(black_box(&d), hashed)));

    let (r, s) = curve.sign(&d, hashed);
    c.bench_function("verify", |b| {
        b.iter(|| curve.verify(black_box(&qx), black_box(&qy), hashed, &r, &s))
    });
}

criterion_group!(
    benches,
    bench_poly_arith,
    bench_scalar_base_mult,
    bench_scalar_mult,
    bench_marshal_round_trip,
    bench_sign_verify
);
criterion_main!(benches);
