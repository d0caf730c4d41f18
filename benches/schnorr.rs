use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use secp256k1_schnorr::rng::Csprng;
use secp256k1_schnorr::secp256k1::{EcMultGenContext, Keypair};

fn setup() -> (EcMultGenContext, Keypair) {
    let mut rng = Csprng::from_seed([5u8; 32]);
    let ctx = EcMultGenContext::build(&mut rng);
    let mut seckey = [0u8; 32];
    seckey[31] = 42;
    let keypair = Keypair::from_seckey(&seckey, &ctx).unwrap();
    (ctx, keypair)
}

pub fn bench_sign(c: &mut Criterion) {
    let (ctx, keypair) = setup();
    let msg = [0u8; 32];

    c.bench_function("schnorr sign 32-byte message", |b| {
        b.iter(|| keypair.sign32(black_box(&msg), None, &ctx).unwrap())
    });
}

pub fn bench_verify(c: &mut Criterion) {
    let (ctx, keypair) = setup();
    let msg = [0u8; 32];
    let sig = keypair.sign32(&msg, None, &ctx).unwrap();
    let xonly = keypair.xonly_public_key();

    c.bench_function("schnorr verify 32-byte message", |b| {
        b.iter(|| sig.verify(black_box(&msg), &xonly))
    });
}

pub fn bench_ecmult_gen(c: &mut Criterion) {
    let (ctx, _keypair) = setup();
    let mut rng = Csprng::from_seed([9u8; 32]);
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    let (k, _) = secp256k1_schnorr::secp256k1::scalar::Scalar::from_bytes(&seed);

    c.bench_function("ecmult_gen (constant-time k*G)", |b| {
        b.iter(|| ctx.ecmult_gen(black_box(&k)))
    });
}

criterion_group!(benches, bench_sign, bench_verify, bench_ecmult_gen);
criterion_main!(benches);
