use criterion::{criterion_group, criterion_main, Criterion};
use gmcrypt_algorithms::ec::sm2_curve;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_curve_ops(c: &mut Criterion) {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let (d, q) = curve.generate_keypair(&mut rng).unwrap();

    c.bench_function("scalar_mult_base", |b| {
        b.iter(|| curve.scalar_mult(&d, curve.generator()).unwrap())
    });

    c.bench_function("point_add", |b| {
        b.iter(|| curve.add(curve.generator(), &q).unwrap())
    });

    c.bench_function("field_inverse", |b| {
        b.iter(|| curve.field().inv(&d).unwrap())
    });
}

criterion_group!(benches, bench_curve_ops);
criterion_main!(benches);
