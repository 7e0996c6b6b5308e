use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curves_math::{exp2_q, FixedQ32_32 as Fixed};
use curves_spline::curve::Synchronous;
use curves_spline::spline::SplineBuilder;
use curves_spline::transfer::FromSensitivity;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn bench_spline_eval(c: &mut Criterion) {
    let transfer = FromSensitivity::new(Synchronous::new(1.5, 1.0, 5.0, 0.5));
    let spline = SplineBuilder::default().build(&transfer);

    let mut rng = XorShiftRng::seed_from_u64(1231275789u64);
    let velocities: Vec<Fixed> = (0..1024)
        .map(|_| Fixed::from_f64(rng.gen_range(0.0..256.0)))
        .collect();

    let mut index = 0;
    c.bench_function("spline_eval", |b| {
        b.iter(|| {
            index = (index + 1) & 1023;
            black_box(spline.eval(velocities[index]))
        })
    });
}

fn bench_exp2(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(1231275789u64);
    let inputs: Vec<i64> = (0..1024).map(|_| rng.gen_range(-(40i64 << 32)..(40i64 << 32))).collect();

    let mut index = 0;
    c.bench_function("exp2_q32_32", |b| {
        b.iter(|| {
            index = (index + 1) & 1023;
            black_box(exp2_q(inputs[index], 32, 32))
        })
    });
}

criterion_group!(benches, bench_spline_eval, bench_exp2);
criterion_main!(benches);
