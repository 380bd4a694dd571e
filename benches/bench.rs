use criterion::{black_box, criterion_group, criterion_main, Criterion};
use newton_basins::{
    classify, classify_newton, classify_parallel, poly, BasinConfig, GridSize, Region,
};

fn bench_classifiers(c: &mut Criterion) {
    let p = poly![-1.0, 0.0, 0.0, 1.0];
    let region = Region::new(-2.0, 2.0, -2.0, 2.0);
    let grid = GridSize { n_re: 16, n_im: 16 };
    let config = BasinConfig::default();
    let newton_config = BasinConfig {
        max_iter: 500,
        epsilon: 1E-8,
        decimals: 4,
    };

    c.bench_function("classify robust 16x16", |b| {
        b.iter(|| classify(black_box(&p), region, grid, &config).unwrap());
    });
    c.bench_function("classify robust 16x16 parallel", |b| {
        b.iter(|| classify_parallel(black_box(&p), region, grid, &config).unwrap());
    });
    c.bench_function("classify newton 16x16", |b| {
        b.iter(|| classify_newton(black_box(&p), region, grid, &newton_config).unwrap());
    });
}

criterion_group!(benches, bench_classifiers);
criterion_main!(benches);
