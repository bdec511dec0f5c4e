use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use knn::{euclidean, k_nearest, Query, Sample, Target, TrainingStore};

fn build_store(samples: usize, dims: usize) -> TrainingStore {
    let mut rng = StdRng::seed_from_u64(42);
    TrainingStore::new(
        (0..samples)
            .map(|i| Sample {
                features: (0..dims).map(|_| rng.gen_range(-100.0..100.0)).collect(),
                target: Target::Label(if i % 2 == 0 { "even" } else { "odd" }.to_string()),
            })
            .collect(),
    )
}

fn bench_euclidean(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a: Vec<f64> = (0..64).map(|_| rng.gen_range(-100.0..100.0)).collect();
    let b: Vec<f64> = (0..64).map(|_| rng.gen_range(-100.0..100.0)).collect();

    c.bench_function("euclidean 64d", |bench| {
        bench.iter(|| euclidean(black_box(&a), black_box(&b)))
    });
}

fn bench_k_nearest(c: &mut Criterion) {
    let store = build_store(10_000, 8);
    let mut rng = StdRng::seed_from_u64(7);
    let query = Query {
        features: (0..8).map(|_| rng.gen_range(-100.0..100.0)).collect(),
    };

    c.bench_function("k_nearest 10k samples, 8d, k=5", |bench| {
        bench.iter(|| k_nearest(black_box(&query), black_box(&store), 5).unwrap())
    });
}

criterion_group!(benches, bench_euclidean, bench_k_nearest);
criterion_main!(benches);
