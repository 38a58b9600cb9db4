use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polars::prelude::*;
use rand::prelude::*;
use sdmb_sampler::prelude::*;

fn create_imbalanced_data(n_rows: usize, n_features: usize, minority_ratio: f64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(0);
    let n_minority = ((n_rows as f64) * minority_ratio) as usize;

    let mut columns: Vec<Column> = (0..n_features)
        .map(|i| {
            let values: Vec<f64> = (0..n_rows).map(|_| rng.gen::<f64>() * 10.0).collect();
            Column::new(format!("feature_{}", i).into(), values)
        })
        .collect();

    let target: Vec<i64> = (0..n_rows)
        .map(|i| if i < n_minority { 1 } else { 0 })
        .collect();
    columns.push(Column::new("target".into(), target));

    DataFrame::new(columns).unwrap()
}

fn bench_fit_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_resample");
    group.sample_size(20);

    for n_rows in [1000, 10000, 50000].iter() {
        let df = create_imbalanced_data(*n_rows, 10, 0.1);

        group.bench_with_input(BenchmarkId::new("auto", n_rows), &df, |b, df| {
            b.iter(|| {
                let mut sampler = SDMBSampler::new("target").with_seed(42);
                sampler.fit_resample(black_box(df)).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_feature_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_policy");
    let df = create_imbalanced_data(10000, 50, 0.2);

    for policy in [
        FeaturesToChange::Auto,
        FeaturesToChange::Fraction(0.5),
        FeaturesToChange::FixedCount(50),
    ] {
        group.bench_with_input(
            BenchmarkId::new("policy", format!("{:?}", policy)),
            &df,
            |b, df| {
                b.iter(|| {
                    let mut sampler = SDMBSampler::new("target")
                        .with_features_to_change(policy)
                        .with_seed(42);
                    sampler.fit_resample(black_box(df)).unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fit_resample, bench_feature_policy);
criterion_main!(benches);
