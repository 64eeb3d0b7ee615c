use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rateset::*;

fn synthetic_rows(n_users: usize, n_items: usize) -> Vec<(String, String, f64)> {
    let mut rows = Vec::with_capacity(n_users * n_items);
    for u in 0..n_users {
        for i in 0..n_items {
            let rating = 1.0 + ((u + i) % 5) as f64;
            rows.push((format!("user{u}"), format!("item{i}"), rating));
        }
    }
    rows
}

fn benchmark_trainset_build(c: &mut Criterion) {
    let rows = synthetic_rows(1000, 50);

    c.bench_function("build_full_trainset_50k", |b| {
        b.iter(|| {
            let dataset = Dataset::load_from_rows(rows.clone(), Reader::default());
            black_box(dataset.build_full_trainset().unwrap());
        });
    });
}

fn benchmark_rating_iteration(c: &mut Criterion) {
    let dataset = Dataset::load_from_rows(synthetic_rows(1000, 50), Reader::default());
    let trainset = dataset.build_full_trainset().unwrap();

    c.bench_function("all_ratings_sum_50k", |b| {
        b.iter(|| {
            let sum: f64 = trainset.all_ratings().map(|(_, _, r)| r).sum();
            black_box(sum);
        });
    });

    c.bench_function("build_testset_50k", |b| {
        b.iter(|| {
            black_box(trainset.build_testset().unwrap());
        });
    });
}

fn benchmark_anti_testset(c: &mut Criterion) {
    // Sparse ratings so most user/item pairs end up in the anti testset.
    let rows: Vec<(String, String, f64)> = (0..1000)
        .map(|n| (format!("user{}", n % 100), format!("item{}", n % 97), 3.0))
        .collect();
    let dataset = Dataset::load_from_rows(rows, Reader::default());
    let trainset = dataset.build_full_trainset().unwrap();

    c.bench_function("build_anti_testset", |b| {
        b.iter(|| {
            black_box(trainset.build_anti_testset(Some(3.0)).unwrap());
        });
    });
}

fn benchmark_line_parsing(c: &mut Criterion) {
    let reader = Reader::new("user item rating timestamp")
        .unwrap()
        .with_sep("\t");

    c.bench_function("parse_line", |b| {
        b.iter(|| {
            black_box(reader.parse_line("196\t242\t3\t881250949").unwrap());
        });
    });
}

criterion_group!(
    benches,
    benchmark_trainset_build,
    benchmark_rating_iteration,
    benchmark_anti_testset,
    benchmark_line_parsing
);
criterion_main!(benches);
