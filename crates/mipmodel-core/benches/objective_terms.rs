use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mipmodel_core::{ComparisonSense, Model};
use std::hint::black_box;

const VARIABLES: usize = 1_000;

/// Build a model whose objective and single constraint reference every
/// variable `repeats` times.
fn build_model(repeats: usize) -> Model {
    let mut model = Model::with_capacities(VARIABLES, 1);
    let vars: Vec<_> = (0..VARIABLES).map(|_| model.new_bool()).collect();
    let c = model
        .new_constraint(ComparisonSense::LessEqual, VARIABLES as f64)
        .unwrap();
    for round in 0..repeats {
        for &var in &vars {
            let coefficient = (round + 1) as f64;
            model.add_objective_term(coefficient, var).unwrap();
            model.add_constraint_term(c, coefficient, var).unwrap();
        }
    }
    model
}

fn bench_repeated_objective_terms(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective_terms");

    for repeats in [1usize, 2, 4, 8, 16, 32] {
        group.throughput(Throughput::Elements((VARIABLES * repeats) as u64));

        group.bench_with_input(BenchmarkId::new("build", repeats), &repeats, |b, &r| {
            b.iter(|| black_box(build_model(r)));
        });

        let model = build_model(repeats);
        group.bench_with_input(
            BenchmarkId::new("canonicalize", repeats),
            &model,
            |b, model| {
                b.iter(|| black_box(model.objective().terms()));
            },
        );
        group.bench_with_input(BenchmarkId::new("copy", repeats), &model, |b, model| {
            b.iter(|| black_box(model.copy()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_repeated_objective_terms);
criterion_main!(benches);
