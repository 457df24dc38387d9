//! Benchmarks for the prediction path: flatten, vectorize, model, correction.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indexmap::IndexMap;
use scoop::catalog::Cap;
use scoop::regression::{Kernel, LinearModel, PersistedModel, SvrModel};
use scoop::{
    IngredientCatalog, ModelColumnOrder, RatingCorrection, RatingPredictor, SelectionState,
};
use std::hint::black_box;
use std::sync::Arc;

const GROUPS: usize = 11;
const PER_GROUP: usize = 40;

fn catalog() -> IngredientCatalog {
    let mut csv = String::from("classification,ingredient\n");
    for g in 0..GROUPS {
        for i in 0..PER_GROUP {
            csv.push_str(&format!("group_{g},ingredient_{g}_{i}\n"));
        }
    }
    IngredientCatalog::from_csv_str(&csv)
        .unwrap()
        .with_caps(&IndexMap::new(), Cap::Limited(3))
}

fn columns() -> ModelColumnOrder {
    ModelColumnOrder::new(
        (0..GROUPS).flat_map(|g| (0..PER_GROUP).map(move |i| format!("ingredient_{g}_{i}"))),
    )
    .unwrap()
}

fn full_selection(catalog: &IngredientCatalog) -> SelectionState {
    let mut selection = SelectionState::new(catalog);
    for g in 0..GROUPS {
        for i in 0..3 {
            selection
                .toggle(&format!("group_{g}"), &format!("ingredient_{g}_{i}"))
                .unwrap();
        }
    }
    selection
}

fn models(n_features: usize) -> Vec<(&'static str, PersistedModel)> {
    let linear = PersistedModel::Linear(LinearModel {
        intercept: 4.45,
        coefficients: (0..n_features).map(|i| (i % 7) as f64 * 0.001).collect(),
    });
    let svr = PersistedModel::Svr(SvrModel {
        kernel: Kernel::Rbf { gamma: 0.05 },
        support_vectors: (0..200)
            .map(|s| (0..n_features).map(|i| if (s + i) % 5 == 0 { 1.0 } else { 0.0 }).collect())
            .collect(),
        dual_coef: (0..200).map(|s| if s % 2 == 0 { 0.01 } else { -0.01 }).collect(),
        intercept: 4.41,
    });
    vec![("linear", linear), ("svr_rbf", svr)]
}

fn bench_predict(c: &mut Criterion) {
    let catalog = catalog();
    let columns = columns();
    let selection = full_selection(&catalog);

    let mut group = c.benchmark_group("predict");
    for (name, model) in models(columns.len()) {
        let predictor =
            RatingPredictor::new(Arc::new(model), columns.clone(), RatingCorrection::default())
                .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &selection, |b, sel| {
            b.iter(|| black_box(predictor.predict(black_box(sel))));
        });
    }
    group.finish();
}

fn bench_vectorize(c: &mut Criterion) {
    let catalog = catalog();
    let columns = columns();
    let selection = full_selection(&catalog);
    let names = scoop::predict::flatten(&selection);

    c.bench_function("vectorize", |b| {
        b.iter(|| black_box(columns.vectorize(black_box(&names).iter().copied())));
    });
}

criterion_group!(benches, bench_predict, bench_vectorize);
criterion_main!(benches);
