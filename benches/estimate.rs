use criterion::{black_box, criterion_group, criterion_main, Criterion};
use house_price_estimator::display::PriceFormatter;
use house_price_estimator::model::{
    Aggregation, LinearRegressor, RegressionTree, SerializableLinearParams, TreeEnsemble,
    TreeEnsembleParams, TreeNode,
};
use house_price_estimator::{
    EncodingTables, FeatureVectorBuilder, HousePriceEstimator, RawInputs, FEATURE_COUNT,
};

/// Balanced tree of the given depth splitting on area.
fn area_tree(depth: usize) -> RegressionTree {
    let mut nodes = Vec::new();
    let internal = (1usize << depth) - 1;
    for idx in 0..internal {
        nodes.push(TreeNode::Split {
            feature: 0,
            threshold: 500.0 + 100.0 * idx as f64,
            left: 2 * idx + 1,
            right: 2 * idx + 2,
        });
    }
    for leaf in 0..(1usize << depth) {
        nodes.push(TreeNode::Leaf {
            value: 1_000_000.0 + leaf as f64,
        });
    }
    RegressionTree { nodes }
}

fn bench_build(c: &mut Criterion) {
    let tables = EncodingTables::training_vocabulary();
    let builder = FeatureVectorBuilder::new(&tables);
    let raw = RawInputs::default();

    c.bench_function("build_feature_vector", |b| {
        b.iter(|| {
            let vector = builder.build(black_box(&raw));
            black_box(vector).ok();
        });
    });
}

fn bench_estimate_linear(c: &mut Criterion) {
    let model = LinearRegressor::from_params(SerializableLinearParams {
        weights: vec![100.0; FEATURE_COUNT],
        bias: 10.0,
    })
    .expect("valid linear params");
    let estimator = HousePriceEstimator::new(
        EncodingTables::training_vocabulary(),
        model,
        PriceFormatter::default(),
    );
    let raw = RawInputs::default();

    c.bench_function("estimate_linear", |b| {
        b.iter(|| {
            let estimate = estimator.estimate(black_box(&raw));
            black_box(estimate).ok();
        });
    });
}

fn bench_estimate_forest(c: &mut Criterion) {
    let forest = TreeEnsemble::from_params(TreeEnsembleParams {
        aggregation: Aggregation::Mean,
        base_score: 0.0,
        trees: (0..100).map(|_| area_tree(8)).collect(),
    })
    .expect("valid forest params");
    let estimator = HousePriceEstimator::new(
        EncodingTables::training_vocabulary(),
        forest,
        PriceFormatter::default(),
    );
    let raw = RawInputs::default();

    c.bench_function("estimate_forest_100x8", |b| {
        b.iter(|| {
            let estimate = estimator.estimate(black_box(&raw));
            black_box(estimate).ok();
        });
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_estimate_linear,
    bench_estimate_forest
);
criterion_main!(benches);
