use numstat_core::plot::histogram_counts;
use numstat_core::prob::{sample, std_dev, Dist, DistKind};
use numstat_core::tensor::{self, minmax};
use numstat_core::{DType, Error, Matrix, Model, ModelKind};

/// Resolve a distribution the way a loosely typed caller names it.
fn dist(name: &str, a: f64, b: f64) -> Dist {
    let kind: DistKind = name.parse().expect("known distribution");
    Dist::with_params(kind, a, b).expect("valid parameters")
}

#[test]
fn model_names_round_trip_through_kind() {
    for (name, kind) in [
        ("linear_regression", ModelKind::LinearRegression),
        ("logistic_regression", ModelKind::LogisticRegression),
        ("kmeans", ModelKind::KMeans),
    ] {
        assert_eq!(name.parse::<ModelKind>().expect("model"), kind);
    }
    let err = "svm".parse::<ModelKind>().expect_err("unknown");
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn kmeans_on_separated_rows_keeps_groups_apart() {
    let x = Matrix::from_rows(&[[0.0, 0.0], [10.0, 10.0], [20.0, 0.0], [0.5, 0.0], [10.0, 10.5], [20.5, 0.0]])
        .expect("matrix");
    let model = Model::fit(ModelKind::KMeans, &x, None).expect("kmeans");
    let labels = model.predict(&x).expect("predict");
    assert_eq!(labels, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);

    let centers = model.centers().expect("centres");
    assert_eq!(centers.shape(), (3, 2));
    assert_eq!(centers.row(0).expect("row"), &[0.25, 0.0]);
}

#[test]
fn binomial_draws_stay_within_trials() {
    let out = sample(dist("binomial", 8.0, 0.5), DType::U16, 64, Some(11)).expect("sample");
    assert_eq!(out.dtype(), DType::U16);
    let (lo, hi) = minmax::<u16>(&out).expect("bounds");
    assert!(hi <= 8 && lo <= hi);

    let counts = histogram_counts(&out, 4).expect("histogram");
    assert_eq!(counts.iter().sum::<usize>(), 64);
}

#[test]
fn normal_moments_follow_parameters() {
    let out = sample(dist("normal", -3.0, 0.5), DType::F64, 2000, Some(5)).expect("sample");
    let m = tensor::mean(&out).expect("mean");
    let sd = std_dev(&out).expect("std");
    assert!((m + 3.0).abs() < 0.1, "mean {m}");
    assert!((sd - 0.5).abs() < 0.1, "std {sd}");
}
