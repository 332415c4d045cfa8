use numstat_core::matrix_stats::{
    centered_covariance, column_mean, column_variance, covariance,
};
use numstat_core::{stats, Error, Matrix, StreamingAccumulator};

fn observations() -> Matrix {
    Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).expect("observations")
}

#[test]
fn accumulator_textbook_sequence() {
    let mut acc = StreamingAccumulator::new();
    acc.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert!((acc.mean() - 5.0).abs() < 1e-12);
    assert!((acc.variance() - 4.571_428_571_428_571).abs() < 1e-12);
}

#[test]
fn accumulator_with_too_few_samples() {
    let mut acc = StreamingAccumulator::new();
    assert_eq!(acc.variance(), 0.0);
    assert_eq!(acc.stddev(), 0.0);
    acc.push(10.0);
    assert_eq!(acc.variance(), 0.0);
    assert_eq!(acc.stddev(), 0.0);
}

#[test]
fn vector_stats_reference_values() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(stats::mean(&x), Ok(3.0));
    assert_eq!(stats::minmax(&x), Ok((1.0, 5.0)));
    assert_eq!(stats::variance(&x), Ok(2.5));
    assert!((stats::stddev(&x).expect("stddev") - 2.5f64.sqrt()).abs() < 1e-15);
}

#[test]
fn vector_stats_empty_errors() {
    assert!(matches!(stats::mean(&[]), Err(Error::Empty { .. })));
    assert!(matches!(stats::variance(&[4.0]), Err(Error::Empty { required: 2, got: 1, .. })));
}

#[test]
fn column_mean_reference() {
    let means = column_mean(&observations()).expect("column mean");
    assert_eq!(means.shape(), (1, 2));
    assert_eq!(means.get(0, 0), Ok(3.0));
    assert_eq!(means.get(0, 1), Ok(4.0));
}

#[test]
fn column_variance_matches_vector_variance() {
    let m = observations();
    let var = column_variance(&m).expect("column variance");
    let first: Vec<f64> = (0..m.rows()).map(|r| m.get(r, 0).expect("get")).collect();
    assert_eq!(var.get(0, 0), stats::variance(&first));
}

#[test]
fn covariance_keeps_uncentered_moment() {
    let cov = covariance(&observations()).expect("covariance");
    assert_eq!(cov.shape(), (2, 2));
    assert_eq!(cov.get(0, 0), Ok(17.5));
    assert_eq!(cov.get(0, 1), Ok(22.0));
    assert_eq!(cov.get(1, 0), Ok(22.0));
    assert_eq!(cov.get(1, 1), Ok(28.0));
}

#[test]
fn centered_covariance_is_textbook() {
    let m = Matrix::from_rows(&[[2.0, 1.0], [4.0, 3.0], [6.0, 2.0], [8.0, 6.0]]).expect("m");
    let cov = centered_covariance(&m).expect("centered covariance");
    // x mean 5, y mean 3; Σdx² = 20, Σdxdy = 14, Σdy² = 14
    assert!((cov.get(0, 0).expect("get") - 20.0 / 3.0).abs() < 1e-12);
    assert!((cov.get(0, 1).expect("get") - 14.0 / 3.0).abs() < 1e-12);
    assert!((cov.get(1, 1).expect("get") - 14.0 / 3.0).abs() < 1e-12);
}

#[test]
fn covariance_needs_two_rows() {
    let m = Matrix::from_rows(&[[1.0, 2.0]]).expect("m");
    let err = covariance(&m).expect_err("single row");
    assert_eq!(err.code(), numstat_core::error::codes::EMPTY);
}
