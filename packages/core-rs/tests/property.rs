use numstat_core::{add, matmul, matrix_stats, stats, Error, Matrix, StreamingAccumulator};
use proptest::prelude::*;

fn matrix_from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Matrix {
    Matrix::from_vec(rows, cols, data).expect("matrix shape mismatch")
}

prop_compose! {
    fn small_matrix()(rows in 1usize..5, cols in 1usize..5,
                      values in prop::collection::vec(-10f64..10f64, 1..=25))
                      -> (Matrix, usize, usize) {
        let total = rows * cols;
        let data = values.into_iter().cycle().take(total).collect::<Vec<_>>();
        (matrix_from_vec(data, rows, cols), rows, cols)
    }
}

prop_compose! {
    fn compatible_matrices()(m in 1usize..4, k in 1usize..4, n in 1usize..4,
                             left_values in prop::collection::vec(-5f64..5f64, 1..=16),
                             right_values in prop::collection::vec(-5f64..5f64, 1..=16))
                             -> (Matrix, Matrix, usize, usize, usize) {
        let lhs = left_values.into_iter().cycle().take(m * k).collect::<Vec<_>>();
        let rhs = right_values.into_iter().cycle().take(k * n).collect::<Vec<_>>();
        (
            matrix_from_vec(lhs, m, k),
            matrix_from_vec(rhs, k, n),
            m,
            k,
            n,
        )
    }
}

proptest! {
    #[test]
    fn zeros_reads_back_zero_everywhere(rows in 1usize..8, cols in 1usize..8) {
        let m = Matrix::zeros(rows, cols).expect("zeros");
        for r in 0..rows {
            for c in 0..cols {
                prop_assert_eq!(m.get(r, c), Ok(0.0));
            }
        }
    }

    #[test]
    fn zero_dimension_never_constructs(n in 0usize..16) {
        prop_assert!(Matrix::zeros(0, n).is_err());
        prop_assert!(Matrix::zeros(n, 0).is_err());
    }

    #[test]
    fn set_then_get_is_exact((matrix, rows, cols) in small_matrix(),
                             r in 0usize..5, c in 0usize..5,
                             value in prop::num::f64::ANY) {
        let mut m = matrix;
        if r < rows && c < cols {
            m.set(r, c, value).expect("in bounds");
            let read = m.get(r, c).expect("in bounds");
            prop_assert!(read.to_bits() == value.to_bits());
        } else {
            let bounds_err = matches!(m.set(r, c, value), Err(Error::Bounds { .. }));
            prop_assert!(bounds_err);
            let get_err = matches!(m.get(r, c), Err(Error::Bounds { .. }));
            prop_assert!(get_err);
        }
    }

    #[test]
    fn copy_is_deep_and_idempotent((matrix, _rows, _cols) in small_matrix()) {
        let first = matrix.copy().expect("copy");
        let second = first.copy().expect("copy of copy");
        prop_assert_eq!(&first, &matrix);
        prop_assert_eq!(&second, &first);

        let mut mutated = first;
        mutated.fill(f64::MAX);
        prop_assert_eq!(&second, &matrix);
    }

    #[test]
    fn add_matches_reference((matrix, rows, cols) in small_matrix(),
                             second in prop::collection::vec(-10f64..10f64, 1..=25)) {
        let rhs = second.into_iter().cycle().take(rows * cols).collect::<Vec<_>>();
        let rhs_matrix = matrix_from_vec(rhs.clone(), rows, cols);
        let sum = add(&matrix, &rhs_matrix).expect("add");
        let expected = matrix
            .to_vec()
            .into_iter()
            .zip(rhs.into_iter())
            .map(|(a, b)| a + b)
            .collect::<Vec<_>>();
        prop_assert_eq!(sum.to_vec(), expected);
    }

    #[test]
    fn add_commutes((matrix, rows, cols) in small_matrix(),
                    second in prop::collection::vec(-10f64..10f64, 1..=25)) {
        let rhs = second.into_iter().cycle().take(rows * cols).collect::<Vec<_>>();
        let other = matrix_from_vec(rhs, rows, cols);
        prop_assert_eq!(add(&matrix, &other).expect("a+b"), add(&other, &matrix).expect("b+a"));
    }

    #[test]
    fn matmul_matches_reference(data in compatible_matrices()) {
        let (lhs, rhs, m, k, n) = data;
        let product = matmul(&lhs, &rhs).expect("matmul");
        let lhs_vec = lhs.to_vec();
        let rhs_vec = rhs.to_vec();
        let product_vec = product.to_vec();
        for row in 0..m {
            for col in 0..n {
                let mut acc = 0f64;
                for shared in 0..k {
                    let a = lhs_vec[row * k + shared];
                    let b = rhs_vec[shared * n + col];
                    acc += a * b;
                }
                let idx = row * n + col;
                // Same accumulation order, so the match is exact.
                prop_assert!(product_vec[idx].to_bits() == acc.to_bits());
            }
        }
    }

    #[test]
    fn matmul_rejects_inner_mismatch(m in 1usize..4, k in 1usize..4, j in 1usize..4, n in 1usize..4) {
        prop_assume!(k != j);
        let a = Matrix::zeros(m, k).expect("lhs");
        let b = Matrix::zeros(j, n).expect("rhs");
        let mismatch = matches!(matmul(&a, &b), Err(Error::DimMismatch { .. }));
        prop_assert!(mismatch);
    }

    #[test]
    fn covariance_is_symmetric((matrix, rows, cols) in small_matrix()) {
        prop_assume!(rows >= 2);
        for cov in [
            matrix_stats::covariance(&matrix).expect("covariance"),
            matrix_stats::centered_covariance(&matrix).expect("centered"),
        ] {
            prop_assert_eq!(cov.shape(), (cols, cols));
            for i in 0..cols {
                for j in 0..cols {
                    prop_assert_eq!(cov.get(i, j), cov.get(j, i));
                }
            }
        }
    }

    #[test]
    fn streaming_variance_matches_two_pass(values in prop::collection::vec(-1e3f64..1e3f64, 2..64)) {
        let acc: StreamingAccumulator = values.iter().copied().collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let two_pass = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
        prop_assert!((acc.variance() - two_pass).abs() <= 1e-9 * two_pass.max(1.0));
        prop_assert_eq!(stats::variance(&values), Ok(acc.variance()));
    }

    #[test]
    fn minmax_bounds_every_value(values in prop::collection::vec(-1e6f64..1e6f64, 1..64)) {
        let (lo, hi) = stats::minmax(&values).expect("non-empty");
        prop_assert!(values.iter().all(|&v| lo <= v && v <= hi));
        prop_assert!(values.contains(&lo) && values.contains(&hi));
    }
}
