//! Dense `f64` matrices, streaming and column statistics, and typed-buffer
//! series/transform routines, with small models, sampling and text charts
//! built on the same buffers.
//!
//! ```
//! use numstat_core::{matmul, matrix_stats, Matrix};
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
//! let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]])?;
//! let p = matmul(&a, &b)?;
//! assert_eq!(p.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
//!
//! let means = matrix_stats::column_mean(&a)?;
//! assert_eq!(means.as_slice(), &[2.5, 3.5, 4.5]);
//! # Ok::<(), numstat_core::Error>(())
//! ```

mod macros;

pub mod accumulator;
pub mod buffer;
pub mod dtype;
pub mod element;
pub mod error;
pub mod matrix;
pub mod matrix_stats;
pub mod metrics;
pub mod ml;
pub mod plot;
pub mod prob;
pub mod series;
pub mod stats;
pub mod tensor;
pub mod threading;
pub mod transform;

pub use accumulator::StreamingAccumulator;
pub use buffer::TypedBuffer;
pub use dtype::DType;
pub use error::Error;
pub use matrix::{add, matmul, Matrix};
pub use metrics::{alloc_bytes_total, reset_alloc_bytes, take_alloc_bytes};
pub use ml::{Model, ModelKind};

pub type CoreResult<T> = Result<T, Error>;
