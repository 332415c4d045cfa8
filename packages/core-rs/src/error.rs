use crate::dtype::DType;
use thiserror::Error;

/// Canonical error codes emitted by the core. The codes are stable so that
/// callers can branch on them without parsing messages.
pub mod codes {
    /// A heap allocation for result storage failed or the shape overflowed.
    pub const ALLOC: &str = "E_ALLOC";
    /// A row or column index fell outside `[0, dim)`.
    pub const BOUNDS: &str = "E_BOUNDS";
    /// Operand shapes are incompatible for the requested operation.
    pub const DIM_MISMATCH: &str = "E_DIM_MISMATCH";
    /// Not enough elements (or rows) for the requested operation.
    pub const EMPTY: &str = "E_EMPTY";
    /// A runtime type tag did not name a supported scalar kind.
    pub const UNKNOWN_DTYPE: &str = "E_UNKNOWN_DTYPE";
    /// The scalar kind is known but not accepted by this operation.
    pub const UNSUPPORTED_DTYPE: &str = "E_UNSUPPORTED_DTYPE";
    /// Any other rejected argument (zero window, unknown method name).
    pub const INVALID_ARGUMENT: &str = "E_INVALID_ARGUMENT";
}

/// Every recoverable failure reported by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("E_ALLOC: unable to allocate storage for {elements} elements")]
    Alloc { elements: usize },

    #[error("E_BOUNDS: index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    Bounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error(
        "E_DIM_MISMATCH: {op}: incompatible shapes {}x{} and {}x{}",
        left.0,
        left.1,
        right.0,
        right.1
    )]
    DimMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("E_EMPTY: {op}: requires at least {required} elements, got {got}")]
    Empty {
        op: &'static str,
        required: usize,
        got: usize,
    },

    #[error("E_UNKNOWN_DTYPE: unknown dtype '{0}'")]
    UnknownDType(String),

    #[error("E_UNSUPPORTED_DTYPE: {op}: dtype '{}' is not supported", dtype.as_str())]
    UnsupportedDType { op: &'static str, dtype: DType },

    #[error("E_INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Stable code for this error, one of the constants in [`codes`].
    pub fn code(&self) -> &'static str {
        match self {
            Error::Alloc { .. } => codes::ALLOC,
            Error::Bounds { .. } => codes::BOUNDS,
            Error::DimMismatch { .. } => codes::DIM_MISMATCH,
            Error::Empty { .. } => codes::EMPTY,
            Error::UnknownDType(_) => codes::UNKNOWN_DTYPE,
            Error::UnsupportedDType { .. } => codes::UNSUPPORTED_DTYPE,
            Error::InvalidArgument(_) => codes::INVALID_ARGUMENT,
        }
    }

    pub(crate) fn empty(op: &'static str, required: usize, got: usize) -> Self {
        Error::Empty { op, required, got }
    }

    pub(crate) fn invalid_argument(message: impl AsRef<str>) -> Self {
        Error::InvalidArgument(message.as_ref().to_string())
    }
}
