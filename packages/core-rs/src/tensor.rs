//! Shape arithmetic and whole-buffer reductions over [`TypedBuffer`]s.

use crate::buffer::{BufferElement, TypedBuffer};
use crate::element::Element;
use crate::error::Error;
use crate::{with_buffer, CoreResult};

/// Number of elements described by `shape`. A rank-0 shape holds one.
///
/// ```
/// use numstat_core::tensor::elements;
/// assert_eq!(elements(&[2, 3, 4]).unwrap(), 24);
/// assert_eq!(elements(&[]).unwrap(), 1);
/// ```
pub fn elements(shape: &[usize]) -> CoreResult<usize> {
    shape.iter().try_fold(1usize, |total, &dim| {
        total
            .checked_mul(dim)
            .ok_or_else(|| Error::invalid_argument(format!("shape {shape:?} overflows usize")))
    })
}

/// Smallest and largest element in the buffer's own scalar type.
///
/// `T` must match the buffer's kind; asking an `f64` buffer for `i32`
/// bounds is an argument error rather than a conversion. NaN never
/// replaces a finite bound.
pub fn minmax<T>(input: &TypedBuffer) -> CoreResult<(T, T)>
where
    T: BufferElement + PartialOrd,
{
    let values = input.as_slice::<T>().ok_or_else(|| {
        Error::invalid_argument(format!(
            "minmax: requested {} bounds from a {} buffer",
            T::DTYPE,
            input.dtype()
        ))
    })?;
    let (&first, rest) = values
        .split_first()
        .ok_or(Error::empty("tensor_minmax", 1, 0))?;
    Ok(rest.iter().fold((first, first), |(lo, hi), &v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    }))
}

/// Arithmetic mean, summed in `f64` by direct accumulation.
pub fn mean(input: &TypedBuffer) -> CoreResult<f64> {
    if input.is_empty() {
        return Err(Error::empty("tensor_mean", 1, 0));
    }
    let sum: f64 = with_buffer!(input, values => values.iter().map(|v| v.to_f64()).sum());
    Ok(sum / input.len() as f64)
}
