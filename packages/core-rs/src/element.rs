use crate::dtype::DType;
use num_traits::{Bounded, NumCast, ToPrimitive, Zero};

/// Scalar types that can live in a [`TypedBuffer`](crate::buffer::TypedBuffer).
///
/// `to_f64` / `from_f64` form the single read/write accessor every typed
/// routine goes through: values are widened to `f64` for arithmetic and
/// narrowed back into the buffer's own kind on store.
pub trait Element: Copy + 'static {
    const DTYPE: DType;

    fn to_f64(self) -> f64;

    /// Narrow `value` into `Self`. Integers truncate toward zero and saturate
    /// at their bounds, with NaN stored as zero. Floats round to nearest.
    fn from_f64(value: f64) -> Self;
}

fn saturating_cast<T>(value: f64) -> T
where
    T: NumCast + Bounded + Zero,
{
    if value.is_nan() {
        return T::zero();
    }
    match <T as NumCast>::from(value) {
        Some(v) => v,
        None if value < 0.0 => T::min_value(),
        None => T::max_value(),
    }
}

macro_rules! impl_integer_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_f64(self) -> f64 {
                ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                saturating_cast::<$t>(value)
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_integer_element!(i8, DType::I8);
impl_integer_element!(i16, DType::I16);
impl_integer_element!(i32, DType::I32);
impl_integer_element!(i64, DType::I64);
impl_integer_element!(u8, DType::U8);
impl_integer_element!(u16, DType::U16);
impl_integer_element!(u32, DType::U32);
impl_integer_element!(u64, DType::U64);
impl_integer_element!(usize, DType::Size);
impl_float_element!(f32, DType::F32);
impl_float_element!(f64, DType::F64);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value > 0.5
    }
}
