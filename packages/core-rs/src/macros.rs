/// Run `$body` with `$values` bound to the inner `Vec` of a
/// [`TypedBuffer`](crate::buffer::TypedBuffer), whatever its variant.
///
/// ```
/// # use numstat_core::{buffer::TypedBuffer, with_buffer};
/// let buf = TypedBuffer::from(vec![1i16, 2, 3]);
/// let len = with_buffer!(&buf, values => values.len());
/// assert_eq!(len, 3);
/// ```
#[macro_export]
macro_rules! with_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {{
        match $buffer {
            $crate::buffer::TypedBuffer::I8($values) => $body,
            $crate::buffer::TypedBuffer::I16($values) => $body,
            $crate::buffer::TypedBuffer::I32($values) => $body,
            $crate::buffer::TypedBuffer::I64($values) => $body,
            $crate::buffer::TypedBuffer::U8($values) => $body,
            $crate::buffer::TypedBuffer::U16($values) => $body,
            $crate::buffer::TypedBuffer::U32($values) => $body,
            $crate::buffer::TypedBuffer::U64($values) => $body,
            $crate::buffer::TypedBuffer::F32($values) => $body,
            $crate::buffer::TypedBuffer::F64($values) => $body,
            $crate::buffer::TypedBuffer::Bool($values) => $body,
            $crate::buffer::TypedBuffer::Size($values) => $body,
        }
    }};
}

/// Dispatch a [`DType`](crate::dtype::DType) to its Rust scalar type.
///
/// ```
/// # use numstat_core::{dtype::DType, match_dtype};
/// let dtype = DType::I16;
/// let size = match_dtype!(dtype, Ty, {
///     std::mem::size_of::<Ty>()
/// });
/// assert_eq!(size, 2);
/// ```
#[macro_export]
macro_rules! match_dtype {
    ($dtype:expr, $T:ident, $body:block) => {{
        match $dtype {
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::Bool => {
                type $T = bool;
                $body
            }
            $crate::dtype::DType::Size => {
                type $T = usize;
                $body
            }
        }
    }};
}
