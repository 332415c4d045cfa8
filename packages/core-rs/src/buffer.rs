use crate::dtype::DType;
use crate::element::Element;
use crate::error::Error;
use crate::{match_dtype, with_buffer, CoreResult};

/// Owned flat buffer whose scalar kind is known only at run time.
///
/// Each variant wraps a plain `Vec` of the matching Rust type, so the tag
/// and the storage can never disagree.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedBuffer {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Size(Vec<usize>),
}

/// Glue between a scalar type and its [`TypedBuffer`] variant.
pub trait BufferElement: Element {
    fn wrap(values: Vec<Self>) -> TypedBuffer;
    fn view(buffer: &TypedBuffer) -> Option<&[Self]>;
    fn view_mut(buffer: &mut TypedBuffer) -> Option<&mut [Self]>;
}

macro_rules! impl_buffer_element {
    ($t:ty, $variant:ident) => {
        impl BufferElement for $t {
            fn wrap(values: Vec<Self>) -> TypedBuffer {
                TypedBuffer::$variant(values)
            }

            fn view(buffer: &TypedBuffer) -> Option<&[Self]> {
                match buffer {
                    TypedBuffer::$variant(values) => Some(values.as_slice()),
                    _ => None,
                }
            }

            fn view_mut(buffer: &mut TypedBuffer) -> Option<&mut [Self]> {
                match buffer {
                    TypedBuffer::$variant(values) => Some(values.as_mut_slice()),
                    _ => None,
                }
            }
        }

        impl From<Vec<$t>> for TypedBuffer {
            fn from(values: Vec<$t>) -> Self {
                TypedBuffer::$variant(values)
            }
        }
    };
}

impl_buffer_element!(i8, I8);
impl_buffer_element!(i16, I16);
impl_buffer_element!(i32, I32);
impl_buffer_element!(i64, I64);
impl_buffer_element!(u8, U8);
impl_buffer_element!(u16, U16);
impl_buffer_element!(u32, U32);
impl_buffer_element!(u64, U64);
impl_buffer_element!(f32, F32);
impl_buffer_element!(f64, F64);
impl_buffer_element!(bool, Bool);
impl_buffer_element!(usize, Size);

impl TypedBuffer {
    /// `len` default values of the given kind.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match_dtype!(dtype, Ty, {
            <Ty as BufferElement>::wrap(vec![<Ty as Element>::from_f64(0.0); len])
        })
    }

    /// Narrow every value into `dtype` using [`Element::from_f64`].
    pub fn from_f64_iter<I>(dtype: DType, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        match_dtype!(dtype, Ty, {
            let narrowed: Vec<Ty> = values.into_iter().map(<Ty as Element>::from_f64).collect();
            <Ty as BufferElement>::wrap(narrowed)
        })
    }

    pub fn dtype(&self) -> DType {
        with_buffer!(self, values => element_dtype(values.as_slice()))
    }

    pub fn len(&self) -> usize {
        with_buffer!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` widened to `f64`, or `None` past the end.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_buffer!(self, values => values.get(index).map(|v| v.to_f64()))
    }

    /// Narrow `value` into the buffer's kind and store it at `index`.
    pub fn set_f64(&mut self, index: usize, value: f64) -> CoreResult<()> {
        let len = self.len();
        with_buffer!(self, values => {
            let slot = values.get_mut(index).ok_or(Error::Bounds {
                row: 0,
                col: index,
                rows: 1,
                cols: len,
            })?;
            *slot = Element::from_f64(value);
            Ok(())
        })
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_buffer!(self, values => values.iter().map(|v| v.to_f64()).collect())
    }

    /// Typed view, `None` when `T` is not this buffer's scalar type.
    pub fn as_slice<T: BufferElement>(&self) -> Option<&[T]> {
        T::view(self)
    }

    pub fn as_slice_mut<T: BufferElement>(&mut self) -> Option<&mut [T]> {
        T::view_mut(self)
    }
}

fn element_dtype<T: Element>(_values: &[T]) -> DType {
    T::DTYPE
}
