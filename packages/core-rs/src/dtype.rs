use crate::error::Error;

/// Runtime tag naming the scalar kind stored in a [`TypedBuffer`].
///
/// Tags are the short identifiers callers pass across loosely typed
/// boundaries (`"f32"`, `"i64"`, `"bool"` ...). Parsing happens once, at the
/// edge, and everything past that point matches on the enum.
///
/// [`TypedBuffer`]: crate::buffer::TypedBuffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Size,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeKind {
    Bool,
    Unsigned,
    Signed,
    Float,
}

impl DType {
    pub const ALL: [DType; 12] = [
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
        DType::Bool,
        DType::Size,
    ];

    pub const fn size_of(self) -> usize {
        match self {
            DType::Bool => 1,
            DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
            DType::Size => std::mem::size_of::<usize>(),
        }
    }

    const fn kind(self) -> TypeKind {
        match self {
            DType::Bool => TypeKind::Bool,
            DType::U8 | DType::U16 | DType::U32 | DType::U64 | DType::Size => TypeKind::Unsigned,
            DType::I8 | DType::I16 | DType::I32 | DType::I64 => TypeKind::Signed,
            DType::F32 | DType::F64 => TypeKind::Float,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self.kind(), TypeKind::Float)
    }

    pub const fn is_signed(self) -> bool {
        matches!(self.kind(), TypeKind::Signed | TypeKind::Float)
    }

    /// Fixed-width integers. `size` is excluded: it is an index type.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            DType::I8
                | DType::I16
                | DType::I32
                | DType::I64
                | DType::U8
                | DType::U16
                | DType::U32
                | DType::U64
        )
    }

    /// Integer or float. Scaling and similar arithmetic transforms accept
    /// only these kinds; `bool` and `size` are rejected.
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::Bool => "bool",
            DType::Size => "size",
        }
    }
}

impl core::str::FromStr for DType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "i8" => Ok(DType::I8),
            "i16" => Ok(DType::I16),
            "i32" => Ok(DType::I32),
            "i64" => Ok(DType::I64),
            "u8" => Ok(DType::U8),
            "u16" => Ok(DType::U16),
            "u32" => Ok(DType::U32),
            "u64" => Ok(DType::U64),
            "f32" => Ok(DType::F32),
            "f64" => Ok(DType::F64),
            "bool" => Ok(DType::Bool),
            "size" => Ok(DType::Size),
            other => Err(Error::UnknownDType(other.to_string())),
        }
    }
}

impl core::fmt::Display for DType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
