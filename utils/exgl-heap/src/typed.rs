use bytemuck::Pod;

// === TypedArrayKind === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl TypedArrayKind {
    pub const fn element_size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

// === TypedArrayData === //

/// The elements of a typed array, stored at their native alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArrayData {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

macro_rules! for_each_variant {
    ($self:expr, $elems:ident => $body:expr) => {
        match $self {
            TypedArrayData::Int8($elems) => $body,
            TypedArrayData::Uint8($elems) => $body,
            TypedArrayData::Int16($elems) => $body,
            TypedArrayData::Uint16($elems) => $body,
            TypedArrayData::Int32($elems) => $body,
            TypedArrayData::Uint32($elems) => $body,
            TypedArrayData::Float32($elems) => $body,
            TypedArrayData::Float64($elems) => $body,
        }
    };
}

impl TypedArrayData {
    pub fn kind(&self) -> TypedArrayKind {
        match self {
            Self::Int8(_) => TypedArrayKind::Int8,
            Self::Uint8(_) => TypedArrayKind::Uint8,
            Self::Int16(_) => TypedArrayKind::Int16,
            Self::Uint16(_) => TypedArrayKind::Uint16,
            Self::Int32(_) => TypedArrayKind::Int32,
            Self::Uint32(_) => TypedArrayKind::Uint32,
            Self::Float32(_) => TypedArrayKind::Float32,
            Self::Float64(_) => TypedArrayKind::Float64,
        }
    }

    /// The element count.
    pub fn len(&self) -> usize {
        for_each_variant!(self, elems => elems.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes(&self) -> &[u8] {
        for_each_variant!(self, elems => bytemuck::cast_slice(elems.as_slice()))
    }

    /// Reinterprets the elements as `T`, failing if the byte length or alignment is incompatible.
    pub fn as_slice<T: Pod>(&self) -> Option<&[T]> {
        bytemuck::try_cast_slice(self.bytes()).ok()
    }
}

macro_rules! impl_from_elems {
    ($($variant:ident($ty:ty)),*$(,)?) => {$(
        impl From<Vec<$ty>> for TypedArrayData {
            fn from(value: Vec<$ty>) -> Self {
                Self::$variant(value)
            }
        }

        impl<const N: usize> From<[$ty; N]> for TypedArrayData {
            fn from(value: [$ty; N]) -> Self {
                Self::$variant(value.to_vec())
            }
        }
    )*};
}

impl_from_elems! {
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Float32(f32),
    Float64(f64),
}
