use std::fmt;

use thiserror::Error;

// === Runtime Trait === //

/// The runtime tag of a dynamic value.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ValueKind {
    Boolean,
    Null,
    Undefined,
    Number,
    Object,
    Array,
    TypedArray,
    ArrayBuffer,
    Other,
}

impl ValueKind {
    /// Returns `true` for plain objects and for the tags which specialize them.
    pub const fn is_object_like(self) -> bool {
        matches!(
            self,
            Self::Object | Self::Array | Self::TypedArray | Self::ArrayBuffer
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
            Self::TypedArray => "typed array",
            Self::ArrayBuffer => "array buffer",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of the scripting runtime which owns the dynamic values being converted.
///
/// Every accessor returns `None` when the value does not carry the requested tag. Handles returned
/// by the object accessors are owned by the caller and may outlive the borrowed value.
pub trait Runtime {
    type Value;

    type Object;

    type Array;

    type TypedArray;

    type ArrayBuffer;

    fn kind(&self, value: &Self::Value) -> ValueKind;

    fn as_bool(&self, value: &Self::Value) -> Option<bool>;

    fn as_number(&self, value: &Self::Value) -> Option<f64>;

    fn as_object(&self, value: &Self::Value) -> Option<Self::Object>;

    fn object_as_array(&self, object: &Self::Object) -> Option<Self::Array>;

    fn object_as_typed_array(&self, object: &Self::Object) -> Option<Self::TypedArray>;

    fn object_as_array_buffer(&self, object: &Self::Object) -> Option<Self::ArrayBuffer>;
}

// === Unpack Trait === //

/// The closed set of types a dynamic value can be converted into.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum TargetType {
    Bool,
    Int { signed: bool, bits: u32 },
    Float { bits: u32 },
    Object,
    Array,
    TypedArray,
    ArrayBuffer,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("a boolean"),
            Self::Int { signed: true, bits } => write!(f, "an i{bits}"),
            Self::Int { signed: false, bits } => write!(f, "a u{bits}"),
            Self::Float { bits } => write!(f, "an f{bits}"),
            Self::Object => f.write_str("an object"),
            Self::Array => f.write_str("an array"),
            Self::TypedArray => f.write_str("a typed array"),
            Self::ArrayBuffer => f.write_str("an array buffer"),
        }
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Converts one dynamic value of runtime `R` into `Self`.
///
/// This trait is sealed: the set of implementors is exactly the variants of [`TargetType`].
pub trait Unpack<R: ?Sized + Runtime>: Sized + sealed::Sealed {
    const TARGET: TargetType;

    fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch>;
}

pub fn unpack<R, T>(rt: &R, value: &R::Value) -> Result<T, TypeMismatch>
where
    R: ?Sized + Runtime,
    T: Unpack<R>,
{
    T::unpack(rt, value)
}

// === Errors === //

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("value is not {expected} (found {found})")]
pub struct TypeMismatch {
    pub expected: TargetType,
    pub found: ValueKind,
}

impl TypeMismatch {
    pub fn new<R: ?Sized + Runtime>(expected: TargetType, rt: &R, value: &R::Value) -> Self {
        Self {
            expected,
            found: rt.kind(value),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum UnpackError {
    #[error("argument {position}: {source}")]
    TypeMismatch {
        position: usize,
        source: TypeMismatch,
    },
    #[error("expected {expected} arguments but got {found}")]
    ArityMismatch { expected: usize, found: usize },
}
