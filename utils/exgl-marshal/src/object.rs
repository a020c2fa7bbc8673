use derive_where::derive_where;

use crate::{Runtime, TargetType, TypeMismatch, Unpack, sealed::Sealed};

// === Handles === //

/// A handle to any object-like value, including arrays, typed arrays, and array buffers.
#[derive_where(Debug, Clone; R::Object)]
pub struct Object<R: ?Sized + Runtime>(pub R::Object);

/// A handle to an object which narrows to an array.
#[derive_where(Debug, Clone; R::Array)]
pub struct Array<R: ?Sized + Runtime>(pub R::Array);

/// A handle to an object which narrows to a typed numeric array view.
#[derive_where(Debug, Clone; R::TypedArray)]
pub struct TypedArray<R: ?Sized + Runtime>(pub R::TypedArray);

/// A handle to an object which narrows to a raw byte buffer.
#[derive_where(Debug, Clone; R::ArrayBuffer)]
pub struct ArrayBuffer<R: ?Sized + Runtime>(pub R::ArrayBuffer);

macro_rules! impl_handle_accessors {
    ($($name:ident => $raw:ident),*$(,)?) => {$(
        impl<R: ?Sized + Runtime> $name<R> {
            pub fn get(&self) -> &R::$raw {
                &self.0
            }

            pub fn into_inner(self) -> R::$raw {
                self.0
            }
        }
    )*};
}

impl_handle_accessors! {
    Object => Object,
    Array => Array,
    TypedArray => TypedArray,
    ArrayBuffer => ArrayBuffer,
}

// === Unpack === //

fn unpack_object<R: ?Sized + Runtime>(
    rt: &R,
    value: &R::Value,
    expected: TargetType,
) -> Result<R::Object, TypeMismatch> {
    rt.as_object(value)
        .ok_or_else(|| TypeMismatch::new(expected, rt, value))
}

impl<R: ?Sized + Runtime> Sealed for Object<R> {}

impl<R: ?Sized + Runtime> Unpack<R> for Object<R> {
    const TARGET: TargetType = TargetType::Object;

    fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch> {
        unpack_object(rt, value, Self::TARGET).map(Self)
    }
}

macro_rules! impl_narrowed_unpack {
    ($($name:ident => $narrow:ident),*$(,)?) => {$(
        impl<R: ?Sized + Runtime> Sealed for $name<R> {}

        impl<R: ?Sized + Runtime> Unpack<R> for $name<R> {
            const TARGET: TargetType = TargetType::$name;

            fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch> {
                let object = unpack_object(rt, value, Self::TARGET)?;

                rt.$narrow(&object)
                    .map(Self)
                    .ok_or_else(|| TypeMismatch::new(Self::TARGET, rt, value))
            }
        }
    )*};
}

impl_narrowed_unpack! {
    Array => object_as_array,
    TypedArray => object_as_typed_array,
    ArrayBuffer => object_as_array_buffer,
}
