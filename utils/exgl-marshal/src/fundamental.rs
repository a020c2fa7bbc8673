use crate::{Runtime, TargetType, TypeMismatch, Unpack, ValueKind, sealed::Sealed};

// === bool === //

impl Sealed for bool {}

impl<R: ?Sized + Runtime> Unpack<R> for bool {
    const TARGET: TargetType = TargetType::Bool;

    fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch> {
        if let Some(value) = rt.as_bool(value) {
            return Ok(value);
        }

        if let Some(number) = rt.as_number(value) {
            return Ok(number != 0.0);
        }

        match rt.kind(value) {
            ValueKind::Null | ValueKind::Undefined => Ok(false),
            found => Err(TypeMismatch {
                expected: <Self as Unpack<R>>::TARGET,
                found,
            }),
        }
    }
}

// === Numbers === //

fn unpack_number<R: ?Sized + Runtime>(
    rt: &R,
    value: &R::Value,
    expected: TargetType,
) -> Result<f64, TypeMismatch> {
    rt.as_number(value)
        .ok_or_else(|| TypeMismatch::new(expected, rt, value))
}

// Narrowing goes through `as`: truncation toward zero, saturation at the bounds of the target
// width, and `NaN` becoming zero. There is no range check.
macro_rules! impl_int_unpack {
    ( $($ty:ty),*$(,)? ) => {$(
        impl Sealed for $ty {}

        impl<R: ?Sized + Runtime> Unpack<R> for $ty {
            const TARGET: TargetType = TargetType::Int {
                signed: <$ty>::MIN != 0,
                bits: <$ty>::BITS,
            };

            fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch> {
                unpack_number(rt, value, <Self as Unpack<R>>::TARGET).map(|number| number as $ty)
            }
        }
    )*};
}

impl_int_unpack! {
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
}

macro_rules! impl_float_unpack {
    ( $($ty:ty),*$(,)? ) => {$(
        impl Sealed for $ty {}

        impl<R: ?Sized + Runtime> Unpack<R> for $ty {
            const TARGET: TargetType = TargetType::Float {
                bits: size_of::<$ty>() as u32 * 8,
            };

            fn unpack(rt: &R, value: &R::Value) -> Result<Self, TypeMismatch> {
                unpack_number(rt, value, <Self as Unpack<R>>::TARGET).map(|number| number as $ty)
            }
        }
    )*};
}

impl_float_unpack! {
    f32,
    f64,
}
