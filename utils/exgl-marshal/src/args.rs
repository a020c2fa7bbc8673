use crate::{
    Runtime, Unpack, UnpackError,
    utils::{count_idents, impl_tuples},
};

// === UnpackArgs === //

/// Converts an ordered sequence of dynamic values into a tuple of target types.
///
/// The `i`-th tuple element is produced by [`Unpack`] applied to the `i`-th value. Conversions run
/// in position order and stop at the first failure, so no partially converted tuple is ever
/// observable.
pub trait UnpackArgs<R: ?Sized + Runtime>: Sized {
    const ARITY: usize;

    fn unpack_args(rt: &R, values: &[R::Value]) -> Result<Self, UnpackError>;
}

pub fn unpack_args<R, T>(rt: &R, values: &[R::Value]) -> Result<T, UnpackError>
where
    R: ?Sized + Runtime,
    T: UnpackArgs<R>,
{
    T::unpack_args(rt, values)
}

fn check_arity(expected: usize, found: usize) -> Result<(), UnpackError> {
    if expected != found {
        return Err(UnpackError::ArityMismatch { expected, found });
    }

    Ok(())
}

fn unpack_at<R, T>(rt: &R, values: &[R::Value], position: usize) -> Result<T, UnpackError>
where
    R: ?Sized + Runtime,
    T: Unpack<R>,
{
    T::unpack(rt, &values[position])
        .map_err(|source| UnpackError::TypeMismatch { position, source })
}

macro_rules! impl_unpack_args {
    ($($para:ident:$field:tt),*) => {
        impl<R, $($para,)*> UnpackArgs<R> for ($($para,)*)
        where
            R: ?Sized + Runtime,
            $($para: Unpack<R>,)*
        {
            const ARITY: usize = count_idents!($($para),*);

            #[allow(unused_variables, clippy::unused_unit)]
            fn unpack_args(rt: &R, values: &[R::Value]) -> Result<Self, UnpackError> {
                check_arity(<Self as UnpackArgs<R>>::ARITY, values.len())?;

                Ok(($(unpack_at::<R, $para>(rt, values, $field)?,)*))
            }
        }
    };
}

impl_tuples!(impl_unpack_args);
