use std::fmt;

use crate::{
    Runtime, UnpackArgs, UnpackError,
    utils::{count_idents, impl_tuples},
};

// === NativeMethod === //

/// A native function whose parameter list is the tuple `Args`.
///
/// Implemented for every `FnOnce` of up to twelve parameters, so plain function items, function
/// pointers, and closures can all be bound.
pub trait NativeMethod<Args>: Sized {
    type Output;

    const ARITY: usize;

    fn call(self, args: Args) -> Self::Output;
}

macro_rules! impl_native_method {
    ($($para:ident:$field:tt),*) => {
        impl<Func, Out, $($para,)*> NativeMethod<($($para,)*)> for Func
        where
            Func: FnOnce($($para),*) -> Out,
        {
            type Output = Out;

            const ARITY: usize = count_idents!($($para),*);

            #[allow(unused_variables, clippy::unused_unit)]
            fn call(self, args: ($($para,)*)) -> Out {
                self($(args.$field),*)
            }
        }
    };
}

impl_tuples!(impl_native_method);

// === DeferredInvocation === //

/// A native method bound to its fully converted arguments.
///
/// Invoking consumes the value so the method runs at most once. Dropping it without invoking
/// releases the arguments and has no other effect.
#[must_use = "a deferred invocation does nothing unless invoked"]
pub struct DeferredInvocation<F, Args> {
    method: F,
    args: Args,
}

impl<F, Args> fmt::Debug for DeferredInvocation<F, Args>
where
    Args: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredInvocation")
            .field("method", &std::any::type_name::<F>())
            .field("args", &self.args)
            .finish()
    }
}

impl<F, Args> DeferredInvocation<F, Args>
where
    F: NativeMethod<Args>,
{
    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn invoke(self) -> F::Output {
        self.method.call(self.args)
    }

    /// Erases the method and argument types so invocations of different methods can share a
    /// queue.
    pub fn boxed(self) -> BoxedInvocation<F::Output>
    where
        F: 'static + Send,
        Args: 'static + Send,
    {
        BoxedInvocation::new(move || self.invoke())
    }
}

/// A type-erased, thread-transferable [`DeferredInvocation`].
#[must_use = "a deferred invocation does nothing unless invoked"]
pub struct BoxedInvocation<O = ()> {
    inner: Box<dyn Send + FnOnce() -> O>,
}

impl<O> fmt::Debug for BoxedInvocation<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedInvocation").finish_non_exhaustive()
    }
}

impl<O> BoxedInvocation<O> {
    pub fn new(f: impl 'static + Send + FnOnce() -> O) -> Self {
        Self { inner: Box::new(f) }
    }

    pub fn invoke(self) -> O {
        (self.inner)()
    }
}

impl<F, Args> From<DeferredInvocation<F, Args>> for BoxedInvocation<F::Output>
where
    F: 'static + Send + NativeMethod<Args>,
    Args: 'static + Send,
{
    fn from(value: DeferredInvocation<F, Args>) -> Self {
        value.boxed()
    }
}

// === Binding === //

/// Binds `method` to already converted arguments without calling it.
pub fn bind<F, Args>(method: F, args: Args) -> DeferredInvocation<F, Args>
where
    F: NativeMethod<Args>,
{
    DeferredInvocation { method, args }
}

/// Converts `values` according to the parameter list of `method` and binds the result.
///
/// The parameter types are inferred from `method`'s own signature:
///
/// ```ignore
/// fn scissor(x: i32, y: i32, width: i32, height: i32) { /* ... */ }
///
/// let call = generate_native_method(&rt, scissor, &values)?;
/// queue.add_to_next_batch(call);
/// ```
pub fn generate_native_method<R, F, Args>(
    rt: &R,
    method: F,
    values: &[R::Value],
) -> Result<DeferredInvocation<F, Args>, UnpackError>
where
    R: ?Sized + Runtime,
    F: NativeMethod<Args>,
    Args: UnpackArgs<R>,
{
    let args = Args::unpack_args(rt, values)?;

    tracing::trace!(
        method = std::any::type_name::<F>(),
        arity = Args::ARITY,
        "bound native method",
    );

    Ok(bind(method, args))
}
