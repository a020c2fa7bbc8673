use std::fmt;

use exgl_marshal::{
    BoxedInvocation, NativeMethod, Runtime, UnpackArgs, UnpackError, generate_native_method,
};
use rustc_hash::FxHashMap;
use thiserror::Error;

// === Errors === //

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("{method}: {source}")]
    Unpack {
        method: String,
        source: UnpackError,
    },
    #[error("{method}: {reason}")]
    Rejected { method: String, reason: String },
    #[error(transparent)]
    Batch(#[from] exgl_batch::BatchError),
}

// === MethodTable === //

type Thunk<R> = Box<
    dyn Send
        + Sync
        + Fn(&R, &str, &[<R as Runtime>::Value]) -> Result<BoxedInvocation, DispatchError>,
>;

struct MethodEntry<R: Runtime> {
    arity: usize,
    thunk: Thunk<R>,
}

/// A registry of native methods callable by name with dynamic arguments.
pub struct MethodTable<R: Runtime> {
    methods: FxHashMap<String, MethodEntry<R>>,
}

impl<R: Runtime> fmt::Debug for MethodTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<R: Runtime> Default for MethodTable<R> {
    fn default() -> Self {
        Self {
            methods: FxHashMap::default(),
        }
    }
}

impl<R: 'static + Runtime> MethodTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `method` under `name`, replacing any previous registration. The arity and the
    /// conversion of every argument are taken from `method`'s signature.
    pub fn register<F, Args>(&mut self, name: impl Into<String>, method: F) -> &mut Self
    where
        F: 'static + Send + Sync + Clone + NativeMethod<Args, Output = ()>,
        Args: 'static + Send + UnpackArgs<R>,
    {
        self.register_checked(name, method, |_| Ok(()))
    }

    /// Like [`register`](Self::register), but `check` inspects the converted arguments before
    /// anything is queued. An `Err` rejects the call with the returned reason.
    pub fn register_checked<F, Args, C>(
        &mut self,
        name: impl Into<String>,
        method: F,
        check: C,
    ) -> &mut Self
    where
        F: 'static + Send + Sync + Clone + NativeMethod<Args, Output = ()>,
        Args: 'static + Send + UnpackArgs<R>,
        C: 'static + Send + Sync + Fn(&Args) -> Result<(), String>,
    {
        let thunk: Thunk<R> = Box::new(move |rt: &R, name: &str, values: &[R::Value]| {
            let call = generate_native_method(rt, method.clone(), values).map_err(|source| {
                DispatchError::Unpack {
                    method: name.to_string(),
                    source,
                }
            })?;

            check(call.args()).map_err(|reason| DispatchError::Rejected {
                method: name.to_string(),
                reason,
            })?;

            Ok(call.boxed())
        });

        self.methods.insert(
            name.into(),
            MethodEntry {
                arity: Args::ARITY,
                thunk,
            },
        );

        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.methods.get(name).map(|entry| entry.arity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Looks up `name`, checks the argument count against its arity, and converts `values` into
    /// a bound invocation. Nothing runs until the invocation is invoked.
    pub fn generate(
        &self,
        rt: &R,
        name: &str,
        values: &[R::Value],
    ) -> Result<BoxedInvocation, DispatchError> {
        let entry = self
            .methods
            .get(name)
            .ok_or_else(|| DispatchError::UnknownMethod(name.to_string()))?;

        if values.len() != entry.arity {
            return Err(DispatchError::Unpack {
                method: name.to_string(),
                source: UnpackError::ArityMismatch {
                    expected: entry.arity,
                    found: values.len(),
                },
            });
        }

        (entry.thunk)(rt, name, values)
    }
}
