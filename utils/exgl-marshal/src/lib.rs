//! Type-directed conversion of dynamic script values into the statically typed argument list of
//! a native function, and binding of those arguments into a deferred invocation.
//!
//! The three layers compose bottom-up:
//!
//! - [`Unpack`] converts a single dynamic value into one target type.
//! - [`UnpackArgs`] converts a slice of dynamic values into a tuple of target types.
//! - [`bind`] and [`generate_native_method`] close a native function over a converted tuple,
//!   producing a [`DeferredInvocation`] which can be run immediately or handed to another thread.
//!
//! None of these layers own the dynamic values. The embedding runtime is abstracted by the
//! [`Runtime`] trait.

mod args;
pub use self::args::*;

mod base;
pub use self::base::*;

mod bind;
pub use self::bind::*;

mod fundamental;
mod object;
pub use self::object::*;

mod utils;
