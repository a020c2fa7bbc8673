//! Maps command names coming from script to native methods and routes the bound invocations into
//! a batch queue.

mod dispatcher;
pub use self::dispatcher::*;

mod table;
pub use self::table::*;

pub mod gl;
pub mod replay;
