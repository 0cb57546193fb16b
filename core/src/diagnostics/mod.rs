pub mod builder;
pub mod func_cache;
pub mod function_dump;
pub mod names;
pub mod stack_trace;

pub use builder::StackBuilder;
pub use func_cache::FunctionIndexCache;
pub use stack_trace::{Frame, Stacktrace};
