//! Task scheduling primitives.

mod registry;

pub use registry::{TaskGuard, TaskRegistry};
