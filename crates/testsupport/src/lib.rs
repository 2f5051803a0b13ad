//! Test support utilities shared by integration tests: isolated temporary
//! databases, common schemas, and a small script runner that renders a
//! sequence of statements the way the REPL would print them.

pub mod context;
pub mod fixtures;
pub mod runner;

/// Convenient re-exports for integration tests.
pub mod prelude {
    pub use crate::context::*;
    pub use crate::fixtures::*;
    pub use crate::runner::*;
}
