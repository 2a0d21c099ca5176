mod expander;
pub mod resolver;

pub use expander::PathExpander;
pub use resolver::{resolve, ResolveError};
