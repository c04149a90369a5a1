//! Fixed-capacity stacks that live entirely inline, without any heap allocation.

mod static_stack;

pub use static_stack::*;
