//! Scoped cleanup actions and background tasks on plain OS threads.
//!
//! [`Defer`] runs an action when it goes out of scope, on every exit path. [`Later`] runs a
//! function on its own thread and can be polled or joined, and [`execute_after`] builds on it to
//! run a function after a delay.

mod defer;
mod later;

pub use defer::*;
pub use later::*;
