//! An explicit snapshot of the process environment.
//!
//! Rather than reading variables from a hidden global table, an [`Environment`] is captured once
//! and passed to whatever needs it. Changes made through [`Environment::set`] only affect that
//! snapshot, never the real process environment, so tests can build their own with
//! [`Environment::from_pairs`].

mod environment;
mod error;
mod tests;

pub use environment::*;
pub use error::*;
