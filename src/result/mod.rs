//! Tagged success / failure and value / absence types, used by every fallible operation in this
//! crate.
//!
//! [`Outcome`] and [`Maybe`] are plain enums, so exactly one variant is ever live and the drop glue
//! for both arms is generated by the compiler. Both work with the `?` operator, and convert to and
//! from [`Result`] and [`Option`] for interoperability with everything else.
//!
//! Reading the wrong variant never hands back garbage: the extractors return a [`Maybe`], and the
//! `unwrap` family raise a fatal assertion instead.

mod maybe;
mod outcome;
mod tests;

pub use maybe::*;
pub use outcome::*;
