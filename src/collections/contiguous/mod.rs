//! Contiguous collection types. Namely [`Vector`], a growable array built directly on a
//! [`RawAlloc`](crate::alloc::RawAlloc).
#![warn(missing_docs)]

pub mod vector;

#[doc(inline)]
pub use vector::Vector;
