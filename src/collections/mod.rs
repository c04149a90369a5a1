//! Collection types that own their storage directly.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing some of the more repetitive functionality.

#[cfg(feature = "contiguous")]
#[doc(cfg(feature = "contiguous"))]
pub mod contiguous;
#[cfg(feature = "stack")]
#[doc(cfg(feature = "stack"))]
pub mod stack;
