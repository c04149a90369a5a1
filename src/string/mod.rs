//! A null-terminated byte string that owns its buffer by hand.
//!
//! [`HeapString`] is the string counterpart of [`Vector`](crate::collections::contiguous::Vector):
//! no buffer until the first write, growth through a [`RawAlloc`](crate::alloc::RawAlloc) and a
//! single free when it is dropped. Unlike [`String`], the contents are always followed by a NUL
//! terminator so that they can be handed to C as-is, and the capacity is always a multiple of the
//! alignment unit.

mod heap_string;
mod tests;

pub use heap_string::*;
