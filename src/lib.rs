//! A replacement for (some key parts of) a standard library, built around containers that own their
//! memory by hand.
//!
//! # Purpose
//! The interesting part of this crate is the small set of types that have to get raw allocation,
//! resizing, aliasing and ownership transfer exactly right:
//! - [`Vector`](collections::contiguous::Vector), a growable array that doubles its capacity.
//! - [`HeapString`](string::HeapString), a null-terminated byte buffer whose capacity is always a
//!   multiple of the cache line size.
//! - [`Unique`](boxed::Unique), a single-owner pointer with a pluggable destroy policy.
//! - [`Guarded`](sync::Guarded), a heap value that can only be mutated while its
//!   [`Mutex`](sync::Mutex) is held.
//!
//! Everything else is glue around those: [`Outcome`](result::Outcome) and
//! [`Maybe`](result::Maybe) as the foundation for fallible operations, a
//! [`StaticStack`](collections::stack::StaticStack), scoped [`Defer`](task::Defer) actions, a thin
//! [`Later`](task::Later) task wrapper and an explicit [`Environment`](env::Environment) snapshot.
//!
//! # Error Handling
//! There are two distinct classes of failure here.
//!
//! Programmer errors (indexing out of bounds, dereferencing a released pointer, unlocking an
//! unlocked mutex, overflowing a fixed-size stack) are fatal. They are reported through the
//! [`panic`] module, which records the source location, the thread and a backtrace before the thread
//! unwinds (or the process aborts, with the `abort-on-fatal` feature). These are never meant to be
//! recovered from.
//!
//! Everything that can legitimately go wrong at runtime, like an allocation being refused or an
//! environment variable not existing, is returned as a strongly typed error inside an
//! [`Outcome`](result::Outcome). The error types are small structs (often ZSTs) that implement
//! [`Error`](std::error::Error), combined into enums for static dispatch where a call can fail in
//! more than one way.
//!
//! # Allocation
//! None of the containers here use [`Vec`], [`Box`] or [`String`] for their storage. They all go
//! through the [`RawAlloc`](alloc::RawAlloc) trait, an allocate / reallocate / free triple that
//! returns null on failure rather than aborting. The default host is Rust's global allocator; the
//! `libc-alloc` feature adds a host backed by `malloc`.
//!
//! # Features
//! - `contiguous`, `stack` (together `collections-all`): the collection types.
//! - `string`, `boxed`, `sync`, `task`, `env`: the remaining modules.
//! - `libc-alloc`: the [`Libc`](alloc::Libc) allocation host.
//! - `abort-on-fatal`: fatal assertions abort the process instead of unwinding.
#![feature(try_trait_v2)]
#![feature(try_trait_v2_residual)]
#![feature(debug_closure_helpers)]
#![feature(doc_cfg)]

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
pub mod panic;
pub mod result;

#[cfg(feature = "boxed")]
#[doc(cfg(feature = "boxed"))]
pub mod boxed;
#[cfg(feature = "collections")]
#[doc(cfg(feature = "collections"))]
pub mod collections;
#[cfg(feature = "env")]
#[doc(cfg(feature = "env"))]
pub mod env;
#[cfg(feature = "string")]
#[doc(cfg(feature = "string"))]
pub mod string;
#[cfg(feature = "sync")]
#[doc(cfg(feature = "sync"))]
pub mod sync;
#[cfg(feature = "task")]
#[doc(cfg(feature = "task"))]
pub mod task;

pub(crate) mod util;
