//! The raw allocation primitives that every owning type in this crate is built on.
//!
//! [`RawAlloc`] is deliberately close to C's `malloc` / `realloc` / `free` triple: allocation
//! failure is reported as `None` (a null pointer) rather than by aborting, which leaves the caller
//! free to decide whether a refused allocation is fatal or a recoverable [`AllocError`].

mod error;
mod host;
mod tests;

pub use error::*;
pub use host::*;

use std::alloc::Layout;
use std::ptr::NonNull;

/// The minimum offset between two objects that avoids false sharing, which is the cache line size
/// on every supported target. Apple's aarch64 cores use 128 byte lines.
pub const DESTRUCTIVE_INTERFERENCE_SIZE: usize =
    if cfg!(all(target_arch = "aarch64", target_vendor = "apple")) { 128 } else { 64 };

/// An allocate / reallocate / free triple, provided by the host environment.
///
/// # Safety
/// Implementors must return pointers to blocks that are valid for reads and writes of at least
/// `layout.size()` bytes, aligned to `layout.align()`, and that remain valid until passed to
/// [`free`](RawAlloc::free) or [`reallocate`](RawAlloc::reallocate) on the same allocator (or a
/// clone of it). A failed reallocation must leave the original block untouched.
pub unsafe trait RawAlloc {
    /// Allocates a block for `layout`. Returns `None` if the request is refused.
    ///
    /// `layout` must have a non-zero size, callers handle zero-sized requests themselves.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` from `old` to `new_size` bytes, keeping the alignment of `old`.
    /// The contents up to the smaller of the two sizes are preserved.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with layout `old`, and `new_size` must be
    /// non-zero and not overflow [`isize::MAX`] when rounded up to `old.align()`. If `None` is
    /// returned, `ptr` is still owned by the caller.
    unsafe fn reallocate(&self, ptr: NonNull<u8>, old: Layout, new_size: usize)
        -> Option<NonNull<u8>>;

    /// Releases the block at `ptr`.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `layout`, and must not be used again.
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

// SAFETY: Forwards to the underlying allocator.
unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old: Layout, new_size: usize)
        -> Option<NonNull<u8>>
    {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { (**self).reallocate(ptr, old, new_size) }
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { (**self).free(ptr, layout) }
    }
}
