use std::alloc::{self, Layout};
use std::ptr::NonNull;

use super::RawAlloc;

/// The Rust global allocator, used by default for every owning type in this crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

// SAFETY: std::alloc upholds all of the requirements of RawAlloc, including leaving the original
// block intact when realloc fails.
unsafe impl RawAlloc for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0);
        // SAFETY: Zero-sized layouts are the caller's responsibility and aren't allocated.
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old: Layout, new_size: usize)
        -> Option<NonNull<u8>>
    {
        // SAFETY: ptr was allocated with old by the global allocator and new_size is non-zero and
        // within bounds, as required by the caller.
        NonNull::new(unsafe { alloc::realloc(ptr.as_ptr(), old, new_size) })
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: ptr was allocated with layout by the global allocator.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// An allocator that goes straight to the C library's `malloc`, `realloc` and `free`.
///
/// `malloc` only guarantees alignment suitable for any fundamental type, so over-aligned layouts
/// are served by `posix_memalign` and resized by copying.
#[cfg(feature = "libc-alloc")]
#[doc(cfg(feature = "libc-alloc"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Libc;

#[cfg(feature = "libc-alloc")]
impl Libc {
    const MALLOC_ALIGN: usize = 2 * size_of::<usize>();

    const fn is_over_aligned(layout: Layout) -> bool {
        layout.align() > Self::MALLOC_ALIGN
    }
}

#[cfg(feature = "libc-alloc")]
// SAFETY: malloc and posix_memalign return blocks of at least the requested size and alignment,
// and realloc leaves the original block intact on failure.
unsafe impl RawAlloc for Libc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if Libc::is_over_aligned(layout) {
            let mut raw: *mut libc::c_void = std::ptr::null_mut();
            // SAFETY: layout.align() is a power of two and a multiple of size_of::<*mut c_void>().
            let status = unsafe { libc::posix_memalign(&mut raw, layout.align(), layout.size()) };
            if status != 0 {
                return None;
            }
            NonNull::new(raw.cast())
        } else {
            // SAFETY: malloc has no preconditions.
            NonNull::new(unsafe { libc::malloc(layout.size()) }.cast())
        }
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old: Layout, new_size: usize)
        -> Option<NonNull<u8>>
    {
        if Libc::is_over_aligned(old) {
            // SAFETY: The caller guarantees that new_size rounded to old.align() is in bounds.
            let new_layout = unsafe { Layout::from_size_align_unchecked(new_size, old.align()) };
            let new_ptr = self.allocate(new_layout)?;
            // SAFETY: Both blocks are valid for the smaller size and are distinct allocations.
            unsafe {
                std::ptr::copy_nonoverlapping(
                    ptr.as_ptr().cast_const(),
                    new_ptr.as_ptr(),
                    old.size().min(new_size),
                );
                self.free(ptr, old);
            }
            Some(new_ptr)
        } else {
            // SAFETY: ptr came from malloc, as required by the caller.
            NonNull::new(unsafe { libc::realloc(ptr.as_ptr().cast(), new_size) }.cast())
        }
    }

    unsafe fn free(&self, ptr: NonNull<u8>, _layout: Layout) {
        // SAFETY: ptr came from malloc or posix_memalign, both of which are released by free.
        unsafe { libc::free(ptr.as_ptr().cast()) }
    }
}
