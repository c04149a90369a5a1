use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::alloc::{AllocError, CapacityOverflow, GrowError, RawAlloc};
use crate::result::Outcome::{self, Failure, Success};

/// Creates the [`Layout`] for a buffer of `cap` elements of `T`.
pub(crate) fn layout_for<T>(cap: usize) -> Outcome<Layout, CapacityOverflow> {
    Layout::array::<T>(cap).map_err(|_| CapacityOverflow).into()
}

/// Resizes the buffer at `ptr`, which holds `old_cap` elements (or is unallocated if `None`), so
/// that it can hold `new_cap` elements. Zero-sized types never allocate and always receive a
/// dangling pointer.
///
/// If the allocator refuses the request, the existing buffer is left exactly as it was.
///
/// # Safety
/// `ptr` must have been returned by a previous call with `old_cap` on the same allocator, and
/// `new_cap` must be non-zero.
pub(crate) unsafe fn resize<T, A: RawAlloc>(
    alloc: &A,
    ptr: Option<NonNull<T>>,
    old_cap: usize,
    new_cap: usize,
) -> Outcome<NonNull<T>, GrowError> {
    let new_layout = layout_for::<T>(new_cap)?;

    let new_ptr = match ptr {
        _ if new_layout.size() == 0 => return Success(NonNull::dangling()),
        None => alloc.allocate(new_layout),
        Some(old) => {
            // SAFETY: old was allocated with exactly this layout, which was valid at the time.
            let old_layout = unsafe {
                Layout::from_size_align_unchecked(size_of::<T>() * old_cap, align_of::<T>())
            };
            // SAFETY: old was allocated by alloc with old_layout and the new size is non-zero and
            // has been checked against isize::MAX by Layout::array.
            unsafe { alloc.reallocate(old.cast(), old_layout, new_layout.size()) }
        },
    };

    match new_ptr {
        Some(new_ptr) => {
            log::trace!("resized buffer from {old_cap} to {new_cap} elements");
            Success(new_ptr.cast())
        },
        None => {
            log::warn!("allocation of {} bytes refused, buffer left unchanged", new_layout.size());
            Failure(AllocError { size: new_layout.size() }.into())
        },
    }
}

/// Drops the `len` initialized elements at the start of `ptr`.
///
/// # Safety
/// The first `len` elements at `ptr` must be initialized and are invalid after this call.
pub(crate) unsafe fn drop_elements<T>(ptr: NonNull<T>, len: usize) {
    // SAFETY: The caller guarantees that the range is initialized and ready to drop.
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len)) }
}

/// Releases a buffer of `cap` elements, without dropping any of them.
///
/// # Safety
/// `ptr` must have been returned by [`resize`] with `cap` on the same allocator and must not be
/// used again.
pub(crate) unsafe fn free<T, A: RawAlloc>(alloc: &A, ptr: NonNull<T>, cap: usize) {
    // SAFETY: The buffer was allocated with exactly this layout, which was valid at the time.
    let layout = unsafe {
        Layout::from_size_align_unchecked(size_of::<T>() * cap, align_of::<T>())
    };

    if layout.size() != 0 {
        // SAFETY: Zero-sized layouts are never allocated and are guarded against.
        unsafe { alloc.free(ptr.cast(), layout) }
    }
}
