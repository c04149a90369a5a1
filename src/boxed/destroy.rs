use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::alloc::{Global, RawAlloc};

/// The cleanup a [`Unique`](super::Unique) runs on the value it still owns when it is dropped.
pub trait Destroy<T> {
    /// Destroys the value at `ptr` and releases its memory.
    ///
    /// # Safety
    /// `ptr` must be valid and owned by the caller, and must not be used again afterwards. Each
    /// pointer may only be destroyed once.
    unsafe fn destroy(&mut self, ptr: NonNull<T>);
}

/// The default policy, for values allocated by [`Unique::new`](super::Unique::new): drops the
/// value in place, then frees its memory through [`Global`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeapDestroy;

impl HeapDestroy {
    /// Frees the memory at `ptr` without dropping the value in it.
    ///
    /// # Safety
    /// `ptr` must have been allocated for a `T` by [`Global`], and must not be used again.
    pub(crate) unsafe fn free<T>(ptr: NonNull<T>) {
        let layout = Layout::new::<T>();
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr was allocated by Global with this layout.
            unsafe { Global.free(ptr.cast(), layout) }
        }
    }
}

impl<T> Destroy<T> for HeapDestroy {
    unsafe fn destroy(&mut self, ptr: NonNull<T>) {
        // SAFETY: The caller guarantees that ptr is valid, owned and destroyed only once.
        unsafe {
            ptr::drop_in_place(ptr.as_ptr());
            HeapDestroy::free(ptr);
        }
    }
}

/// Any closure taking the pointer can be used as a policy, for memory that came from elsewhere.
impl<T, F: FnMut(NonNull<T>)> Destroy<T> for F {
    unsafe fn destroy(&mut self, ptr: NonNull<T>) {
        self(ptr)
    }
}
