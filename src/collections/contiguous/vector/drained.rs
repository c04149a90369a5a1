use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use super::raw;
use crate::alloc::{Global, RawAlloc};
use crate::result::Maybe;

/// The buffer of a [`Vector`](super::Vector), after ownership has been transferred out of it by
/// [`Vector::drain`](super::Vector::drain).
///
/// A Drained still frees its buffer (and drops its elements) exactly once when it goes out of
/// scope, unless it is released entirely with [`into_raw_parts`](Drained::into_raw_parts) or
/// turned back into a Vector.
pub struct Drained<T, A: RawAlloc = Global> {
    pub(crate) ptr: Option<NonNull<T>>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, A: RawAlloc> Drained<T, A> {
    /// Returns the number of initialized elements in the buffer.
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the buffer has room for.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Releases the buffer, returning its pointer (or [`Absent`](Maybe::Absent) if nothing was ever
    /// allocated), length and capacity. Nothing is dropped or freed; the caller is responsible for
    /// the buffer from here on, for example by passing it back to
    /// [`from_raw_parts_in`](Drained::from_raw_parts_in).
    pub fn into_raw_parts(self) -> (Maybe<NonNull<T>>, usize, usize) {
        let (ptr, len, cap, _alloc) = self.into_parts();
        (ptr.into(), len, cap)
    }

    /// Adopts a buffer that was previously released with
    /// [`into_raw_parts`](Drained::into_raw_parts).
    ///
    /// # Safety
    /// `ptr`, `len` and `cap` must have been produced by `into_raw_parts` on a Drained that used
    /// `alloc` (or an allocator that can free its blocks), and must not be adopted more than once.
    pub const unsafe fn from_raw_parts_in(
        ptr: Maybe<NonNull<T>>,
        len: usize,
        cap: usize,
        alloc: A,
    ) -> Drained<T, A> {
        Drained {
            ptr: match ptr {
                Maybe::Present(ptr) => Some(ptr),
                Maybe::Absent => None,
            },
            len,
            cap,
            alloc,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn into_parts(self) -> (Option<NonNull<T>>, usize, usize, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: this is never used or dropped again, so alloc is moved out exactly once.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (this.ptr, this.len, this.cap, alloc)
    }

    const fn buf(&self) -> NonNull<T> {
        match self.ptr {
            Some(ptr) => ptr,
            None => NonNull::dangling(),
        }
    }
}

impl<T, A: RawAlloc> Drop for Drained<T, A> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: The first len values are initialized and the buffer was allocated by
            // self.alloc with capacity cap.
            unsafe {
                raw::drop_elements(ptr, self.len);
                raw::free(&self.alloc, ptr, self.cap);
            }
        }
    }
}

impl<T, A: RawAlloc> Deref for Drained<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The buffer holds len initialized values and is properly aligned.
        unsafe { slice::from_raw_parts(self.buf().as_ptr(), self.len) }
    }
}

impl<T, A: RawAlloc> DerefMut for Drained<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The buffer holds len initialized values and is properly aligned.
        unsafe { slice::from_raw_parts_mut(self.buf().as_ptr(), self.len) }
    }
}

// SAFETY: A Drained uniquely owns its buffer, exactly like the Vector it came from.
unsafe impl<T: Send, A: RawAlloc + Send> Send for Drained<T, A> {}
// SAFETY: No interior mutability is exposed through a shared reference.
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for Drained<T, A> {}

impl<T: Debug, A: RawAlloc> Debug for Drained<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drained")
            .field_with("contents", |f| f.debug_list().entries(self.iter()).finish())
            .field("capacity", &self.cap)
            .finish()
    }
}
