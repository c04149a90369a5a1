use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use super::{Vector, raw};
use crate::alloc::{Global, RawAlloc};

/// A type for owned iteration over a [`Vector`]. Produces values of type `T`.
///
/// Any values that haven't been yielded are dropped along with the buffer when the iterator is
/// dropped.
pub struct IntoIter<T, A: RawAlloc = Global> {
    pub(crate) ptr: Option<NonNull<T>>,
    pub(crate) cap: usize,
    pub(crate) front: usize,
    pub(crate) back: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, A: RawAlloc> IntoIter<T, A> {
    const fn buf(&self) -> NonNull<T> {
        match self.ptr {
            Some(ptr) => ptr,
            None => NonNull::dangling(),
        }
    }
}

impl<T, A: RawAlloc> IntoIterator for Vector<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, len, cap, alloc) = self.into_parts();
        IntoIter {
            ptr,
            cap,
            front: 0,
            back: len,
            alloc,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: RawAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front < back <= len, so the value is initialized and hasn't been yielded yet.
        // Incrementing front afterwards means it is never read again.
        let value = unsafe { self.buf().add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T, A: RawAlloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // SAFETY: back has just been decremented and is still >= front, so the value is
        // initialized and hasn't been yielded yet.
        Some(unsafe { self.buf().add(self.back).read() })
    }
}

impl<T, A: RawAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: Values in front..back are initialized and haven't been yielded, and the
            // buffer was allocated by self.alloc with capacity cap.
            unsafe {
                raw::drop_elements(ptr.add(self.front), self.back - self.front);
                raw::free(&self.alloc, ptr, self.cap);
            }
        }
    }
}
