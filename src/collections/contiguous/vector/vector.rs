use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use super::{Drained, raw};
use crate::alloc::{CapacityOverflow, Global, GrowError, RawAlloc};
use crate::panic::{Fatal, IndexOutOfBounds};
use crate::result::Maybe::{self, Absent, Present};
use crate::result::Outcome::{self, Success};
use crate::util::result::ResultExtension;

const MIN_CAP: usize = 2;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, which owns a single heap buffer obtained from a
/// [`RawAlloc`].
///
/// No memory is allocated until the first element is pushed, at which point the Vector receives a
/// capacity of 2. Each time the Vector is full, its capacity doubles. As a result, the capacity is
/// always either 0 or a power of two no smaller than the length.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `size` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `drain` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push_back` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T, A: RawAlloc = Global> {
    pub(crate) ptr: Option<NonNull<T>>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Vector<T> {
    /// Creates a new Vector with size and capacity 0, using the [`Global`] allocator. Memory will
    /// be allocated when the first element is pushed.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.size(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector::new_in(Global)
    }
}

impl<T, A: RawAlloc> Vector<T, A> {
    /// Creates a new, unallocated Vector that will obtain its buffer from `alloc`.
    pub const fn new_in(alloc: A) -> Vector<T, A> {
        Vector {
            ptr: None,
            len: 0,
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the Vector.
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the Vector can hold without reallocating.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// let mut vec = Vector::new();
    /// for i in 1..=5 {
    ///     vec.push_back(i);
    /// }
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the allocator that owns the buffer.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a pointer to the start of the buffer, or null if nothing has been allocated.
    pub const fn data(&self) -> *const T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr().cast_const(),
            None => ptr::null(),
        }
    }

    /// Push the provided value onto the end of the Vector, doubling the capacity if required.
    ///
    /// # Panics
    /// Raises a fatal assertion if the buffer can't be grown. See
    /// [`try_push_back`](Vector::try_push_back) for a recoverable alternative.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// let mut vec = Vector::new();
    /// for i in 0..=5 {
    ///     vec.push_back(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).throw()
    }

    /// Push the provided value onto the end of the Vector, doubling the capacity if required.
    ///
    /// # Errors
    /// If the buffer needs to grow and the allocator refuses, the value is dropped and the Vector
    /// is left exactly as it was, contents included.
    pub fn try_push_back(&mut self, value: T) -> Outcome<(), GrowError> {
        if self.len == self.cap {
            self.try_grow()?;
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
        Success(())
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that `size() < capacity()`. Using this method on a Vector
    /// without enough capacity is undefined behavior.
    pub const unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, so the buffer is allocated and the write is in bounds.
        unsafe { self.buf().add(self.len).write(value) }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// # use owned_std::result::Maybe;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// assert_eq!(vec.pop_back(), Maybe::Present(2));
    /// vec.clear();
    /// assert_eq!(vec.pop_back(), Maybe::Absent);
    /// ```
    pub const fn pop_back(&mut self) -> Maybe<T> {
        if self.len == 0 {
            Absent
        } else {
            self.len -= 1;

            // SAFETY: len has just been decremented, so the value at len is initialized and is no
            // longer considered part of the Vector, making this read a move.
            Present(unsafe { self.buf().add(self.len).read() })
        }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Raises a fatal assertion if `index >= size()`.
    #[track_caller]
    pub fn at(&mut self, index: usize) -> &mut T {
        self.check_index(index);
        // SAFETY: index < len, so the element is initialized and within the buffer.
        unsafe { self.buf().add(index).as_mut() }
    }

    /// Returns a reference to the element at `index`, or [`Absent`] if it is out of bounds.
    pub fn checked_at(&self, index: usize) -> Maybe<&T> {
        if index < self.len {
            // SAFETY: index < len, so the element is initialized and within the buffer.
            Present(unsafe { self.buf().add(index).as_ref() })
        } else {
            Absent
        }
    }

    /// Inserts the provided value at the given index, growing and shifting items as necessary. An
    /// index equal to the size appends the value.
    ///
    /// # Panics
    /// Raises a fatal assertion if `index > size()` or if the buffer can't be grown.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(5, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        if index > self.len {
            IndexOutOfBounds { index, len: self.len }.fatal()
        }

        if self.len == self.cap {
            self.try_grow().throw();
        }

        // SAFETY: There is room for one more element and index <= len, so both the shifted range
        // and the write are within the buffer. ptr::copy handles the overlap.
        unsafe {
            let base = self.buf();
            ptr::copy(base.add(index).as_ptr(), base.add(index + 1).as_ptr(), self.len - index);
            base.add(index).write(value);
        }
        self.len += 1;
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Raises a fatal assertion if `index >= size()`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the read is of an initialized value, which is then overwritten
        // by shifting everything after it down by one.
        unsafe {
            let base = self.buf();
            let value = base.add(index).read();
            ptr::copy(base.add(index + 1).as_ptr(), base.add(index).as_ptr(), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drops every element, keeping the buffer for reuse.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first, so a panicking drop can't lead to a double drop.
        self.len = 0;
        // SAFETY: All values less than the old len are initialized.
        unsafe { raw::drop_elements(self.buf(), len) }
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements, doubling the
    /// capacity as many times as necessary.
    ///
    /// # Errors
    /// Returns a [`GrowError`] if the required capacity overflows or the allocator refuses. The
    /// Vector is left unchanged in either case.
    pub fn try_reserve(&mut self, extra: usize) -> Outcome<(), GrowError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap {
            return Success(());
        }

        let mut new_cap = usize::max(self.cap, MIN_CAP);
        while new_cap < required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
        }

        self.try_realloc(new_cap)
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements.
    ///
    /// # Panics
    /// Raises a fatal assertion if the buffer can't be grown.
    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Transfers ownership of the buffer to the caller, leaving the Vector empty and unallocated.
    ///
    /// # Examples
    /// ```
    /// # use owned_std::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (1..=5).collect();
    /// let drained = vec.drain();
    /// assert_eq!(vec.size(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// assert_eq!(&*drained, &[1, 2, 3, 4, 5]);
    /// ```
    pub fn drain(&mut self) -> Drained<T, A>
    where
        A: Clone,
    {
        log::trace!("draining {} elements from a vector with capacity {}", self.len, self.cap);
        Drained {
            ptr: self.ptr.take(),
            len: mem::take(&mut self.len),
            cap: mem::take(&mut self.cap),
            alloc: self.alloc.clone(),
            _phantom: PhantomData,
        }
    }

    /// Moves the contents of this Vector into a new one, leaving this Vector empty and
    /// unallocated.
    pub fn take(&mut self) -> Vector<T, A>
    where
        A: Clone,
    {
        Vector::from(self.drain())
    }

    /// Decomposes the Vector into its buffer, length, capacity and allocator without dropping
    /// anything. The caller becomes responsible for all of them.
    pub(crate) fn into_parts(self) -> (Option<NonNull<T>>, usize, usize, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: this is never used or dropped again, so alloc is moved out exactly once.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (this.ptr, this.len, this.cap, alloc)
    }

    /// Doubles the capacity, or allocates the minimum capacity for an unallocated Vector. After
    /// calling this, the Vector can take at least one more element.
    pub(crate) fn try_grow(&mut self) -> Outcome<(), GrowError> {
        let new_cap = if self.cap == 0 {
            MIN_CAP
        } else {
            self.cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?
        };

        self.try_realloc(new_cap)
    }

    /// Reallocates the buffer with the provided capacity, which must not be smaller than the
    /// current one.
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Outcome<(), GrowError> {
        debug_assert!(new_cap >= self.cap && new_cap > 0);

        // SAFETY: ptr and cap always describe the current buffer, and new_cap is non-zero.
        let ptr = unsafe { raw::resize(&self.alloc, self.ptr, self.cap, new_cap) }?;
        self.ptr = Some(ptr);
        self.cap = new_cap;
        Success(())
    }

    /// Returns the buffer, or a dangling pointer if nothing is allocated. The dangling pointer is
    /// only ever used for zero-length accesses.
    pub(crate) const fn buf(&self) -> NonNull<T> {
        match self.ptr {
            Some(ptr) => ptr,
            None => NonNull::dangling(),
        }
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Raises a fatal assertion if the provided index is out of bounds.
    #[track_caller]
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            IndexOutOfBounds {
                index,
                len: self.len,
            }.fatal()
        }
    }
}

impl<T, A: RawAlloc> From<Drained<T, A>> for Vector<T, A> {
    fn from(value: Drained<T, A>) -> Self {
        let (ptr, len, cap, alloc) = value.into_parts();
        Vector {
            ptr,
            len,
            cap,
            alloc,
            _phantom: PhantomData,
        }
    }
}

impl<T, A: RawAlloc> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, A: RawAlloc + Default> FromIterator<T> for Vector<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Vector::new_in(A::default());
        vec.extend(iter);
        vec
    }
}

impl<T, A: RawAlloc + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RawAlloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: All values less than len are initialized and safe to drop, and the buffer
            // was allocated by self.alloc with capacity cap. Taking the pointer first means it
            // can't be released twice.
            unsafe {
                raw::drop_elements(ptr, self.len);
                raw::free(&self.alloc, ptr, self.cap);
            }
        }
    }
}

impl<T, A: RawAlloc> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull and properly aligned (dangling only when len is 0). The borrow checker
        // enforces that self isn't mutated due to this function taking a &self.
        unsafe { slice::from_raw_parts(self.buf().as_ptr(), self.len) }
    }
}

impl<T, A: RawAlloc> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull and properly aligned (dangling only when len is 0). The borrow checker
        // enforces that self isn't accessed due to this function taking a &mut self.
        unsafe { slice::from_raw_parts_mut(self.buf().as_ptr(), self.len) }
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T, A: RawAlloc> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T, A: RawAlloc> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: Vectors, when used safely rely on unique pointers and are therefore safe for Send when T:
// Send and the allocator can be sent alongside them.
unsafe impl<T: Send, A: RawAlloc + Send> Send for Vector<T, A> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that Vector<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for Vector<T, A> {}

impl<T: Clone, A: RawAlloc + Clone> Clone for Vector<T, A> {
    /// Deep copies the Vector element by element. The copy grows through the usual policy, so its
    /// capacity may differ from the original's.
    fn clone(&self) -> Self {
        let mut vec = Vector::new_in(self.alloc.clone());

        for value in self.iter() {
            vec.push_back(value.clone());
        }

        vec
    }
}

impl<T: PartialEq, A: RawAlloc, B: RawAlloc> PartialEq<Vector<T, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<T, B>) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: RawAlloc> Eq for Vector<T, A> {}

impl<T: PartialEq, A: RawAlloc> PartialEq<[T]> for Vector<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: Hash, A: RawAlloc> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: RawAlloc> Debug for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field_with("contents", |f| f.debug_list().entries(self.iter()).finish())
            .field("size", &self.len)
            .field("capacity", &self.cap)
            .finish()
    }
}

impl<T: Debug, A: RawAlloc> Display for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
