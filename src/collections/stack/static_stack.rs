use std::fmt::{self, Debug, Formatter};
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::panic::{EmptyPanic, Fatal, LimitExceededPanic};
use crate::result::Maybe::{self, Absent, Present};
use crate::result::Outcome::{self, Failure, Success};

/// A last-in first-out stack with room for exactly `N` elements, stored inline.
///
/// Pushing onto a full stack, or popping from an empty one, is a fatal assertion. The checked
/// alternatives [`try_push`](StaticStack::try_push) and [`try_pop`](StaticStack::try_pop) hand
/// the problem back to the caller instead.
///
/// # Examples
/// ```
/// # use owned_std::collections::stack::StaticStack;
/// let mut stack: StaticStack<u8, 3> = StaticStack::new();
/// stack.push(1);
/// *stack.push(2) += 10;
/// assert_eq!(&*stack, &[1, 12]);
/// assert_eq!(stack.pop(), 12);
/// assert_eq!(*stack.peek(), 1);
/// ```
pub struct StaticStack<T, const N: usize> {
    buf: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> StaticStack<T, N> {
    pub const fn new() -> StaticStack<T, N> {
        StaticStack {
            buf: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Creates a stack holding every value in `values`, with the last value on top.
    ///
    /// # Panics
    /// Raises a fatal assertion if `M` is greater than `N`.
    #[track_caller]
    pub fn from_array<const M: usize>(values: [T; M]) -> StaticStack<T, N> {
        if M > N {
            LimitExceededPanic { capacity: N }.fatal()
        }

        let mut stack = StaticStack::new();
        for value in values {
            // SAFETY: M <= N, so there is always room.
            unsafe { stack.push_unchecked(value) };
        }
        stack
    }

    /// Returns the number of elements currently on the stack.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns `N`, the number of elements the stack can ever hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pushes `value` onto the top of the stack, returning a reference to it in place.
    ///
    /// # Panics
    /// Raises a fatal assertion if the stack is full.
    #[track_caller]
    pub fn push(&mut self, value: T) -> &mut T {
        if self.is_full() {
            LimitExceededPanic { capacity: N }.fatal()
        }
        // SAFETY: The stack has just been checked to have room.
        unsafe { self.push_unchecked(value) }
    }

    /// Constructs a value with `f` directly on top of the stack. The capacity is checked before `f`
    /// is called.
    ///
    /// # Panics
    /// Raises a fatal assertion if the stack is full.
    #[track_caller]
    pub fn emplace<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if self.is_full() {
            LimitExceededPanic { capacity: N }.fatal()
        }
        // SAFETY: The stack has just been checked to have room.
        unsafe { self.push_unchecked(f()) }
    }

    /// Pushes `value` onto the top of the stack, or hands it back if the stack is full.
    pub fn try_push(&mut self, value: T) -> Outcome<&mut T, T> {
        if self.is_full() {
            Failure(value)
        } else {
            // SAFETY: The stack has just been checked to have room.
            Success(unsafe { self.push_unchecked(value) })
        }
    }

    /// # Safety
    /// The stack must not be full.
    pub const unsafe fn push_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < N);
        let slot = &mut self.buf[self.len];
        self.len += 1;
        slot.write(value)
    }

    /// Removes and returns the top of the stack.
    ///
    /// # Panics
    /// Raises a fatal assertion if the stack is empty.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Present(value) => value,
            Absent => EmptyPanic.fatal(),
        }
    }

    pub const fn try_pop(&mut self) -> Maybe<T> {
        if self.len == 0 {
            return Absent;
        }
        self.len -= 1;
        // SAFETY: The element at the old top was initialized, and is no longer counted as part of
        // the stack, so it is only read once.
        Present(unsafe { self.buf[self.len].assume_init_read() })
    }

    /// Returns a reference to the top of the stack.
    ///
    /// # Panics
    /// Raises a fatal assertion if the stack is empty.
    #[track_caller]
    pub fn peek(&self) -> &T {
        match self.last() {
            Some(value) => value,
            None => EmptyPanic.fatal(),
        }
    }

    /// # Panics
    /// Raises a fatal assertion if the stack is empty.
    #[track_caller]
    pub fn peek_mut(&mut self) -> &mut T {
        match self.last_mut() {
            Some(value) => value,
            None => EmptyPanic.fatal(),
        }
    }

    /// Drops every element, leaving the stack empty.
    pub fn clear(&mut self) {
        let len = self.len;
        // Forget the elements before dropping them.
        self.len = 0;
        // SAFETY: The first len elements were initialized and are no longer part of the stack.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().cast::<T>(),
                len,
            ))
        }
    }
}

impl<T, const N: usize> Drop for StaticStack<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for StaticStack<T, N> {
    fn default() -> Self {
        StaticStack::new()
    }
}

impl<T, const N: usize> Deref for StaticStack<T, N> {
    type Target = [T];

    /// Views the stack as a slice, from bottom to top.
    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len elements are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().cast::<T>(), self.len) }
    }
}

impl<T, const N: usize> DerefMut for StaticStack<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The first len elements are initialized.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr().cast::<T>(), self.len) }
    }
}

impl<T: Clone, const N: usize> Clone for StaticStack<T, N> {
    fn clone(&self) -> Self {
        let mut stack = StaticStack::new();
        for value in self.iter() {
            // SAFETY: The new stack holds exactly as many elements as self, which is at most N.
            unsafe { stack.push_unchecked(value.clone()) };
        }
        stack
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<StaticStack<T, M>>
    for StaticStack<T, N>
{
    fn eq(&self, other: &StaticStack<T, M>) -> bool {
        **self == **other
    }
}

impl<T: Eq, const N: usize> Eq for StaticStack<T, N> {}

impl<T, const N: usize> FromIterator<T> for StaticStack<T, N> {
    /// # Panics
    /// Raises a fatal assertion if the iterator yields more than `N` items.
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = StaticStack::new();
        for value in iter {
            stack.push(value);
        }
        stack
    }
}

impl<T: Debug, const N: usize> Debug for StaticStack<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticStack")
            .field_with("contents", |f| f.debug_list().entries(self.iter()).finish())
            .field("len", &self.len)
            .field("capacity", &N)
            .finish()
    }
}
