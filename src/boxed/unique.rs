use std::alloc::Layout;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use super::{Destroy, HeapDestroy};
use crate::alloc::{AllocError, Global, RawAlloc};
use crate::panic::{Fatal, NullDerefPanic};
use crate::result::Maybe;
use crate::result::Outcome::{self, Failure, Success};
use crate::util::result::ResultExtension;

/// An owning pointer to a single value, destroyed by the policy `D` when the Unique is dropped.
///
/// A Unique can't be copied or cloned, only moved. It can however become null, either by
/// [`release`](Unique::release) handing ownership back to the caller, or by
/// [`take`](Unique::take) moving it into a new Unique. Dereferencing a null Unique is a fatal
/// assertion, while dropping one does nothing.
///
/// # Examples
/// ```
/// # use owned_std::boxed::Unique;
/// let mut unique = Unique::new(5);
/// *unique += 1;
/// assert_eq!(*unique.get(), 6);
///
/// let moved = unique.take();
/// assert!(unique.is_null());
/// assert_eq!(moved.into_inner(), 6);
/// ```
pub struct Unique<T, D: Destroy<T> = HeapDestroy> {
    ptr: Option<NonNull<T>>,
    policy: D,
    _phantom: PhantomData<T>,
}

impl<T> Unique<T> {
    /// Moves `value` into a new heap allocation.
    ///
    /// # Panics
    /// Raises a fatal assertion if the allocation is refused.
    #[track_caller]
    pub fn new(value: T) -> Unique<T> {
        Unique::try_new(value).throw()
    }

    /// Moves `value` into a new heap allocation. Zero-sized values are never allocated.
    ///
    /// # Errors
    /// If the allocation is refused, `value` is dropped and the error is returned.
    pub fn try_new(value: T) -> Outcome<Unique<T>, AllocError> {
        let layout = Layout::new::<T>();

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            match Global.allocate(layout) {
                Some(ptr) => ptr.cast(),
                None => {
                    log::warn!("allocation of {} bytes for a unique value refused", layout.size());
                    return Failure(AllocError { size: layout.size() });
                },
            }
        };

        // SAFETY: ptr is valid for writes of a T and isn't aliased.
        unsafe { ptr.write(value) }
        Success(Unique {
            ptr: Some(ptr),
            policy: HeapDestroy,
            _phantom: PhantomData,
        })
    }

    /// Adopts a pointer previously obtained from [`release`](Unique::release) on a Unique created
    /// by [`new`](Unique::new).
    ///
    /// # Safety
    /// `ptr` must point to a valid `T` allocated by [`Global`] with the layout of `T` (or be
    /// dangling for zero-sized types), and must not be owned by anything else.
    pub const unsafe fn from_raw(ptr: NonNull<T>) -> Unique<T> {
        // SAFETY: The caller upholds the requirements of HeapDestroy.
        unsafe { Unique::from_raw_with(ptr, HeapDestroy) }
    }

    /// Moves the value back out of the heap, freeing the allocation.
    ///
    /// # Panics
    /// Raises a fatal assertion if the Unique is null.
    #[track_caller]
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        let Some(ptr) = this.ptr.take() else {
            NullDerefPanic.fatal()
        };

        // SAFETY: ptr is owned and valid, and is freed immediately after the read without dropping
        // the value again.
        unsafe {
            let value = ptr.read();
            HeapDestroy::free(ptr);
            value
        }
    }
}

impl<T, D: Destroy<T>> Unique<T, D> {
    /// Adopts `ptr`, which will be destroyed by `policy` when the Unique is dropped.
    ///
    /// # Safety
    /// `ptr` must point to a valid `T` that `policy` can destroy, and must not be owned by anything
    /// else.
    pub const unsafe fn from_raw_with(ptr: NonNull<T>, policy: D) -> Unique<T, D> {
        Unique {
            ptr: Some(ptr),
            policy,
            _phantom: PhantomData,
        }
    }

    /// Returns true if this Unique no longer owns a value.
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    pub const fn policy(&self) -> &D {
        &self.policy
    }

    /// Borrows the owned value.
    ///
    /// # Panics
    /// Raises a fatal assertion if the Unique is null.
    #[track_caller]
    pub fn get(&self) -> &T {
        match self.ptr {
            // SAFETY: An owned pointer is always valid, and the borrow is tied to self.
            Some(ptr) => unsafe { ptr.as_ref() },
            None => NullDerefPanic.fatal(),
        }
    }

    /// Mutably borrows the owned value.
    ///
    /// # Panics
    /// Raises a fatal assertion if the Unique is null.
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        match self.ptr {
            // SAFETY: An owned pointer is always valid and unaliased, and the borrow is tied to
            // self.
            Some(mut ptr) => unsafe { ptr.as_mut() },
            None => NullDerefPanic.fatal(),
        }
    }

    /// Returns a pointer to the owned value, or null.
    pub const fn as_ptr(&self) -> *const T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr().cast_const(),
            None => ptr::null(),
        }
    }

    /// Gives up ownership of the value without destroying it. The caller becomes responsible for
    /// the returned pointer, and this Unique becomes null. Releasing a null Unique returns
    /// [`Absent`](Maybe::Absent).
    ///
    /// # Examples
    /// ```
    /// # use owned_std::boxed::Unique;
    /// # use owned_std::result::Maybe;
    /// let mut unique = Unique::new(String::from("owned"));
    /// let ptr = unique.release().unwrap();
    /// assert_eq!(unique.release(), Maybe::Absent);
    ///
    /// // SAFETY: ptr was just released from a Unique created with Unique::new.
    /// let adopted = unsafe { Unique::from_raw(ptr) };
    /// assert_eq!(adopted.get(), "owned");
    /// ```
    pub fn release(&mut self) -> Maybe<NonNull<T>> {
        let ptr = self.ptr.take();
        if ptr.is_some() {
            log::trace!("released ownership of a unique value");
        }
        ptr.into()
    }

    /// Moves ownership into a new Unique, leaving this one null.
    pub fn take(&mut self) -> Unique<T, D>
    where
        D: Clone,
    {
        Unique {
            ptr: self.ptr.take(),
            policy: self.policy.clone(),
            _phantom: PhantomData,
        }
    }

    /// Destroys the owned value now, leaving this Unique null.
    pub fn reset(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: ptr was owned by self and has just been removed, so it is destroyed once.
            unsafe { self.policy.destroy(ptr) }
        }
    }

    /// Swaps the values owned by two Uniques, without touching either allocation.
    pub const fn swap(&mut self, other: &mut Unique<T, D>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.policy, &mut other.policy);
    }
}

impl<T, D: Destroy<T>> Drop for Unique<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T, D: Destroy<T>> Deref for Unique<T, D> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

impl<T, D: Destroy<T>> DerefMut for Unique<T, D> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_mut()
    }
}

impl<T> From<T> for Unique<T> {
    fn from(value: T) -> Self {
        Unique::new(value)
    }
}

// SAFETY: Unique owns its value exclusively, so sending it sends the value and the policy.
unsafe impl<T: Send, D: Destroy<T> + Send> Send for Unique<T, D> {}
// SAFETY: Shared access only ever produces shared references to the value.
unsafe impl<T: Sync, D: Destroy<T> + Sync> Sync for Unique<T, D> {}

impl<T: Debug, D: Destroy<T>> Debug for Unique<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(_) => f.debug_tuple("Unique").field(self.get()).finish(),
            None => write!(f, "Unique(null)"),
        }
    }
}
