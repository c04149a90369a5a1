use std::cell::UnsafeCell;
use std::fmt::{self, Debug, Formatter};

use super::Mutex;
use crate::alloc::AllocError;
use crate::boxed::Unique;
use crate::result::Maybe::{self, Absent, Present};
use crate::result::Outcome;

/// A heap value that can only be reached while its [`Mutex`] is held.
///
/// Access goes through callbacks: [`edit`](Guarded::edit) and [`view`](Guarded::view) acquire the
/// Mutex, run the callback and release the Mutex again, even if the callback panics. Calling
/// `edit` or `view` from inside another callback on the same Guarded deadlocks.
///
/// # Examples
/// ```
/// # use owned_std::sync::Guarded;
/// let counter = Guarded::new(0_u64);
/// std::thread::scope(|scope| {
///     for _ in 0..4 {
///         scope.spawn(|| {
///             for _ in 0..100 {
///                 counter.edit(|value| *value += 1);
///             }
///         });
///     }
/// });
/// assert_eq!(counter.into_inner(), 400);
/// ```
pub struct Guarded<T> {
    value: Unique<UnsafeCell<T>>,
    mutex: Mutex,
}

impl<T> Guarded<T> {
    /// Moves `value` onto the heap, behind a new unlocked Mutex.
    ///
    /// # Panics
    /// Raises a fatal assertion if the allocation is refused.
    #[track_caller]
    pub fn new(value: T) -> Guarded<T> {
        Guarded {
            value: Unique::new(UnsafeCell::new(value)),
            mutex: Mutex::new(),
        }
    }

    /// # Errors
    /// If the allocation is refused, `value` is dropped and the error is returned.
    pub fn try_new(value: T) -> Outcome<Guarded<T>, AllocError> {
        Unique::try_new(UnsafeCell::new(value)).map(|value| Guarded {
            value,
            mutex: Mutex::new(),
        })
    }

    /// Runs `f` with exclusive access to the value, blocking until the Mutex is free.
    pub fn edit<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let _guard = self.mutex.lock();
        // SAFETY: The Mutex is held until the end of this scope, so no other reference to the
        // value exists.
        f(unsafe { &mut *self.value.get().get() })
    }

    /// Runs `f` with exclusive access to the value if the Mutex is free, or returns [`Absent`]
    /// without blocking.
    pub fn try_edit<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> Maybe<R> {
        let Present(_guard) = self.mutex.try_lock() else {
            return Absent;
        };
        // SAFETY: The Mutex is held until the end of this scope, so no other reference to the
        // value exists.
        Present(f(unsafe { &mut *self.value.get().get() }))
    }

    /// Runs `f` with shared access to the value, blocking until the Mutex is free.
    pub fn view<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
        let _guard = self.mutex.lock();
        // SAFETY: The Mutex is held until the end of this scope, so nothing can write to the
        // value.
        f(unsafe { &*self.value.get().get() })
    }

    /// Borrows the value directly. The exclusive borrow of self already rules out any other
    /// access, so the Mutex isn't touched.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut().get_mut()
    }

    pub fn is_locked(&self) -> bool {
        self.mutex.is_locked()
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner().into_inner()
    }
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self {
        Guarded::new(T::default())
    }
}

// SAFETY: The value is only ever reached by one thread at a time, through the Mutex, so it only
// needs to be sendable.
unsafe impl<T: Send> Sync for Guarded<T> {}

impl<T: Debug> Debug for Guarded<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Guarded");
        match self.mutex.try_lock() {
            Present(_guard) => {
                // SAFETY: The Mutex is held for the rest of this arm.
                debug.field("value", unsafe { &*self.value.get().get() })
            },
            Absent => debug.field("value", &format_args!("<locked>")),
        };
        debug.finish()
    }
}
