use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot_core::{DEFAULT_PARK_TOKEN, DEFAULT_UNPARK_TOKEN};

use crate::panic::{DoubleUnlockPanic, Fatal};
use crate::result::Maybe::{self, Absent, Present};

/// A lock that can be held by a [`MutexGuard`].
///
/// # Safety
/// While `raw_lock` or a successful `raw_try_lock` has been called without a matching
/// `raw_unlock`, no other caller may acquire the lock.
pub unsafe trait RawLock {
    /// Blocks until the lock is acquired.
    fn raw_lock(&self);

    /// Acquires the lock if it is free, without blocking. Returns true on success.
    fn raw_try_lock(&self) -> bool;

    /// Releases the lock.
    ///
    /// # Safety
    /// The caller must own the lock, meaning that no guard or other party still relies on it being
    /// held.
    unsafe fn raw_unlock(&self);
}

/// A mutual exclusion lock backed by a single atomic flag.
///
/// # Examples
/// ```
/// # use owned_std::sync::Mutex;
/// let mutex = Mutex::new();
/// {
///     let _guard = mutex.lock();
///     assert!(mutex.is_locked());
///     assert!(mutex.try_lock().is_none());
/// }
/// assert!(!mutex.is_locked());
/// ```
#[derive(Default)]
pub struct Mutex {
    locked: AtomicBool,
}

impl Mutex {
    pub const fn new() -> Mutex {
        Mutex {
            locked: AtomicBool::new(false),
        }
    }

    /// Blocks until the Mutex is acquired, then returns a guard that releases it when dropped.
    pub fn lock(&self) -> MutexGuard<'_> {
        MutexGuard::new(self)
    }

    /// Acquires the Mutex if it is free, or returns [`Absent`] without blocking.
    pub fn try_lock(&self) -> Maybe<MutexGuard<'_>> {
        if self.raw_try_lock() {
            // SAFETY: The lock has just been acquired, and is handed to the guard.
            Present(unsafe { MutexGuard::adopt(self) })
        } else {
            Absent
        }
    }

    /// Releases the Mutex without a guard, waking one parked waiter if there are any. Never
    /// blocks.
    ///
    /// # Safety
    /// The caller must own the lock, for example after forgetting the [`MutexGuard`] that acquired
    /// it. Nothing may release it again afterwards.
    ///
    /// # Panics
    /// Raises a fatal assertion if the Mutex isn't locked.
    #[track_caller]
    pub unsafe fn unlock(&self) {
        // SAFETY: The caller owns the lock.
        unsafe { self.raw_unlock() }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// The key that waiters park on.
    fn addr(&self) -> usize {
        (&raw const self.locked).addr()
    }
}

// SAFETY: The flag is only ever set by a successful compare exchange from false, so only one
// caller can hold it at a time.
unsafe impl RawLock for Mutex {
    fn raw_lock(&self) {
        while !self.raw_try_lock() {
            // SAFETY: The validation callback only reads the flag, and none of the callbacks panic
            // or call back into parking_lot_core. A thread is only parked if the flag is still set
            // once its bucket is locked, and unlocking clears the flag before unparking, so no
            // wakeup can be missed.
            unsafe {
                parking_lot_core::park(
                    self.addr(),
                    || self.locked.load(Ordering::Relaxed),
                    || {},
                    |_, _| {},
                    DEFAULT_PARK_TOKEN,
                    None,
                );
            }
        }
    }

    fn raw_try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Releases the lock, waking one parked waiter if there are any. Never blocks.
    ///
    /// # Panics
    /// Raises a fatal assertion if the Mutex isn't locked.
    #[track_caller]
    unsafe fn raw_unlock(&self) {
        if !self.locked.swap(false, Ordering::Release) {
            DoubleUnlockPanic.fatal()
        }

        // SAFETY: The callback doesn't panic or call back into parking_lot_core.
        unsafe { parking_lot_core::unpark_one(self.addr(), |_| DEFAULT_UNPARK_TOKEN) };
    }
}

impl Debug for Mutex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex").field("locked", &self.is_locked()).finish()
    }
}

/// Holds a [`RawLock`] for as long as it lives, releasing it when dropped (including while
/// unwinding).
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct MutexGuard<'a, L: RawLock + ?Sized = Mutex> {
    lock: &'a L,
}

impl<'a, L: RawLock + ?Sized> MutexGuard<'a, L> {
    /// Blocks until `lock` is acquired.
    pub fn new(lock: &'a L) -> MutexGuard<'a, L> {
        lock.raw_lock();
        MutexGuard { lock }
    }

    /// Creates a guard for a lock that is already held.
    ///
    /// # Safety
    /// The caller must own `lock`, and transfers that ownership to the guard.
    pub const unsafe fn adopt(lock: &'a L) -> MutexGuard<'a, L> {
        MutexGuard { lock }
    }

    pub const fn lock(&self) -> &'a L {
        self.lock
    }

    /// Releases the lock now, rather than at the end of the scope.
    pub fn release(self) {
        drop(self)
    }
}

impl<L: RawLock + ?Sized> Drop for MutexGuard<'_, L> {
    fn drop(&mut self) {
        // SAFETY: The guard owns the lock, and is never used again.
        unsafe { self.lock.raw_unlock() }
    }
}

impl<L: RawLock + Debug + ?Sized> Debug for MutexGuard<'_, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexGuard").field("lock", &self.lock).finish()
    }
}
