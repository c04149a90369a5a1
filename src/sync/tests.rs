#![cfg(test)]

use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::*;
use crate::result::Maybe;
use crate::util::panic::assert_panics;

#[test]
fn test_guard_releases_on_drop() {
    let mutex = Mutex::new();
    let guard = mutex.lock();
    assert!(mutex.is_locked());
    assert!(mutex.try_lock().is_none());
    drop(guard);
    assert!(!mutex.is_locked());

    let guard = mutex.try_lock().unwrap();
    assert!(std::ptr::eq(guard.lock(), &mutex));
    guard.release();
    assert!(!mutex.is_locked());
}

#[test]
fn test_double_unlock_is_fatal() {
    assert_panics!({
        let mutex = Mutex::new();
        // SAFETY: Unlocking an unlocked Mutex is checked before anything is touched.
        unsafe { mutex.raw_unlock() };
    });
    assert_panics!({
        let mutex = Mutex::new();
        let guard = mutex.lock();
        // SAFETY: The guard is forgotten, so this is the only unlock.
        unsafe { mutex.raw_unlock() };
        std::mem::forget(guard);
        // SAFETY: As above, checked before anything is touched.
        unsafe { mutex.raw_unlock() };
    });
}

#[test]
fn test_unlock_without_guard() {
    let mutex = Mutex::new();
    std::mem::forget(mutex.lock());
    assert!(mutex.is_locked());
    // SAFETY: The guard was forgotten, so this is the only release.
    unsafe { mutex.unlock() };
    assert!(!mutex.is_locked());
    assert!(mutex.try_lock().is_some());

    assert_panics!({
        // SAFETY: Unlocking an unlocked Mutex is checked before anything is touched.
        unsafe { mutex.unlock() };
    });
    assert!(!mutex.is_locked());
}

#[test]
fn test_unlock_wakes_waiter() {
    let mutex = Mutex::new();
    std::mem::forget(mutex.lock());

    thread::scope(|scope| {
        let waiter = scope.spawn(|| drop(mutex.lock()));
        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished(), "The waiter should block while the Mutex is held.");
        // SAFETY: The guard was forgotten, so this is the only release.
        unsafe { mutex.unlock() };
        assert!(waiter.join().is_ok());
    });
    assert!(!mutex.is_locked());
}

#[test]
fn test_guard_releases_on_unwind() {
    let guarded = Guarded::new(0);
    assert_panics!({
        guarded.edit(|value| {
            *value = 1;
            panic!("unwinding while holding the lock");
        });
    });
    assert!(!guarded.is_locked(), "Unwinding should release the Mutex.");
    assert_eq!(guarded.view(|value| *value), 1);
}

#[test]
fn test_lock_blocks_until_released() {
    let mutex = Mutex::new();
    let released = AtomicBool::new(false);

    thread::scope(|scope| {
        let guard = mutex.lock();
        let waiter = scope.spawn(|| {
            let _guard = mutex.lock();
            released.load(Ordering::SeqCst)
        });

        thread::sleep(Duration::from_millis(50));
        released.store(true, Ordering::SeqCst);
        drop(guard);

        assert!(waiter.join().unwrap(), "The waiter should only acquire after the release.");
    });
    assert!(!mutex.is_locked());
}

#[test]
fn test_concurrent_edits_are_exact() {
    const THREADS: usize = 4;
    const ITERATIONS: usize = 10_000;

    let counter = Guarded::new(0_usize);
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..ITERATIONS {
                    counter.edit(|value| {
                        // Read and write separately, so that unserialized edits would lose updates.
                        let current = hint::black_box(*value);
                        *value = current + 1;
                    });
                }
            });
        }
    });

    assert_eq!(counter.into_inner(), THREADS * ITERATIONS);
}

#[test]
fn test_try_edit() {
    let guarded = Guarded::new(String::from("free"));
    assert_eq!(guarded.try_edit(|value| value.len()), Maybe::Present(4));

    guarded.edit(|_| {
        thread::scope(|scope| {
            let attempt = scope.spawn(|| guarded.try_edit(|value| value.push('!')));
            assert!(attempt.join().unwrap().is_none(), "try_edit should not block.");
        });
    });

    let mut guarded = guarded;
    guarded.get_mut().push_str("dom");
    assert_eq!(guarded.into_inner(), "freedom");
}

#[test]
fn test_debug() {
    let guarded = Guarded::new(5);
    assert_eq!(format!("{guarded:?}"), "Guarded { value: 5 }");
    guarded.edit(|_| {
        assert_eq!(format!("{guarded:?}"), "Guarded { value: <locked> }");
    });
}
