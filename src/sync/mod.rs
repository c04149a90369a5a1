//! Mutual exclusion for plain OS threads.
//!
//! [`Mutex`] is a single atomic flag. Threads that find it set are parked (keyed by the flag's
//! address) until an unlock wakes one of them, so a contended lock never busy-waits.
//! [`MutexGuard`] ties the held state to a scope, and [`Guarded`] ties a heap value to a Mutex so
//! that the value can only be reached while the Mutex is held.
//!
//! There is no poisoning: a guard dropped during unwinding simply unlocks.

mod guarded;
mod mutex;
mod tests;

pub use guarded::*;
pub use mutex::*;
