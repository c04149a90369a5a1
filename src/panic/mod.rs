//! Fatal assertions, for conditions that indicate a programming error rather than a runtime
//! failure.
//!
//! Every fatal assertion in this crate goes through [`FatalReport`], which records the message, the
//! failed expression (if any), the caller's source location, the current thread and a backtrace.
//! The report is logged at the error level, then the thread unwinds with the report as its panic
//! message. With the `abort-on-fatal` feature enabled, the report is written to stderr and the
//! process is aborted instead.
//!
//! There are three ways to raise one:
//! - [`fatal!`](crate::fatal) with a format string.
//! - [`fatal_if!`](crate::fatal_if) with a condition and a format string, which also records the
//!   condition's source text.
//! - [`Fatal::fatal`] on one of the typed conditions in this module.

mod kinds;
mod report;

pub use kinds::*;
pub use report::*;

use std::error::Error;

/// A condition that can't be continued past. Implementing this trait for an [`Error`] type allows
/// it to be raised as a fatal assertion, using its [`Display`](std::fmt::Display) output as the
/// message.
pub trait Fatal: Error {
    /// Raises `self` as a fatal assertion at the caller's location.
    #[track_caller]
    fn fatal(&self) -> ! {
        FatalReport::capture(self.to_string(), None).raise()
    }
}

/// Raises a fatal assertion with the provided format string and arguments.
///
/// # Examples
/// ```should_panic
/// # use owned_std::fatal;
/// fatal!("reached a state that should be impossible: {}", 42);
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::panic::FatalReport::capture(::std::format!($($arg)+), ::std::option::Option::None)
            .raise()
    };
}

/// Raises a fatal assertion if `condition` is true, recording the condition's source text alongside
/// the message.
///
/// # Examples
/// ```
/// # use owned_std::fatal_if;
/// let len = 3;
/// fatal_if!(len > 5, "length {} is too large", len);
/// ```
#[macro_export]
macro_rules! fatal_if {
    ($condition:expr, $($arg:tt)+) => {
        if $condition {
            $crate::panic::FatalReport::capture(
                ::std::format!($($arg)+),
                ::std::option::Option::Some(::std::stringify!($condition)),
            ).raise()
        }
    };
}
