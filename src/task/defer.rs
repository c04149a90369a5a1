use std::fmt::{self, Debug, Formatter};

use crate::result::Maybe::{self, Absent, Present};

/// Runs an action exactly once when dropped, unless it has been cancelled first.
///
/// The action also runs while unwinding, so it can be used for cleanup that must happen on every
/// exit path of a scope.
///
/// # Examples
/// ```
/// # use std::cell::Cell;
/// # use owned_std::task::Defer;
/// let closed = Cell::new(false);
/// {
///     let _close = Defer::new(|| closed.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
#[must_use = "the action runs immediately if the Defer is dropped straight away"]
pub struct Defer<F: FnOnce()> {
    action: Maybe<F>,
}

impl<F: FnOnce()> Defer<F> {
    pub const fn new(action: F) -> Defer<F> {
        Defer {
            action: Present(action),
        }
    }

    /// Disarms the Defer, dropping the action without running it.
    pub fn cancel(mut self) {
        self.action = Absent;
    }

    /// Runs the action now, rather than at the end of the scope.
    pub fn run(self) {
        drop(self)
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Present(action) = self.action.take() {
            action()
        }
    }
}

impl<F: FnOnce()> Debug for Defer<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defer").field("armed", &self.action.is_some()).finish()
    }
}

/// Runs the provided statements when the enclosing scope ends, in reverse order of declaration
/// when used more than once.
///
/// The statements borrow whatever they use from the enclosing scope until it ends.
///
/// # Examples
/// ```
/// # use std::cell::RefCell;
/// # use owned_std::defer;
/// let events = RefCell::new(Vec::new());
/// {
///     defer! { events.borrow_mut().push("first declared"); }
///     defer! { events.borrow_mut().push("second declared"); }
///     events.borrow_mut().push("body");
/// }
/// assert_eq!(*events.borrow(), ["body", "second declared", "first declared"]);
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _deferred = $crate::task::Defer::new(|| { $($body)* });
    };
}
