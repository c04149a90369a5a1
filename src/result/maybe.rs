use std::convert::Infallible;
use std::fmt::Debug;
use std::ops::{ControlFlow, FromResidual, Residual, Try};

use derive_more::IsVariant;

use super::Outcome::{self, Failure, Success};
use crate::panic::{AbsentPanic, Fatal};

/// Exactly one of a present value or nothing.
///
/// Like [`Outcome`], a Maybe is move-only and is never implicitly copied.
///
/// # Examples
/// ```
/// # use owned_std::result::Maybe;
/// let some = Maybe::Present(4);
/// let none: Maybe<u8> = Maybe::Absent;
/// assert_eq!(some.unwrap_or(0), 4);
/// assert_eq!(none.unwrap_or(0), 0);
/// assert!(none.is_none());
/// ```
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, IsVariant)]
pub enum Maybe<T> {
    Present(T),
    #[default]
    Absent,
}

use Maybe::*;

impl<T> Maybe<T> {
    pub const fn is_some(&self) -> bool {
        self.is_present()
    }

    pub const fn is_none(&self) -> bool {
        self.is_absent()
    }

    pub fn is_some_and<F: FnOnce(T) -> bool>(self, f: F) -> bool {
        match self {
            Present(value) => f(value),
            Absent => false,
        }
    }

    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    pub const fn as_mut(&mut self) -> Maybe<&mut T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    /// Raises a fatal assertion if the value is [`Absent`].
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Present(value) => value,
            Absent => AbsentPanic.fatal(),
        }
    }

    /// Returns a copy of the contained value, or `default` if it is [`Absent`]. The Maybe itself is
    /// left untouched.
    pub fn unwrap_or(&self, default: T) -> T
    where
        T: Clone,
    {
        match self {
            Present(value) => value.clone(),
            Absent => default,
        }
    }

    /// Consumes the Maybe, returning the contained value or `default`.
    pub fn into_unwrap_or(self, default: T) -> T {
        match self {
            Present(value) => value,
            Absent => default,
        }
    }

    pub fn unwrap_or_else<F: FnOnce() -> T>(self, f: F) -> T {
        match self {
            Present(value) => value,
            Absent => f(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Present(value) => Present(f(value)),
            Absent => Absent,
        }
    }

    pub fn ok_or<E>(self, error: E) -> Outcome<T, E> {
        match self {
            Present(value) => Success(value),
            Absent => Failure(error),
        }
    }

    /// Takes the value out, leaving [`Absent`] in its place.
    pub const fn take(&mut self) -> Maybe<T> {
        std::mem::replace(self, Absent)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Present(value),
            None => Absent,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        match value {
            Present(value) => Some(value),
            Absent => None,
        }
    }
}

impl<T> Try for Maybe<T> {
    type Output = T;
    type Residual = Maybe<Infallible>;

    fn from_output(output: Self::Output) -> Self {
        Present(output)
    }

    fn branch(self) -> ControlFlow<Self::Residual, Self::Output> {
        match self {
            Present(value) => ControlFlow::Continue(value),
            Absent => ControlFlow::Break(Absent),
        }
    }
}

impl<T> Residual<T> for Maybe<Infallible> {
    type TryType = Maybe<T>;
}

impl<T> FromResidual<Maybe<Infallible>> for Maybe<T> {
    fn from_residual(_residual: Maybe<Infallible>) -> Self {
        Absent
    }
}

impl<T> FromResidual<Option<Infallible>> for Maybe<T> {
    fn from_residual(_residual: Option<Infallible>) -> Self {
        Absent
    }
}
