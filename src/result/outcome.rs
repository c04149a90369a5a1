use std::convert::Infallible;
use std::fmt::Debug;
use std::ops::{ControlFlow, FromResidual, Residual, Try};

use derive_more::IsVariant;

use super::Maybe::{self, Absent, Present};
use crate::fatal;

/// Exactly one of a success value or an error value.
///
/// Outcomes are move-only: duplicating one takes an explicit [`clone`](Clone::clone).
///
/// # Examples
/// ```
/// # use owned_std::result::{Outcome, Maybe};
/// let ok: Outcome<u8, &str> = Outcome::Success(3);
/// assert!(ok.is_ok());
/// assert_eq!(ok.get(), Maybe::Present(3));
///
/// let err: Outcome<u8, &str> = Outcome::Failure("bad");
/// assert!(err.is_err());
/// assert_eq!(err.get(), Maybe::Absent);
/// ```
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
#[derive(Debug, Clone, PartialEq, Eq, Hash, IsVariant)]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
}

use Outcome::*;

impl<T, E> Outcome<T, E> {
    /// Returns true if this is a [`Success`].
    pub const fn is_ok(&self) -> bool {
        self.is_success()
    }

    /// Returns true if this is a [`Failure`].
    pub const fn is_err(&self) -> bool {
        self.is_failure()
    }

    /// Moves the success value out, or returns [`Absent`] for a [`Failure`].
    pub fn get(self) -> Maybe<T> {
        match self {
            Success(value) => Present(value),
            Failure(_) => Absent,
        }
    }

    /// Moves the error value out, or returns [`Absent`] for a [`Success`].
    pub fn get_err(self) -> Maybe<E> {
        match self {
            Success(_) => Absent,
            Failure(error) => Present(error),
        }
    }

    /// Borrows the success value, if there is one.
    pub const fn view(&self) -> Maybe<&T> {
        match self {
            Success(value) => Present(value),
            Failure(_) => Absent,
        }
    }

    /// Borrows the error value, if there is one.
    pub const fn view_err(&self) -> Maybe<&E> {
        match self {
            Success(_) => Absent,
            Failure(error) => Present(error),
        }
    }

    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Success(value) => Success(f(value)),
            Failure(error) => Failure(error),
        }
    }

    pub fn map_err<G, F: FnOnce(E) -> G>(self, f: F) -> Outcome<T, G> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(f(error)),
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Outcome<U, E>>(self, f: F) -> Outcome<U, E> {
        match self {
            Success(value) => f(value),
            Failure(error) => Failure(error),
        }
    }

    /// Returns the success value, or `default` for a [`Failure`].
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    pub fn unwrap_or_else<F: FnOnce(E) -> T>(self, f: F) -> T {
        match self {
            Success(value) => value,
            Failure(error) => f(error),
        }
    }
}

impl<T, E: Debug> Outcome<T, E> {
    /// Returns the success value.
    ///
    /// # Panics
    /// Raises a fatal assertion if this is a [`Failure`].
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Success(value) => value,
            Failure(error) => fatal!("called unwrap on a failed outcome: {error:?}"),
        }
    }
}

impl<T: Debug, E> Outcome<T, E> {
    /// Returns the error value.
    ///
    /// # Panics
    /// Raises a fatal assertion if this is a [`Success`].
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self {
            Success(value) => fatal!("called unwrap_err on a successful outcome: {value:?}"),
            Failure(error) => error,
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Success(value),
            Err(error) => Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(value: Outcome<T, E>) -> Self {
        match value {
            Success(value) => Ok(value),
            Failure(error) => Err(error),
        }
    }
}

impl<T, E> Try for Outcome<T, E> {
    type Output = T;
    type Residual = Outcome<Infallible, E>;

    fn from_output(output: Self::Output) -> Self {
        Success(output)
    }

    fn branch(self) -> ControlFlow<Self::Residual, Self::Output> {
        match self {
            Success(value) => ControlFlow::Continue(value),
            Failure(error) => ControlFlow::Break(Failure(error)),
        }
    }
}

impl<T, E> Residual<T> for Outcome<Infallible, E> {
    type TryType = Outcome<T, E>;
}

impl<T, E, F: From<E>> FromResidual<Outcome<Infallible, E>> for Outcome<T, F> {
    fn from_residual(residual: Outcome<Infallible, E>) -> Self {
        match residual {
            Failure(error) => Failure(From::from(error)),
        }
    }
}

impl<T, E, F: From<E>> FromResidual<Result<Infallible, E>> for Outcome<T, F> {
    fn from_residual(residual: Result<Infallible, E>) -> Self {
        match residual {
            Err(error) => Failure(From::from(error)),
        }
    }
}
