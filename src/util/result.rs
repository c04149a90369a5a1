use std::error::Error;

use crate::panic::FatalReport;
use crate::result::Outcome;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and raises a fatal assertion with the message of the error itself.
    ///
    /// # Panics
    /// Raises a fatal assertion if the value is an error.
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => FatalReport::capture(error.to_string(), None).raise(),
        }
    }
}

impl<T, E: Error> ResultExtension<T, E> for Outcome<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Outcome::Success(val) => val,
            Outcome::Failure(error) => FatalReport::capture(error.to_string(), None).raise(),
        }
    }
}
