#![cfg(test)]

use std::convert::Infallible;

use derive_more::{Display, Error, From};

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("inner failure")]
struct InnerError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From)]
enum OuterError {
    Inner(InnerError),
}

fn halve(value: u32) -> Outcome<u32, InnerError> {
    if value % 2 == 0 {
        Outcome::Success(value / 2)
    } else {
        Outcome::Failure(InnerError)
    }
}

fn quarter(value: u32) -> Outcome<u32, OuterError> {
    let half = halve(value)?;
    Outcome::Success(halve(half)?)
}

fn first_even(values: &[u32]) -> Maybe<u32> {
    let found: Option<&u32> = values.iter().find(|v| *v % 2 == 0);
    Maybe::Present(*found?)
}

#[test]
fn test_outcome_access() {
    let ok: Outcome<u8, &str> = Outcome::Success(7);
    assert!(ok.is_ok());
    assert!(!ok.is_err());
    assert_eq!(ok.view(), Maybe::Present(&7));
    assert_eq!(ok.view_err(), Maybe::Absent);
    assert_eq!(ok.clone().get(), Maybe::Present(7));
    assert_eq!(ok.clone().get_err(), Maybe::Absent);
    assert_eq!(ok.unwrap(), 7);

    let err: Outcome<u8, &str> = Outcome::Failure("bad");
    assert!(err.is_err());
    assert_eq!(err.view(), Maybe::Absent);
    assert_eq!(err.view_err(), Maybe::Present(&"bad"));
    assert_eq!(err.clone().unwrap_or(1), 1);
    assert_eq!(err.clone().unwrap_or_else(|e| e.len() as u8), 3);
    assert_eq!(err.unwrap_err(), "bad");
}

#[test]
fn test_outcome_wrong_variant_is_fatal() {
    assert_panics!({
        let err: Outcome<u8, &str> = Outcome::Failure("bad");
        err.unwrap();
    });
    assert_panics!({
        let ok: Outcome<u8, &str> = Outcome::Success(1);
        ok.unwrap_err();
    });
}

#[test]
fn test_outcome_combinators() {
    let ok: Outcome<u8, InnerError> = Outcome::Success(2);
    assert_eq!(ok.as_ref(), Outcome::Success(&2));
    assert_eq!(ok.clone().map(|v| v * 10), Outcome::Success(20));
    assert_eq!(ok.and_then(|v| Outcome::Success::<_, InnerError>(v + 1)), Outcome::Success(3));

    let err: Outcome<u8, InnerError> = Outcome::Failure(InnerError);
    assert_eq!(
        err.clone().map_err(OuterError::from),
        Outcome::Failure(OuterError::Inner(InnerError))
    );
    assert_eq!(err.and_then(|v| Outcome::Success(v + 1)), Outcome::Failure(InnerError));
}

#[test]
fn test_outcome_question_mark() {
    assert_eq!(quarter(8), Outcome::Success(2));
    assert_eq!(quarter(6), Outcome::Failure(OuterError::Inner(InnerError)));
    assert_eq!(quarter(3), Outcome::Failure(OuterError::Inner(InnerError)));

    fn parse(input: &str) -> Outcome<u32, std::num::ParseIntError> {
        let value: u32 = input.parse()?;
        Outcome::Success(value)
    }
    assert_eq!(parse("12"), Outcome::Success(12));
    assert!(parse("twelve").is_err());
}

#[test]
fn test_outcome_conversions() {
    let result: Result<u8, Infallible> = Outcome::Success(1).into();
    assert_eq!(result, Ok(1));

    let outcome: Outcome<u8, &str> = Err("bad").into();
    assert_eq!(outcome, Outcome::Failure("bad"));
}

#[test]
fn test_outcome_drops_live_arm_only() {
    let counter = CountedDrop::new(0);

    let ok: Outcome<CountedDrop, CountedDrop> = Outcome::Success(counter.clone());
    drop(ok);
    assert_eq!(counter.take(), 1);

    let err: Outcome<CountedDrop, CountedDrop> = Outcome::Failure(counter.clone());
    let inner = err.unwrap_err();
    assert_eq!(counter.take(), 0, "Moving the error out should not drop it.");
    drop(inner);
    assert_eq!(counter.take(), 1);
}

#[test]
fn test_maybe_access() {
    let mut some = Maybe::Present(5);
    assert!(some.is_some());
    assert_eq!(some.unwrap_or(0), 5);
    assert_eq!(some, Maybe::Present(5), "unwrap_or should not consume the value.");

    if let Maybe::Present(value) = some.as_mut() {
        *value += 1;
    }
    assert_eq!(some.as_ref(), Maybe::Present(&6));
    assert_eq!(some.clone().map(|v| v * 2), Maybe::Present(12));
    assert_eq!(some.clone().ok_or("none"), Outcome::Success(6));

    assert_eq!(some.take(), Maybe::Present(6));
    assert!(some.is_none());
    assert_eq!(some.unwrap_or(0), 0);
    assert_eq!(some.into_unwrap_or(9), 9);
    assert_eq!(Maybe::<u8>::default(), Maybe::Absent);
    assert_eq!(Maybe::<u8>::Absent.ok_or("none"), Outcome::Failure("none"));
}

#[test]
fn test_maybe_unwrap_absent_is_fatal() {
    assert_panics!({
        let none: Maybe<u8> = Maybe::Absent;
        none.unwrap();
    });
}

#[test]
fn test_maybe_question_mark() {
    assert_eq!(first_even(&[1, 3, 4, 6]), Maybe::Present(4));
    assert_eq!(first_even(&[1, 3]), Maybe::Absent);

    fn add_first(a: Maybe<u8>, b: Maybe<u8>) -> Maybe<u8> {
        Maybe::Present(a? + b?)
    }
    assert_eq!(add_first(Maybe::Present(1), Maybe::Present(2)), Maybe::Present(3));
    assert_eq!(add_first(Maybe::Present(1), Maybe::Absent), Maybe::Absent);
}

#[test]
fn test_maybe_conversions() {
    let option: Option<u8> = Maybe::Present(1).into();
    assert_eq!(option, Some(1));
    assert_eq!(Maybe::from(None::<u8>), Maybe::Absent);
}

/// Resolves to a single impl only when `T` isn't `Copy`. Naming `check` for a `Copy` type is
/// ambiguous and fails to compile.
trait AmbiguousIfCopy<Marker> {
    fn check() {}
}

impl<T: ?Sized> AmbiguousIfCopy<()> for T {}

struct IsCopy;

impl<T: ?Sized + Copy> AmbiguousIfCopy<IsCopy> for T {}

#[test]
fn test_move_only() {
    <Outcome<u8, u8> as AmbiguousIfCopy<_>>::check();
    <Maybe<u8> as AmbiguousIfCopy<_>>::check();
    <Maybe<&u8> as AmbiguousIfCopy<_>>::check();

    let counter = CountedDrop::new(0);
    let original = Maybe::Present(counter.clone());
    let copy = original.clone();
    drop(original);
    assert_eq!(counter.take(), 1, "Cloning should produce an independent value.");
    drop(copy);
    assert_eq!(counter.take(), 1);
}
