use derive_more::{Display, Error};

use super::Fatal;

/// An index was used that is not less than the length of a collection.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("index {index} out of bounds for collection with {len} elements")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}
impl Fatal for IndexOutOfBounds {}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("attempt to dereference a null pointer (was the pointer released?)")]
pub struct NullDerefPanic;
impl Fatal for NullDerefPanic {}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("cannot unlock an unlocked mutex")]
pub struct DoubleUnlockPanic;
impl Fatal for DoubleUnlockPanic {}

/// A fixed-capacity container was asked to hold more than its capacity.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("limit exceeded: capacity is {capacity}")]
pub struct LimitExceededPanic {
    pub capacity: usize,
}
impl Fatal for LimitExceededPanic {}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("cannot access an element of an empty container")]
pub struct EmptyPanic;
impl Fatal for EmptyPanic {}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("called unwrap on an absent value")]
pub struct AbsentPanic;
impl Fatal for AbsentPanic {}
