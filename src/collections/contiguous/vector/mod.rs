//! A module containing [`Vector`] and associated types.
//!
//! [`Drained`] is the owning handle returned by [`Vector::drain`], and [`IntoIter`] provides owned
//! iteration. [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`]
//! are used for borrowed iteration.
//!
//! [`Vector`] is also re-exported under the parent module.

mod drained;
mod iter;
mod raw;
mod vector;

pub use drained::*;
pub use iter::*;
pub use vector::*;
