//! Single-owner heap pointers.
//!
//! [`Unique`] owns exactly one value through a raw pointer and destroys it through a [`Destroy`]
//! policy when dropped. Ownership can be handed back out as a raw pointer with
//! [`release`](Unique::release), after which the Unique is null and will destroy nothing.

mod destroy;
mod unique;

pub use destroy::*;
pub use unique::*;
