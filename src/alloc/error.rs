use derive_more::{Display, Error, From, IsVariant};

/// The host refused an allocation request.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("allocation of {size} bytes failed")]
pub struct AllocError {
    pub size: usize,
}

/// The requested capacity can't be represented by a [`Layout`](std::alloc::Layout), because its
/// size would exceed [`isize::MAX`].
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// Reasons that growing an owned buffer can fail.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From, IsVariant)]
pub enum GrowError {
    CapacityOverflow(CapacityOverflow),
    AllocFailed(AllocError),
}
