//! Error types for list operations.
//!
//! Three families, matching how a caller should react:
//! - [`AllocationError`]: the backing buffer could not be resized.
//! - [`InvariantViolation`]: the verifier found corrupted internal state.
//! - [`ContractViolation`]: the caller passed an index that is not usable.
//!
//! Every error means the requested mutation did not take effect.

use std::error::Error;
use std::fmt;

use crate::handle::SlotIndex;

/// The backing buffer could not be grown or reallocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocationError {
    /// Growth would exceed the configured (or addressable) capacity.
    CapacityLimit {
        /// Capacity the operation needed.
        requested: u64,
        /// Configured ceiling.
        limit: u32,
    },
    /// The allocator refused to reserve the buffer.
    ReserveFailed {
        /// Capacity the operation tried to reserve.
        requested: u32,
    },
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityLimit { requested, limit } => {
                write!(f, "capacity limit reached: requested {requested} slots, limit {limit}")
            }
            Self::ReserveFailed { requested } => {
                write!(f, "failed to reserve storage for {requested} slots")
            }
        }
    }
}

impl Error for AllocationError {}

/// A consistency check failed. Signals a bug, not a caller mistake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The list has no backing buffer.
    MissingStorage,
    /// A stored index or count is outside the buffer.
    OutOfRange {
        /// Which field held the bad value.
        what: &'static str,
        /// The offending value.
        index: u32,
        /// Current capacity.
        capacity: u32,
    },
    /// Slot 0 is not a bare sentinel, or head/tail/size disagree about emptiness.
    CorruptedSentinel,
    /// A free-chain entry is not free, is mislinked, or the chain length is wrong.
    CorruptedFreeChain {
        /// First slot found to be wrong.
        at: SlotIndex,
    },
    /// A live-chain entry is not live, is mislinked, or the chain length is wrong.
    CorruptedLiveChain {
        /// First slot found to be wrong.
        at: SlotIndex,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStorage => write!(f, "list has no backing storage"),
            Self::OutOfRange {
                what,
                index,
                capacity,
            } => write!(f, "{what} {index} out of range for capacity {capacity}"),
            Self::CorruptedSentinel => write!(f, "sentinel slot corrupted"),
            Self::CorruptedFreeChain { at } => write!(f, "free chain corrupted at slot {at}"),
            Self::CorruptedLiveChain { at } => write!(f, "live chain corrupted at slot {at}"),
        }
    }
}

impl Error for InvariantViolation {}

/// The caller supplied an index that does not name a live element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    /// Index is past the end of the buffer.
    OutOfRange {
        /// The offending index.
        index: SlotIndex,
        /// Current capacity.
        capacity: u32,
    },
    /// Index is the sentinel.
    Sentinel,
    /// Index names a slot on the free chain.
    FreeSlot {
        /// The offending index.
        index: SlotIndex,
    },
    /// Shrinking was requested while occupancy is too high, or the result
    /// would fall below the capacity floor.
    ShrinkPrecondition {
        /// Live element count.
        size: u32,
        /// Current capacity.
        capacity: u32,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, capacity } => {
                write!(f, "slot {index} out of range for capacity {capacity}")
            }
            Self::Sentinel => write!(f, "the sentinel slot cannot be used as an element"),
            Self::FreeSlot { index } => write!(f, "slot {index} is not a live element"),
            Self::ShrinkPrecondition { size, capacity } => {
                write!(f, "cannot shrink: {size} live elements in capacity {capacity}")
            }
        }
    }
}

impl Error for ContractViolation {}

/// Invalid [`crate::ListConfig`] parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_capacity` leaves no allocatable slot.
    MinCapacityTooSmall {
        /// The configured floor.
        min_capacity: u32,
        /// The smallest acceptable floor.
        floor: u32,
    },
    /// `max_capacity` is below `min_capacity`.
    MaxBelowMin {
        /// The configured floor.
        min_capacity: u32,
        /// The configured ceiling.
        max_capacity: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinCapacityTooSmall {
                min_capacity,
                floor,
            } => write!(f, "min_capacity {min_capacity} is below {floor}"),
            Self::MaxBelowMin {
                min_capacity,
                max_capacity,
            } => write!(
                f,
                "max_capacity {max_capacity} is below min_capacity {min_capacity}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Any failure returned by a [`crate::SlotList`] operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Storage could not be resized.
    Allocation(AllocationError),
    /// Internal state is corrupted.
    Invariant(InvariantViolation),
    /// The caller broke a precondition.
    Contract(ContractViolation),
    /// The configuration is invalid.
    Config(ConfigError),
}

impl ListError {
    /// Stable classification string, used as the `kind` field of log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Allocation(_) => "allocation",
            Self::Invariant(InvariantViolation::MissingStorage) => "missing_storage",
            Self::Invariant(InvariantViolation::OutOfRange { .. }) => "out_of_range",
            Self::Invariant(InvariantViolation::CorruptedSentinel) => "corrupted_sentinel",
            Self::Invariant(InvariantViolation::CorruptedFreeChain { .. }) => {
                "corrupted_free_chain"
            }
            Self::Invariant(InvariantViolation::CorruptedLiveChain { .. }) => {
                "corrupted_live_chain"
            }
            Self::Contract(_) => "contract",
            Self::Config(_) => "config",
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(e) => write!(f, "allocation failed: {e}"),
            Self::Invariant(e) => write!(f, "invariant violated: {e}"),
            Self::Contract(e) => write!(f, "contract violated: {e}"),
            Self::Config(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            Self::Invariant(e) => Some(e),
            Self::Contract(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<AllocationError> for ListError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}

impl From<InvariantViolation> for ListError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invariant(e)
    }
}

impl From<ContractViolation> for ListError {
    fn from(e: ContractViolation) -> Self {
        Self::Contract(e)
    }
}

impl From<ConfigError> for ListError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_exposes_inner_error() {
        let err = ListError::from(ContractViolation::Sentinel);
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("the sentinel slot cannot be used as an element")
        );
    }

    #[test]
    fn kinds_distinguish_invariants() {
        let sentinel = ListError::from(InvariantViolation::CorruptedSentinel);
        let free = ListError::from(InvariantViolation::CorruptedFreeChain { at: SlotIndex(3) });
        assert_eq!(sentinel.kind(), "corrupted_sentinel");
        assert_eq!(free.kind(), "corrupted_free_chain");
    }

    #[test]
    fn display_includes_detail() {
        let err = ListError::from(AllocationError::CapacityLimit {
            requested: 128,
            limit: 64,
        });
        assert_eq!(
            err.to_string(),
            "allocation failed: capacity limit reached: requested 128 slots, limit 64"
        );
    }
}
