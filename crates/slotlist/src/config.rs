//! List configuration parameters.

use crate::error::ConfigError;

/// Which consistency check runs before and after every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerifyLevel {
    /// Sentinel shape, bounds, and the free chain. Does not walk the live list.
    #[default]
    Cheap,
    /// Everything in `Cheap`, plus a walk of the live list from head to tail.
    Full,
}

/// Configuration for a [`crate::SlotList`].
///
/// Controls initial sizing, the shrink floor, the growth ceiling and the
/// verification depth. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Requested slot count, including the sentinel.
    ///
    /// Raised to `min_capacity` if smaller.
    pub initial_capacity: u32,

    /// Capacity floor. Construction never goes below it and shrinking
    /// refuses to cross it.
    ///
    /// Default: 64. Must be at least 2 (the sentinel plus one usable slot).
    pub min_capacity: u32,

    /// Capacity ceiling. Growth that would exceed it fails with
    /// [`crate::AllocationError::CapacityLimit`].
    ///
    /// Default: 2^31, the largest power of two addressable by a `u32` index.
    pub max_capacity: u32,

    /// Verification run around every mutation.
    pub verify_level: VerifyLevel,
}

impl ListConfig {
    /// Default capacity floor.
    pub const DEFAULT_MIN_CAPACITY: u32 = 64;

    /// Default capacity ceiling.
    pub const DEFAULT_MAX_CAPACITY: u32 = 1 << 31;

    /// Smallest floor that still leaves one allocatable slot.
    pub const ABSOLUTE_MIN_CAPACITY: u32 = 2;

    /// Create a config requesting `initial_capacity` slots.
    ///
    /// Uses default values for all other parameters.
    pub fn new(initial_capacity: u32) -> Self {
        Self {
            initial_capacity,
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
            verify_level: VerifyLevel::default(),
        }
    }

    /// Set the capacity floor.
    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    /// Set the capacity ceiling.
    pub fn with_max_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set the verification depth.
    pub fn with_verify_level(mut self, verify_level: VerifyLevel) -> Self {
        self.verify_level = verify_level;
        self
    }

    /// The capacity a new list actually starts with.
    pub fn effective_capacity(&self) -> u32 {
        self.initial_capacity.max(self.min_capacity)
    }

    /// Check the parameters against each other.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `min_capacity` is below [`Self::ABSOLUTE_MIN_CAPACITY`],
    /// or `max_capacity` is below `min_capacity`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_capacity < Self::ABSOLUTE_MIN_CAPACITY {
            return Err(ConfigError::MinCapacityTooSmall {
                min_capacity: self.min_capacity,
                floor: Self::ABSOLUTE_MIN_CAPACITY,
            });
        }
        if self.max_capacity < self.min_capacity {
            return Err(ConfigError::MaxBelowMin {
                min_capacity: self.min_capacity,
                max_capacity: self.max_capacity,
            });
        }
        Ok(())
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_request_raised_to_floor() {
        assert_eq!(ListConfig::new(4).effective_capacity(), 64);
        assert_eq!(ListConfig::new(100).effective_capacity(), 100);
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(ListConfig::default().validate(), Ok(()));
    }

    #[test]
    fn floor_below_two_rejected() {
        let config = ListConfig::new(8).with_min_capacity(1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MinCapacityTooSmall { min_capacity: 1, .. })
        ));
    }

    #[test]
    fn ceiling_below_floor_rejected() {
        let config = ListConfig::new(8).with_min_capacity(16).with_max_capacity(8);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxBelowMin { .. })
        ));
    }
}
