//! Slot indices and insertion anchors.
//!
//! A [`SlotIndex`] names one slot of a [`crate::SlotList`]. It is a plain
//! position: it carries no borrow of the list, and every access through it
//! is validated by the list before any slot is touched.

use std::fmt;

/// Position of a slot within the list's backing buffer.
///
/// Index 0 is the permanent sentinel ([`SlotIndex::SENTINEL`]). It is never
/// returned by an insertion and is rejected by every accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub(crate) u32);

impl SlotIndex {
    /// The reserved sentinel slot. Also used as the "no link" value.
    pub const SENTINEL: SlotIndex = SlotIndex(0);

    /// Wrap a raw slot position.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw slot position.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is the sentinel (the "no link" value).
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// `None` for the sentinel, `Some(self)` otherwise.
    pub(crate) fn non_sentinel(self) -> Option<SlotIndex> {
        (!self.is_sentinel()).then_some(self)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Where [`crate::SlotList::insert_before`] places a new element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Past the last element: the new element becomes the tail.
    End,
    /// Immediately before the given live slot.
    Before(SlotIndex),
}

impl From<SlotIndex> for Anchor {
    fn from(index: SlotIndex) -> Self {
        Self::Before(index)
    }
}
