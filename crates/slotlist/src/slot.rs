//! The fixed-size record stored in every position of the backing buffer.

use crate::handle::SlotIndex;

/// Payload value reported for slots that hold no element.
///
/// Free slots carry the [`SlotState::Free`] tag rather than a magic value;
/// `POISON` is what [`Slot::raw_value`] shows for them so dumps keep the
/// familiar "dead" marker.
pub const POISON: i32 = 0xDEAD;

/// What a slot currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Slot 0. Never allocated, never freed.
    Sentinel,
    /// Linked into the free chain.
    Free,
    /// Linked into the live list, holding a payload.
    Live(i32),
}

/// One record of the backing buffer: a state tag and two links.
///
/// For live slots `prev`/`next` are list neighbours; for free slots they are
/// free-chain neighbours. [`SlotIndex::SENTINEL`] means "no neighbour".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub(crate) state: SlotState,
    pub(crate) prev: SlotIndex,
    pub(crate) next: SlotIndex,
}

impl Slot {
    pub(crate) const fn sentinel() -> Self {
        Self {
            state: SlotState::Sentinel,
            prev: SlotIndex::SENTINEL,
            next: SlotIndex::SENTINEL,
        }
    }

    pub(crate) const fn free(prev: SlotIndex, next: SlotIndex) -> Self {
        Self {
            state: SlotState::Free,
            prev,
            next,
        }
    }

    pub(crate) const fn live(value: i32, prev: SlotIndex, next: SlotIndex) -> Self {
        Self {
            state: SlotState::Live(value),
            prev,
            next,
        }
    }

    /// The state tag.
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Previous link.
    pub fn prev(&self) -> SlotIndex {
        self.prev
    }

    /// Next link.
    pub fn next(&self) -> SlotIndex {
        self.next
    }

    /// The payload, if the slot is live.
    pub fn value(&self) -> Option<i32> {
        match self.state {
            SlotState::Live(v) => Some(v),
            _ => None,
        }
    }

    /// The payload as it appears in dumps: the live value, or [`POISON`].
    pub fn raw_value(&self) -> i32 {
        self.value().unwrap_or(POISON)
    }

    /// Whether the slot holds a live element.
    pub fn is_live(&self) -> bool {
        matches!(self.state, SlotState::Live(_))
    }

    /// Whether the slot is on the free chain.
    pub fn is_free(&self) -> bool {
        self.state == SlotState::Free
    }
}

/// Free slots `start..end`, chained in ascending order.
///
/// The first slot's `prev` and the last slot's `next` are the sentinel, so
/// the run is a complete free chain on its own.
pub(crate) fn free_run(start: u32, end: u32) -> impl Iterator<Item = Slot> {
    (start..end).map(move |i| {
        let prev = if i == start { 0 } else { i - 1 };
        let next = if i + 1 == end { 0 } else { i + 1 };
        Slot::free(SlotIndex(prev), SlotIndex(next))
    })
}
