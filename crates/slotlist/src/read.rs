//! Read-only snapshot view of a list.
//!
//! [`Snapshot`] borrows the list and exposes its header fields and the full
//! slot buffer. It is the interface renderers and inspection tools consume;
//! nothing reachable from it can mutate the list.

use crate::handle::SlotIndex;
use crate::slot::Slot;

/// A read-only view of a [`crate::SlotList`].
///
/// Header accessors return raw indices, with [`SlotIndex::SENTINEL`]
/// meaning "none", so renderers can show the structure exactly as stored.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    slots: &'a [Slot],
    size: u32,
    head: SlotIndex,
    tail: SlotIndex,
    free_head: SlotIndex,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(
        slots: &'a [Slot],
        size: u32,
        head: SlotIndex,
        tail: SlotIndex,
        free_head: SlotIndex,
    ) -> Self {
        Self {
            slots,
            size,
            head,
            tail,
            free_head,
        }
    }

    /// Total slot count, sentinel included.
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Live element count.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Stored head index.
    pub fn head(&self) -> SlotIndex {
        self.head
    }

    /// Stored tail index.
    pub fn tail(&self) -> SlotIndex {
        self.tail
    }

    /// Stored free-chain root.
    pub fn free_head(&self) -> SlotIndex {
        self.free_head
    }

    /// Every slot, in index order.
    pub fn slots(&self) -> &'a [Slot] {
        self.slots
    }

    /// Slot indices of the live chain, head to tail.
    pub fn live_chain(&self) -> Chain<'a> {
        Chain::new(self.slots, self.head, self.size)
    }

    /// Slot indices of the free chain, front to back.
    pub fn free_chain(&self) -> Chain<'a> {
        let limit = self.capacity().saturating_sub(self.size + 1);
        Chain::new(self.slots, self.free_head, limit)
    }
}

/// Iterator following `next` links through a snapshot.
///
/// Stops at the sentinel, at an out-of-range link, or after the number of
/// slots the chain should hold, whichever comes first.
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    slots: &'a [Slot],
    cursor: SlotIndex,
    remaining: u32,
}

impl<'a> Chain<'a> {
    fn new(slots: &'a [Slot], start: SlotIndex, limit: u32) -> Self {
        Self {
            slots,
            cursor: start,
            remaining: limit,
        }
    }
}

impl Iterator for Chain<'_> {
    type Item = SlotIndex;

    fn next(&mut self) -> Option<SlotIndex> {
        if self.remaining == 0 || self.cursor.is_sentinel() {
            return None;
        }
        let at = self.cursor;
        self.cursor = self.slots.get(at.as_usize())?.next;
        self.remaining -= 1;
        Some(at)
    }
}
