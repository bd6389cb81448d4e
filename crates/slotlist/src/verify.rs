//! Structural consistency checks.
//!
//! [`SlotList::verify`] is the cheap check run around every mutation: it
//! looks at the header, the sentinel and the free chain but never walks the
//! live list. [`SlotList::verify_full`] adds the live-list walk.
//!
//! Both walks follow `prev` back-links as they go, so a cycle or a
//! cross-linked chain is reported at the first slot whose back-link
//! disagrees. Together with the length checks this makes the two chains
//! provably disjoint and, with the sentinel, a cover of the whole buffer.

use crate::error::InvariantViolation;
use crate::handle::SlotIndex;
use crate::list::SlotList;
use crate::slot::SlotState;

impl SlotList {
    /// Check the header, the sentinel, and the free chain.
    ///
    /// Read-only; calling it repeatedly without mutation always returns the
    /// same result.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if self.slots.is_empty() {
            return Err(InvariantViolation::MissingStorage);
        }
        let capacity = self.capacity();
        if self.size >= capacity {
            return Err(InvariantViolation::OutOfRange {
                what: "size",
                index: self.size,
                capacity,
            });
        }

        let sentinel = &self.slots[0];
        if sentinel.state != SlotState::Sentinel
            || !sentinel.prev.is_sentinel()
            || !sentinel.next.is_sentinel()
        {
            return Err(InvariantViolation::CorruptedSentinel);
        }

        for (what, index) in [
            ("head", self.head),
            ("tail", self.tail),
            ("free head", self.free_head),
        ] {
            self.in_bounds(what, index)?;
        }
        let empty = self.size == 0;
        if self.head.is_sentinel() != empty || self.tail.is_sentinel() != empty {
            return Err(InvariantViolation::CorruptedSentinel);
        }

        let expected = capacity - self.size - 1;
        let (walked, last) = self.walk_chain(
            self.free_head,
            expected,
            |state| state == SlotState::Free,
            |at| InvariantViolation::CorruptedFreeChain { at },
        )?;
        if walked != expected {
            return Err(InvariantViolation::CorruptedFreeChain { at: last });
        }
        Ok(())
    }

    /// [`verify`](Self::verify), then walk the live list from head to tail.
    ///
    /// O(size). Checks every live slot's tag, bounds and back-link, that the
    /// walk ends at `tail`, and that it visits exactly `size` slots.
    pub fn verify_full(&self) -> Result<(), InvariantViolation> {
        self.verify()?;

        let (walked, last) = self.walk_chain(
            self.head,
            self.size,
            |state| matches!(state, SlotState::Live(_)),
            |at| InvariantViolation::CorruptedLiveChain { at },
        )?;
        if walked != self.size || last != self.tail {
            return Err(InvariantViolation::CorruptedLiveChain { at: last });
        }
        Ok(())
    }

    /// Follow `next` links from `start` for at most `limit` slots.
    ///
    /// Every visited slot must satisfy `tagged`, point back at its
    /// predecessor, and hold an in-bounds `next`. Returns the number of slots
    /// visited and the last one.
    fn walk_chain(
        &self,
        start: SlotIndex,
        limit: u32,
        tagged: impl Fn(SlotState) -> bool,
        corrupted: impl Fn(SlotIndex) -> InvariantViolation,
    ) -> Result<(u32, SlotIndex), InvariantViolation> {
        let mut walked = 0u32;
        let mut prev = SlotIndex::SENTINEL;
        let mut cursor = start;
        while !cursor.is_sentinel() {
            if walked == limit {
                return Err(corrupted(cursor));
            }
            let slot = self.slot(cursor);
            if !tagged(slot.state) || slot.prev != prev {
                return Err(corrupted(cursor));
            }
            self.in_bounds("next link", slot.next)?;
            walked += 1;
            prev = cursor;
            cursor = slot.next;
        }
        Ok((walked, prev))
    }

    fn in_bounds(&self, what: &'static str, index: SlotIndex) -> Result<(), InvariantViolation> {
        let capacity = self.capacity();
        if index.get() >= capacity {
            return Err(InvariantViolation::OutOfRange {
                what,
                index: index.get(),
                capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListConfig, VerifyLevel};
    use crate::error::ListError;
    use crate::slot::Slot;

    fn populated() -> SlotList {
        let mut list = SlotList::with_config(
            ListConfig::new(8)
                .with_min_capacity(2)
                .with_verify_level(VerifyLevel::Full),
        )
        .unwrap();
        for v in 1..=4 {
            list.push_back(v).unwrap();
        }
        list
    }

    #[test]
    fn fresh_and_populated_lists_verify() {
        let list = populated();
        assert_eq!(list.verify(), Ok(()));
        assert_eq!(list.verify_full(), Ok(()));
    }

    #[test]
    fn verify_is_idempotent() {
        let list = populated();
        let before = list.slots.clone();
        assert_eq!(list.verify(), Ok(()));
        assert_eq!(list.verify(), Ok(()));
        assert_eq!(list.slots, before);
    }

    #[test]
    fn missing_storage_detected() {
        let mut list = populated();
        list.slots.clear();
        assert_eq!(list.verify(), Err(InvariantViolation::MissingStorage));
    }

    #[test]
    fn oversized_count_detected() {
        let mut list = populated();
        list.size = 8;
        assert!(matches!(
            list.verify(),
            Err(InvariantViolation::OutOfRange { what: "size", .. })
        ));
    }

    #[test]
    fn sentinel_payload_detected() {
        let mut list = populated();
        list.slots[0] = Slot::live(1, SlotIndex(0), SlotIndex(0));
        assert_eq!(list.verify(), Err(InvariantViolation::CorruptedSentinel));
    }

    #[test]
    fn sentinel_links_detected() {
        let mut list = populated();
        list.slots[0].next = SlotIndex(1);
        assert_eq!(list.verify(), Err(InvariantViolation::CorruptedSentinel));
    }

    #[test]
    fn head_tail_disagreement_detected() {
        let mut list = populated();
        list.head = SlotIndex::SENTINEL;
        assert_eq!(list.verify(), Err(InvariantViolation::CorruptedSentinel));
    }

    #[test]
    fn out_of_range_free_head_detected() {
        let mut list = populated();
        list.free_head = SlotIndex(40);
        assert!(matches!(
            list.verify(),
            Err(InvariantViolation::OutOfRange { what: "free head", index: 40, .. })
        ));
    }

    #[test]
    fn live_slot_on_free_chain_detected() {
        let mut list = populated();
        let free = list.free_head;
        list.slots[free.as_usize()] = Slot::live(7, SlotIndex(0), SlotIndex(0));
        assert_eq!(
            list.verify(),
            Err(InvariantViolation::CorruptedFreeChain { at: free })
        );
    }

    #[test]
    fn free_chain_cycle_detected() {
        let mut list = populated();
        // Free chain is 5 -> 6 -> 7; point 7 back at 5.
        list.slots[7].next = SlotIndex(5);
        assert_eq!(
            list.verify(),
            Err(InvariantViolation::CorruptedFreeChain { at: SlotIndex(5) })
        );
    }

    #[test]
    fn short_free_chain_detected() {
        let mut list = populated();
        list.slots[6].next = SlotIndex::SENTINEL;
        assert_eq!(
            list.verify(),
            Err(InvariantViolation::CorruptedFreeChain { at: SlotIndex(6) })
        );
    }

    #[test]
    fn out_of_range_free_link_detected() {
        let mut list = populated();
        list.slots[5].next = SlotIndex(99);
        assert!(matches!(
            list.verify(),
            Err(InvariantViolation::OutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn broken_live_back_link_only_caught_by_full() {
        let mut list = populated();
        list.slots[3].prev = SlotIndex(1);
        assert_eq!(list.verify(), Ok(()));
        assert_eq!(
            list.verify_full(),
            Err(InvariantViolation::CorruptedLiveChain { at: SlotIndex(3) })
        );
    }

    #[test]
    fn wrong_tail_caught_by_full() {
        let mut list = populated();
        list.tail = SlotIndex(3);
        assert_eq!(
            list.verify_full(),
            Err(InvariantViolation::CorruptedLiveChain { at: SlotIndex(4) })
        );
    }

    #[test]
    fn corrupted_list_rejects_mutation() {
        let mut list = populated();
        list.slots[0].prev = SlotIndex(2);
        let err = list.push_back(5).unwrap_err();
        assert_eq!(err, ListError::Invariant(InvariantViolation::CorruptedSentinel));
        assert_eq!(list.size, 4);
    }
}
