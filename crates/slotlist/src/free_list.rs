//! Free-chain allocator threaded through the slot buffer.
//!
//! Free slots form a chain rooted at `free_head`, linked through the same
//! `prev`/`next` fields live slots use. Allocation pops the front; release
//! pushes onto the front, so the most recently freed slot is reused first.

use crate::error::ListError;
use crate::handle::SlotIndex;
use crate::list::SlotList;
use crate::slot::Slot;

impl SlotList {
    /// Detach the first free slot and return it.
    ///
    /// Grows the buffer first if the chain is exhausted. The returned slot
    /// is still tagged free with both links cleared; the caller fills it in.
    pub(crate) fn allocate(&mut self) -> Result<SlotIndex, ListError> {
        if self.free_head.is_sentinel() {
            self.grow()?;
        }

        let slot = self.free_head;
        let next = self.slot(slot).next;
        if let Some(next) = next.non_sentinel() {
            self.slot_mut(next).prev = SlotIndex::SENTINEL;
        }
        self.free_head = next;
        *self.slot_mut(slot) = Slot::free(SlotIndex::SENTINEL, SlotIndex::SENTINEL);
        Ok(slot)
    }

    /// Push `slot` onto the front of the free chain.
    ///
    /// The caller must already have unlinked it from the live list.
    pub(crate) fn release(&mut self, slot: SlotIndex) {
        let old_head = self.free_head;
        if let Some(old_head) = old_head.non_sentinel() {
            self.slot_mut(old_head).prev = slot;
        }
        *self.slot_mut(slot) = Slot::free(SlotIndex::SENTINEL, old_head);
        self.free_head = slot;
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ListConfig, VerifyLevel};
    use crate::handle::SlotIndex;
    use crate::list::SlotList;

    fn list(capacity: u32) -> SlotList {
        SlotList::with_config(
            ListConfig::new(capacity)
                .with_min_capacity(2)
                .with_verify_level(VerifyLevel::Full),
        )
        .unwrap()
    }

    #[test]
    fn allocate_pops_in_ascending_order() {
        let mut list = list(4);
        assert_eq!(list.allocate().unwrap(), SlotIndex(1));
        assert_eq!(list.free_head, SlotIndex(2));
        assert_eq!(list.slot(SlotIndex(2)).prev, SlotIndex::SENTINEL);
        assert_eq!(list.allocate().unwrap(), SlotIndex(2));
        assert_eq!(list.allocate().unwrap(), SlotIndex(3));
        assert!(list.free_head.is_sentinel());
    }

    #[test]
    fn release_pushes_to_front_and_links_back() {
        let mut list = list(4);
        let a = list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();
        list.erase(a).unwrap();
        assert_eq!(list.free_head, a);
        list.erase(b).unwrap();
        assert_eq!(list.free_head, b);
        assert_eq!(list.slot(b).next, a);
        assert_eq!(list.slot(a).prev, b);
        list.verify().unwrap();
    }

    #[test]
    fn release_into_exhausted_chain_terminates() {
        let mut list = list(3);
        let a = list.push_back(1).unwrap();
        list.push_back(2).unwrap();
        assert!(list.free_head.is_sentinel());
        list.erase(a).unwrap();
        assert_eq!(list.free_head, a);
        assert!(list.slot(a).next.is_sentinel());
        assert!(list.slot(a).is_free());
    }

    #[test]
    fn allocate_on_empty_chain_grows() {
        let mut list = list(2);
        list.push_back(1).unwrap();
        assert!(list.free_head.is_sentinel());
        let slot = list.allocate().unwrap();
        assert_eq!(slot, SlotIndex(2));
        assert_eq!(list.capacity(), 4);
        assert_eq!(list.free_head, SlotIndex(3));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn freed_slots_come_back_most_recent_first(
                fill in 1u32..40,
                picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..40),
            ) {
                let mut list = list(fill + 1);
                let mut live: Vec<SlotIndex> =
                    (0..fill as i32).map(|v| list.push_back(v).unwrap()).collect();
                let mut freed = Vec::new();
                for pick in picks {
                    if live.is_empty() {
                        break;
                    }
                    let victim = live.remove(pick.index(live.len()));
                    list.erase(victim).unwrap();
                    freed.push(victim);
                }

                let capacity = list.capacity();
                while let Some(expected) = freed.pop() {
                    prop_assert_eq!(list.allocate().unwrap(), expected);
                }
                prop_assert!(list.free_head.is_sentinel());
                prop_assert_eq!(list.capacity(), capacity);
            }
        }
    }
}
