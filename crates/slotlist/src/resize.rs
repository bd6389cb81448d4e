//! Capacity growth, shrinking, and compaction.
//!
//! Growth is lazy: [`SlotList::allocate`] doubles the buffer when the free
//! chain runs out. [`SlotList::rebuild`] and [`SlotList::shrink_capacity`]
//! are explicit. Rebuild lays the new buffer out completely before swapping
//! it in, so a failure leaves the old buffer untouched.

use tracing::debug;

use crate::error::{AllocationError, ContractViolation, InvariantViolation, ListError};
use crate::handle::SlotIndex;
use crate::list::SlotList;
use crate::slot::{free_run, Slot};

impl SlotList {
    /// Double the capacity and make the new upper half the free chain.
    ///
    /// Only called when the free chain is empty, so the new range becomes
    /// the whole chain. Existing slots keep their indices and contents.
    pub(crate) fn grow(&mut self) -> Result<(), ListError> {
        debug_assert!(self.free_head.is_sentinel(), "grow with a non-empty free chain");

        let old = self.capacity();
        let limit = self.config.max_capacity;
        let new = old
            .checked_mul(2)
            .filter(|&c| c <= limit)
            .ok_or(AllocationError::CapacityLimit {
                requested: u64::from(old) * 2,
                limit,
            })?;
        self.slots
            .try_reserve_exact((new - old) as usize)
            .map_err(|_| AllocationError::ReserveFailed { requested: new })?;

        self.slots.extend(free_run(old, new));
        self.free_head = SlotIndex(old);
        debug!(from = old, to = new, "grew slot storage");
        Ok(())
    }

    /// Renumber the live elements into slots `1..=len`, in list order.
    ///
    /// Capacity is unchanged. The free chain becomes the ascending run above
    /// the last element. Every previously returned [`SlotIndex`] is
    /// invalidated.
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if the replacement buffer cannot be
    /// reserved; [`ListError::Invariant`] if verification fails or the live
    /// chain does not hold `len` elements.
    pub fn rebuild(&mut self) -> Result<(), ListError> {
        const OP: &str = "rebuild";
        self.check(OP)?;

        let slots = self.relaid().map_err(|e| self.fail(OP, e))?;
        self.slots = slots;
        let size = self.size;
        self.head = SlotIndex(if size == 0 { 0 } else { 1 });
        self.tail = SlotIndex(size);
        self.free_head = SlotIndex(if size + 1 < self.capacity() { size + 1 } else { 0 });

        debug!(capacity = self.capacity(), size, "rebuilt slot storage");
        self.check(OP)
    }

    /// Rebuild, then halve the capacity.
    ///
    /// Requires low occupancy: `len * 4 < capacity`, and the halved capacity
    /// must not fall below the configured floor. After the rebuild every
    /// element sits below the new capacity, so truncation drops only free
    /// slots. The free chain may end up empty; the next insert grows again.
    ///
    /// # Errors
    ///
    /// [`ListError::Contract`] ([`ContractViolation::ShrinkPrecondition`]) if
    /// the precondition does not hold; otherwise as [`rebuild`](Self::rebuild).
    pub fn shrink_capacity(&mut self) -> Result<(), ListError> {
        const OP: &str = "shrink_capacity";
        self.check(OP)?;

        let capacity = self.capacity();
        let target = capacity / 2;
        if u64::from(self.size) * 4 >= u64::from(capacity) || target < self.config.min_capacity {
            let err = ContractViolation::ShrinkPrecondition {
                size: self.size,
                capacity,
            };
            return Err(self.fail(OP, err.into()));
        }

        self.rebuild()?;
        self.slots.truncate(target as usize);
        self.slots.shrink_to_fit();
        // The free run is now size+1..target: re-terminate it at the new
        // end, or drop it entirely if nothing of it survived.
        if self.free_head.get() >= target {
            self.free_head = SlotIndex::SENTINEL;
        } else if let Some(last) = self.slots.last_mut() {
            last.next = SlotIndex::SENTINEL;
        }

        debug!(from = capacity, to = target, size = self.size, "shrank slot storage");
        self.check(OP)
    }

    /// A fresh buffer of the current capacity with the live elements at
    /// `1..=len` and the remainder chained as free slots.
    fn relaid(&self) -> Result<Vec<Slot>, ListError> {
        let capacity = self.capacity();
        let size = self.size;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity as usize)
            .map_err(|_| AllocationError::ReserveFailed {
                requested: capacity,
            })?;
        slots.push(Slot::sentinel());
        for (n, (_, value)) in (1..).zip(self.iter()) {
            let next = if n == size { 0 } else { n + 1 };
            slots.push(Slot::live(value, SlotIndex(n - 1), SlotIndex(next)));
        }
        if slots.len() != size as usize + 1 {
            return Err(InvariantViolation::CorruptedLiveChain { at: self.tail }.into());
        }
        slots.extend(free_run(size + 1, capacity));
        Ok(slots)
    }
}
