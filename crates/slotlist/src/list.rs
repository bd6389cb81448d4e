//! The list: storage, topology, and element accessors.
//!
//! [`SlotList`] threads two chains through one `Vec<Slot>`: the live list
//! (anchored by explicit `head`/`tail` fields) and the free chain (rooted at
//! `free_head`). Slot 0 is the sentinel and belongs to neither.
//!
//! Every mutating operation verifies the structure on entry and on exit at
//! the configured [`VerifyLevel`]. Caller mistakes are detected before any
//! link is touched, so a returned error always means nothing changed.

use std::panic::Location;

use tracing::{debug, trace};

use crate::config::{ListConfig, VerifyLevel};
use crate::diag::{self, Summary};
use crate::error::{AllocationError, ContractViolation, ListError};
use crate::handle::{Anchor, SlotIndex};
use crate::read::Snapshot;
use crate::slot::{free_run, Slot, SlotState};

/// Array-backed doubly-linked list of `i32` with an embedded slot allocator.
///
/// Indices returned by insertion stay valid until the element is erased or
/// the list is rebuilt (which renumbers every element).
#[derive(Clone, Debug)]
pub struct SlotList {
    /// Backing buffer. Its length is the capacity.
    pub(crate) slots: Vec<Slot>,
    /// Number of live elements.
    pub(crate) size: u32,
    /// First live element, or the sentinel when empty.
    pub(crate) head: SlotIndex,
    /// Last live element, or the sentinel when empty.
    pub(crate) tail: SlotIndex,
    /// First free slot, or the sentinel when the free chain is exhausted.
    pub(crate) free_head: SlotIndex,
    pub(crate) config: ListConfig,
}

impl SlotList {
    /// Create a list with room for `capacity` slots (sentinel included),
    /// using default values for every other parameter.
    ///
    /// Requests below [`ListConfig::DEFAULT_MIN_CAPACITY`] are raised to it.
    #[track_caller]
    pub fn new(capacity: u32) -> Result<Self, ListError> {
        Self::with_config(ListConfig::new(capacity))
    }

    /// Create a list from an explicit configuration.
    ///
    /// Every non-sentinel slot starts on the free chain, in ascending order.
    ///
    /// # Errors
    ///
    /// [`ListError::Config`] for inconsistent parameters;
    /// [`ListError::Allocation`] if the initial buffer cannot be reserved or
    /// exceeds `max_capacity`.
    #[track_caller]
    pub fn with_config(config: ListConfig) -> Result<Self, ListError> {
        const OP: &str = "create";

        let capacity = config.effective_capacity();
        let slots = config
            .validate()
            .map_err(ListError::from)
            .and_then(|()| {
                if capacity > config.max_capacity {
                    return Err(AllocationError::CapacityLimit {
                        requested: u64::from(capacity),
                        limit: config.max_capacity,
                    }
                    .into());
                }
                let mut slots = Vec::new();
                slots
                    .try_reserve_exact(capacity as usize)
                    .map_err(|_| AllocationError::ReserveFailed {
                        requested: capacity,
                    })?;
                slots.push(Slot::sentinel());
                slots.extend(free_run(1, capacity));
                Ok(slots)
            });
        let slots = match slots {
            Ok(slots) => slots,
            Err(err) => {
                diag::report(OP, &err, Location::caller(), None);
                return Err(err);
            }
        };

        let list = Self {
            slots,
            size: 0,
            head: SlotIndex::SENTINEL,
            tail: SlotIndex::SENTINEL,
            free_head: SlotIndex(1),
            config,
        };
        list.check(OP)?;
        debug!(capacity, "created slot list");
        Ok(list)
    }

    /// Release the backing storage. Equivalent to dropping the list.
    pub fn destroy(self) {
        debug!(capacity = self.capacity(), size = self.size, "destroyed slot list");
    }

    // ── Topology ────────────────────────────────────────────────

    /// Insert `value` at `anchor` and return the slot it now occupies.
    ///
    /// [`Anchor::End`] appends after the tail. [`Anchor::Before`] splices the
    /// new element immediately before a live slot. If the free chain is empty
    /// the buffer doubles first.
    ///
    /// # Errors
    ///
    /// [`ListError::Contract`] if the anchor slot is out of range, the
    /// sentinel, or free; [`ListError::Allocation`] if growth fails;
    /// [`ListError::Invariant`] if verification fails.
    pub fn insert_before(&mut self, anchor: Anchor, value: i32) -> Result<SlotIndex, ListError> {
        const OP: &str = "insert_before";
        self.check(OP)?;

        if let Anchor::Before(at) = anchor {
            self.expect_live(at).map_err(|e| self.fail(OP, e))?;
        }
        let new = self.allocate().map_err(|e| self.fail(OP, e))?;

        let (prev, next) = match anchor {
            Anchor::End => (self.tail, SlotIndex::SENTINEL),
            Anchor::Before(at) => (self.slot(at).prev, at),
        };
        *self.slot_mut(new) = Slot::live(value, prev, next);
        match prev.non_sentinel() {
            Some(prev) => self.slot_mut(prev).next = new,
            None => self.head = new,
        }
        match next.non_sentinel() {
            Some(next) => self.slot_mut(next).prev = new,
            None => self.tail = new,
        }
        self.size += 1;

        trace!(slot = %new, value, "inserted");
        self.check(OP)?;
        Ok(new)
    }

    /// Append `value` after the tail.
    pub fn push_back(&mut self, value: i32) -> Result<SlotIndex, ListError> {
        self.insert_before(Anchor::End, value)
    }

    /// Insert `value` before the head.
    pub fn push_front(&mut self, value: i32) -> Result<SlotIndex, ListError> {
        match self.head.non_sentinel() {
            Some(head) => self.insert_before(Anchor::Before(head), value),
            None => self.insert_before(Anchor::End, value),
        }
    }

    /// Unlink the element at `pos`, return its slot to the free chain, and
    /// return the removed value.
    ///
    /// # Errors
    ///
    /// [`ListError::Contract`] if `pos` is out of range, the sentinel, or
    /// already free; [`ListError::Invariant`] if verification fails.
    pub fn erase(&mut self, pos: SlotIndex) -> Result<i32, ListError> {
        const OP: &str = "erase";
        self.check(OP)?;

        let value = self.expect_live(pos).map_err(|e| self.fail(OP, e))?;
        let Slot { prev, next, .. } = *self.slot(pos);
        match prev.non_sentinel() {
            Some(prev) => self.slot_mut(prev).next = next,
            None => self.head = next,
        }
        match next.non_sentinel() {
            Some(next) => self.slot_mut(next).prev = prev,
            None => self.tail = prev,
        }
        self.size -= 1;
        self.release(pos);

        trace!(slot = %pos, value, "erased");
        self.check(OP)?;
        Ok(value)
    }

    // ── Accessors ───────────────────────────────────────────────

    /// First element, or `None` when empty. O(1).
    pub fn head(&self) -> Option<SlotIndex> {
        self.head.non_sentinel()
    }

    /// Last element, or `None` when empty. O(1).
    pub fn tail(&self) -> Option<SlotIndex> {
        self.tail.non_sentinel()
    }

    /// The element after `pos`, or `None` if `pos` is the tail.
    pub fn next(&self, pos: SlotIndex) -> Result<Option<SlotIndex>, ListError> {
        self.expect_live(pos).map_err(|e| self.fail("next", e))?;
        Ok(self.slot(pos).next.non_sentinel())
    }

    /// The element before `pos`, or `None` if `pos` is the head.
    pub fn prev(&self, pos: SlotIndex) -> Result<Option<SlotIndex>, ListError> {
        self.expect_live(pos).map_err(|e| self.fail("prev", e))?;
        Ok(self.slot(pos).prev.non_sentinel())
    }

    /// The value stored at `pos`.
    pub fn get(&self, pos: SlotIndex) -> Result<i32, ListError> {
        self.expect_live(pos).map_err(|e| self.fail("get", e))
    }

    /// Overwrite the value stored at `pos`.
    pub fn set(&mut self, pos: SlotIndex, value: i32) -> Result<(), ListError> {
        const OP: &str = "set";
        self.check(OP)?;
        self.expect_live(pos).map_err(|e| self.fail(OP, e))?;
        self.slot_mut(pos).state = SlotState::Live(value);
        self.check(OP)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.size as usize
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Total slot count, sentinel included.
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// First slot of the free chain, or `None` if it is exhausted.
    pub fn free_head(&self) -> Option<SlotIndex> {
        self.free_head.non_sentinel()
    }

    /// The configuration this list was built with.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Iterate `(slot, value)` pairs from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.size,
        }
    }

    /// Collect the values from head to tail.
    pub fn values(&self) -> Vec<i32> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Read-only view of the whole structure, for dumps and inspection.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.slots, self.size, self.head, self.tail, self.free_head)
    }

    // ── Internals ───────────────────────────────────────────────

    pub(crate) fn slot(&self, index: SlotIndex) -> &Slot {
        &self.slots[index.as_usize()]
    }

    pub(crate) fn slot_mut(&mut self, index: SlotIndex) -> &mut Slot {
        &mut self.slots[index.as_usize()]
    }

    /// The value at `pos`, or the reason `pos` is not a usable element.
    pub(crate) fn expect_live(&self, pos: SlotIndex) -> Result<i32, ListError> {
        if pos.is_sentinel() {
            return Err(ContractViolation::Sentinel.into());
        }
        let slot = self.slots.get(pos.as_usize()).ok_or(ContractViolation::OutOfRange {
            index: pos,
            capacity: self.capacity(),
        })?;
        slot.value().ok_or_else(|| ContractViolation::FreeSlot { index: pos }.into())
    }

    /// Run the configured verification, reporting any violation.
    #[track_caller]
    pub(crate) fn check(&self, function: &'static str) -> Result<(), ListError> {
        let verified = match self.config.verify_level {
            VerifyLevel::Cheap => self.verify(),
            VerifyLevel::Full => self.verify_full(),
        };
        match verified {
            Ok(()) => Ok(()),
            Err(violation) => Err(self.fail(function, violation.into())),
        }
    }

    /// Report `err` against this list and hand it back for propagation.
    #[track_caller]
    pub(crate) fn fail(&self, function: &'static str, err: ListError) -> ListError {
        diag::report(function, &err, Location::caller(), Some(self.summary()));
        err
    }

    fn summary(&self) -> Summary {
        Summary {
            capacity: self.slots.len(),
            size: self.size,
            head: self.head,
            tail: self.tail,
            free_head: self.free_head,
        }
    }
}

/// Head-to-tail iterator over a [`SlotList`], yielding `(slot, value)`.
///
/// Bounded by the list's element count, so it terminates even on a
/// corrupted chain.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    slots: &'a [Slot],
    cursor: SlotIndex,
    remaining: u32,
}

impl Iterator for Iter<'_> {
    type Item = (SlotIndex, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.cursor.is_sentinel() {
            return None;
        }
        let slot = self.slots.get(self.cursor.as_usize())?;
        let value = slot.value()?;
        let at = self.cursor;
        self.cursor = slot.next;
        self.remaining -= 1;
        Some((at, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

impl<'a> IntoIterator for &'a SlotList {
    type Item = (SlotIndex, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
