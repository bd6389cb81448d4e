//! Array-backed doubly-linked list with an embedded slot allocator.
//!
//! One contiguous buffer of [`Slot`]s holds both the live list and the
//! allocator's free chain. Links are [`SlotIndex`] values rather than
//! pointers, and slot 0 is a permanent sentinel that means "no link".
//!
//! # Architecture
//!
//! ```text
//! SlotList
//! ├── slots: Vec<Slot>          (capacity == slots.len())
//! │   ├── [0]  Sentinel         (never allocated, links always 0)
//! │   ├── Live(value) × size    (chain: head ⇄ … ⇄ tail)
//! │   └── Free × (capacity - size - 1)   (chain: free_head → … → 0)
//! ├── head / tail               (0 when empty)
//! ├── free_head                 (0 when exhausted; next insert grows)
//! └── ListConfig                (floor, ceiling, verification depth)
//! ```
//!
//! # Operation costs
//!
//! - **insert / erase / allocate / release:** O(1) plus verification.
//! - **verify:** O(free slots). **verify_full:** O(capacity).
//! - **rebuild:** O(capacity). **grow / shrink:** O(capacity).
//!
//! Every mutating operation verifies the structure before and after it runs
//! (see [`VerifyLevel`]). Failures are reported once as `tracing` error
//! events and returned to the caller; nothing is retried or repaired.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod diag;
pub mod error;
mod free_list;
pub mod handle;
pub mod list;
pub mod read;
mod resize;
pub mod slot;
mod verify;

// Public re-exports for the primary API surface.
pub use config::{ListConfig, VerifyLevel};
pub use error::{AllocationError, ConfigError, ContractViolation, InvariantViolation, ListError};
pub use handle::{Anchor, SlotIndex};
pub use list::{Iter, SlotList};
pub use read::{Chain, Snapshot};
pub use slot::{Slot, SlotState, POISON};
