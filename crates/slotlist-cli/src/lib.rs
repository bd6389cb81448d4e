//! Driver routines behind the `slotlist` binary.
//!
//! [`demo`] replays a short scripted scenario with a dump after each stage;
//! [`stress`] runs a seeded random workload and reports counters.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod demo;
pub mod stress;
