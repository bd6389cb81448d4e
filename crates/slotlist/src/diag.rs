//! Diagnostic events for failed operations.
//!
//! Every error surfaced by a public operation is reported exactly once, as a
//! `tracing` error event keyed by source file, function, line and error kind.
//! The list's header fields ride along so a log line is enough to start a
//! post-mortem; a full slot dump is available through [`crate::Snapshot`].

use std::panic::Location;

use tracing::error;

use crate::error::ListError;
use crate::handle::SlotIndex;

/// Header fields of a list at the moment of failure.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Summary {
    pub capacity: usize,
    pub size: u32,
    pub head: SlotIndex,
    pub tail: SlotIndex,
    pub free_head: SlotIndex,
}

pub(crate) fn report(
    function: &'static str,
    err: &ListError,
    location: &Location<'_>,
    summary: Option<Summary>,
) {
    match summary {
        Some(s) => error!(
            file = location.file(),
            line = location.line(),
            function,
            kind = err.kind(),
            capacity = s.capacity,
            size = s.size,
            head = %s.head,
            tail = %s.tail,
            free_head = %s.free_head,
            "{err}"
        ),
        None => error!(
            file = location.file(),
            line = location.line(),
            function,
            kind = err.kind(),
            "{err}"
        ),
    }
}
