//! Plain-text table dump.

use std::fmt;

use slotlist::{SlotState, Snapshot};

/// Renders a snapshot as a header followed by one line per slot and the
/// list contents in order.
///
/// ```text
/// capacity: 8, size: 2
/// head: 2, tail: 1, free head: 3
///    0: sentinel          prev: 0, next: 0
///    1: live     78       prev: 2, next: 0
///    2: live     123      prev: 0, next: 1
///    3: free     poison   prev: 0, next: 4
///    ...
/// list: [123, 78]
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TextDump<'a>(pub Snapshot<'a>);

impl fmt::Display for TextDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = &self.0;
        writeln!(f, "capacity: {}, size: {}", snap.capacity(), snap.size())?;
        writeln!(
            f,
            "head: {}, tail: {}, free head: {}",
            snap.head(),
            snap.tail(),
            snap.free_head()
        )?;

        let width = snap.capacity().saturating_sub(1).to_string().len();
        for (i, slot) in snap.slots().iter().enumerate() {
            let (tag, value) = match slot.state() {
                SlotState::Sentinel => ("sentinel", String::new()),
                SlotState::Free => ("free", "poison".to_string()),
                SlotState::Live(v) => ("live", v.to_string()),
            };
            writeln!(
                f,
                "{i:>width$}: {tag:<8} {value:<11} prev: {}, next: {}",
                slot.prev(),
                slot.next()
            )?;
        }

        let values: Vec<String> = snap
            .live_chain()
            .filter_map(|s| snap.slots().get(s.get() as usize)?.value())
            .map(|v| v.to_string())
            .collect();
        writeln!(f, "list: [{}]", values.join(", "))
    }
}

/// Render `snap` as a [`TextDump`] string.
pub fn render_text(snap: Snapshot<'_>) -> String {
    TextDump(snap).to_string()
}
