//! Graphviz DOT dump.
//!
//! Slots are laid out left to right in index order. Live `next` links are
//! drawn solid, live `prev` links dashed, and free-chain links grey. The
//! `head`, `tail` and `free` markers point at the slots the header names.

use std::fmt;

use slotlist::{SlotIndex, SlotState, Snapshot};

/// Renders a snapshot as a `digraph` suitable for `dot -Tsvg`.
#[derive(Clone, Copy, Debug)]
pub struct DotDump<'a>(pub Snapshot<'a>);

impl fmt::Display for DotDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = &self.0;
        writeln!(f, "digraph slotlist {{")?;
        writeln!(f, "    rankdir=LR;")?;
        writeln!(f, "    node [shape=record, fontname=\"monospace\"];")?;
        writeln!(
            f,
            "    label=\"capacity {} size {}\";",
            snap.capacity(),
            snap.size()
        )?;

        // ── Nodes ──────────────────────────────────────────────────
        for (i, slot) in snap.slots().iter().enumerate() {
            let (value, colour) = match slot.state() {
                SlotState::Sentinel => ("sentinel".to_string(), "lightgrey"),
                SlotState::Free => ("free".to_string(), "mistyrose"),
                SlotState::Live(v) => (v.to_string(), "palegreen"),
            };
            writeln!(
                f,
                "    slot{i} [label=\"{i} | {value} | {{ prev {} | next {} }}\", \
                 style=filled, fillcolor={colour}];",
                slot.prev(),
                slot.next()
            )?;
        }

        // Invisible spine keeps index order.
        for i in 1..snap.slots().len() {
            writeln!(f, "    slot{} -> slot{i} [style=invis, weight=100];", i - 1)?;
        }

        // ── Links ──────────────────────────────────────────────────
        for at in snap.live_chain() {
            let Some(slot) = snap.slots().get(at.get() as usize) else {
                continue;
            };
            if !slot.next().is_sentinel() {
                writeln!(f, "    slot{at} -> slot{} [color=blue];", slot.next())?;
            }
            if !slot.prev().is_sentinel() {
                writeln!(
                    f,
                    "    slot{at} -> slot{} [color=red, style=dashed, constraint=false];",
                    slot.prev()
                )?;
            }
        }
        for at in snap.free_chain() {
            let Some(slot) = snap.slots().get(at.get() as usize) else {
                continue;
            };
            if !slot.next().is_sentinel() {
                writeln!(
                    f,
                    "    slot{at} -> slot{} [color=grey, constraint=false];",
                    slot.next()
                )?;
            }
        }

        // ── Markers ────────────────────────────────────────────────
        marker(f, "head", snap.head())?;
        marker(f, "tail", snap.tail())?;
        marker(f, "free", snap.free_head())?;
        writeln!(f, "}}")
    }
}

/// Render `snap` as a [`DotDump`] string.
pub fn render_dot(snap: Snapshot<'_>) -> String {
    DotDump(snap).to_string()
}

fn marker(f: &mut fmt::Formatter<'_>, name: &str, target: SlotIndex) -> fmt::Result {
    if target.is_sentinel() {
        return Ok(());
    }
    writeln!(f, "    {name} [shape=plaintext];")?;
    writeln!(f, "    {name} -> slot{target} [style=bold];")
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlist::{ListConfig, SlotList};

    fn list() -> SlotList {
        let mut list = SlotList::with_config(ListConfig::new(4).with_min_capacity(2)).unwrap();
        list.push_back(5).unwrap();
        list.push_back(6).unwrap();
        list
    }

    #[test]
    fn emits_every_slot_and_link() {
        let list = list();
        let dot = DotDump(list.snapshot()).to_string();
        assert!(dot.starts_with("digraph slotlist {\n"));
        assert!(dot.trim_end().ends_with('}'));
        for i in 0..4 {
            assert!(dot.contains(&format!("    slot{i} [label=")), "slot{i} missing");
        }
        assert!(dot.contains("slot1 -> slot2 [color=blue]"));
        assert!(dot.contains("slot2 -> slot1 [color=red"));
        assert!(dot.contains("head -> slot1"));
        assert!(dot.contains("tail -> slot2"));
        assert!(dot.contains("free -> slot3"));
        assert!(dot.contains("label=\"1 | 5 | { prev 0 | next 2 }\""));
    }

    #[test]
    fn empty_markers_are_omitted() {
        let mut list = list();
        list.push_back(7).unwrap();
        let dot = DotDump(list.snapshot()).to_string();
        assert!(!dot.contains("free -> "));

        let empty = SlotList::with_config(ListConfig::new(2).with_min_capacity(2)).unwrap();
        let dot = DotDump(empty.snapshot()).to_string();
        assert!(!dot.contains("head -> "));
        assert!(!dot.contains("tail -> "));
        assert!(dot.contains("free -> slot1"));
    }

    #[test]
    fn free_chain_edges_follow_release_order() {
        let mut list = SlotList::with_config(ListConfig::new(6).with_min_capacity(2)).unwrap();
        let a = list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();
        list.erase(a).unwrap();
        list.erase(b).unwrap();
        let dot = DotDump(list.snapshot()).to_string();
        assert!(dot.contains("free -> slot2"));
        assert!(dot.contains("slot2 -> slot1 [color=grey"));
        assert!(dot.contains("slot1 -> slot3 [color=grey"));
    }
}
