//! Scripted insert/erase walk-through with a dump after each stage.

use std::io::Write;

use slotlist::{Anchor, ListConfig, SlotList};
use slotlist_dump::{render_text, DumpSink};
use tracing::info;

/// Prints each stage to `out` and, if present, writes it through `sink`.
struct Recorder<'a> {
    out: &'a mut dyn Write,
    sink: Option<&'a mut DumpSink>,
}

impl Recorder<'_> {
    fn stage(&mut self, label: &str, list: &SlotList) -> anyhow::Result<()> {
        writeln!(self.out, "== {label} ==")?;
        write!(self.out, "{}", render_text(list.snapshot()))?;
        writeln!(self.out)?;
        if let Some(sink) = self.sink.as_deref_mut() {
            let files = sink.write(list.snapshot())?;
            info!(stage = label, files = files.len(), "dumped stage");
        }
        Ok(())
    }
}

/// Run the scripted scenario and return the final contents.
///
/// With `rebuild` set the list is compacted before the last dump.
pub fn run(
    config: ListConfig,
    rebuild: bool,
    out: &mut dyn Write,
    sink: Option<&mut DumpSink>,
) -> anyhow::Result<Vec<i32>> {
    let mut rec = Recorder { out, sink };
    let mut list = SlotList::with_config(config)?;

    let anchor = list.insert_before(Anchor::End, 78)?;
    list.insert_before(Anchor::Before(anchor), 123)?;
    rec.stage("insert 78, then 123 before it", &list)?;

    let doomed = list.insert_before(Anchor::Before(anchor), 1488)?;
    rec.stage("insert 1488 before 78", &list)?;

    list.erase(doomed)?;
    let anchor = list.insert_before(Anchor::Before(anchor), 1111)?;
    let tail = list.insert_before(Anchor::End, 9999)?;
    rec.stage("erase 1488, insert 1111 and 9999", &list)?;

    list.insert_before(Anchor::Before(anchor), 123)?;
    list.erase(tail)?;
    if rebuild {
        list.rebuild()?;
    }
    rec.stage("insert 123 before 1111, erase 9999", &list)?;

    let values = list.values();
    list.destroy();
    Ok(values)
}
