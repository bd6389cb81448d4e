//! Seeded random workload.
//!
//! Drives a list through a reproducible mix of inserts, erases, rebuilds and
//! shrinks. The same seed and op count always produce the same report.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotlist::{Anchor, ListConfig, ListError, SlotIndex, SlotList};
use tracing::{debug, info};

/// Workload parameters.
#[derive(Clone, Debug)]
pub struct StressConfig {
    /// RNG seed.
    pub seed: u64,
    /// Number of operations to run.
    pub ops: u64,
    /// Configuration of the list under test.
    pub list: ListConfig,
}

/// Counters collected over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StressReport {
    /// Successful inserts.
    pub inserts: u64,
    /// Successful erases.
    pub erases: u64,
    /// Rebuilds run.
    pub rebuilds: u64,
    /// Shrinks run.
    pub shrinks: u64,
    /// Shrinks not attempted because occupancy or the floor forbade them.
    pub shrinks_skipped: u64,
    /// Capacity doublings observed after inserts.
    pub grows: u64,
    /// Largest length seen after any operation.
    pub peak_len: usize,
    /// Length at the end of the run.
    pub final_len: usize,
    /// Capacity at the end of the run.
    pub final_capacity: u32,
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "inserts:         {}", self.inserts)?;
        writeln!(f, "erases:          {}", self.erases)?;
        writeln!(f, "rebuilds:        {}", self.rebuilds)?;
        writeln!(f, "shrinks:         {} ({} skipped)", self.shrinks, self.shrinks_skipped)?;
        writeln!(f, "grows:           {}", self.grows)?;
        writeln!(f, "peak length:     {}", self.peak_len)?;
        write!(
            f,
            "final:           {} live / {} slots",
            self.final_len, self.final_capacity
        )
    }
}

/// Run the workload and return its counters.
///
/// Every mutation is checked at the list's configured verify level; the
/// full walk runs once more at the end.
///
/// # Errors
///
/// The first [`ListError`] any operation or the final check reports.
pub fn run(config: &StressConfig) -> Result<StressReport, ListError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut list = SlotList::with_config(config.list.clone())?;
    let mut live: Vec<SlotIndex> = Vec::new();
    let mut report = StressReport::default();
    info!(seed = config.seed, ops = config.ops, "stress run starting");

    for _ in 0..config.ops {
        match rng.random_range(0..100u32) {
            0..50 => {
                let anchor = if live.is_empty() || rng.random_bool(0.3) {
                    Anchor::End
                } else {
                    Anchor::Before(live[rng.random_range(0..live.len())])
                };
                let before = list.capacity();
                live.push(list.insert_before(anchor, rng.random())?);
                report.inserts += 1;
                if list.capacity() > before {
                    report.grows += 1;
                }
            }
            50..90 => {
                if live.is_empty() {
                    continue;
                }
                let victim = live.swap_remove(rng.random_range(0..live.len()));
                list.erase(victim)?;
                report.erases += 1;
            }
            90..96 => {
                list.rebuild()?;
                live = list.iter().map(|(slot, _)| slot).collect();
                report.rebuilds += 1;
            }
            _ => {
                if !can_shrink(&list) {
                    report.shrinks_skipped += 1;
                    continue;
                }
                list.shrink_capacity()?;
                live = list.iter().map(|(slot, _)| slot).collect();
                report.shrinks += 1;
            }
        }
        report.peak_len = report.peak_len.max(list.len());
    }

    list.verify_full()?;
    report.final_len = list.len();
    report.final_capacity = list.capacity();
    debug!(?report, "stress run finished");
    Ok(report)
}

fn can_shrink(list: &SlotList) -> bool {
    let capacity = list.capacity();
    (list.len() as u64) * 4 < u64::from(capacity) && capacity / 2 >= list.config().min_capacity
}
