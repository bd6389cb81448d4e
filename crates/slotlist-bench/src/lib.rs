//! Fixtures for the slotlist benchmarks.
//!
//! - [`filled`]: `n` values appended in order, slots `1..=n`
//! - [`fragmented`]: a list whose live and free slots are interleaved by a
//!   seeded erase/reinsert pass, so list order no longer follows slot order

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotlist::{Anchor, ListConfig, SlotIndex, SlotList, VerifyLevel};

/// Config with a small floor so benches control the starting capacity.
pub fn config(capacity: u32, verify_level: VerifyLevel) -> ListConfig {
    ListConfig::new(capacity)
        .with_min_capacity(ListConfig::ABSOLUTE_MIN_CAPACITY)
        .with_verify_level(verify_level)
}

/// A list holding `0..n` in order, sized so no growth happened.
pub fn filled(n: u32, verify_level: VerifyLevel) -> (SlotList, Vec<SlotIndex>) {
    let mut list = SlotList::with_config(config(n + 1, verify_level)).unwrap();
    let slots = (0..n as i32).map(|v| list.push_back(v).unwrap()).collect();
    (list, slots)
}

/// A filled list after erasing half its elements at random and reinserting
/// the same number before random survivors.
pub fn fragmented(n: u32, seed: u64) -> (SlotList, Vec<SlotIndex>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (mut list, mut slots) = filled(n, VerifyLevel::Cheap);

    for _ in 0..n / 2 {
        let victim = slots.swap_remove(rng.random_range(0..slots.len()));
        list.erase(victim).unwrap();
    }
    for v in 0..n / 2 {
        let anchor = slots[rng.random_range(0..slots.len())];
        slots.push(list.insert_before(Anchor::Before(anchor), v as i32).unwrap());
    }
    (list, slots)
}
