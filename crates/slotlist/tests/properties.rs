//! Property tests: random operation sequences against a `Vec` model.
//!
//! Every generated sequence is applied to both a [`SlotList`] and a plain
//! `Vec<(SlotIndex, i32)>` in list order. After each step the two must agree
//! on contents and order, and the slot accounting must balance.

use proptest::prelude::*;
use slotlist::{Anchor, ListConfig, SlotIndex, SlotList, VerifyLevel};

#[derive(Clone, Debug)]
enum Op {
    PushBack(i32),
    /// Insert before the element at `pick % len` (or append when empty).
    InsertBefore(usize, i32),
    /// Erase the element at `pick % len` (no-op when empty).
    Erase(usize),
    Rebuild,
    Shrink,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(p, v)| Op::InsertBefore(p, v)),
        4 => any::<usize>().prop_map(Op::Erase),
        1 => Just(Op::Rebuild),
        1 => Just(Op::Shrink),
    ]
}

fn new_list(capacity: u32) -> SlotList {
    SlotList::with_config(
        ListConfig::new(capacity)
            .with_min_capacity(2)
            .with_verify_level(VerifyLevel::Full),
    )
    .unwrap()
}

fn apply(list: &mut SlotList, model: &mut Vec<(SlotIndex, i32)>, op: &Op) {
    match *op {
        Op::PushBack(v) => {
            let slot = list.push_back(v).unwrap();
            model.push((slot, v));
        }
        Op::InsertBefore(pick, v) => {
            if model.is_empty() {
                let slot = list.insert_before(Anchor::End, v).unwrap();
                model.push((slot, v));
            } else {
                let at = pick % model.len();
                let slot = list.insert_before(Anchor::Before(model[at].0), v).unwrap();
                model.insert(at, (slot, v));
            }
        }
        Op::Erase(pick) => {
            if !model.is_empty() {
                let at = pick % model.len();
                let (slot, v) = model.remove(at);
                assert_eq!(list.erase(slot).unwrap(), v);
            }
        }
        Op::Rebuild => {
            list.rebuild().unwrap();
            *model = list.iter().collect();
        }
        Op::Shrink => {
            let capacity = list.capacity();
            let allowed = list.len() * 4 < capacity as usize && capacity / 2 >= 2;
            assert_eq!(list.shrink_capacity().is_ok(), allowed);
            *model = list.iter().collect();
        }
    }
}

proptest! {
    #[test]
    fn list_matches_model(
        capacity in 2u32..16,
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let mut list = new_list(capacity);
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);

            let actual: Vec<(SlotIndex, i32)> = list.iter().collect();
            prop_assert_eq!(&actual, &model);
            prop_assert_eq!(list.len(), model.len());

            let snap = list.snapshot();
            prop_assert_eq!(snap.live_chain().count(), list.len());
            prop_assert_eq!(
                snap.free_chain().count() as u32,
                list.capacity() - list.len() as u32 - 1
            );
            prop_assert!(list.verify_full().is_ok());
        }
    }

    #[test]
    fn insert_after_erase_never_grows(
        fill in 1u32..30,
        erase_at in any::<prop::sample::Index>(),
    ) {
        let mut list = new_list(2);
        let slots: Vec<_> = (0..fill as i32).map(|v| list.push_back(v).unwrap()).collect();
        let capacity = list.capacity();
        let victim = slots[erase_at.index(slots.len())];
        list.erase(victim).unwrap();
        let reused = list.push_back(-1).unwrap();
        prop_assert_eq!(reused, victim);
        prop_assert_eq!(list.capacity(), capacity);
    }

    #[test]
    fn rebuild_preserves_sequence(
        values in proptest::collection::vec(any::<i32>(), 0..40),
        erase_mask in proptest::collection::vec(any::<bool>(), 40),
    ) {
        let mut list = new_list(4);
        let slots: Vec<_> = values.iter().map(|&v| list.push_back(v).unwrap()).collect();
        for (slot, &erase) in slots.iter().zip(&erase_mask) {
            if erase {
                list.erase(*slot).unwrap();
            }
        }
        let before = list.values();
        list.rebuild().unwrap();
        prop_assert_eq!(list.values(), before);
        let indices: Vec<u32> = list.iter().map(|(s, _)| s.get()).collect();
        prop_assert_eq!(indices, (1..=list.len() as u32).collect::<Vec<_>>());
    }
}
