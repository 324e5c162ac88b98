use indexed_pq::{Entry, Error, IndexedMinHeap};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use std::collections::HashMap;

const PRIORITIES: [u32; 20] = [
    34, 38, 21, 36, 7, 38, 37, 22, 6, 40, 40, 14, 37, 7, 24, 19, 20, 10, 4, 35,
];

fn key(i: usize) -> char {
    (b'a' + i as u8) as char
}

fn scenario_heap() -> IndexedMinHeap<char, u32> {
    let mut heap = IndexedMinHeap::new();
    for (i, &priority) in PRIORITIES.iter().enumerate() {
        heap.push(key(i), priority).unwrap();
    }
    heap
}

fn assert_invariants<K, P>(heap: &IndexedMinHeap<K, P>)
where
    K: Eq + std::hash::Hash + Clone + std::fmt::Debug,
    P: Ord + Copy + std::fmt::Debug,
{
    assert!(heap.validate_heap(), "heap order violated: {:?}", heap);
    assert!(heap.is_index_consistent(), "index out of sync: {:?}", heap);
}

fn drain<K, P>(heap: &mut IndexedMinHeap<K, P>) -> Vec<Entry<K, P>>
where
    K: Eq + std::hash::Hash + Clone + std::fmt::Debug,
    P: Ord + Copy + std::fmt::Debug,
{
    let mut out = Vec::new();
    while let Some(entry) = heap.pop() {
        assert_invariants(&*heap);
        out.push(entry);
    }
    out
}

#[test]
fn test_push_keeps_invariants() {
    let mut heap = IndexedMinHeap::new();
    for (i, &priority) in PRIORITIES.iter().enumerate() {
        heap.push(key(i), priority).unwrap();
        assert_invariants(&heap);
    }
    assert_eq!(heap.len(), 20);
    assert_eq!(heap.peek().map(|e| e.priority), Some(4));
    assert_eq!(heap.peek().map(|e| e.key), Some('s'));
}

#[test]
fn test_drain_is_sorted() {
    let mut heap = scenario_heap();
    let drained: Vec<u32> = drain(&mut heap).into_iter().map(|e| e.priority).collect();

    let mut expected = PRIORITIES.to_vec();
    expected.sort();
    assert_eq!(drained, expected);
    assert!(heap.is_empty());
}

#[test]
fn test_update_scenario_by_key() {
    let mut heap = scenario_heap();

    heap.update_priority(&'c', 4).unwrap();
    heap.update_priority(&'r', 2).unwrap();
    heap.update_priority(&'s', 1).unwrap();
    heap.update_priority(&'b', 20).unwrap();
    assert_invariants(&heap);

    heap.update_priority(&'a', 3).unwrap();
    heap.update_priority(&'j', 0).unwrap();
    heap.update_priority(&'t', 2).unwrap();
    assert_invariants(&heap);

    let drained = drain(&mut heap);
    assert_eq!(drained.len(), 20);
    assert_eq!(drained[0], Entry { key: 'j', priority: 0 });
    assert_eq!(drained[1], Entry { key: 's', priority: 1 });
    assert!(drained.windows(2).all(|w| w[0].priority <= w[1].priority));

    let mut twos: Vec<char> = drained
        .iter()
        .filter(|e| e.priority == 2)
        .map(|e| e.key)
        .collect();
    twos.sort();
    assert_eq!(twos, vec!['r', 't']);

    assert_eq!(heap.len(), 0);
    assert!(heap.is_empty());
    assert!(heap.index_snapshot().is_empty());
}

#[test]
fn test_update_scenario_by_position() {
    let mut heap = scenario_heap();

    for (position, priority) in [(2, 4), (17, 2), (18, 1), (1, 20)] {
        heap.update_at(position, priority).unwrap();
        assert_invariants(&heap);
    }
    heap.update_priority(&'a', 3).unwrap();
    heap.update_priority(&'j', 0).unwrap();
    heap.update_priority(&'t', 2).unwrap();
    assert_invariants(&heap);

    let drained = drain(&mut heap);
    assert_eq!(drained.len(), 20);
    assert_eq!(drained[0], Entry { key: 'j', priority: 0 });
    assert!(drained.windows(2).all(|w| w[0].priority <= w[1].priority));
}

#[test]
fn test_update_matches_rebuild() {
    let updates = [('c', 4), ('r', 2), ('s', 1), ('b', 20), ('a', 3), ('j', 0), ('t', 2)];

    let mut updated = scenario_heap();
    let mut final_priorities: HashMap<char, u32> = PRIORITIES
        .iter()
        .enumerate()
        .map(|(i, &p)| (key(i), p))
        .collect();
    for (k, p) in updates {
        updated.update_priority(&k, p).unwrap();
        final_priorities.insert(k, p);
    }

    let mut rebuilt = IndexedMinHeap::new();
    for (k, p) in &final_priorities {
        rebuilt.push(*k, *p).unwrap();
    }

    let a: Vec<u32> = drain(&mut updated).into_iter().map(|e| e.priority).collect();
    let b: Vec<u32> = drain(&mut rebuilt).into_iter().map(|e| e.priority).collect();
    assert_eq!(a, b);
}

#[test]
fn test_noop_update_leaves_heap_unchanged() {
    let mut heap = scenario_heap();
    let before: Vec<Entry<char, u32>> = heap.iter().cloned().collect();
    let index_before = heap.index_snapshot();

    for i in 0..PRIORITIES.len() {
        let k = key(i);
        let current = heap.priority(&k).unwrap();
        heap.update_priority(&k, current).unwrap();
    }

    let after: Vec<Entry<char, u32>> = heap.iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(index_before, heap.index_snapshot());
}

#[test]
fn test_duplicate_push_rejected() {
    let mut heap = scenario_heap();
    let before: Vec<Entry<char, u32>> = heap.iter().cloned().collect();

    let err = heap.push('c', 1).unwrap_err();
    assert_eq!(err, Error::DuplicateKey("'c'".to_string()));
    assert_eq!(heap.len(), 20);
    assert_eq!(heap.priority(&'c'), Some(21));
    assert_eq!(heap.iter().cloned().collect::<Vec<_>>(), before);
    assert_invariants(&heap);
}

#[test]
fn test_unknown_key_rejected() {
    let mut heap = scenario_heap();

    assert!(matches!(heap.update_priority(&'z', 1), Err(Error::UnknownKey(_))));
    assert!(matches!(heap.remove(&'z'), Err(Error::UnknownKey(_))));
    assert_eq!(heap.len(), 20);
    assert!(!heap.contains(&'z'));
    assert_invariants(&heap);
}

#[test]
fn test_update_at_out_of_range() {
    let mut heap = scenario_heap();
    let err = heap.update_at(20, 0).unwrap_err();
    assert_eq!(err, Error::PositionOutOfRange { position: 20, len: 20 });
    assert_eq!(heap.peek().map(|e| e.priority), Some(4));

    let mut empty: IndexedMinHeap<char, u32> = IndexedMinHeap::new();
    assert!(empty.update_at(0, 1).is_err());
}

#[test]
fn test_single_element_lifecycle() {
    let mut heap = IndexedMinHeap::new();
    heap.push("only", 7).unwrap();
    assert_invariants(&heap);

    assert_eq!(heap.pop(), Some(Entry { key: "only", priority: 7 }));
    assert!(heap.is_empty());
    assert!(heap.index_snapshot().is_empty());
    assert!(!heap.contains(&"only"));
    assert_eq!(heap.pop(), None);

    // Reusable after draining
    heap.push("only", 3).unwrap();
    assert_eq!(heap.len(), 1);
}

#[test]
fn test_pop_empty() {
    let mut heap: IndexedMinHeap<u32, u32> = IndexedMinHeap::default();
    assert_eq!(heap.pop(), None);
    assert!(heap.peek().is_none());
    assert!(heap.validate_heap());
    assert!(heap.is_index_consistent());
}

#[test]
fn test_remove_by_key() {
    let mut heap = scenario_heap();

    let removed = heap.remove(&'s').unwrap();
    assert_eq!(removed, Entry { key: 's', priority: 4 });
    assert_invariants(&heap);

    // A leaf and an interior entry
    let last_key = heap.iter().last().map(|e| e.key).unwrap();
    heap.remove(&last_key).unwrap();
    assert_invariants(&heap);
    heap.remove(&'a').unwrap();
    assert_invariants(&heap);

    assert_eq!(heap.len(), 17);
    assert!(!heap.contains(&'s'));
    assert!(!heap.contains(&'a'));
    assert!(!heap.contains(&last_key));

    let drained = drain(&mut heap);
    assert_eq!(drained.len(), 17);
    assert!(drained.windows(2).all(|w| w[0].priority <= w[1].priority));
}

#[test]
fn test_positions_follow_swaps() {
    let mut heap = IndexedMinHeap::new();
    heap.push(1u32, 30u32).unwrap();
    heap.push(2, 20).unwrap();
    heap.push(3, 10).unwrap();

    assert_eq!(heap.position_of(&3), Some(0));
    assert_eq!(heap.position_of(&1), Some(1));
    assert_eq!(heap.position_of(&2), Some(2));

    heap.update_priority(&1, 5).unwrap();
    assert_eq!(heap.position_of(&1), Some(0));
    assert_eq!(heap.position_of(&3), Some(1));

    heap.update_priority(&1, 50).unwrap();
    assert_eq!(heap.peek().map(|e| e.key), Some(3));
    assert_eq!(heap.position_of(&1), Some(1));
    assert_invariants(&heap);
}

#[test]
fn test_display_and_snapshot() {
    let mut heap = IndexedMinHeap::new();
    heap.push('a', 3u32).unwrap();
    heap.push('b', 1).unwrap();
    heap.push('c', 2).unwrap();

    assert_eq!(heap.to_string(), "b.1 a.3 c.2");

    let snapshot = heap.index_snapshot();
    let keys: Vec<char> = snapshot.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!['b', 'c', 'a']);
    assert_eq!(snapshot[2].position, 1);

    heap.clear();
    assert!(heap.is_empty());
    assert_eq!(heap.to_string(), "");
}

#[test]
fn test_float_priorities() {
    let mut heap = IndexedMinHeap::new();
    heap.push("x", OrderedFloat(2.5)).unwrap();
    heap.push("y", OrderedFloat(-1.0)).unwrap();
    heap.push("z", OrderedFloat(0.25)).unwrap();
    heap.update_priority(&"x", OrderedFloat(-3.0)).unwrap();

    let keys: Vec<&str> = drain(&mut heap).into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["x", "y", "z"]);
}

#[test]
fn test_random_operations_against_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut heap: IndexedMinHeap<u32, i64> = IndexedMinHeap::new();
    let mut model: HashMap<u32, i64> = HashMap::new();

    for _ in 0..5_000 {
        let k = rng.gen_range(0..200u32);
        let p = rng.gen_range(-1_000..1_000i64);
        match rng.gen_range(0..4) {
            0 => {
                let result = heap.push(k, p);
                if model.contains_key(&k) {
                    assert!(matches!(result, Err(Error::DuplicateKey(_))));
                } else {
                    result.unwrap();
                    model.insert(k, p);
                }
            }
            1 => {
                let result = heap.update_priority(&k, p);
                if model.contains_key(&k) {
                    result.unwrap();
                    model.insert(k, p);
                } else {
                    assert!(matches!(result, Err(Error::UnknownKey(_))));
                }
            }
            2 => {
                let expected_min = model.values().min().copied();
                let popped = heap.pop();
                assert_eq!(popped.as_ref().map(|e| e.priority), expected_min);
                if let Some(entry) = popped {
                    assert_eq!(model.remove(&entry.key), Some(entry.priority));
                }
            }
            _ => {
                let result = heap.remove(&k);
                match model.remove(&k) {
                    Some(priority) => assert_eq!(result.unwrap().priority, priority),
                    None => assert!(result.is_err()),
                }
            }
        }

        assert_eq!(heap.len(), model.len());
        assert_invariants(&heap);
    }

    let drained = drain(&mut heap);
    assert_eq!(drained.len(), model.len());
    assert!(drained.windows(2).all(|w| w[0].priority <= w[1].priority));
}
