use indexed_pq::{IndexedMinHeap, Result};
use rand::Rng;
use std::env;

const PRIORITIES: [u32; 20] = [
    34, 38, 21, 36, 7, 38, 37, 22, 6, 40, 40, 14, 37, 7, 24, 19, 20, 10, 4, 35,
];

fn separator() {
    println!("{}", "---".repeat(20));
}

fn dump(heap: &IndexedMinHeap<char, u32>) {
    println!("{}  heap ok: {}", heap, heap.validate_heap());
    let records: Vec<String> = heap
        .index_snapshot()
        .iter()
        .map(|r| format!("{}@{}:{}", r.key, r.position, r.priority))
        .collect();
    println!("{}", records.join(" "));
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional number of random updates to run after the script
    let args: Vec<String> = env::args().collect();
    let random_updates: usize = if args.len() > 1 {
        args[1].parse().unwrap_or(0)
    } else {
        0
    };

    let mut heap = IndexedMinHeap::with_capacity(PRIORITIES.len());
    for (i, &priority) in PRIORITIES.iter().enumerate() {
        let key = (b'a' + i as u8) as char;
        heap.push(key, priority)?;
    }
    dump(&heap);
    separator();

    for (position, priority) in [(2, 4), (17, 2), (18, 1), (1, 20)] {
        heap.update_at(position, priority)?;
    }
    dump(&heap);
    separator();

    heap.update_priority(&'a', 3)?;
    heap.update_priority(&'j', 0)?;
    heap.update_priority(&'t', 2)?;
    dump(&heap);
    separator();

    let mut rng = rand::thread_rng();
    for _ in 0..random_updates {
        let key = (b'a' + rng.gen_range(0..PRIORITIES.len() as u8)) as char;
        heap.update_priority(&key, rng.gen_range(0..50))?;
    }
    if random_updates > 0 {
        println!("after {} random updates:", random_updates);
        dump(&heap);
        separator();
    }

    while let Some(entry) = heap.pop() {
        println!("popped {}.{}", entry.key, entry.priority);
        dump(&heap);
        separator();
    }

    println!("size {} empty {}", heap.len(), heap.is_empty());
    Ok(())
}
