use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use log::{debug, trace};

use crate::{Error, Result};

/// A key together with its current priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, P> {
    pub key: K,
    pub priority: P,
}

/// One row of the key index, as returned by [`IndexedMinHeap::index_snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord<K, P> {
    pub key: K,
    pub position: usize,
    pub priority: P,
}

/// Where a key currently lives in the heap array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot<P> {
    position: usize,
    priority: P,
}

/// Binary min-heap addressable by key.
///
/// Entries live in an array ordered as an implicit binary tree (children of
/// `i` at `2i + 1` and `2i + 2`). A side index maps every key to its array
/// position and cached priority, which is what makes priority updates of an
/// arbitrary key O(log n):
/// - `push`: O(log n)
/// - `pop`: O(log n)
/// - `update_priority`: O(log n), no scan to locate the key
/// - `remove`: O(log n)
///
/// After every public call the array is a valid min-heap and the index agrees
/// with the array exactly. Ties between equal priorities are not ordered.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone + Debug,
    P: Ord + Copy + Debug,
{
    /// Heap-ordered entries
    entries: Vec<Entry<K, P>>,

    /// key -> position in `entries` and cached priority
    index: HashMap<K, Slot<P>>,
}

impl<K, P> IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone + Debug,
    P: Ord + Copy + Debug,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        IndexedMinHeap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMinHeap {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current priority of `key`
    pub fn priority(&self, key: &K) -> Option<P> {
        self.index.get(key).map(|slot| slot.priority)
    }

    /// Returns the array position currently holding `key`
    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).map(|slot| slot.position)
    }

    /// Returns the minimum entry without removing it
    pub fn peek(&self) -> Option<&Entry<K, P>> {
        self.entries.first()
    }

    /// Iterates over the entries in array order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, P>> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Inserts `key` with `priority`.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present; the
    /// heap is left untouched in that case.
    pub fn push(&mut self, key: K, priority: P) -> Result<()> {
        if self.index.contains_key(&key) {
            debug!("rejected push of duplicate key {:?}", key);
            return Err(Error::DuplicateKey(format!("{:?}", key)));
        }

        let position = self.entries.len();
        self.index.insert(key.clone(), Slot { position, priority });
        self.entries.push(Entry { key, priority });

        let settled = self.bubble_up(position);
        trace!(
            "push {:?} priority={:?} settled at {}",
            self.entries[settled].key,
            priority,
            settled
        );
        Ok(())
    }

    /// Removes and returns the entry with the lowest priority, or `None` if
    /// the heap is empty.
    pub fn pop(&mut self) -> Option<Entry<K, P>> {
        let min = self.take(0)?;
        trace!("pop {:?} priority={:?}", min.key, min.priority);
        Some(min)
    }

    /// Changes the priority of `key` and restores heap order around it.
    ///
    /// Setting a priority that leaves the entry correctly placed (including
    /// its current priority) performs no swaps.
    pub fn update_priority(&mut self, key: &K, priority: P) -> Result<()> {
        let position = match self.index.get(key) {
            Some(slot) => slot.position,
            None => {
                debug!("rejected update of unknown key {:?}", key);
                return Err(Error::UnknownKey(format!("{:?}", key)));
            }
        };

        self.reprioritize(position, priority);
        Ok(())
    }

    /// Changes the priority of whatever entry currently sits at `position`
    /// in the heap array.
    pub fn update_at(&mut self, position: usize, priority: P) -> Result<()> {
        if position >= self.entries.len() {
            debug!(
                "rejected update at position {} (len {})",
                position,
                self.entries.len()
            );
            return Err(Error::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }

        self.reprioritize(position, priority);
        Ok(())
    }

    /// Removes `key` wherever it sits in the heap and returns its entry
    pub fn remove(&mut self, key: &K) -> Result<Entry<K, P>> {
        let position = match self.index.get(key) {
            Some(slot) => slot.position,
            None => {
                debug!("rejected removal of unknown key {:?}", key);
                return Err(Error::UnknownKey(format!("{:?}", key)));
            }
        };

        let removed = self
            .take(position)
            .ok_or_else(|| Error::UnknownKey(format!("{:?}", key)))?;
        trace!(
            "remove {:?} priority={:?} from {}",
            removed.key,
            removed.priority,
            position
        );
        Ok(removed)
    }

    /// Checks the min-heap property for every parent/child pair
    pub fn validate_heap(&self) -> bool {
        (1..self.entries.len())
            .all(|i| self.entries[parent(i)].priority <= self.entries[i].priority)
    }

    /// Checks that the key index describes the array exactly: one record per
    /// entry, with matching position and priority.
    pub fn is_index_consistent(&self) -> bool {
        self.index.len() == self.entries.len()
            && self.entries.iter().enumerate().all(|(position, entry)| {
                self.index.get(&entry.key)
                    == Some(&Slot {
                        position,
                        priority: entry.priority,
                    })
            })
    }

    /// Returns the key index sorted by priority
    pub fn index_snapshot(&self) -> Vec<IndexRecord<K, P>> {
        let mut records: Vec<IndexRecord<K, P>> = self
            .index
            .iter()
            .map(|(key, slot)| IndexRecord {
                key: key.clone(),
                position: slot.position,
                priority: slot.priority,
            })
            .collect();
        records.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.position.cmp(&b.position))
        });
        records
    }

    /// Detaches the entry at `position`, moving the last entry into the hole
    fn take(&mut self, position: usize) -> Option<Entry<K, P>> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(position, last);

        let removed = self.entries.pop()?;
        self.index.remove(&removed.key);

        if position < self.entries.len() {
            self.restore(position);
        }
        Some(removed)
    }

    fn reprioritize(&mut self, position: usize, priority: P) {
        self.entries[position].priority = priority;
        self.sync_slot(position);

        let settled = self.restore(position);
        trace!(
            "update {:?} priority={:?} moved {} -> {}",
            self.entries[settled].key,
            priority,
            position,
            settled
        );
    }

    /// Repairs heap order around `position` after its priority changed or
    /// another entry was moved into it. Only one direction can be needed.
    fn restore(&mut self, position: usize) -> usize {
        let priority = self.entries[position].priority;

        if position > 0 && priority < self.entries[parent(position)].priority {
            return self.bubble_up(position);
        }

        match self.smaller_child(position) {
            Some(child) if priority > self.entries[child].priority => self.sink_down(position),
            _ => position,
        }
    }

    fn bubble_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let up = parent(position);
            if self.entries[up].priority <= self.entries[position].priority {
                break;
            }
            self.swap(up, position);
            position = up;
        }
        position
    }

    fn sink_down(&mut self, mut position: usize) -> usize {
        while let Some(child) = self.smaller_child(position) {
            if self.entries[child].priority >= self.entries[position].priority {
                break;
            }
            self.swap(position, child);
            position = child;
        }
        position
    }

    /// The child of `position` with the lower priority, left on ties
    fn smaller_child(&self, position: usize) -> Option<usize> {
        let left = 2 * position + 1;
        let right = left + 1;

        if left >= self.entries.len() {
            None
        } else if right < self.entries.len()
            && self.entries[right].priority < self.entries[left].priority
        {
            Some(right)
        } else {
            Some(left)
        }
    }

    /// Swaps two array slots and re-points both keys in the index
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.sync_slot(a);
        self.sync_slot(b);
    }

    fn sync_slot(&mut self, position: usize) {
        let entry = &self.entries[position];
        if let Some(slot) = self.index.get_mut(&entry.key) {
            slot.position = position;
            slot.priority = entry.priority;
        }
    }
}

impl<K, P> Default for IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone + Debug,
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the array as `key.priority` tokens, e.g. `j.0 s.1 t.2`
impl<K, P> Display for IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone + Debug + Display,
    P: Ord + Copy + Debug + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}.{}", entry.key, entry.priority)?;
        }
        Ok(())
    }
}

#[inline]
fn parent(position: usize) -> usize {
    (position - 1) / 2
}
