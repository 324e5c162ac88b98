pub mod indexed_heap;

pub use indexed_heap::{Entry, IndexRecord, IndexedMinHeap};
