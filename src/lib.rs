//! Indexed PQ - binary min-heap with O(log n) priority updates by key
//!
//! [`IndexedMinHeap`] keeps a key -> position index alongside the heap array,
//! so the priority of any queued key can be lowered or raised in place
//! ("decrease-key") without a linear search. The [`algorithm`] module uses it
//! for a Dijkstra that never holds stale duplicates in its queue.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm, ShortestPathResult};
/// Re-export main types for convenient use
pub use data_structures::{Entry, IndexRecord, IndexedMinHeap};
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Key already present: {0}")]
    DuplicateKey(String),

    #[error("Key not present: {0}")]
    UnknownKey(String),

    #[error("Heap position {position} out of range (len {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Source vertex not found in graph")]
    SourceNotFound,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
