use std::fmt::Debug;
use num_traits::{Float, Zero};
use log::debug;

use crate::graph::Graph;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::{Entry, IndexedMinHeap};
use crate::{Error, Result};

/// Dijkstra's algorithm on an indexed heap.
///
/// Each vertex is queued at most once; a shorter tentative distance lowers
/// its priority in place instead of pushing a second copy.
#[derive(Debug, Default, Clone)]
pub struct Dijkstra {
    /// Stop as soon as this vertex is settled
    target: Option<usize>,
}

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { target: None }
    }

    /// Stops the search once `target` has been settled. Distances of
    /// vertices not yet settled at that point are upper bounds.
    pub fn with_target(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();
        debug!("dijkstra from {} over {} vertices", source, n);

        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut settled = vec![false; n];

        distances[source] = Some(W::zero());

        let mut queue: IndexedMinHeap<usize, W> = IndexedMinHeap::with_capacity(n);
        queue.push(source, W::zero())?;

        while let Some(Entry { key: u, priority: dist_u }) = queue.pop() {
            settled[u] = true;
            if self.target == Some(u) {
                break;
            }

            for (v, weight) in graph.outgoing_edges(u) {
                if !graph.has_vertex(v) {
                    return Err(Error::InvalidVertex(v));
                }
                if settled[v] {
                    continue;
                }

                let new_dist = dist_u + weight;
                match distances[v] {
                    None => {
                        distances[v] = Some(new_dist);
                        predecessors[v] = Some(u);
                        queue.push(v, new_dist)?;
                    }
                    Some(current_dist) if new_dist < current_dist => {
                        distances[v] = Some(new_dist);
                        predecessors[v] = Some(u);
                        queue.update_priority(&v, new_dist)?;
                    }
                    Some(_) => {}
                }
            }
        }

        debug!(
            "dijkstra settled {} of {} vertices",
            settled.iter().filter(|&&s| s).count(),
            n
        );

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
