use crate::graph::traits::{Graph, MutableGraph};
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed graph stored as one adjacency list per vertex
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// adjacency[v] = [(target_vertex, weight)]
    adjacency: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            adjacency: Vec::new(),
        }
    }

    /// Creates a graph with `vertices` isolated vertices
    pub fn with_vertices(vertices: usize) -> Self {
        DirectedGraph {
            adjacency: vec![Vec::new(); vertices],
        }
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<bool> {
        if !self.has_vertex(to) {
            return Err(Error::InvalidVertex(to));
        }
        let edges = self
            .adjacency
            .get_mut(from)
            .ok_or(Error::InvalidVertex(from))?;

        if weight < W::zero() {
            return Ok(false);
        }

        match edges.iter_mut().find(|(target, _)| *target == to) {
            Some(edge) => edge.1 = weight,
            None => edges.push((to, weight)),
        }
        Ok(true)
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        match self.adjacency.get_mut(from) {
            Some(edges) => {
                let len_before = edges.len();
                edges.retain(|(target, _)| *target != to);
                len_before > edges.len()
            }
            None => false,
        }
    }
}
