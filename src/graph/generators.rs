use crate::graph::{DirectedGraph, MutableGraph};
use crate::Result;
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Generates a random directed graph with about `edge_factor * n` edges.
/// Weights are drawn from `1.0..100.0`; the same seed yields the same graph.
pub fn random_graph(
    n: usize,
    edge_factor: f64,
    seed: u64,
) -> Result<DirectedGraph<OrderedFloat<f64>>> {
    let mut graph = DirectedGraph::with_vertices(n);
    if n < 2 {
        return Ok(graph);
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        // No self-loops
        if u != v {
            graph.add_edge(u, v, OrderedFloat(rng.gen_range(1.0..100.0)))?;
        }
    }

    Ok(graph)
}

/// Generates a `width` x `height` grid with edges in all 8 directions:
/// cost 1.0 for cardinal moves, 1.4 for diagonals.
pub fn grid(width: usize, height: usize) -> Result<DirectedGraph<OrderedFloat<f64>>> {
    let mut graph = DirectedGraph::with_vertices(width * height);

    let directions = [
        (0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0),
        (1, -1, 1.4), (1, 1, 1.4), (-1, 1, 1.4), (-1, -1, 1.4),
    ];

    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            for (dx, dy, cost) in directions {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                    let neighbor = ny as usize * width + nx as usize;
                    graph.add_edge(vertex, neighbor, OrderedFloat(cost))?;
                }
            }
        }
    }

    Ok(graph)
}
