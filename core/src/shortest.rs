use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::weight::Weight;

/// Shortest distance from i to j and the first hop on one such path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry<W> {
    /// `W::INFINITY` when j is unreachable from i.
    pub distance: W,
    pub next_hop: Option<VertexId>,
}

/// All-pairs shortest distances with next-hop successors, row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix<W> {
    size: usize,
    entries: Vec<PathEntry<W>>,
}

impl<W: Weight> DistanceMatrix<W> {
    /// Side length (the graph's slot capacity at solve time).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entry(&self, i: VertexId, j: VertexId) -> Option<&PathEntry<W>> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.entries.get(i * self.size + j)
    }

    /// Finite shortest distance, or `None` when unreachable.
    pub fn distance(&self, i: VertexId, j: VertexId) -> Option<W> {
        self.entry(i, j)
            .map(|e| e.distance)
            .filter(|d| !d.is_infinite())
    }

    pub fn next_hop(&self, i: VertexId, j: VertexId) -> Option<VertexId> {
        self.entry(i, j).and_then(|e| e.next_hop)
    }

    /// Vertices of a shortest path from `i` to `j`, both endpoints included.
    ///
    /// Follows next-hops for at most `size` steps; a longer chain cannot be a
    /// shortest path and yields `None`.
    pub fn path(&self, i: VertexId, j: VertexId) -> Option<Vec<VertexId>> {
        self.next_hop(i, j)?;

        let mut path = vec![i];
        let mut current = i;
        while current != j {
            current = self.next_hop(current, j)?;
            path.push(current);
            if path.len() > self.size {
                return None;
            }
        }
        Some(path)
    }
}

/// Floyd-Warshall over every slot of `graph`, O(V³) time and O(V²) space.
///
/// Unoccupied slots stay isolated: infinite to and from everything, with no
/// next-hop even to themselves. Parallel arcs contribute their lightest weight.
/// Returns `NegativeCycle` if relaxation makes any vertex reach itself below
/// zero, which an undirected graph does as soon as one edge is negative.
pub fn floyd_warshall<W: Weight>(graph: &Graph<W>) -> Result<DistanceMatrix<W>> {
    let n = graph.capacity();
    let unreachable = PathEntry { distance: W::INFINITY, next_hop: None };
    let mut m = DistanceMatrix { size: n, entries: vec![unreachable; n * n] };

    for i in graph.vertices() {
        m.entries[i * n + i] = PathEntry { distance: W::ZERO, next_hop: Some(i) };
        for arc in graph.arcs(i) {
            let e = &mut m.entries[i * n + arc.target];
            if arc.weight < e.distance {
                e.distance = arc.weight;
                e.next_hop = Some(arc.target);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = m.entries[i * n + k];
            if ik.distance.is_infinite() {
                continue;
            }
            for j in 0..n {
                let kj = m.entries[k * n + j].distance;
                if kj.is_infinite() {
                    continue;
                }
                let via = ik.distance.saturating_add(kj);
                let e = &mut m.entries[i * n + j];
                if via < e.distance {
                    e.distance = via;
                    e.next_hop = ik.next_hop;
                }
            }
        }
    }

    if let Some(vertex) = graph
        .vertices()
        .find(|&v| m.entries[v * n + v].distance < W::ZERO)
    {
        return Err(Error::NegativeCycle { vertex });
    }

    debug!(size = n, edges = graph.edge_count(), "all-pairs shortest paths computed");
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diamond() -> Graph<i32> {
        // 0 -1- 1 -1- 3, 0 -5- 2 -1- 3
        Graph::from_edges(4, vec![(0, 1, 1), (1, 3, 1), (0, 2, 5), (2, 3, 1)]).unwrap()
    }

    #[test]
    fn test_diamond_distances() {
        let m = floyd_warshall(&make_diamond()).unwrap();
        assert_eq!(m.distance(0, 3), Some(2));
        assert_eq!(m.distance(0, 2), Some(3));
        assert_eq!(m.distance(2, 0), Some(3));
        assert_eq!(m.path(0, 2), Some(vec![0, 1, 3, 2]));
        assert_eq!(m.next_hop(0, 3), Some(1));
    }

    #[test]
    fn test_diagonal_zero() {
        let m = floyd_warshall(&make_diamond()).unwrap();
        for v in 0..4 {
            assert_eq!(m.distance(v, v), Some(0));
            assert_eq!(m.path(v, v), Some(vec![v]));
        }
    }

    #[test]
    fn test_parallel_arcs_take_minimum() {
        let g: Graph<i32> = Graph::from_edges(2, vec![(0, 1, 1), (0, 1, 9)]).unwrap();
        let m = floyd_warshall(&g).unwrap();
        assert_eq!(m.distance(0, 1), Some(1));

        let g: Graph<i32> = Graph::from_edges(2, vec![(0, 1, 9), (0, 1, 1)]).unwrap();
        assert_eq!(floyd_warshall(&g).unwrap().distance(1, 0), Some(1));
    }

    #[test]
    fn test_unoccupied_slot_isolated() {
        let g: Graph<u32> = Graph::from_edges(4, vec![(0, 1, 2), (1, 3, 2)]).unwrap();
        let m = floyd_warshall(&g).unwrap();
        assert_eq!(m.size(), 4);
        assert_eq!(m.distance(0, 3), Some(4));
        assert_eq!(m.distance(0, 2), None);
        assert_eq!(m.distance(2, 2), None);
        assert_eq!(m.path(2, 0), None);
        assert_eq!(m.entry(2, 0).unwrap().distance, u32::MAX);
    }

    #[test]
    fn test_disconnected_components() {
        let g: Graph<i64> = Graph::from_edges(4, vec![(0, 1, 1), (2, 3, 1)]).unwrap();
        let m = floyd_warshall(&g).unwrap();
        assert_eq!(m.distance(0, 3), None);
        assert_eq!(m.next_hop(0, 3), None);
        assert_eq!(m.path(0, 3), None);
    }

    #[test]
    fn test_out_of_range_queries() {
        let m = floyd_warshall(&make_diamond()).unwrap();
        assert!(m.entry(4, 0).is_none());
        assert_eq!(m.distance(0, 99), None);
        assert_eq!(m.path(99, 0), None);
    }

    #[test]
    fn test_large_weights_do_not_wrap() {
        let big = i32::MAX / 2 + 10;
        let g: Graph<i32> = Graph::from_edges(3, vec![(0, 1, big), (1, 2, big)]).unwrap();
        let m = floyd_warshall(&g).unwrap();
        // The sum saturates to the sentinel and is reported unreachable.
        assert_eq!(m.distance(0, 2), None);
        assert_eq!(m.distance(0, 1), Some(big));
    }

    #[test]
    fn test_negative_edge_is_negative_cycle() {
        let g: Graph<i32> = Graph::from_edges(3, vec![(0, 1, 2), (1, 2, -1)]).unwrap();
        assert!(matches!(
            floyd_warshall(&g),
            Err(Error::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<i32> = Graph::with_capacity(0);
        let m = floyd_warshall(&g).unwrap();
        assert_eq!(m.size(), 0);
        assert_eq!(m.path(0, 0), None);
    }

    #[test]
    fn test_symmetric() {
        let m = floyd_warshall(&make_diamond()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.distance(i, j), m.distance(j, i));
            }
        }
    }
}
