//! postman-core: Eulerian walks and all-pairs shortest paths.
//!
//! A pure Rust library for route-inspection ("Chinese postman") style
//! problems over weighted undirected multigraphs. It decides whether a walk
//! covering every edge exactly once exists and builds it (Hierholzer's
//! algorithm with sub-walk splicing). It also computes shortest distances
//! and next-hop successors between every pair of vertices (Floyd-Warshall),
//! which a postman solver uses to pair up odd-degree vertices.
//!
//! Everything runs synchronously on the calling thread. A solve mutates the
//! graph's arc usage counters, so callers must not share one graph between
//! concurrent solves.

mod config;
mod error;
mod euler;
mod graph;
mod shortest;
mod walk;
mod weight;

pub use config::{AnchorPolicy, EulerConfig};
pub use error::{Error, Result};
pub use euler::{
    build_walk, build_walk_with, find_odd_vertices, reset_usage, select_start, solve_eulerian,
    solve_eulerian_with, untraversed_arcs,
};
pub use graph::{Edge, Graph, VertexId};
pub use shortest::{floyd_warshall, DistanceMatrix, PathEntry};
pub use walk::{Splice, Step, Walk, WalkElement};
pub use weight::Weight;

#[cfg(test)]
mod tests {
    use crate::*;
    use std::sync::*;

    #[test]
    fn test_glob_import_keeps_std_arc() {
        // Both globs are in scope; `Arc` must still resolve to std's.
        let shared: Arc<Mutex<Graph<i32>>> = Arc::new(Mutex::new(Graph::with_capacity(2)));
        shared.lock().unwrap().add_vertex(1).unwrap();
        assert_eq!(shared.lock().unwrap().vertex_count(), 1);
    }
}
