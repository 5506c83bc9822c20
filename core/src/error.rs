//! Error types for postman-core.

use thiserror::Error;

use crate::graph::VertexId;

/// Failures reported by graph mutation and the solvers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The odd-degree vertex count is 1 or above 2, so no Eulerian walk exists.
    #[error("unsolvable graph: {odd_vertices} odd-degree vertices (need 0 or 2)")]
    UnsolvableGraph { odd_vertices: usize },

    /// No occupied vertex to start from.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Vertex id is past the graph's slot capacity.
    #[error("vertex {id} out of range (capacity {capacity})")]
    VertexOutOfRange { id: VertexId, capacity: usize },

    /// Slot is already occupied.
    #[error("vertex {0} already exists")]
    VertexExists(VertexId),

    /// Slot is unoccupied.
    #[error("vertex {0} does not exist")]
    VertexMissing(VertexId),

    /// No undirected edge with the given endpoints and weight.
    #[error("no edge {from} -- {to} with the requested weight")]
    EdgeMissing { from: VertexId, to: VertexId },

    /// Caller-requested start vertex cannot begin an Eulerian walk.
    #[error("vertex {vertex} cannot start an Eulerian walk: {reason}")]
    InvalidStart { vertex: VertexId, reason: &'static str },

    /// Relaxation drove a vertex's distance to itself below zero.
    #[error("negative cycle through vertex {vertex}")]
    NegativeCycle { vertex: VertexId },

    /// A solver tunable holds a value it cannot run with.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// Internal consistency failure (missing reverse arc, missing splice anchor, ...).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias for postman-core operations.
pub type Result<T> = std::result::Result<T, Error>;
