use tracing::{debug, trace, warn};

use crate::config::{AnchorPolicy, EulerConfig};
use crate::error::{Error, Result};
use crate::graph::{find_arc, Edge, Graph, VertexId};
use crate::walk::{Splice, Walk};
use crate::weight::Weight;

/// Vertices with an odd number of arcs, in ascending id order.
///
/// A self-loop contributes two arcs, so it never changes parity.
pub fn find_odd_vertices<W: Weight>(graph: &Graph<W>) -> Vec<VertexId> {
    graph
        .vertices()
        .filter(|&v| graph.degree(v) % 2 == 1)
        .collect()
}

/// Zero the usage counter of every arc in the graph.
pub fn reset_usage<W: Weight>(graph: &mut Graph<W>) {
    let occupied: Vec<VertexId> = graph.vertices().collect();
    for v in occupied {
        for arc in graph.arcs_mut(v) {
            arc.usage = 0;
        }
    }
}

/// Number of arcs not yet traversed.
pub fn untraversed_arcs<W: Weight>(graph: &Graph<W>) -> usize {
    graph
        .vertices()
        .map(|v| graph.arcs(v).iter().filter(|a| !a.is_used()).count())
        .sum()
}

/// Pick the vertex an Eulerian walk must start from.
///
/// Two odd vertices: the lower one (path). No odd vertices: the lowest
/// vertex with at least one arc, else the lowest occupied vertex (circuit).
/// Performs no arc marking.
pub fn select_start<W: Weight>(
    graph: &Graph<W>,
    odd: &[VertexId],
    requested: Option<VertexId>,
) -> Result<VertexId> {
    if !matches!(odd.len(), 0 | 2) {
        return Err(Error::UnsolvableGraph { odd_vertices: odd.len() });
    }

    if let Some(vertex) = requested {
        return validate_start(graph, odd, vertex);
    }

    if let Some(&first) = odd.first() {
        return Ok(first);
    }

    graph
        .vertices()
        .find(|&v| graph.degree(v) > 0)
        .or_else(|| graph.vertices().next())
        .ok_or(Error::EmptyGraph)
}

fn validate_start<W: Weight>(graph: &Graph<W>, odd: &[VertexId], vertex: VertexId) -> Result<VertexId> {
    let reason = if !graph.vertex_exists(vertex) {
        Some("vertex is not occupied")
    } else if !odd.is_empty() && !odd.contains(&vertex) {
        Some("an open walk must start at an odd-degree vertex")
    } else if graph.degree(vertex) == 0 && graph.edge_count() > 0 {
        Some("vertex has no incident edges")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidStart { vertex, reason }),
        None => Ok(vertex),
    }
}

/// Solve with the default configuration.
pub fn solve_eulerian<W: Weight>(graph: &mut Graph<W>) -> Result<Walk<W>> {
    solve_eulerian_with(graph, &EulerConfig::default())
}

/// Check feasibility, reset arc usage and build an Eulerian walk.
///
/// On a disconnected graph the walk covers only the start vertex's
/// component; the remaining arcs stay untraversed and a warning is logged.
pub fn solve_eulerian_with<W: Weight>(graph: &mut Graph<W>, config: &EulerConfig) -> Result<Walk<W>> {
    let odd = find_odd_vertices(graph);
    let start = select_start(graph, &odd, config.start)?;
    debug!(odd_vertices = odd.len(), start, "eulerian walk feasible");

    reset_usage(graph);
    let walk = build_walk_with(graph, start, config)?;

    let leftover = untraversed_arcs(graph);
    if leftover > 0 {
        warn!(
            leftover,
            start, "walk finished with untraversed arcs; graph is not connected"
        );
    }
    Ok(walk)
}

/// Build a walk from `start` using every reachable unused arc once.
///
/// Arc usage must be zero beforehand (see [`reset_usage`]); arcs already
/// marked are treated as consumed.
pub fn build_walk<W: Weight>(graph: &mut Graph<W>, start: VertexId) -> Result<Walk<W>> {
    build_walk_with(graph, start, &EulerConfig::default())
}

/// A greedy walk plus the branch vertices it left with unused arcs.
struct Frame<W> {
    walk: Walk<W>,
    pending: Vec<VertexId>,
}

/// Hierholzer's algorithm with an explicit frame stack.
///
/// Each frame is a greedy walk. Its deferred branch vertices are resolved
/// last-in first-out by opening a child frame; a finished child is spliced
/// into its parent at the child's start vertex.
pub fn build_walk_with<W: Weight>(
    graph: &mut Graph<W>,
    start: VertexId,
    config: &EulerConfig,
) -> Result<Walk<W>> {
    if config.max_frames == Some(0) {
        return Err(Error::InvalidConfig("max_frames must allow the root frame"));
    }
    if !graph.vertex_exists(start) {
        return Err(Error::VertexMissing(start));
    }

    let mut parents: Vec<Frame<W>> = Vec::new();
    let mut frame = greedy_walk(graph, start)?;

    loop {
        if let Some(anchor) = frame.pending.pop() {
            let child = greedy_walk(graph, anchor)?;
            if child.walk.arc_count() == 0 {
                continue;
            }
            trace!(anchor, arcs = child.walk.arc_count(), depth = parents.len() + 1, "opened sub-walk");

            parents.push(frame);
            if let Some(max) = config.max_frames {
                if parents.len() + 1 > max {
                    return Err(Error::InvariantViolation(format!(
                        "sub-walk nesting exceeded {max} frames"
                    )));
                }
            }
            frame = child;
            continue;
        }

        let Some(mut parent) = parents.pop() else {
            return Ok(frame.walk);
        };
        attach(&mut parent.walk, frame.walk, config.anchor_policy)?;
        frame = parent;
    }
}

fn attach<W: Weight>(walk: &mut Walk<W>, sub: Walk<W>, policy: AnchorPolicy) -> Result<()> {
    let anchor = sub.start();
    let outcome = walk.splice(sub);
    trace!(anchor, ?outcome, "splice");

    match (outcome, policy) {
        (Splice::Inserted | Splice::Trivial, _) | (_, AnchorPolicy::Skip) => Ok(()),
        (Splice::AnchorMissing, AnchorPolicy::Fail) => Err(Error::InvariantViolation(format!(
            "splice anchor {anchor} not found in walk"
        ))),
        (Splice::NotClosed, AnchorPolicy::Fail) => Err(Error::InvariantViolation(format!(
            "sub-walk from {anchor} does not return to it"
        ))),
    }
}

fn next_unused<W>(arcs: &[Edge<W>]) -> Option<usize> {
    arcs.iter().position(|a| !a.is_used())
}

/// Follow the first unused arc until stuck, marking both halves of each edge.
fn greedy_walk<W: Weight>(graph: &mut Graph<W>, start: VertexId) -> Result<Frame<W>> {
    let mut walk = Walk::new(start);
    let mut pending = Vec::new();
    let mut current = start;

    while let Some(idx) = next_unused(graph.arcs(current)) {
        let Edge { target, weight, .. } = graph.arcs(current)[idx];
        graph.arcs_mut(current)[idx].usage += 1;

        // A self-loop's twin sits in the same list; never match the arc itself.
        let exclude = (target == current).then_some(idx);
        let reverse = find_arc(graph.arcs(target), current, weight, exclude).ok_or_else(|| {
            Error::InvariantViolation(format!("no reverse arc {target} -> {current} for {weight:?}"))
        })?;
        graph.arcs_mut(target)[reverse].usage += 1;

        walk.push(weight, target);
        if next_unused(graph.arcs(current)).is_some() {
            pending.push(current);
        }
        current = target;
    }

    Ok(Frame { walk, pending })
}
