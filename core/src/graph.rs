use crate::error::{Error, Result};
use crate::weight::Weight;

/// Vertex slot index, `0..capacity`.
pub type VertexId = usize;

/// One directed half of an undirected edge, stored in its source vertex's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<W> {
    pub target: VertexId,
    pub weight: W,
    /// Times this arc has been traversed by the current walk construction.
    pub usage: u32,
}

impl<W> Edge<W> {
    pub fn is_used(&self) -> bool {
        self.usage > 0
    }
}

/// An occupied vertex slot.
#[derive(Debug, Clone)]
struct Vertex<W> {
    arcs: Vec<Edge<W>>,
}

/// Weighted undirected multigraph over a fixed number of vertex slots.
///
/// Each undirected edge is stored as two arcs, one in each endpoint's list
/// (a self-loop puts both arcs in the same list). Slots may be unoccupied;
/// unoccupied slots have no arcs and nothing points at them.
#[derive(Debug, Clone)]
pub struct Graph<W> {
    slots: Vec<Option<Vertex<W>>>,
}

impl<W: Weight> Graph<W> {
    /// Graph with `capacity` unoccupied slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Bulk load from `(a, b, weight)` triples, creating endpoints on demand.
    pub fn from_edges<I>(capacity: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId, W)>,
    {
        let mut graph = Self::with_capacity(capacity);
        for (a, b, weight) in edges {
            graph.ensure_vertex(a)?;
            graph.ensure_vertex(b)?;
            graph.add_edge(a, b, weight)?;
        }
        Ok(graph)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn vertex_exists(&self, id: VertexId) -> bool {
        matches!(self.slots.get(id), Some(Some(_)))
    }

    pub fn add_vertex(&mut self, id: VertexId) -> Result<()> {
        let capacity = self.capacity();
        match self.slots.get_mut(id) {
            None => Err(Error::VertexOutOfRange { id, capacity }),
            Some(Some(_)) => Err(Error::VertexExists(id)),
            Some(slot) => {
                *slot = Some(Vertex { arcs: Vec::new() });
                Ok(())
            }
        }
    }

    fn ensure_vertex(&mut self, id: VertexId) -> Result<()> {
        if self.vertex_exists(id) {
            return Ok(());
        }
        self.add_vertex(id)
    }

    /// Remove a vertex and every arc pointing at it from its neighbors.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        self.check_vertex(id)?;
        self.slots[id] = None;
        for vertex in self.slots.iter_mut().flatten() {
            vertex.arcs.retain(|arc| arc.target != id);
        }
        Ok(())
    }

    /// Add an undirected edge `a -- b`.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: W) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.arc_list(a)?.push(Edge { target: b, weight, usage: 0 });
        self.arc_list(b)?.push(Edge { target: a, weight, usage: 0 });
        Ok(())
    }

    /// Remove one undirected edge `a -- b` with the given weight.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId, weight: W) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        let missing = Error::EdgeMissing { from: a, to: b };

        let fwd = find_arc(self.arcs(a), b, weight, None).ok_or_else(|| missing.clone())?;
        let rev = if a == b {
            find_arc(self.arcs(b), a, weight, Some(fwd))
        } else {
            find_arc(self.arcs(b), a, weight, None)
        }
        .ok_or(missing)?;

        // Remove the higher index first so a self-loop's second index stays valid.
        if a == b {
            let list = self.arc_list(a)?;
            list.remove(fwd.max(rev));
            list.remove(fwd.min(rev));
        } else {
            self.arc_list(a)?.remove(fwd);
            self.arc_list(b)?.remove(rev);
        }
        Ok(())
    }

    /// Occupied vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|_| id))
    }

    /// Arcs leaving `id`. Empty for unoccupied or out-of-range slots.
    pub fn arcs(&self, id: VertexId) -> &[Edge<W>] {
        match self.slots.get(id) {
            Some(Some(vertex)) => vertex.arcs.as_slice(),
            _ => &[],
        }
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.arcs(id).len()
    }

    pub fn vertex_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Undirected edge count (each edge contributes two arcs).
    pub fn edge_count(&self) -> usize {
        self.slots.iter().flatten().map(|v| v.arcs.len()).sum::<usize>() / 2
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let slots_mem = self.slots.len() * size_of::<Option<Vertex<W>>>();
        let arcs_mem: usize = self
            .slots
            .iter()
            .flatten()
            .map(|v| v.arcs.capacity() * size_of::<Edge<W>>())
            .sum();
        slots_mem + arcs_mem
    }

    fn check_vertex(&self, id: VertexId) -> Result<()> {
        if id >= self.capacity() {
            return Err(Error::VertexOutOfRange { id, capacity: self.capacity() });
        }
        if !self.vertex_exists(id) {
            return Err(Error::VertexMissing(id));
        }
        Ok(())
    }

    fn arc_list(&mut self, id: VertexId) -> Result<&mut Vec<Edge<W>>> {
        match self.slots.get_mut(id) {
            Some(Some(vertex)) => Ok(&mut vertex.arcs),
            _ => Err(Error::VertexMissing(id)),
        }
    }

    pub(crate) fn arcs_mut(&mut self, id: VertexId) -> &mut [Edge<W>] {
        match self.slots.get_mut(id) {
            Some(Some(vertex)) => vertex.arcs.as_mut_slice(),
            _ => &mut [],
        }
    }
}

/// Index of an arc to `target` with `weight`, skipping `exclude`.
///
/// Unused arcs are preferred so that parallel edges of equal weight are
/// consumed one at a time.
pub(crate) fn find_arc<W: Weight>(
    arcs: &[Edge<W>],
    target: VertexId,
    weight: W,
    exclude: Option<usize>,
) -> Option<usize> {
    let mut fallback = None;
    for (idx, arc) in arcs.iter().enumerate() {
        if Some(idx) == exclude || arc.target != target || arc.weight != weight {
            continue;
        }
        if !arc.is_used() {
            return Some(idx);
        }
        fallback.get_or_insert(idx);
    }
    fallback
}
