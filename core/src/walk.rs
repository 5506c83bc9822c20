use crate::graph::VertexId;

/// One traversed arc: the weight paid and the vertex arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<W> {
    pub weight: W,
    pub vertex: VertexId,
}

/// Element of the flat alternating `vertex, weight, vertex, ...` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkElement<W> {
    Vertex(VertexId),
    Weight(W),
}

/// A walk through the graph: a start vertex followed by traversed arcs.
///
/// The flat form has `2 * steps + 1` elements, vertices at even indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk<W> {
    start: VertexId,
    steps: Vec<Step<W>>,
}

/// Outcome of [`Walk::splice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    /// Sub-walk inserted at the anchor vertex.
    Inserted,
    /// Sub-walk had no arcs; nothing to do.
    Trivial,
    /// Sub-walk start does not occur in this walk.
    AnchorMissing,
    /// Sub-walk does not return to its start, so inserting it would break the walk.
    NotClosed,
}

impl<W: Copy> Walk<W> {
    pub fn new(start: VertexId) -> Self {
        Self { start, steps: Vec::new() }
    }

    pub fn push(&mut self, weight: W, vertex: VertexId) {
        self.steps.push(Step { weight, vertex });
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.steps.last().map_or(self.start, |s| s.vertex)
    }

    pub fn steps(&self) -> &[Step<W>] {
        &self.steps
    }

    /// Number of arcs traversed.
    pub fn arc_count(&self) -> usize {
        self.steps.len()
    }

    /// Length of the flat alternating form.
    pub fn len(&self) -> usize {
        2 * self.steps.len() + 1
    }

    /// A walk always holds its start vertex.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_closed(&self) -> bool {
        self.start == self.end()
    }

    /// Visited vertices in order, start included.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        std::iter::once(self.start).chain(self.steps.iter().map(|s| s.vertex))
    }

    /// Sum of the traversed weights.
    pub fn total_weight(&self) -> W
    where
        W: crate::weight::Weight,
    {
        self.steps
            .iter()
            .fold(W::ZERO, |acc, s| acc.saturating_add(s.weight))
    }

    pub fn to_sequence(&self) -> Vec<WalkElement<W>> {
        let mut seq = Vec::with_capacity(self.len());
        seq.push(WalkElement::Vertex(self.start));
        for step in &self.steps {
            seq.push(WalkElement::Weight(step.weight));
            seq.push(WalkElement::Vertex(step.vertex));
        }
        seq
    }

    /// Insert the closed walk `sub` at the last occurrence of its start vertex.
    ///
    /// The anchor vertex is kept once: the walk goes around `sub` and then
    /// carries on with whatever followed the anchor. A sub-walk without arcs
    /// is a no-op. On `AnchorMissing` or `NotClosed` this walk is unchanged.
    pub fn splice(&mut self, sub: Walk<W>) -> Splice {
        if sub.steps.is_empty() {
            return Splice::Trivial;
        }
        if !sub.is_closed() {
            return Splice::NotClosed;
        }
        let Some(anchor) = self.last_position_of(sub.start) else {
            return Splice::AnchorMissing;
        };
        // Position p (0 = start) is followed by steps[p..].
        let tail = self.steps.split_off(anchor);
        self.steps.extend(sub.steps);
        self.steps.extend(tail);
        Splice::Inserted
    }

    fn last_position_of(&self, vertex: VertexId) -> Option<usize> {
        self.steps
            .iter()
            .rposition(|s| s.vertex == vertex)
            .map(|idx| idx + 1)
            .or((self.start == vertex).then_some(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: VertexId, steps: &[(i32, VertexId)]) -> Walk<i32> {
        let mut w = Walk::new(start);
        for &(weight, vertex) in steps {
            w.push(weight, vertex);
        }
        w
    }

    fn flat(w: &Walk<i32>) -> Vec<i64> {
        w.to_sequence()
            .into_iter()
            .map(|e| match e {
                WalkElement::Vertex(v) => v as i64,
                WalkElement::Weight(x) => x as i64,
            })
            .collect()
    }

    #[test]
    fn test_single_vertex_walk() {
        let w: Walk<i32> = Walk::new(4);
        assert_eq!(w.len(), 1);
        assert_eq!(w.end(), 4);
        assert!(w.is_closed());
        assert_eq!(w.to_sequence(), vec![WalkElement::Vertex(4)]);
    }

    #[test]
    fn test_sequence_alternates() {
        let w = walk(0, &[(1, 1), (1, 2)]);
        assert_eq!(flat(&w), vec![0, 1, 1, 1, 2]);
        assert_eq!(w.len(), 5);
        assert!(!w.is_closed());
    }

    #[test]
    fn test_splice_in_middle() {
        // 0 -a- 1 -b- 2, loop at 1: 1 -c- 3 -d- 1
        let mut main = walk(0, &[(10, 1), (20, 2)]);
        let sub = walk(1, &[(30, 3), (40, 1)]);
        assert_eq!(main.splice(sub), Splice::Inserted);
        assert_eq!(flat(&main), vec![0, 10, 1, 30, 3, 40, 1, 20, 2]);
    }

    #[test]
    fn test_splice_uses_last_occurrence() {
        let mut main = walk(1, &[(1, 2), (2, 1), (3, 4)]);
        let sub = walk(1, &[(9, 5), (9, 1)]);
        assert_eq!(main.splice(sub), Splice::Inserted);
        assert_eq!(
            main.vertices().collect::<Vec<_>>(),
            vec![1, 2, 1, 5, 1, 4]
        );
    }

    #[test]
    fn test_splice_at_start() {
        let mut main = walk(0, &[(1, 1)]);
        let sub = walk(0, &[(5, 2), (5, 0)]);
        assert_eq!(main.splice(sub), Splice::Inserted);
        assert_eq!(main.vertices().collect::<Vec<_>>(), vec![0, 2, 0, 1]);
    }

    #[test]
    fn test_splice_at_end() {
        let mut main = walk(0, &[(1, 1)]);
        let sub = walk(1, &[(5, 2), (5, 1)]);
        main.splice(sub);
        assert_eq!(main.vertices().collect::<Vec<_>>(), vec![0, 1, 2, 1]);
        assert_eq!(main.end(), 1);
    }

    #[test]
    fn test_splice_trivial_is_noop() {
        let mut main = walk(0, &[(1, 1)]);
        let before = main.clone();
        assert_eq!(main.splice(Walk::new(1)), Splice::Trivial);
        assert_eq!(main, before);
    }

    #[test]
    fn test_splice_anchor_missing() {
        let mut main = walk(0, &[(1, 1)]);
        let before = main.clone();
        assert_eq!(main.splice(walk(7, &[(1, 8), (1, 7)])), Splice::AnchorMissing);
        assert_eq!(main, before);
    }

    #[test]
    fn test_splice_open_subwalk_rejected() {
        let mut main = walk(0, &[(1, 1)]);
        assert_eq!(main.splice(walk(1, &[(1, 2)])), Splice::NotClosed);
        assert_eq!(main.len(), 3);
    }

    #[test]
    fn test_total_weight() {
        assert_eq!(walk(0, &[(3, 1), (4, 2)]).total_weight(), 7);
        assert_eq!(Walk::<i32>::new(0).total_weight(), 0);
    }
}
