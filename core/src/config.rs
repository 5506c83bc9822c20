use crate::graph::VertexId;

/// What to do when a sub-walk cannot be spliced into the walk being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorPolicy {
    /// Report an `InvariantViolation`.
    #[default]
    Fail,
    /// Drop the sub-walk and keep going. Its arcs stay marked as used.
    Skip,
}

/// Tunables for an Eulerian solve.
#[derive(Debug, Clone, Default)]
pub struct EulerConfig {
    pub anchor_policy: AnchorPolicy,
    /// Caller-chosen start vertex. `None` picks one from the odd-vertex scan.
    pub start: Option<VertexId>,
    /// Upper bound on simultaneously open sub-walk frames, root included.
    /// `None` = unbounded. `Some(0)` is rejected as `InvalidConfig`.
    pub max_frames: Option<usize>,
}

impl EulerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: VertexId) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EulerConfig::default();
        assert_eq!(cfg.anchor_policy, AnchorPolicy::Fail);
        assert!(cfg.start.is_none());
        assert!(cfg.max_frames.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let cfg = EulerConfig::new()
            .with_anchor_policy(AnchorPolicy::Skip)
            .with_start(3)
            .with_max_frames(16);
        assert_eq!(cfg.anchor_policy, AnchorPolicy::Skip);
        assert_eq!(cfg.start, Some(3));
        assert_eq!(cfg.max_frames, Some(16));
    }
}
