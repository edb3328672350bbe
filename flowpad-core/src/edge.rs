//! Directed connections between nodes.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::{DiagramError, DiagramResult, Node, NodeId};

/// Rendered path of an edge: a straight arrow between node centers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgePath {
    /// Center of the source node.
    pub start: Point,
    /// Center of the target node.
    pub end: Point,
    /// Where the label is drawn, if the edge has one.
    pub label_anchor: Option<Point>,
}

/// A directed, optionally labeled arrow from one node to another.
///
/// Endpoints are held by id; the owning [`crate::DiagramModel`] guarantees they exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    label: String,
    path: EdgePath,
}

impl Edge {
    /// Create an edge.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::SelfLoop`] if `source` and `target` are the same node.
    pub fn new(source: NodeId, target: NodeId, label: impl Into<String>) -> DiagramResult<Self> {
        if source == target {
            return Err(DiagramError::SelfLoop(source));
        }
        Ok(Self {
            source,
            target,
            label: label.into(),
            path: EdgePath::default(),
        })
    }

    /// Source node id.
    #[must_use]
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Target node id.
    #[must_use]
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Label, or `None` when empty.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        if self.label.is_empty() {
            None
        } else {
            Some(&self.label)
        }
    }

    /// Last computed path.
    #[must_use]
    pub fn path(&self) -> EdgePath {
        self.path
    }

    /// Whether `id` is either endpoint.
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source == *id || self.target == *id
    }

    /// Recompute the path from the current endpoint positions.
    ///
    /// Not triggered automatically: call after moving either endpoint.
    /// `source` and `target` must be this edge's endpoints.
    pub fn recompute_path(&mut self, source: &Node, target: &Node) -> EdgePath {
        debug_assert_eq!(source.id(), &self.source);
        debug_assert_eq!(target.id(), &self.target);
        let start = source.center();
        let end = target.center();
        self.path = EdgePath {
            start,
            end,
            label_anchor: self.label().map(|_| geometry::midpoint(start, end)),
        };
        self.path
    }
}
