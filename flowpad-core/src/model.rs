//! Diagram model - the single source of truth for nodes and edges.

use indexmap::IndexMap;

use crate::node::{DEFAULT_FILL, DEFAULT_TEXT};
use crate::{DiagramError, DiagramResult, Edge, EdgePath, Node, NodeId, ShapeKind};

/// All nodes and edges of one diagram.
///
/// Nodes keep their insertion order, which drives both export order and the
/// hit-testing tie-break. Edges keep their creation order.
///
/// A model is only built through its own operations, so every edge endpoint
/// exists and no id is handed out twice.
#[derive(Debug, Clone, Default)]
pub struct DiagramModel {
    /// All nodes, indexed by id, in creation order.
    nodes: IndexMap<NodeId, Node>,
    /// All edges in creation order.
    edges: Vec<Edge>,
    /// Number of nodes ever created. Never decreases, so ids are never reused.
    created: usize,
}

impl DiagramModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next created node will receive.
    #[must_use]
    pub fn next_id(&self) -> NodeId {
        NodeId::from_sequence(self.created + 1)
    }

    /// Create a node with the default text and fill and return its id.
    pub fn create_node(&mut self, shape: ShapeKind, x: f32, y: f32) -> NodeId {
        let id = self.next_id();
        self.created += 1;
        let node = Node::new(id.clone(), x, y, DEFAULT_TEXT, shape, DEFAULT_FILL);
        self.nodes.insert(id.clone(), node);
        tracing::debug!("Created {shape} node {id} at ({x}, {y})");
        id
    }

    /// Create a node from a shape name.
    ///
    /// The name is validated before an id is allocated, so a failed call
    /// leaves the model and its id counter untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidShape`] if the name is not recognised.
    pub fn create_node_named(&mut self, shape: &str, x: f32, y: f32) -> DiagramResult<NodeId> {
        let shape = shape.parse()?;
        Ok(self.create_node(shape, x, y))
    }

    /// Connect two nodes and return the index of the new edge.
    ///
    /// The edge path is computed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::SelfLoop`] if `source == target`, or
    /// [`DiagramError::NodeNotFound`] if either endpoint is not in the model.
    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        label: impl Into<String>,
    ) -> DiagramResult<usize> {
        let mut edge = Edge::new(source.clone(), target.clone(), label)?;
        let (src, dst) = self.endpoints(&edge)?;
        edge.recompute_path(src, dst);
        self.edges.push(edge);
        tracing::debug!("Connected {source} -> {target}");
        Ok(self.edges.len() - 1)
    }

    fn endpoints(&self, edge: &Edge) -> DiagramResult<(&Node, &Node)> {
        let src = self
            .nodes
            .get(edge.source())
            .ok_or_else(|| DiagramError::NodeNotFound(edge.source().clone()))?;
        let dst = self
            .nodes
            .get(edge.target())
            .ok_or_else(|| DiagramError::NodeNotFound(edge.target().clone()))?;
        Ok((src, dst))
    }

    /// Recompute every edge attached to `id`.
    ///
    /// Returns the index and new path of each updated edge.
    pub fn refresh_edges_for(&mut self, id: &NodeId) -> Vec<(usize, EdgePath)> {
        let nodes = &self.nodes;
        self.edges
            .iter_mut()
            .enumerate()
            .filter(|(_, edge)| edge.touches(id))
            .filter_map(|(index, edge)| {
                let src = nodes.get(edge.source())?;
                let dst = nodes.get(edge.target())?;
                Some((index, edge.recompute_path(src, dst)))
            })
            .collect()
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node by id.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges in creation order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Find the node at the given canvas coordinates.
    ///
    /// When nodes overlap, the earliest created one wins.
    #[must_use]
    pub fn node_at(&self, x: f32, y: f32) -> Option<&NodeId> {
        self.nodes
            .values()
            .find(|node| node.hit_test(x, y))
            .map(Node::id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the model has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes and edges. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
