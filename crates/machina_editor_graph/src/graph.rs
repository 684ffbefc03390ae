// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store: the authoritative node and edge collections.

use crate::edge::{Edge, EdgeKey};
use crate::node::{Node, NodeId};
use egui::Pos2;
use indexmap::IndexMap;

/// Error when creating an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    /// One of the endpoints is not in the store
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Self-transitions are expressed via [`Node::reflexive`], never as
    /// an edge record
    #[error("self-loops are not representable as edges")]
    SelfLoop,
}

/// Owns the node and edge tables and enforces their structural
/// invariants: at most one edge record per unordered node pair (the edge
/// table is keyed by [`EdgeKey`]), and no edge ever outlives either of
/// its endpoints.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeKey, Edge>,
    next_id: u64,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id and add a node at `position`.
    ///
    /// Ids are strictly increasing across the session and never reused.
    pub fn add_node(&mut self, position: Pos2) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, position));
        tracing::debug!(id = id.0, "added node");
        id
    }

    /// Insert a pre-built node, e.g. when seeding an initial graph.
    ///
    /// The id allocator is bumped past the inserted id so later
    /// [`Graph::add_node`] calls cannot collide with it.
    pub fn insert(&mut self, node: Node) {
        self.next_id = self.next_id.max(node.id.0 + 1);
        self.nodes.insert(node.id, node);
    }

    /// Remove a node and, atomically, every edge touching it.
    ///
    /// Silent no-op when the node is absent.
    pub fn remove_node(&mut self, id: NodeId) {
        if self.nodes.swap_remove(&id).is_none() {
            return;
        }
        self.edges.retain(|_, edge| !edge.involves_node(id));
        tracing::debug!(id = id.0, "removed node and incident edges");
        self.debug_assert_invariants();
    }

    /// Record a directed transition between two existing nodes.
    ///
    /// The pair is canonicalized by ascending id. When a record for the
    /// pair already exists, the missing direction flag is merged into it
    /// instead of creating a duplicate. The arrow points at `b` when
    /// `toward_b` is true, at `a` otherwise.
    pub fn upsert_edge(&mut self, a: NodeId, b: NodeId, toward_b: bool) -> Result<EdgeKey, EdgeError> {
        if !self.nodes.contains_key(&a) {
            return Err(EdgeError::NodeNotFound(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(EdgeError::NodeNotFound(b));
        }
        let key = EdgeKey::new(a, b).ok_or(EdgeError::SelfLoop)?;
        let edge = self.edges.entry(key).or_insert_with(|| Edge::new(key));
        let head = if toward_b { b } else { a };
        if head == key.target() {
            edge.right = true;
        } else {
            edge.left = true;
        }
        tracing::debug!(
            source = key.source().0,
            target = key.target().0,
            left = edge.left,
            right = edge.right,
            "upserted edge"
        );
        self.debug_assert_invariants();
        Ok(key)
    }

    /// Remove an edge record outright, both directions included.
    ///
    /// Silent no-op when the edge is absent.
    pub fn remove_edge(&mut self, key: EdgeKey) {
        if self.edges.swap_remove(&key).is_some() {
            tracing::debug!(source = key.source().0, target = key.target().0, "removed edge");
        }
    }

    /// Set the reflexive flag on a node. No-op when absent.
    pub fn set_reflexive(&mut self, id: NodeId, reflexive: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.reflexive = reflexive;
        }
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by id
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All nodes, mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// All node ids
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get an edge by its canonical key
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    /// Get a mutable edge by its canonical key
    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut Edge> {
        self.edges.get_mut(&key)
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records (a bidirectional pair counts once)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[cfg(debug_assertions)]
    fn debug_assert_invariants(&self) {
        for edge in self.edges.values() {
            debug_assert!(
                self.nodes.contains_key(&edge.key.source()) && self.nodes.contains_key(&edge.key.target()),
                "edge endpoints must be live nodes"
            );
            debug_assert!(edge.left || edge.right, "edge must carry at least one direction");
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_assert_invariants(&self) {}
}
