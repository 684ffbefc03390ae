// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection model: at most one selected node or one selected edge.

use crate::edge::EdgeKey;
use crate::node::NodeId;

/// A selectable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    /// A node is selected
    Node(NodeId),
    /// An edge record is selected
    Edge(EdgeKey),
}

/// Tracks the current selection.
///
/// Selecting an entity of one kind clears the other kind; selecting the
/// same entity again deselects it (click-to-deselect).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<Selected>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle-select a node
    pub fn select_node(&mut self, id: NodeId) {
        self.current = match self.current {
            Some(Selected::Node(current)) if current == id => None,
            _ => Some(Selected::Node(id)),
        };
    }

    /// Toggle-select an edge
    pub fn select_edge(&mut self, key: EdgeKey) {
        self.current = match self.current {
            Some(Selected::Edge(current)) if current == key => None,
            _ => Some(Selected::Edge(key)),
        };
    }

    /// Unconditionally empty the selection
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The selected entity, if any
    pub fn selected(&self) -> Option<Selected> {
        self.current
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Predicate for render highlighting
    pub fn is_node_selected(&self, id: NodeId) -> bool {
        self.current == Some(Selected::Node(id))
    }

    /// Predicate for render highlighting
    pub fn is_edge_selected(&self, key: EdgeKey) -> bool {
        self.current == Some(Selected::Edge(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: u64, b: u64) -> EdgeKey {
        EdgeKey::new(NodeId(a), NodeId(b)).unwrap()
    }

    #[test]
    fn test_reselect_toggles_off() {
        let mut selection = Selection::new();
        selection.select_node(NodeId(1));
        assert!(selection.is_node_selected(NodeId(1)));
        selection.select_node(NodeId(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selecting_another_node_replaces() {
        let mut selection = Selection::new();
        selection.select_node(NodeId(1));
        selection.select_node(NodeId(2));
        assert!(!selection.is_node_selected(NodeId(1)));
        assert!(selection.is_node_selected(NodeId(2)));
    }

    #[test]
    fn test_kinds_are_mutually_exclusive() {
        let mut selection = Selection::new();
        selection.select_node(NodeId(1));
        selection.select_edge(key(1, 2));
        assert!(!selection.is_node_selected(NodeId(1)));
        assert!(selection.is_edge_selected(key(1, 2)));
        selection.select_node(NodeId(1));
        assert!(selection.is_node_selected(NodeId(1)));
        assert!(!selection.is_edge_selected(key(1, 2)));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.select_edge(key(0, 3));
        selection.clear();
        assert!(selection.is_empty());
    }
}
