// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions: one record per unordered node pair, carrying up to
//! two opposite-direction arrows.

use crate::node::NodeId;
use egui::Pos2;

/// Canonical identifier for the edge between two distinct nodes.
///
/// The pair is stored in ascending id order, so the same two nodes always
/// produce the same key regardless of which end a gesture started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    source: NodeId,
    target: NodeId,
}

impl EdgeKey {
    /// Canonicalize a node pair. Returns `None` for a self-pair, which
    /// can never identify an edge.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { source: a, target: b }),
            std::cmp::Ordering::Greater => Some(Self { source: b, target: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lower-id endpoint
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The higher-id endpoint
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Check if this key involves a specific node
    pub fn involves(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Rendered endpoints of an edge, offset inward from the node centers so
/// arrows terminate at node borders. Recomputed by the layout engine on
/// every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgePath {
    /// Padded endpoint on the source side
    pub source: Pos2,
    /// Padded endpoint on the target side
    pub target: Pos2,
}

/// An edge record between two states.
///
/// `left` and `right` independently record the two possible arrow
/// directions, so a bidirectional transition is still a single record.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Canonical endpoint pair
    pub key: EdgeKey,
    /// Arrow pointing target -> source
    pub left: bool,
    /// Arrow pointing source -> target
    pub right: bool,
    /// Current rendered endpoints
    pub path: EdgePath,
}

impl Edge {
    /// Create an edge with no direction flags set yet
    pub fn new(key: EdgeKey) -> Self {
        Self {
            key,
            left: false,
            right: false,
            path: EdgePath::default(),
        }
    }

    /// Check if this edge involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.key.involves(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_canonical_order() {
        let key = EdgeKey::new(NodeId(7), NodeId(3)).unwrap();
        assert_eq!(key.source(), NodeId(3));
        assert_eq!(key.target(), NodeId(7));
        assert_eq!(key, EdgeKey::new(NodeId(3), NodeId(7)).unwrap());
    }

    #[test]
    fn test_self_pair_has_no_key() {
        assert!(EdgeKey::new(NodeId(4), NodeId(4)).is_none());
    }
}
