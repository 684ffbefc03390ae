// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the state-machine graph.

use egui::{Pos2, Vec2};

/// Unique identifier for a node.
///
/// Ids are handed out monotonically by [`crate::graph::Graph`] and are
/// never reused within a session, so a `NodeId` stays valid for exactly
/// as long as the node it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// A state node in the diagram.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique instance id
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Whether the state carries a self-transition (rendered as a marked
    /// outline, never as an edge record)
    pub reflexive: bool,
    /// Current position in world space
    pub position: Pos2,
    /// Integration velocity, owned by the layout engine
    pub velocity: Vec2,
    /// Pinned position. While set, the layout engine snaps the node here
    /// instead of moving it, though it still exerts force on others.
    pub fixed: Option<Pos2>,
}

impl Node {
    /// Default display name for freshly created states
    pub const DEFAULT_NAME: &'static str = "State";

    /// Create a node at a position
    pub fn new(id: NodeId, position: Pos2) -> Self {
        Self {
            id,
            name: Self::DEFAULT_NAME.to_owned(),
            reflexive: false,
            position,
            velocity: Vec2::ZERO,
            fixed: None,
        }
    }

    /// Set the reflexive flag (builder style, for seeding)
    pub fn with_reflexive(mut self, reflexive: bool) -> Self {
        self.reflexive = reflexive;
        self
    }

    /// Set the display name (builder style)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether a drag gesture currently pins this node in place
    pub fn is_pinned(&self) -> bool {
        self.fixed.is_some()
    }
}
