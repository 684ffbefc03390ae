// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gesture state machine types.
//!
//! The editor's pointer interaction is an explicit tagged mode rather
//! than a pile of independent scratch flags, so impossible combinations
//! (dragging while drawing an edge, say) are unrepresentable. The
//! transitions themselves live on [`crate::editor::EditorState`], which
//! owns the stores the gestures mutate.

use crate::edge::EdgeKey;
use crate::node::NodeId;
use egui::Pos2;

/// What the host classified the pointer event target as, with hit
/// testing done in the render adapter's world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// On a node glyph
    Node(NodeId),
    /// On an edge path
    Edge(EdgeKey),
    /// On empty canvas
    Background,
}

/// The exclusive gesture in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress
    #[default]
    Idle,
    /// A tentative edge is being dragged out of a node; `cursor` is the
    /// free end of the visual-only drag line
    DrawingEdge {
        /// Node the gesture started on
        from: NodeId,
        /// Current pointer position
        cursor: Pos2,
    },
    /// A node is being free-dragged with the modifier key held; its
    /// position is pinned until release
    DraggingNode {
        /// Node being dragged
        node: NodeId,
    },
}

impl Gesture {
    /// Whether no gesture is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}
