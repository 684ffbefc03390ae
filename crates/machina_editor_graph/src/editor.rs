// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor controller: one owner for the graph, selection, gesture state,
//! and layout engine.
//!
//! The host calls the event-intake methods synchronously from its input
//! handling and [`EditorState::tick`] once per animation frame, all on
//! one thread, so a tick never interleaves with an in-progress event.

use crate::gesture::{Gesture, PointerTarget};
use crate::graph::Graph;
use crate::layout::LayoutEngine;
use crate::node::{Node, NodeId};
use crate::selection::{Selected, Selection};
use egui::{pos2, Pos2, Rect};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Host-facing configuration for an editor session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Rectangle in which the add-node command spawns states
    pub spawn_area: Rect,
    /// Canvas center the layout pulls toward
    pub center: Pos2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            spawn_area: Rect::from_min_max(pos2(50.0, 50.0), pos2(1350.0, 450.0)),
            center: pos2(700.0, 290.0),
        }
    }
}

/// The complete interactive editor state.
pub struct EditorState {
    graph: Graph,
    selection: Selection,
    layout: LayoutEngine,
    gesture: Gesture,
    modifier_held: bool,
    config: EditorConfig,
    rng: SmallRng,
}

impl EditorState {
    /// Create an empty editor session
    pub fn new(config: EditorConfig) -> Self {
        Self::build(config, SmallRng::from_os_rng())
    }

    /// Create a session with a deterministic spawn-position RNG
    pub fn with_seed(config: EditorConfig, seed: u64) -> Self {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: EditorConfig, rng: SmallRng) -> Self {
        Self {
            graph: Graph::new(),
            selection: Selection::new(),
            layout: LayoutEngine::new(config.center),
            gesture: Gesture::Idle,
            modifier_held: false,
            config,
            rng,
        }
    }

    /// Seed the canonical starter diagram: two reflexive states joined
    /// by a single right-directed transition.
    pub fn seed_demo(&mut self) {
        let center = self.config.center;
        self.graph
            .insert(Node::new(NodeId(0), center - egui::vec2(100.0, 0.0)).with_reflexive(true));
        self.graph
            .insert(Node::new(NodeId(1), center + egui::vec2(100.0, 0.0)).with_reflexive(true));
        let _ = self.graph.upsert_edge(NodeId(0), NodeId(1), true);
        self.layout.reheat();
    }

    /// Advance the layout one animation frame
    pub fn tick(&mut self) {
        self.layout.tick(&mut self.graph);
    }

    /// Pointer pressed on a classified target at a world-space position.
    pub fn pointer_down(&mut self, target: PointerTarget, pos: Pos2) {
        match target {
            PointerTarget::Node(id) => {
                if self.graph.node(id).is_none() {
                    return;
                }
                if self.modifier_held {
                    // Modifier mode: free-drag the node. Pin it where it
                    // stands and keep the layout hot for the duration.
                    if let Some(node) = self.graph.node_mut(id) {
                        node.fixed = Some(node.position);
                    }
                    self.gesture = Gesture::DraggingNode { node: id };
                    self.layout.begin_drag();
                    tracing::trace!(node = id.0, "begin node drag");
                } else {
                    self.selection.select_node(id);
                    self.gesture = Gesture::DrawingEdge { from: id, cursor: pos };
                    tracing::trace!(node = id.0, "begin edge draw");
                }
            }
            PointerTarget::Edge(key) => {
                // A held modifier suppresses edge selection entirely so
                // the pointer passes through to the canvas.
                if self.modifier_held || self.graph.edge(key).is_none() {
                    return;
                }
                self.selection.select_edge(key);
            }
            PointerTarget::Background => {}
        }
    }

    /// Pointer moved to a world-space position.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        match &mut self.gesture {
            Gesture::DrawingEdge { cursor, .. } => *cursor = pos,
            Gesture::DraggingNode { node } => {
                let id = *node;
                if let Some(n) = self.graph.node_mut(id) {
                    n.fixed = Some(pos);
                    n.position = pos;
                }
            }
            Gesture::Idle => {}
        }
    }

    /// Pointer released over a classified target.
    ///
    /// Always resolves or discards the gesture in progress; there is no
    /// separate cancel.
    pub fn pointer_up(&mut self, target: PointerTarget, _pos: Pos2) {
        match std::mem::take(&mut self.gesture) {
            Gesture::DrawingEdge { from, .. } => {
                if let PointerTarget::Node(up) = target {
                    // Releasing over the origin node discards the draw.
                    if up != from {
                        if let Ok(key) = self.graph.upsert_edge(from, up, true) {
                            self.selection.clear();
                            self.selection.select_edge(key);
                            self.layout.reheat();
                            tracing::trace!(from = from.0, to = up.0, "edge draw completed");
                        }
                    }
                }
            }
            Gesture::DraggingNode { node } => {
                if let Some(n) = self.graph.node_mut(node) {
                    n.fixed = None;
                }
                self.layout.end_drag();
                tracing::trace!(node = node.0, "end node drag");
            }
            Gesture::Idle => {}
        }
    }

    /// Modifier key pressed. Key-repeat events while held are ignored.
    pub fn modifier_down(&mut self) {
        if self.modifier_held {
            return;
        }
        self.modifier_held = true;
    }

    /// Modifier key released; node free-drag mode detaches.
    pub fn modifier_up(&mut self) {
        self.modifier_held = false;
    }

    /// Whether node free-drag mode is currently enabled
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Add a new state at a pseudo-random position inside the spawn
    /// area. Ignored while a gesture is in progress.
    pub fn add_node_command(&mut self) -> Option<NodeId> {
        if !self.gesture.is_idle() {
            return None;
        }
        let area = self.config.spawn_area;
        let x = self.rng.random_range(area.min.x..area.max.x);
        let y = self.rng.random_range(area.min.y..area.max.y);
        let id = self.graph.add_node(pos2(x, y));
        self.layout.reheat();
        Some(id)
    }

    /// Remove whatever is selected, clearing the selection. No-op when
    /// nothing is selected.
    pub fn remove_selected_command(&mut self) {
        match self.selection.selected() {
            Some(Selected::Node(id)) => {
                self.graph.remove_node(id);
                self.layout.reheat();
            }
            Some(Selected::Edge(key)) => {
                self.graph.remove_edge(key);
                self.layout.reheat();
            }
            None => return,
        }
        self.selection.clear();
    }

    /// Set the reflexive flag on a node
    pub fn set_reflexive(&mut self, id: NodeId, reflexive: bool) {
        self.graph.set_reflexive(id, reflexive);
    }

    /// The tentative edge line of an in-progress edge draw, anchored at
    /// the origin node's current position. Visual only.
    pub fn tentative_edge(&self) -> Option<(Pos2, Pos2)> {
        if let Gesture::DrawingEdge { from, cursor } = self.gesture {
            let node = self.graph.node(from)?;
            Some((node.position, cursor))
        } else {
            None
        }
    }

    /// Read access to the graph for the render adapter
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Read access to the selection for highlighting
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Read access to the layout engine
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Mutable layout access, for host-side tuning
    pub fn layout_mut(&mut self) -> &mut LayoutEngine {
        &mut self.layout
    }

    /// The session configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The gesture currently in progress
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeKey;

    fn seeded_editor() -> EditorState {
        let mut editor = EditorState::with_seed(EditorConfig::default(), 7);
        editor.seed_demo();
        editor
    }

    fn demo_key() -> EdgeKey {
        EdgeKey::new(NodeId(0), NodeId(1)).unwrap()
    }

    #[test]
    fn test_seed_demo_shape() {
        let editor = seeded_editor();
        assert_eq!(editor.graph().node_count(), 2);
        let edge = editor.graph().edge(demo_key()).unwrap();
        assert!(edge.right && !edge.left);
        assert!(editor.graph().node(NodeId(0)).unwrap().reflexive);
    }

    #[test]
    fn test_drag_create_reverse_edge_merges() {
        let mut editor = seeded_editor();
        let start = editor.graph().node(NodeId(1)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(1)), start);
        editor.pointer_moved(pos2(0.0, 0.0));
        editor.pointer_up(PointerTarget::Node(NodeId(0)), pos2(0.0, 0.0));

        assert_eq!(editor.graph().edge_count(), 1);
        let edge = editor.graph().edge(demo_key()).unwrap();
        assert!(edge.left && edge.right);
        assert!(editor.selection().is_edge_selected(demo_key()));
        assert!(editor.gesture().is_idle());
    }

    #[test]
    fn test_release_on_background_discards_draw() {
        let mut editor = seeded_editor();
        let start = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), start);
        assert!(editor.tentative_edge().is_some());
        editor.pointer_up(PointerTarget::Background, pos2(900.0, 900.0));

        assert_eq!(editor.graph().edge_count(), 1);
        assert!(editor.tentative_edge().is_none());
        // The mousedown toggle-selection sticks even though the draw
        // was discarded.
        assert!(editor.selection().is_node_selected(NodeId(0)));
    }

    #[test]
    fn test_release_on_origin_discards_draw() {
        let mut editor = seeded_editor();
        let start = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), start);
        editor.pointer_up(PointerTarget::Node(NodeId(0)), start);
        assert_eq!(editor.graph().edge_count(), 1);
        assert!(editor.gesture().is_idle());
    }

    #[test]
    fn test_reclick_toggles_node_selection_off() {
        let mut editor = seeded_editor();
        let pos = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), pos);
        editor.pointer_up(PointerTarget::Node(NodeId(0)), pos);
        assert!(editor.selection().is_node_selected(NodeId(0)));
        editor.pointer_down(PointerTarget::Node(NodeId(0)), pos);
        editor.pointer_up(PointerTarget::Node(NodeId(0)), pos);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_tentative_edge_tracks_cursor() {
        let mut editor = seeded_editor();
        let anchor = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), anchor);
        editor.pointer_moved(pos2(42.0, 17.0));
        let (from, to) = editor.tentative_edge().unwrap();
        assert_eq!(from, anchor);
        assert_eq!(to, pos2(42.0, 17.0));
    }

    #[test]
    fn test_add_node_spawns_in_area_with_fresh_id() {
        let mut editor = seeded_editor();
        let id = editor.add_node_command().unwrap();
        assert!(id > NodeId(1), "seeded ids 0 and 1 must not be reused");
        let node = editor.graph().node(id).unwrap();
        assert!(editor.config().spawn_area.contains(node.position));
        assert!(editor.selection().is_empty(), "add-node must not change selection");
    }

    #[test]
    fn test_add_node_ignored_mid_gesture() {
        let mut editor = seeded_editor();
        let pos = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), pos);
        assert!(editor.add_node_command().is_none());
        editor.pointer_up(PointerTarget::Background, pos);
        assert!(editor.add_node_command().is_some());
    }

    #[test]
    fn test_remove_selected_node_cascades() {
        let mut editor = seeded_editor();
        let pos = editor.graph().node(NodeId(0)).unwrap().position;
        editor.pointer_down(PointerTarget::Node(NodeId(0)), pos);
        editor.pointer_up(PointerTarget::Node(NodeId(0)), pos);
        editor.remove_selected_command();

        assert!(editor.graph().node(NodeId(0)).is_none());
        assert_eq!(editor.graph().edge_count(), 0);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_remove_selected_edge() {
        let mut editor = seeded_editor();
        editor.pointer_down(PointerTarget::Edge(demo_key()), pos2(0.0, 0.0));
        assert!(editor.selection().is_edge_selected(demo_key()));
        editor.remove_selected_command();
        assert_eq!(editor.graph().edge_count(), 0);
        assert!(editor.selection().is_empty());
        // Nothing selected: a second command is a no-op.
        editor.remove_selected_command();
        assert_eq!(editor.graph().node_count(), 2);
    }

    #[test]
    fn test_modifier_drag_pins_then_releases() {
        let mut editor = seeded_editor();
        let start = editor.graph().node(NodeId(0)).unwrap().position;
        editor.modifier_down();
        editor.pointer_down(PointerTarget::Node(NodeId(0)), start);
        assert!(editor.graph().node(NodeId(0)).unwrap().is_pinned());

        let dest = pos2(321.0, 123.0);
        editor.pointer_moved(dest);
        assert_eq!(editor.graph().node(NodeId(0)).unwrap().position, dest);

        editor.pointer_up(PointerTarget::Background, dest);
        let node = editor.graph().node(NodeId(0)).unwrap();
        assert_eq!(node.position, dest);
        assert!(!node.is_pinned());
        // Selection untouched by a modifier drag.
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_modifier_drag_survives_modifier_release() {
        // Mode is decided at pointer-down time, not re-evaluated.
        let mut editor = seeded_editor();
        let start = editor.graph().node(NodeId(0)).unwrap().position;
        editor.modifier_down();
        editor.pointer_down(PointerTarget::Node(NodeId(0)), start);
        editor.modifier_up();
        editor.pointer_moved(pos2(10.0, 10.0));
        assert!(editor.graph().node(NodeId(0)).unwrap().is_pinned());
        editor.pointer_up(PointerTarget::Background, pos2(10.0, 10.0));
        assert!(!editor.graph().node(NodeId(0)).unwrap().is_pinned());
    }

    #[test]
    fn test_modifier_suppresses_edge_selection_only() {
        let mut editor = seeded_editor();
        editor.modifier_down();
        editor.modifier_down(); // key repeat, ignored
        editor.pointer_down(PointerTarget::Edge(demo_key()), pos2(0.0, 0.0));
        assert!(editor.selection().is_empty());

        editor.modifier_up();
        assert!(!editor.modifier_held());
        editor.pointer_down(PointerTarget::Edge(demo_key()), pos2(0.0, 0.0));
        assert!(editor.selection().is_edge_selected(demo_key()));
    }

    #[test]
    fn test_drag_raises_heat_and_release_decays() {
        let mut editor = seeded_editor();
        // Cool the layout down first.
        for _ in 0..2000 {
            editor.tick();
        }
        assert!(editor.layout().is_settled());

        let pos = editor.graph().node(NodeId(0)).unwrap().position;
        editor.modifier_down();
        editor.pointer_down(PointerTarget::Node(NodeId(0)), pos);
        assert!(editor.layout().alpha() >= 0.3);

        editor.pointer_up(PointerTarget::Background, pos);
        for _ in 0..2000 {
            editor.tick();
        }
        assert!(editor.layout().is_settled());
    }
}
