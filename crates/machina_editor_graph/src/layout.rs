// SPDX-License-Identifier: MIT OR Apache-2.0
//! Force-directed layout engine.
//!
//! Continuously relaxes unpinned node positions toward an equilibrium of
//! three forces: edge springs toward a rest length, pairwise many-body
//! repulsion, and a centering pull toward the canvas middle. A scalar
//! heat value (`alpha`) scales every force contribution; it is held high
//! while a drag is active and decays toward zero at rest, so an untouched
//! layout settles and stops burning cycles.

use crate::edge::{EdgeKey, EdgePath};
use crate::graph::Graph;
use crate::node::NodeId;
use egui::{Pos2, Vec2};

/// Inward endpoint padding on an edge end bearing an arrowhead
const ARROW_PADDING: f32 = 17.0;
/// Inward endpoint padding on a plain edge end
const PLAIN_PADDING: f32 = 12.0;

/// Tuning parameters for the relaxation.
///
/// Defaults follow d3-force conventions: rest length 200, velocity decay
/// 0.6 per tick, alpha decay `1 - 0.001^(1/300)`.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Edge spring rest length
    pub link_distance: f32,
    /// Edge spring stiffness
    pub link_strength: f32,
    /// Pairwise repulsion strength
    pub charge_strength: f32,
    /// Pull toward the canvas center
    pub center_strength: f32,
    /// Fraction of velocity retained each tick
    pub velocity_decay: f32,
    /// Per-tick blend factor of alpha toward its target
    pub alpha_decay: f32,
    /// Alpha below which a cold layout stops integrating
    pub alpha_min: f32,
    /// Sustained alpha target while a drag is active
    pub drag_alpha_target: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            link_distance: 200.0,
            link_strength: 0.1,
            charge_strength: 30.0,
            center_strength: 0.05,
            velocity_decay: 0.6,
            alpha_decay: 0.0228,
            alpha_min: 0.001,
            drag_alpha_target: 0.3,
        }
    }
}

/// The relaxation process over a graph's node set.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    params: LayoutParams,
    center: Pos2,
    alpha: f32,
    alpha_target: f32,
}

impl LayoutEngine {
    /// Create an engine centered on `center` with default parameters
    pub fn new(center: Pos2) -> Self {
        Self::with_params(center, LayoutParams::default())
    }

    /// Create an engine with explicit parameters
    pub fn with_params(center: Pos2, params: LayoutParams) -> Self {
        Self {
            params,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }

    /// Current heat
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Current tuning parameters
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Mutable tuning parameters
    pub fn params_mut(&mut self) -> &mut LayoutParams {
        &mut self.params
    }

    /// Move the centering attractor
    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    /// Raise the heat so a structural change relaxes back in
    pub fn reheat(&mut self) {
        self.alpha = self.alpha.max(self.params.drag_alpha_target);
    }

    /// Hold the heat up for the duration of a drag gesture
    pub fn begin_drag(&mut self) {
        self.alpha_target = self.params.drag_alpha_target;
        self.reheat();
    }

    /// Release the sustained target; heat decays back toward zero
    pub fn end_drag(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Whether the layout has cooled down and stopped moving nodes
    pub fn is_settled(&self) -> bool {
        self.alpha < self.params.alpha_min && self.alpha_target < self.params.alpha_min
    }

    /// Advance one animation frame: decay alpha, apply forces, integrate
    /// positions, and refresh every edge's rendered path endpoints.
    pub fn tick(&mut self, graph: &mut Graph) {
        self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
        if !self.is_settled() {
            self.apply_forces(graph);
            self.integrate(graph);
        }
        self.update_edge_paths(graph);
    }

    fn apply_forces(&self, graph: &mut Graph) {
        let alpha = self.alpha;

        // Edge springs toward the rest length.
        let pairs: Vec<(NodeId, NodeId)> = graph
            .edges()
            .map(|edge| (edge.key.source(), edge.key.target()))
            .collect();
        for (a, b) in pairs {
            let (pa, pb) = match (graph.node(a), graph.node(b)) {
                (Some(na), Some(nb)) => (na.position, nb.position),
                _ => continue,
            };
            let delta = pb - pa;
            let dist = delta.length().max(1e-3);
            let pull = delta / dist * ((dist - self.params.link_distance) * self.params.link_strength * alpha);
            if let Some(node) = graph.node_mut(a) {
                node.velocity += pull;
            }
            if let Some(node) = graph.node_mut(b) {
                node.velocity -= pull;
            }
        }

        // Pairwise repulsion. O(n^2), but state diagrams stay small.
        let snapshot: Vec<(NodeId, Pos2)> = graph.nodes().map(|n| (n.id, n.position)).collect();
        let mut push = vec![Vec2::ZERO; snapshot.len()];
        for i in 0..snapshot.len() {
            for j in (i + 1)..snapshot.len() {
                let delta = snapshot[j].1 - snapshot[i].1;
                let dist_sq = delta.length_sq().max(1.0);
                let shove = delta * (self.params.charge_strength * alpha / dist_sq);
                push[i] -= shove;
                push[j] += shove;
            }
        }
        for ((id, _), shove) in snapshot.iter().zip(push) {
            if let Some(node) = graph.node_mut(*id) {
                node.velocity += shove;
            }
        }

        // Centering pull.
        let center = self.center;
        let strength = self.params.center_strength * alpha;
        for node in graph.nodes_mut() {
            node.velocity += (center - node.position) * strength;
        }
    }

    fn integrate(&self, graph: &mut Graph) {
        for node in graph.nodes_mut() {
            if let Some(fixed) = node.fixed {
                // Pinned nodes are immovable anchors with no momentum.
                node.position = fixed;
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity *= self.params.velocity_decay;
                node.position += node.velocity;
            }
        }
    }

    fn update_edge_paths(&self, graph: &mut Graph) {
        let endpoints: Vec<(EdgeKey, Pos2, Pos2)> = graph
            .edges()
            .filter_map(|edge| {
                let source = graph.node(edge.key.source())?.position;
                let target = graph.node(edge.key.target())?.position;
                Some((edge.key, source, target))
            })
            .collect();
        for (key, source, target) in endpoints {
            let delta = target - source;
            let dist = delta.length();
            if dist <= f32::EPSILON {
                continue;
            }
            let dir = delta / dist;
            if let Some(edge) = graph.edge_mut(key) {
                let source_padding = if edge.left { ARROW_PADDING } else { PLAIN_PADDING };
                let target_padding = if edge.right { ARROW_PADDING } else { PLAIN_PADDING };
                edge.path = EdgePath {
                    source: source + dir * source_padding,
                    target: target - dir * target_padding,
                };
            }
        }
    }
}
