// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diagram canvas: paints the graph and classifies pointer events.
//!
//! This is the render adapter side of the core's contract. World space
//! and screen space coincide here; the canvas owns hit testing and
//! forwards classified pointer/keyboard events into the editor core.

use egui::{vec2, Color32, CursorIcon, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use machina_editor_graph::{EditorState, EdgeKey, Graph, Node, NodeId, PointerTarget};

/// Node glyph dimensions
const RECT_WIDTH: f32 = 100.0;
const RECT_HEIGHT: f32 = 40.0;
/// Max pointer distance at which an edge is considered hit
const EDGE_HIT_THRESHOLD: f32 = 6.0;
/// Arrowhead side length
const ARROW_SIZE: f32 = 9.0;

const HIGHLIGHT: Color32 = Color32::from_rgb(238, 162, 54);
const NODE_FILL: Color32 = Color32::WHITE;
const NODE_STROKE: Color32 = Color32::from_rgb(51, 51, 51);
const EDGE_COLOR: Color32 = Color32::from_gray(160);

/// Canvas widget state: edge-detection memory for the host events the
/// core wants delivered exactly once.
#[derive(Default)]
pub struct CanvasView {
    modifier_was_down: bool,
}

impl CanvasView {
    /// Create a fresh canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out, handle input for, and paint the diagram
    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut EditorState) {
        let rect = ui.available_rect_before_wrap();
        let _response = ui.allocate_rect(rect, Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_input(ui, rect, editor);

        painter.rect_filled(rect, 0.0, Color32::from_rgb(30, 30, 34));
        draw_edges(&painter, editor);
        draw_tentative_edge(&painter, editor);
        let hovered = ui
            .input(|i| i.pointer.hover_pos())
            .and_then(|pos| hit_node(editor.graph(), pos));
        draw_nodes(&painter, editor, hovered);

        if editor.modifier_held() {
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Move);
        }
    }

    fn handle_input(&mut self, ui: &egui::Ui, rect: Rect, editor: &mut EditorState) {
        let (pointer_pos, pressed, released, modifier_down, delete_pressed) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.button_pressed(egui::PointerButton::Primary)
                    || i.pointer.button_pressed(egui::PointerButton::Secondary),
                i.pointer.button_released(egui::PointerButton::Primary)
                    || i.pointer.button_released(egui::PointerButton::Secondary),
                i.modifiers.ctrl || i.modifiers.command,
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            )
        });

        if modifier_down && !self.modifier_was_down {
            editor.modifier_down();
        }
        if !modifier_down && self.modifier_was_down {
            editor.modifier_up();
        }
        self.modifier_was_down = modifier_down;

        if delete_pressed {
            editor.remove_selected_command();
        }

        let Some(pos) = pointer_pos else { return };

        if pressed && rect.contains(pos) {
            editor.pointer_down(classify(editor.graph(), pos), pos);
        }
        editor.pointer_moved(pos);
        if released {
            // Releases resolve the gesture even outside the canvas.
            editor.pointer_up(classify(editor.graph(), pos), pos);
        }
    }
}

/// Classify a pointer position against nodes first, then edges, then the
/// background.
fn classify(graph: &Graph, pos: Pos2) -> PointerTarget {
    if let Some(id) = hit_node(graph, pos) {
        PointerTarget::Node(id)
    } else if let Some(key) = hit_edge(graph, pos) {
        PointerTarget::Edge(key)
    } else {
        PointerTarget::Background
    }
}

fn node_rect(node: &Node) -> Rect {
    Rect::from_center_size(node.position, vec2(RECT_WIDTH, RECT_HEIGHT))
}

fn hit_node(graph: &Graph, pos: Pos2) -> Option<NodeId> {
    // Topmost wins: the last node drawn is the last in iteration order.
    graph
        .nodes()
        .filter(|node| node_rect(node).contains(pos))
        .last()
        .map(|node| node.id)
}

fn hit_edge(graph: &Graph, pos: Pos2) -> Option<EdgeKey> {
    let mut best: Option<(EdgeKey, f32)> = None;
    for edge in graph.edges() {
        let (Some(a), Some(b)) = (graph.node(edge.key.source()), graph.node(edge.key.target())) else {
            continue;
        };
        let dist = point_segment_distance(pos, a.position, b.position);
        if dist <= EDGE_HIT_THRESHOLD && best.map_or(true, |(_, d)| dist < d) {
            best = Some((edge.key, dist));
        }
    }
    best.map(|(key, _)| key)
}

fn point_segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn draw_edges(painter: &Painter, editor: &EditorState) {
    for edge in editor.graph().edges() {
        let selected = editor.selection().is_edge_selected(edge.key);
        let color = if selected { HIGHLIGHT } else { EDGE_COLOR };
        let path = edge.path;
        painter.line_segment([path.source, path.target], Stroke::new(2.0, color));

        let delta = path.target - path.source;
        let len = delta.length();
        if len <= f32::EPSILON {
            continue;
        }
        let dir = delta / len;
        if edge.right {
            draw_arrowhead(painter, path.target, dir, color);
        }
        if edge.left {
            draw_arrowhead(painter, path.source, -dir, color);
        }
    }
}

fn draw_tentative_edge(painter: &Painter, editor: &EditorState) {
    if let Some((from, to)) = editor.tentative_edge() {
        painter.line_segment([from, to], Stroke::new(2.0, EDGE_COLOR));
        let delta = to - from;
        let len = delta.length();
        if len > f32::EPSILON {
            draw_arrowhead(painter, to, delta / len, EDGE_COLOR);
        }
    }
}

fn draw_arrowhead(painter: &Painter, tip: Pos2, dir: Vec2, color: Color32) {
    let ortho = vec2(-dir.y, dir.x);
    let base = tip - dir * ARROW_SIZE;
    let wings = ortho * (ARROW_SIZE * 0.5);
    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + wings, base - wings],
        color,
        Stroke::NONE,
    ));
}

fn draw_nodes(painter: &Painter, editor: &EditorState, hovered: Option<NodeId>) {
    for node in editor.graph().nodes() {
        let rect = node_rect(node);
        let selected = editor.selection().is_node_selected(node.id);
        let stroke = if selected || hovered == Some(node.id) {
            Stroke::new(2.5, HIGHLIGHT)
        } else {
            Stroke::new(1.5, NODE_STROKE)
        };

        painter.rect_filled(rect, 4.0, NODE_FILL);
        painter.rect_stroke(rect, 4.0, stroke);
        if node.reflexive {
            // Reflexive states get a second, inset outline.
            painter.rect_stroke(rect.shrink(3.0), 3.0, Stroke::new(1.0, stroke.color));
        }

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{} {}", node.name, node.id.0),
            egui::FontId::proportional(14.0),
            Color32::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_point_segment_distance() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert!((point_segment_distance(pos2(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        assert!((point_segment_distance(pos2(-4.0, 0.0), a, b) - 4.0).abs() < 1e-5);
        assert!((point_segment_distance(pos2(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_classify_prefers_nodes_over_edges() {
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(0.0, 0.0));
        let b = graph.add_node(pos2(300.0, 0.0));
        graph.upsert_edge(a, b, true).unwrap();

        // On the segment midway between the nodes: edge hit.
        assert!(matches!(classify(&graph, pos2(150.0, 2.0)), PointerTarget::Edge(_)));
        // Inside a node glyph, even though the segment passes through it.
        assert_eq!(classify(&graph, pos2(10.0, 5.0)), PointerTarget::Node(a));
        // Far away from everything.
        assert_eq!(classify(&graph, pos2(150.0, 200.0)), PointerTarget::Background);
    }

    #[test]
    fn test_topmost_node_wins_hit_test() {
        let mut graph = Graph::new();
        let _under = graph.add_node(pos2(0.0, 0.0));
        let over = graph.add_node(pos2(10.0, 0.0));
        assert_eq!(hit_node(&graph, pos2(5.0, 0.0)), Some(over));
    }
}
