// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level eframe application: toolbar plus diagram canvas.

use crate::canvas::CanvasView;
use crate::settings::AppSettings;
use machina_editor_graph::{EditorConfig, EditorState, Selected};

/// The Machina Editor application.
pub struct MachinaApp {
    editor: EditorState,
    canvas: CanvasView,
    settings: AppSettings,
}

impl MachinaApp {
    /// Build the app, applying persisted layout preferences and seeding
    /// the starter diagram.
    pub fn new(settings: AppSettings) -> Self {
        let mut editor = EditorState::new(EditorConfig::default());
        let params = editor.layout_mut().params_mut();
        params.link_distance = settings.link_distance;
        params.charge_strength = settings.charge_strength;
        editor.seed_demo();

        Self {
            editor,
            canvas: CanvasView::new(),
            settings,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Add State").clicked() {
                self.editor.add_node_command();
            }
            if ui.button("Remove Selected").clicked() {
                self.editor.remove_selected_command();
            }

            if let Some(Selected::Node(id)) = self.editor.selection().selected() {
                if let Some(node) = self.editor.graph().node(id) {
                    let mut reflexive = node.reflexive;
                    if ui.checkbox(&mut reflexive, "Reflexive").changed() {
                        self.editor.set_reflexive(id, reflexive);
                    }
                }
            }

            ui.separator();
            ui.menu_button("Layout", |ui| {
                let mut changed = false;
                ui.label("Transition length");
                changed |= ui
                    .add(egui::Slider::new(&mut self.settings.link_distance, 80.0..=400.0))
                    .changed();
                ui.label("Node repulsion");
                changed |= ui
                    .add(egui::Slider::new(&mut self.settings.charge_strength, 0.0..=120.0))
                    .changed();
                if changed {
                    let params = self.editor.layout_mut().params_mut();
                    params.link_distance = self.settings.link_distance;
                    params.charge_strength = self.settings.charge_strength;
                    self.editor.layout_mut().reheat();
                    if let Err(err) = self.settings.save() {
                        tracing::warn!(%err, "failed to save settings");
                    }
                }
            });

            ui.separator();
            ui.label(format!(
                "States: {}  Transitions: {}",
                self.editor.graph().node_count(),
                self.editor.graph().edge_count(),
            ));
            ui.separator();
            ui.label("drag between states to add a transition, Ctrl-drag to move a state");
        });
    }
}

impl eframe::App for MachinaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas.ui(ui, &mut self.editor);
        });

        // The layout runs every animation frame regardless of activity;
        // event intake above never interleaves with this tick.
        self.editor.tick();
        ctx.request_repaint();
    }
}
