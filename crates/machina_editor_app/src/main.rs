// SPDX-License-Identifier: MIT OR Apache-2.0
//! Machina Editor - interactive editor for finite-state machine diagrams.
//!
//! States are created from the toolbar, transitions are drawn by
//! dragging between states, and a force-directed layout keeps the
//! diagram relaxed while it is edited. The interaction and layout core
//! lives in `machina_editor_graph`; this binary is the render adapter:
//! it paints the diagram with egui, classifies pointer events, and
//! drives the layout once per frame.

mod app;
mod canvas;
mod settings;

use app::MachinaApp;
use settings::AppSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> eframe::Result {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("machina_editor_app=debug".parse().unwrap())
        .add_directive("machina_editor_graph=debug".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = AppSettings::load_or_default();
    tracing::info!(?settings, "starting Machina Editor");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([700.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Machina Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(MachinaApp::new(settings)) as Box<dyn eframe::App>)),
    )
}
