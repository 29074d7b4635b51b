mod app;
mod chart;
mod color;
mod data;
mod selection;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // data directory: first CLI argument, default ./data
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let store = match data::loader::load_store(&data_dir) {
        Ok(store) => store,
        Err(e) => {
            log::error!(
                "failed to load datasets from {}: {e:#}",
                data_dir.display()
            );
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} tuition years, {} courses, {} GPA rows",
        store.tuition.len(),
        store.class_grades.rows.len(),
        store.school_gpa.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Campus Data Dashboard",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(AppState::new(store))))
        }),
    )
}
