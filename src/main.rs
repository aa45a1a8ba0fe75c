mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::ReplicaViewerApp;
use clap::Parser;
use eframe::egui;

#[derive(Parser, Debug)]
#[command(name = "replica-viewer")]
#[command(version, about = "Plot replicated simulation runs", long_about = None)]
struct Args {
    /// Folder of run files to plot on startup
    folder: Option<PathBuf>,

    /// Wildcard pattern selecting run files inside the folder
    #[arg(short, long, default_value = "*.txt")]
    pattern: String,

    /// JSON file with plot options
    #[arg(short, long)]
    options: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Replica Viewer",
        native,
        Box::new(move |_cc| {
            Ok(Box::new(ReplicaViewerApp::new(
                args.folder,
                args.pattern,
                args.options,
            )))
        }),
    )
}
