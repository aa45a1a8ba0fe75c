use std::path::PathBuf;

use eframe::egui::{self, RichText};

use crate::state::AppState;
use crate::ui::{panels, plot};

pub struct ReplicaViewerApp {
    state: AppState,
}

impl ReplicaViewerApp {
    /// Start with the command-line folder and options, plotting right away
    /// when a folder was given.
    pub fn new(folder: Option<PathBuf>, pattern: String, options: Option<PathBuf>) -> Self {
        let mut state = AppState {
            pattern,
            ..AppState::default()
        };
        if let Some(path) = options {
            if let Err(e) = state.load_options(&path) {
                log::error!("{e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
        if folder.is_some() {
            state.folder = folder;
            state.reload();
        }
        Self { state }
    }
}

impl eframe::App for ReplicaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Source folder and file pattern of the figures on screen.
        egui::TopBottomPanel::bottom("source").show(ctx, |ui| {
            let source = match &self.state.folder {
                Some(folder) => format!("{}/{}", folder.display(), self.state.pattern),
                None => format!("(no folder)/{}", self.state.pattern),
            };
            ui.label(RichText::new(source).monospace().weak());
        });

        egui::SidePanel::left("plot_options")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figures(ui, &self.state);
        });
    }
}
