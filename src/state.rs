use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use replica_viewer::{aggregate, FigureSet, KindSpec, PlotOptions, ResultBundle, Scale};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Folder holding the replication files (None until the user picks one).
    pub folder: Option<PathBuf>,

    /// Wildcard pattern selecting replication files inside `folder`.
    pub pattern: String,

    /// Options read from a JSON file; the text fields below override them.
    pub base_options: PlotOptions,

    /// Plot type: `a`, `f` or a moving-average window.
    pub kind_text: String,

    /// Comma-separated figure group sizes; empty means one figure.
    pub layout_text: String,

    /// One scale factor, or one per output, comma-separated.
    pub scale_text: String,

    /// Iterations to plot; empty or `0` means all.
    pub iters_text: String,

    /// Figures drawn by the last successful run.
    pub figures: FigureSet,

    /// Derived data of the last successful run.
    pub result: Option<ResultBundle>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            folder: None,
            pattern: "*.txt".to_string(),
            base_options: PlotOptions::default(),
            kind_text: "a".to_string(),
            layout_text: String::new(),
            scale_text: String::new(),
            iters_text: String::new(),
            figures: FigureSet::new(),
            result: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Merge the text fields over `base_options`.
    pub fn options(&self) -> Result<PlotOptions> {
        let mut options = self.base_options.clone();

        if !self.kind_text.trim().is_empty() {
            options.kind = Some(self.kind_text.parse::<KindSpec>()?);
        }
        if let Some(layout) = parse_list::<usize>(&self.layout_text).context("layout")? {
            options.layout = Some(layout);
        }
        if let Some(scale) = parse_list::<f64>(&self.scale_text).context("scale")? {
            options.scale = Some(match scale.as_slice() {
                [single] => Scale::Uniform(*single),
                _ => Scale::PerOutput(scale),
            });
        }
        if !self.iters_text.trim().is_empty() {
            let iters = self.iters_text.trim().parse::<usize>().context("iters")?;
            options.iters = Some(iters);
        }
        Ok(options)
    }

    /// Read plotting options from a JSON file and mirror them into the
    /// text fields.
    pub fn load_options(&mut self, path: &Path) -> Result<()> {
        let options = PlotOptions::from_json_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?;

        self.kind_text = options.kind.as_ref().map(ToString::to_string).unwrap_or_default();
        self.layout_text = options.layout.as_deref().map(join).unwrap_or_default();
        self.scale_text = match &options.scale {
            Some(Scale::Uniform(s)) => s.to_string(),
            Some(Scale::PerOutput(v)) => join(v),
            None => String::new(),
        };
        self.iters_text = options.iters.map(|n| n.to_string()).unwrap_or_default();
        self.base_options = options;
        Ok(())
    }

    /// Load the selected folder and redraw every figure.
    pub fn reload(&mut self) {
        let Some(folder) = self.folder.clone() else {
            self.status_message = Some("Pick a folder first (File → Open folder…)".to_string());
            return;
        };

        let mut figures = FigureSet::new();
        let outcome = self
            .options()
            .and_then(|options| Ok(aggregate(&folder, &self.pattern, &options, &mut figures)?));

        match outcome {
            Ok(result) => {
                log::info!(
                    "Plotted {} figures, data shape {:?}",
                    result.figures.len(),
                    result.data.shape()
                );
                self.figures = figures;
                self.result = Some(result);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to plot {}: {e:#}", folder.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the derived data of the last run as JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let result = self.result.as_ref().context("nothing plotted yet")?;
        let json = result.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported derived data to {}", path.display());
        Ok(())
    }
}

/// Parse a comma-separated list; blank text yields `None`.
fn parse_list<T>(text: &str) -> Result<Option<Vec<T>>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if text.trim().is_empty() {
        return Ok(None);
    }
    let values = text
        .split(',')
        .map(|tok| {
            tok.trim()
                .parse::<T>()
                .with_context(|| format!("'{}' is not a valid number", tok.trim()))
        })
        .collect::<Result<Vec<T>>>()?;
    Ok(Some(values))
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
