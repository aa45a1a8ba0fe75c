use serde::Serialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Handles and drawable series
// ---------------------------------------------------------------------------

/// Identifies a figure created on a [`PlotSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FigureHandle(pub usize);

/// A polyline through `points` (`[x, y]` pairs).
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: Color,
    pub points: Vec<[f64; 2]>,
}

/// A shaded region between `lower` and `upper`, both sampled at `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub name: String,
    pub color: Color,
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Line(LineSeries),
    Band(BandSeries),
}

impl Series {
    pub fn name(&self) -> &str {
        match self {
            Series::Line(l) => &l.name,
            Series::Band(b) => &b.name,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Series::Line(l) => l.color,
            Series::Band(b) => b.color,
        }
    }
}

// ---------------------------------------------------------------------------
// PlotSurface – where draw calls go
// ---------------------------------------------------------------------------

/// A plotting backend addressed through explicit figure handles.
pub trait PlotSurface {
    fn create_figure(&mut self) -> FigureHandle;
    fn set_grid(&mut self, figure: FigureHandle, on: bool);
    /// With hold off, every new series replaces what the figure shows.
    fn set_hold(&mut self, figure: FigureHandle, on: bool);
    fn plot_line(&mut self, figure: FigureHandle, line: LineSeries);
    fn fill_between(&mut self, figure: FigureHandle, band: BandSeries);
    fn set_x_limits(&mut self, figure: FigureHandle, min: f64, max: f64);
    fn set_labels(&mut self, figure: FigureHandle, x_label: &str, y_label: &str);
    fn set_legend(&mut self, figure: FigureHandle, entries: &[String]);
}

// ---------------------------------------------------------------------------
// FigureSet – in-memory surface
// ---------------------------------------------------------------------------

/// Everything drawn into one figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub grid: bool,
    pub hold: bool,
    pub x_limits: Option<(f64, f64)>,
    pub x_label: String,
    pub y_label: String,
    pub legend: Vec<String>,
    pub series: Vec<Series>,
}

impl Figure {
    fn push(&mut self, series: Series) {
        if !self.hold {
            self.series.clear();
        }
        self.series.push(series);
    }
}

/// A [`PlotSurface`] that records figures for later display or inspection.
#[derive(Debug, Clone, Default)]
pub struct FigureSet {
    figures: Vec<Figure>,
}

impl FigureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: FigureHandle) -> Option<&Figure> {
        self.figures.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FigureHandle, &Figure)> {
        self.figures
            .iter()
            .enumerate()
            .map(|(i, f)| (FigureHandle(i), f))
    }

    fn with_figure(&mut self, handle: FigureHandle, f: impl FnOnce(&mut Figure)) {
        match self.figures.get_mut(handle.0) {
            Some(figure) => f(figure),
            None => log::warn!("draw call on unknown figure {}", handle.0),
        }
    }
}

impl PlotSurface for FigureSet {
    fn create_figure(&mut self) -> FigureHandle {
        self.figures.push(Figure::default());
        FigureHandle(self.figures.len() - 1)
    }

    fn set_grid(&mut self, figure: FigureHandle, on: bool) {
        self.with_figure(figure, |f| f.grid = on);
    }

    fn set_hold(&mut self, figure: FigureHandle, on: bool) {
        self.with_figure(figure, |f| f.hold = on);
    }

    fn plot_line(&mut self, figure: FigureHandle, line: LineSeries) {
        self.with_figure(figure, |f| f.push(Series::Line(line)));
    }

    fn fill_between(&mut self, figure: FigureHandle, band: BandSeries) {
        self.with_figure(figure, |f| f.push(Series::Band(band)));
    }

    fn set_x_limits(&mut self, figure: FigureHandle, min: f64, max: f64) {
        self.with_figure(figure, |f| f.x_limits = Some((min, max)));
    }

    fn set_labels(&mut self, figure: FigureHandle, x_label: &str, y_label: &str) {
        self.with_figure(figure, |f| {
            f.x_label = x_label.to_string();
            f.y_label = y_label.to_string();
        });
    }

    fn set_legend(&mut self, figure: FigureHandle, entries: &[String]) {
        self.with_figure(figure, |f| f.legend = entries.to_vec());
    }
}
