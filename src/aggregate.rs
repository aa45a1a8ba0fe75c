use std::ops::Range;
use std::path::Path;

use ndarray::{s, Array2, Array3};
use serde::Serialize;

use crate::data::discover::discover;
use crate::data::loader::load_run;
use crate::data::model::AggregatedSeries;
use crate::data::stats;
use crate::error::Result;
use crate::figure::{BandSeries, FigureHandle, LineSeries, PlotSurface};
use crate::options::{PlotKind, PlotOptions, ResolvedOptions};

pub const X_LABEL: &str = "Iterations";
pub const Y_LABEL: &str = "Value";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The derived data of one call. Its shape depends on the plot type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Derived {
    /// Raw values, `[output, iteration, replication]`.
    Superimposed { values: Array3<f64> },
    /// `[output, iteration, 0]` is the minimum, `[.., .., 1]` the maximum.
    Filled { values: Array3<f64> },
    /// `[output, position]`, `iters - window` positions per output.
    MovingAverage { window: usize, values: Array2<f64> },
}

impl Derived {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Derived::Superimposed { values } | Derived::Filled { values } => values.shape().to_vec(),
            Derived::MovingAverage { values, .. } => values.shape().to_vec(),
        }
    }

    pub fn num_outputs(&self) -> usize {
        self.shape()[0]
    }
}

/// Derived data plus the figures drawn from it, one per layout group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub outputs: Vec<String>,
    pub data: Derived,
    pub figures: Vec<FigureHandle>,
}

impl ResultBundle {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Load every file in `folder` matching `pattern`, stack them as
/// replications and plot the view selected by `options` onto `surface`.
///
/// Figures are created before the plot type is checked, so an unknown type
/// fails with the figures already on the surface.
pub fn aggregate<S>(
    folder: &Path,
    pattern: &str,
    options: &PlotOptions,
    surface: &mut S,
) -> Result<ResultBundle>
where
    S: PlotSurface + ?Sized,
{
    let paths = discover(folder, pattern)?;

    let first = load_run(&paths[0])?;
    let resolved = options.resolve(first.rows(), first.columns())?;

    let mut runs = Vec::with_capacity(paths.len());
    runs.push(first);
    for path in &paths[1..] {
        runs.push(load_run(path)?);
    }

    let series = AggregatedSeries::from_runs(&runs, resolved.num_outputs(), resolved.iters)?;
    log::info!(
        "Aggregated {} replications of {} outputs over {} iterations",
        series.replications(),
        series.num_outputs(),
        series.iters()
    );

    let figures: Vec<FigureHandle> = resolved
        .layout
        .iter()
        .map(|_| {
            let figure = surface.create_figure();
            surface.set_grid(figure, true);
            surface.set_hold(figure, true);
            figure
        })
        .collect();

    let data = match PlotKind::try_from(&resolved.kind)? {
        PlotKind::Superimposed => {
            draw_superimposed(surface, &figures, &resolved, &series.values);
            Derived::Superimposed {
                values: series.values,
            }
        }
        PlotKind::Filled => {
            let values = stats::envelope(&series.values);
            draw_filled(surface, &figures, &resolved, &values);
            Derived::Filled { values }
        }
        PlotKind::MovingAverage(window) => {
            let mean = stats::replication_mean(&series.values);
            let values = stats::moving_average(&mean, window)?;
            draw_moving_average(surface, &figures, &resolved, window, &values);
            Derived::MovingAverage { window, values }
        }
    };

    for (&figure, group) in figures.iter().zip(resolved.groups()) {
        surface.set_x_limits(figure, 0.0, resolved.iters as f64);
        surface.set_legend(figure, &resolved.names[group]);
        surface.set_labels(figure, X_LABEL, Y_LABEL);
    }

    Ok(ResultBundle {
        outputs: resolved.names,
        data,
        figures,
    })
}

// ---------------------------------------------------------------------------
// Per-mode drawing
// ---------------------------------------------------------------------------

/// Pairs every figure with its output range.
fn layout<'a>(
    figures: &'a [FigureHandle],
    resolved: &ResolvedOptions,
) -> impl Iterator<Item = (FigureHandle, Range<usize>)> + 'a {
    figures.iter().copied().zip(resolved.groups())
}

fn draw_superimposed<S: PlotSurface + ?Sized>(
    surface: &mut S,
    figures: &[FigureHandle],
    resolved: &ResolvedOptions,
    values: &Array3<f64>,
) {
    let (_, iters, reps) = values.dim();
    for (figure, group) in layout(figures, resolved) {
        for rep in 0..reps {
            for (pos, o) in group.clone().enumerate() {
                let scale = resolved.scale[o];
                let points = (0..iters)
                    .map(|i| [(i + 1) as f64, values[[o, i, rep]] * scale])
                    .collect();
                surface.plot_line(
                    figure,
                    LineSeries {
                        name: resolved.names[o].clone(),
                        color: resolved.palette.color_for(pos),
                        points,
                    },
                );
            }
        }
    }
}

fn draw_filled<S: PlotSurface + ?Sized>(
    surface: &mut S,
    figures: &[FigureHandle],
    resolved: &ResolvedOptions,
    bounds: &Array3<f64>,
) {
    log::warn!("legend entries of filled bands may not render on every plotting backend");
    let iters = bounds.dim().1;
    let x: Vec<f64> = (1..=iters).map(|i| i as f64).collect();
    for (figure, group) in layout(figures, resolved) {
        for (pos, o) in group.enumerate() {
            let scale = resolved.scale[o];
            let lower = bounds.slice(s![o, .., 0]).iter().map(|v| v * scale).collect();
            let upper = bounds.slice(s![o, .., 1]).iter().map(|v| v * scale).collect();
            surface.fill_between(
                figure,
                BandSeries {
                    name: resolved.names[o].clone(),
                    color: resolved.palette.color_for(pos),
                    x: x.clone(),
                    lower,
                    upper,
                },
            );
        }
    }
}

fn draw_moving_average<S: PlotSurface + ?Sized>(
    surface: &mut S,
    figures: &[FigureHandle],
    resolved: &ResolvedOptions,
    window: usize,
    averaged: &Array2<f64>,
) {
    for (figure, group) in layout(figures, resolved) {
        for (pos, o) in group.enumerate() {
            let scale = resolved.scale[o];
            // Position j averages the window ending at iteration j + window + 1.
            let points = averaged
                .row(o)
                .iter()
                .enumerate()
                .map(|(j, v)| [(j + window + 1) as f64, v * scale])
                .collect();
            surface.plot_line(
                figure,
                LineSeries {
                    name: resolved.names[o].clone(),
                    color: resolved.palette.color_for(pos),
                    points,
                },
            );
        }
    }
}
