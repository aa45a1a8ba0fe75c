//! Aggregate replicated simulation output files and plot them.
//!
//! Each matching file holds one replication as a delimited matrix with one
//! row per iteration and one column per output. [`aggregate`] stacks them
//! and draws superimposed traces, a min/max envelope or a moving average of
//! the replication mean onto a [`PlotSurface`].

pub mod aggregate;
pub mod color;
pub mod data;
pub mod error;
pub mod figure;
pub mod options;

pub use aggregate::{aggregate, Derived, ResultBundle};
pub use error::{ConfigError, ReplicaError};
pub use figure::{FigureHandle, FigureSet, PlotSurface};
pub use options::{KindSpec, Outputs, PlotOptions, Scale};
