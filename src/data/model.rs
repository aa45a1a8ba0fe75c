use std::path::PathBuf;

use ndarray::{s, Array2, Array3};

use crate::error::{ReplicaError, Result};

// ---------------------------------------------------------------------------
// RunFile – one replication as read from disk
// ---------------------------------------------------------------------------

/// One replication: the source path and its `iterations × outputs` matrix.
#[derive(Debug, Clone)]
pub struct RunFile {
    pub path: PathBuf,
    pub data: Array2<f64>,
}

impl RunFile {
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn columns(&self) -> usize {
        self.data.ncols()
    }
}

// ---------------------------------------------------------------------------
// AggregatedSeries – all replications stacked together
// ---------------------------------------------------------------------------

/// Values indexed by `[output, iteration, replication]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub values: Array3<f64>,
}

impl AggregatedSeries {
    /// Stack the first `iters` rows of every run.
    ///
    /// Every run needs at least `iters` rows and exactly `num_outputs`
    /// columns.
    pub fn from_runs(runs: &[RunFile], num_outputs: usize, iters: usize) -> Result<Self> {
        let mut values = Array3::<f64>::zeros((num_outputs, iters, runs.len()));

        for (rep, run) in runs.iter().enumerate() {
            if run.rows() < iters {
                return Err(ReplicaError::Bounds {
                    path: run.path.clone(),
                    detail: format!("has {} rows, {iters} iterations requested", run.rows()),
                });
            }
            if run.columns() != num_outputs {
                return Err(ReplicaError::Bounds {
                    path: run.path.clone(),
                    detail: format!("has {} columns, expected {num_outputs} outputs", run.columns()),
                });
            }
            // run.data is iterations × outputs; the stack is outputs × iterations.
            values
                .slice_mut(s![.., .., rep])
                .assign(&run.data.slice(s![..iters, ..]).t());
        }

        Ok(AggregatedSeries { values })
    }

    pub fn num_outputs(&self) -> usize {
        self.values.dim().0
    }

    pub fn iters(&self) -> usize {
        self.values.dim().1
    }

    pub fn replications(&self) -> usize {
        self.values.dim().2
    }
}
