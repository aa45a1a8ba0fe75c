//! Shared fixtures for integration tests.

use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Value of replication `rep` at `iter` (0-based) for output `col`.
///
/// Varies with all three indices so minima and maxima come from different
/// replications at different iterations.
pub fn value(rep: usize, iter: usize, col: usize) -> f64 {
    ((iter * 7 + rep * 3 + col * 5) % 11) as f64 + 10.0 * col as f64 - rep as f64 * 0.5
}

/// A fixture directory under the system temp dir, removed on drop.
pub struct RunDir(PathBuf);

impl Deref for RunDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for RunDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

/// A fresh, empty directory (unique per test name and process).
pub fn temp_dir(name: &str) -> RunDir {
    let dir = std::env::temp_dir().join(format!("replica_viewer_{name}_{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    RunDir(dir)
}

/// Write `reps` comma-separated run files `stats1.txt`.. with `rows` ×
/// `cols` values from [`value`].
pub fn write_runs(name: &str, reps: usize, rows: usize, cols: usize) -> RunDir {
    let dir = temp_dir(name);
    for rep in 0..reps {
        let text: String = (0..rows)
            .map(|i| {
                let row: Vec<String> = (0..cols).map(|c| value(rep, i, c).to_string()).collect();
                row.join(",") + "\n"
            })
            .collect();
        std::fs::write(dir.join(format!("stats{}.txt", rep + 1)), text).unwrap();
    }
    dir
}

/// The default scenario: 3 replications of 10 iterations × 2 outputs.
pub fn default_runs(name: &str) -> RunDir {
    write_runs(name, 3, 10, 2)
}
