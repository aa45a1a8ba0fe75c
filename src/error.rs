use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering, loading or plotting replication files.
#[derive(Debug, Error)]
pub enum ReplicaError {
    #[error("no files found matching '{pattern}' in {}", .folder.display())]
    NoFilesFound { folder: PathBuf, pattern: String },

    #[error("{}: {detail}", .path.display())]
    Bounds { path: PathBuf, detail: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}, line {row}, column {column}: '{value}' is not a number", .path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid options JSON")]
    Json(#[from] serde_json::Error),
}

/// Invalid plotting parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown type '{0}' (expected 'a', 'f' or a non-negative window size)")]
    UnknownType(String),

    #[error("layout groups sum to {sum} but there are {outputs} outputs")]
    LayoutSum { sum: usize, outputs: usize },

    #[error("layout group {index} is empty")]
    EmptyLayoutGroup { index: usize },

    #[error("scale has {got} entries, expected 1 or {outputs}")]
    ScaleLength { got: usize, outputs: usize },

    #[error("color list is empty")]
    EmptyPalette,

    #[error("output list is empty")]
    OutputCount,

    #[error("moving-average window {window} exceeds {iters} iterations")]
    WindowTooLarge { window: usize, iters: usize },

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}

pub type Result<T> = std::result::Result<T, ReplicaError>;
