use std::path::PathBuf;

use mesh_io::ImportError;
use thiserror::Error;

/// Error type for [ShapeNetDataset](crate::shapenet::ShapeNetDataset).
#[derive(Error, Debug)]
pub enum ShapeNetError {
    /// Dataset version string not recognized.
    #[error("version `{0}` not recognized")]
    UnknownVersion(String),

    /// Category is neither a known synset id nor a known label.
    #[error("category `{0}` is not a known synset id or label")]
    UnknownCategory(String),

    /// The dataset root does not exist.
    #[error("dataset root `{0}` is not a directory")]
    RootNotFound(PathBuf),

    /// A requested category has no folder under the dataset root.
    #[error("category `{synset}` not found at `{path}`")]
    CategoryNotFound {
        /// Synset id.
        synset: String,
        /// Expected category folder.
        path: PathBuf,
    },

    /// Split fraction outside of `[0, 1]`.
    #[error("split must be within [0, 1], got {0}")]
    InvalidSplit(f64),

    /// Index outside of `-len..len`.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: isize,
        /// Dataset length.
        len: usize,
    },

    /// Directory scanning error.
    #[error("scan error: {0}")]
    Scan(String),

    /// A model could not be imported.
    #[error("failed to import `{path}`: {source}")]
    Import {
        /// Model file.
        path: PathBuf,
        /// Import error.
        source: ImportError,
    },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration IO error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid format.
    #[error("Config error => Invalid format: {0}")]
    InvalidFormat(String),

    /// File not found.
    #[error("Config error => File not found: {0}")]
    FileNotFound(String),
}
