use std::path::PathBuf;

use thiserror::Error;

/// Error type for [import_mesh](crate::import_mesh) and [load_mtl](crate::load_mtl).
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O operation error.
    #[error("I/O error on `{path}`: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A statement could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A face references an element that does not exist.
    #[error("line {line}: index {index} out of range for {count} {kind}")]
    InvalidIndex {
        /// One-based line number.
        line: usize,
        /// Raw index as written in the file.
        index: i64,
        /// Number of elements read so far.
        count: usize,
        /// Element kind (vertices, uvs, normals).
        kind: &'static str,
    },

    /// Faces have different numbers of corners and triangulation is disabled.
    #[error("faces of different sizes ({first} and {other}) in a non-homogeneous mesh")]
    NonHomogeneousMesh {
        /// Size of the first face.
        first: usize,
        /// First size that differs.
        other: usize,
    },

    /// The mesh has no vertices or no faces.
    #[error("mesh has {vertices} vertices and {faces} faces")]
    EmptyMesh {
        /// Number of vertices read.
        vertices: usize,
        /// Number of faces read.
        faces: usize,
    },

    /// A `usemtl` statement names a material missing from every material library.
    #[error("material `{0}` not found in any material library")]
    MaterialNotFound(String),

    /// A material property appears before any `newmtl` statement.
    #[error("line {line}: `{statement}` outside of a material definition")]
    OrphanProperty {
        /// One-based line number.
        line: usize,
        /// Offending statement keyword.
        statement: String,
    },

    /// A texture could not be read or decoded.
    #[error("texture `{path}`: {message}")]
    Texture {
        /// Texture path.
        path: PathBuf,
        /// Decoder error.
        message: String,
    },
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// How material errors are handled during import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialErrorPolicy {
    /// Abort the import with the error.
    #[default]
    Fail,

    /// Log a warning and skip the faulty property or material.
    Ignore,
}

impl MaterialErrorPolicy {
    /// Apply the policy to a material error.
    ///
    /// Returns `Ok(())` when the error is swallowed.
    pub fn handle(&self, error: ImportError) -> Result<(), ImportError> {
        match self {
            MaterialErrorPolicy::Fail => Err(error),
            MaterialErrorPolicy::Ignore => {
                log::warn!("Ignoring material error: {error}");
                Ok(())
            }
        }
    }
}
