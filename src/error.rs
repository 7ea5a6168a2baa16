//! Error taxonomy for plate generation.

use std::path::PathBuf;

use thiserror::Error;

/// Root error type for plate generation failures.
#[derive(Error, Debug)]
pub enum PlateError {
    /// The environment is not ready for generation (nothing was touched).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A parameter would produce degenerate or NaN geometry.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the heightmap preview failed.
    #[error("heightmap encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

impl PlateError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PlateResult<T> = Result<T, PlateError>;
