use std::path::PathBuf;

use thiserror::Error;

use crate::{config::ConfigError, kernel::KernelError};

/// Error type for extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A parametric range collapses to a single value and cannot be rescaled
    #[error("Degenerate {what} domain: [{start}, {end}]")]
    DegenerateDomain {
        what: &'static str,
        start: f64,
        end: f64,
    },

    #[error("Face geometry is not a spline surface: {0}")]
    UnsupportedGeometry(String),

    #[error("Kernel could not provide a spline representation")]
    MissingSpline,

    /// The kernel returned a buffer that breaks the record invariants
    #[error("Invalid {what} buffer: {reason}")]
    InvalidBuffer { what: &'static str, reason: String },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("Cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ExtractError {
    /// Errors local to one face's geometry.
    /// The face is skipped and traversal continues with its siblings.
    pub fn is_face_scoped(&self) -> bool {
        matches!(
            self,
            ExtractError::DegenerateDomain { .. }
                | ExtractError::UnsupportedGeometry(_)
                | ExtractError::MissingSpline
                | ExtractError::InvalidBuffer { .. }
        )
    }

    pub(crate) fn invalid_buffer(what: &'static str, reason: impl Into<String>) -> Self {
        ExtractError::InvalidBuffer {
            what,
            reason: reason.into(),
        }
    }
}

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;
