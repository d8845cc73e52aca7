//! Error types for resistance-matrix computations

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ResistanceError>;

/// Failures surfaced by the resistance pipeline and its collaborators
#[derive(Error, Debug)]
pub enum ResistanceError {
    /// The three simulated motions are linearly dependent
    #[error("motion basis is degenerate (determinant = {determinant:e})")]
    DegenerateBasis { determinant: f64 },

    /// A field is not defined where it is evaluated, or two fields live on
    /// different discretizations
    #[error("incompatible field: {0}")]
    FieldIncompatibility(String),

    /// Motion selector outside {rot, trans}
    #[error("unknown kind of motion '{0}', expected 'rot' or 'trans'")]
    InvalidMotionKind(String),

    /// No boundary faces carry the requested tag
    #[error("no boundary surface tagged {0}")]
    UnknownSurfaceTag(u32),

    /// Report text that does not follow the `<label>_<ij> = <value>` layout
    #[error("malformed report at line {line}: {message}")]
    MalformedReport { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ResistanceError {
    pub fn incompatible(details: impl Into<String>) -> Self {
        Self::FieldIncompatibility(details.into())
    }

    pub fn malformed_report(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedReport {
            line,
            message: message.into(),
        }
    }
}
