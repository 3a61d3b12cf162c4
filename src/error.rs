//! Error types for encoding, feature building and prediction.

use crate::schema::{CategoricalField, Field};
use crate::serialization::ArtifactKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Error type for every estimator operation.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// A startup artifact could not be read, decoded or validated.
    #[error("Failed to load {artifact} artifact from {}: {source}", path.display())]
    ArtifactLoad {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: Box<EstimatorError>,
    },
    /// Artifact decoded but its content breaks an invariant.
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
    /// Label outside the trained vocabulary of a categorical field.
    #[error("Unknown category '{label}' for field {field}")]
    UnknownCategory {
        field: CategoricalField,
        label: String,
    },
    /// Code with no label in a field's encoding table.
    #[error("Unknown code {code} for field {field}")]
    UnknownCode { field: CategoricalField, code: u32 },
    /// Model parameters sized for a different feature count.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// Raw value outside the domain its form control allows.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: Field, reason: String },
    /// The predictor could not produce a usable estimate.
    #[error("Predictor failed: {0}")]
    Predictor(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of an [`EstimatorError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal: the estimator cannot start.
    ArtifactLoad,
    /// Aborts the current build.
    UnknownCategory,
    /// Aborts the current interaction only.
    Predictor,
    /// Rejected by the input form.
    InvalidInput,
}

impl EstimatorError {
    /// Wrap a lower-level failure as a load failure of `artifact` at `path`.
    pub fn artifact_load(
        artifact: ArtifactKind,
        path: impl Into<PathBuf>,
        source: EstimatorError,
    ) -> Self {
        EstimatorError::ArtifactLoad {
            artifact,
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Where this error sits in the failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimatorError::ArtifactLoad { .. }
            | EstimatorError::InvalidArtifact(_)
            | EstimatorError::FeatureMismatch { .. }
            | EstimatorError::SerializationError(_)
            | EstimatorError::IoError(_) => ErrorKind::ArtifactLoad,
            EstimatorError::UnknownCategory { .. } | EstimatorError::UnknownCode { .. } => {
                ErrorKind::UnknownCategory
            }
            EstimatorError::Predictor(_) => ErrorKind::Predictor,
            EstimatorError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }
}

impl From<bincode::Error> for EstimatorError {
    fn from(err: bincode::Error) -> Self {
        EstimatorError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for EstimatorError {
    fn from(err: serde_json::Error) -> Self {
        EstimatorError::SerializationError(err.to_string())
    }
}
