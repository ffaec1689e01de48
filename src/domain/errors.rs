use thiserror::Error;

/// Transport-neutral classification of a [`PipelineError`].
///
/// Outer layers (HTTP handlers, CLIs) map these to their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TrainingData,
    ModelNotTrained,
    InvalidInput,
    ArtifactCorruption,
    Storage,
}

/// Errors surfaced by the feature extractor and the model pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid training data: {reason}")]
    TrainingData { reason: String },

    #[error("Model or scaler not found. Please train the model first.")]
    ModelNotTrained,

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Corrupted model artifacts: {reason}")]
    ArtifactCorruption { reason: String },

    #[error("Storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl PipelineError {
    pub fn training_data(reason: impl Into<String>) -> Self {
        Self::TrainingData {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn artifact_corruption(reason: impl Into<String>) -> Self {
        Self::ArtifactCorruption {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TrainingData { .. } => ErrorKind::TrainingData,
            Self::ModelNotTrained => ErrorKind::ModelNotTrained,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::ArtifactCorruption { .. } => ErrorKind::ArtifactCorruption,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => Self::Storage(io),
                other => Self::training_data(format!("{:?}", other)),
            }
        } else {
            Self::training_data(err.to_string())
        }
    }
}
