//! Repository abstraction for the persisted scaler/model pair.
//!
//! `train` and `predict` receive a `ModelStore` instead of reaching for fixed
//! file paths, so tests can swap in the in-memory store.
//!
//! # Implementations
//!
//! - `FileModelStore`: two JSON files in a model directory
//! - `InMemoryModelStore`: serialized artifacts held behind a lock
//!
//! Neither implementation writes the pair atomically. A crash between the two
//! writes leaves artifacts from different runs, which `TrainedModel::pair`
//! reports as corruption on the next load.

use crate::domain::errors::PipelineError;
use crate::domain::ml::artifacts::{ModelArtifact, ScalerArtifact};

pub trait ModelStore: Send + Sync {
    /// Replace the persisted scaler
    fn save_scaler(&self, artifact: &ScalerArtifact) -> Result<(), PipelineError>;

    /// Replace the persisted model
    fn save_model(&self, artifact: &ModelArtifact) -> Result<(), PipelineError>;

    /// Load the scaler, `None` if no training run has persisted one
    fn load_scaler(&self) -> Result<Option<ScalerArtifact>, PipelineError>;

    /// Load the model, `None` if no training run has persisted one
    fn load_model(&self) -> Result<Option<ModelArtifact>, PipelineError>;
}
