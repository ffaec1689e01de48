//! Persisted scaler/model pair.
//!
//! Both artifacts carry the id of the training run that produced them so a
//! pair written by two different runs can be told apart from a consistent one.

use super::forest::TenantForest;
use super::scaler::StandardScaler;
use crate::domain::errors::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRun {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
}

impl TrainingRun {
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub run: TrainingRun,
    pub scaler: StandardScaler,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub run: TrainingRun,
    pub forest: TenantForest,
}

/// A loaded, mutually consistent scaler and model
#[derive(Debug)]
pub struct TrainedModel {
    pub scaler: ScalerArtifact,
    pub model: ModelArtifact,
}

impl TrainedModel {
    /// Pairs the two artifacts, rejecting mismatched ones.
    pub fn pair(
        scaler: ScalerArtifact,
        model: ModelArtifact,
        expected_features: usize,
    ) -> Result<Self, PipelineError> {
        if scaler.run.id != model.run.id {
            return Err(PipelineError::artifact_corruption(format!(
                "scaler from run {} does not match model from run {}",
                scaler.run.id, model.run.id
            )));
        }
        if scaler.scaler.n_features() != model.forest.n_features() {
            return Err(PipelineError::artifact_corruption(format!(
                "scaler expects {} features but model expects {}",
                scaler.scaler.n_features(),
                model.forest.n_features()
            )));
        }
        if scaler.scaler.n_features() != expected_features {
            return Err(PipelineError::artifact_corruption(format!(
                "artifacts expect {} features, pipeline provides {}",
                scaler.scaler.n_features(),
                expected_features
            )));
        }
        if scaler.scaler.scales.len() != scaler.scaler.means.len() {
            return Err(PipelineError::artifact_corruption(
                "scaler means and scales differ in length",
            ));
        }
        Ok(Self { scaler, model })
    }
}
