//! In-Memory Model Store
//!
//! Holds the serialized artifacts behind `RwLock`s. Artifacts go through the
//! same serde_json encoding as `FileModelStore`, so tests exercise the real
//! load path without touching the filesystem.

use crate::domain::errors::PipelineError;
use crate::domain::ml::artifacts::{ModelArtifact, ScalerArtifact};
use crate::domain::repositories::ModelStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
pub struct InMemoryModelStore {
    scaler: RwLock<Option<String>>,
    model: RwLock<Option<String>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the raw encoded scaler, bypassing serialization.
    pub fn put_raw_scaler(&self, raw: impl Into<String>) {
        *self.scaler.write().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
    }

    /// Overwrites the raw encoded model, bypassing serialization.
    pub fn put_raw_model(&self, raw: impl Into<String>) {
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
    }

    pub fn raw_scaler(&self) -> Option<String> {
        self.scaler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn raw_model(&self) -> Option<String> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn encode<T: Serialize>(value: &T, slot: &RwLock<Option<String>>) -> Result<(), PipelineError> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| PipelineError::Storage(std::io::Error::other(e)))?;
    *slot.write().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
    Ok(())
}

fn decode<T: DeserializeOwned>(
    name: &str,
    slot: &RwLock<Option<String>>,
) -> Result<Option<T>, PipelineError> {
    let guard = slot.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_deref() {
        None => Ok(None),
        Some(raw) => serde_json::from_str(raw).map(Some).map_err(|e| {
            PipelineError::artifact_corruption(format!("unreadable {}: {}", name, e))
        }),
    }
}

impl ModelStore for InMemoryModelStore {
    fn save_scaler(&self, artifact: &ScalerArtifact) -> Result<(), PipelineError> {
        encode(artifact, &self.scaler)
    }

    fn save_model(&self, artifact: &ModelArtifact) -> Result<(), PipelineError> {
        encode(artifact, &self.model)
    }

    fn load_scaler(&self) -> Result<Option<ScalerArtifact>, PipelineError> {
        decode("scaler", &self.scaler)
    }

    fn load_model(&self) -> Result<Option<ModelArtifact>, PipelineError> {
        decode("model", &self.model)
    }
}
