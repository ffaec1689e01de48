//! Filesystem persistence for the scaler/model pair.
//!
//! Stores `tenant_model.json` and `tenant_scaler.json` in one directory.
//! Each file is replaced via temp-file-then-rename; the pair as a whole is not.

use crate::domain::errors::PipelineError;
use crate::domain::ml::artifacts::{ModelArtifact, ScalerArtifact};
use crate::domain::repositories::ModelStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MODEL_FILE: &str = "tenant_model.json";
pub const SCALER_FILE: &str = "tenant_scaler.json";

pub struct FileModelStore {
    model_path: PathBuf,
    scaler_path: PathBuf,
}

impl FileModelStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        Ok(Self {
            model_path: dir.join(MODEL_FILE),
            scaler_path: dir.join(SCALER_FILE),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn scaler_path(&self) -> &Path {
        &self.scaler_path
    }

    fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
        let content = serde_json::to_string(value)
            .map_err(|e| PipelineError::Storage(std::io::Error::other(e)))?;

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;

        info!("Saved {:?}", path);
        Ok(())
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PipelineError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            PipelineError::artifact_corruption(format!("failed to parse {:?}: {}", path, e))
        })?;
        Ok(Some(value))
    }
}

impl ModelStore for FileModelStore {
    fn save_scaler(&self, artifact: &ScalerArtifact) -> Result<(), PipelineError> {
        Self::write(&self.scaler_path, artifact)
    }

    fn save_model(&self, artifact: &ModelArtifact) -> Result<(), PipelineError> {
        Self::write(&self.model_path, artifact)
    }

    fn load_scaler(&self) -> Result<Option<ScalerArtifact>, PipelineError> {
        Self::read(&self.scaler_path)
    }

    fn load_model(&self) -> Result<Option<ModelArtifact>, PipelineError> {
        Self::read(&self.model_path)
    }
}
