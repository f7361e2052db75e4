//! Model artifact persistence

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::training::{ModelArtifact, MODEL_FILE_NAME};
use crate::domain::DomainError;

/// Write the artifact to `<model_dir>/model.json`, creating the directory
pub fn save_model(artifact: &ModelArtifact, model_dir: &Path) -> Result<PathBuf, DomainError> {
    fs::create_dir_all(model_dir).map_err(|e| {
        DomainError::storage(format!("Failed to create {}: {}", model_dir.display(), e))
    })?;

    let path = model_dir.join(MODEL_FILE_NAME);
    let bytes = serde_json::to_vec(artifact)
        .map_err(|e| DomainError::storage(format!("Failed to serialize model: {}", e)))?;

    fs::write(&path, bytes)
        .map_err(|e| DomainError::storage(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}

pub fn load_model(path: &Path) -> Result<ModelArtifact, DomainError> {
    let bytes = fs::read(path)
        .map_err(|e| DomainError::storage(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::storage(format!("Failed to parse model {}: {}", path.display(), e)))
}
