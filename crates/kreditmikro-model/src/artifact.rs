//! Serialized pipeline artifact: save with atomic replace, load read-only.
//!
//! Retraining writes a fresh artifact next to the target and renames it over
//! the old one, so a concurrently loading process never observes a partially
//! written file.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::pipeline::Pipeline;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Artifact {
    format_version: u32,
    pipeline: Pipeline,
}

/// Serialize the pipeline to `path`, replacing any existing artifact
/// atomically (write sibling temp file, then rename).
pub fn save(pipeline: &Pipeline, path: &Path) -> Result<(), ArtifactError> {
    let artifact = Artifact {
        format_version: FORMAT_VERSION,
        pipeline: pipeline.clone(),
    };
    let json = serde_json::to_string_pretty(&artifact)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    fs::write(tmp, json)?;
    fs::rename(tmp, path)?;

    log::info!("Saved pipeline artifact to {}", path.display());
    Ok(())
}

/// Load a pipeline artifact. Callers treat a failure here as fatal: a
/// serving process must not start without a usable model.
pub fn load(path: &Path) -> Result<Pipeline, ArtifactError> {
    let json = fs::read_to_string(path)?;
    let artifact: Artifact = serde_json::from_str(&json)?;
    if artifact.format_version != FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion(artifact.format_version));
    }
    log::info!("Loaded pipeline artifact from {}", path.display());
    Ok(artifact.pipeline)
}
