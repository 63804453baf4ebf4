//! Download and discovery of Model2Vec embedding models

use crate::error::{CvAlignError, Result};
use hf_hub::api::tokio::Api;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Files a Model2Vec directory must contain to load
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Metadata for a downloadable Model2Vec model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: String,
}

/// Tracks known models and which of them are on disk
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    /// Create a new manager, scanning `models_dir` for downloaded models
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&models_dir).await?;

        let mut manager = Self {
            models_dir,
            available_models: Self::known_models(),
            downloaded_models: HashSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn known_models() -> BTreeMap<String, EmbeddingModelInfo> {
        let entries = [
            (
                "potion-base-8M",
                "Potion Base 8M",
                "minishlab/potion-base-8M",
                33,
                256,
                "Small general-purpose static embeddings (recommended)",
            ),
            (
                "m2v-base",
                "Model2Vec Base",
                "minishlab/M2V_base_output",
                90,
                256,
                "Model2Vec base embeddings distilled from bge-base",
            ),
            (
                "m2v-large",
                "Model2Vec Large",
                "minishlab/M2V_large_output",
                250,
                512,
                "Larger Model2Vec embeddings for higher accuracy",
            ),
        ];

        entries
            .into_iter()
            .map(|(id, name, repo_id, size_mb, dimensions, description)| {
                (
                    id.to_string(),
                    EmbeddingModelInfo {
                        name: name.to_string(),
                        repo_id: repo_id.to_string(),
                        size_mb,
                        dimensions,
                        description: description.to_string(),
                    },
                )
            })
            .collect()
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            // Partial downloads are skipped
            if entry.file_type().await?.is_dir() && Self::is_complete_model_dir(&entry.path()).await {
                let model_id = entry.file_name().to_string_lossy().to_string();
                debug!("Found downloaded embedding model: {}", model_id);
                self.downloaded_models.insert(model_id);
            }
        }

        Ok(())
    }

    async fn is_complete_model_dir(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Resolve a model by id, repo id or display name (case-insensitive)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        // Fall back to repo id or display name
        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(_, info)| info.repo_id == input || info.name.to_lowercase() == input_lower)
            .map(|(id, _)| id.clone())
    }

    /// Download a known model into the models directory.
    ///
    /// Returns the existing directory without network access when the model
    /// is already present, unless `force` is set.
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let info = self
            .available_models
            .get(model_id)
            .cloned()
            .ok_or_else(|| CvAlignError::ModelNotFound(model_id.to_string()))?;

        // Skip download if already present
        let model_dir = self.models_dir.join(model_id);
        if !force && self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| CvAlignError::ModelLoading(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(info.repo_id.clone());

        // Setup progress spinner
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(120));

        for file in REQUIRED_FILES.iter().chain(OPTIONAL_FILES.iter()) {
            progress.set_message(format!("{} ({} MB): {}", info.repo_id, info.size_mb, file));

            // hf-hub downloads into its cache; copy into our model dir
            match repo.get(file).await {
                Ok(cached) => {
                    fs::copy(&cached, model_dir.join(file)).await?;
                }
                Err(e) if OPTIONAL_FILES.contains(file) => {
                    warn!("Optional file {} not available: {}", file, e);
                }
                Err(e) => {
                    progress.abandon_with_message(format!("Failed to download {}", file));
                    return Err(CvAlignError::ModelLoading(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
            }
        }

        progress.finish_with_message(format!("Downloaded {}", info.name));
        self.downloaded_models.insert(model_id.to_string());

        Ok(model_dir)
    }

    /// Known models ordered by id
    pub fn list_available_models(&self) -> Vec<(&str, &EmbeddingModelInfo)> {
        self.available_models.iter().map(|(id, info)| (id.as_str(), info)).collect()
    }

    /// Get metadata for a known model
    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    /// Check if a model has all required files on disk
    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Local directory of a downloaded model
    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.is_model_downloaded(model_id)
            .then(|| self.models_dir.join(model_id))
    }
}
