//! Embedding providers

use crate::config::{Config, ProviderKind};
use crate::error::{CvAlignError, Result};
use log::info;
use model2vec_rs::model::StaticModel;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

/// Maps text to a fixed-length dense vector.
///
/// Implementations must be deterministic for identical input and report
/// failures through the returned `Result` rather than panicking.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl dyn EmbeddingProvider {
    /// Build the provider selected in the configuration
    pub fn from_config(config: &Config) -> Result<Box<dyn EmbeddingProvider>> {
        match config.embedding.provider {
            ProviderKind::Model2Vec => {
                let model_path = config.models_dir().join(&config.models.default_embedding_model);
                if !model_path.exists() {
                    return Err(CvAlignError::ModelNotFound(format!(
                        "{} (run `cv-align models download {}`)",
                        model_path.display(),
                        config.models.default_embedding_model
                    )));
                }
                Ok(Box::new(Model2VecProvider::load(&model_path)?))
            }
            ProviderKind::Hashing => Ok(Box::new(HashingProvider::new(config.embedding.hashing_dimensions)?)),
        }
    }
}

/// Static Model2Vec embeddings loaded from a local model directory
pub struct Model2VecProvider {
    model: StaticModel,
    name: String,
}

impl Model2VecProvider {
    /// Load a downloaded Model2Vec model directory
    pub fn load(model_path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        // Load tokenizer, weights and config from the model directory
        let model = StaticModel::from_pretrained(model_path, None, None, None)?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        let name = model_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| model_path.display().to_string());

        Ok(Self { model, name })
    }
}

impl EmbeddingProvider for Model2VecProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // The tokenizer path can panic on pathological input
        panic::catch_unwind(AssertUnwindSafe(|| self.model.encode_single(text)))
            .map_err(|_| CvAlignError::Embedding("Model2Vec encoder panicked".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Signed feature-hashing bag of words.
///
/// Needs no model files, so it works offline and gives stable vectors in
/// tests. Similarity reflects shared vocabulary only, not meaning.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    /// Create a hashing provider producing `dimensions`-long vectors
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(CvAlignError::Configuration(
                "Hashing embedding dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(Self { dimensions })
    }
}

impl EmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];

        // Each word adds +1 or -1 to one bucket, picked by its hash

        for word in text.unicode_words() {
            let hash = fnv1a(word.to_lowercase().as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        Ok(vector)
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}
