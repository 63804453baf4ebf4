//! Configuration management for cv-align

use crate::error::{CvAlignError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, stored as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub embedding: EmbeddingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub default_embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: ProviderKind,
    /// Bucket count for the hashing provider
    pub hashing_dimensions: usize,
}

/// Which embedding provider scores relevance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Model2Vec,
    Hashing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cv-align")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                default_embedding_model: "potion-base-8M".to_string(),
            },
            embedding: EmbeddingConfig {
                provider: ProviderKind::Model2Vec,
                hashing_dimensions: 384,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, writing defaults if the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            // Parse existing config
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CvAlignError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // First run: persist defaults so users can edit them
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvAlignError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location: `<config_dir>/cv-align/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-align")
            .join("config.toml")
    }

    /// Directory holding downloaded embedding models
    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.embedding.provider, ProviderKind::Model2Vec);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_roundtrip_preserves_edits() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.embedding.provider = ProviderKind::Hashing;
        config.embedding.hashing_dimensions = 64;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.embedding.provider, ProviderKind::Hashing);
        assert_eq!(loaded.embedding.hashing_dimensions, 64);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "models = [not toml").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CvAlignError::Configuration(_))));
    }
}
