//! Error handling for cv-align

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvAlignError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CvAlignError>;

/// model2vec-rs reports load failures as anyhow errors
impl From<anyhow::Error> for CvAlignError {
    fn from(err: anyhow::Error) -> Self {
        CvAlignError::ModelLoading(err.to_string())
    }
}
