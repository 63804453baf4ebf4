//! Input manager routing files to extractors with a per-path cache

use crate::error::{CvAlignError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Routes resume files to the matching text extractor
pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create a new input manager with caching enabled
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    /// Enable or disable the per-path text cache
    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract plain text from a resume file.
    ///
    /// Fails when the file is missing, of an unsupported type, or yields no
    /// text (e.g. a scanned PDF).
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached) = self.cache.get(&key) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        // Validate file exists
        if !path.exists() {
            return Err(CvAlignError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // Detect file type
        let file_type = FileType::from_path(path).ok_or_else(|| {
            CvAlignError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        // Route to appropriate extractor
        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(CvAlignError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (use PDF, TXT or MD)",
                    path.display()
                )));
            }
        };

        // Scanned or image-only documents extract to nothing
        if text.trim().is_empty() {
            return Err(CvAlignError::InvalidInput(format!(
                "Unable to extract text from {}. Provide a document with selectable text (not scanned or image-based).",
                path.display()
            )));
        }

        // Cache the result
        if self.enable_cache {
            self.cache.insert(key, text.clone());
        }

        Ok(text)
    }

    /// Drop all cached text
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of cached documents
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
