//! Plain-text input for the CLI: file type detection, extraction and caching

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
