//! Resume structuring, relevance scoring and feedback

pub mod sections;
pub mod skills;
pub mod embeddings;
pub mod embedding_manager;
pub mod relevance;
pub mod job;
pub mod feedback;
pub mod evaluator;
