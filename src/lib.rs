//! cv-align library: resume sectioning, relevance scoring and gap feedback

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CvAlignError, Result};
pub use processing::evaluator::{Evaluation, Evaluator};
pub use processing::job::JobRequirement;
pub use processing::sections::{classify, Section, SectionMap};
