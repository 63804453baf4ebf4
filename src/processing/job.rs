//! Job requirement records

use crate::error::{CvAlignError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A job's declared requirements, as maintained by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    /// Comma separated, e.g. "Python, SQL, Leadership"
    pub skills: String,
    pub experience: String,
    #[serde(default)]
    pub traits: Option<String>,
}

impl JobRequirement {
    /// Create a new job requirement without traits
    pub fn new(job_title: impl Into<String>, skills: impl Into<String>, experience: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            skills: skills.into(),
            experience: experience.into(),
            traits: None,
        }
    }

    /// Required skills split on ", ", case preserved
    pub fn required_skills(&self) -> Vec<&str> {
        self.skills.split(", ").collect()
    }

    /// Flattened description embedded on the job side of scoring
    pub fn job_text(&self) -> String {
        let traits = self
            .traits
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("N/A");

        format!(
            "{} requires skills: {}, experience: {}, traits: {}",
            self.job_title, self.skills, self.experience, traits
        )
    }

    /// Read a job requirement from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        // Pick the parser from the extension
        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(CvAlignError::UnsupportedFormat(format!(
                "Job requirements must be .toml or .json: {}",
                path.display()
            ))),
        }
    }
}
