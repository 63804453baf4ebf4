//! JSON-file log of evaluations, one entry per (candidate, job)

use crate::error::Result;
use crate::processing::evaluator::Evaluation;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Evaluations persisted as a pretty-printed JSON array
pub struct EvaluationLog {
    path: PathBuf,
    entries: Vec<Evaluation>,
}

impl EvaluationLog {
    /// Open the log at `path`; a missing file is an empty log
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // An empty file is treated like a missing one
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        debug!("Loaded {} evaluations from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// Replace any evaluation of the same candidate for the same job, then append
    pub fn record(&mut self, evaluation: Evaluation) {
        self.entries
            .retain(|e| !(e.username == evaluation.username && e.job_id == evaluation.job_id));
        self.entries.push(evaluation);
    }

    /// Write the log back to its file, creating parent directories
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        info!("Saved {} evaluations to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// All evaluations in insertion order
    pub fn entries(&self) -> &[Evaluation] {
        &self.entries
    }

    /// Evaluations recorded for one job
    pub fn for_job(&self, job_id: u32) -> impl Iterator<Item = &Evaluation> {
        self.entries.iter().filter(move |e| e.job_id == Some(job_id))
    }

    /// Evaluations for `job_id`, or every evaluation when no job is given
    pub fn select(&self, job_id: Option<u32>) -> Vec<&Evaluation> {
        match job_id {
            Some(id) => self.for_job(id).collect(),
            None => self.entries.iter().collect(),
        }
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
