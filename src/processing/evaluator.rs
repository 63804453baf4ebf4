//! Evaluation pipeline: sectioning, relevance scoring and feedback

use crate::error::{CvAlignError, Result};
use crate::processing::embeddings::EmbeddingProvider;
use crate::processing::feedback::GapAnalysis;
use crate::processing::job::JobRequirement;
use crate::processing::relevance;
use crate::processing::sections::{classify, SectionMap};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A resume already reduced to plain text, with its owner.
#[derive(Debug, Clone)]
pub struct Submission {
    pub username: String,
    pub filename: String,
    pub extracted_text: String,
}

/// Outcome of one evaluation, as shown to the user and stored in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub username: String,
    pub filename: String,
    pub relevance_score: f32,
    pub feedback: String,
    pub job_title: String,
    pub job_id: Option<u32>,
    pub structured_content: SectionMap,
    pub gap_analysis: GapAnalysis,
    pub provider: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Runs the evaluation pipeline with a single embedding provider
pub struct Evaluator {
    provider: Box<dyn EmbeddingProvider>,
}

impl Evaluator {
    /// Create a new evaluator around an embedding provider
    pub fn new(provider: Box<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// The embedding provider used for scoring
    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    /// Score `job_text` against `resume_text` with this evaluator's provider
    pub fn score(&self, job_text: &str, resume_text: &str) -> f32 {
        relevance::score(self.provider.as_ref(), job_text, resume_text)
    }

    /// Evaluate a submission against a job.
    ///
    /// Rejects blank resume text; everything past that point is total.
    pub fn evaluate(&self, job: &JobRequirement, job_id: Option<u32>, submission: &Submission) -> Result<Evaluation> {
        if submission.extracted_text.trim().is_empty() {
            return Err(CvAlignError::InvalidInput("CV text is empty".to_string()));
        }

        let start_time = Instant::now();
        let resume_text = &submission.extracted_text;

        // Split into sections, then score the whole text against the job
        let sections = classify(resume_text);
        let relevance_score = self.score(&job.job_text(), resume_text);

        // Text is non-blank here, so the gap analysis sentences are the feedback
        let gap_analysis = GapAnalysis::analyze(job, &sections, resume_text);
        let feedback = gap_analysis.to_feedback();

        info!(
            "Evaluated {} for '{}': score {:.1} in {:.2?}",
            submission.username,
            job.job_title,
            relevance_score,
            start_time.elapsed()
        );

        Ok(Evaluation {
            username: submission.username.clone(),
            filename: submission.filename.clone(),
            relevance_score,
            feedback,
            job_title: job.job_title.clone(),
            job_id,
            structured_content: sections,
            gap_analysis,
            provider: self.provider.name().to_string(),
            evaluated_at: Utc::now(),
        })
    }
}
