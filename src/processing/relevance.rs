//! Embedding-based relevance scoring between a job description and a resume

use crate::processing::embeddings::EmbeddingProvider;
use log::{debug, warn};

pub const MIN_SCORE: f32 = 0.0;
pub const MAX_SCORE: f32 = 100.0;

/// Relevance of `resume_text` to `job_text` on a 0-100 scale.
///
/// Never fails: blank input, embedding errors, mismatched dimensions and
/// zero-norm vectors all score 0.
pub fn score(provider: &dyn EmbeddingProvider, job_text: &str, resume_text: &str) -> f32 {
    if job_text.trim().is_empty() || resume_text.trim().is_empty() {
        debug!("Empty job description or resume text, scoring 0");
        return MIN_SCORE;
    }

    // Embed both sides; any failure scores 0
    let embeddings = provider
        .embed(job_text)
        .and_then(|job| provider.embed(resume_text).map(|resume| (job, resume)));

    let (job_embedding, resume_embedding) = match embeddings {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Embedding with {} failed, scoring 0: {}", provider.name(), e);
            return MIN_SCORE;
        }
    };

    match cosine_similarity(&job_embedding, &resume_embedding) {
        Some(cosine) => {
            debug!("Cosine similarity = {}", cosine);
            let relevance = scale_cosine(cosine);
            debug!("Relevance score = {}", relevance);
            relevance
        }
        None => MIN_SCORE,
    }
}

/// Cosine similarity of two vectors after L2 normalization.
///
/// `None` when the dimensions differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        warn!("Embedding dimensions don't match: {} vs {}", a.len(), b.len());
        return None;
    }

    // Normalize first so large magnitudes cannot overflow the dot product
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        debug!("Zero norm embedding");
        return None;
    }

    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| (x / norm_a) * (y / norm_b))
            .sum(),
    )
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Map a cosine in [-1, 1] onto [0, 100], clamping drift and rejecting NaN
pub fn scale_cosine(cosine: f32) -> f32 {
    let scaled = (cosine + 1.0) * 50.0;
    if scaled.is_nan() {
        return MIN_SCORE;
    }
    scaled.clamp(MIN_SCORE, MAX_SCORE)
}
