//! Rule-based skill and experience gap feedback

use crate::processing::job::JobRequirement;
use crate::processing::sections::{SectionMap, EXPERIENCE_CUES};
use crate::processing::skills::extract_candidate_skills;
use serde::{Deserialize, Serialize};

pub const NO_CONTENT_FEEDBACK: &str = "Unable to evaluate CV: No readable content found.";
pub const NO_SPECIFIC_FEEDBACK: &str = "No specific feedback available.";

/// Skill and experience comparison between a resume and a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// Candidate skills that the job asks for, in resume order
    pub matching_skills: Vec<String>,
    /// Job skills absent from the resume, in job order
    pub missing_skills: Vec<String>,
    pub experience_found: bool,
    pub experience_match: bool,
}

impl GapAnalysis {
    /// Compare the resume's skills and experience with the job's
    pub fn analyze(job: &JobRequirement, sections: &SectionMap, resume_text: &str) -> Self {
        let job_skills = job.required_skills();
        let job_skills_lower: Vec<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();

        let candidate_skills = extract_candidate_skills(&sections.skills);
        let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

        // Case-insensitive exact matches only
        let matching_skills = candidate_skills
            .iter()
            .zip(&candidate_lower)
            .filter(|(_, lower)| job_skills_lower.contains(lower))
            .map(|(skill, _)| skill.clone())
            .collect();

        let missing_skills = job_skills
            .iter()
            .zip(&job_skills_lower)
            .filter(|(_, lower)| !candidate_lower.contains(lower))
            .map(|(skill, _)| skill.to_string())
            .collect();

        // Experience: a section or a cue anywhere, then any job keyword in the text
        let resume_lower = resume_text.to_lowercase();
        let experience_found = !sections.experience.is_empty()
            || EXPERIENCE_CUES.iter().any(|cue| resume_lower.contains(cue));

        let experience_match = experience_found
            && job
                .experience
                .to_lowercase()
                .split_whitespace()
                .any(|keyword| resume_lower.contains(keyword));

        Self {
            matching_skills,
            missing_skills,
            experience_found,
            experience_match,
        }
    }

    /// Render the analysis as feedback sentences joined by spaces
    pub fn to_feedback(&self) -> String {
        let mut sentences = Vec::new();

        if !self.matching_skills.is_empty() {
            sentences.push(format!(
                "The CV demonstrates relevant skills like {}, which align well with the job requirements.",
                self.matching_skills.join(", ")
            ));
        }

        if !self.missing_skills.is_empty() {
            sentences.push(format!(
                "The CV lacks some required skills such as {}.",
                self.missing_skills.join(", ")
            ));
        }

        if self.experience_match {
            sentences.push("The experience section matches the job's requirements.".to_string());
        } else {
            sentences.push(
                "The experience section does not fully meet the job's requirements; consider adding more relevant experience."
                    .to_string(),
            );
        }

        // Unreachable while the experience sentence is unconditional
        if sentences.is_empty() {
            return NO_SPECIFIC_FEEDBACK.to_string();
        }

        sentences.join(" ")
    }
}

/// Natural-language feedback on how a resume meets a job's requirements.
///
/// The relevance score is accepted so callers pass the full evaluation
/// context; the current rules only look at skills and experience.
pub fn feedback(job: &JobRequirement, sections: &SectionMap, resume_text: &str, _relevance_score: f32) -> String {
    if resume_text.trim().is_empty() {
        return NO_CONTENT_FEEDBACK.to_string();
    }

    GapAnalysis::analyze(job, sections, resume_text).to_feedback()
}
