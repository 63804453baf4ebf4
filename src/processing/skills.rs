//! Candidate skill token extraction from the skills section.
//!
//! This is a lossy heuristic built around the common "• skill, skill" bullet
//! layout. Lines without a bullet marker are ignored, and multi-word skills
//! come out as separate tokens.

const BULLET: char = '•';

/// Headings that end a skills block when they leak into its lines
const SKILLS_TERMINATORS: &[&str] = &["achievements", "positions of responsibility", "courses taken"];

/// Extract skill tokens from the lines of a skills section, in order.
pub fn extract_candidate_skills(lines: &[String]) -> Vec<String> {
    let mut skills = Vec::new();

    for line in lines {
        // A later heading ends the block, even mid-line
        let lower = line.to_lowercase();
        if SKILLS_TERMINATORS.iter().any(|t| lower.contains(t)) {
            break;
        }

        // Only the text after the last bullet counts
        if let Some((_, tail)) = line.rsplit_once(BULLET) {
            skills.extend(
                tail.replace(',', " ")
                    .split_whitespace()
                    .map(|token| token.trim().replace('*', ""))
                    .filter(|token| !token.is_empty()),
            );
        }
    }

    skills
}
