//! Keyword-driven sectioning of resume text

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Skills,
    PositionsOfResponsibility,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::PositionsOfResponsibility,
    ];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Education => write!(f, "Education"),
            Section::Experience => write!(f, "Experience"),
            Section::Skills => write!(f, "Skills"),
            Section::PositionsOfResponsibility => write!(f, "Positions of Responsibility"),
        }
    }
}

/// Lines of a resume grouped by section, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub positions_of_responsibility: Vec<String>,
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Skills => &self.skills,
            Section::PositionsOfResponsibility => &self.positions_of_responsibility,
        }
    }

    fn lines_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Education => &mut self.education,
            Section::Experience => &mut self.experience,
            Section::Skills => &mut self.skills,
            Section::PositionsOfResponsibility => &mut self.positions_of_responsibility,
        }
    }

    /// Sections with their lines, in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> {
        Section::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Total number of classified lines
    pub fn line_count(&self) -> usize {
        self.iter().map(|(_, lines)| lines.len()).sum()
    }

    /// True when no line was assigned to any section
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

/// What a heading keyword group does to the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Start(Section),
    Reset,
}

struct KeywordGroup<T> {
    target: T,
    matcher: AhoCorasick,
}

impl<T: Copy> KeywordGroup<T> {
    fn new(target: T, keywords: &[&str]) -> Self {
        let matcher = AhoCorasick::new(keywords).expect("Invalid section keyword set");
        Self { target, matcher }
    }
}

/// Classifier holding the ordered heading groups and content cue groups.
pub struct SectionClassifier {
    headings: Vec<KeywordGroup<Heading>>,
    cues: Vec<KeywordGroup<Section>>,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionClassifier {
    /// Create a classifier with the built-in keyword groups
    pub fn new() -> Self {
        // Order matters: the first matching group wins
        let headings = vec![
            KeywordGroup::new(
                Heading::Start(Section::Education),
                &["education", "academic", "qualification"],
            ),
            KeywordGroup::new(
                Heading::Start(Section::Experience),
                &["experience", "work history", "employment", "projects"],
            ),
            KeywordGroup::new(
                Heading::Start(Section::Skills),
                &["skills", "technical skills", "abilities", "competencies"],
            ),
            KeywordGroup::new(
                Heading::Start(Section::PositionsOfResponsibility),
                &["positions of responsibility"],
            ),
            KeywordGroup::new(Heading::Reset, &["achievements", "courses taken"]),
        ];

        let cues = vec![
            KeywordGroup::new(
                Section::Education,
                &["university", "degree", "b.tech", "m.tech", "phd"],
            ),
            KeywordGroup::new(Section::Experience, EXPERIENCE_CUES),
            KeywordGroup::new(
                Section::Skills,
                &["python", "javascript", "java", "sql", "leadership", "teamwork"],
            ),
        ];

        Self { headings, cues }
    }

    /// Split resume text into sections.
    ///
    /// A line matching a heading group switches (or clears) the current
    /// section and is itself dropped. Other lines go to the current section,
    /// or, when none is active, to the first section whose content cues they
    /// contain. Lines matching nothing are dropped.
    pub fn classify(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::default();
        let mut current: Option<Section> = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let lower = line.to_lowercase();

            // Headings are checked before content cues
            if let Some(heading) = first_match(&self.headings, &lower) {
                current = match heading {
                    Heading::Start(section) => Some(section),
                    Heading::Reset => None,
                };
                continue;
            }

            // Cues only apply outside an active section
            let target = current.or_else(|| first_match(&self.cues, &lower));
            if let Some(section) = target {
                sections.lines_mut(section).push(line.to_string());
            }
        }

        sections
    }
}

/// Phrases that suggest work experience in otherwise unstructured text
pub const EXPERIENCE_CUES: &[&str] = &["years", "worked at", "internship", "engineer", "developer"];

fn first_match<T: Copy>(groups: &[KeywordGroup<T>], lower: &str) -> Option<T> {
    groups
        .iter()
        .find(|group| group.matcher.is_match(lower))
        .map(|group| group.target)
}

/// Classify with the default keyword groups.
pub fn classify(text: &str) -> SectionMap {
    static CLASSIFIER: OnceLock<SectionClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(SectionClassifier::new).classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_route_following_lines() {
        let text = "Education\nB.Tech CS\nSkills\n• python, sql\nExperience\n2 years as engineer";
        let sections = classify(text);

        assert_eq!(sections.education, vec!["B.Tech CS"]);
        assert_eq!(sections.skills, vec!["• python, sql"]);
        assert_eq!(sections.experience, vec!["2 years as engineer"]);
        assert!(sections.positions_of_responsibility.is_empty());
    }

    #[test]
    fn test_heading_lines_are_not_content() {
        let text = "Skills:\nRust\nTechnical Skills\nGo\nPositions of Responsibility\nClub lead";
        let sections = classify(text);

        assert_eq!(sections.skills, vec!["Rust", "Go"]);
        assert_eq!(sections.positions_of_responsibility, vec!["Club lead"]);
        for (_, lines) in sections.iter() {
            assert!(!lines.iter().any(|l| l == "Skills:" || l == "Technical Skills"));
        }
    }

    #[test]
    fn test_first_group_wins() {
        // "education" is tested before "experience"
        let sections = classify("Education and Experience\nMIT");
        assert_eq!(sections.education, vec!["MIT"]);
        assert!(sections.experience.is_empty());
    }

    #[test]
    fn test_reset_group_clears_current_section() {
        let text = "Skills\nRust\nAchievements\nWon a hackathon\nCourses Taken\nLinear algebra";
        let sections = classify(text);

        assert_eq!(sections.skills, vec!["Rust"]);
        assert_eq!(sections.line_count(), 1);
    }

    #[test]
    fn test_content_cues_without_current_section() {
        let text = "Jane Doe\nStanford University\nWorked at Acme\nFluent in Python\nLikes hiking";
        let sections = classify(text);

        assert_eq!(sections.education, vec!["Stanford University"]);
        assert_eq!(sections.experience, vec!["Worked at Acme"]);
        assert_eq!(sections.skills, vec!["Fluent in Python"]);
        assert_eq!(sections.line_count(), 3);
    }

    #[test]
    fn test_content_cue_does_not_set_current_section() {
        let sections = classify("PhD in Physics\nunrelated line");
        assert_eq!(sections.education, vec!["PhD in Physics"]);
        assert_eq!(sections.line_count(), 1);
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_skipped() {
        let sections = classify("  Skills  \n\n   \n  Rust, Go  \r\n");
        assert_eq!(sections.skills, vec!["Rust, Go"]);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "Experience\nEngineer at Acme\nEducation\nBSc\nSkills\n• Rust";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_empty_input() {
        assert!(classify("").is_empty());
    }

    #[test]
    fn test_section_map_serializes_all_sections() {
        let json = serde_json::to_value(SectionMap::default()).unwrap();
        for key in ["education", "experience", "skills", "positions_of_responsibility"] {
            assert!(json.get(key).is_some());
        }
    }
}
