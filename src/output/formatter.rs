//! Output formatters for evaluations and section maps

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::evaluator::Evaluation;
use crate::processing::sections::SectionMap;
use crate::processing::skills::extract_candidate_skills;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String>;

    /// Format several evaluations, one after another
    fn format_evaluations(&self, evaluations: &[&Evaluation]) -> Result<String> {
        let rendered = evaluations
            .iter()
            .map(|evaluation| self.format_evaluation(evaluation))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join("\n"))
    }

    fn format_sections(&self, sections: &SectionMap) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Build the formatter for an output format
pub fn formatter_for(format: OutputFormat, use_colors: bool, detailed: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

/// Human-readable terminal output, optionally coloured
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    /// Create a new console formatter
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            format!("{}\n", title.bold().underline())
        } else {
            format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
        }
    }

    fn score_color(score: f32) -> Color {
        match score {
            s if s >= 75.0 => Color::Green,
            s if s >= 50.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn write_sections(&self, out: &mut String, sections: &SectionMap) {
        for (section, lines) in sections.iter() {
            out.push_str(&format!(
                "\n{} ({})\n",
                self.colorize(&section.to_string(), Color::Cyan),
                lines.len()
            ));
            for line in lines {
                out.push_str(&format!("  • {}\n", line));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        let mut out = self.header(&format!("Evaluation: {}", evaluation.job_title));

        out.push_str(&format!("Candidate: {} ({})\n", evaluation.username, evaluation.filename));
        out.push_str(&format!(
            "Relevance score: {}\n",
            self.colorize(
                &format!("{:.1}/100", evaluation.relevance_score),
                Self::score_color(evaluation.relevance_score)
            )
        ));

        // Skill gaps
        let gaps = &evaluation.gap_analysis;
        if !gaps.matching_skills.is_empty() {
            out.push_str(&format!(
                "Matching skills: {}\n",
                self.colorize(&gaps.matching_skills.join(", "), Color::Green)
            ));
        }
        if !gaps.missing_skills.is_empty() {
            out.push_str(&format!(
                "Missing skills: {}\n",
                self.colorize(&gaps.missing_skills.join(", "), Color::Red)
            ));
        }

        out.push_str(&format!("\nFeedback:\n  {}\n", evaluation.feedback));

        // Sections and run metadata only in detailed mode
        if self.detailed {
            out.push('\n');
            out.push_str(&self.header("Resume sections"));
            self.write_sections(&mut out, &evaluation.structured_content);
            out.push_str(&format!(
                "\nEmbedding provider: {}\nEvaluated at: {}\n",
                evaluation.provider,
                evaluation.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(out)
    }

    fn format_sections(&self, sections: &SectionMap) -> Result<String> {
        let mut out = self.header("Resume sections");
        self.write_sections(&mut out, sections);

        let skills = extract_candidate_skills(&sections.skills);
        if !skills.is_empty() {
            out.push_str(&format!("\nSkill tokens: {}\n", skills.join(", ")));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

/// Serializes evaluations and section maps as JSON
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        self.to_json(evaluation)
    }

    fn format_evaluations(&self, evaluations: &[&Evaluation]) -> Result<String> {
        self.to_json(&evaluations)
    }

    fn format_sections(&self, sections: &SectionMap) -> Result<String> {
        self.to_json(sections)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Markdown report with a summary table
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    fn write_sections(out: &mut String, sections: &SectionMap) {
        for (section, lines) in sections.iter() {
            out.push_str(&format!("\n### {}\n\n", section));
            if lines.is_empty() {
                out.push_str("_None found_\n");
            }
            for line in lines {
                out.push_str(&format!("- {}\n", line));
            }
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        let mut out = format!("# Evaluation: {}\n\n", evaluation.job_title);

        // Summary table
        out.push_str("| Field | Value |\n|---|---|\n");
        out.push_str(&format!("| Candidate | {} |\n", evaluation.username));
        out.push_str(&format!("| File | {} |\n", evaluation.filename));
        out.push_str(&format!("| Relevance score | {:.1} / 100 |\n", evaluation.relevance_score));
        if let Some(job_id) = evaluation.job_id {
            out.push_str(&format!("| Job id | {} |\n", job_id));
        }

        out.push_str(&format!("\n## Feedback\n\n{}\n", evaluation.feedback));
        out.push_str("\n## Resume sections\n");
        Self::write_sections(&mut out, &evaluation.structured_content);

        Ok(out)
    }

    fn format_sections(&self, sections: &SectionMap) -> Result<String> {
        let mut out = "# Resume sections\n".to_string();
        Self::write_sections(&mut out, sections);
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Write rendered output to a file
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
