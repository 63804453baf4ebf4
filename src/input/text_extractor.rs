//! Text extraction from resume files

use crate::error::{CvAlignError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

/// Reads a file and returns its plain text
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// PDF extraction via pdf-extract
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        // Read the PDF file
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            CvAlignError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;

        Ok(tidy_pdf_text(&text))
    }
}

/// Collapse runs of spaces/tabs and drop form feeds left by PDF layout
fn tidy_pdf_text(text: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let spaces = SPACES.get_or_init(|| Regex::new(r"[ \t\u{a0}]+").expect("Invalid whitespace regex"));

    text.replace('\u{c}', "\n")
        .lines()
        .map(|line| spaces.replace_all(line.trim(), " ").to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text is read as-is
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

/// Markdown is flattened to plain text
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Strip markdown to one block per line.
///
/// List items are rendered with a leading "• " so bulleted skill lists keep
/// the marker the skills heuristic looks for.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();

    // Parse markdown and keep only text content
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("• ");
            }
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_)) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    // Clean up whitespace
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
