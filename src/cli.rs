//! CLI interface for cv-align

use crate::config::{OutputFormat, ProviderKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-align")]
#[command(about = "Match resumes against job requirements")]
#[command(long_about = "Split resumes into sections, score their relevance to a job with text embeddings, and explain skill and experience gaps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a resume splits into sections
    Classify {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score a resume against a job and generate feedback
    Evaluate {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job requirements (TOML or JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Candidate name recorded with the evaluation (defaults to the file stem)
        #[arg(long)]
        candidate: Option<String>,

        /// Job identifier recorded with the evaluation
        #[arg(long)]
        job_id: Option<u32>,

        /// Embedding provider: model2vec, hashing
        #[arg(short, long)]
        provider: Option<String>,

        /// Show resume sections and run metadata
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Record the evaluation in a JSON evaluation log
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// List evaluations recorded in an evaluation log
    Evaluations {
        /// Path to the JSON evaluation log
        #[arg(short, long)]
        log: PathBuf,

        /// Only show evaluations for this job identifier
        #[arg(long)]
        job_id: Option<u32>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List known embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, repo id or name
        model: String,

        /// Re-download even if present
        #[arg(short, long)]
        force: bool,
    },

    /// Show model information
    Info {
        /// Model id, repo id or name
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse an output format name
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse an embedding provider name
pub fn parse_provider(provider: &str) -> Result<ProviderKind, String> {
    match provider.to_lowercase().as_str() {
        "model2vec" | "m2v" => Ok(ProviderKind::Model2Vec),
        "hashing" | "hash" => Ok(ProviderKind::Hashing),
        _ => Err(format!("Invalid embedding provider: {}. Supported: model2vec, hashing", provider)),
    }
}

/// Check a file's extension against an allow-list, ignoring case
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate_args() {
        let cli = Cli::try_parse_from([
            "cv-align", "evaluate", "-r", "cv.pdf", "-j", "job.toml", "--job-id", "4", "-p", "hashing",
        ])
        .unwrap();

        match cli.command {
            Commands::Evaluate { resume, job_id, provider, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job_id, Some(4));
                assert_eq!(provider.as_deref(), Some("hashing"));
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_parse_evaluations_args() {
        let cli = Cli::try_parse_from(["cv-align", "evaluations", "-l", "log.json", "--job-id", "2", "-o", "json"])
            .unwrap();

        match cli.command {
            Commands::Evaluations { log, job_id, output } => {
                assert_eq!(log, PathBuf::from("log.json"));
                assert_eq!(job_id, Some(2));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected evaluations"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("Hashing"), Ok(ProviderKind::Hashing));
        assert!(parse_provider("openai").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
