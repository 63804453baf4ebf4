//! cv-align: resume sectioning, relevance scoring and gap feedback

use clap::Parser;
use cv_align::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use cv_align::config::{Config, OutputFormat};
use cv_align::error::{CvAlignError, Result};
use cv_align::input::InputManager;
use cv_align::output::formatter::{formatter_for, save_report_to_file};
use cv_align::output::store::EvaluationLog;
use cv_align::processing::embedding_manager::EmbeddingModelManager;
use cv_align::processing::embeddings::EmbeddingProvider;
use cv_align::processing::evaluator::{Evaluator, Submission};
use cv_align::processing::job::JobRequirement;
use cv_align::processing::sections::classify;
use log::{error, info, warn};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // An explicit --config path wins over the platform config dir
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Classify { resume, output } => {
            let format = resolve_output_format(output.as_deref(), &config)?;
            let resume_text = read_resume(&resume).await?;

            // Classify resume lines into sections
            let sections = classify(&resume_text);
            if sections.is_empty() {
                warn!("No section headings or cues found in {}", resume.display());
            }
            info!("Classified {} lines from {}", sections.line_count(), resume.display());

            let formatter = formatter_for(format, config.output.color_output, config.output.detailed);
            println!("{}", formatter.format_sections(&sections)?);
        }

        Commands::Evaluate {
            resume,
            job,
            candidate,
            job_id,
            provider,
            detailed,
            output,
            save,
            record,
        } => {
            let format = resolve_output_format(output.as_deref(), &config)?;
            if let Some(provider) = provider {
                config.embedding.provider = cli::parse_provider(&provider).map_err(CvAlignError::InvalidInput)?;
            }

            // Load job requirements
            cli::validate_file_extension(&job, &["toml", "json"])
                .map_err(|e| CvAlignError::InvalidInput(format!("Job requirements file: {}", e)))?;
            let job_requirement = JobRequirement::from_file(&job)?;

            // Extract resume text and identify the candidate
            let resume_text = read_resume(&resume).await?;
            let filename = resume
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| resume.display().to_string());
            let username = candidate.unwrap_or_else(|| {
                resume
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| filename.clone())
            });

            // Score and generate feedback
            let evaluator = Evaluator::new(<dyn EmbeddingProvider>::from_config(&config)?);
            info!("Scoring with {} embeddings", evaluator.provider().name());

            let evaluation = evaluator.evaluate(
                &job_requirement,
                job_id,
                &Submission {
                    username,
                    filename,
                    extracted_text: resume_text,
                },
            )?;

            // Format and output results
            let formatter = formatter_for(
                format,
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            );
            let rendered = formatter.format_evaluation(&evaluation)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Saved evaluation to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            // Record in the evaluation log if requested
            if let Some(log_path) = record {
                let mut log = EvaluationLog::open(log_path)?;
                log.record(evaluation);
                log.save()?;
            }
        }

        Commands::Evaluations { log, job_id, output } => {
            let format = resolve_output_format(output.as_deref(), &config)?;
            let log = EvaluationLog::open(log)?;

            let evaluations = log.select(job_id);
            info!("Found {} evaluations in {}", evaluations.len(), log.path().display());

            if evaluations.is_empty() && format != OutputFormat::Json {
                println!("No evaluations recorded");
                return Ok(());
            }

            let formatter = formatter_for(format, config.output.color_output, config.output.detailed);
            println!("{}", formatter.format_evaluations(&evaluations)?);
        }

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding models ({}):\n", config.models_dir().display());
                    for (id, info) in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(id) { "downloaded" } else { "available" };
                        let default = if *id == config.models.default_embedding_model { " (default)" } else { "" };
                        println!("  {}{} - {} MB, {} dims [{}]", id, default, info.size_mb, info.dimensions, status);
                        println!("    {}", info.description);
                    }
                }

                ModelAction::Download { model, force } => {
                    let model_id = resolve_model(&manager, &model)?;
                    let path = manager.download_model(&model_id, force).await?;
                    println!("Model '{}' ready at {}", model_id, path.display());
                }

                ModelAction::Info { model } => {
                    let model_id = resolve_model(&manager, &model)?;
                    if let Some(info) = manager.get_model_info(&model_id) {
                        println!("Id: {}", model_id);
                        println!("Name: {}", info.name);
                        println!("Repository: {}", info.repo_id);
                        println!("Size: {} MB", info.size_mb);
                        println!("Dimensions: {}", info.dimensions);
                        println!("Description: {}", info.description);
                        match manager.get_model_path(&model_id) {
                            Some(path) => println!("Location: {}", path.display()),
                            None => println!("Status: not downloaded (cv-align models download {})", model_id),
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| CvAlignError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn read_resume(path: &Path) -> Result<String> {
    cli::validate_file_extension(path, &["pdf", "txt", "md"])
        .map_err(|e| CvAlignError::InvalidInput(format!("Resume file: {}", e)))?;

    // One read per run, nothing to reuse
    InputManager::new().with_cache(false).extract_text(path).await
}

fn resolve_output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(format) => cli::parse_output_format(format).map_err(CvAlignError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn resolve_model(manager: &EmbeddingModelManager, input: &str) -> Result<String> {
    manager
        .resolve_model_id(input)
        .ok_or_else(|| CvAlignError::ModelNotFound(input.to_string()))
}
