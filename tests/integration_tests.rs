//! Integration tests for cv-align

use cv_align::error::CvAlignError;
use cv_align::input::InputManager;
use cv_align::output::formatter::{JsonFormatter, OutputFormatter};
use cv_align::output::store::EvaluationLog;
use cv_align::processing::embeddings::{EmbeddingProvider, HashingProvider};
use cv_align::processing::evaluator::{Evaluator, Submission};
use cv_align::processing::feedback::feedback;
use cv_align::processing::relevance;
use cv_align::processing::skills::extract_candidate_skills;
use cv_align::{classify, JobRequirement};
use std::path::Path;

fn hashing_evaluator() -> Evaluator {
    Evaluator::new(Box::new(HashingProvider::new(256).unwrap()))
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("• Python, SQL, **Rust**"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("• Python, SQL, Rust"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(CvAlignError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(CvAlignError::InvalidInput(_))));
}

#[tokio::test]
async fn test_blank_document_rejected() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/blank_resume.txt")).await;
    assert!(matches!(result, Err(CvAlignError::InvalidInput(_))));
    assert_eq!(manager.cache_size(), 0);
}

#[test]
fn test_job_requirements_from_toml_and_json() {
    let toml_job = JobRequirement::from_file(Path::new("tests/fixtures/job.toml")).unwrap();
    assert_eq!(toml_job.job_title, "Data Engineer");
    assert_eq!(toml_job.traits.as_deref(), Some("Ownership"));

    let json_job = JobRequirement::from_file(Path::new("tests/fixtures/job.json")).unwrap();
    assert_eq!(json_job.required_skills(), vec!["JavaScript", "React"]);
    assert!(json_job.job_text().ends_with("traits: N/A"));
}

#[test]
fn test_sectioning_scenario() {
    let resume = "Education\nB.Tech CS\nSkills\n• python, sql\nExperience\n2 years as engineer";
    let sections = classify(resume);

    assert_eq!(sections.education, vec!["B.Tech CS"]);
    assert_eq!(extract_candidate_skills(&sections.skills), vec!["python", "sql"]);
    assert_eq!(sections.experience, vec!["2 years as engineer"]);
}

#[tokio::test]
async fn test_sample_resume_sections() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let sections = classify(&text);

    assert_eq!(sections.education, vec!["B.Tech in Computer Science, IIT Delhi"]);
    assert_eq!(
        extract_candidate_skills(&sections.skills),
        vec!["Python", "SQL", "Rust", "Docker", "Kubernetes"]
    );
    assert_eq!(sections.experience.len(), 2);
    assert_eq!(sections.positions_of_responsibility, vec!["Lead, University Coding Club"]);
    assert!(!sections.iter().any(|(_, lines)| lines.iter().any(|l| l.contains("Hackathon"))));
}

#[tokio::test]
async fn test_end_to_end_evaluation() {
    let job = JobRequirement::from_file(Path::new("tests/fixtures/job.toml")).unwrap();
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let evaluation = hashing_evaluator()
        .evaluate(
            &job,
            Some(0),
            &Submission {
                username: "jane".to_string(),
                filename: "sample_resume.txt".to_string(),
                extracted_text: text,
            },
        )
        .unwrap();

    assert!((0.0..=100.0).contains(&evaluation.relevance_score));
    assert_eq!(evaluation.gap_analysis.matching_skills, vec!["Python", "SQL"]);
    assert_eq!(evaluation.gap_analysis.missing_skills, vec!["Leadership"]);
    assert_eq!(
        evaluation.feedback,
        "The CV demonstrates relevant skills like Python, SQL, which align well with the job requirements. \
         The CV lacks some required skills such as Leadership. \
         The experience section matches the job's requirements."
    );
}

#[test]
fn test_related_resume_scores_higher_than_unrelated() {
    let provider = HashingProvider::new(512).unwrap();
    let job = JobRequirement::new("Data Engineer", "Python, SQL, Spark", "data pipelines").job_text();

    let related = "Data engineer building Python and SQL data pipelines with Spark";
    let unrelated = "Pastry chef specialising in sourdough and laminated doughs";

    let related_score = relevance::score(&provider, &job, related);
    let unrelated_score = relevance::score(&provider, &job, unrelated);
    assert!(related_score > unrelated_score);
}

#[test]
fn test_provider_is_shareable_across_threads() {
    let provider: std::sync::Arc<dyn EmbeddingProvider> = std::sync::Arc::new(HashingProvider::new(64).unwrap());
    let job = "Rust developer with systems experience";
    let resume = "Systems developer writing Rust";

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            std::thread::spawn(move || relevance::score(provider.as_ref(), job, resume))
        })
        .collect();

    let scores: Vec<f32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_blank_resume_feedback() {
    let job = JobRequirement::new("Dev", "Rust", "years");
    assert_eq!(
        feedback(&job, &classify(""), "", 0.0),
        "Unable to evaluate CV: No readable content found."
    );
}

#[test]
fn test_evaluation_log_upsert_roundtrip() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let log_path = temp_dir.path().join("evaluations.json");
    let evaluator = hashing_evaluator();
    let job = JobRequirement::new("Dev", "Rust", "backend");

    for text in ["Skills\n• Rust", "Skills\n• Rust, Go\nExperience\nBackend developer"] {
        let evaluation = evaluator
            .evaluate(
                &job,
                Some(7),
                &Submission {
                    username: "sam".to_string(),
                    filename: "sam.txt".to_string(),
                    extracted_text: text.to_string(),
                },
            )
            .unwrap();

        let mut log = EvaluationLog::open(&log_path).unwrap();
        log.record(evaluation);
        log.save().unwrap();
    }

    let log = EvaluationLog::open(&log_path).unwrap();
    assert_eq!(log.entries().len(), 1);
    assert!(log.entries()[0].gap_analysis.experience_match);
}

#[test]
fn test_evaluation_log_lists_by_job() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let log_path = temp_dir.path().join("evaluations.json");
    let evaluator = hashing_evaluator();
    let backend = JobRequirement::new("Backend Developer", "Rust, SQL", "backend");
    let frontend = JobRequirement::new("Frontend Developer", "JavaScript, React", "frontend");

    let mut log = EvaluationLog::open(&log_path).unwrap();
    for (username, job, job_id) in [("sam", &backend, 1), ("kim", &backend, 1), ("sam", &frontend, 2)] {
        let evaluation = evaluator
            .evaluate(
                job,
                Some(job_id),
                &Submission {
                    username: username.to_string(),
                    filename: format!("{}.txt", username),
                    extracted_text: "Skills\n• Rust, React\nExperience\nBackend developer".to_string(),
                },
            )
            .unwrap();
        log.record(evaluation);
    }
    log.save().unwrap();

    let log = EvaluationLog::open(&log_path).unwrap();
    assert_eq!(log.select(None).len(), 3);

    let backend_only = log.select(Some(1));
    assert_eq!(backend_only.len(), 2);
    assert!(backend_only.iter().all(|e| e.job_title == "Backend Developer"));

    let json = JsonFormatter::new(false).format_evaluations(&log.select(Some(2))).unwrap();
    let listed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["username"], "sam");
    assert_eq!(listed[0]["job_title"], "Frontend Developer");
}
