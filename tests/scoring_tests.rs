//! Integration tests for the section scorer

use resume_copilot::embedding::{CachedEmbedder, EmbeddingCache, EmbeddingProvider, LexicalEmbedder};
use resume_copilot::error::{Result, ResumeCopilotError};
use resume_copilot::scoring::{
    extract_resume_sections_text, score_resume, PartialScoreWeights, ResumeSectionTexts,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic provider returning canned vectors, counting calls.
struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| ResumeCopilotError::Embedding(format!("no vector for: {}", text)))
    }
}

struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(ResumeCopilotError::Embedding("provider down".to_string()))
    }
}

fn summary_only_sections() -> ResumeSectionTexts {
    ResumeSectionTexts {
        summary: "built scalable systems".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_empty_jd_short_circuits_without_embedding_calls() {
    let provider = MockEmbedder::new(&[]);
    let report = score_resume(&summary_only_sections(), "", None, &provider)
        .await
        .unwrap();

    assert_eq!(report.score, 0.0);
    assert_eq!(report.breakdown.summary, 0.0);
    assert_eq!(report.breakdown.skills, 0.0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_markup_only_jd_counts_as_empty() {
    let provider = MockEmbedder::new(&[]);
    let report = score_resume(
        &summary_only_sections(),
        "<style>body{}</style> <p>&nbsp;</p>",
        None,
        &provider,
    )
    .await
    .unwrap();

    assert_eq!(report.score, 0.0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_resume_short_circuits_without_embedding_calls() {
    let provider = MockEmbedder::new(&[]);
    let report = score_resume(
        &ResumeSectionTexts::default(),
        "looking for a systems engineer",
        None,
        &provider,
    )
    .await
    .unwrap();

    assert_eq!(report.score, 0.0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_single_section_scores_its_own_similarity() {
    // summary-vs-JD cosine is 0.8; with every other section empty the
    // renormalized average must be exactly that similarity
    let provider = MockEmbedder::new(&[
        ("looking for a systems engineer", vec![1.0, 0.0]),
        ("built scalable systems", vec![0.8, 0.6]),
    ]);

    let report = score_resume(
        &summary_only_sections(),
        "looking for a systems engineer",
        None,
        &provider,
    )
    .await
    .unwrap();

    assert!((report.score - 0.8).abs() < 1e-9);
    assert!((report.breakdown.summary - 0.8).abs() < 1e-9);
    assert_eq!(report.breakdown.skills, 0.0);
    assert_eq!(report.breakdown.experience, 0.0);
    assert_eq!(report.breakdown.education, 0.0);
    assert_eq!(report.breakdown.projects, 0.0);
    // One call for the JD, one for the single non-empty section
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_sections_are_stripped_before_embedding() {
    // Provider is keyed by the cleaned text; a lookup miss would error
    let provider = MockEmbedder::new(&[
        ("systems engineer", vec![1.0, 0.0]),
        ("Built scalable systems", vec![1.0, 0.0]),
    ]);

    let sections = ResumeSectionTexts {
        summary: "<p>Built <b>scalable</b>&nbsp;systems</p>".to_string(),
        ..Default::default()
    };
    let report = score_resume(&sections, "<h1>systems engineer</h1>", None, &provider)
        .await
        .unwrap();

    assert!((report.score - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let result = score_resume(
        &summary_only_sections(),
        "looking for a systems engineer",
        None,
        &FailingEmbedder,
    )
    .await;

    assert!(matches!(result, Err(ResumeCopilotError::Embedding(_))));
}

#[tokio::test]
async fn test_custom_weights_are_normalized_in_report() {
    let provider = MockEmbedder::new(&[
        ("jd text", vec![1.0, 0.0]),
        ("summary text", vec![1.0, 0.0]),
        ("skills text", vec![0.0, 1.0]),
    ]);

    let sections = ResumeSectionTexts {
        summary: "summary text".to_string(),
        skills: "skills text".to_string(),
        ..Default::default()
    };
    let weights = PartialScoreWeights {
        summary: Some(1.0),
        skills: Some(3.0),
        experience: Some(0.0),
        education: Some(0.0),
        projects: Some(0.0),
    };

    let report = score_resume(&sections, "jd text", Some(&weights), &provider)
        .await
        .unwrap();

    // summary similarity 1.0 at weight 1/4, skills similarity 0.0 at 3/4
    assert!((report.score - 0.25).abs() < 1e-9);
    assert!((report.weights.summary - 0.25).abs() < 1e-9);
    assert!((report.weights.skills - 0.75).abs() < 1e-9);
}

#[tokio::test]
async fn test_cached_embedder_skips_repeat_calls() {
    let provider = MockEmbedder::new(&[
        ("looking for a systems engineer", vec![1.0, 0.0]),
        ("built scalable systems", vec![0.8, 0.6]),
    ]);
    let cache = EmbeddingCache::new(16);
    let cached = CachedEmbedder::new(&provider, &cache);

    let sections = summary_only_sections();
    let first = score_resume(&sections, "looking for a systems engineer", None, &cached)
        .await
        .unwrap();
    assert_eq!(provider.call_count(), 2);

    let second = score_resume(&sections, "looking for a systems engineer", None, &cached)
        .await
        .unwrap();
    assert_eq!(provider.call_count(), 2);
    assert_eq!(first.score, second.score);
}

#[tokio::test]
async fn test_fixture_resume_scores_against_fixture_jd() {
    let resume_raw = std::fs::read_to_string("tests/fixtures/sample_resume.json").unwrap();
    let resume: serde_json::Value = serde_json::from_str(&resume_raw).unwrap();
    let jd_text = std::fs::read_to_string("tests/fixtures/sample_jd.txt").unwrap();

    let sections = extract_resume_sections_text(&resume);
    assert!(sections.summary.contains("distributed systems"));
    assert!(sections.experience.contains("Acme Corp"));

    let corpus = [
        jd_text.as_str(),
        &sections.summary,
        &sections.skills,
        &sections.experience,
        &sections.education,
        &sections.projects,
    ];
    let embedder = LexicalEmbedder::fit(&corpus);

    let report = score_resume(&sections, &jd_text, None, &embedder).await.unwrap();

    assert!(report.score > 0.0);
    assert!(report.score <= 1.0);
    // The fixture resume overlaps the JD most through experience and skills
    assert!(report.breakdown.experience > 0.0);
    assert!(report.breakdown.skills > 0.0);
}
