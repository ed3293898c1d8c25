//! Resume / job-description match scoring

use crate::embedding::provider::EmbeddingProvider;
use crate::error::Result;
use crate::scoring::similarity::cosine_similarity;
use crate::scoring::text::{strip_html_to_text, ResumeSectionTexts};
use crate::scoring::weights::{
    normalize_weights, weighted_average_pairs, PartialScoreWeights, ScoreBreakdown, ScoreWeights,
    Section,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of one scoring call: the weighted match score in [0, 1], the
/// per-section breakdown and the normalized weights that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub weights: ScoreWeights,
}

/// Where the orchestration layer sends the conversation after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Match is good enough, finish the flow
    End,
    /// Score below threshold, hand off to the optimize node
    Optimize,
    /// No score available yet, keep chatting
    Chat,
}

impl Route {
    pub fn decide(score: Option<f64>, threshold: f64) -> Route {
        match score {
            None => Route::Chat,
            Some(s) if s >= threshold => Route::End,
            Some(_) => Route::Optimize,
        }
    }
}

/// Score a resume against a job description.
///
/// Strips markup from the JD and every section, short-circuits to an all-zero
/// report when either side is empty (no embedding calls are made), otherwise
/// embeds the JD and each non-empty section concurrently and averages the
/// clamped per-section cosine similarities, with weights renormalized over
/// the sections that actually have text.
///
/// Provider errors propagate; retry policy belongs to the caller.
pub async fn score_resume<P: EmbeddingProvider + Sync>(
    sections: &ResumeSectionTexts,
    jd_text: &str,
    weights: Option<&PartialScoreWeights>,
    provider: &P,
) -> Result<MatchReport> {
    let weights = normalize_weights(weights);
    let clean_jd = strip_html_to_text(jd_text);

    let clean_sections: Vec<(Section, String)> = Section::ALL
        .iter()
        .map(|s| (*s, strip_html_to_text(sections.get(*s))))
        .collect();

    let overall = if sections.overall.is_empty() {
        clean_sections
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    } else {
        strip_html_to_text(&sections.overall)
    };

    if clean_jd.is_empty() || overall.is_empty() {
        debug!("missing JD or resume content, score is 0");
        return Ok(MatchReport {
            score: 0.0,
            breakdown: ScoreBreakdown::default(),
            weights,
        });
    }

    let (jd_vec, summary, skills, experience, education, projects) = tokio::try_join!(
        provider.embed(&clean_jd),
        embed_non_empty(provider, &clean_sections[0].1),
        embed_non_empty(provider, &clean_sections[1].1),
        embed_non_empty(provider, &clean_sections[2].1),
        embed_non_empty(provider, &clean_sections[3].1),
        embed_non_empty(provider, &clean_sections[4].1),
    )?;

    let section_vecs = [summary, skills, experience, education, projects];
    let mut breakdown = ScoreBreakdown::default();
    let mut used: Vec<(f64, f64)> = Vec::new();
    for ((section, _), vector) in clean_sections.iter().zip(section_vecs.iter()) {
        if let Some(vector) = vector {
            let similarity = cosine_similarity(vector, &jd_vec).clamp(0.0, 1.0);
            breakdown.set(*section, similarity);
            used.push((similarity, weights.get(*section)));
        }
    }

    let score = weighted_average_pairs(used);
    debug!(
        "score={:.4} breakdown={:?} weights={:?}",
        score, breakdown, weights
    );

    Ok(MatchReport {
        score,
        breakdown,
        weights,
    })
}

async fn embed_non_empty<P: EmbeddingProvider + Sync>(
    provider: &P,
    text: &str,
) -> Result<Option<Vec<f32>>> {
    if text.is_empty() {
        Ok(None)
    } else {
        provider.embed(text).await.map(Some)
    }
}
