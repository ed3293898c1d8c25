//! Structured signal payloads produced by the external extraction step
//!
//! Every field is optional — a signal is a partial update. Deserialization is
//! strict (`deny_unknown_fields`): payloads that do not match the schema are
//! rejected at this boundary instead of being silently coerced.

use crate::error::{Result, ResumeCopilotError};
use crate::session::context::JdInsights;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Signals {
    pub target_role: Option<String>,
    pub target_company: Option<String>,
    pub resume_ready: Option<bool>,
    pub job_category: Option<String>,
    pub focus_strengths: Vec<String>,
    pub jd_text: Option<String>,
    pub jd_insights: Option<JdInsights>,
    pub experiences: Vec<ExperienceUpdate>,
    pub follow_up_answers: Vec<FollowUpAnswer>,
    pub suggestion_feedback: Vec<SuggestionFeedback>,
}

/// Partial update for one experience. Resolution order: `id`, then
/// case-insensitive trimmed `label`, then the most recently added experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ExperienceUpdate {
    pub id: Option<String>,
    pub label: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub timeframe: Option<String>,
    pub summary: Option<String>,
    pub metrics: Vec<String>,
    pub tech_highlights: Vec<String>,
    pub business_impact: Vec<String>,
    pub leadership_signals: Vec<String>,
    pub needs: Option<NeedsUpdate>,
}

impl ExperienceUpdate {
    fn is_hollow(&self) -> bool {
        self.id.is_none()
            && self.label.is_none()
            && self.role.is_none()
            && self.company.is_none()
            && self.timeframe.is_none()
            && self.summary.is_none()
            && self.metrics.is_empty()
            && self.tech_highlights.is_empty()
            && self.business_impact.is_empty()
            && self.leadership_signals.is_empty()
            && self.needs.is_none()
    }
}

/// Per-dimension need overrides; only dimensions present are touched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct NeedsUpdate {
    pub quantify: Option<bool>,
    pub tech_depth: Option<bool>,
    pub impact: Option<bool>,
}

/// A user reply attributed to a follow-up question, possibly carrying new
/// facts for the question's experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FollowUpAnswer {
    pub follow_up_id: Option<String>,
    pub experience_label: Option<String>,
    pub metrics: Vec<String>,
    pub tech_highlights: Vec<String>,
    pub business_impact: Vec<String>,
    pub leadership_signals: Vec<String>,
}

impl FollowUpAnswer {
    pub fn has_insight_data(&self) -> bool {
        !self.metrics.is_empty()
            || !self.tech_highlights.is_empty()
            || !self.business_impact.is_empty()
            || !self.leadership_signals.is_empty()
    }

    fn is_hollow(&self) -> bool {
        self.follow_up_id.is_none() && self.experience_label.is_none() && !self.has_insight_data()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackDecision {
    Approve,
    Reject,
    Revise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuggestionFeedback {
    pub suggestion_id: String,
    pub decision: FeedbackDecision,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Signals {
    /// Parse and validate an extractor payload. Shape mismatches and hollow
    /// entries are rejected, never coerced.
    pub fn from_value(value: Value) -> Result<Signals> {
        let signals: Signals = serde_json::from_value(value)?;
        signals.validate()?;
        Ok(signals)
    }

    pub fn validate(&self) -> Result<()> {
        for (index, update) in self.experiences.iter().enumerate() {
            if update.is_hollow() {
                return Err(ResumeCopilotError::InvalidSignal(format!(
                    "experience update #{} carries no identifier and no content",
                    index
                )));
            }
        }
        for (index, answer) in self.follow_up_answers.iter().enumerate() {
            if answer.is_hollow() {
                return Err(ResumeCopilotError::InvalidSignal(format!(
                    "follow-up answer #{} has no question id, label or insight data",
                    index
                )));
            }
        }
        for (index, feedback) in self.suggestion_feedback.iter().enumerate() {
            if feedback.suggestion_id.trim().is_empty() {
                return Err(ResumeCopilotError::InvalidSignal(format!(
                    "suggestion feedback #{} has a blank suggestion id",
                    index
                )));
            }
        }
        Ok(())
    }
}
