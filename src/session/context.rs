//! Session context: the aggregate the merge engine folds signals into
//!
//! Field names serialize as camelCase so snapshots line up with the JSON the
//! external extraction step produces and the checkpoint store persists.

use crate::scoring::weights::Section;
use serde::{Deserialize, Serialize};

/// Follow-up dimensions still unresolved for an experience. All true when an
/// experience is first mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedFlags {
    pub quantify: bool,
    pub tech_depth: bool,
    pub impact: bool,
}

impl Default for NeedFlags {
    fn default() -> Self {
        Self {
            quantify: true,
            tech_depth: true,
            impact: true,
        }
    }
}

impl NeedFlags {
    pub fn all_met(&self) -> bool {
        !self.quantify && !self.tech_depth && !self.impact
    }

    pub fn any_unmet(&self) -> bool {
        !self.all_met()
    }
}

/// One work/project entry under active discussion in the interview flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceInsight {
    pub id: String,
    pub label: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub timeframe: Option<String>,
    pub summary: Option<String>,
    pub metrics: Vec<String>,
    pub tech_highlights: Vec<String>,
    pub business_impact: Vec<String>,
    pub leadership_signals: Vec<String>,
    pub needs: NeedFlags,
}

impl Default for ExperienceInsight {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            role: None,
            company: None,
            timeframe: None,
            summary: None,
            metrics: Vec::new(),
            tech_highlights: Vec::new(),
            business_impact: Vec::new(),
            leadership_signals: Vec::new(),
            needs: NeedFlags::default(),
        }
    }
}

impl ExperienceInsight {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Context,
    Quantify,
    TechDepth,
    Impact,
    Leadership,
    JdGap,
}

/// A system-generated prompt targeting one unmet information need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpQuestion {
    pub id: String,
    pub question_type: QuestionType,
    pub question: String,
    pub asked_turn: u32,
    pub experience_id: Option<String>,
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Pending,
    Applied,
    Rejected,
}

/// A drafted resume-bullet rewrite awaiting user approval. Drafting happens
/// in the external synthesis node; the merge engine only flags eligibility
/// and applies approval feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSuggestion {
    pub id: String,
    pub section: Section,
    pub experience_id: Option<String>,
    pub title: String,
    pub before: String,
    pub after: String,
    pub rationale: String,
    pub alignment: Vec<String>,
    pub status: SuggestionStatus,
}

/// Structured facts derived from the job description by the external parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdInsights {
    pub job_title: Option<String>,
    pub must_have_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub keywords: Vec<String>,
    pub seniority: Option<String>,
}

/// Aggregate root for one conversation session. Owned by the session; the
/// merge engine clones it before every mutation pass so callers can diff
/// against the previous snapshot without aliasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContext {
    pub target_role: Option<String>,
    pub target_company: Option<String>,
    pub resume_ready: Option<bool>,
    pub job_category: Option<String>,
    pub focus_strengths: Vec<String>,
    pub jd_text: Option<String>,
    pub jd_insights: Option<JdInsights>,
    pub experiences: Vec<ExperienceInsight>,
    pub follow_up_questions: Vec<FollowUpQuestion>,
    pub suggestions: Vec<ResumeSuggestion>,
}

impl ResumeContext {
    pub fn find_experience(&self, id: &str) -> Option<&ExperienceInsight> {
        self.experiences.iter().find(|e| e.id == id)
    }

    pub fn has_unresolved_questions(&self) -> bool {
        self.follow_up_questions.iter().any(|q| !q.resolved)
    }

    /// An experience is synthesis-ready when every need is satisfied and no
    /// suggestion references it yet.
    pub fn synthesis_ready(&self, experience: &ExperienceInsight) -> bool {
        experience.needs.all_met()
            && !self
                .suggestions
                .iter()
                .any(|s| s.experience_id.as_deref() == Some(experience.id.as_str()))
    }

    pub fn any_synthesis_ready(&self) -> bool {
        self.experiences.iter().any(|e| self.synthesis_ready(e))
    }
}
