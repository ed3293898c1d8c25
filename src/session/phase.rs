//! Phase derivation
//!
//! The phase is never stored as a source of truth; it is recomputed from the
//! context plus a small runtime record every turn. Any (context, runtime)
//! pair maps to exactly one phase, so this is a total classification
//! function rather than a transition table with guards.

use crate::session::context::{ResumeContext, SuggestionStatus};
use serde::{Deserialize, Serialize};

/// Minimal per-session runtime counters kept outside the context.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeState {
    pub turn: u32,
    pub last_processed_message: usize,
    pub pending_synthesis: bool,
    pub awaiting_approval: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimePhase {
    Init,
    ParseJd,
    Interview,
    DeepDive,
    Synthesize,
    AwaitApproval,
    Validate,
    Complete,
}

/// Classify the current conversational phase. Guards are evaluated top-down;
/// an unresolved question wins over every other condition.
pub fn derive_phase(context: &ResumeContext, runtime: &RuntimeState) -> RuntimePhase {
    if context.has_unresolved_questions() {
        return RuntimePhase::Interview;
    }

    if context.target_role.is_none() || context.resume_ready.is_none() {
        return RuntimePhase::Init;
    }

    let jd_present = context
        .jd_text
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    if jd_present && context.jd_insights.is_none() {
        return RuntimePhase::ParseJd;
    }

    // Questions all resolved but a dimension is still unmet: probe deeper
    if context.experiences.iter().any(|e| e.needs.any_unmet()) {
        return RuntimePhase::DeepDive;
    }

    if runtime.pending_synthesis && context.any_synthesis_ready() {
        return RuntimePhase::Synthesize;
    }

    if context
        .suggestions
        .iter()
        .any(|s| s.status == SuggestionStatus::Pending)
    {
        return RuntimePhase::AwaitApproval;
    }

    if runtime.awaiting_approval
        && context
            .suggestions
            .iter()
            .any(|s| s.status == SuggestionStatus::Applied)
    {
        return RuntimePhase::Validate;
    }

    RuntimePhase::Complete
}
