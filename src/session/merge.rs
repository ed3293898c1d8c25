//! The signal merge engine
//!
//! Folds one structured signal payload into a [`ResumeContext`] snapshot:
//! experiences accumulate facts, answered questions resolve, missing
//! follow-ups are generated and suggestion feedback is applied. Pure
//! transform — no I/O, no domain errors; unresolvable references fall back
//! instead of raising.

use crate::session::context::{
    ExperienceInsight, FollowUpQuestion, NeedFlags, ResumeContext, SuggestionStatus,
};
use crate::session::questions::{question_text, NeedDimension, QuestionLanguage};
use crate::session::signals::{
    ExperienceUpdate, FeedbackDecision, FollowUpAnswer, Signals, SuggestionFeedback,
};
use log::debug;

/// Result of one merge pass: the new snapshot plus what changed in terms the
/// orchestration layer routes on.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub context: ResumeContext,
    pub resolved_question_ids: Vec<String>,
    pub pending_synthesis: bool,
}

/// Merge with English follow-up templates. See [`merge_signals_localized`].
pub fn merge_signals(context: &ResumeContext, signals: &Signals, turn: u32) -> MergeOutcome {
    merge_signals_localized(context, signals, turn, QuestionLanguage::English)
}

/// Merge one signal payload into a cloned context snapshot.
pub fn merge_signals_localized(
    context: &ResumeContext,
    signals: &Signals,
    turn: u32,
    language: QuestionLanguage,
) -> MergeOutcome {
    let mut ctx = context.clone();

    merge_scalars(&mut ctx, signals);

    for update in &signals.experiences {
        apply_experience_update(&mut ctx, update);
    }

    let resolved_question_ids = apply_follow_up_answers(&mut ctx, &signals.follow_up_answers);

    generate_questions(&mut ctx, turn, language);

    let pending_synthesis = ctx.any_synthesis_ready();

    for feedback in &signals.suggestion_feedback {
        apply_suggestion_feedback(&mut ctx, feedback);
    }

    debug!(
        "merged signals at turn {}: {} experiences, {} open questions, pending_synthesis={}",
        turn,
        ctx.experiences.len(),
        ctx.follow_up_questions.iter().filter(|q| !q.resolved).count(),
        pending_synthesis
    );

    MergeOutcome {
        context: ctx,
        resolved_question_ids,
        pending_synthesis,
    }
}

fn merge_scalars(ctx: &mut ResumeContext, signals: &Signals) {
    if let Some(role) = &signals.target_role {
        ctx.target_role = Some(role.clone());
    }
    if let Some(company) = &signals.target_company {
        ctx.target_company = Some(company.clone());
    }
    if let Some(ready) = signals.resume_ready {
        ctx.resume_ready = Some(ready);
    }
    if let Some(category) = &signals.job_category {
        ctx.job_category = Some(category.clone());
    }
    if let Some(jd_text) = &signals.jd_text {
        ctx.jd_text = Some(jd_text.clone());
    }
    if let Some(insights) = &signals.jd_insights {
        ctx.jd_insights = Some(insights.clone());
    }
    merge_unique(&mut ctx.focus_strengths, &signals.focus_strengths);
}

/// Trim-then-set-union: first-seen order preserved, duplicates and
/// blank entries dropped. Comparison is case-sensitive.
fn merge_unique(existing: &mut Vec<String>, incoming: &[String]) {
    for entry in incoming {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !existing.iter().any(|e| e == trimmed) {
            existing.push(trimmed.to_string());
        }
    }
}

/// Resolve the target of an experience update: id first, then
/// case-insensitive trimmed label, then (when neither was given) the most
/// recently added experience.
fn resolve_experience_index(ctx: &ResumeContext, update: &ExperienceUpdate) -> Option<usize> {
    if let Some(id) = &update.id {
        if let Some(index) = ctx.experiences.iter().position(|e| &e.id == id) {
            return Some(index);
        }
    }
    if let Some(label) = &update.label {
        let needle = label.trim().to_lowercase();
        if let Some(index) = ctx
            .experiences
            .iter()
            .position(|e| e.label.trim().to_lowercase() == needle)
        {
            return Some(index);
        }
    }
    if update.id.is_none() && update.label.is_none() && !ctx.experiences.is_empty() {
        return Some(ctx.experiences.len() - 1);
    }
    None
}

fn apply_experience_update(ctx: &mut ResumeContext, update: &ExperienceUpdate) {
    match resolve_experience_index(ctx, update) {
        Some(index) => {
            let experience = &mut ctx.experiences[index];
            overwrite_if_present(&mut experience.role, &update.role);
            overwrite_if_present(&mut experience.company, &update.company);
            overwrite_if_present(&mut experience.timeframe, &update.timeframe);
            overwrite_if_present(&mut experience.summary, &update.summary);
            merge_unique(&mut experience.metrics, &update.metrics);
            merge_unique(&mut experience.tech_highlights, &update.tech_highlights);
            merge_unique(&mut experience.business_impact, &update.business_impact);
            merge_unique(&mut experience.leadership_signals, &update.leadership_signals);
            apply_needs_override(&mut experience.needs, update);
        }
        None => {
            let sequence = ctx.experiences.len() + 1;
            let id = update
                .id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| format!("exp-{}", sequence));
            let label = update
                .label
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Experience {}", sequence));

            let mut experience = ExperienceInsight::new(id, label);
            experience.role = update.role.clone();
            experience.company = update.company.clone();
            experience.timeframe = update.timeframe.clone();
            experience.summary = update.summary.clone();
            merge_unique(&mut experience.metrics, &update.metrics);
            merge_unique(&mut experience.tech_highlights, &update.tech_highlights);
            merge_unique(&mut experience.business_impact, &update.business_impact);
            merge_unique(&mut experience.leadership_signals, &update.leadership_signals);
            apply_needs_override(&mut experience.needs, update);
            ctx.experiences.push(experience);
        }
    }
}

fn overwrite_if_present(target: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        *target = Some(value.clone());
    }
}

fn apply_needs_override(needs: &mut NeedFlags, update: &ExperienceUpdate) {
    if let Some(overrides) = &update.needs {
        if let Some(quantify) = overrides.quantify {
            needs.quantify = quantify;
        }
        if let Some(tech_depth) = overrides.tech_depth {
            needs.tech_depth = tech_depth;
        }
        if let Some(impact) = overrides.impact {
            needs.impact = impact;
        }
    }
}

fn apply_follow_up_answers(ctx: &mut ResumeContext, answers: &[FollowUpAnswer]) -> Vec<String> {
    let mut resolved_ids = Vec::new();

    for answer in answers {
        let mut question_experience_id: Option<String> = None;

        if let Some(follow_up_id) = &answer.follow_up_id {
            if let Some(question) = ctx
                .follow_up_questions
                .iter_mut()
                .find(|q| &q.id == follow_up_id)
            {
                question_experience_id = question.experience_id.clone();
                if !question.resolved {
                    question.resolved = true;
                    resolved_ids.push(question.id.clone());
                }
            }
        }

        if !answer.has_insight_data() {
            continue;
        }

        let index = match resolve_answer_target(ctx, question_experience_id.as_deref(), answer) {
            Some(index) => index,
            None => continue,
        };

        let experience = &mut ctx.experiences[index];
        merge_unique(&mut experience.metrics, &answer.metrics);
        merge_unique(&mut experience.tech_highlights, &answer.tech_highlights);
        merge_unique(&mut experience.business_impact, &answer.business_impact);
        merge_unique(&mut experience.leadership_signals, &answer.leadership_signals);

        if !answer.metrics.is_empty() {
            experience.needs.quantify = false;
        }
        if !answer.tech_highlights.is_empty() {
            experience.needs.tech_depth = false;
        }
        if !answer.business_impact.is_empty() {
            experience.needs.impact = false;
        }
    }

    resolved_ids
}

/// Route answer insight data to an experience: the question's experience if
/// known, else the stated label (created on miss), else the most recent one.
fn resolve_answer_target(
    ctx: &mut ResumeContext,
    question_experience_id: Option<&str>,
    answer: &FollowUpAnswer,
) -> Option<usize> {
    if let Some(id) = question_experience_id {
        if let Some(index) = ctx.experiences.iter().position(|e| e.id == id) {
            return Some(index);
        }
    }
    if let Some(label) = &answer.experience_label {
        let needle = label.trim().to_lowercase();
        if let Some(index) = ctx
            .experiences
            .iter()
            .position(|e| e.label.trim().to_lowercase() == needle)
        {
            return Some(index);
        }
        let id = format!("exp-{}", ctx.experiences.len() + 1);
        ctx.experiences
            .push(ExperienceInsight::new(id, label.trim().to_string()));
        return Some(ctx.experiences.len() - 1);
    }
    if ctx.experiences.is_empty() {
        None
    } else {
        Some(ctx.experiences.len() - 1)
    }
}

/// One unresolved question per unmet dimension per experience; nothing is
/// asked twice while the previous question is still open.
fn generate_questions(ctx: &mut ResumeContext, turn: u32, language: QuestionLanguage) {
    let mut batch: Vec<FollowUpQuestion> = Vec::new();

    for experience in &ctx.experiences {
        for dimension in NeedDimension::ALL {
            let unmet = match dimension {
                NeedDimension::Quantify => experience.needs.quantify,
                NeedDimension::TechDepth => experience.needs.tech_depth,
                NeedDimension::Impact => experience.needs.impact,
            };
            if !unmet {
                continue;
            }

            let question_type = dimension.question_type();
            let already_open = ctx
                .follow_up_questions
                .iter()
                .chain(batch.iter())
                .any(|q| {
                    !q.resolved
                        && q.question_type == question_type
                        && q.experience_id.as_deref() == Some(experience.id.as_str())
                });
            if already_open {
                continue;
            }

            batch.push(FollowUpQuestion {
                id: format!("q-{}-{}-t{}", experience.id, dimension.as_str(), turn),
                question_type,
                question: question_text(language, dimension, &experience.label),
                asked_turn: turn,
                experience_id: Some(experience.id.clone()),
                resolved: false,
            });
        }
    }

    ctx.follow_up_questions.extend(batch);
}

fn apply_suggestion_feedback(ctx: &mut ResumeContext, feedback: &SuggestionFeedback) {
    let suggestion = match ctx
        .suggestions
        .iter_mut()
        .find(|s| s.id == feedback.suggestion_id)
    {
        Some(suggestion) => suggestion,
        None => return,
    };

    suggestion.status = match feedback.decision {
        FeedbackDecision::Approve => SuggestionStatus::Applied,
        FeedbackDecision::Reject => SuggestionStatus::Rejected,
        FeedbackDecision::Revise => SuggestionStatus::Pending,
    };

    if feedback.decision != FeedbackDecision::Approve {
        if let Some(reason) = &feedback.reason {
            let reason = reason.trim();
            if !reason.is_empty() {
                let note = format!(" | user feedback: {}", reason);
                // Repeating the same reason must not grow the rationale
                if !suggestion.rationale.contains(&note) {
                    suggestion.rationale.push_str(&note);
                }
            }
        }
    }
}
