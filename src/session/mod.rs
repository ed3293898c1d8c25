//! Conversational session state: the resume context, signal merging and
//! phase derivation

pub mod context;
pub mod merge;
pub mod phase;
pub mod questions;
pub mod signals;

pub use context::{
    ExperienceInsight, FollowUpQuestion, JdInsights, NeedFlags, QuestionType, ResumeContext,
    ResumeSuggestion, SuggestionStatus,
};
pub use merge::{merge_signals, merge_signals_localized, MergeOutcome};
pub use phase::{derive_phase, RuntimePhase, RuntimeState};
pub use questions::QuestionLanguage;
pub use signals::{
    ExperienceUpdate, FeedbackDecision, FollowUpAnswer, NeedsUpdate, Signals, SuggestionFeedback,
};
