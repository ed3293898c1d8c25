//! Match scoring between resume sections and a job description

pub mod scorer;
pub mod similarity;
pub mod text;
pub mod weights;

pub use scorer::{score_resume, MatchReport, Route};
pub use similarity::cosine_similarity;
pub use text::{extract_resume_sections_text, strip_html_to_text, ResumeSectionTexts};
pub use weights::{normalize_weights, weighted_average, PartialScoreWeights, ScoreBreakdown, ScoreWeights, Section};
