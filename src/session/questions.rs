//! Follow-up question templates, keyed by need dimension

use crate::session::context::QuestionType;
use serde::{Deserialize, Serialize};

/// Language for generated follow-up questions. The product surface is
/// bilingual; templates exist for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionLanguage {
    English,
    Chinese,
}

/// The three follow-up dimensions tracked per experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedDimension {
    Quantify,
    TechDepth,
    Impact,
}

impl NeedDimension {
    pub const ALL: [NeedDimension; 3] = [
        NeedDimension::Quantify,
        NeedDimension::TechDepth,
        NeedDimension::Impact,
    ];

    pub fn question_type(&self) -> QuestionType {
        match self {
            NeedDimension::Quantify => QuestionType::Quantify,
            NeedDimension::TechDepth => QuestionType::TechDepth,
            NeedDimension::Impact => QuestionType::Impact,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedDimension::Quantify => "quantify",
            NeedDimension::TechDepth => "tech_depth",
            NeedDimension::Impact => "impact",
        }
    }
}

/// Render the follow-up question for one unmet dimension of one experience.
pub fn question_text(language: QuestionLanguage, dimension: NeedDimension, label: &str) -> String {
    match (language, dimension) {
        (QuestionLanguage::English, NeedDimension::Quantify) => format!(
            "Can you put numbers on your work on \"{}\"? Think scale, latency, revenue, users or cost savings.",
            label
        ),
        (QuestionLanguage::English, NeedDimension::TechDepth) => format!(
            "What was the hardest technical problem you solved on \"{}\", and how did you approach it?",
            label
        ),
        (QuestionLanguage::English, NeedDimension::Impact) => format!(
            "What changed for the business or the team because of your work on \"{}\"?",
            label
        ),
        (QuestionLanguage::Chinese, NeedDimension::Quantify) => format!(
            "你在「{}」的工作可以用数字量化吗？比如规模、延迟、营收、用户量或成本节省。",
            label
        ),
        (QuestionLanguage::Chinese, NeedDimension::TechDepth) => format!(
            "你在「{}」中解决过最难的技术问题是什么？是怎么解决的？",
            label
        ),
        (QuestionLanguage::Chinese, NeedDimension::Impact) => format!(
            "你在「{}」的工作给业务或团队带来了什么改变？",
            label
        ),
    }
}
