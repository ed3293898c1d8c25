//! Section weights and weighted score aggregation

use serde::{Deserialize, Serialize};

/// The five resume sections that participate in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
        }
    }
}

/// Per-section similarity values in [0, 1]. Produced once per scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub summary: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub projects: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, section: Section) -> f64 {
        match section {
            Section::Summary => self.summary,
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Projects => self.projects,
        }
    }

    pub fn set(&mut self, section: Section, value: f64) {
        match section {
            Section::Summary => self.summary = value,
            Section::Skills => self.skills = value,
            Section::Experience => self.experience = value,
            Section::Education => self.education = value,
            Section::Projects => self.projects = value,
        }
    }
}

/// Non-negative section weights, normalized to sum to 1 before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub summary: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub projects: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        // Balanced but emphasizing skills/experience
        Self {
            summary: 0.05,
            skills: 0.35,
            experience: 0.35,
            education: 0.10,
            projects: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn get(&self, section: Section) -> f64 {
        match section {
            Section::Summary => self.summary,
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Projects => self.projects,
        }
    }

    fn set(&mut self, section: Section, value: f64) {
        match section {
            Section::Summary => self.summary = value,
            Section::Skills => self.skills = value,
            Section::Experience => self.experience = value,
            Section::Education => self.education = value,
            Section::Projects => self.projects = value,
        }
    }
}

/// Caller-supplied weight overrides; any omitted field keeps its default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialScoreWeights {
    pub summary: Option<f64>,
    pub skills: Option<f64>,
    pub experience: Option<f64>,
    pub education: Option<f64>,
    pub projects: Option<f64>,
}

impl PartialScoreWeights {
    fn get(&self, section: Section) -> Option<f64> {
        match section {
            Section::Summary => self.summary,
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Projects => self.projects,
        }
    }
}

impl From<ScoreWeights> for PartialScoreWeights {
    fn from(w: ScoreWeights) -> Self {
        Self {
            summary: Some(w.summary),
            skills: Some(w.skills),
            experience: Some(w.experience),
            education: Some(w.education),
            projects: Some(w.projects),
        }
    }
}

/// Fill in missing, negative or non-finite weights from the defaults, then
/// rescale so the five weights sum to 1. A fully-zero input falls back to the
/// default set unchanged. Idempotent within floating-point tolerance.
pub fn normalize_weights(input: Option<&PartialScoreWeights>) -> ScoreWeights {
    let defaults = ScoreWeights::default();
    let mut base = defaults;
    let mut overridden = false;

    if let Some(partial) = input {
        for section in Section::ALL {
            if let Some(value) = partial.get(section) {
                if value.is_finite() && value >= 0.0 {
                    base.set(section, value);
                    overridden = true;
                }
            }
        }
    }
    if !overridden {
        return defaults;
    }

    let sum: f64 = Section::ALL.iter().map(|s| base.get(*s)).sum();
    if sum <= 0.0 {
        return defaults;
    }

    let mut out = base;
    for section in Section::ALL {
        out.set(section, base.get(section) / sum);
    }
    out
}

/// Weighted average of the breakdown over all five sections. Breakdown values
/// are clamped to [0, 1] and negative weights count as zero. Returns 0 when
/// no weight is positive.
pub fn weighted_average(breakdown: &ScoreBreakdown, weights: &ScoreWeights) -> f64 {
    let pairs = Section::ALL
        .iter()
        .map(|s| (breakdown.get(*s), weights.get(*s)));
    weighted_average_pairs(pairs)
}

/// Weighted average over an arbitrary subset of (value, weight) pairs. The
/// scorer uses this to renormalize over non-empty sections only.
pub fn weighted_average_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> f64 {
    let mut acc = 0.0;
    let mut wsum = 0.0;
    for (value, weight) in pairs {
        let w = weight.max(0.0);
        let v = value.clamp(0.0, 1.0);
        acc += w * v;
        wsum += w;
    }
    if wsum <= 0.0 {
        return 0.0;
    }
    acc / wsum
}
