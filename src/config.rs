//! Configuration management for the resume copilot

use crate::error::{Result, ResumeCopilotError};
use crate::scoring::weights::ScoreWeights;
use crate::session::questions::QuestionLanguage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub interview: InterviewConfig,
    pub embedding: EmbeddingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-section weights, normalized before use
    pub weights: ScoreWeights,
    /// Scores at or above this route to "end"; below, to the optimize node.
    /// Hand-tuned policy constant, not a derived value.
    pub route_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Language used for generated follow-up questions
    pub question_language: QuestionLanguage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Maximum number of text -> vector entries kept in the embedding cache
    pub cache_max_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                weights: ScoreWeights::default(),
                route_threshold: 0.70,
            },
            interview: InterviewConfig {
                question_language: QuestionLanguage::English,
            },
            embedding: EmbeddingConfig {
                cache_max_entries: 256,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeCopilotError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeCopilotError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-copilot")
            .join("config.toml")
    }
}
