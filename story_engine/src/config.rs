//! Story configuration loaded from TOML.
//!
//! ```toml
//! breakpoint_symbol = "||"
//! number_of_breakpoints = 3
//! question_difficulties = ["easy", "hard"]
//! age_of_the_audience = 6
//! language = "French"
//! seed = 42
//! ```
//!
//! Every key is optional and falls back to [`StoryConfig::default`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use story_graph::{Difficulty, DEFAULT_BREAKPOINT_SYMBOL};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for story generation, question generation, and graph building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Marker separating story segments.
    pub breakpoint_symbol: String,

    /// Breakpoints kept in a generated story.
    pub number_of_breakpoints: usize,

    /// One question is generated per difficulty at each breakpoint.
    pub question_difficulties: Vec<Difficulty>,

    pub age_of_the_audience: u32,

    pub language: String,

    /// Sentences requested from the story generator.
    pub number_phrases: u32,

    pub characters: Vec<String>,

    /// Free-form context appended to the story prompt.
    pub story_context: String,

    /// Seed for breakpoint down-selection. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            breakpoint_symbol: DEFAULT_BREAKPOINT_SYMBOL.to_string(),
            number_of_breakpoints: 3,
            question_difficulties: vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
            age_of_the_audience: 6,
            language: "French".to_string(),
            number_phrases: 15,
            characters: vec!["Mickey".to_string(), "Donald".to_string()],
            story_context: String::new(),
            seed: None,
        }
    }
}

impl StoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: StoryConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded story config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "breakpoint_symbol must not be empty".to_string(),
            ));
        }
        if self.question_difficulties.is_empty() {
            return Err(ConfigError::Invalid(
                "question_difficulties must list at least one difficulty".to_string(),
            ));
        }
        Ok(())
    }

    /// Random source for breakpoint down-selection.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
