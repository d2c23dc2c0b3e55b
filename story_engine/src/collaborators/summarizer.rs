//! Story summarization through a language model.

use super::{Summarizer, TextGenerator};
use crate::error::CollaboratorError;

const RESUME_PROMPT: &str = "Resume the following story: ";

/// Summarizes the story so far with a text generator.
pub struct LlmSummarizer<G> {
    generator: G,
}

impl<G: TextGenerator> LlmSummarizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: TextGenerator> Summarizer for LlmSummarizer<G> {
    fn summarize(&self, text: &str) -> Result<String, CollaboratorError> {
        self.generator.generate_text(&format!("{RESUME_PROMPT}{text}"))
    }
}
