//! Story generation through a language model, with breakpoint down-selection.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{StoryGenerator, TextGenerator};
use crate::config::StoryConfig;
use crate::error::CollaboratorError;

/// Parameters for one generated story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub number_phrases: u32,
    pub characters: Vec<String>,
    pub age_of_the_audience: u32,
    pub language: String,
    /// Appended to the prompt when not empty.
    pub story_context: String,
}

impl StoryRequest {
    /// Request described by a story config.
    pub fn from_config(config: &StoryConfig) -> Self {
        Self {
            number_phrases: config.number_phrases,
            characters: config.characters.clone(),
            age_of_the_audience: config.age_of_the_audience,
            language: config.language.clone(),
            story_context: config.story_context.clone(),
        }
    }
}

/// Writes stories with a text generator.
pub struct Writer<G> {
    generator: G,
    number_of_breakpoints: usize,
    breakpoint_symbol: String,
}

impl<G: TextGenerator> Writer<G> {
    pub fn new(generator: G, number_of_breakpoints: usize, breakpoint_symbol: impl Into<String>) -> Self {
        Self {
            generator,
            number_of_breakpoints,
            breakpoint_symbol: breakpoint_symbol.into(),
        }
    }

    pub fn from_config(generator: G, config: &StoryConfig) -> Self {
        Self::new(generator, config.number_of_breakpoints, config.breakpoint_symbol.as_str())
    }

    /// Build the story prompt for `request`.
    pub fn prompt(&self, request: &StoryRequest) -> String {
        let characters = request.characters.join(", ");
        let age = request.age_of_the_audience;
        let symbol = &self.breakpoint_symbol;
        let mut prompt = format!(
            "Generate a story with {} phrases. \
             The story should be suitable for an audience of {age} years old. \
             The story should be about {characters}. \
             The story should contain a quest and be funny. \
             The story should contain vocabulary for {age} years old. \
             The story should be in {}. \
             The story should contain uniquely the story, no other text. \
             The story should contain breakpoints symbolized as breakpoint symbol: {symbol} where \
             a question can be asked about information already given in the story. Add only {} breakpoints. \
             Add in the beginning of the story something like Today we will tell you a story about {characters}. \
             and the quest .. Please help me to lead the characters to their goal. \
             the story will be told by a narrator like in Tonie stories. ",
            request.number_phrases, request.language, self.number_of_breakpoints,
        );
        if !request.story_context.is_empty() {
            prompt.push_str(&format!(
                " This is the context of the story: {}",
                request.story_context
            ));
        }
        prompt
    }

    /// Generate a story, keep at most `number_of_breakpoints` breakpoints chosen
    /// with `rng`, and flatten it to a single line.
    pub fn write<R: Rng + ?Sized>(
        &self,
        request: &StoryRequest,
        rng: &mut R,
    ) -> Result<String, CollaboratorError> {
        let story = self.generator.generate_text(&self.prompt(request))?;
        let story = handle_breakpoints(&story, &self.breakpoint_symbol, self.number_of_breakpoints, rng);
        Ok(story.replace('\n', " "))
    }
}

impl<G: TextGenerator> StoryGenerator for Writer<G> {
    fn generate_story(&self, request: &StoryRequest) -> Result<String, CollaboratorError> {
        self.write(request, &mut rand::thread_rng())
    }
}

/// Keep `keep` randomly chosen occurrences of `symbol` in `story` and drop the rest.
///
/// Stories with `keep` or fewer breakpoints are returned unchanged.
pub fn handle_breakpoints<R: Rng + ?Sized>(story: &str, symbol: &str, keep: usize, rng: &mut R) -> String {
    if symbol.is_empty() {
        return story.to_string();
    }

    let positions: Vec<usize> = story.match_indices(symbol).map(|(pos, _)| pos).collect();
    if positions.len() <= keep {
        return story.to_string();
    }

    let kept: Vec<usize> = positions.choose_multiple(rng, keep).copied().collect();
    tracing::debug!(found = positions.len(), keep, "down-selecting breakpoints");

    let mut result = String::with_capacity(story.len());
    let mut cursor = 0;
    for pos in positions {
        if kept.contains(&pos) {
            continue;
        }
        result.push_str(&story[cursor..pos]);
        cursor = pos + symbol.len();
    }
    result.push_str(&story[cursor..]);
    result
}
