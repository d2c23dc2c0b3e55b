//! Collaborator interfaces - everything the engine asks of the outside world.
//!
//! The engine only depends on these traits. The adapters in this module turn a
//! plain [`TextGenerator`] (a language model behind some client) into each
//! collaborator by building the prompt and parsing the reply.
//!
//! All calls are blocking; the engine waits for each one to return a value or
//! an error, and never retries.

mod asker;
mod feedback;
mod judge;
mod summarizer;
mod writer;

pub use asker::*;
pub use feedback::*;
pub use judge::*;
pub use summarizer::*;
pub use writer::*;

use story_graph::{Difficulty, QuestionNode};

use crate::error::CollaboratorError;

/// Free-text generation, typically a language model.
pub trait TextGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, CollaboratorError>,
{
    fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self(prompt)
    }
}

/// Binary verdict on a listener's answer.
pub trait AnswerJudge {
    /// `content` is the segment the question is anchored on.
    fn evaluate(
        &self,
        content: &str,
        question: &str,
        expected_answer: &str,
        listener_answer: &str,
    ) -> Result<bool, CollaboratorError>;
}

/// Condenses the story told so far.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String, CollaboratorError>;
}

/// Supplies the listener's answer to a question (speech, keyboard, UI).
pub trait Listener {
    fn answer(&mut self, question: &QuestionNode) -> Result<String, CollaboratorError>;
}

/// Produces a story text containing breakpoint symbols.
pub trait StoryGenerator {
    fn generate_story(&self, request: &StoryRequest) -> Result<String, CollaboratorError>;
}

/// Produces raw question output for one segment.
///
/// The output must contain the question/answer separator; the caller splits
/// and validates it (see [`split_question_answer`]).
pub trait QuestionGenerator {
    fn generate_question(
        &self,
        segment: &str,
        difficulty: Difficulty,
        language: &str,
        audience_age: u32,
    ) -> Result<String, CollaboratorError>;
}

impl<T: AnswerJudge + ?Sized> AnswerJudge for &T {
    fn evaluate(
        &self,
        content: &str,
        question: &str,
        expected_answer: &str,
        listener_answer: &str,
    ) -> Result<bool, CollaboratorError> {
        (**self).evaluate(content, question, expected_answer, listener_answer)
    }
}

impl<T: Summarizer + ?Sized> Summarizer for &T {
    fn summarize(&self, text: &str) -> Result<String, CollaboratorError> {
        (**self).summarize(text)
    }
}
