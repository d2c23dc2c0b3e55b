//! Testing utilities for the story engine.
//!
//! Deterministic stand-ins for the collaborators, so play-throughs can be
//! scripted without a language model or a microphone:
//! - `ScriptedListener` answers from a fixed list
//! - `ExpectedAnswerJudge` accepts answers matching the expected one
//! - `RecordingSummarizer` returns a canned summary and remembers its input
//! - `ScriptedGenerator` replays queued text generator responses

use std::cell::RefCell;
use std::collections::VecDeque;

use story_graph::QuestionNode;

use crate::collaborators::{AnswerJudge, Listener, Summarizer, TextGenerator};
use crate::error::CollaboratorError;

/// A listener that gives scripted answers in order.
///
/// Running out of answers is a collaborator error, like a dropped microphone.
#[derive(Debug, Clone, Default)]
pub struct ScriptedListener {
    answers: VecDeque<String>,
    /// Questions heard so far, in order.
    pub heard: Vec<String>,
}

impl ScriptedListener {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            heard: Vec::new(),
        }
    }

    /// Answers not yet given.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Listener for ScriptedListener {
    fn answer(&mut self, question: &QuestionNode) -> Result<String, CollaboratorError> {
        self.heard.push(question.question().to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| CollaboratorError::message("listener has no more answers"))
    }
}

/// Accepts an answer when it equals the expected one, ignoring case and
/// surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedAnswerJudge;

impl AnswerJudge for ExpectedAnswerJudge {
    fn evaluate(
        &self,
        _content: &str,
        _question: &str,
        expected_answer: &str,
        listener_answer: &str,
    ) -> Result<bool, CollaboratorError> {
        Ok(expected_answer.trim().to_lowercase() == listener_answer.trim().to_lowercase())
    }
}

/// Returns a fixed summary and records every text it was given.
#[derive(Debug, Default)]
pub struct RecordingSummarizer {
    summary: String,
    received: RefCell<Vec<String>>,
}

impl RecordingSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            received: RefCell::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.borrow().clone()
    }
}

impl Summarizer for RecordingSummarizer {
    fn summarize(&self, text: &str) -> Result<String, CollaboratorError> {
        self.received.borrow_mut().push(text.to_string());
        Ok(self.summary.clone())
    }
}

/// A text generator that replays queued responses and records prompts.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| CollaboratorError::message("generator has no more responses"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::{Difficulty, NodeId};

    #[test]
    fn test_scripted_listener_runs_out() {
        let question = QuestionNode::new(NodeId::question(0, 0), "Q?", "A", Difficulty::Easy);
        let mut listener = ScriptedListener::new(["first"]);

        assert_eq!(listener.answer(&question).unwrap(), "first");
        assert!(listener.answer(&question).is_err());
        assert_eq!(listener.heard, vec!["Q?", "Q?"]);
    }

    #[test]
    fn test_expected_answer_judge() {
        let judge = ExpectedAnswerJudge;
        assert!(judge.evaluate("", "", "Orange", " orange ").unwrap());
        assert!(!judge.evaluate("", "", "Orange", "blue").unwrap());
    }

    #[test]
    fn test_scripted_generator_replays() {
        let generator = ScriptedGenerator::new(["one", "two"]);
        assert_eq!(generator.generate_text("p1").unwrap(), "one");
        assert_eq!(generator.generate_text("p2").unwrap(), "two");
        assert!(generator.generate_text("p3").is_err());
        assert_eq!(generator.prompts(), vec!["p1", "p2", "p3"]);
    }
}
