//! Answer judging through a language model.

use super::{AnswerJudge, TextGenerator};
use crate::error::CollaboratorError;

/// Asks a text generator whether a listener's answer is close enough.
///
/// The model is told to reply `True` or `False`. Anything else is logged and
/// counted as correct, so an unreadable verdict never penalizes the listener.
pub struct LlmJudge<G> {
    generator: G,
}

impl<G: TextGenerator> LlmJudge<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

/// Build the judging prompt.
pub fn judge_prompt(
    content: &str,
    question: &str,
    expected_answer: &str,
    listener_answer: &str,
) -> String {
    format!(
        "The information is: {content}\
         The question is: {question}\
         The expected answer is something like: '{expected_answer}' and the listener answer is: '{listener_answer}'\
         The listener answer is correct if it is close to the expected answer.\
         The listener answer is correct if it is a synonym of the expected answer.\
         The listener answer is correct if it is a similar answer to the expected answer.\
         Tell me if the listener answer is correct or not by answering with True or False uniquely."
    )
}

/// Read a `True`/`False` reply. Unrecognized replies count as correct.
pub fn parse_verdict(response: &str) -> bool {
    let verdict = response.trim().to_lowercase();
    match verdict.as_str() {
        "true" => true,
        "false" => false,
        _ => {
            tracing::warn!(response, "unrecognized judge verdict, counting answer as correct");
            true
        }
    }
}

impl<G: TextGenerator> AnswerJudge for LlmJudge<G> {
    fn evaluate(
        &self,
        content: &str,
        question: &str,
        expected_answer: &str,
        listener_answer: &str,
    ) -> Result<bool, CollaboratorError> {
        let prompt = judge_prompt(content, question, expected_answer, listener_answer);
        let response = self.generator.generate_text(&prompt)?;
        Ok(parse_verdict(&response))
    }
}
