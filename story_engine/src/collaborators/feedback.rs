//! Short spoken feedback after an answer has been judged.

use super::TextGenerator;
use crate::error::CollaboratorError;

/// Build the prompt for feedback on a right or wrong answer, in `language`.
pub fn feedback_prompt(correct: bool, language: &str) -> String {
    let mut prompt = if correct {
        "Create a short feedback for the correct answer. Like this one: \
         Well done !! You gave the correct answer. Give only the positive feedback."
            .to_string()
    } else {
        "Create a super short feedback for the incorrect answer. \
         Give only the negative but encouraging feedback. Example \
         of the feedback: Unfortunately the answer is wrong, you will do \
         better next time."
            .to_string()
    };
    if !language.is_empty() {
        prompt.push_str(&format!(" Give the feedback in {language}"));
    }
    prompt
}

/// Generates encouraging feedback with a text generator.
pub struct Encourager<G> {
    generator: G,
    language: String,
}

impl<G: TextGenerator> Encourager<G> {
    pub fn new(generator: G, language: impl Into<String>) -> Self {
        Self {
            generator,
            language: language.into(),
        }
    }

    pub fn feedback(&self, correct: bool) -> Result<String, CollaboratorError> {
        self.generator
            .generate_text(&feedback_prompt(correct, &self.language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGenerator;

    #[test]
    fn test_prompt_depends_on_verdict() {
        let right = feedback_prompt(true, "French");
        let wrong = feedback_prompt(false, "French");

        assert!(right.contains("positive feedback"));
        assert!(wrong.contains("encouraging"));
        assert!(right.ends_with("Give the feedback in French"));
        assert!(wrong.ends_with("Give the feedback in French"));
    }

    #[test]
    fn test_empty_language_adds_nothing() {
        assert!(!feedback_prompt(true, "").contains("Give the feedback in"));
    }

    #[test]
    fn test_feedback_uses_generator() {
        let encourager = Encourager::new(ScriptedGenerator::new(["Bravo !"]), "French");
        assert_eq!(encourager.feedback(true).unwrap(), "Bravo !");
        assert!(encourager.feedback(false).is_err());
    }
}
