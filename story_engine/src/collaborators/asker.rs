//! Question generation for every breakpoint of a story.

use story_graph::{Difficulty, GraphError, QuestionAnswer};

use super::{QuestionGenerator, TextGenerator};
use crate::error::{CollaboratorError, EngineError};

/// Separator the question generator must put between question and answer.
pub const QUESTION_ANSWER_SEPARATOR: &str = "||";

/// Generates comprehension questions with a text generator.
pub struct Asker<G> {
    generator: G,
}

impl<G: TextGenerator> Asker<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

/// Build the prompt for one question about `segment`.
pub fn question_prompt(segment: &str, difficulty: Difficulty, language: &str, audience_age: u32) -> String {
    format!(
        "Generate a question based on the story: {segment}.\
         The question should be at the difficulty level: {difficulty}.\
         The question should be in the language: {language}.\
         The question should be adapted for a {audience_age} years old.\
         Ask a question not a riddle. The goal is to develop the child's \
         intelligence in different cognitive skills.\
         The question should be related to the story and have the answer in the story.\
         The format of the output should be question and the answer separated by double pipes ||, \
         like this: what is the color of the cat? || orange"
    )
}

impl<G: TextGenerator> QuestionGenerator for Asker<G> {
    fn generate_question(
        &self,
        segment: &str,
        difficulty: Difficulty,
        language: &str,
        audience_age: u32,
    ) -> Result<String, CollaboratorError> {
        self.generator
            .generate_text(&question_prompt(segment, difficulty, language, audience_age))
    }
}

/// Split raw generator output into (question, answer).
///
/// # Errors
///
/// `GraphError::Validation` if the separator is missing.
pub fn split_question_answer(raw: &str) -> Result<(String, String), GraphError> {
    let (question, answer) = raw.split_once(QUESTION_ANSWER_SEPARATOR).ok_or_else(|| {
        GraphError::Validation(format!(
            "question output does not contain {QUESTION_ANSWER_SEPARATOR:?}: {raw}"
        ))
    })?;
    Ok((question.trim().to_string(), answer.trim().to_string()))
}

/// Generate one question per difficulty for every breakpoint of `story`.
///
/// The result has one list per breakpoint, ready for the graph builder. The
/// segment a question is about is the one just before its breakpoint.
pub fn generate_questions<Q: QuestionGenerator + ?Sized>(
    generator: &Q,
    story: &str,
    breakpoint_symbol: &str,
    difficulties: &[Difficulty],
    audience_age: u32,
    language: &str,
) -> Result<Vec<Vec<QuestionAnswer>>, EngineError> {
    if breakpoint_symbol.is_empty() {
        return Err(GraphError::Validation("breakpoint symbol must not be empty".to_string()).into());
    }

    let segments: Vec<&str> = story.split(breakpoint_symbol).collect();
    let breakpoints = segments.len() - 1;
    let mut all_questions = Vec::with_capacity(breakpoints);

    for (index, segment) in segments.iter().take(breakpoints).enumerate() {
        let mut questions = Vec::with_capacity(difficulties.len());
        for &difficulty in difficulties {
            let raw = generator
                .generate_question(segment, difficulty, language, audience_age)
                .map_err(EngineError::collaborator("question generator"))?;
            let (question, answer) = split_question_answer(&raw)?;
            questions.push(QuestionAnswer::new(question, answer, difficulty));
        }
        tracing::debug!(breakpoint = index, count = questions.len(), "generated questions");
        all_questions.push(questions);
    }

    Ok(all_questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_question_answer() {
        let (q, a) = split_question_answer("what is the color of the cat? || orange").unwrap();
        assert_eq!(q, "what is the color of the cat?");
        assert_eq!(a, "orange");
    }

    #[test]
    fn test_split_keeps_later_separators_in_answer() {
        let (_, a) = split_question_answer("q || a || b").unwrap();
        assert_eq!(a, "a || b");
    }

    #[test]
    fn test_missing_separator_is_validation_error() {
        let result = split_question_answer("What is the color of the cat? Orange");
        assert!(matches!(result, Err(GraphError::Validation(_))));
    }

    #[test]
    fn test_generate_questions_per_breakpoint() {
        let asker = Asker::new(|prompt: &str| -> Result<String, CollaboratorError> {
            let level = if prompt.contains("level: hard") { "hard" } else { "easy" };
            Ok(format!("A {level} question? || An answer"))
        });

        let questions = generate_questions(
            &asker,
            "Mickey arrive.||Donald mange une glace.||Fin.",
            "||",
            &[Difficulty::Easy, Difficulty::Hard],
            6,
            "French",
        )
        .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].len(), 2);
        assert_eq!(questions[0][0].question, "A easy question?");
        assert_eq!(questions[0][1].difficulty, Difficulty::Hard);
        assert_eq!(questions[1][1].question, "A hard question?");
        assert_eq!(questions[1][1].answer, "An answer");
    }

    #[test]
    fn test_prompt_is_about_preceding_segment() {
        let asker = Asker::new(|prompt: &str| -> Result<String, CollaboratorError> {
            Ok(if prompt.contains("story: First.") {
                "First? || yes".to_string()
            } else {
                "Other? || no".to_string()
            })
        });

        let questions =
            generate_questions(&asker, "First.||Second.", "||", &[Difficulty::Medium], 8, "English")
                .unwrap();
        assert_eq!(questions, vec![vec![QuestionAnswer::new("First?", "yes", Difficulty::Medium)]]);
    }

    #[test]
    fn test_bad_generator_output_aborts() {
        let asker = Asker::new(|_: &str| -> Result<String, CollaboratorError> {
            Ok("no separator here".to_string())
        });
        let result = generate_questions(&asker, "a||b", "||", &[Difficulty::Easy], 6, "French");
        assert!(matches!(
            result,
            Err(EngineError::Graph(GraphError::Validation(_)))
        ));
    }

    #[test]
    fn test_generator_failure_is_collaborator_error() {
        let asker = Asker::new(|_: &str| -> Result<String, CollaboratorError> {
            Err(CollaboratorError::message("quota exceeded"))
        });
        let result = generate_questions(&asker, "a||b", "||", &[Difficulty::Easy], 6, "French");
        assert!(matches!(
            result,
            Err(EngineError::Collaborator { role: "question generator", .. })
        ));
    }
}
