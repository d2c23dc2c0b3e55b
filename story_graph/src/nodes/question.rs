//! Question nodes and the records they are built from.

use serde::{Deserialize, Serialize};

use super::{NodeBase, NodeId};

/// Difficulty of a comprehension question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Selection precedence among sibling questions.
    pub const PRIORITY: [Difficulty; 3] = [Difficulty::Hard, Difficulty::Medium, Difficulty::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cognitive skill a question exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveArea {
    ShortMemory,
    MultipleChoice,
    LongMemory,
}

/// A comprehension question anchored after a narrative node.
///
/// Always has exactly one parent (the anchoring segment) and exactly one child
/// (the segment that follows the breakpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionNode {
    #[serde(flatten)]
    pub base: NodeBase,

    /// Expected answer.
    pub answer: String,

    pub difficulty: Difficulty,

    /// `None` is persisted as `null`.
    pub cognitive_area: Option<CognitiveArea>,
}

impl QuestionNode {
    /// Create an unlinked question node.
    pub fn new(
        id: NodeId,
        question: impl Into<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            base: NodeBase::new(id, question),
            answer: answer.into(),
            difficulty,
            cognitive_area: None,
        }
    }

    pub fn with_cognitive_area(mut self, area: CognitiveArea) -> Self {
        self.cognitive_area = Some(area);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.base.id
    }

    /// The question text.
    pub fn question(&self) -> &str {
        &self.base.content
    }

    /// The anchoring narrative node.
    pub fn parent(&self) -> Option<&NodeId> {
        self.base.parents.first()
    }

    /// The narrative node that follows this question.
    pub fn next(&self) -> Option<&NodeId> {
        self.base.children.first()
    }
}

/// A generated question with its expected answer, as handed to the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cognitive_area: Option<CognitiveArea>,
}

impl QuestionAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            difficulty,
            cognitive_area: None,
        }
    }

    pub fn with_cognitive_area(mut self, area: CognitiveArea) -> Self {
        self.cognitive_area = Some(area);
        self
    }
}
