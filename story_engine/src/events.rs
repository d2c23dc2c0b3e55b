//! Story events - what a play-through did, in order.
//!
//! Front-ends narrate and display from these; the engine itself does no I/O
//! besides calling its collaborators.

use serde::{Deserialize, Serialize};
use story_graph::{Difficulty, NodeId};

/// A single step of a play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoryEvent {
    /// A narrative segment was told.
    Narrated { node: NodeId, content: String },

    /// A question was put to the listener.
    QuestionAsked {
        node: NodeId,
        question: String,
        difficulty: Difficulty,
    },

    /// The judge ruled on the listener's answer.
    Answered {
        node: NodeId,
        listener_answer: String,
        correct: bool,
    },

    /// Every question at this breakpoint failed; the story continues anyway.
    QuestionsExhausted { breakpoint: NodeId, next: NodeId },

    /// A breakpoint without questions was passed straight through.
    SegmentSkipped { from: NodeId, to: NodeId },

    /// The story reached a segment with nothing after it.
    Finished { node: NodeId },
}

impl StoryEvent {
    /// The node this event is about.
    pub fn node(&self) -> &NodeId {
        match self {
            StoryEvent::Narrated { node, .. }
            | StoryEvent::QuestionAsked { node, .. }
            | StoryEvent::Answered { node, .. }
            | StoryEvent::Finished { node } => node,
            StoryEvent::QuestionsExhausted { breakpoint, .. } => breakpoint,
            StoryEvent::SegmentSkipped { from, .. } => from,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StoryEvent::Finished { .. })
    }
}
