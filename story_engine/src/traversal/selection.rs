//! Question selection - the one search both the play-through driver and
//! single-step callers use.

use std::collections::BTreeSet;

use story_graph::{Difficulty, GraphError, Node, NodeId, QuestionNode, StoryGraph};

/// Ids of questions answered incorrectly at the current breakpoint.
pub type FailedSet = BTreeSet<NodeId>;

/// Pick the next question among the children of `narrative_id`.
///
/// Scans [`Difficulty::PRIORITY`] (hard, medium, easy) and returns the first
/// child of that difficulty not in `failed`. Ties keep child order. `None`
/// when every child is excluded or there are no children.
pub fn select_question(
    graph: &StoryGraph,
    narrative_id: &NodeId,
    failed: &FailedSet,
) -> Result<Option<NodeId>, GraphError> {
    let anchor = graph.narrative(narrative_id)?;

    let candidates = anchor
        .children
        .iter()
        .filter(|id| !failed.contains(*id))
        .map(|id| graph.question(id))
        .collect::<Result<Vec<&QuestionNode>, _>>()?;

    Ok(Difficulty::PRIORITY.iter().find_map(|difficulty| {
        candidates
            .iter()
            .find(|question| question.difficulty == *difficulty)
            .map(|question| question.id().clone())
    }))
}

/// The next question to ask from `node_id`, excluding `failed`.
///
/// `node_id` may be a narrative node or a question the listener just got
/// wrong, in which case the search runs over its siblings. Pure; performs no
/// transition.
pub fn next_question_node_id(
    graph: &StoryGraph,
    node_id: &NodeId,
    failed: &FailedSet,
) -> Result<Option<NodeId>, GraphError> {
    let anchor = match graph.node(node_id)? {
        Node::Narrative(base) => &base.id,
        Node::Question(question) => question
            .parent()
            .ok_or_else(|| GraphError::DanglingQuestion(question.id().clone()))?,
    };
    select_question(graph, anchor, failed)
}
