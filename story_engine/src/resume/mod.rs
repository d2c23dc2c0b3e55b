//! Resume subsystem - rebuilds the story told so far for a summarizer.

use story_graph::{GraphError, Node, NodeId, StoryGraph};

use crate::collaborators::Summarizer;
use crate::error::EngineError;

/// Concatenate the content of every narrative node from the root down to `id`.
///
/// Questions contribute nothing; the walk passes through their parent. A
/// narrative node with several parents follows the first, since every question
/// at one breakpoint hangs off the same segment. A segment reached through a
/// breakpoint without questions continues from the segment before it.
///
/// # Errors
///
/// - `GraphError::NodeNotFound` if `id` or an ancestor is missing
/// - `GraphError::ParentMissing` if a non-root node has no way back
/// - `GraphError::Cycle` if the walk comes back to a node
pub fn previous_content(graph: &StoryGraph, id: &NodeId) -> Result<String, GraphError> {
    let mut segments = Vec::new();
    let mut current = id.clone();
    let mut steps = 0;

    loop {
        steps += 1;
        if steps > graph.len() + 1 {
            return Err(GraphError::Cycle(current));
        }

        let node = graph.node(&current)?;
        if let Node::Narrative(base) = node {
            segments.push(base.content.as_str());
            if base.id.is_root() {
                break;
            }
        }

        let parent = node
            .parents()
            .first()
            .or_else(|| graph.bridged_predecessor(&current))
            .ok_or_else(|| GraphError::ParentMissing(current.clone()))?;
        current = parent.clone();
    }

    segments.reverse();
    Ok(segments.concat())
}

/// Summarizes the story up to a node.
pub struct Resumer<'g, S> {
    graph: &'g StoryGraph,
    summarizer: S,
}

impl<'g, S: Summarizer> Resumer<'g, S> {
    pub fn new(graph: &'g StoryGraph, summarizer: S) -> Self {
        Self { graph, summarizer }
    }

    pub fn previous_content(&self, id: &NodeId) -> Result<String, GraphError> {
        previous_content(self.graph, id)
    }

    /// Summary of everything told before and at `id`.
    pub fn resume_story(&self, id: &NodeId) -> Result<String, EngineError> {
        let text = self.previous_content(id)?;
        tracing::debug!(node = %id, chars = text.len(), "summarizing story so far");
        self.summarizer
            .summarize(&text)
            .map_err(EngineError::collaborator("summarizer"))
    }
}
