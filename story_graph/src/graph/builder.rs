//! Graph construction from a story text and per-breakpoint question lists.

use std::collections::BTreeMap;

use super::StoryGraph;
use crate::error::{GraphError, Result};
use crate::nodes::{Node, NodeBase, NodeId, QuestionAnswer, QuestionNode};

/// Default marker separating story segments.
pub const DEFAULT_BREAKPOINT_SYMBOL: &str = "||";

/// Builds story graphs by splitting a story at its breakpoints.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    breakpoint_symbol: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT_SYMBOL)
    }
}

impl GraphBuilder {
    /// Create a builder splitting on `breakpoint_symbol`.
    pub fn new(breakpoint_symbol: impl Into<String>) -> Self {
        Self {
            breakpoint_symbol: breakpoint_symbol.into(),
        }
    }

    pub fn breakpoint_symbol(&self) -> &str {
        &self.breakpoint_symbol
    }

    /// Build the graph for `story`.
    ///
    /// The story splits into N+1 segments `story_0..=story_N`. Each entry `j` of
    /// `questions[i]` becomes `question_i_j`, wired
    /// `story_i -> question_i_j -> story_{i+1}`. List order is kept, so it
    /// breaks ties between questions of equal difficulty.
    ///
    /// # Errors
    ///
    /// `GraphError::Validation` if the symbol is empty or absent from the story,
    /// or if `questions.len()` differs from the number of breakpoints.
    pub fn build(
        &self,
        story: &str,
        questions: &[Vec<QuestionAnswer>],
        language: impl Into<String>,
    ) -> Result<StoryGraph> {
        let symbol = self.breakpoint_symbol.as_str();
        if symbol.is_empty() {
            return Err(GraphError::Validation(
                "breakpoint symbol must not be empty".to_string(),
            ));
        }
        if !story.contains(symbol) {
            return Err(GraphError::Validation(format!(
                "story does not contain the breakpoint symbol {symbol:?}"
            )));
        }

        let segments: Vec<&str> = story.split(symbol).collect();
        let breakpoints = segments.len() - 1;
        if questions.len() != breakpoints {
            return Err(GraphError::Validation(format!(
                "story has {breakpoints} breakpoints but {} question lists were given",
                questions.len()
            )));
        }

        let mut narratives: Vec<NodeBase> = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| NodeBase::new(NodeId::story(index), *segment))
            .collect();

        let mut nodes = BTreeMap::new();
        for (breakpoint, entries) in questions.iter().enumerate() {
            for (index, entry) in entries.iter().enumerate() {
                let mut question = QuestionNode::new(
                    NodeId::question(breakpoint, index),
                    entry.question.as_str(),
                    entry.answer.as_str(),
                    entry.difficulty,
                );
                question.cognitive_area = entry.cognitive_area;

                let id = question.id().clone();
                let anchor = NodeId::story(breakpoint);
                let next = NodeId::story(breakpoint + 1);

                narratives[breakpoint].add_child(id.clone());
                question.base.add_parent(anchor);
                question.base.add_child(next);
                narratives[breakpoint + 1].add_parent(id.clone());

                nodes.insert(id, Node::Question(question));
            }
        }

        for base in narratives {
            nodes.insert(base.id.clone(), Node::Narrative(base));
        }

        let graph = StoryGraph::from_parts(nodes, language.into());
        tracing::debug!(
            segments = graph.narrative_count(),
            questions = graph.question_count(),
            language = graph.language(),
            "built story graph"
        );
        Ok(graph)
    }
}

/// Build a story graph, splitting `story` on `breakpoint_symbol`.
///
/// See [`GraphBuilder::build`].
pub fn create_graph(
    story: &str,
    breakpoint_symbol: &str,
    questions: &[Vec<QuestionAnswer>],
    language: impl Into<String>,
) -> Result<StoryGraph> {
    GraphBuilder::new(breakpoint_symbol).build(story, questions, language)
}
