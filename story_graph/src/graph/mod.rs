//! Story Graph - the id -> node arena a session walks.

mod builder;

pub use builder::*;

use std::collections::BTreeMap;

use crate::error::{GraphError, Result};
use crate::nodes::{Node, NodeBase, NodeId, QuestionNode};

/// The main story graph structure.
///
/// Nodes reference each other by id only, so the graph owns every node and
/// serializes without cycles. A graph is immutable once built; replacing it
/// means loading a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoryGraph {
    /// All nodes by id, ordered by id for stable iteration.
    nodes: BTreeMap<NodeId, Node>,

    /// Language the story and questions are written in.
    language: String,
}

impl StoryGraph {
    pub(crate) fn from_parts(nodes: BTreeMap<NodeId, Node>, language: String) -> Self {
        Self { nodes, language }
    }

    pub(crate) fn node_map(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a node by id.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&Node> {
        self.nodes.get(id.as_ref())
    }

    /// Get a node by id, failing if it is absent.
    pub fn node(&self, id: impl AsRef<str>) -> Result<&Node> {
        let id = id.as_ref();
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    /// Get a narrative node by id.
    pub fn narrative(&self, id: impl AsRef<str>) -> Result<&NodeBase> {
        match self.node(id)? {
            Node::Narrative(base) => Ok(base),
            Node::Question(question) => Err(GraphError::UnexpectedKind {
                id: question.id().clone(),
                expected: "narrative",
            }),
        }
    }

    /// Get a question node by id.
    pub fn question(&self, id: impl AsRef<str>) -> Result<&QuestionNode> {
        match self.node(id)? {
            Node::Question(question) => Ok(question),
            Node::Narrative(base) => Err(GraphError::UnexpectedKind {
                id: base.id.clone(),
                expected: "question",
            }),
        }
    }

    /// The first narrative segment.
    pub fn root(&self) -> Result<&NodeBase> {
        self.narrative(crate::nodes::ROOT_ID)
    }

    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.nodes.contains_key(id.as_ref())
    }

    /// Iterate over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn narrative_count(&self) -> usize {
        self.nodes.values().filter(|n| !n.is_question()).count()
    }

    pub fn question_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_question()).count()
    }

    /// The segment reached from `id` when its breakpoint carries no questions.
    ///
    /// Only a narrative node with no children has one, and only when the
    /// following segment exists. Without it, a childless node is the end of
    /// the story.
    pub fn bridged_successor(&self, id: impl AsRef<str>) -> Option<&NodeId> {
        let node = self.get(id)?;
        if node.is_question() || !node.children().is_empty() {
            return None;
        }
        let next = NodeId::story(node.id().story_index()? + 1);
        self.nodes.get_key_value(next.as_str()).map(|(key, _)| key)
    }

    /// The segment a parentless narrative node is bridged from, if any.
    pub fn bridged_predecessor(&self, id: impl AsRef<str>) -> Option<&NodeId> {
        let node = self.get(id)?;
        if node.is_question() || !node.parents().is_empty() {
            return None;
        }
        let index = node.id().story_index()?.checked_sub(1)?;
        let (key, previous) = self.nodes.get_key_value(NodeId::story(index).as_str())?;
        if previous.children().is_empty() {
            Some(key)
        } else {
            None
        }
    }

    /// Check the structural invariants of the graph.
    ///
    /// Every referenced id must exist, edges must be recorded on both ends,
    /// every question must have one parent and one child, and every non-root
    /// narrative node must be reachable backwards.
    pub fn validate(&self) -> Result<()> {
        self.root()?;

        for node in self.nodes.values() {
            for child in node.children() {
                let target = self.node(child)?;
                if !target.parents().contains(node.id()) {
                    return Err(GraphError::Validation(format!(
                        "edge {} -> {} is missing its parent link",
                        node.id(),
                        child
                    )));
                }
            }
            for parent in node.parents() {
                let source = self.node(parent)?;
                if !source.children().contains(node.id()) {
                    return Err(GraphError::Validation(format!(
                        "edge {} -> {} is missing its child link",
                        parent,
                        node.id()
                    )));
                }
            }

            match node {
                Node::Question(question) => {
                    if question.base.parents.len() != 1 || question.base.children.len() != 1 {
                        return Err(GraphError::DanglingQuestion(question.id().clone()));
                    }
                }
                Node::Narrative(base) => {
                    if !base.id.is_root()
                        && base.parents.is_empty()
                        && self.bridged_predecessor(&base.id).is_none()
                    {
                        return Err(GraphError::ParentMissing(base.id.clone()));
                    }
                }
            }
        }

        Ok(())
    }
}
