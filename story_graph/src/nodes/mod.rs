//! Node definitions for the story graph.
//!
//! The graph alternates two node kinds:
//! - **Narrative** nodes hold one contiguous slice of the story between breakpoints
//! - **Question** nodes hold a comprehension question anchored after a narrative node
//!
//! Both share [`NodeBase`]; adjacency is stored as ordered id lists so the graph
//! is an arena keyed by [`NodeId`].

mod question;

pub use question::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Id of the first narrative segment, where every traversal starts.
pub const ROOT_ID: &str = "story_0";

/// Deterministic, order-derived node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an arbitrary id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the narrative segment at `index` (`story_<index>`).
    pub fn story(index: usize) -> Self {
        Self(format!("story_{index}"))
    }

    /// Id of question `index` at breakpoint `breakpoint` (`question_<breakpoint>_<index>`).
    pub fn question(breakpoint: usize, index: usize) -> Self {
        Self(format!("question_{breakpoint}_{index}"))
    }

    /// The root id.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment index encoded in a narrative id, if this is one.
    pub fn story_index(&self) -> Option<usize> {
        self.0.strip_prefix("story_")?.parse().ok()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Fields shared by every node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    pub id: NodeId,

    /// Narrative text for a segment, question text for a question.
    pub content: String,

    /// Outgoing edges, in insertion order.
    pub children: Vec<NodeId>,

    /// Incoming edges, in insertion order.
    pub parents: Vec<NodeId>,
}

impl NodeBase {
    /// Create an unlinked node.
    pub fn new(id: NodeId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn add_parent(&mut self, parent: NodeId) {
        self.parents.push(parent);
    }
}

/// A node in the story graph.
///
/// The serde tag is the persisted `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// One contiguous slice of the story.
    #[serde(rename = "StoryNode")]
    Narrative(NodeBase),

    /// A comprehension question between two slices.
    #[serde(rename = "QuestionNode")]
    Question(QuestionNode),
}

impl Node {
    /// Discriminator written for narrative nodes.
    pub const NARRATIVE_TAG: &'static str = "StoryNode";
    /// Discriminator written for question nodes.
    pub const QUESTION_TAG: &'static str = "QuestionNode";

    /// Create an unlinked narrative node.
    pub fn narrative(id: NodeId, content: impl Into<String>) -> Self {
        Node::Narrative(NodeBase::new(id, content))
    }

    pub fn base(&self) -> &NodeBase {
        match self {
            Node::Narrative(base) => base,
            Node::Question(question) => &question.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Node::Narrative(base) => base,
            Node::Question(question) => &mut question.base,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.base().id
    }

    pub fn content(&self) -> &str {
        &self.base().content
    }

    pub fn children(&self) -> &[NodeId] {
        &self.base().children
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.base().parents
    }

    pub fn is_question(&self) -> bool {
        matches!(self, Node::Question(_))
    }

    pub fn as_question(&self) -> Option<&QuestionNode> {
        match self {
            Node::Question(question) => Some(question),
            Node::Narrative(_) => None,
        }
    }

    /// The persisted discriminator for this node.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Narrative(_) => Self::NARRATIVE_TAG,
            Node::Question(_) => Self::QUESTION_TAG,
        }
    }
}

impl From<QuestionNode> for Node {
    fn from(question: QuestionNode) -> Self {
        Node::Question(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_generation() {
        assert_eq!(NodeId::story(3).as_str(), "story_3");
        assert_eq!(NodeId::question(1, 2).as_str(), "question_1_2");
        assert!(NodeId::root().is_root());
        assert!(!NodeId::story(1).is_root());
    }

    #[test]
    fn test_story_index() {
        assert_eq!(NodeId::story(12).story_index(), Some(12));
        assert_eq!(NodeId::question(0, 0).story_index(), None);
        assert_eq!(NodeId::new("story_x").story_index(), None);
    }

    #[test]
    fn test_node_accessors() {
        let mut node = Node::narrative(NodeId::story(0), "Once upon a time");
        node.base_mut().add_child(NodeId::question(0, 0));

        assert_eq!(node.id(), &NodeId::root());
        assert_eq!(node.content(), "Once upon a time");
        assert_eq!(node.children(), &[NodeId::question(0, 0)]);
        assert!(node.parents().is_empty());
        assert!(!node.is_question());
        assert_eq!(node.kind_name(), "StoryNode");
    }

    #[test]
    fn test_narrative_serializes_with_discriminator() {
        let node = Node::narrative(NodeId::story(1), "The cat slept.");
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["type"], "StoryNode");
        assert_eq!(value["id"], "story_1");
        assert_eq!(value["children"], serde_json::json!([]));
        assert!(value.get("answer").is_none());
    }

    #[test]
    fn test_question_serializes_flat() {
        let question = QuestionNode::new(
            NodeId::question(0, 0),
            "What color is the cat?",
            "orange",
            Difficulty::Easy,
        );
        let value = serde_json::to_value(Node::from(question)).unwrap();

        assert_eq!(value["type"], "QuestionNode");
        assert_eq!(value["id"], "question_0_0");
        assert_eq!(value["content"], "What color is the cat?");
        assert_eq!(value["answer"], "orange");
        assert_eq!(value["difficulty"], "easy");
        assert!(value["cognitive_area"].is_null());
    }
}
