//! Persistence - lossless save/load of a whole story graph.
//!
//! The record shape is stable:
//!
//! ```json
//! {
//!   "nodes": { "<id>": { "type": "StoryNode" | "QuestionNode", "id": ..., ... } },
//!   "language": "French"
//! }
//! ```
//!
//! Graphs are only ever saved and restored whole.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GraphError, Result};
use crate::graph::StoryGraph;
use crate::nodes::{Node, NodeId};

/// Borrowed view of a graph in its persisted shape.
#[derive(Serialize)]
struct GraphRecordRef<'a> {
    nodes: &'a BTreeMap<NodeId, Node>,
    language: &'a str,
}

/// Convert a graph into its structured record.
pub fn save(graph: &StoryGraph) -> Result<Value> {
    serde_json::to_value(record_of(graph)).map_err(|e| GraphError::Format(e.to_string()))
}

/// Rebuild a graph from a structured record.
///
/// # Errors
///
/// `GraphError::Format` if `language` or `nodes` is missing, a node lacks its
/// `type` discriminator or carries an unknown one, a node's fields do not
/// match its kind, or a map key differs from the node's `id`.
pub fn load(record: &Value) -> Result<StoryGraph> {
    let object = record
        .as_object()
        .ok_or_else(|| GraphError::Format("graph record must be an object".to_string()))?;

    let language = object
        .get("language")
        .ok_or_else(|| GraphError::Format("missing `language` key".to_string()))?
        .as_str()
        .ok_or_else(|| GraphError::Format("`language` must be a string".to_string()))?;

    let entries = object
        .get("nodes")
        .ok_or_else(|| GraphError::Format("missing `nodes` key".to_string()))?
        .as_object()
        .ok_or_else(|| GraphError::Format("`nodes` must be an object".to_string()))?;

    let mut nodes = BTreeMap::new();
    for (key, entry) in entries {
        let node = load_node(key, entry)?;
        nodes.insert(node.id().clone(), node);
    }

    Ok(StoryGraph::from_parts(nodes, language.to_string()))
}

fn load_node(key: &str, entry: &Value) -> Result<Node> {
    let kind = entry
        .get("type")
        .ok_or_else(|| GraphError::Format(format!("node {key} has no `type` discriminator")))?;

    match kind.as_str() {
        Some(Node::NARRATIVE_TAG) | Some(Node::QUESTION_TAG) => {}
        _ => {
            return Err(GraphError::Format(format!(
                "node {key} has unrecognized type {kind}"
            )))
        }
    }

    let node: Node = serde_json::from_value(entry.clone())
        .map_err(|e| GraphError::Format(format!("node {key}: {e}")))?;

    if node.id().as_str() != key {
        return Err(GraphError::Format(format!(
            "node stored under {key} has id {}",
            node.id()
        )));
    }
    Ok(node)
}

/// Serialize a graph as pretty-printed JSON.
pub fn to_json(graph: &StoryGraph) -> Result<String> {
    serde_json::to_string_pretty(&record_of(graph)).map_err(|e| GraphError::Format(e.to_string()))
}

/// Parse a graph from JSON text.
pub fn from_json(text: &str) -> Result<StoryGraph> {
    let record: Value =
        serde_json::from_str(text).map_err(|e| GraphError::Format(e.to_string()))?;
    load(&record)
}

fn record_of(graph: &StoryGraph) -> GraphRecordRef<'_> {
    GraphRecordRef {
        nodes: graph.node_map(),
        language: graph.language(),
    }
}

impl StoryGraph {
    /// Write the graph record to `path`.
    ///
    /// The record goes to a sibling temporary file first and is renamed into
    /// place, so a failed write never leaves a partial file at `path`.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = to_json(self)?;
        let temp = temp_path(path);

        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&temp, path)) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::info!(path = %path.display(), nodes = self.len(), "saved story graph");
        Ok(())
    }

    /// Read a graph record from `path`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let graph = from_json(&text)?;
        tracing::info!(path = %path.display(), nodes = graph.len(), "loaded story graph");
        Ok(graph)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
