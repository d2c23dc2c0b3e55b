//! Engine error types.

use story_graph::GraphError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure reported by an external collaborator (judge, summarizer, generator, listener).
///
/// The engine passes these through untouched; it never retries them.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CollaboratorError {
    pub fn message(msg: impl Into<String>) -> Self {
        CollaboratorError::Message(msg.into())
    }
}

/// Errors returned by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Construction, format, or corrupted-graph error from the story graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An external collaborator call failed.
    #[error("{role} failed: {source}")]
    Collaborator {
        role: &'static str,
        #[source]
        source: CollaboratorError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Wrap a collaborator failure, naming the collaborator's role.
    pub fn collaborator(role: &'static str) -> impl FnOnce(CollaboratorError) -> Self {
        move |source| EngineError::Collaborator { role, source }
    }
}
