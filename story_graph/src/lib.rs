//! # Story Graph
//!
//! The data crate of the story engine: a rooted graph that alternates narrative
//! segments and comprehension questions, how it is built from a story text and
//! per-breakpoint question lists, and how it is persisted as a JSON record.
//! This crate has no knowledge of language models or listeners.
//!
//! ## Core Components
//!
//! - **nodes**: Node kinds (narrative segment, question) and their shared adjacency
//! - **graph**: The id -> node arena and the builder that splits a story at breakpoints
//! - **persistence**: Lossless save/load of the whole graph

pub mod error;
pub mod graph;
pub mod nodes;
pub mod persistence;

pub use error::*;
pub use graph::*;
pub use nodes::*;
pub use persistence::*;
