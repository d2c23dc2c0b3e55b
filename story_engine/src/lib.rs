//! # Story Engine
//!
//! Drives a listener through a [`story_graph::StoryGraph`]: narrates segments,
//! asks the hardest available question at each breakpoint, falls back to easier
//! siblings after a wrong answer, and keeps the story moving once every question
//! at a breakpoint has failed. It can also rebuild the story told so far for a
//! summarizer when a session resumes mid-story.
//!
//! ## Core Components
//!
//! - **traversal**: The play-through state machine and the shared question selection
//! - **resume**: Ancestry walk that reconstructs the narrative prefix of a node
//! - **collaborators**: Judge, summarizer, listener, and generator interfaces with prompt adapters
//! - **events**: What a play-through did, step by step, for front-ends
//! - **config**: TOML configuration for story and question generation
//!
//! Language models, speech, and presentation live outside this crate and are
//! reached only through the collaborator traits.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod events;
pub mod resume;
pub mod testing;
pub mod traversal;

pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use resume::*;
pub use traversal::*;
