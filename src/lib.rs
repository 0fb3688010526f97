//! Prompt Library
//!
//! Keyed prompt templates with named-parameter substitution, plus thin
//! clients for:
//! - Google Gemini text generation and embeddings
//! - Pinecone index listing and nearest-neighbor queries

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{DomainError, PromptError, PromptLibrary};
