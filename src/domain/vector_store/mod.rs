//! Vector store domain - Nearest-neighbor lookups against a hosted index

mod entity;
mod provider;

pub use entity::{IndexDescription, QueryRequest, QueryResponse, ScoredMatch, DEFAULT_TOP_K};
pub use provider::VectorStore;

#[cfg(test)]
pub use provider::mock::MockVectorStore;
