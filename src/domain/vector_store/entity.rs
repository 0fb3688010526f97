use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of matches returned when the caller does not say
pub const DEFAULT_TOP_K: u32 = 5;

/// A hosted index as reported by the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    /// Data-plane host serving queries for this index
    pub host: String,
    pub dimension: u32,
    pub metric: String,
}

/// Nearest-neighbor query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub namespace: Option<String>,
    pub include_metadata: bool,
    pub include_values: bool,
}

impl QueryRequest {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            top_k: DEFAULT_TOP_K,
            namespace: None,
            include_metadata: true,
            include_values: false,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_include_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    /// Reject queries that cannot be sent
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.vector.is_empty() {
            return Err(DomainError::validation("Query vector must not be empty"));
        }

        if self.top_k == 0 {
            return Err(DomainError::validation("top_k must be greater than zero"));
        }

        Ok(())
    }
}

/// A single nearest-neighbor match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
}

impl ScoredMatch {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            metadata: HashMap::new(),
            values: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Matches returned by a query, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub namespace: String,
    pub matches: Vec<ScoredMatch>,
}
