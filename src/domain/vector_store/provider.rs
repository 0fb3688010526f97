//! Vector store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{IndexDescription, QueryRequest, QueryResponse};
use crate::domain::DomainError;

/// Hosted vector database operations
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the provider type name
    fn provider_type(&self) -> &'static str;

    /// List all indexes visible to the configured credentials
    async fn list_indexes(&self) -> Result<Vec<IndexDescription>, DomainError>;

    /// Describe a single index
    async fn describe_index(&self, name: &str) -> Result<IndexDescription, DomainError>;

    /// Run a nearest-neighbor query against `index`
    async fn query(
        &self,
        index: &IndexDescription,
        request: QueryRequest,
    ) -> Result<QueryResponse, DomainError>;
}
